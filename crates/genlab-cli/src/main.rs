//! Command-line host for GenLab: list process kinds, inspect their
//! parameters and run them headless.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use genlab_runtime::LabConfig;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "genlab-cli",
    about = "GenLab: a laboratory for generative processes",
    version,
    propagate_version = true
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered process kinds
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the parameters a process declares, with their defaults
    Params {
        /// Process identifier (e.g. ca_life)
        id: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a process headless and report its population over time
    Run {
        /// Process identifier (e.g. ca_life)
        id: String,

        /// Number of steps to run
        #[arg(short = 'n', long, default_value = "100")]
        steps: u64,

        /// Seed for deterministic runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start from the empty configuration instead of a random one
        #[arg(long)]
        blank: bool,

        /// Set a parameter before the run (repeatable)
        #[arg(long = "set", value_name = "ID=VALUE")]
        set: Vec<String>,

        /// Surface width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Surface height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Record a sample every N steps (default: ten samples per run)
        #[arg(short, long)]
        every: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(command: Commands, config: LabConfig) -> Result<(), String> {
    match command {
        Commands::List { json } => commands::list::run(json),
        Commands::Params { id, json } => commands::params::run(&config, &id, json),
        Commands::Run {
            id,
            steps,
            seed,
            blank,
            set,
            width,
            height,
            every,
            json,
        } => commands::run::run(
            config,
            &id,
            &commands::run::RunOptions {
                steps,
                seed,
                blank,
                assignments: set,
                width,
                height,
                every,
                json,
            },
        ),
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result =
        commands::load_config(cli.config.as_deref()).and_then(|config| dispatch(cli.command, config));

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
