use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use genlab_runtime::{
    Lab, LabConfig, LabError, LabStatus, NullRenderer, ParamKind, ParamValue, Renderer,
};

/// Flags of the `run` subcommand.
pub struct RunOptions {
    /// Number of steps to advance.
    pub steps: u64,
    /// Seed overriding the configured one.
    pub seed: Option<u64>,
    /// Start from a cleared state instead of a random one.
    pub blank: bool,
    /// Raw `id=value` assignments.
    pub assignments: Vec<String>,
    /// Surface width overriding the configured one.
    pub width: Option<u32>,
    /// Surface height overriding the configured one.
    pub height: Option<u32>,
    /// Sample population every this many steps.
    pub every: Option<u64>,
    /// Emit a JSON report instead of a table.
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Sample {
    iteration: u64,
    population: Option<f64>,
}

#[derive(Serialize)]
struct RunReport {
    id: String,
    name: String,
    width: u32,
    height: u32,
    seed: Option<u64>,
    blank: bool,
    samples: Vec<Sample>,
}

/// Create `id`, apply the assignments and step it `opts.steps` times.
pub fn run(config: LabConfig, id: &str, opts: &RunOptions) -> Result<(), String> {
    let width = opts.width.unwrap_or(config.width);
    let height = opts.height.unwrap_or(config.height);
    let mut config = config.with_size(width, height);
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    config.validate().map_err(|e| e.to_string())?;

    let registry = genlab_systems::registry();
    if !registry.contains(id) {
        return Err(LabError::UnknownProcess(id.to_string()).to_string());
    }
    let assignments = parse_assignments(&opts.assignments)?;

    let mut lab = Lab::new(registry, &config, NullRenderer);
    if !lab.switch_to(id) {
        return Err(match lab.status() {
            LabStatus::NoProcess { message } => message.clone(),
            LabStatus::Active => format!("failed to load {id}"),
        });
    }

    for (param, raw) in &assignments {
        let value = coerce(&lab, id, param, raw)?;
        lab.set_param_value(param, value);
    }
    if opts.blank {
        lab.clear();
    } else {
        lab.reset();
    }

    let every = opts.every.unwrap_or(opts.steps / 10).max(1);
    let mut samples = vec![sample(&lab)];
    for step in 1..=opts.steps {
        lab.step_once();
        if step % every == 0 || step == opts.steps {
            samples.push(sample(&lab));
        }
    }

    let info = lab.info();
    let report = RunReport {
        id: id.to_string(),
        name: info.name,
        width: config.width,
        height: config.height,
        seed: config.seed,
        blank: opts.blank,
        samples,
    };

    if opts.json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print_report(&report, opts.steps);
    }
    Ok(())
}

fn parse_assignments(raw: &[String]) -> Result<Vec<(String, String)>, String> {
    raw.iter()
        .map(|a| {
            a.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| format!("expected ID=VALUE, got '{a}'"))
        })
        .collect()
}

/// Check an assignment against the declared parameters of the live process.
fn coerce<R: Renderer>(lab: &Lab<R>, id: &str, param: &str, raw: &str) -> Result<ParamValue, String> {
    let process = lab
        .process()
        .ok_or_else(|| format!("failed to load {id}"))?
        .process();
    let descriptor = process
        .parameters()
        .iter()
        .find(|d| d.id == param)
        .ok_or_else(|| format!("{id} has no parameter '{param}'"))?;
    if let ParamKind::Action { .. } = descriptor.kind {
        return Err(format!("'{param}' is an action and takes no value"));
    }
    // Rule text arrives with literal "\n" separators from the shell.
    let raw = if matches!(descriptor.kind, ParamKind::MultilineText { .. }) {
        raw.replace("\\n", "\n")
    } else {
        raw.to_string()
    };
    ParamValue::parse_for(&descriptor.kind, &raw)
        .filter(|v| !descriptor.kind.is_numeric() || v.as_number().is_some())
        .ok_or_else(|| {
            format!(
                "invalid value '{raw}' for {param} ({})",
                descriptor.kind.tag()
            )
        })
}

fn sample<R: Renderer>(lab: &Lab<R>) -> Sample {
    let info = lab.info();
    Sample {
        iteration: info.iteration,
        population: info.population,
    }
}

fn print_report(report: &RunReport, steps: u64) {
    let seed = report
        .seed
        .map_or_else(|| "random seed".to_string(), |s| format!("seed={s}"));
    println!(
        "  {} {} {}",
        report.name.bold(),
        format!("({})", report.id).dimmed(),
        format!(
            "({steps} steps, {}x{}, {seed}{})",
            report.width,
            report.height,
            if report.blank { ", blank" } else { "" }
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Iteration", "Population"]);
    for s in &report.samples {
        let population = s
            .population
            .map_or_else(|| "—".to_string(), |p| format!("{p}"));
        table.add_row(vec![s.iteration.to_string(), population]);
    }
    println!("{table}");
    println!();

    if let Some(last) = report.samples.last() {
        let population = last
            .population
            .map_or_else(|| "n/a".to_string(), |p| format!("{p}"));
        println!(
            "  {} population {} after {} iterations",
            "Final".green().bold(),
            population,
            last.iteration
        );
    }
}
