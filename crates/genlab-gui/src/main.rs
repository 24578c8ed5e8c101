//! GenLab window: macroquad entry point and frame loop.

use std::path::Path;
use std::time::Duration;

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use genlab_gui::app::App;
use genlab_gui::theme::{WINDOW_H, WINDOW_W, ui};
use genlab_runtime::LabConfig;

fn window_conf() -> Conf {
    Conf {
        window_title: "GenLab".to_owned(),
        window_width: WINDOW_W,
        window_height: WINDOW_H,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Read `--config <file>` if given. A broken file is reported and the
/// defaults are used instead.
fn load_config() -> LabConfig {
    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args
        .windows(2)
        .find(|w| w[0] == "--config" || w[0] == "-c")
        .map(|w| w[1].clone())
    else {
        return LabConfig::default();
    };
    match LabConfig::from_file(Path::new(&path)) {
        Ok(config) => {
            info!(%path, "loaded config");
            config
        }
        Err(e) => {
            error!(%path, "{e}; using defaults");
            LabConfig::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    let config = load_config();

    prevent_quit();
    let mut app = App::new(&config);
    app.start();

    loop {
        clear_background(ui::BLACK);

        app.update(Duration::from_secs_f64(get_time()));
        for intent in app.draw() {
            app.apply(intent);
        }

        if is_quit_requested() {
            let info = app.lab().info();
            info!(
                process = %info.name,
                iteration = info.iteration,
                "shutting down"
            );
            app.shutdown();
            break;
        }

        next_frame().await;
    }
}
