/// `genlab list`: registered process kinds.
pub mod list;
/// `genlab params`: parameter descriptors of one kind.
pub mod params;
/// `genlab run`: step a kind headless and report population.
pub mod run;

use std::path::Path;

use genlab_runtime::{Creation, LabConfig, LabError, ParamDescriptor, ParamKind, ProcessInstance};

/// Read the configuration file, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<LabConfig, String> {
    match path {
        Some(path) => {
            LabConfig::from_file(path).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => Ok(LabConfig::default()),
    }
}

/// Build an instance of `id` on a `width` x `height` surface. Unlike the
/// interactive host, an unregistered id is an error here.
fn instantiate(id: &str, width: u32, height: u32) -> Result<ProcessInstance, String> {
    let mut registry = genlab_systems::registry();
    match registry.create(id, width, height) {
        Creation::Created(instance) => Ok(instance),
        Creation::Fallback(_) => Err(LabError::UnknownProcess(id.to_string()).to_string()),
        Creation::Failed { error, .. } => Err(error.to_string()),
    }
}

/// Human-readable bounds of a numeric parameter.
fn describe_range(descriptor: &ParamDescriptor) -> String {
    match &descriptor.kind {
        ParamKind::Slider { min, max, step } => format!("{min}..{max} (step {step})"),
        ParamKind::Number { min, max, step } => {
            let bound = |b: &Option<f64>| b.map_or_else(String::new, |v| v.to_string());
            match step {
                Some(step) => format!("{}..{} (step {step})", bound(min), bound(max)),
                None => format!("{}..{}", bound(min), bound(max)),
            }
        }
        ParamKind::MultilineText { rows } => format!("{rows} rows"),
        ParamKind::Action { button_text } => format!("[{button_text}]"),
        ParamKind::Checkbox | ParamKind::Text => "—".to_string(),
    }
}
