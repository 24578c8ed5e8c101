use crate::param::{ParamDescriptor, ParamValue};
use crate::process::Process;

/// A parameter descriptor together with its value at the time the panel
/// was populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSnapshot {
    /// The declaration.
    pub descriptor: ParamDescriptor,
    /// The value, `None` for action buttons.
    pub value: Option<ParamValue>,
}

/// Instruction for the parameter panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelUpdate {
    /// Rebuild controls for a newly active process.
    Populate {
        /// Display name of the process.
        name: String,
        /// Its parameters in declaration order; may be empty.
        parameters: Vec<ParamSnapshot>,
    },
    /// There is no process to configure.
    Unavailable {
        /// Message to show in place of controls.
        message: String,
    },
}

impl PanelUpdate {
    /// Snapshot the parameters of `process`.
    pub fn populate(process: &dyn Process) -> Self {
        let parameters = process
            .parameters()
            .iter()
            .map(|d| ParamSnapshot {
                descriptor: d.clone(),
                value: process.param_value(&d.id),
            })
            .collect();
        Self::Populate {
            name: process.name().to_string(),
            parameters,
        }
    }
}
