/// Alias for `Result<T, LabError>`.
pub type LabResult<T> = Result<T, LabError>;

/// Errors raised by the runtime and by process constructors.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    /// A process constructor rejected its inputs or could not allocate state.
    #[error("failed to construct process '{id}': {reason}")]
    Construction {
        /// The identifier that was being constructed.
        id: String,
        /// Why construction failed.
        reason: String,
    },

    /// No process is registered under the given identifier.
    #[error("unknown process: {0}")]
    UnknownProcess(String),

    /// The configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::LabConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl LabError {
    /// Shorthand for a [`LabError::Construction`] error.
    pub fn construction(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
