use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};
use crate::view::VisualizationParams;

/// Configuration for a lab session.
///
/// Built with the `with_*` methods or read from TOML; every field is
/// optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Process selected at startup.
    pub initial_process: String,
    /// Initial steps per second.
    pub rate: u32,
    /// Slowest selectable rate.
    pub min_rate: u32,
    /// Fastest selectable rate.
    pub max_rate: u32,
    /// Quiet period before a resize is handled, in milliseconds.
    pub resize_quiet_ms: u64,
    /// Backing-store pixels per displayed pixel.
    pub backing_scale: f32,
    /// Initial surface size for hosts without a window.
    pub width: u32,
    /// Initial surface size for hosts without a window.
    pub height: u32,
    /// Seed for process randomness. Unset means OS entropy.
    pub seed: Option<u64>,
    /// Initial presentation settings.
    pub visualization: VisualizationParams,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            initial_process: "ca_life".to_string(),
            rate: 10,
            min_rate: 1,
            max_rate: 60,
            resize_quiet_ms: 250,
            backing_scale: 1.0,
            width: 800,
            height: 600,
            seed: None,
            visualization: VisualizationParams::default(),
        }
    }
}

impl LabConfig {
    /// Parse a configuration from TOML and validate it.
    pub fn from_toml_str(content: &str) -> LabResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_file(path: &Path) -> LabResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> LabResult<()> {
        if self.min_rate == 0 {
            return Err(LabError::InvalidConfig("min_rate must be at least 1".into()));
        }
        if self.min_rate > self.max_rate {
            return Err(LabError::InvalidConfig(format!(
                "min_rate {} exceeds max_rate {}",
                self.min_rate, self.max_rate
            )));
        }
        if !(self.backing_scale.is_finite() && self.backing_scale > 0.0) {
            return Err(LabError::InvalidConfig(format!(
                "backing_scale must be positive, got {}",
                self.backing_scale
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(LabError::InvalidConfig("surface size must be non-zero".into()));
        }
        Ok(())
    }

    /// Resize quiet period as a duration.
    pub fn resize_quiet(&self) -> Duration {
        Duration::from_millis(self.resize_quiet_ms)
    }

    /// Set the startup process.
    pub fn with_initial_process(mut self, id: &str) -> Self {
        self.initial_process = id.to_string();
        self
    }

    /// Set the initial steps per second.
    pub fn with_rate(mut self, rate: u32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the seed for process randomness.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the initial surface size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the backing-store scale.
    pub fn with_backing_scale(mut self, scale: f32) -> Self {
        self.backing_scale = scale;
        self
    }

    /// Set the resize quiet period in milliseconds.
    pub fn with_resize_quiet_ms(mut self, ms: u64) -> Self {
        self.resize_quiet_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = LabConfig::default();
        assert_eq!(config.initial_process, "ca_life");
        assert_eq!(config.rate, 10);
        assert_eq!(config.resize_quiet(), Duration::from_millis(250));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = LabConfig::default()
            .with_initial_process("agent_slime")
            .with_rate(30)
            .with_seed(5)
            .with_size(320, 200)
            .with_backing_scale(0.5);
        assert_eq!(config.initial_process, "agent_slime");
        assert_eq!(config.rate, 30);
        assert_eq!(config.seed, Some(5));
        assert_eq!((config.width, config.height), (320, 200));
        assert!((config.backing_scale - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = LabConfig::from_toml_str(
            r#"
            rate = 24
            seed = 3

            [visualization]
            grid_enabled = true
            palette = "ember"
            "#,
        )
        .unwrap();
        assert_eq!(config.rate, 24);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.max_rate, 60);
        assert!(config.visualization.grid_enabled);
        assert_eq!(config.visualization.palette, "ember");
    }

    #[test]
    fn invalid_rate_range_rejected() {
        let err = LabConfig::from_toml_str("min_rate = 30\nmax_rate = 5").unwrap_err();
        assert!(matches!(err, LabError::InvalidConfig(_)));
    }

    #[test]
    fn bad_scale_rejected() {
        let config = LabConfig::default().with_backing_scale(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = LabConfig::from_toml_str("rate = \"fast\"").unwrap_err();
        assert!(matches!(err, LabError::ConfigParse(_)));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.toml");
        std::fs::write(&path, "initial_process = \"ca_brain\"\n").unwrap();
        let config = LabConfig::from_file(&path).unwrap();
        assert_eq!(config.initial_process, "ca_brain");

        let missing = LabConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, LabError::ConfigIo(_)));
    }
}
