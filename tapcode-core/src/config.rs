//! Engine configuration.
//!
//! The host application hands the engine an [`EngineConfig`] at construction
//! time, either built in code through the `with_*` builders or loaded from a
//! TOML file. Every field has a default, so a missing or partial file is
//! never an error; only a file that exists and fails to parse is.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Why a configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Prediction-engine tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of ranked predictions handed to the keyboard.
    pub prediction_limit: usize,
    /// Whitespace inserted per indentation level by smart expansion.
    pub indent_unit: String,
    /// When false, every button inserts its text verbatim.
    pub smart_expansion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prediction_limit: 8,
            indent_unit: "    ".to_string(),
            smart_expansion: true,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Load from `path`, falling back to defaults when the file does not
    /// exist. A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Set the maximum number of predictions per ranking call.
    #[must_use]
    pub fn with_prediction_limit(mut self, limit: usize) -> Self {
        self.prediction_limit = limit;
        self
    }

    /// Set the indentation unit (e.g. `"    "` or `"\t"`).
    #[must_use]
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Enable or disable smart-text expansion.
    #[must_use]
    pub fn with_smart_expansion(mut self, enabled: bool) -> Self {
        self.smart_expansion = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = EngineConfig::default();
        assert_eq!(config.prediction_limit, 8);
        assert_eq!(config.indent_unit, "    ");
        assert!(config.smart_expansion);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = EngineConfig::default()
            .with_prediction_limit(4)
            .with_indent_unit("\t")
            .with_smart_expansion(false);

        assert_eq!(config.prediction_limit, 4);
        assert_eq!(config.indent_unit, "\t");
        assert!(!config.smart_expansion);
    }

    #[test]
    fn deserialize_partial_config() {
        let toml_str = r#"
prediction_limit = 12
"#;
        let config = EngineConfig::from_toml(toml_str).expect("should deserialize");
        assert_eq!(config.prediction_limit, 12);
        // Untouched keys keep their defaults.
        assert_eq!(config.indent_unit, "    ");
        assert!(config.smart_expansion);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let toml_str = r#"
prediction_limit = 3
theme = "gruvbox"
"#;
        let config = EngineConfig::from_toml(toml_str).expect("should deserialize");
        assert_eq!(config.prediction_limit, 3);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(EngineConfig::from_toml("prediction_limit = \"eight\"").is_err());
    }

    #[test]
    fn load_from_nonexistent_path_returns_error() {
        assert!(EngineConfig::load_from(Path::new("/nonexistent/tapcode.toml")).is_err());
    }

    #[test]
    fn load_or_default_tolerates_a_missing_file() {
        let config = EngineConfig::load_or_default(Path::new("/nonexistent/tapcode.toml"))
            .expect("missing file should fall back to defaults");
        assert_eq!(config.prediction_limit, 8);
    }
}
