//! Configuration loader
//!
//! `defaults/mdoc.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. Callers layer
//! user files and command line overrides on top via [`Loader`] before
//! deserializing into [`MdocConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/mdoc.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MdocConfig {
    pub validation: ValidationConfig,
    pub output: OutputConfig,
}

/// Knobs that change what the validator does.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationConfig {
    pub quick: bool,
    pub default_os: String,
}

impl ValidationConfig {
    /// Operating system to use when `Os` has no argument, if configured.
    /// Without one the validator uses the bare host system name
    /// (`std::env::consts::OS`, e.g. "linux") with no release number, so
    /// set this to get a "sysname release" string such as "OpenBSD 5.5".
    pub fn default_os(&self) -> Option<&str> {
        Some(self.default_os.as_str()).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub min_severity: String,
    pub tree: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MdocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdocConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.validation.quick);
        assert_eq!(config.validation.default_os(), None);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.min_severity, "warning");
        assert!(!config.output.tree);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("validation.quick", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.validation.quick);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[validation]\ndefault_os = \"OpenBSD 5.5\"").expect("write config");
        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.validation.default_os(), Some("OpenBSD 5.5"));
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/mdoc.toml")
            .build()
            .expect("config to build");
        assert!(!config.output.tree);
    }
}
