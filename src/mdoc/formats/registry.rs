//! Output formats for validated mdoc documents
//!
//! Renderers for a [`Document`] are looked up by name; the CLI prints
//! `--tree` through the `treeviz` entry. `treeviz` and `json` are registered
//! by default. Both render the tree as the validator left it, with the
//! normalized list, display and font data.

use crate::mdoc::building::Document;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Renders a validated document.
pub trait Formatter: Send + Sync {
    /// Name the format is selected by, such as "treeviz".
    fn name(&self) -> &str;

    /// Render the tree and metadata. Documents whose validation failed must
    /// not be passed in.
    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    /// One-line summary of the format.
    fn description(&self) -> &str {
        ""
    }
}

/// Output formats by name.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Replaces any formatter already registered under the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?
            .serialize(doc)
    }

    /// Sorted names of the registered formats.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// The tree dump and the JSON rendering.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
