//! Document-level metadata collected during validation
//!
//! The prologue macros (`Dd`, `Dt`, `Os`) fill in the header fields; the
//! section and inline validators keep the parse state here (current section,
//! literal mode, spacing). Renderers receive the finished value.

use super::ast::{NodeId, Section};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentMeta {
    pub title: Option<String>,
    /// Normalized date, `Month D, YYYY` unless quick mode kept it verbatim.
    pub date: Option<String>,
    pub date_raw: Option<String>,
    pub os: Option<String>,
    pub vol: Option<String>,
    pub msec: Option<String>,
    pub arch: Option<String>,
    /// First `Nm` of the document.
    pub name: Option<String>,
    pub last_section: Section,
    pub last_named: Section,
    pub prologue_complete: bool,
    pub in_synopsis: bool,
    pub spacing_suppressed: bool,
    pub literal: bool,
    #[serde(skip)]
    pub last_es: Option<NodeId>,
    pub registers: BTreeMap<String, i32>,
    /// Skip date normalization.
    pub quick: bool,
}

impl DocumentMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quick(mut self, quick: bool) -> Self {
        self.quick = quick;
        self
    }

    pub fn set_register(&mut self, name: &str, value: i32) {
        self.registers.insert(name.to_string(), value);
    }

    pub fn register(&self, name: &str) -> i32 {
        self.registers.get(name).copied().unwrap_or(0)
    }

    /// First character of the manual section; `'\0'` when it is empty.
    pub fn msec_class(&self) -> Option<char> {
        self.msec.as_deref().map(|m| m.chars().next().unwrap_or('\0'))
    }

    pub fn update_prologue_complete(&mut self) {
        self.prologue_complete = self.title.is_some() && self.date.is_some() && self.os.is_some();
    }
}
