//! Standard manual page sections
//!
//! Variants are declared in conventional order, so comparing two sections
//! tells whether they appear in the expected sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Before the first section header.
    #[default]
    None,
    Name,
    Library,
    Synopsis,
    Description,
    Context,
    ImplementationNotes,
    ReturnValues,
    Environment,
    Files,
    ExitStatus,
    Examples,
    Diagnostics,
    Compatibility,
    Errors,
    SeeAlso,
    Standards,
    History,
    Authors,
    Caveats,
    Bugs,
    SecurityConsiderations,
    /// Any title not in the standard table.
    Custom,
}

const TITLES: &[(&str, Section)] = &[
    ("NAME", Section::Name),
    ("LIBRARY", Section::Library),
    ("SYNOPSIS", Section::Synopsis),
    ("DESCRIPTION", Section::Description),
    ("CONTEXT", Section::Context),
    ("IMPLEMENTATION NOTES", Section::ImplementationNotes),
    ("RETURN VALUES", Section::ReturnValues),
    ("ENVIRONMENT", Section::Environment),
    ("FILES", Section::Files),
    ("EXIT STATUS", Section::ExitStatus),
    ("EXAMPLES", Section::Examples),
    ("DIAGNOSTICS", Section::Diagnostics),
    ("COMPATIBILITY", Section::Compatibility),
    ("ERRORS", Section::Errors),
    ("SEE ALSO", Section::SeeAlso),
    ("STANDARDS", Section::Standards),
    ("HISTORY", Section::History),
    ("AUTHORS", Section::Authors),
    ("CAVEATS", Section::Caveats),
    ("BUGS", Section::Bugs),
    ("SECURITY CONSIDERATIONS", Section::SecurityConsiderations),
];

impl Section {
    /// Classify a section title. Matching is exact.
    pub fn classify(title: &str) -> Section {
        TITLES
            .iter()
            .find(|(name, _)| *name == title)
            .map(|(_, sec)| *sec)
            .unwrap_or(Section::Custom)
    }

    /// Canonical title, if this is a standard section.
    pub fn title(self) -> Option<&'static str> {
        TITLES
            .iter()
            .find(|(_, sec)| *sec == self)
            .map(|(name, _)| *name)
    }

    pub fn is_named(self) -> bool {
        !matches!(self, Section::None | Section::Custom)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::None => f.write_str("(none)"),
            Section::Custom => f.write_str("(custom)"),
            named => f.write_str(named.title().unwrap_or_default()),
        }
    }
}
