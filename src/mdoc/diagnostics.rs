//! Diagnostics emitted while validating a manual page
//!
//! Diagnostics are advisory: they describe sloppy or suspicious input and
//! never stop validation. Hard failures are [`ValidationError`]s instead.
//!
//! The validator does not store diagnostics. It hands each one to a
//! [`DiagnosticSink`]; a `Vec<Diagnostic>` is the simplest sink and is what
//! the builder and the CLI use.
//!
//! [`ValidationError`]: super::error::ValidationError

use super::ast::Position;
use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

impl DiagnosticSeverity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "warning" => Some(DiagnosticSeverity::Warning),
            "error" => Some(DiagnosticSeverity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Error => write!(f, "error"),
        }
    }
}

/// What a diagnostic is about. The context string of the diagnostic carries
/// the specifics (macro names, offending words).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    // prologue and document structure
    NoPrologue,
    PrologueOrder,
    PrologueRepeated,
    DateMissing,
    DateBad,
    TitleCase,
    ManualSectionBad,
    ArchBad,
    DocumentEmpty,
    ContentBeforeSection,
    // sections
    NameSectionFirst,
    NameSectionBad,
    SectionRepeated,
    SectionOrder,
    SectionManual,
    // structure and child counts
    ArgCount,
    ParentMismatch,
    MacroEmpty,
    ObsoleteMacro,
    // arguments
    ArgEmpty,
    ArgRepeated,
    ArgIgnored,
    ArgSkip,
    ArgExcess,
    MissingStd,
    NoName,
    // lists
    ListNoType,
    ListTypeRepeated,
    ListTypeLate,
    ListNoWidth,
    ListContentMoved,
    ItemNoHead,
    ItemNoBody,
    ColumnSyntax,
    CellCount,
    // displays
    DisplayNoType,
    DisplayTypeRepeated,
    DisplayUnsupported,
    DisplayNested,
    // paragraphs and text
    ParagraphSkipped,
    ParagraphMoved,
    FilledTab,
    NoSpaceSkipped,
    // inline macros
    FontMissing,
    FontUnknown,
    AttBad,
    StandardBad,
    BooleanBad,
    VtChild,
    ReferenceBad,
}

impl DiagnosticCode {
    /// Severity used unless the emitter chooses another one.
    pub fn severity(self) -> DiagnosticSeverity {
        use DiagnosticCode::*;
        match self {
            NoPrologue | ContentBeforeSection | ParentMismatch | ListNoType | ColumnSyntax
            | CellCount | DisplayNoType | DisplayUnsupported | ListContentMoved
            | StandardBad => DiagnosticSeverity::Error,
            _ => DiagnosticSeverity::Warning,
        }
    }

    pub fn message(self) -> &'static str {
        use DiagnosticCode::*;
        match self {
            NoPrologue => "no document prologue",
            PrologueOrder => "prologue macros out of order",
            PrologueRepeated => "duplicate prologue macro",
            DateMissing => "missing date, using today's date",
            DateBad => "cannot parse date, using it verbatim",
            TitleCase => "lower case character in document title",
            ManualSectionBad => "unknown manual section",
            ArchBad => "unknown manual volume or arch",
            DocumentEmpty => "no document body",
            ContentBeforeSection => "content before first section header",
            NameSectionFirst => "NAME section must come first",
            NameSectionBad => "bad NAME section contents",
            SectionRepeated => "duplicate section title",
            SectionOrder => "sections out of conventional order",
            SectionManual => "unexpected section",
            ArgCount => "unexpected number of children",
            ParentMismatch => "macro in wrong parent",
            MacroEmpty => "skipping empty macro",
            ObsoleteMacro => "skipping obsolete macro",
            ArgEmpty => "empty argument",
            ArgRepeated => "duplicate argument",
            ArgIgnored => "ignoring argument",
            ArgSkip => "skipping all arguments",
            ArgExcess => "skipping excess arguments",
            MissingStd => "missing -std argument, adding it",
            NoName => "missing name",
            ListNoType => "missing list type, using -item",
            ListTypeRepeated => "duplicate list type",
            ListTypeLate => "list type must come first",
            ListNoWidth => "missing -width in -tag list",
            ListContentMoved => "moving content out of list",
            ItemNoHead => "empty head in list item",
            ItemNoBody => "empty list item",
            ColumnSyntax => "inconsistent column syntax",
            CellCount => "wrong number of cells",
            DisplayNoType => "missing display type, using -ragged",
            DisplayTypeRepeated => "duplicate display type",
            DisplayUnsupported => "unsupported display type",
            DisplayNested => "displays may not be nested",
            ParagraphSkipped => "skipping paragraph macro",
            ParagraphMoved => "moving paragraph macro out of list",
            FilledTab => "tab in filled text",
            NoSpaceSkipped => "skipping no-space macro",
            FontMissing => "missing font type, using \\fR",
            FontUnknown => "unknown font type, using \\fR",
            AttBad => "unknown AT&T UNIX version",
            StandardBad => "unknown standard specifier",
            BooleanBad => "invalid Boolean argument",
            VtChild => "invalid content in Vt block",
            ReferenceBad => "invalid content in Rs block",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Structured diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: DiagnosticSeverity,
    pub position: Position,
    pub context: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, position: Position, context: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            position,
            context: context.into(),
        }
    }

    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.severity, self.code)?;
        if !self.context.is_empty() {
            write!(f, ": {}", self.context)?;
        }
        Ok(())
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_context() {
        let d = Diagnostic::new(
            DiagnosticCode::ParagraphSkipped,
            Position::new(7, 1),
            "Pp before Bl",
        );
        assert_eq!(
            d.to_string(),
            "7:1: warning: skipping paragraph macro: Pp before Bl"
        );
    }

    #[test]
    fn test_display_without_context() {
        let d = Diagnostic::new(DiagnosticCode::NoPrologue, Position::new(1, 0), "");
        assert_eq!(d.to_string(), "1:0: error: no document prologue");
    }

    #[test]
    fn test_severity_override() {
        let d = Diagnostic::new(DiagnosticCode::ArgCount, Position::default(), "want 1 children (have 0)")
            .with_severity(DiagnosticSeverity::Error);
        assert_eq!(d.severity, DiagnosticSeverity::Error);
        assert!(DiagnosticSeverity::Warning < DiagnosticSeverity::Error);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.emit(Diagnostic::new(DiagnosticCode::MacroEmpty, Position::default(), "St"));
        assert_eq!(sink.len(), 1);
    }
}
