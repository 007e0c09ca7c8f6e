//! Fixtures for building small documents in tests
//!
//! Not part of the public API: the helpers that return a ready builder panic
//! when the fixed fixture input fails to build.
//!
//! Every helper starts a new input line before emitting its macro, so the
//! prologue lands on lines 1 to 3 and later macros follow in order.

use super::ast::{ArgKind, Argument, Macro, NodeId, Position};
use super::building::{BuildError, DocumentBuilder};
use super::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};

pub const TITLE: &str = "DEMO";
pub const DATE: &str = "March 1, 2024";
pub const OS: &str = "Linux";
pub const NAME: &str = "demo";

/// Emit `Dd`, `Dt DEMO 1` and `Os Linux`.
pub fn prologue<S: DiagnosticSink>(b: &mut DocumentBuilder<S>) -> Result<(), BuildError> {
    line_elem(b, Macro::Dd, &[DATE])?;
    line_elem(b, Macro::Dt, &[TITLE, "1"])?;
    line_elem(b, Macro::Os, &[OS])?;
    Ok(())
}

/// A builder with the prologue already emitted.
pub fn with_prologue() -> DocumentBuilder {
    let mut b = DocumentBuilder::new();
    if let Err(err) = prologue(&mut b) {
        panic!("prologue failed: {err}");
    }
    b
}

/// A NAME section naming the document `name`, described by `description`.
pub fn name_section<S: DiagnosticSink>(
    b: &mut DocumentBuilder<S>,
    name: &str,
    description: &str,
) -> Result<NodeId, BuildError> {
    let sh = section(b, "NAME")?;
    line_elem(b, Macro::Nm, &[name])?;
    open_block(b, Macro::Nd, Vec::new())?;
    b.words(description.split(' '))?;
    close_block(b)?;
    Ok(sh)
}

/// A builder past the prologue and a well-formed NAME section, ready for
/// the next section. Nothing has been diagnosed at this point.
pub fn described() -> DocumentBuilder {
    let mut b = with_prologue();
    if let Err(err) = name_section(&mut b, NAME, "demo tool") {
        panic!("NAME section failed: {err}");
    }
    b
}

/// Open `Sh title` and leave its body open. Closes any open section first.
pub fn section<S: DiagnosticSink>(b: &mut DocumentBuilder<S>, title: &str) -> Result<NodeId, BuildError> {
    while b.current() != b.tree().root() {
        b.close()?;
    }
    b.next_line();
    let block = b.block(Macro::Sh, Vec::new())?;
    b.head()?;
    b.words(title.split(' '))?;
    b.close()?;
    b.body()?;
    Ok(block)
}

/// One in-line macro with its words on a line of its own.
pub fn line_elem<S: DiagnosticSink>(
    b: &mut DocumentBuilder<S>,
    tok: Macro,
    words: &[&str],
) -> Result<NodeId, BuildError> {
    b.next_line();
    let id = b.elem(tok, Vec::new())?;
    b.words(words.iter().copied())?;
    b.close()?;
    Ok(id)
}

/// A block macro on its own line with an empty head; the body is left open.
pub fn open_block<S: DiagnosticSink>(
    b: &mut DocumentBuilder<S>,
    tok: Macro,
    args: Vec<Argument>,
) -> Result<NodeId, BuildError> {
    b.next_line();
    let block = b.block(tok, args)?;
    b.head()?;
    b.close()?;
    b.body()?;
    Ok(block)
}

/// Close the open body and its block.
pub fn close_block<S: DiagnosticSink>(b: &mut DocumentBuilder<S>) -> Result<(), BuildError> {
    b.close()?;
    b.close()
}

/// An `It` whose head holds `head` and whose body holds `body`.
pub fn item<S: DiagnosticSink>(
    b: &mut DocumentBuilder<S>,
    head: &[&str],
    body: &[&str],
) -> Result<NodeId, BuildError> {
    b.next_line();
    let it = b.block(Macro::It, Vec::new())?;
    b.head()?;
    b.words(head.iter().copied())?;
    b.close()?;
    b.body()?;
    b.words(body.iter().copied())?;
    close_block(b)?;
    Ok(it)
}

pub fn arg(kind: ArgKind) -> Argument {
    Argument::new(kind, Position::default())
}

pub fn arg_with(kind: ArgKind, values: &[&str]) -> Argument {
    arg(kind).with_values(values.iter().copied())
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<DiagnosticCode> {
    diagnostics.iter().map(|d| d.code).collect()
}
