//! Generic structural checks shared by many macros

use super::Validator;
use crate::mdoc::ast::{ArgKind, Macro, NodeId, NodeKind};
use crate::mdoc::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSeverity, DiagnosticSink};
use crate::mdoc::error::{ValidationError, ValidationResult};

/// How a child count is compared against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Gt,
    Eq,
}

impl Comparison {
    pub fn holds(self, have: usize, want: usize) -> bool {
        match self {
            Comparison::Lt => have < want,
            Comparison::Gt => have > want,
            Comparison::Eq => have == want,
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Comparison::Lt => "less than ",
            Comparison::Gt => "more than ",
            Comparison::Eq => "",
        }
    }
}

impl<S: DiagnosticSink> Validator<S> {
    /// Diagnose a child count outside the expected bound. Only applies to
    /// nodes of `kind`; never fails.
    pub(crate) fn check_count(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        severity: DiagnosticSeverity,
        cmp: Comparison,
        val: usize,
    ) {
        let node = &self.tree[id];
        if node.kind != kind {
            return;
        }
        let have = node.child_count();
        if cmp.holds(have, val) {
            return;
        }
        let context = format!("want {}{} children (have {})", cmp.phrase(), val, have);
        let diagnostic =
            Diagnostic::new(DiagnosticCode::ArgCount, node.pos, context).with_severity(severity);
        self.emit_diagnostic(diagnostic);
    }

    /// The parent must be a `kind` node of macro `tok` (`None` expects the root).
    pub(crate) fn check_parent(
        &mut self,
        id: NodeId,
        tok: Option<Macro>,
        kind: NodeKind,
    ) -> ValidationResult {
        let node = &self.tree[id];
        if node.kind != NodeKind::Block {
            return Ok(());
        }
        let pos = node.pos;
        let parent = node
            .parent()
            .ok_or_else(|| ValidationError::invariant(format!("{} block without parent", node.label())))?;
        let parent = &self.tree[parent];
        let tok_matches = tok.is_none() || parent.tok == tok;
        if tok_matches && parent.kind == kind {
            return Ok(());
        }
        let expected = tok.map_or("<root>", Macro::name);
        let context = format!("want parent {expected}");
        self.emit(DiagnosticCode::ParentMismatch, pos, context.clone());
        Err(ValidationError::structural(
            DiagnosticCode::ParentMismatch,
            pos,
            context,
        ))
    }

    /// Tab check on every argument value; `-std` without a value needs a
    /// document name to fall back on.
    pub(crate) fn check_args(&mut self, id: NodeId) {
        let args = self.tree[id].args.clone();
        for arg in &args {
            for value in &arg.values {
                self.check_text(arg.pos, value);
            }
            if arg.arg == ArgKind::Std && arg.values.is_empty() && self.meta.name.is_none() {
                self.emit_at(id, DiagnosticCode::NoName, "");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Comparison::Lt, 1, 2, true)]
    #[case(Comparison::Lt, 2, 2, false)]
    #[case(Comparison::Gt, 1, 0, true)]
    #[case(Comparison::Gt, 0, 0, false)]
    #[case(Comparison::Eq, 1, 1, true)]
    #[case(Comparison::Eq, 2, 1, false)]
    fn test_comparison(
        #[case] cmp: Comparison,
        #[case] have: usize,
        #[case] want: usize,
        #[case] expected: bool,
    ) {
        assert_eq!(cmp.holds(have, want), expected);
    }
}
