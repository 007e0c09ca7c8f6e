//! Paragraph and line break macros (`Pp`, `Lp`, `br`, `sp`)
//!
//! Breaks that have no visible effect are removed: a break right before
//! another paragraph-starting macro, two breaks in a row, a break at the
//! start or the end of a section.

use super::Validator;
use crate::mdoc::ast::{Macro, NodeId, NodeKind};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSink};
use crate::mdoc::error::ValidationResult;

impl<S: DiagnosticSink> Validator<S> {
    /// Drop a break directly before a new paragraph, list or display.
    pub(crate) fn pre_par(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if !matches!(node.kind, NodeKind::Elem | NodeKind::Block) {
            return Ok(());
        }
        let Some(prev) = node.prev() else {
            return Ok(());
        };
        let Some(prev_tok) = self.tree[prev].tok.filter(|t| t.is_break()) else {
            return Ok(());
        };
        let compact = match node.tok {
            Some(Macro::Bl) => node.list().is_some_and(|l| l.compact),
            Some(Macro::Bd) => node.display().is_some_and(|d| d.compact),
            Some(Macro::It) => node
                .parent()
                .and_then(|p| self.tree.block_of(p))
                .and_then(|b| self.tree[b].list())
                .is_some_and(|l| l.compact),
            _ => false,
        };
        if compact {
            return Ok(());
        }
        let context = format!("{} before {}", prev_tok.name(), node.label());
        let pos = self.tree[prev].pos;
        self.emit(DiagnosticCode::ParagraphSkipped, pos, context);
        self.tree.delete(prev);
        Ok(())
    }

    /// Drop a break at the start of a section or after another break.
    pub(crate) fn post_par(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if !matches!(node.kind, NodeKind::Elem | NodeKind::Block) {
            return Ok(());
        }
        let other = match node.prev() {
            None => {
                let parent = node.parent().map(|p| &self.tree[p]);
                match parent.and_then(|p| p.tok) {
                    Some(tok @ (Macro::Sh | Macro::Ss)) => tok,
                    _ => return Ok(()),
                }
            }
            Some(prev) => {
                let prev_tok = self.tree[prev].tok;
                match prev_tok {
                    Some(tok @ (Macro::Pp | Macro::Lp)) => tok,
                    Some(tok @ (Macro::Sp | Macro::Br)) if node.tok == Some(Macro::Br) => tok,
                    _ => return Ok(()),
                }
            }
        };
        let context = format!("{} after {}", node.label(), other.name());
        let pos = node.pos;
        self.emit(DiagnosticCode::ParagraphSkipped, pos, context);
        self.tree.delete(id);
        Ok(())
    }

    /// Section bodies neither start nor end with a paragraph break.
    pub(crate) fn post_ignpar(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if node.kind != NodeKind::Body {
            return Ok(());
        }
        let section = node.label();
        if let Some(first) = self.tree.first_child(id) {
            let child = &self.tree[first];
            if matches!(child.tok, Some(Macro::Pp | Macro::Lp)) {
                let context = format!("{} after {section}", child.label());
                let pos = child.pos;
                self.emit(DiagnosticCode::ParagraphSkipped, pos, context);
                self.tree.delete(first);
            }
        }
        if let Some(last) = self.tree.last_child(id) {
            let child = &self.tree[last];
            if matches!(child.tok, Some(Macro::Pp | Macro::Lp)) {
                let context = format!("{} at the end of {section}", child.label());
                let pos = child.pos;
                self.emit(DiagnosticCode::ParagraphSkipped, pos, context);
                self.tree.delete(last);
            }
        }
        Ok(())
    }
}
