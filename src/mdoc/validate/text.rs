//! Word-level normalization: tabs, breakable hyphens, default arguments

use super::Validator;
use crate::mdoc::ast::{Macro, NodeId, NodeKind, Position, ASCII_HYPH};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSink};
use crate::mdoc::error::{ValidationError, ValidationResult};

/// Replace every `-` that has an ASCII letter on both sides with
/// [`ASCII_HYPH`]. Returns `None` when nothing changed.
pub fn substitute_hyphens(word: &str) -> Option<String> {
    let bytes = word.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    let mut out = bytes.to_vec();
    let mut changed = false;
    for i in 1..bytes.len() - 1 {
        if bytes[i] == b'-' && bytes[i - 1].is_ascii_alphabetic() && bytes[i + 1].is_ascii_alphabetic() {
            out[i] = ASCII_HYPH as u8;
            changed = true;
        }
    }
    if !changed {
        return None;
    }
    // Only ASCII bytes were swapped for another ASCII byte.
    String::from_utf8(out).ok()
}

impl<S: DiagnosticSink> Validator<S> {
    /// Diagnose tabs outside literal mode, each at its own column.
    pub(crate) fn check_text(&mut self, pos: Position, word: &str) {
        if self.meta.literal {
            return;
        }
        let tabs: Vec<usize> = word
            .char_indices()
            .filter(|(_, c)| *c == '\t')
            .map(|(i, _)| i)
            .collect();
        for offset in tabs {
            self.emit(DiagnosticCode::FilledTab, pos.shifted(offset), "");
        }
    }

    pub(crate) fn post_hyph(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        let applies = match node.kind {
            NodeKind::Head => matches!(node.tok, Some(Macro::Sh | Macro::Ss)),
            NodeKind::Body => matches!(node.tok, Some(Macro::D1 | Macro::Nd)),
            NodeKind::Elem => true,
            _ => false,
        };
        if !applies {
            return Ok(());
        }
        let words: Vec<NodeId> = self
            .tree
            .children(id)
            .filter(|c| self.tree[*c].kind == NodeKind::Text)
            .collect();
        for word in words {
            let replaced = self.tree.text(word).and_then(substitute_hyphens);
            if let Some(replaced) = replaced {
                self.tree[word].string = Some(replaced);
            }
        }
        Ok(())
    }

    /// Fill in the conventional default words of a childless macro.
    pub(crate) fn post_defaults(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if node.first_child().is_some() {
            return Ok(());
        }
        let pos = node.pos;
        let words: &[&str] = match node.tok {
            Some(Macro::Ar) => &["file", "..."],
            Some(Macro::At) => &["AT&T", "UNIX"],
            Some(Macro::Li) => &[""],
            Some(Macro::Pa | Macro::Mt) => &["~"],
            _ => {
                return Err(ValidationError::invariant(format!(
                    "no default arguments for {}",
                    node.label()
                )))
            }
        };
        for word in words {
            self.tree.append_text(id, *word, pos);
        }
        Ok(())
    }
}
