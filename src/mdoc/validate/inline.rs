//! Rules for individual in-line macros

use super::{Comparison, Validator};
use crate::mdoc::ast::{ArgKind, AuthorMode, Font, Macro, Norm, NodeId, NodeKind, Position};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSeverity, DiagnosticSink};
use crate::mdoc::error::{ValidationError, ValidationResult};

impl<S: DiagnosticSink> Validator<S> {
    /// First word of `id` as a text node: (node, word, position).
    fn first_word(&self, id: NodeId) -> Option<(NodeId, String, Position)> {
        let child = self.tree.first_child(id)?;
        let node = &self.tree[child];
        Some((child, node.string.clone()?, node.pos))
    }

    fn first_word_required(&self, id: NodeId) -> Result<Option<(NodeId, String, Position)>, ValidationError> {
        match self.tree.first_child(id) {
            None => Ok(None),
            Some(child) if self.tree[child].kind == NodeKind::Text => Ok(self.first_word(id)),
            Some(_) => Err(ValidationError::invariant(format!(
                "{} expects a word as first child",
                self.tree[id].label()
            ))),
        }
    }

    pub(crate) fn pre_an(&mut self, id: NodeId) -> ValidationResult {
        let args = self.tree[id].args.clone();
        let Some(first) = args.first() else {
            return Ok(());
        };
        for extra in &args[1..] {
            self.emit(DiagnosticCode::ArgIgnored, extra.pos, format!("An {}", extra.arg));
        }
        let mode = match first.arg {
            ArgKind::Split => AuthorMode::Split,
            ArgKind::Nosplit => AuthorMode::NoSplit,
            other => {
                return Err(ValidationError::invariant(format!(
                    "unexpected An argument {other}"
                )))
            }
        };
        self.tree[id].author_mut().mode = Some(mode);
        Ok(())
    }

    pub(crate) fn post_an(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        let has_mode = node.author().is_some_and(|a| a.mode.is_some());
        let has_children = node.child_count() > 0;
        if !has_mode && !has_children {
            self.check_count(id, NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Gt, 0);
        } else if has_mode && has_children {
            self.check_count(id, NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Eq, 0);
        }
        Ok(())
    }

    /// `At v7` becomes the expanded version name.
    pub(crate) fn post_at(&mut self, id: NodeId) -> ValidationResult {
        let Some((word_id, word, pos)) = self.first_word_required(id)? else {
            return Ok(());
        };
        let expanded = match self.resolver().att(&word) {
            Some(att) => att.to_string(),
            None => {
                self.emit(DiagnosticCode::AttBad, pos, word.clone());
                format!("AT&T UNIX {word}")
            }
        };
        self.tree[word_id].string = Some(expanded);
        Ok(())
    }

    /// The font of a `Bf` block, from its argument or its first head word.
    pub(crate) fn post_bf(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        let block = self
            .tree
            .block_of(id)
            .filter(|b| self.tree[*b].is(NodeKind::Block, Macro::Bf))
            .ok_or_else(|| ValidationError::invariant(format!("Bf part {id} outside a Bf block")))?;
        if node.kind != NodeKind::Head {
            if self.tree[block].head().is_none() {
                return Err(ValidationError::invariant("Bf block without head"));
            }
            return Ok(());
        }
        let pos = node.pos;
        let arg = self.tree[block].args.first().map(|a| a.arg);

        let mut excess = self.tree.first_child(id);
        if arg.is_none() {
            let Some(first) = excess else {
                self.emit(DiagnosticCode::FontMissing, pos, "");
                return Ok(());
            };
            excess = self.tree.next(first);
        }
        if let Some(extra) = excess {
            let extra = &self.tree[extra];
            let context = format!("Bf ... {}", extra.string.clone().unwrap_or_else(|| extra.label()));
            let extra_pos = extra.pos;
            self.emit(DiagnosticCode::ArgExcess, extra_pos, context);
        }

        let font = match arg {
            Some(ArgKind::Emphasis) => Some(Font::Emphasis),
            Some(ArgKind::Literal) => Some(Font::Literal),
            Some(ArgKind::Symbolic) => Some(Font::Symbolic),
            Some(other) => {
                return Err(ValidationError::invariant(format!(
                    "unexpected Bf argument {other}"
                )))
            }
            None => {
                let (_, word, word_pos) = self.first_word(id).unwrap_or((id, String::new(), pos));
                match word.as_str() {
                    "Em" => Some(Font::Emphasis),
                    "Li" => Some(Font::Literal),
                    "Sy" => Some(Font::Symbolic),
                    _ => {
                        self.emit(DiagnosticCode::FontUnknown, word_pos, format!("Bf {word}"));
                        None
                    }
                }
            }
        };
        if let Some(font) = font {
            self.tree[block].font_mut().font = Some(font);
        }
        Ok(())
    }

    /// Capitalize the second word of `Bx`.
    pub(crate) fn post_bx(&mut self, id: NodeId) -> ValidationResult {
        let second = self.tree.first_child(id).and_then(|c| self.tree.next(c));
        let Some(second) = second else {
            return Ok(());
        };
        if let Some(word) = self.tree[second].string.as_mut() {
            if let Some(first) = word.get(..1) {
                let upper = first.to_ascii_uppercase();
                word.replace_range(..1, &upper);
            }
        }
        Ok(())
    }

    /// `Db` and `Sm` take `on` or `off`; a bare `Sm` toggles spacing.
    pub(crate) fn post_bool(&mut self, id: NodeId) -> ValidationResult {
        let is_sm = self.tree[id].tok == Some(Macro::Sm);
        let Some(child) = self.tree.first_child(id) else {
            if is_sm {
                self.meta.spacing_suppressed = !self.meta.spacing_suppressed;
            }
            return Ok(());
        };
        self.check_count(id, NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Lt, 2);

        let node = &self.tree[child];
        if node.kind != NodeKind::Text {
            return Err(ValidationError::invariant("boolean macro with a non-text argument"));
        }
        let word = node.string.clone().unwrap_or_default();
        match word.as_str() {
            "on" => {
                if is_sm {
                    self.meta.spacing_suppressed = false;
                }
            }
            "off" => {
                if is_sm {
                    self.meta.spacing_suppressed = true;
                }
            }
            _ => {
                let pos = node.pos;
                let context = format!("{} {word}", self.tree[id].label());
                self.emit(DiagnosticCode::BooleanBad, pos, context);
                self.tree.move_after(child, id);
            }
        }
        Ok(())
    }

    pub(crate) fn post_es(&mut self, id: NodeId) -> ValidationResult {
        self.meta.last_es = Some(id);
        Ok(())
    }

    pub(crate) fn post_en(&mut self, id: NodeId) -> ValidationResult {
        if self.tree[id].kind == NodeKind::Block {
            let es = self.meta.last_es;
            self.tree[id].norm = Norm::Enclosure { es };
        }
        Ok(())
    }

    /// `Ex` and `Rv` take exactly one `-std` argument.
    pub(crate) fn pre_std(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if node.args.len() == 1 && node.args[0].arg == ArgKind::Std {
            return Ok(());
        }
        let (pos, label) = (node.pos, node.label());
        self.emit(DiagnosticCode::MissingStd, pos, label);
        Ok(())
    }

    /// A childless `Ex` or `Rv` names the document.
    pub(crate) fn post_std(&mut self, id: NodeId) -> ValidationResult {
        if self.tree.first_child(id).is_some() {
            return Ok(());
        }
        let Some(name) = self.meta.name.clone() else {
            return Ok(());
        };
        let pos = self.tree[id].pos;
        self.tree.append_text(id, name, pos);
        Ok(())
    }

    /// `Lb libc` becomes the library's full name.
    pub(crate) fn post_lb(&mut self, id: NodeId) -> ValidationResult {
        self.check_count(id, NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Eq, 1);
        let Some((word_id, word, _)) = self.first_word_required(id)? else {
            return Ok(());
        };
        let expanded = match self.resolver().library(&word) {
            Some(lib) => lib.to_string(),
            None => format!("library \\(lq{word}\\(rq"),
        };
        self.tree[word_id].string = Some(expanded);
        Ok(())
    }

    /// The first `Nm` names the document.
    pub(crate) fn post_nm(&mut self, id: NodeId) -> ValidationResult {
        if self.meta.name.is_some() {
            return Ok(());
        }
        let name = match self.tree.deroff(id) {
            Some(name) => name,
            None => {
                self.emit_at(id, DiagnosticCode::NoName, "");
                "UNKNOWN".to_string()
            }
        };
        self.meta.name = Some(name);
        Ok(())
    }

    pub(crate) fn post_ns(&mut self, id: NodeId) -> ValidationResult {
        if self.tree[id].flags.line {
            self.emit_at(id, DiagnosticCode::NoSpaceSkipped, "");
        }
        Ok(())
    }

    pub(crate) fn pre_obsolete(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if matches!(node.kind, NodeKind::Elem | NodeKind::Block) {
            let (pos, label) = (node.pos, node.label());
            self.emit(DiagnosticCode::ObsoleteMacro, pos, label);
        }
        Ok(())
    }

    /// `St -p1003.1` becomes the standard's full name; unusable `St` goes away.
    pub(crate) fn post_st(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        let (pos, label) = (node.pos, node.label());
        let Some((word_id, word, word_pos)) = self.first_word_required(id)? else {
            self.emit(DiagnosticCode::MacroEmpty, pos, label);
            self.tree.delete(id);
            return Ok(());
        };
        match self.resolver().standard(&word).map(str::to_string) {
            Some(standard) => self.tree[word_id].string = Some(standard),
            None => {
                self.emit(DiagnosticCode::StandardBad, word_pos, word);
                self.tree.delete(id);
            }
        }
        Ok(())
    }

    /// A `Vt` block body holds words only.
    pub(crate) fn post_vt(&mut self, id: NodeId) -> ValidationResult {
        if self.tree[id].kind != NodeKind::Body {
            return Ok(());
        }
        let stray: Vec<(Position, String)> = self
            .tree
            .children(id)
            .map(|c| &self.tree[c])
            .filter(|n| n.kind != NodeKind::Text)
            .map(|n| (n.pos, n.label()))
            .collect();
        for (pos, label) in stray {
            self.emit(DiagnosticCode::VtChild, pos, label);
        }
        Ok(())
    }

    /// `Bt` and `Ud` take no arguments.
    pub(crate) fn post_eoln(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        let Some(child) = node.first_child() else {
            return Ok(());
        };
        let word = self.tree[child]
            .string
            .clone()
            .unwrap_or_else(|| self.tree[child].label());
        let context = format!("{} {word}", node.label());
        let pos = node.pos;
        self.emit(DiagnosticCode::ArgSkip, pos, context);
        Ok(())
    }
}
