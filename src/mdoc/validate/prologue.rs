//! Document prologue (`Dd`, `Dt`, `Os`) and whole-document checks
//!
//! The prologue fills in [`DocumentMeta`](crate::mdoc::meta::DocumentMeta)
//! and is then removed from the tree; renderers read the metadata instead.

use super::Validator;
use crate::mdoc::ast::{Macro, NodeId, Position};
use crate::mdoc::date::{self, NormalizedDate};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSink};
use crate::mdoc::error::{ValidationError, ValidationResult};

impl<S: DiagnosticSink> Validator<S> {
    fn prologue_order(&mut self, id: NodeId, out_of_order: bool, repeated: bool) -> ValidationResult {
        let (pos, label) = {
            let node = &self.tree[id];
            (node.pos, node.label())
        };
        if out_of_order {
            self.emit(DiagnosticCode::PrologueOrder, pos, label.clone());
        }
        if repeated {
            self.emit(DiagnosticCode::PrologueRepeated, pos, label);
        }
        Ok(())
    }

    pub(crate) fn pre_dd(&mut self, id: NodeId) -> ValidationResult {
        let meta = &self.meta;
        let out_of_order = meta.title.is_some() || meta.os.is_some();
        let repeated = meta.date.is_some();
        self.prologue_order(id, out_of_order, repeated)
    }

    pub(crate) fn pre_dt(&mut self, id: NodeId) -> ValidationResult {
        let meta = &self.meta;
        let out_of_order = meta.date.is_none() || meta.os.is_some();
        let repeated = meta.title.is_some();
        self.prologue_order(id, out_of_order, repeated)
    }

    pub(crate) fn pre_os(&mut self, id: NodeId) -> ValidationResult {
        let meta = &self.meta;
        let out_of_order = meta.title.is_none() || meta.date.is_none();
        let repeated = meta.os.is_some();
        self.prologue_order(id, out_of_order, repeated)
    }

    pub(crate) fn post_dd(&mut self, id: NodeId) -> ValidationResult {
        let pos = self.tree[id].pos;
        let first_empty = self
            .tree
            .first_child(id)
            .map_or(true, |c| self.tree.text(c).map_or(true, str::is_empty));
        let raw = if first_empty { None } else { self.tree.deroff(id) };
        self.meta.date_raw = raw.clone();

        if self.meta.quick {
            self.meta.date = Some(raw.unwrap_or_default());
            return Ok(());
        }
        let normalized = date::normalize(raw.as_deref());
        match &normalized {
            NormalizedDate::Parsed(_) => {}
            NormalizedDate::Verbatim(raw) => self.emit(DiagnosticCode::DateBad, pos, raw.clone()),
            NormalizedDate::Today(_) => self.emit(DiagnosticCode::DateMissing, pos, ""),
        }
        self.meta.date = Some(normalized.into_string());
        Ok(())
    }

    pub(crate) fn post_dt(&mut self, id: NodeId) -> ValidationResult {
        self.meta.title = None;
        self.meta.vol = None;
        self.meta.arch = None;

        let words: Vec<(String, Position)> = self
            .tree
            .children(id)
            .map(|c| &self.tree[c])
            .map(|n| (n.string.clone().unwrap_or_default(), n.pos))
            .collect();

        if let Some((title, pos)) = words.first() {
            let lower = title
                .char_indices()
                .find(|(_, c)| c.to_uppercase().next() != Some(*c));
            if let Some((offset, _)) = lower {
                self.emit(DiagnosticCode::TitleCase, pos.shifted(offset), title.clone());
            }
        }

        let Some((title, _)) = words.first() else {
            self.meta.title = Some("UNKNOWN".to_string());
            self.meta.vol = Some("LOCAL".to_string());
            self.meta.msec = Some("1".to_string());
            return Ok(());
        };
        self.meta.title = Some(if title.is_empty() {
            "UNKNOWN".to_string()
        } else {
            title.clone()
        });

        let Some((section, section_pos)) = words.get(1) else {
            self.meta.vol = Some("LOCAL".to_string());
            self.meta.msec = Some("1".to_string());
            return Ok(());
        };
        match self.resolver().manual_section(section).map(str::to_string) {
            Some(volume) => self.meta.vol = Some(volume),
            None => {
                self.emit(DiagnosticCode::ManualSectionBad, *section_pos, section.clone());
                self.meta.vol = Some(section.clone());
            }
        }
        self.meta.msec = Some(section.clone());

        let Some((extra, extra_pos)) = words.get(2) else {
            return Ok(());
        };
        if let Some(volume) = self.resolver().volume(extra).map(str::to_string) {
            self.meta.vol = Some(volume);
        } else if let Some(arch) = self.resolver().arch(extra).map(str::to_string) {
            self.meta.arch = Some(arch);
        } else {
            self.emit(DiagnosticCode::ArchBad, *extra_pos, extra.clone());
            self.meta.vol = Some(extra.clone());
        }
        Ok(())
    }

    /// Operating system: the argument, else the configured default, else the host.
    pub(crate) fn post_os(&mut self, id: NodeId) -> ValidationResult {
        let os = self
            .tree
            .deroff(id)
            .or_else(|| self.options().default_os.clone())
            .unwrap_or_else(|| std::env::consts::OS.to_string());
        self.meta.os = Some(os);
        Ok(())
    }

    /// Prologue macros leave the tree once their metadata is recorded.
    pub(crate) fn post_prol(&mut self, id: NodeId) -> ValidationResult {
        self.tree.delete(id);
        self.meta.update_prologue_complete();
        Ok(())
    }

    pub(crate) fn post_root(&mut self, id: NodeId) -> ValidationResult {
        let pos = self.tree[id].pos;
        let mut result = Ok(());
        if !self.meta.prologue_complete {
            self.emit(DiagnosticCode::NoPrologue, pos, "");
            result = Err(ValidationError::structural(DiagnosticCode::NoPrologue, pos, ""));
        }
        match self.tree.first_child(id) {
            None => self.emit(DiagnosticCode::DocumentEmpty, pos, ""),
            Some(first) => {
                let node = &self.tree[first];
                if node.tok != Some(Macro::Sh) {
                    let (first_pos, label) = (node.pos, node.label());
                    self.emit(DiagnosticCode::ContentBeforeSection, first_pos, label);
                }
            }
        }
        result
    }
}
