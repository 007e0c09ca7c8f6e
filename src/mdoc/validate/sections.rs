//! Section headers (`Sh`) and the NAME section

use super::Validator;
use crate::mdoc::ast::{Macro, NodeId, NodeKind, Section};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSink};
use crate::mdoc::error::{ValidationError, ValidationResult};

impl<S: DiagnosticSink> Validator<S> {
    pub(crate) fn post_sh(&mut self, id: NodeId) -> ValidationResult {
        match self.tree[id].kind {
            NodeKind::Head => self.post_sh_head(id),
            NodeKind::Body => self.post_sh_body(id),
            _ => Ok(()),
        }
    }

    fn post_sh_head(&mut self, id: NodeId) -> ValidationResult {
        let title = self.tree.deroff(id);
        let sec = title.as_deref().map_or(Section::Custom, Section::classify);
        let title = title.unwrap_or_default();
        let pos = self.tree[id].pos;

        if sec != Section::Name && self.meta.last_named == Section::None {
            self.emit(DiagnosticCode::NameSectionFirst, pos, title.clone());
        }

        let synopsis = sec == Section::Synopsis;
        self.meta.set_register("nS", i32::from(synopsis));
        self.meta.in_synopsis = synopsis;
        self.meta.last_section = sec;

        // Block and head were created before the title was known.
        let stamped: Vec<NodeId> = self
            .tree
            .parent(id)
            .into_iter()
            .chain(std::iter::once(id))
            .chain(self.tree.children(id))
            .collect();
        for node in stamped {
            self.tree[node].sec = sec;
        }

        if sec == Section::Custom {
            return Ok(());
        }

        if sec == self.meta.last_named {
            self.emit(DiagnosticCode::SectionRepeated, pos, title.clone());
        }
        if sec < self.meta.last_named {
            self.emit(DiagnosticCode::SectionOrder, pos, title.clone());
        }
        self.meta.last_named = sec;

        // ERRORS falls through to RETURN VALUES/LIBRARY, which falls
        // through to CONTEXT; the first acceptable set named wins.
        let mut allowed: Option<&str> = None;
        let mut stage = match sec {
            Section::Errors => 0,
            Section::ReturnValues | Section::Library => 1,
            Section::Context => 2,
            _ => return Ok(()),
        };
        let msec = self
            .meta
            .msec_class()
            .ok_or_else(|| ValidationError::invariant("section header before the manual section is known"))?;
        if stage == 0 {
            if msec == '4' {
                return Ok(());
            }
            allowed = Some("2, 3, 4, 9");
            stage = 1;
        }
        if stage == 1 {
            if msec == '2' || msec == '3' {
                return Ok(());
            }
            allowed.get_or_insert("2, 3, 9");
        }
        if msec == '9' {
            return Ok(());
        }
        let allowed = allowed.unwrap_or("9");
        self.emit(
            DiagnosticCode::SectionManual,
            pos,
            format!("{title} for {allowed} only"),
        );
        Ok(())
    }

    /// The NAME section holds `Nm` names and ends with a single `Nd`.
    fn post_sh_body(&mut self, id: NodeId) -> ValidationResult {
        if self.meta.last_section != Section::Name {
            return Ok(());
        }
        let children: Vec<NodeId> = self.tree.children(id).collect();
        let Some((last, rest)) = children.split_last() else {
            let pos = self.tree[id].pos;
            self.emit(DiagnosticCode::NameSectionBad, pos, "empty");
            return Ok(());
        };
        for child in rest {
            let node = &self.tree[*child];
            if node.is(NodeKind::Elem, Macro::Nm) || node.kind == NodeKind::Text {
                continue;
            }
            let (pos, label) = (node.pos, node.label());
            self.emit(DiagnosticCode::NameSectionBad, pos, label);
        }
        let node = &self.tree[*last];
        if !node.is(NodeKind::Block, Macro::Nd) {
            let (pos, label) = (node.pos, node.label());
            self.emit(DiagnosticCode::NameSectionBad, pos, label);
        }
        Ok(())
    }
}
