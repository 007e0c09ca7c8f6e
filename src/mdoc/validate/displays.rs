//! Display blocks (`Bd`, `D1`, `Dl`) and literal mode

use super::Validator;
use crate::mdoc::ast::{ArgKind, DisplayType, Macro, NodeId, NodeKind};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSink};
use crate::mdoc::error::{ValidationError, ValidationResult};

impl<S: DiagnosticSink> Validator<S> {
    /// Displays inside a `Bd` are diagnosed but kept.
    pub(crate) fn pre_display(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if node.kind != NodeKind::Block {
            return Ok(());
        }
        let (pos, label) = (node.pos, node.label());
        let mut ancestor = node.parent();
        while let Some(a) = ancestor {
            if self.tree[a].is(NodeKind::Block, Macro::Bd) {
                self.emit(DiagnosticCode::DisplayNested, pos, format!("{label} in Bd"));
                break;
            }
            ancestor = self.tree.parent(a);
        }
        Ok(())
    }

    pub(crate) fn pre_bd(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if node.kind != NodeKind::Block {
            let owner = self.tree.block_of(id);
            if !owner.is_some_and(|b| self.tree[b].is(NodeKind::Block, Macro::Bd)) {
                return Err(ValidationError::invariant(format!(
                    "Bd part {id} outside a Bd block"
                )));
            }
            return Ok(());
        }
        let pos = node.pos;
        let args = node.args.clone();

        for arg in &args {
            if let Some(display_type) = DisplayType::from_arg(arg.arg) {
                let display = self.tree[id].display_mut();
                if display.display_type.is_none() {
                    display.display_type = Some(display_type);
                } else {
                    self.emit(DiagnosticCode::DisplayTypeRepeated, pos, arg.arg.name());
                }
                continue;
            }
            match arg.arg {
                ArgKind::File => {
                    self.emit(DiagnosticCode::DisplayUnsupported, pos, "Bd -file");
                    return Err(ValidationError::structural(
                        DiagnosticCode::DisplayUnsupported,
                        pos,
                        "Bd -file",
                    ));
                }
                ArgKind::Offset => match arg.values.first() {
                    None => self.emit(DiagnosticCode::ArgEmpty, arg.pos, "Bd -offset"),
                    Some(value) => {
                        let display = self.tree[id].display_mut();
                        let repeated = display.offset.is_some();
                        display.offset = Some(value.clone());
                        if repeated {
                            self.emit(DiagnosticCode::ArgRepeated, arg.pos, format!("Bd -offset {value}"));
                        }
                    }
                },
                ArgKind::Compact => {
                    let display = self.tree[id].display_mut();
                    let repeated = display.compact;
                    display.compact = true;
                    if repeated {
                        self.emit(DiagnosticCode::ArgRepeated, arg.pos, "Bd -compact");
                    }
                }
                other => {
                    return Err(ValidationError::invariant(format!(
                        "unexpected Bd argument {other}"
                    )))
                }
            }
        }

        let display = self.tree[id].display_mut();
        if display.display_type.is_none() {
            display.display_type = Some(DisplayType::Ragged);
            self.emit(DiagnosticCode::DisplayNoType, pos, "");
        }
        Ok(())
    }

    /// Entering the body of `Dl` or of a literal/unfilled `Bd` turns on
    /// literal mode.
    pub(crate) fn pre_literal(&mut self, id: NodeId) -> ValidationResult {
        let node = &self.tree[id];
        if node.kind != NodeKind::Body || node.pending.is_some() {
            return Ok(());
        }
        match node.tok {
            Some(Macro::Dl) => self.meta.literal = true,
            Some(Macro::Bd) => {
                let display_type = self
                    .tree
                    .block_of(id)
                    .and_then(|b| self.tree[b].display())
                    .and_then(|d| d.display_type);
                if matches!(display_type, Some(DisplayType::Literal | DisplayType::Unfilled)) {
                    self.meta.literal = true;
                }
            }
            _ => {
                return Err(ValidationError::invariant(format!(
                    "literal mode for {}",
                    node.label()
                )))
            }
        }
        Ok(())
    }

    /// Leaving a display body ends literal mode; displays don't nest.
    pub(crate) fn post_literal(&mut self, id: NodeId) -> ValidationResult {
        if self.tree[id].kind == NodeKind::Body {
            self.meta.literal = false;
        }
        Ok(())
    }
}
