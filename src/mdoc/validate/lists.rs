//! List validation (`Bl`, `It`)
//!
//! `Bl` arguments select the list type and its properties. The first type
//! argument wins. Widths given as a macro name are replaced by that macro's
//! conventional width once the list is complete, and `-tag` lists without a
//! width get one inferred from their first item.

use super::{Comparison, Validator};
use crate::mdoc::ast::{ArgKind, Argument, ListType, Macro, NodeId, NodeKind};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSeverity, DiagnosticSink};
use crate::mdoc::error::{ValidationError, ValidationResult};

/// Conventional width, in ens, of a macro used as a `-width` value. Zero
/// means the macro has none.
pub fn macro_width(tok: Macro) -> usize {
    use Macro::*;
    match tok {
        Ad | Ao | An | Aq | Ar | Bo | Bq | Cd | Dq | Dv | Eo | Fa | No | Pf | Po | Pq | Qo | So
        | Sq | Va | Vt => 12,
        Cm | Do | Em | Fl | Ic | Nm | Oo | Tn | Xr => 10,
        Er => 17,
        Ev => 15,
        Fo | Fn | Li | Ql | Sx => 16,
        Ms | Sy => 6,
        Op => 14,
        Pa => 32,
        _ => 0,
    }
}

/// Width used for a `-tag` list without `-width` and without usable items.
const DEFAULT_TAG_WIDTH: usize = 10;

impl<S: DiagnosticSink> Validator<S> {
    /// Owning `Bl` block of a list head or body.
    fn list_block(&self, id: NodeId) -> Result<NodeId, ValidationError> {
        self.tree
            .block_of(id)
            .filter(|b| self.tree[*b].is(NodeKind::Block, Macro::Bl))
            .ok_or_else(|| ValidationError::invariant(format!("Bl part {id} outside a Bl block")))
    }

    pub(crate) fn pre_bl(&mut self, id: NodeId) -> ValidationResult {
        if self.tree[id].kind != NodeKind::Block {
            self.list_block(id)?;
            return Ok(());
        }

        let args = self.tree[id].args.clone();
        let pos = self.tree[id].pos;
        let first_arg = args.first().map(|a| a.arg.name()).unwrap_or_default();
        for arg in &args {
            let list_type = ListType::from_arg(arg.arg);
            match arg.arg {
                ArgKind::Compact => {
                    let list = self.tree[id].list_mut();
                    let repeated = list.compact;
                    list.compact = true;
                    if repeated {
                        self.emit(DiagnosticCode::ArgRepeated, arg.pos, "Bl -compact");
                    }
                }
                ArgKind::Width => match arg.values.first() {
                    None => {
                        self.tree[id].list_mut().width = Some("0n".to_string());
                        self.emit(DiagnosticCode::ArgEmpty, arg.pos, "Bl -width");
                    }
                    Some(value) => {
                        let list = self.tree[id].list_mut();
                        let repeated = list.width.is_some();
                        list.width = Some(value.clone());
                        if repeated {
                            self.emit(DiagnosticCode::ArgRepeated, arg.pos, format!("Bl -width {value}"));
                        }
                    }
                },
                ArgKind::Offset => match arg.values.first() {
                    None => self.emit(DiagnosticCode::ArgEmpty, arg.pos, "Bl -offset"),
                    Some(value) => {
                        let list = self.tree[id].list_mut();
                        let repeated = list.offset.is_some();
                        list.offset = Some(value.clone());
                        if repeated {
                            self.emit(DiagnosticCode::ArgRepeated, arg.pos, format!("Bl -offset {value}"));
                        }
                    }
                },
                _ => {}
            }
            let Some(list_type) = list_type else {
                continue;
            };

            let list = self.tree[id].list_mut();
            if list.list_type.is_some() {
                self.emit(DiagnosticCode::ListTypeRepeated, pos, arg.arg.name());
                continue;
            }
            let late = list.width.is_some() || list.offset.is_some() || list.compact;
            list.list_type = Some(list_type);
            if list_type == ListType::Column {
                list.columns = arg.values.clone();
            }
            if late {
                self.emit(DiagnosticCode::ListTypeLate, pos, first_arg);
            }
        }

        let list = self.tree[id].list_mut();
        let list_type = match list.list_type {
            Some(lt) => lt,
            None => {
                list.list_type = Some(ListType::Item);
                self.emit(DiagnosticCode::ListNoType, pos, "");
                ListType::Item
            }
        };

        let list = self.tree[id].list_mut();
        match list_type {
            ListType::Tag if list.width.is_none() => {
                self.emit(DiagnosticCode::ListNoWidth, pos, "");
            }
            ListType::Column | ListType::Diag | ListType::Ohang | ListType::Inset | ListType::Item
                if list.width.is_some() =>
            {
                self.emit(DiagnosticCode::ArgIgnored, pos, "Bl -width");
            }
            ListType::Bullet | ListType::Dash | ListType::Hyphen if list.width.is_none() => {
                list.width = Some("2n".to_string());
            }
            ListType::Enum if list.width.is_none() => {
                list.width = Some("3n".to_string());
            }
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn post_bl(&mut self, id: NodeId) -> ValidationResult {
        match self.tree[id].kind {
            NodeKind::Block => self.post_bl_block(id),
            NodeKind::Head => self.post_bl_head(id),
            NodeKind::Body => self.post_bl_body(id),
            _ => Ok(()),
        }
    }

    fn post_bl_block(&mut self, id: NodeId) -> ValidationResult {
        let list = self.tree[id].list().cloned().unwrap_or_default();
        if list.list_type == Some(ListType::Tag) && list.width.is_none() {
            self.infer_tag_width(id);
        } else if let Some(width) = &list.width {
            self.resolve_width(id, width);
        }
        self.move_trailing_breaks(id, list.compact || list.list_type == Some(ListType::Column));
        Ok(())
    }

    /// Guess the width of a `-tag` list from its first item's head.
    fn infer_tag_width(&mut self, id: NodeId) {
        let mut width = DEFAULT_TAG_WIDTH;
        let body = self.tree[id].body();
        let first_item = body.and_then(|b| {
            self.tree
                .children(b)
                .find(|c| self.tree[*c].tok == Some(Macro::It))
        });
        let first_word = first_item
            .and_then(|item| self.tree[item].head())
            .and_then(|head| self.tree.first_child(head));
        if let Some(word) = first_word {
            let node = &self.tree[word];
            if node.kind == NodeKind::Text {
                width = node.string.as_deref().map_or(0, str::len) + 1;
            } else if let Some(w) = node.tok.map(macro_width).filter(|w| *w != 0) {
                width = w;
            }
        }
        let value = format!("{width}n");
        let block = &mut self.tree[id];
        let pos = block.pos;
        block
            .args
            .push(Argument::new(ArgKind::Width, pos).with_values([value.clone()]));
        block.list_mut().width = Some(value);
    }

    /// Rewrite a `-width` given as `Ds` or a macro name into ens.
    fn resolve_width(&mut self, id: NodeId, width: &str) {
        let ens = if width == "Ds" {
            6
        } else {
            match Macro::from_name(width).map(macro_width) {
                Some(w) if w != 0 => w,
                _ => return,
            }
        };
        let value = format!("{ens}n");
        let block = &mut self.tree[id];
        if let Some(arg) = block.args.iter_mut().find(|a| a.arg == ArgKind::Width) {
            match arg.values.first_mut() {
                Some(first) => *first = value.clone(),
                None => arg.values.push(value.clone()),
            }
        }
        block.list_mut().width = Some(value);
    }

    /// Trailing `Pp`, `Lp` and `br` inside list items: those of the last
    /// item move behind the list, others are dropped unless the list keeps
    /// them (compact or column lists).
    fn move_trailing_breaks(&mut self, id: NodeId, keep_inner: bool) {
        let Some(body) = self.tree[id].body() else {
            return;
        };
        let items: Vec<NodeId> = self.tree.children(body).collect();
        for item in items {
            let Some(item_body) = self.tree.get(item).and_then(|n| n.body()) else {
                continue;
            };
            let is_last = self.tree.next(item).is_none();
            while let Some(last) = self.tree.last_child(item_body) {
                let node = &self.tree[last];
                let Some(tok) = node.tok.filter(|t| t.is_break()) else {
                    break;
                };
                let pos = node.pos;
                if is_last {
                    self.emit(DiagnosticCode::ParagraphMoved, pos, tok.name());
                    self.tree.move_after(last, id);
                } else if !keep_inner {
                    self.emit(
                        DiagnosticCode::ParagraphSkipped,
                        pos,
                        format!("{} before It", tok.name()),
                    );
                    self.tree.delete(last);
                } else {
                    break;
                }
            }
        }
    }

    fn post_bl_head(&mut self, id: NodeId) -> ValidationResult {
        let block = self.list_block(id)?;
        let list = self.tree[block].list().cloned().unwrap_or_default();
        if list.list_type != Some(ListType::Column) {
            self.check_count(id, NodeKind::Head, DiagnosticSeverity::Warning, Comparison::Eq, 0);
            return Ok(());
        }

        let nchild = self.tree.child_count(id);
        if !list.columns.is_empty() && nchild > 0 {
            let pos = self.tree[id].pos;
            self.emit(DiagnosticCode::ColumnSyntax, pos, "");
            return Err(ValidationError::structural(
                DiagnosticCode::ColumnSyntax,
                pos,
                "Bl -column",
            ));
        }
        if nchild == 0 {
            return Ok(());
        }

        // Old-style column lists give the column widths as head words.
        let children: Vec<NodeId> = self.tree.children(id).collect();
        let columns: Vec<String> = children
            .iter()
            .map(|c| {
                self.tree
                    .text(*c)
                    .map(str::to_string)
                    .or_else(|| self.tree.deroff(*c))
                    .unwrap_or_default()
            })
            .collect();
        for child in children {
            self.tree.delete(child);
        }
        let block_node = &mut self.tree[block];
        let arg = block_node
            .args
            .iter_mut()
            .find(|a| a.arg == ArgKind::Column)
            .ok_or_else(|| ValidationError::invariant("column list without -column argument"))?;
        arg.values = columns.clone();
        block_node.list_mut().columns = columns;
        Ok(())
    }

    /// Move everything that is not an item out in front of the list.
    fn post_bl_body(&mut self, id: NodeId) -> ValidationResult {
        let block = self.list_block(id)?;
        let children: Vec<NodeId> = self.tree.children(id).collect();
        for child in children {
            let node = &self.tree[child];
            if matches!(node.tok, Some(Macro::It | Macro::Sm)) {
                continue;
            }
            let (pos, label) = (node.pos, node.label());
            self.emit(DiagnosticCode::ListContentMoved, pos, label);
            self.tree.move_before(child, block);
        }
        Ok(())
    }

    pub(crate) fn post_it(&mut self, id: NodeId) -> ValidationResult {
        let item = &self.tree[id];
        if item.kind != NodeKind::Block {
            return Ok(());
        }
        let (pos, head, body) = (item.pos, item.head(), item.body());
        let list_block = item
            .parent()
            .and_then(|p| self.tree.block_of(p))
            .filter(|b| self.tree[*b].is(NodeKind::Block, Macro::Bl))
            .ok_or_else(|| ValidationError::invariant("It block outside a Bl body"))?;
        let list = self.tree[list_block].list().cloned().unwrap_or_default();
        let list_type = list
            .list_type
            .ok_or_else(|| ValidationError::invariant("Bl block without list type"))?;
        let type_name = self.tree[list_block]
            .args
            .first()
            .map(|a| a.arg.name())
            .unwrap_or("item");
        let head_first = head.and_then(|h| self.tree.first_child(h));
        let body_first = body.and_then(|b| self.tree.first_child(b));

        match list_type {
            ListType::Tag | ListType::Hang | ListType::Ohang | ListType::Inset | ListType::Diag => {
                if head_first.is_none() {
                    self.emit(DiagnosticCode::ItemNoHead, pos, type_name);
                }
            }
            ListType::Bullet | ListType::Dash | ListType::Enum | ListType::Hyphen | ListType::Item => {
                if list_type != ListType::Item && body_first.is_none() {
                    self.emit(DiagnosticCode::ItemNoBody, pos, type_name);
                }
                if let Some(first) = head_first {
                    let word = self
                        .tree
                        .text(first)
                        .map(str::to_string)
                        .unwrap_or_else(|| self.tree[first].label());
                    self.emit(DiagnosticCode::ArgSkip, pos, format!("It {word}"));
                }
            }
            ListType::Column => {
                if head_first.is_some() {
                    return Err(ValidationError::invariant("column list item with head words"));
                }
                let cols = list.columns.len();
                let cells = self
                    .tree
                    .children(id)
                    .filter(|c| self.tree[*c].kind == NodeKind::Body)
                    .count();
                if cells == cols || cells == cols + 1 {
                    return Ok(());
                }
                let context = format!("columns == {cols} (have {cells})");
                if cells < cols {
                    self.emit(DiagnosticCode::ArgCount, pos, context);
                    return Ok(());
                }
                self.emit(DiagnosticCode::CellCount, pos, context.clone());
                return Err(ValidationError::structural(DiagnosticCode::CellCount, pos, context));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_widths() {
        assert_eq!(macro_width(Macro::Ar), 12);
        assert_eq!(macro_width(Macro::Fl), 10);
        assert_eq!(macro_width(Macro::Er), 17);
        assert_eq!(macro_width(Macro::Pa), 32);
        assert_eq!(macro_width(Macro::Sy), 6);
        assert_eq!(macro_width(Macro::Bl), 0);
    }
}
