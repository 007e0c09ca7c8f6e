//! Treeviz formatter for mdoc trees
//!
//! One line per node, nesting drawn with box connectors:
//!
//!     <prefix><connector> <icon> <label>
//!
//! Example:
//!
//!     ⧉ root
//!     └─ ▣ Sh
//!       ├─ ⊤ Sh
//!       │ └─ ◦ NAME
//!       └─ ¶ Sh
//!         └─ ƒ Nm
//!           └─ ◦ demo
//!
//! Icons
//!     Root: ⧉
//!     Block: ▣
//!     Head: ⊤
//!     Body: ¶ (end-of-block markers are labelled `(end)`)
//!     Tail: ⊥
//!     Elem: ƒ
//!     Text: ◦
//!     Tbl, Eqn: ○

use super::registry::{FormatError, Formatter};
use crate::mdoc::ast::{Node, NodeId, NodeKind, Tree};
use crate::mdoc::building::Document;

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Root => "⧉",
        NodeKind::Block => "▣",
        NodeKind::Head => "⊤",
        NodeKind::Body => "¶",
        NodeKind::Tail => "⊥",
        NodeKind::Elem => "ƒ",
        NodeKind::Text => "◦",
        NodeKind::Tbl | NodeKind::Eqn => "○",
    }
}

fn label(node: &Node) -> String {
    match node.kind {
        NodeKind::Text => truncate(node.string.as_deref().unwrap_or_default(), LABEL_WIDTH),
        NodeKind::Block | NodeKind::Elem => {
            let mut label = node.label();
            for arg in &node.args {
                label.push_str(&format!(" {}", arg.arg));
                for value in &arg.values {
                    label.push(' ');
                    label.push_str(value);
                }
            }
            label
        }
        NodeKind::Body if node.pending.is_some() => format!("{} (end)", node.label()),
        _ => node.label(),
    }
}

fn format_node(tree: &Tree, id: NodeId, prefix: &str, is_last: bool, show_linum: bool, out: &mut String) {
    let node = &tree[id];
    let connector = if is_last { "└─" } else { "├─" };
    if show_linum {
        out.push_str(&format!("{:02} ", node.pos.line));
    }
    out.push_str(&format!("{}{} {} {}\n", prefix, connector, icon(node.kind), label(node)));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(tree, id, &child_prefix, show_linum, out);
}

fn format_children(tree: &Tree, id: NodeId, prefix: &str, show_linum: bool, out: &mut String) {
    let children: Vec<NodeId> = tree.children(id).collect();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        format_node(tree, child, prefix, i + 1 == count, show_linum, out);
    }
}

fn format_tree(tree: &Tree, show_linum: bool) -> String {
    let root = tree.root();
    let mut out = String::new();
    if show_linum {
        out.push_str("   ");
    }
    out.push_str(&format!("{} {}\n", icon(NodeKind::Root), label(&tree[root])));
    format_children(tree, root, "", show_linum, &mut out);
    out
}

pub fn to_treeviz_str(doc: &Document) -> String {
    format_tree(&doc.tree, false)
}

/// Treeviz with each line prefixed by the node's input line.
pub fn to_treeviz_str_with_linum(doc: &Document) -> String {
    format_tree(&doc.tree, true)
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
