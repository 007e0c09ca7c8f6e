//! JSON serialization of a validated document
//!
//! The tree is written as nested objects, one per node, next to the
//! document metadata. Deleted nodes never appear since only linked nodes are
//! reachable from the root.

use super::registry::{FormatError, Formatter};
use crate::mdoc::ast::{Argument, Macro, NodeFlags, NodeId, NodeKind, Norm, Position, Section, Tree};
use crate::mdoc::building::Document;
use crate::mdoc::meta::DocumentMeta;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NodeView<'a> {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(rename = "macro", skip_serializing_if = "Option::is_none")]
    pub tok: Option<Macro>,
    pub pos: Position,
    pub sec: Section,
    pub flags: NodeFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "no_args")]
    pub args: &'a [Argument],
    #[serde(skip_serializing_if = "is_empty_norm")]
    pub norm: &'a Norm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<NodeId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView<'a>>,
}

fn no_args(args: &&[Argument]) -> bool {
    args.is_empty()
}

fn is_empty_norm(norm: &&Norm) -> bool {
    matches!(norm, Norm::None)
}

#[derive(Debug, Serialize)]
pub struct DocumentView<'a> {
    pub meta: &'a DocumentMeta,
    pub root: NodeView<'a>,
}

impl<'a> NodeView<'a> {
    pub fn new(tree: &'a Tree, id: NodeId) -> Self {
        let node = &tree[id];
        Self {
            id,
            kind: node.kind,
            tok: node.tok,
            pos: node.pos,
            sec: node.sec,
            flags: node.flags,
            text: node.string.as_deref(),
            args: &node.args,
            norm: &node.norm,
            pending: node.pending,
            children: tree.children(id).map(|c| NodeView::new(tree, c)).collect(),
        }
    }
}

impl<'a> DocumentView<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            meta: &doc.meta,
            root: NodeView::new(&doc.tree, doc.tree.root()),
        }
    }
}

pub fn to_json_string(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DocumentView::new(doc))
}

pub fn to_json_value(doc: &Document) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(DocumentView::new(doc))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_json_string(doc)?)
    }

    fn description(&self) -> &str {
        "Normalized tree and document metadata as JSON"
    }
}
