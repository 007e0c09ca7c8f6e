//! JSON description of an unvalidated document
//!
//! The input is what a parser would hand over: macros with their split
//! arguments and words, nested the way the macros nest. [`replay`] feeds it
//! through a [`DocumentBuilder`] so validation runs in parser order.
//!
//! ```json
//! { "nodes": [
//!     { "type": "elem", "macro": "Dd", "line": 1, "children": [ { "type": "text", "text": "March 1, 2024" } ] },
//!     { "type": "block", "macro": "Bl", "args": [ { "arg": "bullet" } ],
//!       "body": [ { "type": "block", "macro": "It", "body": [ { "type": "text", "text": "one" } ] } ] }
//! ] }
//! ```
//!
//! Blocks, and elements placed directly in a body or at the top level, start
//! a new input line unless `line` gives one explicitly. Everything else
//! continues the current line.

use crate::mdoc::ast::{Argument, Macro};
use crate::mdoc::building::{BuildError, DocumentBuilder};
use crate::mdoc::diagnostics::DiagnosticSink;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceDocument {
    pub nodes: Vec<SourceNode>,
}

impl SourceDocument {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceNode {
    Text {
        text: String,
        #[serde(default)]
        line: Option<usize>,
    },
    Elem {
        #[serde(rename = "macro")]
        tok: Macro,
        #[serde(default)]
        args: Vec<Argument>,
        #[serde(default)]
        children: Vec<SourceNode>,
        #[serde(default)]
        line: Option<usize>,
    },
    Block {
        #[serde(rename = "macro")]
        tok: Macro,
        #[serde(default)]
        args: Vec<Argument>,
        #[serde(default)]
        head: Vec<SourceNode>,
        #[serde(default)]
        body: Vec<SourceNode>,
        /// Column list cells; each becomes its own body.
        #[serde(default)]
        cells: Vec<Vec<SourceNode>>,
        #[serde(default)]
        line: Option<usize>,
    },
}

/// Feed `nodes` into `builder` at its current position.
pub fn replay<S: DiagnosticSink>(builder: &mut DocumentBuilder<S>, nodes: &[SourceNode]) -> Result<(), BuildError> {
    replay_nodes(builder, nodes, true)
}

fn replay_nodes<S: DiagnosticSink>(
    builder: &mut DocumentBuilder<S>,
    nodes: &[SourceNode],
    line_level: bool,
) -> Result<(), BuildError> {
    for node in nodes {
        replay_node(builder, node, line_level)?;
    }
    Ok(())
}

fn start_line<S: DiagnosticSink>(builder: &mut DocumentBuilder<S>, line: Option<usize>, new_line: bool) {
    match line {
        Some(line) => {
            builder.at_line(line);
        }
        None if new_line => {
            builder.next_line();
        }
        None => {}
    }
}

fn replay_node<S: DiagnosticSink>(
    builder: &mut DocumentBuilder<S>,
    node: &SourceNode,
    line_level: bool,
) -> Result<(), BuildError> {
    match node {
        SourceNode::Text { text, line } => {
            start_line(builder, *line, false);
            builder.text(text.as_str())?;
        }
        SourceNode::Elem {
            tok,
            args,
            children,
            line,
        } => {
            start_line(builder, *line, line_level);
            builder.elem(*tok, args.clone())?;
            replay_nodes(builder, children, false)?;
            builder.close()?;
        }
        SourceNode::Block {
            tok,
            args,
            head,
            body,
            cells,
            line,
        } => {
            start_line(builder, *line, true);
            builder.block(*tok, args.clone())?;
            builder.head()?;
            replay_nodes(builder, head, false)?;
            builder.close()?;
            if cells.is_empty() {
                builder.body()?;
                replay_nodes(builder, body, true)?;
                builder.close()?;
            } else {
                for cell in cells {
                    builder.body()?;
                    replay_nodes(builder, cell, false)?;
                    builder.close()?;
                }
            }
            builder.close()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdoc::ast::{ArgKind, NodeKind};

    #[test]
    fn test_parses_nested_document() {
        let doc = SourceDocument::from_json(
            r#"{ "nodes": [
                { "type": "block", "macro": "Bl", "args": [ { "arg": "width", "values": ["Ds"] } ],
                  "body": [ { "type": "text", "text": "x", "line": 4 } ] }
            ] }"#,
        )
        .unwrap();
        let SourceNode::Block { tok, args, body, .. } = &doc.nodes[0] else {
            panic!("expected a block");
        };
        assert_eq!(*tok, Macro::Bl);
        assert_eq!(args[0].arg, ArgKind::Width);
        assert_eq!(args[0].values, vec!["Ds"]);
        assert_eq!(
            body[0],
            SourceNode::Text {
                text: "x".to_string(),
                line: Some(4)
            }
        );
    }

    #[test]
    fn test_rejects_unknown_macro() {
        let err = SourceDocument::from_json(r#"{ "nodes": [ { "type": "elem", "macro": "Zz" } ] }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_replay_builds_lines_in_order() {
        let doc = SourceDocument::from_json(
            r#"{ "nodes": [
                { "type": "elem", "macro": "Dd", "children": [ { "type": "text", "text": "March 1, 2024" } ] },
                { "type": "elem", "macro": "Dt", "children": [ { "type": "text", "text": "DEMO" }, { "type": "text", "text": "1" } ] },
                { "type": "elem", "macro": "Os" },
                { "type": "block", "macro": "Sh", "head": [ { "type": "text", "text": "DESCRIPTION" } ],
                  "body": [ { "type": "elem", "macro": "Fl", "children": [ { "type": "text", "text": "v" } ] } ] }
            ] }"#,
        )
        .unwrap();
        let mut builder = DocumentBuilder::new();
        replay(&mut builder, &doc.nodes).unwrap();
        let (document, _) = builder.finish().unwrap();
        assert_eq!(document.meta.title.as_deref(), Some("DEMO"));
        let sh = document.tree.first_child(document.root()).unwrap();
        assert_eq!(document.tree[sh].kind, NodeKind::Block);
        assert_eq!(document.tree[sh].pos.line, 4);
        let body = document.tree[sh].body().unwrap();
        let fl = document.tree.first_child(body).unwrap();
        assert_eq!(document.tree[fl].pos.line, 5);
        assert!(document.tree[fl].flags.line);
    }
}
