//! Nodes and their normalized data

use super::macros::{ArgKind, Macro};
use super::range::Position;
use super::section::Section;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a node in a [`Tree`](super::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Text,
    Elem,
    Block,
    Head,
    Body,
    /// Block end marker, e.g. the `Ec` closing an `Eo`.
    Tail,
    Tbl,
    Eqn,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Root => "root",
            NodeKind::Text => "text",
            NodeKind::Elem => "elem",
            NodeKind::Block => "block",
            NodeKind::Head => "head",
            NodeKind::Body => "body",
            NodeKind::Tail => "tail",
            NodeKind::Tbl => "tbl",
            NodeKind::Eqn => "eqn",
        };
        f.write_str(name)
    }
}

/// Mode flags copied from the document state when the node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NodeFlags {
    /// Post validation already ran.
    pub validated: bool,
    /// The macro starts an input line.
    pub line: bool,
    pub literal: bool,
    pub spacing_off: bool,
    pub synopsis: bool,
}

/// One argument of a macro, e.g. `-width Ds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub arg: ArgKind,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub pos: Position,
}

impl Argument {
    pub fn new(arg: ArgKind, pos: Position) -> Self {
        Self {
            arg,
            values: Vec::new(),
            pos,
        }
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Bullet,
    Column,
    Dash,
    Diag,
    Enum,
    Hang,
    Hyphen,
    Inset,
    Item,
    Ohang,
    Tag,
}

impl ListType {
    pub fn from_arg(arg: ArgKind) -> Option<ListType> {
        let lt = match arg {
            ArgKind::Bullet => ListType::Bullet,
            ArgKind::Dash => ListType::Dash,
            ArgKind::Enum => ListType::Enum,
            ArgKind::Hyphen => ListType::Hyphen,
            ArgKind::Item => ListType::Item,
            ArgKind::Tag => ListType::Tag,
            ArgKind::Diag => ListType::Diag,
            ArgKind::Hang => ListType::Hang,
            ArgKind::Ohang => ListType::Ohang,
            ArgKind::Inset => ListType::Inset,
            ArgKind::Column => ListType::Column,
            _ => return None,
        };
        Some(lt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListNorm {
    pub list_type: Option<ListType>,
    pub width: Option<String>,
    pub offset: Option<String>,
    pub compact: bool,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Centered,
    Ragged,
    Unfilled,
    Filled,
    Literal,
}

impl DisplayType {
    pub fn from_arg(arg: ArgKind) -> Option<DisplayType> {
        let dt = match arg {
            ArgKind::Centred => DisplayType::Centered,
            ArgKind::Ragged => DisplayType::Ragged,
            ArgKind::Unfilled => DisplayType::Unfilled,
            ArgKind::Filled => DisplayType::Filled,
            ArgKind::Literal => DisplayType::Literal,
            _ => return None,
        };
        Some(dt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayNorm {
    pub display_type: Option<DisplayType>,
    pub offset: Option<String>,
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorMode {
    Split,
    NoSplit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorNorm {
    pub mode: Option<AuthorMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    Emphasis,
    Literal,
    Symbolic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontNorm {
    pub font: Option<Font>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceNorm {
    /// Number of `%J` and `%B` children; their titles get quoted.
    pub quote_titles: usize,
}

/// Normalized data attached to a block or element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Norm {
    #[default]
    None,
    List(ListNorm),
    Display(DisplayNorm),
    Author(AuthorNorm),
    Font(FontNorm),
    Reference(ReferenceNorm),
    /// `En` block: the `Es` element whose delimiters it uses.
    Enclosure { es: Option<NodeId> },
}

/// A node of the syntax tree. Links are managed by [`Tree`](super::Tree).
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub tok: Option<Macro>,
    pub pos: Position,
    pub flags: NodeFlags,
    pub sec: Section,
    /// Word of a text node.
    pub string: Option<String>,
    pub args: Vec<Argument>,
    pub norm: Norm,
    /// For end-of-block bodies: the block they close.
    pub pending: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) nchild: usize,
    pub(crate) head: Option<NodeId>,
    pub(crate) body: Option<NodeId>,
    pub(crate) tail: Option<NodeId>,
}

macro_rules! norm_accessors {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self) -> Option<&$ty> {
            match &self.norm {
                Norm::$variant(data) => Some(data),
                _ => None,
            }
        }

        /// Mutable access, allocating empty data on first use.
        pub fn $get_mut(&mut self) -> &mut $ty {
            if !matches!(self.norm, Norm::$variant(_)) {
                self.norm = Norm::$variant(<$ty>::default());
            }
            match &mut self.norm {
                Norm::$variant(data) => data,
                _ => unreachable!("normalized data allocated above"),
            }
        }
    };
}

impl Node {
    pub fn new(kind: NodeKind, tok: Option<Macro>, pos: Position) -> Self {
        Self {
            kind,
            tok,
            pos,
            flags: NodeFlags::default(),
            sec: Section::None,
            string: None,
            args: Vec::new(),
            norm: Norm::None,
            pending: None,
            parent: None,
            first_child: None,
            last_child: None,
            prev: None,
            next: None,
            nchild: 0,
            head: None,
            body: None,
            tail: None,
        }
    }

    pub fn text(word: impl Into<String>, pos: Position) -> Self {
        let mut node = Self::new(NodeKind::Text, None, pos);
        node.string = Some(word.into());
        node
    }

    pub fn is(&self, kind: NodeKind, tok: Macro) -> bool {
        self.kind == kind && self.tok == Some(tok)
    }

    /// Macro name, or the node kind for text and root.
    pub fn label(&self) -> String {
        match self.tok {
            Some(tok) => tok.name().to_string(),
            None => self.kind.to_string(),
        }
    }

    pub fn arg(&self, kind: ArgKind) -> Option<&Argument> {
        self.args.iter().find(|a| a.arg == kind)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn child_count(&self) -> usize {
        self.nchild
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    norm_accessors!(list, list_mut, List, ListNorm);
    norm_accessors!(display, display_mut, Display, DisplayNorm);
    norm_accessors!(author, author_mut, Author, AuthorNorm);
    norm_accessors!(font, font_mut, Font, FontNorm);
    norm_accessors!(reference, reference_mut, Reference, ReferenceNorm);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_allocated_once() {
        let mut node = Node::new(NodeKind::Block, Some(Macro::Bl), Position::new(1, 1));
        assert!(node.list().is_none());
        node.list_mut().compact = true;
        node.list_mut().width = Some("2n".into());
        let list = node.list().unwrap();
        assert!(list.compact);
        assert_eq!(list.width.as_deref(), Some("2n"));
    }

    #[test]
    fn test_label() {
        let text = Node::text("word", Position::new(1, 1));
        assert_eq!(text.label(), "text");
        let sh = Node::new(NodeKind::Block, Some(Macro::Sh), Position::new(1, 1));
        assert_eq!(sh.label(), "Sh");
    }

    #[test]
    fn test_list_type_from_arg() {
        assert_eq!(ListType::from_arg(ArgKind::Tag), Some(ListType::Tag));
        assert_eq!(ListType::from_arg(ArgKind::Width), None);
        assert_eq!(
            DisplayType::from_arg(ArgKind::Centred),
            Some(DisplayType::Centered)
        );
    }
}
