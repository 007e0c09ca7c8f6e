//! Node model for mdoc syntax trees
//!
//!     Manual pages are trees of macros. A block macro such as `Bl` or `Sh`
//!     owns a head (the words on its own line), a body (everything up to the
//!     closing macro) and sometimes a tail. Element macros such as `Ar` hold
//!     their words directly as text children.
//!
//!     Nodes live in an arena ([`Tree`]) and refer to each other through
//!     [`NodeId`]s. The validator rewrites trees in place: deleting a node
//!     frees its slot for good, so a stale id is detected instead of silently
//!     pointing at a different node.
//!
//! Normalized data
//!
//!     Some macros carry data derived from their arguments: the list type and
//!     width of a `Bl`, the display type of a `Bd`, the font of a `Bf` and so
//!     on. That data ([`Norm`]) lives on the block (or element) node. Heads,
//!     bodies and tails reach it through their owning block, see
//!     [`Tree::block_of`].

pub mod macros;
pub mod node;
pub mod range;
pub mod section;
pub mod tree;

pub use macros::{ArgKind, Macro};
pub use node::{
    Argument, AuthorMode, AuthorNorm, DisplayNorm, DisplayType, Font, FontNorm, ListNorm,
    ListType, Node, NodeFlags, NodeId, NodeKind, Norm, ReferenceNorm,
};
pub use range::Position;
pub use section::Section;
pub use tree::Tree;

/// Non-breaking hyphen marker substituted for `-` between two letters.
pub const ASCII_HYPH: char = '\u{1e}';
