//! Serialization of validated documents and the JSON input format
//!
//! - treeviz: one line per node, for terminals and snapshot tests
//! - json: the normalized tree with the document metadata
//! - source: a JSON description of a document, replayed through the builder

pub mod json;
pub mod registry;
pub mod source;
pub mod treeviz;

pub use json::{to_json_string, to_json_value, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use source::{replay, SourceDocument, SourceNode};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_linum, TreevizFormatter};
