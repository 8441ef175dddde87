//! The Graphe markup front end.
//!
//! This crate turns the XML-like Graphe source format into an in-memory
//! [`MarkupDocument`] and writes such documents back to text:
//! - **cursor**: scan position with copy/commit backtracking
//! - **parser**: recursive-descent parser for declarations, elements, text and comments
//! - **tree**: arena-backed document model with depth and parent links
//! - **writer**: serializer honouring the per-element line-break flags

pub mod cursor;
pub mod error;
pub mod parser;
pub mod tree;
pub mod writer;

pub use cursor::Cursor;
pub use error::MarkupError;
pub use parser::MarkupParser;
pub use tree::{
    Attribute, Declaration, Element, LineBreaks, MAX_NESTING_DEPTH, MarkupDocument, NodeId, NodeKind, NodeRef,
};
pub use writer::MarkupWriter;
