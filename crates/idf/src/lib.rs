//! Intermediate Document Format (IDF)
//!
//! The in-memory representation of a Graphe document's content after the
//! markup has been parsed and validated, and before styles are resolved.

pub mod content;
pub mod error;
pub mod import;

pub use content::{ContentDocument, ContentElement, ContentKind, Variable, INHERITED_FONT_PROPERTIES};
pub use error::ImportError;
pub use import::Importer;
