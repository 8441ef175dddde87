//! Path queries over a [`graphe_markup::MarkupDocument`].
//!
//! A path such as `/document//section@id` compiles into an ordered list of
//! [`Selector`]s which is then applied, one selector at a time, to a working
//! list that starts as the context element.

pub mod ast;
pub mod engine;
pub mod error;
pub mod parser;
pub mod query;

pub use ast::{PathExpression, Selector};
pub use engine::{PathItem, resolve, resolve_path};
pub use error::XPathError;
pub use parser::parse_path;
pub use query::{DocumentQuery, PathQuery};
