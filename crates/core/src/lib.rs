//! # graphe-core
//!
//! Ties the Graphe front end together:
//! - **resolver**: the style cascade over content elements
//! - **pipeline**: parse markup, import content, resolve styles
//! - **error**: the unified pipeline error
//!
//! The whole pipeline is synchronous and single-threaded. A document is
//! mutated exactly once, by [`StyleResolver::resolve`]; afterwards it is
//! read-only.

// Re-export foundation crates
pub use graphe_idf as idf;
pub use graphe_markup as markup;
pub use graphe_style as style;

// Re-export algorithm crates
pub use graphe_xpath as xpath;

pub mod error;
pub mod pipeline;
pub mod resolver;

pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use resolver::StyleResolver;
