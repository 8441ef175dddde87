//! # graphe
//!
//! The front end of the Graphe publishing pipeline: parse markup into a
//! document tree, query it with path expressions, import it as content
//! elements and resolve their styles.
//!
//! ```no_run
//! use graphe::PipelineBuilder;
//!
//! let pipeline = PipelineBuilder::new().with_style_file("style.json")?.build();
//! let document = pipeline.compile_file("report.graphe")?;
//! println!("{}", document.title);
//! # Ok::<(), graphe::PipelineError>(())
//! ```

pub mod output;

// Re-export the workspace crates
pub use graphe_core as core;
pub use graphe_idf as idf;
pub use graphe_markup as markup;
pub use graphe_style as style;
pub use graphe_xpath as xpath;

pub use graphe_core::{Pipeline, PipelineBuilder, PipelineError, StyleResolver};
pub use graphe_idf::{ContentDocument, ContentElement, ContentKind, ImportError, Importer};
pub use graphe_markup::{MarkupDocument, MarkupError, MarkupParser, MarkupWriter, NodeRef};
pub use graphe_style::{
    DeclarationParser, InlineDeclarations, Length, StyleParseError, StyleProperty, StyleRule, StyleSelector,
    StyleSheet, StyleValue, Unit,
};
pub use graphe_xpath::{DocumentQuery, PathExpression, PathItem, PathQuery, Selector, XPathError, parse_path};
pub use output::OutputFormat;
