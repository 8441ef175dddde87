//! Defines the unified error type for all pipeline operations.

use graphe_idf::ImportError;
use graphe_markup::MarkupError;
use graphe_style::StyleParseError;
use graphe_xpath::XPathError;
use thiserror::Error;

/// The main error enum for all high-level operations of the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
    #[error("Path query error: {0}")]
    XPath(#[from] XPathError),
    #[error("Style error: {0}")]
    Style(#[from] StyleParseError),
    #[error("Document validation error: {0}")]
    Import(#[from] ImportError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}
