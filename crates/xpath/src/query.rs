//! Convenience entry points for running path queries directly on markup values.

use crate::engine::{PathItem, resolve_path};
use crate::error::XPathError;
use graphe_markup::{MarkupDocument, NodeRef};

/// Something a path query can be run from.
pub trait PathQuery<'a> {
    /// Parses `path` and resolves it against `self`.
    fn find(self, path: &str) -> Result<Vec<PathItem<'a>>, XPathError>;

    /// Like [`PathQuery::find`] but keeps only element results.
    fn find_elements(self, path: &str) -> Result<Vec<NodeRef<'a>>, XPathError>
    where
        Self: Sized,
    {
        Ok(self
            .find(path)?
            .into_iter()
            .filter_map(|item| item.as_element())
            .collect())
    }
}

impl<'a> PathQuery<'a> for NodeRef<'a> {
    fn find(self, path: &str) -> Result<Vec<PathItem<'a>>, XPathError> {
        resolve_path(self, path)
    }
}

/// Queries on a document run from its root element.
impl<'a> PathQuery<'a> for &'a MarkupDocument {
    fn find(self, path: &str) -> Result<Vec<PathItem<'a>>, XPathError> {
        resolve_path(self.root(), path)
    }
}

/// Document-level lookups that start from an arbitrary node of the document.
pub trait DocumentQuery<'a> {
    /// Resolves `path` with `node` as the context element.
    fn find_from(self, node: NodeRef<'a>, path: &str) -> Result<Vec<PathItem<'a>>, XPathError>;
}

impl<'a> DocumentQuery<'a> for &'a MarkupDocument {
    fn find_from(self, node: NodeRef<'a>, path: &str) -> Result<Vec<PathItem<'a>>, XPathError> {
        if !std::ptr::eq(node.document(), self) {
            log::warn!("find_from called with a node of another document");
        }
        resolve_path(node, path)
    }
}
