//! Applies a compiled [`PathExpression`] to a markup tree.

use crate::ast::{PathExpression, Selector};
use crate::error::XPathError;
use crate::parser::parse_path;
use graphe_markup::{Attribute, NodeId, NodeRef};
use std::collections::HashSet;

/// An item in the working list: either an element or one of its attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathItem<'a> {
    Element(NodeRef<'a>),
    Attribute(&'a Attribute),
}

impl<'a> PathItem<'a> {
    pub fn as_element(&self) -> Option<NodeRef<'a>> {
        match self {
            PathItem::Element(node) => Some(*node),
            PathItem::Attribute(_) => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&'a Attribute> {
        match self {
            PathItem::Element(_) => None,
            PathItem::Attribute(attribute) => Some(attribute),
        }
    }
}

/// Resolves `expression` starting from `context`.
///
/// The working list starts as `[context]` and each selector transforms it in
/// turn. Element-only selectors silently drop attribute items and vice versa.
pub fn resolve<'a>(context: NodeRef<'a>, expression: &PathExpression) -> Vec<PathItem<'a>> {
    let mut items = vec![PathItem::Element(context)];
    for selector in expression.selectors() {
        items = apply(selector, items);
        if items.is_empty() {
            break;
        }
    }
    items
}

/// Parses `path` and resolves it from `context`.
pub fn resolve_path<'a>(context: NodeRef<'a>, path: &str) -> Result<Vec<PathItem<'a>>, XPathError> {
    let expression = parse_path(path)?;
    Ok(resolve(context, &expression))
}

fn elements<'a, 'b>(items: &'b [PathItem<'a>]) -> impl Iterator<Item = NodeRef<'a>> + 'b {
    items.iter().filter_map(PathItem::as_element)
}

/// Keeps the first occurrence of each node.
fn dedup_nodes<'a>(nodes: impl Iterator<Item = NodeRef<'a>>) -> Vec<PathItem<'a>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    nodes
        .filter(|node| seen.insert(node.id()))
        .map(PathItem::Element)
        .collect()
}

fn apply<'a>(selector: &Selector, items: Vec<PathItem<'a>>) -> Vec<PathItem<'a>> {
    match selector {
        Selector::Root => elements(&items)
            .next()
            .map(|node| vec![PathItem::Element(node.root())])
            .unwrap_or_default(),
        Selector::Current => items,
        Selector::Superelement => dedup_nodes(elements(&items).filter_map(|node| node.parent())),
        Selector::Subelements { any_depth: false } => elements(&items)
            .flat_map(|node| node.child_elements())
            .map(PathItem::Element)
            .collect(),
        Selector::Subelements { any_depth: true } => {
            dedup_nodes(elements(&items).flat_map(|node| node.descendant_elements()))
        }
        Selector::ElementName(name) => elements(&items)
            .filter(|node| node.name() == Some(name.as_str()))
            .map(PathItem::Element)
            .collect(),
        Selector::Attributes => elements(&items)
            .flat_map(|node| node.attributes().iter())
            .map(PathItem::Attribute)
            .collect(),
        Selector::AttributeName(name) => items
            .into_iter()
            .filter(|item| matches!(item, PathItem::Attribute(a) if a.name == *name))
            .collect(),
    }
}
