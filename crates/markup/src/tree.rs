//! The in-memory markup document model.
//!
//! Nodes live in an arena owned by [`MarkupDocument`] and refer to each other by
//! [`NodeId`]. Parent links are plain indices, so a node never owns its
//! ancestors. `depth` and `parent` are recomputed by a single top-down pass
//! ([`MarkupDocument::update_structure`]) after every structural change.

use crate::error::MarkupError;
use crate::parser::MarkupParser;
use crate::writer::MarkupWriter;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Deepest element depth a document may hold; the root element has depth 0.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Index of a node inside its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Returns the value of the first attribute named `name`, or `""`.
fn attribute_value<'a>(attributes: &'a [Attribute], name: &str) -> &'a str {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
        .unwrap_or("")
}

/// Replaces the value of an existing attribute or appends a new one.
fn upsert_attribute(attributes: &mut Vec<Attribute>, name: &str, value: &str) {
    match attributes.iter_mut().find(|a| a.name == name) {
        Some(existing) => existing.value = value.to_string(),
        None => attributes.push(Attribute::new(name, value)),
    }
}

/// The `<?xml ... ?>` prologue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    pub attributes: Vec<Attribute>,
}

impl Declaration {
    pub fn get_attribute_value(&self, name: &str) -> &str {
        attribute_value(&self.attributes, name)
    }

    pub fn set_attribute_value(&mut self, name: &str, value: &str) {
        upsert_attribute(&mut self.attributes, name, value);
    }

    pub fn version(&self) -> &str {
        self.get_attribute_value("version")
    }

    pub fn set_version(&mut self, value: &str) {
        self.set_attribute_value("version", value);
    }

    pub fn encoding(&self) -> &str {
        self.get_attribute_value("encoding")
    }

    pub fn set_encoding(&mut self, value: &str) {
        self.set_attribute_value("encoding", value);
    }

    pub fn standalone(&self) -> &str {
        self.get_attribute_value("standalone")
    }

    pub fn set_standalone(&mut self, value: &str) {
        self.set_attribute_value("standalone", value);
    }
}

/// Where the writer places a newline (plus `4 * depth` spaces of indentation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreaks {
    pub before_open: bool,
    pub after_open: bool,
    pub before_close: bool,
    pub after_close: bool,
}

impl LineBreaks {
    /// No line breaks at all; used for parsed elements so that writing them
    /// back reproduces the source layout.
    pub const NONE: LineBreaks = LineBreaks::new(false, false, false, false);

    pub const fn new(before_open: bool, after_open: bool, before_close: bool, after_close: bool) -> Self {
        Self {
            before_open,
            after_open,
            before_close,
            after_close,
        }
    }
}

impl Default for LineBreaks {
    fn default() -> Self {
        LineBreaks::new(true, true, true, false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub(crate) subelements: Vec<NodeId>,
    pub(crate) self_closing: bool,
    pub line_breaks: LineBreaks,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            subelements: Vec::new(),
            self_closing: false,
            line_breaks: LineBreaks::default(),
        }
    }

    pub fn subelements(&self) -> &[NodeId] {
        &self.subelements
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    pub fn get_attribute_value(&self, name: &str) -> &str {
        attribute_value(&self.attributes, name)
    }

    pub fn set_attribute_value(&mut self, name: &str, value: &str) {
        upsert_attribute(&mut self.attributes, name, value);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            depth: 0,
        }
    }
}

/// A parsed or programmatically built markup document.
///
/// The document owns every node. The root element has depth 0 and no parent.
#[derive(Debug, Clone)]
pub struct MarkupDocument {
    pub declaration: Declaration,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl MarkupDocument {
    /// Creates a document with a `version="1.0"` declaration and a single root element.
    pub fn new(root_name: &str) -> Self {
        let mut declaration = Declaration::default();
        declaration.set_version("1.0");
        let nodes = vec![NodeData::new(NodeKind::Element(Element::new(root_name)))];
        Self {
            declaration,
            nodes,
            root: NodeId(0),
        }
    }

    /// Assembles a document from parser output and links every node.
    pub(crate) fn from_parts(declaration: Declaration, nodes: Vec<NodeData>, root: NodeId) -> Self {
        let mut document = Self {
            declaration,
            nodes,
            root,
        };
        document.update_structure();
        document
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MarkupError> {
        MarkupParser::new().parse_file(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MarkupError> {
        let text = MarkupWriter::new().write_document(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: self.root,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns a handle to `id`, or `None` if the id belongs to another document.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, MarkupError> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(element)) => Ok(element),
            _ => Err(MarkupError::NotAnElement(id.0)),
        }
    }

    /// Recomputes `depth` and `parent` for every node reachable from the root,
    /// parents before children.
    pub fn update_structure(&mut self) {
        let mut stack = vec![(self.root, None, 0usize)];
        while let Some((id, parent, depth)) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.parent = parent;
            node.depth = depth;
            if let NodeKind::Element(element) = &node.kind {
                for &child in element.subelements.iter().rev() {
                    stack.push((child, Some(id), depth + 1));
                }
            }
        }
    }

    // --- Programmatic construction ---

    /// Adds a detached element; attach it with [`MarkupDocument::append_child`].
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Element(Element::new(name)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Comment(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// Appends `child` to `parent`'s subelements and relinks the tree.
    ///
    /// `child` must be detached and must not be `parent` or one of its
    /// ancestors. A self-closing parent stops being self-closing once it has
    /// children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), MarkupError> {
        self.element_mut(parent)?;
        if child.0 >= self.nodes.len() || child == self.root || self.nodes[child.0].parent.is_some() {
            return Err(MarkupError::AlreadyAttached(child.0));
        }

        let mut parent_depth = 0;
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(MarkupError::CyclicAttachment {
                    parent: parent.0,
                    child: child.0,
                });
            }
            ancestor = self.nodes[id.0].parent;
            if ancestor.is_some() {
                parent_depth += 1;
            }
        }
        if parent_depth + 1 + self.element_height(child) > MAX_NESTING_DEPTH {
            return Err(MarkupError::AttachTooDeep {
                child: child.0,
                limit: MAX_NESTING_DEPTH,
            });
        }

        let element = self.element_mut(parent)?;
        element.self_closing = false;
        element.subelements.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.update_structure();
        Ok(())
    }

    /// Levels of elements below `id`: 0 for a leaf or a non-element node.
    fn element_height(&self, id: NodeId) -> usize {
        let mut height = 0;
        let mut stack = vec![(id, 0usize)];
        while let Some((current, level)) = stack.pop() {
            height = height.max(level);
            if let NodeKind::Element(element) = &self.nodes[current.0].kind {
                for &child in &element.subelements {
                    if matches!(self.nodes[child.0].kind, NodeKind::Element(_)) {
                        stack.push((child, level + 1));
                    }
                }
            }
        }
        height
    }

    /// Marks a childless element as self-closing. Elements with children are left as they are.
    pub fn set_self_closing(&mut self, id: NodeId, self_closing: bool) -> Result<(), MarkupError> {
        let element = self.element_mut(id)?;
        if element.subelements.is_empty() {
            element.self_closing = self_closing;
        }
        Ok(())
    }

    pub fn set_attribute_value(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), MarkupError> {
        self.element_mut(id)?.set_attribute_value(name, value);
        Ok(())
    }

    pub fn set_line_breaks(
        &mut self,
        id: NodeId,
        before_open: bool,
        after_open: bool,
        before_close: bool,
        after_close: bool,
    ) -> Result<(), MarkupError> {
        self.element_mut(id)?.line_breaks = LineBreaks::new(before_open, after_open, before_close, after_close);
        Ok(())
    }
}

impl FromStr for MarkupDocument {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkupParser::new().parse_document(s)
    }
}

/// A cheap, copyable handle to a node inside a [`MarkupDocument`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a MarkupDocument,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a MarkupDocument {
        self.doc
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.doc.data(self.id).kind
    }

    pub fn depth(&self) -> usize {
        self.doc.data(self.id).depth
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc
            .data(self.id)
            .parent
            .map(|id| NodeRef { doc: self.doc, id })
    }

    pub fn root(&self) -> NodeRef<'a> {
        self.doc.root()
    }

    pub fn as_element(&self) -> Option<&'a Element> {
        match self.kind() {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.as_element().is_some()
    }

    /// Tag name for elements, `None` for text and comments.
    pub fn name(&self) -> Option<&'a str> {
        self.as_element().map(|e| e.name.as_str())
    }

    /// Literal text of a text or comment node.
    pub fn text(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text(text) | NodeKind::Comment(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn is_self_closing(&self) -> bool {
        self.as_element().is_some_and(|e| e.self_closing)
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        self.as_element().map(|e| e.attributes.as_slice()).unwrap_or(&[])
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes().is_empty()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|a| a.name == name)
    }

    /// Value of the first attribute named `name`; `""` when absent.
    pub fn get_attribute_value(&self, name: &str) -> &'a str {
        attribute_value(self.attributes(), name)
    }

    pub fn subelements(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.as_element()
            .map(|e| e.subelements.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    pub fn has_subelements(&self) -> bool {
        self.subelements().next().is_some()
    }

    pub fn first_subelement(&self) -> Option<NodeRef<'a>> {
        self.subelements().next()
    }

    pub fn last_subelement(&self) -> Option<NodeRef<'a>> {
        self.subelements().last()
    }

    /// Direct children that are elements.
    pub fn child_elements(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.subelements().filter(|n| n.is_element())
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendant_elements(&self) -> Vec<NodeRef<'a>> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeRef<'a>> = self.child_elements().collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            result.push(current);
            let children: Vec<_> = current.child_elements().collect();
            stack.extend(children.into_iter().rev());
        }
        result
    }

    /// Elements named `name`. Direct children come first; with `any_depth`
    /// each child's own matches are appended after them, recursively.
    pub fn elements_by_name(&self, name: &str, any_depth: bool) -> Vec<NodeRef<'a>> {
        let mut result = Vec::new();
        let mut stack = vec![*self];
        while let Some(current) = stack.pop() {
            result.extend(current.child_elements().filter(|e| e.name() == Some(name)));
            if any_depth {
                let children: Vec<_> = current.child_elements().collect();
                stack.extend(children.into_iter().rev());
            }
        }
        result
    }

    pub fn first_element_with_name(&self, name: &str, any_depth: bool) -> Option<NodeRef<'a>> {
        self.elements_by_name(name, any_depth).into_iter().next()
    }

    /// Concatenated text of all descendant text leaves; comments are skipped.
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        let mut stack = vec![*self];
        while let Some(current) = stack.pop() {
            match current.kind() {
                NodeKind::Text(t) => out.push_str(t),
                NodeKind::Element(_) => {
                    let children: Vec<_> = current.subelements().collect();
                    stack.extend(children.into_iter().rev());
                }
                NodeKind::Comment(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_level_tree() -> MarkupDocument {
        let mut doc = MarkupDocument::new("document");
        let root = doc.root_id();
        let sections = doc.create_element("sections");
        let p1 = doc.create_element("p");
        let section = doc.create_element("section");
        let p2 = doc.create_element("p");
        doc.append_child(root, p1).unwrap();
        doc.append_child(root, sections).unwrap();
        doc.append_child(sections, section).unwrap();
        doc.append_child(section, p2).unwrap();
        doc.set_attribute_value(p2, "id", "deep").unwrap();
        doc
    }

    #[test]
    fn test_depth_and_parent_are_linked() {
        let doc = three_level_tree();
        let deep = doc.root().first_element_with_name("p", true).unwrap();
        assert_eq!(deep.depth(), 1);
        let nested = doc.root().elements_by_name("p", true)[1];
        assert_eq!(nested.depth(), 3);
        assert_eq!(nested.parent().and_then(|p| p.name()), Some("section"));
        assert_eq!(nested.root(), doc.root());
        assert!(doc.root().parent().is_none());
    }

    #[test]
    fn test_elements_by_name_orders_shallow_first() {
        let doc = three_level_tree();
        let found = doc.root().elements_by_name("p", true);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].get_attribute_value("id"), "");
        assert_eq!(found[1].get_attribute_value("id"), "deep");

        let direct = doc.root().elements_by_name("p", false);
        assert_eq!(direct.len(), 1);
        assert!(doc.root().first_element_with_name("section", false).is_none());
    }

    #[test]
    fn test_attribute_get_and_upsert() {
        let mut doc = MarkupDocument::new("a");
        let root = doc.root_id();
        assert_eq!(doc.root().get_attribute_value("missing"), "");
        doc.set_attribute_value(root, "id", "one").unwrap();
        doc.set_attribute_value(root, "id", "two").unwrap();
        assert_eq!(doc.root().attributes().len(), 1);
        assert_eq!(doc.root().get_attribute_value("id"), "two");
        assert!(doc.root().has_attribute("id"));
    }

    #[test]
    fn test_declaration_accessors() {
        let mut declaration = Declaration::default();
        assert_eq!(declaration.encoding(), "");
        declaration.set_encoding("utf-8");
        declaration.set_version("1.0");
        declaration.set_version("1.1");
        assert_eq!(declaration.encoding(), "utf-8");
        assert_eq!(declaration.version(), "1.1");
        assert_eq!(declaration.attributes.len(), 2);
    }

    #[test]
    fn test_append_child_rejects_text_parent_and_reattach() {
        let mut doc = MarkupDocument::new("a");
        let root = doc.root_id();
        let text = doc.create_text("hello");
        let b = doc.create_element("b");
        doc.append_child(root, text).unwrap();
        assert!(matches!(doc.append_child(text, b), Err(MarkupError::NotAnElement(_))));
        doc.append_child(root, b).unwrap();
        assert!(matches!(doc.append_child(root, b), Err(MarkupError::AlreadyAttached(_))));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let mut doc = MarkupDocument::new("a");
        let b = doc.create_element("b");
        let c = doc.create_element("c");
        assert!(matches!(doc.append_child(b, b), Err(MarkupError::CyclicAttachment { .. })));

        doc.append_child(b, c).unwrap();
        assert!(matches!(doc.append_child(c, b), Err(MarkupError::CyclicAttachment { .. })));

        let root = doc.root_id();
        doc.append_child(root, b).unwrap();
        assert_eq!(doc.root().descendant_elements().len(), 2);
        assert_eq!(doc.root().inner_text(), "");
    }

    #[test]
    fn test_detached_node_cannot_get_two_parents() {
        let mut doc = MarkupDocument::new("a");
        let first = doc.create_element("first");
        let second = doc.create_element("second");
        let shared = doc.create_text("shared");
        doc.append_child(first, shared).unwrap();
        assert!(matches!(doc.append_child(second, shared), Err(MarkupError::AlreadyAttached(_))));

        let root = doc.root_id();
        doc.append_child(root, first).unwrap();
        doc.append_child(root, second).unwrap();
        assert_eq!(doc.root().inner_text(), "shared");
        let node = doc.node(shared).unwrap();
        assert_eq!(node.depth(), 2);
        assert_eq!(node.parent().and_then(|p| p.name()), Some("first"));
    }

    #[test]
    fn test_append_child_enforces_nesting_limit() {
        let mut doc = MarkupDocument::new("a");
        let top = doc.create_element("b");
        let mut current = top;
        for _ in 0..MAX_NESTING_DEPTH - 1 {
            let child = doc.create_element("b");
            doc.append_child(current, child).unwrap();
            current = child;
        }
        // The detached chain is MAX_NESTING_DEPTH elements long; below the root it
        // would reach depth MAX_NESTING_DEPTH, which is still allowed.
        let root = doc.root_id();
        doc.append_child(root, top).unwrap();
        assert_eq!(doc.node(current).unwrap().depth(), MAX_NESTING_DEPTH);

        let extra = doc.create_element("b");
        assert!(matches!(
            doc.append_child(current, extra),
            Err(MarkupError::AttachTooDeep { limit: MAX_NESTING_DEPTH, .. })
        ));
    }

    #[test]
    fn test_inner_text_skips_comments() {
        let mut doc = MarkupDocument::new("p");
        let root = doc.root_id();
        let hi = doc.create_text("Hi ");
        let note = doc.create_comment("note");
        let b = doc.create_element("b");
        let there = doc.create_text("there");
        doc.append_child(root, hi).unwrap();
        doc.append_child(root, note).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_child(b, there).unwrap();
        assert_eq!(doc.root().inner_text(), "Hi there");
        assert_eq!(doc.root().first_subelement().and_then(|n| n.text()), Some("Hi "));
        assert_eq!(doc.root().last_subelement().and_then(|n| n.name()), Some("b"));
    }

    #[test]
    fn test_self_closing_cleared_when_children_added() {
        let mut doc = MarkupDocument::new("a");
        let root = doc.root_id();
        doc.set_self_closing(root, true).unwrap();
        assert!(doc.root().is_self_closing());
        let child = doc.create_element("b");
        doc.append_child(root, child).unwrap();
        assert!(!doc.root().is_self_closing());
        doc.set_self_closing(root, true).unwrap();
        assert!(!doc.root().is_self_closing());
    }
}
