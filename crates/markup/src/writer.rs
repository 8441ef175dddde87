//! Serializes a [`MarkupDocument`] back to Graphe markup text.

use crate::error::MarkupError;
use crate::tree::{Attribute, Declaration, Element, MarkupDocument, NodeKind, NodeRef};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupWriter;

impl MarkupWriter {
    pub fn new() -> Self {
        Self
    }

    /// Writes the declaration, a newline, then the root element.
    pub fn write_document(&self, document: &MarkupDocument) -> Result<String, MarkupError> {
        let mut out = self.write_declaration(&document.declaration)?;
        out.push('\n');
        self.write_node(document.root(), &mut out)?;
        Ok(out)
    }

    pub fn write_declaration(&self, declaration: &Declaration) -> Result<String, MarkupError> {
        let attributes = self.write_attributes(&declaration.attributes)?;
        if attributes.is_empty() {
            Ok("<?xml ?>".to_string())
        } else {
            Ok(format!("<?xml {} ?>", attributes))
        }
    }

    /// Appends `node` and everything below it to `out`.
    pub fn write_node(&self, node: NodeRef<'_>, out: &mut String) -> Result<(), MarkupError> {
        match node.kind() {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Comment(text) => {
                if text.contains("--") {
                    return Err(MarkupError::InvalidComment(text.clone()));
                }
                out.push_str("<!-- ");
                out.push_str(text);
                out.push_str(" -->");
            }
            NodeKind::Element(element) => self.write_element(node, element, out)?,
        }
        Ok(())
    }

    fn write_element(&self, node: NodeRef<'_>, element: &Element, out: &mut String) -> Result<(), MarkupError> {
        let indentation = format!("\n{}", " ".repeat(4 * node.depth()));
        let line_break = |enabled: bool| if enabled { indentation.as_str() } else { "" };
        let breaks = element.line_breaks;
        let attributes = self.write_attributes(&element.attributes)?;
        let open = if attributes.is_empty() {
            element.name.clone()
        } else {
            format!("{} {}", element.name, attributes)
        };

        out.push_str(line_break(breaks.before_open));
        if element.is_self_closing() && element.subelements().is_empty() {
            out.push('<');
            out.push_str(&open);
            out.push_str(" />");
        } else {
            out.push('<');
            out.push_str(&open);
            out.push('>');
            out.push_str(line_break(breaks.after_open));
            for child in node.subelements() {
                self.write_node(child, out)?;
            }
            out.push_str(line_break(breaks.before_close));
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
        out.push_str(line_break(breaks.after_close));
        Ok(())
    }

    /// Attributes with an empty value are left out. Values containing `"` are
    /// written in single quotes.
    fn write_attributes(&self, attributes: &[Attribute]) -> Result<String, MarkupError> {
        let written = attributes
            .iter()
            .filter(|a| !a.value.is_empty())
            .map(|a| match (a.value.contains('"'), a.value.contains('\'')) {
                (false, _) => Ok(format!("{}=\"{}\"", a.name, a.value)),
                (true, false) => Ok(format!("{}='{}'", a.name, a.value)),
                (true, true) => Err(MarkupError::UnquotableAttribute(a.name.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(written.join(" "))
    }
}
