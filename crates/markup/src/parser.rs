//! A backtracking recursive-descent parser for the Graphe markup format.
//!
//! ```text
//! Document    := Declaration WhiteSpace? Element
//! Declaration := "<?xml" Attribute* WhiteSpace? "?>"
//! Element     := "<" Name Attribute* WhiteSpace?
//!                ( "/>" | ">" (Text | Comment | Element)* "</" Name WhiteSpace? ">" )
//! Attribute   := WhiteSpace? Name WhiteSpace? "=" WhiteSpace? Quoted
//! ```
//!
//! Every rule works on a copy of the caller's [`Cursor`] and commits it only on
//! success, so a rule that does not match leaves the position untouched.

use crate::cursor::Cursor;
use crate::error::MarkupError;
use crate::tree::{
    Attribute, Declaration, Element, LineBreaks, MAX_NESTING_DEPTH, MarkupDocument, NodeData, NodeId, NodeKind,
};
use std::fs;
use std::path::Path;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Collapses every whitespace run to a single space, keeping leading and
/// trailing runs as one space each.
fn compress_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Stateless entry point; each call parses into a fresh session.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser;

impl MarkupParser {
    pub fn new() -> Self {
        Self
    }

    /// Reads the whole file and parses it. The file is closed before parsing starts.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<MarkupDocument, MarkupError> {
        let path = path.as_ref();
        log::debug!("Reading markup from {}", path.display());
        let text = fs::read_to_string(path)?;
        self.parse_document(&text)
    }

    /// Parses a complete document: declaration followed by a single root element.
    pub fn parse_document(&self, input: &str) -> Result<MarkupDocument, MarkupError> {
        let mut session = Session::new(input);
        let mut cursor = Cursor::new();

        let declaration = session
            .declaration(&mut cursor)?
            .ok_or(MarkupError::MissingDeclaration)?;
        session.whitespace(&mut cursor);
        let root = session
            .element(&mut cursor)?
            .ok_or(MarkupError::MissingRoot(cursor.pos()))?;

        session.finish(cursor);
        log::debug!("Parsed markup document with {} nodes", session.nodes.len());
        Ok(MarkupDocument::from_parts(declaration, session.nodes, root))
    }

    /// Parses a lone element with no declaration in front of it. The resulting
    /// document gets an empty declaration.
    pub fn parse_fragment(&self, input: &str) -> Result<MarkupDocument, MarkupError> {
        let mut session = Session::new(input);
        let mut cursor = Cursor::new();
        session.whitespace(&mut cursor);
        let root = session
            .element(&mut cursor)?
            .ok_or(MarkupError::MissingRoot(cursor.pos()))?;
        session.finish(cursor);
        Ok(MarkupDocument::from_parts(Declaration::default(), session.nodes, root))
    }
}

/// Per-call parse state: the source text, the arena being filled and the
/// depth of the element currently being parsed.
struct Session<'a> {
    input: &'a str,
    nodes: Vec<NodeData>,
    depth: usize,
}

impl<'a> Session<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            nodes: Vec::new(),
            depth: 0,
        }
    }

    fn rest(&self, cursor: &Cursor) -> &'a str {
        self.input.get(cursor.pos()..).unwrap_or("")
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    fn finish(&mut self, mut cursor: Cursor) {
        self.whitespace(&mut cursor);
        if cursor.pos() < self.input.len() {
            log::warn!(
                "Ignoring {} bytes of trailing content after the root element",
                self.input.len() - cursor.pos()
            );
        }
    }

    /// Consumes `literal` if the input continues with it.
    fn expect(&self, cursor: &mut Cursor, literal: &str) -> bool {
        if self.rest(cursor).starts_with(literal) {
            cursor.advance(literal.len());
            true
        } else {
            false
        }
    }

    /// Consumes the longest prefix whose characters satisfy `pred`.
    fn take_while(&self, cursor: &mut Cursor, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest(cursor);
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        cursor.advance(len);
        &rest[..len]
    }

    fn whitespace(&self, cursor: &mut Cursor) -> bool {
        !self.take_while(cursor, is_space).is_empty()
    }

    fn name(&self, cursor: &mut Cursor) -> Option<&'a str> {
        let name = self.take_while(cursor, is_name_char);
        (!name.is_empty()).then_some(name)
    }

    fn declaration(&mut self, cursor: &mut Cursor) -> Result<Option<Declaration>, MarkupError> {
        let mut m = cursor.copy();
        if !self.expect(&mut m, "<?xml") {
            return Ok(None);
        }

        let mut declaration = Declaration::default();
        while let Some(attribute) = self.attribute(&mut m)? {
            declaration.attributes.push(attribute);
        }
        self.whitespace(&mut m);

        if !self.expect(&mut m, "?>") {
            return Err(MarkupError::UnclosedDeclaration(m.pos()));
        }
        cursor.commit(m);
        Ok(Some(declaration))
    }

    fn attribute(&self, cursor: &mut Cursor) -> Result<Option<Attribute>, MarkupError> {
        let mut m = cursor.copy();
        self.whitespace(&mut m);
        let Some(name) = self.name(&mut m) else {
            return Ok(None);
        };
        self.whitespace(&mut m);
        if !self.expect(&mut m, "=") {
            return Ok(None);
        }
        self.whitespace(&mut m);

        let value = self.quoted(&mut m, name)?;
        cursor.commit(m);
        Ok(Some(Attribute::new(name, value)))
    }

    fn quoted(&self, cursor: &mut Cursor, name: &str) -> Result<String, MarkupError> {
        let start = cursor.pos();
        let quote = match self.rest(cursor).chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => {
                return Err(MarkupError::UnquotedAttribute {
                    name: name.to_string(),
                    offset: start,
                });
            }
        };
        cursor.advance(1);
        let rest = self.rest(cursor);
        let end = rest.find(quote).ok_or_else(|| MarkupError::UnterminatedAttribute {
            name: name.to_string(),
            offset: start,
        })?;
        cursor.advance(end + 1);
        Ok(rest[..end].to_string())
    }

    fn text(&mut self, cursor: &mut Cursor) -> Option<NodeId> {
        let raw = self.take_while(cursor, |c| c != '<' && c != '>');
        if raw.is_empty() {
            return None;
        }
        Some(self.push(NodeKind::Text(compress_whitespace(raw))))
    }

    fn comment(&mut self, cursor: &mut Cursor) -> Result<Option<NodeId>, MarkupError> {
        let start = cursor.pos();
        let mut m = cursor.copy();
        if !self.expect(&mut m, "<!--") {
            return Ok(None);
        }
        let rest = self.rest(&m);
        let end = rest.find("-->").ok_or(MarkupError::UnterminatedComment(start))?;
        let text = rest[..end].trim().to_string();
        m.advance(end + "-->".len());
        cursor.commit(m);
        Ok(Some(self.push(NodeKind::Comment(text))))
    }

    fn element(&mut self, cursor: &mut Cursor) -> Result<Option<NodeId>, MarkupError> {
        let mut m = cursor.copy();
        if !self.expect(&mut m, "<") {
            return Ok(None);
        }
        let Some(name) = self.name(&mut m) else {
            return Ok(None);
        };
        if self.depth > MAX_NESTING_DEPTH {
            return Err(MarkupError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                offset: cursor.pos(),
            });
        }

        let mut element = Element::new(name);
        element.line_breaks = LineBreaks::NONE;
        while let Some(attribute) = self.attribute(&mut m)? {
            element.attributes.push(attribute);
        }
        self.whitespace(&mut m);

        if self.expect(&mut m, "/>") {
            element.self_closing = true;
            cursor.commit(m);
            return Ok(Some(self.push(NodeKind::Element(element))));
        }
        if !self.expect(&mut m, ">") {
            return Err(MarkupError::UnclosedStartTag {
                name: name.to_string(),
                offset: m.pos(),
            });
        }

        let mut subelements = Vec::new();
        self.depth += 1;
        loop {
            if let Some(text) = self.text(&mut m) {
                subelements.push(text);
            } else if let Some(comment) = self.comment(&mut m)? {
                subelements.push(comment);
            } else if let Some(child) = self.element(&mut m)? {
                subelements.push(child);
            } else {
                break;
            }
        }
        self.depth -= 1;

        let closing = |offset| MarkupError::ExpectedClosingTag {
            name: name.to_string(),
            offset,
        };
        if !self.expect(&mut m, "</") {
            return Err(closing(m.pos()));
        }
        self.whitespace(&mut m);
        if !self.expect(&mut m, name) {
            return Err(closing(m.pos()));
        }
        self.whitespace(&mut m);
        if !self.expect(&mut m, ">") {
            return Err(closing(m.pos()));
        }
        cursor.commit(m);

        // Padding between a tag and its first/last child collapses to a lone space.
        if subelements.first().is_some_and(|&id| self.is_single_space(id)) {
            subelements.remove(0);
        }
        if subelements.last().is_some_and(|&id| self.is_single_space(id)) {
            subelements.pop();
        }
        element.subelements = subelements;
        Ok(Some(self.push(NodeKind::Element(element))))
    }

    fn is_single_space(&self, id: NodeId) -> bool {
        matches!(&self.nodes[id.0].kind, NodeKind::Text(t) if t == " ")
    }
}
