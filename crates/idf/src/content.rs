//! Content elements: a closed set of kinds, each carrying only its own fields.

use graphe_style::StyleValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// Font properties that inline kinds take from their enclosing block.
pub const INHERITED_FONT_PROPERTIES: [&str; 5] =
    ["font-name", "font-height", "font-weight", "font-slant", "font-variant"];

// --- Element Kinds ---

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentKind {
    Section { exclude: bool },
    Division,
    Paragraph,
    /// Levels run from 1 to 9.
    Heading { level: u8 },
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Hyperlink { url: String, title: String },
    Variable { name: String },
    PageNumber,
    LineBreak,
    PageBreak,
    DefinitionList,
    DefinitionListTerm,
    DefinitionListDefinition,
    /// A run of literal text. Never has subelements.
    Text { text: String },
}

impl ContentKind {
    /// The markup tag names this kind is written with. Text has none.
    pub fn tag_names(&self) -> Vec<String> {
        let names: &[&str] = match self {
            ContentKind::Section { .. } => &["section"],
            ContentKind::Division => &["division", "div"],
            ContentKind::Paragraph => &["paragraph", "p"],
            ContentKind::Heading { level } => {
                return vec![format!("heading{}", level), format!("h{}", level)];
            }
            ContentKind::Bold => &["bold", "b"],
            ContentKind::Italic => &["italic", "i"],
            ContentKind::Underline => &["underline", "u"],
            ContentKind::Strikethrough => &["strikethrough", "s"],
            ContentKind::Hyperlink { .. } => &["hyperlink", "a"],
            ContentKind::Variable { .. } => &["variable", "var"],
            ContentKind::PageNumber => &["page-number"],
            ContentKind::LineBreak => &["line-break", "br"],
            ContentKind::PageBreak => &["page-break"],
            ContentKind::DefinitionList => &["definition-list", "dl"],
            ContentKind::DefinitionListTerm => &["definition-list-term", "dt"],
            ContentKind::DefinitionListDefinition => &["definition-list-definition", "dd"],
            ContentKind::Text { .. } => &[],
        };
        names.iter().map(|n| n.to_string()).collect()
    }

    pub fn has_tag_name(&self, name: &str) -> bool {
        self.tag_names().iter().any(|n| n == name)
    }

    /// Kinds that sit inside running text and take their font from the enclosing block.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            ContentKind::Bold
                | ContentKind::Italic
                | ContentKind::Underline
                | ContentKind::Strikethrough
                | ContentKind::Hyperlink { .. }
                | ContentKind::Variable { .. }
                | ContentKind::PageNumber
                | ContentKind::Text { .. }
        )
    }

    /// Kinds whose children are blocks, so whitespace between them carries no content.
    pub fn holds_blocks(&self) -> bool {
        matches!(
            self,
            ContentKind::Section { .. } | ContentKind::Division | ContentKind::DefinitionList
        )
    }

    /// A short identifier for the kind, used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Section { .. } => "section",
            ContentKind::Division => "division",
            ContentKind::Paragraph => "paragraph",
            ContentKind::Heading { .. } => "heading",
            ContentKind::Bold => "bold",
            ContentKind::Italic => "italic",
            ContentKind::Underline => "underline",
            ContentKind::Strikethrough => "strikethrough",
            ContentKind::Hyperlink { .. } => "hyperlink",
            ContentKind::Variable { .. } => "variable",
            ContentKind::PageNumber => "page-number",
            ContentKind::LineBreak => "line-break",
            ContentKind::PageBreak => "page-break",
            ContentKind::DefinitionList => "definition-list",
            ContentKind::DefinitionListTerm => "definition-list-term",
            ContentKind::DefinitionListDefinition => "definition-list-definition",
            ContentKind::Text { .. } => "text",
        }
    }
}

// --- Elements ---

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentElement {
    #[serde(flatten)]
    pub kind: ContentKind,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style_class: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style_properties: BTreeMap<String, StyleValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subelements: Vec<ContentElement>,
}

impl ContentElement {
    /// Creates an element; inline kinds start with `inherit` for the font properties.
    pub fn new(kind: ContentKind) -> Self {
        let mut style_properties = BTreeMap::new();
        if kind.is_inline() {
            for name in INHERITED_FONT_PROPERTIES {
                style_properties.insert(name.to_string(), StyleValue::Inherit);
            }
        }
        Self {
            kind,
            id: String::new(),
            style_class: String::new(),
            style: String::new(),
            style_properties,
            subelements: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ContentKind::Text { text: text.into() })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_class(mut self, style_class: impl Into<String>) -> Self {
        self.style_class = style_class.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.style_properties.insert(name.into(), value.into());
        self
    }

    pub fn with_subelements(mut self, subelements: Vec<ContentElement>) -> Self {
        self.subelements = subelements;
        self
    }

    /// The class tokens, split on anything outside `[A-Za-z0-9_-]`.
    pub fn style_classes(&self) -> Vec<&str> {
        self.style_class
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .filter(|token| !token.is_empty())
            .collect()
    }

    pub fn has_style_class(&self, class: &str) -> bool {
        self.style_classes().contains(&class)
    }

    pub fn property(&self, name: &str) -> Option<&StyleValue> {
        self.style_properties.get(name)
    }

    /// Concatenated text of all text descendants.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let ContentKind::Text { text } = &self.kind {
            out.push_str(text);
        }
        for child in &self.subelements {
            child.collect_text(out);
        }
    }
}

// --- Document ---

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ContentDocument {
    pub version: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(rename = "abstract", skip_serializing_if = "String::is_empty")]
    pub abstract_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    pub sections: Vec<ContentElement>,
}

impl ContentDocument {
    /// The value of the first variable named `name`.
    pub fn value_of_variable(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert!(ContentKind::Paragraph.has_tag_name("p"));
        assert!(ContentKind::Paragraph.has_tag_name("paragraph"));
        assert!(ContentKind::Heading { level: 3 }.has_tag_name("h3"));
        assert!(ContentKind::Heading { level: 3 }.has_tag_name("heading3"));
        assert!(!ContentKind::Heading { level: 3 }.has_tag_name("h2"));
        assert!(ContentKind::Text { text: "x".into() }.tag_names().is_empty());
    }

    #[test]
    fn test_style_classes_filter_tokens() {
        let element = ContentElement::new(ContentKind::Paragraph).with_class("  lead note,warn!x ");
        assert_eq!(element.style_classes(), vec!["lead", "note", "warn", "x"]);
        assert!(element.has_style_class("note"));
        assert!(!element.has_style_class("no"));
    }

    #[test]
    fn test_inline_kinds_seed_font_inherit() {
        let bold = ContentElement::new(ContentKind::Bold);
        for name in INHERITED_FONT_PROPERTIES {
            assert_eq!(bold.property(name), Some(&StyleValue::Inherit));
        }
        assert!(ContentElement::new(ContentKind::Paragraph).style_properties.is_empty());
    }

    #[test]
    fn test_value_of_variable() {
        let document = ContentDocument {
            variables: vec![
                Variable { name: "a".into(), value: "1".into() },
                Variable { name: "a".into(), value: "2".into() },
            ],
            ..Default::default()
        };
        assert_eq!(document.value_of_variable("a"), Some("1"));
        assert_eq!(document.value_of_variable("b"), None);
    }

    #[test]
    fn test_json_shape() {
        let element = ContentElement::new(ContentKind::Heading { level: 2 })
            .with_id("h")
            .with_subelements(vec![ContentElement::new(ContentKind::LineBreak)]);
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["kind"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["id"], "h");
        assert_eq!(json["subelements"][0]["kind"], "line-break");
        assert!(json.get("styleClass").is_none());
    }
}
