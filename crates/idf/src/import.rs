//! Builds a [`ContentDocument`] from a parsed markup document.
//!
//! The markup root must be `<document version="0.1">` with a `title` child.
//! Other recognised metadata children are `subtitle`, `abstract`,
//! `keywords`, `contributors`, `variables` and `sections`.

use crate::content::{ContentDocument, ContentElement, ContentKind, Variable};
use crate::error::ImportError;
use graphe_markup::{MarkupDocument, NodeKind, NodeRef};

const SUPPORTED_VERSION: &str = "0.1";

/// Converts markup into content elements, validating tag names and metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct Importer;

impl Importer {
    pub fn new() -> Self {
        Self
    }

    pub fn import(&self, markup: &MarkupDocument) -> Result<ContentDocument, ImportError> {
        let root = markup.root();
        let root_name = root.name().unwrap_or_default();
        if root_name != "document" {
            return Err(ImportError::UnexpectedRoot(root_name.to_string()));
        }
        let version = root.get_attribute_value("version");
        if version != SUPPORTED_VERSION {
            return Err(ImportError::UnsupportedVersion(version.to_string()));
        }

        let mut document = ContentDocument {
            version: version.to_string(),
            ..Default::default()
        };
        let mut has_title = false;

        for child in root.child_elements() {
            match child.name().unwrap_or_default() {
                "title" => {
                    document.title = child.inner_text().trim().to_string();
                    has_title = true;
                }
                "subtitle" => document.subtitle = child.inner_text().trim().to_string(),
                "abstract" => document.abstract_text = child.inner_text().trim().to_string(),
                "keywords" => {
                    document.keywords = child
                        .inner_text()
                        .split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "contributors" => document.contributors = self.contributors(child)?,
                "variables" => document.variables = self.variables(child)?,
                "sections" => document.sections = self.sections(child)?,
                other => {
                    return Err(ImportError::UnknownElement {
                        name: other.to_string(),
                        parent: "document".to_string(),
                    });
                }
            }
        }

        if !has_title {
            return Err(ImportError::MissingMetadata("title".to_string()));
        }
        log::debug!(
            "Imported document '{}' with {} top-level sections",
            document.title,
            document.sections.len()
        );
        Ok(document)
    }

    fn contributors(&self, node: NodeRef<'_>) -> Result<Vec<String>, ImportError> {
        node.child_elements()
            .map(|contributor| {
                expect_name(contributor, "contributor", "contributors")?;
                contributor
                    .first_element_with_name("name", false)
                    .map(|name| name.inner_text().trim().to_string())
                    .ok_or_else(|| ImportError::MissingMetadata("contributor name".to_string()))
            })
            .collect()
    }

    fn variables(&self, node: NodeRef<'_>) -> Result<Vec<Variable>, ImportError> {
        node.child_elements()
            .map(|variable| {
                expect_name(variable, "variable", "variables")?;
                let name = required_attribute(variable, "name")?;
                let value = if variable.has_attribute("value") {
                    variable.get_attribute_value("value").to_string()
                } else {
                    variable.inner_text().trim().to_string()
                };
                Ok(Variable { name, value })
            })
            .collect()
    }

    fn sections(&self, node: NodeRef<'_>) -> Result<Vec<ContentElement>, ImportError> {
        node.child_elements()
            .map(|section| {
                expect_name(section, "section", "sections")?;
                self.element(section)
            })
            .collect()
    }

    /// Converts one markup element and everything below it.
    pub fn element(&self, node: NodeRef<'_>) -> Result<ContentElement, ImportError> {
        let kind = kind_for(node)?;
        let skip_blank_text = kind.holds_blocks();
        let mut element = ContentElement::new(kind)
            .with_id(node.get_attribute_value("id"))
            .with_class(node.get_attribute_value("class"))
            .with_style(node.get_attribute_value("style"));

        for child in node.subelements() {
            match child.kind() {
                NodeKind::Element(_) => element.subelements.push(self.element(child)?),
                NodeKind::Text(text) => {
                    if text.is_empty() || (skip_blank_text && text.trim().is_empty()) {
                        continue;
                    }
                    element.subelements.push(ContentElement::text(text.as_str()));
                }
                NodeKind::Comment(_) => {}
            }
        }
        Ok(element)
    }
}

fn expect_name(node: NodeRef<'_>, expected: &str, parent: &str) -> Result<(), ImportError> {
    let name = node.name().unwrap_or_default();
    if name == expected {
        Ok(())
    } else {
        Err(ImportError::UnknownElement {
            name: name.to_string(),
            parent: parent.to_string(),
        })
    }
}

fn required_attribute(node: NodeRef<'_>, attribute: &str) -> Result<String, ImportError> {
    let value = node.get_attribute_value(attribute);
    if value.is_empty() {
        return Err(ImportError::MissingAttribute {
            element: node.name().unwrap_or_default().to_string(),
            attribute: attribute.to_string(),
        });
    }
    Ok(value.to_string())
}

fn bool_attribute(node: NodeRef<'_>, attribute: &str) -> Result<bool, ImportError> {
    match node.get_attribute_value(attribute) {
        "" | "false" => Ok(false),
        "true" => Ok(true),
        other => Err(ImportError::InvalidAttribute {
            element: node.name().unwrap_or_default().to_string(),
            attribute: attribute.to_string(),
            value: other.to_string(),
        }),
    }
}

/// `heading1`..`heading9` and `h1`..`h9`.
fn heading_level(name: &str) -> Option<u8> {
    let digits = name.strip_prefix("heading").or_else(|| name.strip_prefix('h'))?;
    match digits.as_bytes() {
        [d @ b'1'..=b'9'] => Some(d - b'0'),
        _ => None,
    }
}

fn kind_for(node: NodeRef<'_>) -> Result<ContentKind, ImportError> {
    let name = node.name().unwrap_or_default();
    let kind = match name {
        "section" => ContentKind::Section {
            exclude: bool_attribute(node, "exclude")?,
        },
        "division" | "div" => ContentKind::Division,
        "paragraph" | "p" => ContentKind::Paragraph,
        "bold" | "b" => ContentKind::Bold,
        "italic" | "i" => ContentKind::Italic,
        "underline" | "u" => ContentKind::Underline,
        "strikethrough" | "s" => ContentKind::Strikethrough,
        "hyperlink" | "a" => {
            let url = if node.has_attribute("url") {
                required_attribute(node, "url")?
            } else {
                required_attribute(node, "href")?
            };
            ContentKind::Hyperlink {
                url,
                title: node.get_attribute_value("title").to_string(),
            }
        }
        "variable" | "var" => ContentKind::Variable {
            name: required_attribute(node, "name")?,
        },
        "page-number" => ContentKind::PageNumber,
        "line-break" | "br" => ContentKind::LineBreak,
        "page-break" => ContentKind::PageBreak,
        "definition-list" | "dl" => ContentKind::DefinitionList,
        "definition-list-term" | "dt" => ContentKind::DefinitionListTerm,
        "definition-list-definition" | "dd" => ContentKind::DefinitionListDefinition,
        other => match heading_level(other) {
            Some(level) => ContentKind::Heading { level },
            None => {
                let parent = node
                    .parent()
                    .and_then(|p| p.name())
                    .unwrap_or_default()
                    .to_string();
                return Err(ImportError::UnknownElement {
                    name: other.to_string(),
                    parent,
                });
            }
        },
    };
    log::trace!("Imported <{}> as {}", name, kind.label());
    Ok(kind)
}
