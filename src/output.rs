//! Rendering of pipeline results for the command line.

use graphe_core::{Pipeline, PipelineError};
use graphe_markup::{MarkupDocument, MarkupWriter};
use graphe_xpath::{PathItem, PathQuery};
use itertools::Itertools;

/// What the command line writes for a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// The parsed markup, serialized again.
    Markup,
    /// The imported content with resolved styles, as JSON.
    #[default]
    Json,
}

pub fn render(pipeline: &Pipeline, markup: &MarkupDocument, format: OutputFormat) -> Result<String, PipelineError> {
    match format {
        OutputFormat::Markup => Ok(MarkupWriter::new().write_document(markup)?),
        OutputFormat::Json => {
            let document = pipeline.process(markup)?;
            Ok(serde_json::to_string_pretty(&document)?)
        }
    }
}

/// One line per item: `<name> text` for elements, `@name="value"` for attributes.
pub fn describe(item: &PathItem<'_>) -> String {
    match item {
        PathItem::Element(node) => format!("<{}> {}", node.name().unwrap_or_default(), node.inner_text()),
        PathItem::Attribute(attribute) => format!("@{}=\"{}\"", attribute.name, attribute.value),
    }
}

/// Runs `path` from the document root and describes every result.
pub fn query(markup: &MarkupDocument, path: &str) -> Result<String, PipelineError> {
    let items = markup.find(path)?;
    log::debug!("Query '{}' matched {} items", path, items.len());
    Ok(items.iter().map(describe).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphe_core::PipelineBuilder;

    const SOURCE: &str = r#"<?xml version="1.0"?><document version="0.1"><title>T</title><sections><section id="s"><p>Hi</p></section></sections></document>"#;

    #[test]
    fn test_query_output() {
        let markup: MarkupDocument = SOURCE.parse().unwrap();
        assert_eq!(query(&markup, "/document/title").unwrap(), "<title> T");
        assert_eq!(query(&markup, "//section@id").unwrap(), "@id=\"s\"");
        assert_eq!(query(&markup, "//missing").unwrap(), "");
        assert!(matches!(query(&markup, "///"), Err(PipelineError::XPath(_))));
    }

    #[test]
    fn test_render_formats() {
        let pipeline = PipelineBuilder::new().build();
        let markup: MarkupDocument = SOURCE.parse().unwrap();
        let text = render(&pipeline, &markup, OutputFormat::Markup).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" ?>\n<document version=\"0.1\">"));

        let json = render(&pipeline, &markup, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "T");
        assert_eq!(value["sections"][0]["kind"], "section");
        assert_eq!(value["sections"][0]["id"], "s");
    }
}
