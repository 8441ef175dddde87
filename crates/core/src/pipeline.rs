//! The parse, import and resolve pipeline, and the builder that configures it.

use crate::error::PipelineError;
use crate::resolver::StyleResolver;
use graphe_idf::{ContentDocument, Importer};
use graphe_markup::{MarkupDocument, MarkupParser};
use graphe_style::{DeclarationParser, StyleSheet};
use std::fs;
use std::io;
use std::path::Path;

/// A builder for creating a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    style_sheet: Option<StyleSheet>,
    resolver: Option<StyleResolver>,
}

impl PipelineBuilder {
    /// Creates a builder with no style sheet and the default inline declaration parser.
    pub fn new() -> Self {
        Default::default()
    }

    /// Configures the pipeline with an already-built style sheet.
    pub fn with_style_sheet(mut self, sheet: StyleSheet) -> Self {
        self.style_sheet = Some(sheet);
        self
    }

    /// Configures the pipeline with a style sheet given as JSON text.
    pub fn with_style_json(mut self, json: &str) -> Result<Self, PipelineError> {
        let sheet: StyleSheet = serde_json::from_str(json)?;
        log::debug!("Loaded style sheet with {} rules", sheet.len());
        self.style_sheet = Some(sheet);
        Ok(self)
    }

    /// Configures the pipeline by loading a JSON style sheet from a file.
    pub fn with_style_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let extension = path_ref.extension().and_then(|s| s.to_str()).unwrap_or("");
        if !extension.eq_ignore_ascii_case("json") {
            return Err(PipelineError::Config(format!(
                "Unsupported style sheet '{}': expected a .json file",
                path_ref.display()
            )));
        }
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read style sheet from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.with_style_json(&source)
    }

    /// Replaces the parser used for inline `style` attributes.
    pub fn with_declaration_parser(mut self, declarations: impl DeclarationParser + 'static) -> Self {
        self.resolver = Some(StyleResolver::new(declarations));
        self
    }

    /// Consumes the builder and creates the [`Pipeline`]. Without a style
    /// sheet only inline styles and inheritance are applied.
    pub fn build(self) -> Pipeline {
        Pipeline {
            parser: MarkupParser::new(),
            importer: Importer::new(),
            style_sheet: self.style_sheet.unwrap_or_default(),
            resolver: self.resolver.unwrap_or_default(),
        }
    }
}

/// Turns markup source into a fully resolved [`ContentDocument`].
#[derive(Debug)]
pub struct Pipeline {
    parser: MarkupParser,
    importer: Importer,
    style_sheet: StyleSheet,
    resolver: StyleResolver,
}

impl Pipeline {
    pub fn style_sheet(&self) -> &StyleSheet {
        &self.style_sheet
    }

    pub fn parse(&self, source: &str) -> Result<MarkupDocument, PipelineError> {
        Ok(self.parser.parse_document(source)?)
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<MarkupDocument, PipelineError> {
        Ok(self.parser.parse_file(path)?)
    }

    pub fn import(&self, markup: &MarkupDocument) -> Result<ContentDocument, PipelineError> {
        Ok(self.importer.import(markup)?)
    }

    /// Applies the style sheet, inline styles and inheritance in place.
    pub fn resolve(&self, document: &mut ContentDocument) {
        self.resolver.resolve_document(&self.style_sheet, document);
    }

    /// Runs every stage on an already parsed markup document.
    pub fn process(&self, markup: &MarkupDocument) -> Result<ContentDocument, PipelineError> {
        let mut document = self.import(markup)?;
        log::debug!("Resolving styles with {} rules", self.style_sheet.len());
        self.resolve(&mut document);
        Ok(document)
    }

    /// Parses, imports and resolves `source`.
    pub fn compile(&self, source: &str) -> Result<ContentDocument, PipelineError> {
        let markup = self.parse(source)?;
        self.process(&markup)
    }

    pub fn compile_file<P: AsRef<Path>>(&self, path: P) -> Result<ContentDocument, PipelineError> {
        let markup = self.parse_file(path)?;
        self.process(&markup)
    }
}
