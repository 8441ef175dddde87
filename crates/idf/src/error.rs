use thiserror::Error;

/// Validation failures raised while turning markup into content elements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Expected root element `document`, found `{0}`")]
    UnexpectedRoot(String),

    #[error("Unsupported document version '{0}', expected '0.1'")]
    UnsupportedVersion(String),

    #[error("Missing required metadata `{0}`")]
    MissingMetadata(String),

    #[error("Unknown element `{name}` inside `{parent}`")]
    UnknownElement { name: String, parent: String },

    #[error("Element `{element}` requires attribute `{attribute}`")]
    MissingAttribute { element: String, attribute: String },

    #[error("Invalid value '{value}' for attribute `{attribute}` on `{element}`")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
}
