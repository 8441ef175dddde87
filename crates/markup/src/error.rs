use thiserror::Error;

/// Errors raised while reading, building or writing a markup document.
///
/// Parse errors are fatal: the parser never hands back a partial tree.
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("Expected XML declaration")]
    MissingDeclaration,

    #[error("Expected closing bracket `?>` at offset {0}")]
    UnclosedDeclaration(usize),

    #[error("Expected root element at offset {0}")]
    MissingRoot(usize),

    #[error("Expected closing bracket `>` for element `<{name}>` at offset {offset}")]
    UnclosedStartTag { name: String, offset: usize },

    #[error("Expected closing XML tag `</{name}>` at offset {offset}")]
    ExpectedClosingTag { name: String, offset: usize },

    #[error("Expected a quoted value for attribute `{name}` at offset {offset}")]
    UnquotedAttribute { name: String, offset: usize },

    #[error("Unterminated value for attribute `{name}` starting at offset {offset}")]
    UnterminatedAttribute { name: String, offset: usize },

    #[error("Elements nested deeper than {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },

    #[error("Unterminated comment starting at offset {0}")]
    UnterminatedComment(usize),

    #[error("XML comments cannot contain '--': {0:?}")]
    InvalidComment(String),

    #[error("Node {0} cannot hold subelements")]
    NotAnElement(usize),

    #[error("Node {0} already has a parent")]
    AlreadyAttached(usize),

    #[error("Node {child} cannot be attached below its own descendant {parent}")]
    CyclicAttachment { parent: usize, child: usize },

    #[error("Attaching node {child} would nest elements deeper than {limit} levels")]
    AttachTooDeep { child: usize, limit: usize },

    #[error("Attribute `{0}` holds both quote characters and cannot be written")]
    UnquotableAttribute(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
