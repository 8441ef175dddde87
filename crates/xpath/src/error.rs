use thiserror::Error;

/// Number of characters of source shown after the failure offset.
pub const CONTEXT_WINDOW: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XPathError {
    #[error("Unexpected input at offset {offset} in path expression: '{context}'")]
    UnexpectedInput { offset: usize, context: String },
}

impl XPathError {
    pub(crate) fn unexpected(input: &str, offset: usize) -> Self {
        let context = input
            .get(offset..)
            .unwrap_or("")
            .chars()
            .take(CONTEXT_WINDOW)
            .collect();
        XPathError::UnexpectedInput { offset, context }
    }
}
