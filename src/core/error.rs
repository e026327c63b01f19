use thiserror::Error;

/// Failure of a core generation operation.
///
/// Raised only when an operation cannot produce a meaningful result from
/// its arguments, such as an empty syllable pool or a request to double a
/// letter in an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl NameError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
