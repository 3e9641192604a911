//! Error types for spellnav.

use thiserror::Error;

/// Main error type for spellcheck session operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An offset or range falls outside the document.
    #[error("invalid offset {offset} (document length {len})")]
    InvalidOffset { offset: usize, len: usize },

    /// The text checker failed for a chunk. The whole scan is aborted.
    #[error("checker failed: {message}")]
    Checker { message: String },

    /// The document refused an edit on purpose.
    #[error("operation rejected: {reason}")]
    OperationRejected { reason: String },

    /// A caller-supplied argument does not have the expected shape.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// An operation needs the current match but the session has none.
    #[error("no current word in the spellcheck session")]
    NoCurrentWord,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid ignore pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Returns true if the error is a deliberate refusal rather than a failure.
    ///
    /// Hosts present rejections as a normal "nothing happened" outcome.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::OperationRejected { .. })
    }

    pub fn checker(message: impl Into<String>) -> Self {
        Error::Checker {
            message: message.into(),
        }
    }

    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using spellnav's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        let rejected = Error::OperationRejected {
            reason: "read-only".to_string(),
        };
        assert!(rejected.is_rejection());
        assert!(!Error::NoCurrentWord.is_rejection());
        assert!(!Error::checker("boom").is_rejection());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidOffset { offset: 12, len: 10 };
        assert_eq!(err.to_string(), "invalid offset 12 (document length 10)");

        let err = Error::invalid_argument("ignoredWords", "expected an object");
        assert_eq!(
            err.to_string(),
            "invalid argument 'ignoredWords': expected an object"
        );
    }
}
