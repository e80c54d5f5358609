use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to any other error
    /// category in this enum.
    ///
    /// In particular this means that use of Internal is never a guarantee
    /// the error is not, for example due to a user error - merely that it
    /// cannot be confidently determined by the code.
    Internal,

    /// The user provided invalid input (a damaged artifact, the wrong
    /// passphrase, a payload too large for a symbol) or asked for something
    /// impossible to complete.
    User,
}

/// Fine-grained condition flags for consumers that want to branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The compressed stream is malformed (premature end, invalid codes).
    CorruptStream,
    /// The derived key material is shorter than the cipher requires.
    KeyDerivation,
    /// The random source could not produce a nonce.
    RandomSource,
    /// The sealed blob is shorter than the nonce it must start with.
    ShortCiphertext,
    /// Authentication failed due to an incorrect passphrase or tampering
    /// or corruption.
    AuthenticationFailed,
    /// The text is not valid standard base64.
    Encoding,
    /// The symbol encoder rejected the payload as exceeding its capacity.
    PayloadTooLarge,
    /// Passphrase could not be obtained from the configured reader.
    PassphraseUnavailable,
    /// Interaction with the filesystem, stdin/stdout, or other I/O failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct QrsealError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Optional specific condition tag for consumers that need to
    /// branch their behavior. Any code consuming errors MUST handle
    /// the absence of a defined kind.
    pub kind: Option<ErrorKind>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl QrsealError {
    /// Creates a new error with a required category and display message.
    pub fn new(category: ErrorCategory, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: None,
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that also tags the failure with a kind.
    pub fn with_kind(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that retains the originating source error.
    pub fn with_source(
        category: ErrorCategory,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: None,
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Creates a new error that carries both a kind tag and the originating source error.
    pub fn with_kind_and_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    ///
    /// Category and kind carry over, so callers can keep branching on the
    /// innermost condition no matter how many layers added context.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, QrsealError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_with_context_preserves_kind_and_category() {
        let inner = QrsealError::with_kind(
            ErrorCategory::User,
            ErrorKind::AuthenticationFailed,
            "authentication failed",
        );
        let outer = inner.with_context("failed to open sealed blob");

        assert_eq!(outer.category, ErrorCategory::User);
        assert_eq!(outer.kind, Some(ErrorKind::AuthenticationFailed));
        assert_eq!(outer.message(), "failed to open sealed blob");
        assert_eq!(
            outer.source_error().map(|e| e.to_string()),
            Some("authentication failed".to_string())
        );
    }

    #[test]
    fn test_source_is_retained() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = QrsealError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            "failed to read from input",
            io_err,
        );

        assert_eq!(err.to_string(), "failed to read from input");
        assert_eq!(err.source_error().unwrap().to_string(), "missing");
    }

    #[test]
    fn test_new_has_no_kind() {
        let err = QrsealError::new(ErrorCategory::Internal, "something odd");
        assert_eq!(err.kind, None);
        assert!(err.source_error().is_none());
    }
}
