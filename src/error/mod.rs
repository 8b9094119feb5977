//! Error handling for the HCC grouper.

/// Specialized error type for the grouper pipeline
#[derive(Debug, thiserror::Error)]
pub enum GrouperError {
    /// Malformed label, crosswalk, or hierarchy-rule artifact. Fatal: a
    /// single bad line invalidates the whole artifact.
    #[error("failed to parse {artifact}: {message}: `{content}`")]
    Parse {
        /// Name of the offending artifact
        artifact: String,
        /// What was wrong
        message: String,
        /// The offending line or token
        content: String,
    },

    /// Diagnosis extract has an unexpected column count or column names
    #[error("diagnosis extract schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Missing or unreadable artifact path, invalid threshold
    #[error("configuration error: {0}")]
    Config(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrouperError {
    /// Build a `Parse` error for the named artifact
    pub fn parse(
        artifact: impl Into<String>,
        message: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Parse {
            artifact: artifact.into(),
            message: message.into(),
            content: content.into(),
        }
    }
}

/// Result type for grouper operations
pub type Result<T> = std::result::Result<T, GrouperError>;
