//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for moerank operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Dataset or snapshot documents that could not be decoded
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors (out-of-range scores, unknown ids)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session snapshot could not be stored or restored
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Wrap an I/O failure on a known path
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            message: source.to_string(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a parse error for a document at `path`
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_prefixes_message() {
        let err = Error::Validation("score 11 is out of range".into())
            .with_context("rating character 'alice'");
        assert_eq!(
            err.to_string(),
            "rating character 'alice': Validation error: score 11 is out of range"
        );
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = Error::parse("data/characters.json", "expected object");
        assert_eq!(
            err.to_string(),
            "Parse error in data/characters.json: expected object"
        );
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(Error::Persistence("disk full".into()));
        let err = result.context("saving session").unwrap_err();
        assert!(err.to_string().starts_with("saving session:"));
    }
}
