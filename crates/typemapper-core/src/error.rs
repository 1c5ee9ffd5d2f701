//! Error types for the typemapper core library
//!
//! Mapping itself never fails: unresolvable converters degrade to passthrough
//! and unparsable input degrades to sentinel values. The errors here cover the
//! surrounding surface only, i.e. reading schema documents and option files.

use thiserror::Error;

/// Main error type for typemapper operations
#[derive(Error, Debug)]
pub enum Error {
    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(source);
        assert!(err.to_string().starts_with("JSON error: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
