//! Error types for query synthesis

use thiserror::Error;

/// Main error type for the synthesis engine
///
/// Expression building and classification are total functions and never
/// fail; errors here are programmer errors (unknown visualization kind)
/// or configuration problems surfaced at load time.
#[derive(Error, Debug)]
pub enum Error {
    /// Visualization kind outside the closed five-way set
    #[error("unsupported visualization kind: {0}")]
    UnsupportedKind(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for synthesis operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_display() {
        let err = Error::UnsupportedKind("piechart".to_string());
        let display = format!("{}", err);
        assert!(display.contains("piechart"));
        assert!(display.contains("unsupported"));
    }

    #[test]
    fn test_configuration_display() {
        let err = Error::Configuration("empty allow-list entry".to_string());
        assert!(format!("{}", err).contains("Configuration error"));
    }
}
