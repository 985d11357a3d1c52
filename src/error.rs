//! Custom error types for arxiv-papers.
//!
//! All library functions return `Result<T, PapersError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for arxiv-papers operations.
#[derive(Debug, Error)]
pub enum PapersError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Atom feed or record could not be turned into a paper
    #[error("Parse error: {0}")]
    Parse(String),

    /// arXiv API answered with a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl PapersError {
    /// Whether the error came from talking to arXiv (as opposed to local configuration or I/O).
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            PapersError::Network(_) | PapersError::Api { .. } | PapersError::Parse(_)
        )
    }
}

/// Result type alias using `PapersError`
pub type Result<T> = std::result::Result<T, PapersError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| PapersError::Parse(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_or_parse() {
        let missing: Option<u8> = None;
        match missing.ok_or_parse("no value") {
            Err(PapersError::Parse(msg)) => assert_eq!(msg, "no value"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(Some(3).ok_or_parse("no value").ok(), Some(3));
    }

    #[test]
    fn test_is_remote() {
        assert!(PapersError::Parse("bad".into()).is_remote());
        assert!(PapersError::Api { code: 503, message: "busy".into() }.is_remote());
        assert!(!PapersError::Config("bad".into()).is_remote());
    }
}
