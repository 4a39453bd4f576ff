use thiserror::Error;

/// Main error type for Orgviz
#[derive(Error, Debug)]
pub enum OrgvizError {
    /// HTTP transport errors from the REST describe API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode errors (describe payloads, fixture files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema provider errors (non-2xx describe responses, bad fixtures)
    #[error("Schema provider error: {0}")]
    Provider(String),

    /// Object not known to the provider
    #[error("Object not found: {0}")]
    ObjectNotFound(String),
}

/// Convenient Result type using OrgvizError
pub type Result<T> = std::result::Result<T, OrgvizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OrgvizError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_object_not_found_display() {
        let err = OrgvizError::ObjectNotFound("Account".to_string());
        assert_eq!(err.to_string(), "Object not found: Account");
    }
}
