//! Error types for cardiorisk

/// Result type alias using cardiorisk's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cardiorisk operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The provider is running on the stub classifier
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Incoming patient record is missing a field or has a non-numeric value
    #[error("{0}")]
    Validation(String),

    /// The loaded classifier failed or produced unusable output
    #[error("{0}")]
    Inference(String),

    /// Model artifact could not be parsed or failed validation
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Short machine-readable kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::Validation(_) => "validation",
            Self::Inference(_) => "inference",
            Self::Artifact(_) => "artifact",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = Error::validation("missing field `age`");
        assert_eq!(err.to_string(), "missing field `age`");
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert_eq!(err.kind(), "io");
        assert!(err.to_string().contains("gone"));
    }
}
