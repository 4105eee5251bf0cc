//! Error types for ctistream

/// Result type alias using ctistream's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ctistream operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Collection errors that escape the collector (not per-message/per-channel)
    #[error("collector error: {0}")]
    Collector(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// No persisted model and bootstrap training cannot proceed
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Evidence source errors
    #[error("evidence error: {0}")]
    Evidence(String),

    /// Report stage errors
    #[error("report error: {0}")]
    Report(String),

    /// Configuration errors (missing credentials, malformed config)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new collector error
    pub fn collector(msg: impl Into<String>) -> Self {
        Self::Collector(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new evidence error
    pub fn evidence(msg: impl Into<String>) -> Self {
        Self::Evidence(msg.into())
    }

    /// Create a new report error
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
