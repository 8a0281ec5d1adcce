//! Error types for kubecle

use thiserror::Error;

/// Main error type for kubecle
#[derive(Debug, Error)]
pub enum KcError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    ConfigLoad(String),

    #[error("Context not found: {0}")]
    ContextNotFound(String),

    #[error("Timeout waiting for {0}")]
    Timeout(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl KcError {
    /// HTTP status reported by the API server, if the failure came from one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            KcError::Kube(kube::Error::Api(status)) => Some(status.code),
            _ => None,
        }
    }

    /// Whether this is an optimistic-lock conflict (HTTP 409)
    pub fn is_conflict(&self) -> bool {
        self.upstream_status() == Some(409)
    }
}

impl From<serde_json::Error> for KcError {
    fn from(e: serde_json::Error) -> Self {
        KcError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for KcError {
    fn from(e: toml::de::Error) -> Self {
        KcError::Config(e.to_string())
    }
}

/// Result type alias for kubecle
pub type Result<T> = std::result::Result<T, KcError>;
