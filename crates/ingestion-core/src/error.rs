//! Error types for model ingestion

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    // Request errors
    #[error("{0}")]
    ValidationRejected(String),

    #[error("Invalid footprint: {0}")]
    MalformedGeometry(String),

    // Downstream service errors
    #[error("there is a problem with catalog")]
    CatalogUnavailable { cause: String },

    #[error("store-trigger service is not available")]
    TriggerUnavailable { cause: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("{0}")]
    Internal(String),
}

impl IngestError {
    pub fn catalog(cause: impl Into<String>) -> Self {
        Self::CatalogUnavailable { cause: cause.into() }
    }

    pub fn trigger(cause: impl Into<String>) -> Self {
        Self::TriggerUnavailable { cause: cause.into() }
    }

    /// True for errors caused by the caller's input (400-class).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationRejected(_) | Self::MalformedGeometry(_))
    }

    /// Operator-facing detail that must not be returned to callers.
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::CatalogUnavailable { cause } | Self::TriggerUnavailable { cause } => Some(cause),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("IO error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
