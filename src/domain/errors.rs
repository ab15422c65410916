//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Content region never rendered within the configured bound.
    #[error("Extraction timed out after {seconds} seconds")]
    ExtractionTimeout { seconds: u64 },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Transport asked us to back off. Not retried; the next scheduled run is the retry.
    #[error("Delivery rate limited: retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Coarse error taxonomy reported to the scheduler log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Extraction,
    Format,
    Delivery,
    Unsupported,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Config(_) => ErrorKind::Configuration,
            DomainError::Extraction(_) | DomainError::ExtractionTimeout { .. } => {
                ErrorKind::Extraction
            }
            DomainError::Format(_) => ErrorKind::Format,
            DomainError::Delivery(_) | DomainError::RateLimited { .. } => ErrorKind::Delivery,
            DomainError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}
