//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nbforge operations
#[derive(Debug, Error)]
pub enum Error {
    /// Notebook structure is not valid at the ingestion boundary
    #[error("Ingestion error: {message}")]
    Ingestion {
        message: String,
        path: Option<PathBuf>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport adapter errors (reported, never propagated past the adapter)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Enrichment adapter errors (recovered by keeping the heuristic result)
    #[error("Enrichment error: {0}")]
    Enrichment(String),

    /// Wrapped I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn ingestion(message: impl Into<String>) -> Self {
        Error::Ingestion {
            message: message.into(),
            path: None,
        }
    }

    pub fn ingestion_at(message: impl Into<String>, path: PathBuf) -> Self {
        Error::Ingestion {
            message: message.into(),
            path: Some(path),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
