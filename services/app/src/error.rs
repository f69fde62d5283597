//! services/app/src/error.rs
//!
//! Defines the primary error type for the entire application service.

use crate::config::ConfigError;
use eduvista_core::ports::StoreError;

/// The primary error type for the `app` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the core store layer.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
