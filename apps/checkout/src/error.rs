//! # Application Error Type
//!
//! Unified error type for the checkout commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► Cli::parse ── bad flag ──► clap usage message, exit 2        │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  CheckoutConfig::load ── bad file / value ─────► AppError::Config (1)  │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  read menu / order ── I/O, JSON ───────────────► AppError::Read/Json   │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  core lookups ── unknown id, bad quantity ─────► AppError::Core        │
//! │                                                                         │
//! │  main: error!(...) on stderr, exit 1                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thaifood_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the checkout binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Input file is not the expected JSON shape.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Domain error from thaifood-core.
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(CoreError::Validation(err))
    }
}

/// Result type for checkout operations.
pub type AppResult<T> = Result<T, AppError>;
