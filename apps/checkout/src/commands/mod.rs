//! Checkout commands.
//!
//! Each command takes already-read JSON text so it can be exercised without
//! touching the file system; [`read_input`] does the reading.

pub mod menu;
pub mod receipt;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AppError, AppResult};

/// Reads an input file into memory.
pub fn read_input(path: &Path) -> AppResult<String> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "Input read");
    Ok(text)
}
