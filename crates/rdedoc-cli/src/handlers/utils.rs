//! Shared utilities for command handlers

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Check that the source root exists and is a directory
pub fn require_source_dir(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        })
    }
}
