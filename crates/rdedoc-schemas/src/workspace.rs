//! Transient working directory
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::documentation::error::{PublishError, PublishResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory that exists for the lifetime of the guard.
///
/// Removal on drop is best effort and happens whether or not the build
/// succeeded.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    keep: bool,
}

impl WorkDir {
    /// Create the directory (and parents) if absent
    pub fn create(path: impl Into<PathBuf>) -> PublishResult<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path).map_err(|e| PublishError::io_error(path.clone(), e))?;
        debug!(dir = %path.display(), "Working directory ready");
        Ok(Self { path, keep: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leave the directory in place when dropped
    pub fn keep(&mut self, keep: bool) {
        self.keep = keep;
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.keep {
            debug!(dir = %self.path.display(), "Keeping working directory");
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(dir = %self.path.display(), "Working directory removed"),
            Err(e) => warn!(dir = %self.path.display(), error = %e, "Failed to remove working directory"),
        }
    }
}
