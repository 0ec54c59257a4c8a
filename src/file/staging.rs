//! On-disk staging for parsers that only accept a filesystem path.
//!
//! A `StagingFile` owns a uniquely named temporary file for the duration of a
//! single extraction call. The file is removed when the guard is dropped, on
//! every exit path; a failed removal is reported to the diagnostics sink and
//! otherwise ignored.

use crate::diagnostics::Diagnostics;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;

const STAGING_PREFIX: &str = "speedreader-";

pub struct StagingFile {
    path: PathBuf,
    temp: Option<TempPath>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl StagingFile {
    /// Write `bytes` to a fresh file in `dir`. The name carries a random
    /// component, so concurrent calls never collide.
    pub fn create(
        dir: &Path,
        suffix: &str,
        bytes: &[u8],
        diagnostics: Arc<dyn Diagnostics>,
    ) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let temp = file.into_temp_path();
        Ok(Self {
            path: temp.to_path_buf(),
            temp: Some(temp),
            diagnostics,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now instead of waiting for drop
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if let Some(temp) = self.temp.take() {
            if let Err(e) = temp.close() {
                self.diagnostics.error(
                    "staging",
                    &format!("Error cleaning up temp file {}: {}", self.path.display(), e),
                );
            }
        }
    }
}

impl std::fmt::Debug for StagingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingFile").field("path", &self.path).finish()
    }
}
