//! Writing export text to disk.
//!
//! The text itself comes from `ChoiceLog::export_text`; this module only
//! owns the filesystem effect and its failure mode.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Write `contents` to `path`, replacing any existing file.
///
/// A leading `~/` is expanded to the home directory. Failures are
/// reported once as [`Error::Io`]; nothing is retried.
pub fn write_export(path: &Path, contents: &str) -> Result<PathBuf> {
    let path = expand_home(path);
    match fs::write(&path, contents) {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = contents.len(), "export written");
            Ok(path)
        }
        Err(source) => {
            tracing::warn!(path = %path.display(), error = %source, "export failed");
            Err(Error::Io { path, source })
        }
    }
}

/// Expand a leading `~/` using the platform home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
