//! Filesystem utilities for atomic, no-clobber output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use crate::error::{FcdError, Result};
use crate::path::exists;

/// Create `target` by streaming into a temp file beside it, then linking the
/// temp file into place without replacing anything.
///
/// The target never appears half-written: if `fill` fails, the temp file is
/// removed and the target is left untouched. If something else creates the
/// target meanwhile, the result is still `FcdError::TargetExists`.
///
/// # Errors
///
/// Returns `FcdError::TargetExists` if the target exists before or at the
/// moment of persisting, or whatever `fill` returns.
pub fn write_new<T, F>(target: &Path, fill: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T>,
{
    if exists(target) {
        return Err(FcdError::TargetExists(target.to_path_buf()));
    }

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = Builder::new()
        .prefix(".fcd-")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    debug!(temp = %temp.path().display(), target = %target.display(), "staging output");

    let value = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let value = fill(&mut writer)?;
        writer.flush()?;
        value
    };
    temp.as_file().sync_all()?;

    temp.persist_noclobber(target).map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            FcdError::TargetExists(target.to_path_buf())
        } else {
            FcdError::Io { source: e.error }
        }
    })?;

    Ok(value)
}
