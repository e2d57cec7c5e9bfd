//! Minimal tar packing and unpacking of a file or directory tree.
//!
//! Only regular files and directories are extracted; other entry types are
//! skipped with a warning.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use tar::{Archive, Builder, EntryType};
use tracing::{info, warn};

use crate::error::{FcdError, Result};
use crate::fs::write_new;
use crate::path::{exists, expand};

/// Pack `source` into `<target_dir>/<name>.tar`.
///
/// A directory is stored under its own base name, so unpacking recreates it.
pub fn tar_path(source: &str, target_dir: &str) -> Result<PathBuf> {
    let source = expand(source)?;
    let target_dir = expand(target_dir)?;
    if !exists(&source) {
        return Err(FcdError::NotFound(source));
    }
    let name = source
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| FcdError::InvalidInput(format!("No name in '{}'", source.display())))?;

    if lands_inside(&source, &target_dir)? {
        return Err(FcdError::InvalidInput(
            "Tarball cannot be written inside the directory being archived".to_string(),
        ));
    }
    let target = target_dir.join(format!("{}.tar", name.display()));

    write_new(&target, |out| {
        let mut builder = Builder::new(out);
        builder.follow_symlinks(false);
        if source.is_dir() {
            builder.append_dir_all(&name, &source)?;
        } else {
            builder.append_path_with_name(&source, &name)?;
        }
        builder.finish()?;
        Ok(())
    })?;

    info!(source = %source.display(), target = %target.display(), "created tarball");
    Ok(target)
}

/// Unpack `tarball` into `target_dir`, returning the number of entries written.
///
/// # Errors
///
/// - `FcdError::Archive` for entries with absolute paths or `..` components
/// - `FcdError::TargetExists` if a file to be extracted already exists
pub fn untar(tarball: &str, target_dir: &str) -> Result<usize> {
    let tarball = expand(tarball)?;
    let target_dir = expand(target_dir)?;
    if !tarball.is_file() {
        return Err(FcdError::NotFound(tarball));
    }
    fs::create_dir_all(&target_dir)?;

    let mut archive = Archive::new(BufReader::new(File::open(&tarball)?));
    let mut written = 0usize;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let relative = safe_relative(&entry.path()?)?;
        let dest = target_dir.join(&relative);

        match entry.header().entry_type() {
            EntryType::Directory => {
                fs::create_dir_all(&dest)?;
            }
            EntryType::Regular | EntryType::Continuous => {
                // Directory entries are not guaranteed to precede their files
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut file = OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&dest)
                    .map_err(|e| match e.kind() {
                        io::ErrorKind::AlreadyExists => FcdError::TargetExists(dest.clone()),
                        _ => FcdError::from(e),
                    })?;
                io::copy(&mut entry, &mut file)?;
                apply_mode(&file, entry.header().mode().ok())?;
            }
            other => {
                warn!(entry = %relative.display(), kind = ?other, "skipping unsupported tar entry");
                continue;
            }
        }
        written += 1;
    }

    info!(tarball = %tarball.display(), target = %target_dir.display(), entries = written, "extracted tarball");
    Ok(written)
}

/// Whether `target_dir` is `source` or below it, once `.`, `..` and
/// symlinks are resolved on both sides.
fn lands_inside(source: &Path, target_dir: &Path) -> Result<bool> {
    let source = fs::canonicalize(source)?;
    let target_dir = fs::canonicalize(target_dir)
        .map_err(|_| FcdError::NotFound(target_dir.to_path_buf()))?;
    Ok(target_dir.starts_with(&source))
}

/// Keep only normal components; reject anything that could escape.
fn safe_relative(path: &Path) -> Result<PathBuf> {
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FcdError::Archive(format!(
                    "Refusing tar entry outside the target directory: {}",
                    path.display()
                )))
            }
        }
    }
    if clean.as_os_str().is_empty() {
        return Err(FcdError::Archive("Tar entry with empty path".to_string()));
    }
    Ok(clean)
}

#[cfg(unix)]
fn apply_mode(file: &File, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        file.set_permissions(fs::Permissions::from_mode(mode & 0o777))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_file: &File, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
