//! File-level encrypt and decrypt.
//!
//! These wrap the stream pipeline with the policy around it: path expansion,
//! the existence checks, key derivation from a [`KeySource`], and no-clobber
//! output through [`crate::fs::write_new`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::crypto::{self, DerivedKey};
use crate::error::{FcdError, Result};
use crate::fs::write_new;
use crate::mnemonic::KeySource;
use crate::path::expand;

/// Suffix appended to encrypted files when no target is given.
pub const DEFAULT_ENCRYPTED_SUFFIX: &str = ".encrypted";

/// Outcome of a file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Plaintext bytes processed
    pub bytes: u64,
}

/// `<source><suffix>`, e.g. `notes.txt.encrypted`.
pub fn default_encrypted_target(source: &Path, suffix: &str) -> PathBuf {
    let mut target = source.as_os_str().to_owned();
    target.push(suffix);
    PathBuf::from(target)
}

/// `source` with `suffix` removed.
///
/// # Errors
///
/// Returns `FcdError::InvalidInput` if `source` does not end with `suffix`
/// or nothing would be left after removing it.
pub fn default_decrypted_target(source: &Path, suffix: &str) -> Result<PathBuf> {
    let name = source.to_string_lossy();
    match name.strip_suffix(suffix) {
        Some(stripped) if !suffix.is_empty() && !stripped.is_empty() => {
            Ok(PathBuf::from(stripped))
        }
        _ => Err(FcdError::InvalidInput(format!(
            "Cannot infer a target for '{}' (expected a '{}' suffix); specify one",
            name, suffix
        ))),
    }
}

/// Encrypt `source` into a new file at `target`.
pub fn encrypt_file(source: &str, target: &str, keys: &KeySource) -> Result<FileReport> {
    let (source, target) = resolve_paths(source, target)?;
    let key = keys.derive()?;
    let bytes = encrypt_path(&key, &source, &target)?;

    info!(source = %source.display(), target = %target.display(), bytes, "encrypted file");
    Ok(FileReport {
        source,
        target,
        bytes,
    })
}

/// Decrypt `source` into a new file at `target`.
pub fn decrypt_file(source: &str, target: &str, keys: &KeySource) -> Result<FileReport> {
    let (source, target) = resolve_paths(source, target)?;
    let key = keys.derive()?;
    let bytes = decrypt_path(&key, &source, &target)?;

    info!(source = %source.display(), target = %target.display(), bytes, "decrypted file");
    Ok(FileReport {
        source,
        target,
        bytes,
    })
}

/// Encrypt one already-resolved path with an already-derived key.
pub fn encrypt_path(key: &DerivedKey, source: &Path, target: &Path) -> Result<u64> {
    let input = open_source(source)?;
    write_new(target, |out| crypto::encrypt(key, BufReader::new(input), out))
}

/// Decrypt one already-resolved path with an already-derived key.
pub fn decrypt_path(key: &DerivedKey, source: &Path, target: &Path) -> Result<u64> {
    let input = open_source(source)?;
    write_new(target, |out| crypto::decrypt(key, BufReader::new(input), out))
}

fn resolve_paths(source: &str, target: &str) -> Result<(PathBuf, PathBuf)> {
    let source = expand(source)?;
    let target = expand(target)?;
    if source == target {
        return Err(FcdError::InvalidInput(
            "Source and target must be different files".to_string(),
        ));
    }
    Ok((source, target))
}

fn open_source(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(FcdError::NotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_encrypted_target() {
        let target = default_encrypted_target(Path::new("/data/notes.txt"), ".encrypted");
        assert_eq!(target, PathBuf::from("/data/notes.txt.encrypted"));
    }

    #[test]
    fn test_default_decrypted_target() {
        let target =
            default_decrypted_target(Path::new("/data/notes.txt.encrypted"), ".encrypted")
                .unwrap();
        assert_eq!(target, PathBuf::from("/data/notes.txt"));
    }

    #[test]
    fn test_default_decrypted_target_requires_suffix() {
        let result = default_decrypted_target(Path::new("/data/notes.txt"), ".encrypted");
        assert!(matches!(result, Err(FcdError::InvalidInput(_))));

        let result = default_decrypted_target(Path::new(".encrypted"), ".encrypted");
        assert!(matches!(result, Err(FcdError::InvalidInput(_))));
    }

    #[test]
    fn test_same_source_and_target_rejected() {
        let result = resolve_paths("/tmp/a", "/tmp/a");
        assert!(matches!(result, Err(FcdError::InvalidInput(_))));
    }
}
