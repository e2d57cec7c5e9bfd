//! Mnemonic file lookup and key sourcing.
//!
//! A mnemonic is referenced by a path or a bare name. Lookup order:
//! 1. the reference as given (trimmed)
//! 2. the reference with `~` and `$VAR` expanded
//! 3. the expanded reference under the mnemonic directory (`~/.mnemonic`)

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{derive_key, DerivedKey};
use crate::error::{FcdError, Result};
use crate::path::{expand, exists};

/// Default directory searched for bare mnemonic names.
pub const DEFAULT_MNEMONIC_DIR: &str = "~/.mnemonic";

/// Locate a mnemonic file.
///
/// # Errors
///
/// Returns `FcdError::KeyDerivationInput` if no candidate exists.
pub fn locate(reference: &str, mnemonic_dir: &Path) -> Result<PathBuf> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(FcdError::KeyDerivationInput(
            "No mnemonic file specified".to_string(),
        ));
    }

    let literal = PathBuf::from(trimmed);
    if exists(&literal) {
        return Ok(literal);
    }

    let expanded = expand(trimmed)?;
    if exists(&expanded) {
        return Ok(expanded);
    }

    let relative = expanded.strip_prefix("/").unwrap_or(&expanded);
    let in_dir = mnemonic_dir.join(relative);
    if exists(&in_dir) {
        return Ok(in_dir);
    }

    Err(FcdError::KeyDerivationInput(format!(
        "Mnemonic file '{}' not found (also looked in {})",
        trimmed,
        mnemonic_dir.display()
    )))
}

/// Read a mnemonic file's phrase.
pub fn read_phrase(path: &Path) -> Result<Zeroizing<String>> {
    std::fs::read_to_string(path)
        .map(Zeroizing::new)
        .map_err(|e| {
            FcdError::KeyDerivationInput(format!(
                "Error reading mnemonic file '{}': {}",
                path.display(),
                e
            ))
        })
}

/// Everything needed to derive a file key: mnemonic reference and secret.
pub struct KeySource {
    mnemonic: String,
    secret: Zeroizing<String>,
    mnemonic_dir: Option<PathBuf>,
}

impl KeySource {
    /// Create a key source using the default mnemonic directory.
    pub fn new(mnemonic: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            secret: Zeroizing::new(secret.into()),
            mnemonic_dir: None,
        }
    }

    /// Override the directory searched for bare mnemonic names.
    pub fn with_mnemonic_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mnemonic_dir = Some(dir.into());
        self
    }

    fn resolved_dir(&self) -> Result<PathBuf> {
        match &self.mnemonic_dir {
            Some(dir) => expand(&dir.to_string_lossy()),
            None => expand(DEFAULT_MNEMONIC_DIR),
        }
    }

    /// Locate and read the mnemonic, then derive the key.
    pub fn derive(&self) -> Result<DerivedKey> {
        let dir = self.resolved_dir()?;
        let path = locate(&self.mnemonic, &dir)?;
        debug!(mnemonic = %path.display(), "using mnemonic file");

        let phrase = read_phrase(&path)?;
        Ok(derive_key(&phrase, &self.secret))
    }
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySource")
            .field("mnemonic", &self.mnemonic)
            .field("secret", &"[REDACTED]")
            .field("mnemonic_dir", &self.mnemonic_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const PHRASE: &str =
        "xray sierra golf romeo topaz alpha papa quebec delta echo victor yankee";

    #[test]
    fn test_locate_literal_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("words.txt");
        fs::write(&file, PHRASE).unwrap();

        let found = locate(&format!("  {}\n", file.display()), Path::new("/nonexistent")).unwrap();
        assert_eq!(found, file);
    }

    #[test]
    fn test_locate_falls_back_to_mnemonic_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("personal"), PHRASE).unwrap();

        let found = locate("personal", dir.path()).unwrap();
        assert_eq!(found, dir.path().join("personal"));
    }

    #[test]
    fn test_locate_missing_is_key_input_error() {
        let dir = tempdir().unwrap();
        let result = locate("nope", dir.path());
        assert!(matches!(result, Err(FcdError::KeyDerivationInput(_))));
    }

    #[test]
    fn test_locate_empty_reference() {
        let dir = tempdir().unwrap();
        let result = locate("   ", dir.path());
        assert!(matches!(result, Err(FcdError::KeyDerivationInput(_))));
    }

    #[test]
    fn test_key_source_matches_direct_derivation() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("personal"), format!("{}\r\n", PHRASE)).unwrap();

        let source = KeySource::new("personal", " secret ").with_mnemonic_dir(dir.path());
        let key = source.derive().unwrap();

        assert_eq!(key.as_bytes(), derive_key(PHRASE, "secret").as_bytes());
    }

    #[test]
    fn test_key_source_debug_redacts_secret() {
        let source = KeySource::new("personal", "hunter2-very-secret");
        let output = format!("{:?}", source);
        assert!(output.contains("REDACTED"));
        assert!(!output.contains("hunter2"));
    }
}
