//! Error types for fcd core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-facing hints.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for fcd operations.
pub type Result<T> = std::result::Result<T, FcdError>;

/// Core error type for fcd operations.
#[derive(Debug, Error)]
pub enum FcdError {
    /// Mnemonic file could not be located or read
    #[error("Mnemonic error: {0}")]
    KeyDerivationInput(String),

    /// Container shorter than one cipher block
    #[error("Ciphertext too short: missing {expected}-byte initialization vector")]
    ShortIvRead { expected: usize },

    /// Cipher rejected the key or IV length
    #[error("Cipher error: {0}")]
    CipherConstruction(String),

    /// Decompressor rejected the deciphered stream (wrong key or corrupt data)
    #[error("Decompression failed (wrong mnemonic/secret or corrupted file): {source}")]
    CompressionFormat {
        #[source]
        source: io::Error,
    },

    /// Output path already exists
    #[error("Target file '{}' already exists", .0.display())]
    TargetExists(PathBuf),

    /// Input path does not exist
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tar entry rejected or malformed
    #[error("Archive error: {0}")]
    Archive(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl FcdError {
    /// Classify an error raised while reading through the decompressor.
    ///
    /// flate2 reports header, deflate and checksum failures as `InvalidInput`
    /// or `InvalidData`, and a stream cut short as `UnexpectedEof`.
    pub(crate) fn from_decompress(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof => FcdError::CompressionFormat { source: err },
            _ => FcdError::Io { source: err },
        }
    }

    /// True when the error most likely means the key was wrong.
    pub fn is_wrong_key(&self) -> bool {
        matches!(self, FcdError::CompressionFormat { .. })
    }
}
