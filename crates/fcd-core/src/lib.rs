//! # fcd Core
//!
//! Core library for fcd - mnemonic-keyed file encryption at rest.
//!
//! This crate provides key derivation, the compress-then-encipher stream
//! pipeline, and the file-level glue around it, independent of the CLI.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AES-256-CFB stream adapters, the pipeline
//! - **mnemonic**: mnemonic file lookup and key sourcing
//! - **file**: encrypt/decrypt whole files with no-clobber output
//! - **archive**: plain gzip and tar collaborators
//! - **path**: `~` and `$VAR` expansion
//! - **fs**: atomic, no-clobber output files

pub mod archive;
pub mod crypto;
pub mod error;
pub mod file;
pub mod fs;
pub mod mnemonic;
pub mod path;

pub use error::{FcdError, Result};
pub use file::{decrypt_file, encrypt_file, FileReport};
pub use mnemonic::KeySource;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
