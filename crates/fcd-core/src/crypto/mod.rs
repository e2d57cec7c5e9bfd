//! Cryptographic operations for fcd.
//!
//! This module provides key derivation and the file container transform:
//! - **BIP-39 seed + SHA-256**: mnemonic phrase and secret to a 32-byte key
//! - **AES-256-CFB**: stream cipher over the gzip-compressed plaintext
//!
//! ## Security Model
//!
//! - One key per (phrase, secret) pair; nothing but the IV is stored
//! - Fresh random IV per encryption
//! - Key material zeroized from memory on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Reading of encrypted files at rest without the phrase and secret
//!
//! We do NOT defend against:
//! - Tampering: there is no authentication tag, only the gzip framing
//! - Compromised OS / keylogger

pub mod key;
pub mod pipeline;
pub mod stream;

pub use key::{derive_key, normalize_phrase, DerivedKey, KEY_LENGTH};
pub use pipeline::{decrypt, encrypt, IV_LENGTH};
