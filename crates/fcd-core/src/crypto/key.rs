//! Key derivation from a mnemonic phrase and a secret.
//!
//! The phrase is stretched into a BIP-39 seed (PBKDF2-HMAC-SHA512, 2048
//! rounds, salt `"mnemonic" + secret`) and the seed is hashed with SHA-256
//! into the 32-byte AES key. The phrase is never checked against a wordlist.

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256, Sha512};
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// Length of derived key in bytes (32 bytes = AES-256).
pub const KEY_LENGTH: usize = 32;

/// Length of the BIP-39 seed in bytes.
pub const SEED_LENGTH: usize = 64;

/// PBKDF2 rounds fixed by BIP-39.
const BIP39_ROUNDS: u32 = 2048;

/// Salt prefix fixed by BIP-39.
const BIP39_SALT_PREFIX: &str = "mnemonic";

/// A symmetric key derived from a mnemonic phrase and secret.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Normalize the whitespace of a mnemonic phrase.
///
/// Carriage returns and newlines are removed outright (not replaced), tabs
/// become spaces, and the remaining words are re-joined with single spaces.
///
/// # Examples
///
/// ```
/// use fcd_core::crypto::normalize_phrase;
///
/// assert_eq!(normalize_phrase("  word1\tword2\r\n"), "word1 word2");
/// ```
pub fn normalize_phrase(phrase: &str) -> String {
    let flattened: String = phrase
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect();

    flattened
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Compute the BIP-39 seed for an already normalized phrase and passphrase.
pub fn bip39_seed(phrase: &str, passphrase: &str) -> Zeroizing<[u8; SEED_LENGTH]> {
    let salt = Zeroizing::new(format!("{}{}", BIP39_SALT_PREFIX, passphrase));
    let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
    pbkdf2_hmac::<Sha512>(
        phrase.as_bytes(),
        salt.as_bytes(),
        BIP39_ROUNDS,
        &mut seed[..],
    );
    seed
}

/// Derive the file key from a mnemonic phrase and a secret.
///
/// Pure and infallible: an empty phrase or secret yields a well-defined
/// (weak) key.
///
/// # Examples
///
/// ```
/// use fcd_core::crypto::derive_key;
///
/// let a = derive_key("  alpha\tbravo\r\n", " secret ");
/// let b = derive_key("alpha bravo", "secret");
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
pub fn derive_key(phrase: &str, secret: &str) -> DerivedKey {
    let phrase = Zeroizing::new(normalize_phrase(phrase));
    let seed = bip39_seed(&phrase, secret.trim());
    let digest: [u8; KEY_LENGTH] = Sha256::digest(seed.as_slice()).into();
    DerivedKey::from_bytes(digest)
}
