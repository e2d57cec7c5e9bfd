//! AES-256-CFB adapters over `Read` and `Write`.
//!
//! CFB here is the full-block (128-bit segment) variant. The keystream
//! position is carried across calls, so data may be fed in chunks of any
//! size and split anywhere.

use std::io::{self, Read, Write};

use aes::Aes256;
use cfb_mode::cipher::KeyIvInit;
use cfb_mode::{BufDecryptor, BufEncryptor};

use super::key::DerivedKey;
use crate::error::{FcdError, Result};

/// AES block size, and therefore the IV length.
pub const BLOCK_SIZE: usize = 16;

/// Upper bound on bytes enciphered per `write` call.
const CHUNK_SIZE: usize = 8 * 1024;

pub type CfbEncryptor = BufEncryptor<Aes256>;
pub type CfbDecryptor = BufDecryptor<Aes256>;

/// Build the encrypting keystream for `key` and `iv`.
pub fn encryptor(key: &DerivedKey, iv: &[u8]) -> Result<CfbEncryptor> {
    CfbEncryptor::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| FcdError::CipherConstruction(format!("AES-256-CFB setup failed: {}", e)))
}

/// Build the decrypting keystream for `key` and `iv`.
pub fn decryptor(key: &DerivedKey, iv: &[u8]) -> Result<CfbDecryptor> {
    CfbDecryptor::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| FcdError::CipherConstruction(format!("AES-256-CFB setup failed: {}", e)))
}

/// Enciphers everything written to it before passing it on.
///
/// After an inner write error the keystream has already advanced past the
/// lost bytes; the writer must be discarded.
pub struct CfbWriter<W: Write> {
    inner: W,
    cipher: CfbEncryptor,
    scratch: Vec<u8>,
}

impl<W: Write> CfbWriter<W> {
    pub fn new(inner: W, cipher: CfbEncryptor) -> Self {
        Self {
            inner,
            cipher,
            scratch: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Unwrap the inner writer. Nothing is buffered, so nothing is lost.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CfbWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len().min(CHUNK_SIZE);
        self.scratch.clear();
        self.scratch.extend_from_slice(&buf[..len]);
        self.cipher.encrypt(&mut self.scratch);
        self.inner.write_all(&self.scratch)?;
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Deciphers everything read through it, in place.
pub struct CfbReader<R: Read> {
    inner: R,
    cipher: CfbDecryptor,
}

impl<R: Read> CfbReader<R> {
    pub fn new(inner: R, cipher: CfbDecryptor) -> Self {
        Self { inner, cipher }
    }
}

impl<R: Read> Read for CfbReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.cipher.decrypt(&mut buf[..read]);
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfb_mode::cipher::AsyncStreamCipher;

    fn test_key() -> DerivedKey {
        DerivedKey::from_bytes([7u8; 32])
    }

    const IV: [u8; BLOCK_SIZE] = [3u8; BLOCK_SIZE];

    fn one_shot(data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        cfb_mode::Encryptor::<Aes256>::new(test_key().as_bytes().into(), &IV.into())
            .encrypt(&mut out);
        out
    }

    #[test]
    fn test_writer_matches_one_shot_for_uneven_chunks() {
        let plaintext: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();

        let mut writer = CfbWriter::new(Vec::new(), encryptor(&test_key(), &IV).unwrap());
        for chunk in plaintext.chunks(7) {
            writer.write_all(chunk).unwrap();
        }
        let ciphertext = writer.into_inner();

        assert_eq!(ciphertext, one_shot(&plaintext));
    }

    #[test]
    fn test_writer_caps_chunk_size() {
        let plaintext = vec![0x42u8; CHUNK_SIZE * 3 + 5];

        let mut writer = CfbWriter::new(Vec::new(), encryptor(&test_key(), &IV).unwrap());
        let accepted = writer.write(&plaintext).unwrap();
        assert_eq!(accepted, CHUNK_SIZE);

        writer.write_all(&plaintext[accepted..]).unwrap();
        assert_eq!(writer.into_inner(), one_shot(&plaintext));
    }

    #[test]
    fn test_reader_inverts_writer() {
        let plaintext = b"The quick brown fox jumps over the lazy dog".repeat(20);
        let ciphertext = one_shot(&plaintext);

        let mut reader = CfbReader::new(
            ciphertext.as_slice(),
            decryptor(&test_key(), &IV).unwrap(),
        );
        let mut recovered = Vec::new();
        let mut buf = [0u8; 13];
        loop {
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            recovered.extend_from_slice(&buf[..n]);
        }

        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn test_bad_iv_length_rejected() {
        let result = encryptor(&test_key(), &[0u8; 8]);
        assert!(matches!(result, Err(FcdError::CipherConstruction(_))));

        let result = decryptor(&test_key(), &[0u8; 17]);
        assert!(matches!(result, Err(FcdError::CipherConstruction(_))));
    }
}
