//! The compress-then-encipher pipeline.
//!
//! Container layout:
//!
//! ```text
//! +-----------------+---------------------------------------------+
//! | IV (16 bytes)   | gzip(plaintext), enciphered with AES-256-CFB |
//! +-----------------+---------------------------------------------+
//! ```
//!
//! There is no magic number, version byte or authentication tag. The only
//! integrity signal is the gzip framing: a wrong key turns the stream into
//! noise that the gzip header, deflate and CRC checks reject.

use std::io::{self, BufRead, BufReader, Read, Write};

use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use super::key::DerivedKey;
use super::stream::{decryptor, encryptor, CfbReader, CfbWriter, BLOCK_SIZE};
use crate::error::{FcdError, Result};

/// Length of the clear-text IV at the front of every container.
pub const IV_LENGTH: usize = BLOCK_SIZE;

const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Draw a fresh IV from the OS random source.
pub fn generate_iv() -> Result<[u8; IV_LENGTH]> {
    let mut iv = [0u8; IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| FcdError::Io {
        source: io::Error::other(format!("Failed to generate IV: {}", e)),
    })?;
    Ok(iv)
}

/// Encrypt `source` into `sink` as `IV || cfb(gzip(source))`.
///
/// Returns the number of plaintext bytes consumed. On error the sink holds a
/// truncated container that must be discarded.
///
/// # Examples
///
/// ```
/// use fcd_core::crypto::{decrypt, derive_key, encrypt};
///
/// let key = derive_key("alpha bravo charlie", "secret");
/// let mut container = Vec::new();
/// encrypt(&key, &b"hello"[..], &mut container).unwrap();
///
/// let mut plaintext = Vec::new();
/// decrypt(&key, container.as_slice(), &mut plaintext).unwrap();
/// assert_eq!(plaintext, b"hello");
/// ```
pub fn encrypt<R: Read, W: Write>(key: &DerivedKey, mut source: R, mut sink: W) -> Result<u64> {
    let iv = generate_iv()?;
    let cipher = encryptor(key, &iv)?;

    sink.write_all(&iv)?;

    // plaintext -> gzip -> cfb -> sink
    let mut compressor = GzEncoder::new(CfbWriter::new(sink, cipher), Compression::default());
    let consumed = io::copy(&mut source, &mut compressor)?;
    let mut sink = compressor.finish()?.into_inner();
    sink.flush()?;

    debug!(plaintext_bytes = consumed, "encrypted stream");
    Ok(consumed)
}

/// Decrypt a container from `source` into `sink`.
///
/// Returns the number of plaintext bytes written.
///
/// # Errors
///
/// - `FcdError::ShortIvRead` if `source` ends before a full IV
/// - `FcdError::CompressionFormat` if the deciphered stream is not valid
///   gzip, which is what a wrong key looks like
/// - `FcdError::Io` for failures of `source` or `sink` themselves
pub fn decrypt<R: Read, W: Write>(key: &DerivedKey, mut source: R, mut sink: W) -> Result<u64> {
    let mut iv = [0u8; IV_LENGTH];
    source.read_exact(&mut iv).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => FcdError::ShortIvRead {
            expected: IV_LENGTH,
        },
        _ => FcdError::from(e),
    })?;
    let cipher = decryptor(key, &iv)?;

    let mut deciphered = BufReader::new(CfbReader::new(source, cipher));
    if deciphered.fill_buf()?.is_empty() {
        return Err(FcdError::CompressionFormat {
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "container has no payload"),
        });
    }

    // source -> cfb -> gunzip -> sink
    // Every byte after the IV must belong to a gzip member
    let mut decompressor = MultiGzDecoder::new(deciphered);
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut produced = 0u64;
    loop {
        let read = match decompressor.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FcdError::from_decompress(e)),
        };
        sink.write_all(&buf[..read])?;
        produced += read as u64;
    }
    sink.flush()?;

    debug!(plaintext_bytes = produced, "decrypted stream");
    Ok(produced)
}
