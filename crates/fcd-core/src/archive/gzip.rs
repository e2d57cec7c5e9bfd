//! Plain gzip of single files, with the original name kept in the header.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use tracing::info;

use crate::error::{FcdError, Result};
use crate::fs::write_new;
use crate::path::expand;

const GZ_SUFFIX: &str = ".gz";

/// Compress `source` into `<target_dir>/<name>.gz`.
pub fn gzip_file(source: &str, target_dir: &str) -> Result<PathBuf> {
    let source = expand(source)?;
    let target_dir = expand(target_dir)?;
    let name = file_name(&source)?;

    if !source.is_file() {
        return Err(FcdError::NotFound(source));
    }
    let input = File::open(&source)?;

    let target = target_dir.join(format!("{}{}", name, GZ_SUFFIX));
    let bytes = write_new(&target, |out| {
        let mut encoder = GzBuilder::new()
            .filename(name.as_bytes())
            .write(out, Compression::default());
        let bytes = io::copy(&mut BufReader::new(input), &mut encoder)?;
        encoder.finish()?;
        Ok(bytes)
    })?;

    info!(source = %source.display(), target = %target.display(), bytes, "gzipped file");
    Ok(target)
}

/// Decompress `source` into `target_dir`, under the name stored in the gzip
/// header, or the source name minus `.gz` if the header has none.
pub fn gunzip_file(source: &str, target_dir: &str) -> Result<PathBuf> {
    let source = expand(source)?;
    let target_dir = expand(target_dir)?;

    if !source.is_file() {
        return Err(FcdError::NotFound(source));
    }
    let mut decoder = GzDecoder::new(BufReader::new(File::open(&source)?));

    // The header is only guaranteed to be parsed once data has been read
    let mut first = vec![0u8; 8 * 1024];
    let first_len = read_decoded(&mut decoder, &mut first)?;

    let name = match decoder.header().and_then(|h| h.filename()) {
        Some(raw) => header_name(raw)?,
        None => fallback_name(&source)?,
    };
    let target = target_dir.join(name);

    let bytes = write_new(&target, |out| {
        out.write_all(&first[..first_len])?;
        let mut total = first_len as u64;
        let mut buf = vec![0u8; 8 * 1024];
        loop {
            let read = read_decoded(&mut decoder, &mut buf)?;
            if read == 0 {
                break;
            }
            out.write_all(&buf[..read])?;
            total += read as u64;
        }
        Ok(total)
    })?;

    info!(source = %source.display(), target = %target.display(), bytes, "gunzipped file");
    Ok(target)
}

fn read_decoded<R: Read>(decoder: &mut GzDecoder<R>, buf: &mut [u8]) -> Result<usize> {
    loop {
        match decoder.read(buf) {
            Ok(read) => return Ok(read),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(match e.kind() {
                    io::ErrorKind::InvalidInput
                    | io::ErrorKind::InvalidData
                    | io::ErrorKind::UnexpectedEof => {
                        FcdError::Archive(format!("Invalid gzip data: {}", e))
                    }
                    _ => FcdError::from(e),
                })
            }
        }
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(OsStr::to_str)
        .map(str::to_string)
        .ok_or_else(|| FcdError::InvalidInput(format!("No file name in '{}'", path.display())))
}

fn header_name(raw: &[u8]) -> Result<String> {
    let name = String::from_utf8_lossy(raw).to_string();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(FcdError::Archive(format!(
            "Refusing unsafe file name in gzip header: '{}'",
            name
        )));
    }
    Ok(name)
}

fn fallback_name(source: &Path) -> Result<String> {
    let name = file_name(source)?;
    match name.strip_suffix(GZ_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => Ok(stripped.to_string()),
        _ => Err(FcdError::InvalidInput(format!(
            "'{}' has no name in its header and no '{}' suffix",
            name, GZ_SUFFIX
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn s(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_gzip_gunzip_round_trip() {
        let dir = tempdir().unwrap();
        let src_dir = dir.path().join("src");
        let out_dir = dir.path().join("out");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&out_dir).unwrap();

        let original = src_dir.join("report.txt");
        fs::write(&original, b"quarterly numbers ".repeat(100)).unwrap();

        let compressed = gzip_file(&s(&original), &s(dir.path())).unwrap();
        assert_eq!(compressed, dir.path().join("report.txt.gz"));

        // Rename so the header name is what decides the output
        let renamed = dir.path().join("blob.gz");
        fs::rename(&compressed, &renamed).unwrap();

        let restored = gunzip_file(&s(&renamed), &s(&out_dir)).unwrap();
        assert_eq!(restored, out_dir.join("report.txt"));
        assert_eq!(fs::read(&restored).unwrap(), fs::read(&original).unwrap());
    }

    #[test]
    fn test_gunzip_without_header_name_uses_source_name() {
        let dir = tempdir().unwrap();
        let gz_path = dir.path().join("plain.bin.gz");

        let mut encoder = GzBuilder::new().write(Vec::new(), Compression::fast());
        encoder.write_all(b"no name here").unwrap();
        fs::write(&gz_path, encoder.finish().unwrap()).unwrap();

        let out_dir = dir.path().join("out");
        fs::create_dir_all(&out_dir).unwrap();
        let restored = gunzip_file(&s(&gz_path), &s(&out_dir)).unwrap();

        assert_eq!(restored, out_dir.join("plain.bin"));
        assert_eq!(fs::read(&restored).unwrap(), b"no name here");
    }

    #[test]
    fn test_gunzip_rejects_path_in_header() {
        let dir = tempdir().unwrap();
        let gz_path = dir.path().join("evil.gz");

        let mut encoder = GzBuilder::new()
            .filename("../escape.txt")
            .write(Vec::new(), Compression::fast());
        encoder.write_all(b"payload").unwrap();
        fs::write(&gz_path, encoder.finish().unwrap()).unwrap();

        let result = gunzip_file(&s(&gz_path), &s(dir.path()));
        assert!(matches!(result, Err(FcdError::Archive(_))));
    }

    #[test]
    fn test_gzip_refuses_existing_target() {
        let dir = tempdir().unwrap();
        let original = dir.path().join("a.txt");
        fs::write(&original, b"a").unwrap();
        fs::write(dir.path().join("a.txt.gz"), b"already here").unwrap();

        let result = gzip_file(&s(&original), &s(dir.path()));
        assert!(matches!(result, Err(FcdError::TargetExists(_))));
    }

    #[test]
    fn test_gunzip_rejects_non_gzip() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("bogus.gz");
        fs::write(&bogus, b"definitely not gzip").unwrap();

        let result = gunzip_file(&s(&bogus), &s(dir.path()));
        assert!(matches!(result, Err(FcdError::Archive(_))));
    }

    #[test]
    fn test_gzip_missing_source() {
        let dir = tempdir().unwrap();
        let result = gzip_file(&s(&dir.path().join("missing")), &s(dir.path()));
        assert!(matches!(result, Err(FcdError::NotFound(_))));
    }
}
