//! File loading and text decoding.
//!
//! ICGEM files are single-byte encoded (Latin-1 by default); the whole
//! file is read and decoded once, then handed to the parsers as lines.

use crate::error::{IcgemError, Result};
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decoded contents of one ICGEM file
#[derive(Debug, Clone)]
pub struct SourceText {
    path: PathBuf,
    text: String,
}

impl SourceText {
    /// Read and decode a file with the given encoding
    pub fn load(path: &Path, encoding: &'static Encoding) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| IcgemError::read(path, e))?;
        Ok(Self::decode(path, &bytes, encoding))
    }

    /// Decode in-memory bytes as if they had been read from `path`
    pub fn decode(path: &Path, bytes: &[u8], encoding: &'static Encoding) -> Self {
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            warn!(
                "Malformed {} sequences in {} were replaced",
                used.name(),
                path.display()
            );
        }
        debug!(
            "Loaded {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            used.name()
        );

        Self {
            path: path.to_path_buf(),
            text: text.into_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines without their terminators
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_latin1_decoding() {
        let mut temp_file = NamedTempFile::new().unwrap();
        // "author  Müller" in Latin-1
        temp_file.write_all(b"author  M\xfcller\r\nend_of_head\r\n").unwrap();

        let source = SourceText::load(temp_file.path(), encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(source.lines(), vec!["author  Müller", "end_of_head"]);
    }

    #[test]
    fn test_missing_file() {
        let result = SourceText::load(
            Path::new("/definitely/not/here.gdf"),
            encoding_rs::WINDOWS_1252,
        );
        assert!(matches!(result, Err(IcgemError::FileNotFound { .. })));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SourceText::load(dir.path(), encoding_rs::WINDOWS_1252);
        assert!(matches!(result, Err(IcgemError::Io { .. })));
    }

    #[test]
    fn test_utf8_decoding() {
        let source = SourceText::decode(
            Path::new("memory.dat"),
            "author  Müller\n".as_bytes(),
            encoding_rs::UTF_8,
        );
        assert_eq!(source.lines(), vec!["author  Müller"]);
        assert_eq!(source.path(), Path::new("memory.dat"));
    }
}
