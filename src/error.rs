//! Error handling for ICGEM reading operations.
//!
//! Provides error types with enough context (file path, line number and
//! content) to report malformed headers and data rows.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IcgemError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported text encoding: {label}")]
    UnsupportedEncoding { label: String },

    #[error("Invalid ICGEM header in file: {path} - {reason}")]
    HeaderFormat { path: PathBuf, reason: String },

    #[error("Malformed data row in file: {path}, line {line} ({reason}): {content:?}")]
    RowFormat {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("No data available: read() has not completed for {path}")]
    NotRead { path: PathBuf },
}

impl IcgemError {
    /// Create an I/O error for a path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Classify a failed file read: a missing file is `FileNotFound`,
    /// anything else (permissions, directories) is `Io`
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound {
                path: path.as_ref().to_path_buf(),
            },
            _ => Self::io(path, source),
        }
    }

    /// Create a header format error
    pub fn header_format(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::HeaderFormat {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a row format error; `line` is the 1-based line number in the file
    pub fn row_format(
        path: impl AsRef<Path>,
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::RowFormat {
            path: path.as_ref().to_path_buf(),
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Line number of the offending row, if this is a row format error
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::RowFormat { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IcgemError>;
