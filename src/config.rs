//! Reader configuration.
//!
//! Controls text decoding, the fallback column-description table for point
//! files and how column names are derived from descriptions.

use crate::constants::{ColumnTable, DEFAULT_ENCODING};
use crate::error::{IcgemError, Result};
use crate::models::ColumnDescriptions;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// How table column names are derived from column descriptions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnNaming {
    /// Use the complete trimmed description text
    #[default]
    Full,
    /// Use only the first word of the description
    ShortName,
}

impl ColumnNaming {
    /// Derive a column name from a description
    pub fn apply(&self, description: &str) -> String {
        match self {
            ColumnNaming::Full => description.trim().to_string(),
            ColumnNaming::ShortName => description
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Configuration shared by table and grid readers.
///
/// Can be loaded from a JSON file; missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// WHATWG encoding label used to decode the file
    pub encoding: String,

    /// Column descriptions used when a point file has no description block
    pub default_columns: Option<ColumnDescriptions>,

    /// Name of the default column table, for logging
    pub default_columns_name: Option<String>,

    /// Column naming mode for point tables
    pub column_naming: ColumnNaming,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            default_columns: None,
            default_columns_name: None,
            column_naming: ColumnNaming::Full,
        }
    }
}

impl ReaderConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| IcgemError::read(path, e))?;
        let config: Self = serde_json::from_slice(&bytes).map_err(|e| {
            IcgemError::configuration(format!("invalid config file {}: {}", path.display(), e))
        })?;
        debug!("Loaded reader config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| IcgemError::configuration(format!("cannot serialize config: {}", e)))?;
        std::fs::write(path, json).map_err(|e| IcgemError::io(path, e))?;
        Ok(())
    }

    /// Set the encoding label
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Supply a default column table for files without a description block
    pub fn with_default_columns(mut self, table: ColumnTable) -> Self {
        let columns = table
            .columns
            .iter()
            .map(|(index, description)| (*index, description.to_string()))
            .collect();
        self.default_columns = Some(columns);
        self.default_columns_name = Some(format!("{} v{}", table.name, table.version));
        self
    }

    /// Set the column naming mode
    pub fn with_column_naming(mut self, naming: ColumnNaming) -> Self {
        self.column_naming = naming;
        self
    }

    /// Resolve the configured encoding label
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        let encoding = Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            IcgemError::UnsupportedEncoding {
                label: self.encoding.clone(),
            }
        })?;
        debug!("Resolved encoding '{}' to {}", self.encoding, encoding.name());
        Ok(encoding)
    }

    /// Pick the column descriptions a table is built from.
    ///
    /// The file's own block wins whenever it has at least one entry; the
    /// default table is only consulted for files without one.
    pub fn effective_columns<'a>(
        &'a self,
        from_file: &'a ColumnDescriptions,
    ) -> Option<&'a ColumnDescriptions> {
        if !from_file.is_empty() {
            return Some(from_file);
        }
        if let Some(defaults) = &self.default_columns {
            debug!(
                "No column descriptions in file, using default table {}",
                self.default_columns_name.as_deref().unwrap_or("unnamed")
            );
            return Some(defaults);
        }
        None
    }
}
