//! Point table reading.
//!
//! Point files carry a numbered column-description block in the header and
//! one whitespace-delimited row per point. Rows keep file order: the order
//! often encodes a traversal path.

use crate::config::{ColumnNaming, ReaderConfig};
use crate::constants::{MAX_TABLE_COLUMNS, PLACEHOLDER_COLUMN_PREFIX};
use crate::error::{IcgemError, Result};
use crate::header::{HeaderVariant, parse_header};
use crate::models::{ColumnDescriptions, IcgemHeader, Metadata, ReadStats};
use crate::rows::parse_numeric_rows;
use crate::source::SourceText;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Column names for indices `1..=max(descriptions)`, with placeholders for gaps
pub fn column_names(
    descriptions: &ColumnDescriptions,
    naming: ColumnNaming,
) -> Result<Vec<String>> {
    let column_count = descriptions
        .keys()
        .next_back()
        .copied()
        .filter(|count| *count > 0)
        .ok_or_else(|| IcgemError::configuration("no column descriptions for point table"))?;

    if column_count > MAX_TABLE_COLUMNS {
        return Err(IcgemError::configuration(format!(
            "column index {} exceeds the limit of {} columns",
            column_count, MAX_TABLE_COLUMNS
        )));
    }

    Ok((1..=column_count)
        .map(|index| match descriptions.get(&index) {
            Some(description) => naming.apply(description),
            None => format!("{}{}", PLACEHOLDER_COLUMN_PREFIX, index),
        })
        .collect())
}

/// Build a table from the data region of `lines`
pub fn build_table<S: AsRef<str>>(
    lines: &[S],
    data_start: usize,
    descriptions: &ColumnDescriptions,
    naming: ColumnNaming,
    file_path: &Path,
    stats: &mut ReadStats,
) -> Result<DataFrame> {
    let names = column_names(descriptions, naming)?;
    let rows = parse_numeric_rows(lines, data_start, names.len(), file_path, stats)?;

    let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); names.len()];
    for row in rows {
        for (column, value) in values.iter_mut().zip(row.values) {
            column.push(value);
        }
    }

    let columns: Vec<Column> = names
        .iter()
        .zip(values)
        .map(|(name, data)| Column::new(name.as_str().into(), data))
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Reader for ICGEM point files
#[derive(Debug)]
pub struct IcgemTable {
    path: PathBuf,
    config: ReaderConfig,
    metadata: Metadata,
    column_descriptions: ColumnDescriptions,
    data: Option<DataFrame>,
    stats: ReadStats,
}

impl IcgemTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: ReaderConfig::default(),
            metadata: Metadata::new(),
            column_descriptions: ColumnDescriptions::new(),
            data: None,
            stats: ReadStats::default(),
        }
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Read the header only, leaving the data region untouched
    pub fn read_header(&mut self) -> Result<&Metadata> {
        let source = self.load()?;
        let header = parse_header(&source.lines(), HeaderVariant::Points, &self.path)?;
        self.store_header(header);
        Ok(&self.metadata)
    }

    /// Read the whole file
    pub fn read(&mut self) -> Result<()> {
        info!("Reading ICGEM point table: {}", self.path.display());

        let source = self.load()?;
        let lines = source.lines();
        let header = parse_header(&lines, HeaderVariant::Points, &self.path)?;

        let mut stats = ReadStats::default();
        let data = {
            let descriptions = self
                .config
                .effective_columns(&header.column_descriptions)
                .ok_or_else(|| {
                    IcgemError::configuration(format!(
                        "no column descriptions in {} and no default column table configured",
                        self.path.display()
                    ))
                })?;
            build_table(
                &lines,
                header.data_start,
                descriptions,
                self.config.column_naming,
                &self.path,
                &mut stats,
            )?
        };

        debug!(
            "Built point table {:?} from {}",
            data.shape(),
            self.path.display()
        );

        self.store_header(header);
        self.data = Some(data);
        self.stats = stats;
        Ok(())
    }

    fn load(&self) -> Result<SourceText> {
        SourceText::load(&self.path, self.config.resolve_encoding()?)
    }

    fn store_header(&mut self, header: IcgemHeader) {
        self.metadata = header.metadata;
        self.column_descriptions = header.column_descriptions;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Column descriptions as found in the file (not the default table)
    pub fn column_descriptions(&self) -> &ColumnDescriptions {
        &self.column_descriptions
    }

    /// Table data; `None` until `read()` succeeds
    pub fn data(&self) -> Option<&DataFrame> {
        self.data.as_ref()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .into_iter()
                    .map(|name| name.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}
