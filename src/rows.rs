//! Numeric row parsing for the data region.
//!
//! Data lines are whitespace-delimited floating point values with a fixed
//! width per file. Any deviation aborts the read with the offending line.

use crate::error::{IcgemError, Result};
use crate::models::ReadStats;
use std::path::Path;
use tracing::debug;

/// One parsed data line
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    /// 1-based line number in the file
    pub line: usize,
    pub values: Vec<f64>,
}

/// Parse every non-blank line from `data_start` on into rows of `width` values
pub fn parse_numeric_rows<S: AsRef<str>>(
    lines: &[S],
    data_start: usize,
    width: usize,
    file_path: &Path,
    stats: &mut ReadStats,
) -> Result<Vec<DataRow>> {
    let mut rows = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(data_start) {
        let line = line.as_ref();
        if line.trim().is_empty() {
            stats.blank_lines_skipped += 1;
            continue;
        }

        rows.push(DataRow {
            line: index + 1,
            values: parse_numeric_row(line, index + 1, width, file_path)?,
        });
    }

    stats.total_lines = lines.len();
    stats.header_lines = data_start.min(lines.len());
    stats.data_rows = rows.len();

    debug!(
        "Parsed {} data rows of width {} from {} ({} blank lines skipped)",
        rows.len(),
        width,
        file_path.display(),
        stats.blank_lines_skipped
    );

    Ok(rows)
}

/// Parse a single data line; `line_number` is 1-based and only used for errors
pub fn parse_numeric_row(
    line: &str,
    line_number: usize,
    width: usize,
    file_path: &Path,
) -> Result<Vec<f64>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != width {
        return Err(IcgemError::row_format(
            file_path,
            line_number,
            line.trim(),
            format!("expected {} values, found {}", width, tokens.len()),
        ));
    }

    tokens
        .iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                IcgemError::row_format(
                    file_path,
                    line_number,
                    line.trim(),
                    format!("'{}' is not a number", token),
                )
            })
        })
        .collect()
}
