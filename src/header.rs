//! ICGEM header parsing and metadata extraction.
//!
//! Classifies header lines into metadata pairs, column descriptions and
//! structural markers, and locates the line where numeric data begins.
//! Classification is permissive: a line that fits no known shape is
//! dropped, never fatal.

use crate::constants::{
    COLUMN_DESCRIPTION_MARKER, END_OF_HEAD, GRID_DEGREE_MARKER, GRID_LONGITUDE_MARKER,
};
use crate::error::{IcgemError, Result};
use crate::models::IcgemHeader;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, trace};

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+$").expect("valid regex"));

static COLUMN_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)").expect("valid regex"));

/// Which header dialect to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    Points,
    /// Grid headers also treat `[deg.]` and `longitude` rows as data markers
    Grid,
}

/// Classification of a single header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine {
    EndOfHeader,
    Separator,
    DescriptionMarker,
    ColumnDesc(usize, String),
    /// Non-terminal "data starts on the next line" marker (grid files)
    DataMarker,
    Metadata(String, String),
    Unrecognized,
}

/// Classify one header line.
///
/// `in_description` is the sticky state set by an earlier
/// `description of columns` line; it decides whether numbered lines are
/// column descriptions or metadata.
pub fn classify_line(line: &str, in_description: bool, variant: HeaderVariant) -> HeaderLine {
    let stripped = line.trim();

    if stripped.starts_with(END_OF_HEAD) {
        return HeaderLine::EndOfHeader;
    }

    if SEPARATOR.is_match(stripped) {
        return HeaderLine::Separator;
    }

    if stripped.starts_with(COLUMN_DESCRIPTION_MARKER) {
        return HeaderLine::DescriptionMarker;
    }

    if in_description {
        return COLUMN_DESCRIPTION
            .captures(stripped)
            .and_then(|caps| {
                let index = caps[1].parse::<usize>().ok()?;
                Some(HeaderLine::ColumnDesc(index, caps[2].trim().to_string()))
            })
            .unwrap_or(HeaderLine::Unrecognized);
    }

    if variant == HeaderVariant::Grid
        && (stripped.starts_with(GRID_DEGREE_MARKER) || stripped.starts_with(GRID_LONGITUDE_MARKER))
    {
        return HeaderLine::DataMarker;
    }

    match stripped.split_once(char::is_whitespace) {
        Some((key, value)) => {
            HeaderLine::Metadata(key.trim().to_string(), value.trim().to_string())
        }
        None => HeaderLine::Unrecognized,
    }
}

/// Scan header lines and locate the start of the data region.
///
/// Fails with a header format error when neither an `end_of_head` line nor,
/// for grids, a data marker row is found.
pub fn parse_header<S: AsRef<str>>(
    lines: &[S],
    variant: HeaderVariant,
    file_path: &Path,
) -> Result<IcgemHeader> {
    let mut header = IcgemHeader::default();
    let mut data_start = None;
    let mut in_description = false;

    for (index, line) in lines.iter().enumerate() {
        let classified = classify_line(line.as_ref(), in_description, variant);
        trace!("Header line {}: {:?}", index + 1, classified);

        match classified {
            HeaderLine::EndOfHeader => {
                data_start = Some(index + 1);
                break;
            }
            HeaderLine::Separator | HeaderLine::Unrecognized => {}
            HeaderLine::DescriptionMarker => in_description = true,
            HeaderLine::ColumnDesc(column, description) => {
                header.column_descriptions.insert(column, description);
            }
            HeaderLine::DataMarker => data_start = Some(index + 1),
            HeaderLine::Metadata(key, value) => {
                header.metadata.insert(key, value);
            }
        }
    }

    header.data_start = data_start.ok_or_else(|| {
        IcgemError::header_format(file_path, format!("no '{}' line found", END_OF_HEAD))
    })?;

    debug!(
        "Parsed header for {}: data_start={}, {} metadata keys, {} column descriptions",
        file_path.display(),
        header.data_start,
        header.metadata.len(),
        header.column_descriptions.len()
    );

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT_HEADER: &str = "\
generating_institute     gfz-potsdam
modelname                EIGEN-6C4
max_used_degree          2190
functional               height_anomaly
-----------------------------------------
description of columns:
 1 identifier (from input)
 2 longitude  (from input)    [degree]
 -------------------------------------
 4 h_over_ell (from input)     [meter]
end_of_head =============================
1 71.43 51.13 350.0
";

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_classify_metadata() {
        assert_eq!(
            classify_line("modelname     EIGEN-6C4  ", false, HeaderVariant::Points),
            HeaderLine::Metadata("modelname".to_string(), "EIGEN-6C4".to_string())
        );
    }

    #[test]
    fn test_classify_metadata_keeps_inner_whitespace() {
        assert_eq!(
            classify_line("refsysname  WGS84  (GRS80)", false, HeaderVariant::Points),
            HeaderLine::Metadata("refsysname".to_string(), "WGS84  (GRS80)".to_string())
        );
    }

    #[test]
    fn test_classify_single_token_is_unrecognized() {
        assert_eq!(
            classify_line("*******", false, HeaderVariant::Points),
            HeaderLine::Unrecognized
        );
        assert_eq!(classify_line("   ", false, HeaderVariant::Points), HeaderLine::Unrecognized);
    }

    #[test]
    fn test_classify_structural_lines() {
        assert_eq!(
            classify_line("end_of_head ======", false, HeaderVariant::Points),
            HeaderLine::EndOfHeader
        );
        assert_eq!(
            classify_line("  -----  ", true, HeaderVariant::Points),
            HeaderLine::Separator
        );
        assert_eq!(
            classify_line("description of columns:", false, HeaderVariant::Points),
            HeaderLine::DescriptionMarker
        );
    }

    #[test]
    fn test_numbered_line_depends_on_description_mode() {
        assert_eq!(
            classify_line(" 3 latitude [degree]", true, HeaderVariant::Points),
            HeaderLine::ColumnDesc(3, "latitude [degree]".to_string())
        );
        assert_eq!(
            classify_line(" 3 latitude [degree]", false, HeaderVariant::Points),
            HeaderLine::Metadata("3".to_string(), "latitude [degree]".to_string())
        );
    }

    #[test]
    fn test_non_numbered_line_in_description_mode_is_dropped() {
        assert_eq!(
            classify_line("modelname EIGEN-6C4", true, HeaderVariant::Points),
            HeaderLine::Unrecognized
        );
    }

    #[test]
    fn test_grid_markers_only_in_grid_variant() {
        assert_eq!(
            classify_line("  [deg.]   [deg.]   [meter]", false, HeaderVariant::Grid),
            HeaderLine::DataMarker
        );
        assert_eq!(
            classify_line("longitude latitude h_over_geoid", false, HeaderVariant::Grid),
            HeaderLine::DataMarker
        );
        assert_eq!(
            classify_line("longitude latitude", false, HeaderVariant::Points),
            HeaderLine::Metadata("longitude".to_string(), "latitude".to_string())
        );
    }

    #[test]
    fn test_point_header_parsing() {
        let header =
            parse_header(&lines(POINT_HEADER), HeaderVariant::Points, Path::new("a.dat")).unwrap();

        assert_eq!(header.data_start, 11);
        assert_eq!(header.metadata.len(), 4);
        assert_eq!(header.metadata["modelname"], "EIGEN-6C4");
        assert_eq!(header.metadata["functional"], "height_anomaly");
        assert_eq!(header.column_descriptions.len(), 3);
        assert_eq!(header.column_descriptions[&1], "identifier (from input)");
        assert_eq!(header.column_descriptions[&4], "h_over_ell (from input)     [meter]");
        assert!(!header.column_descriptions.contains_key(&3));
    }

    #[test]
    fn test_later_duplicate_keys_win() {
        let text = "unit meter\nunit mGal\nend_of_head\n";
        let header = parse_header(&lines(text), HeaderVariant::Points, Path::new("a.dat")).unwrap();
        assert_eq!(header.metadata["unit"], "mGal");
        assert_eq!(header.data_start, 3);
    }

    #[test]
    fn test_missing_end_of_head_is_header_error() {
        let text = "modelname EIGEN-6C4\n1 2 3\n";
        let result = parse_header(&lines(text), HeaderVariant::Points, Path::new("a.dat"));
        assert!(matches!(result, Err(IcgemError::HeaderFormat { .. })));
    }

    #[test]
    fn test_grid_data_marker_is_not_terminal() {
        let text = "\
functional height_anomaly
longitude latitude h_over_geoid height_anomaly
[deg.] [deg.] [meter] [meter]
unit meter
end_of_head ----
10 50 0 1.1
";
        let header = parse_header(&lines(text), HeaderVariant::Grid, Path::new("g.gdf")).unwrap();
        assert_eq!(header.data_start, 5);
        assert_eq!(header.metadata["unit"], "meter");
        assert_eq!(header.metadata["functional"], "height_anomaly");
        assert!(!header.metadata.contains_key("longitude"));
    }

    #[test]
    fn test_grid_data_marker_alone_sets_start() {
        let text = "functional geoid\n[deg.] [deg.] [meter] [meter]\n10 50 0 1.1\n";
        let header = parse_header(&lines(text), HeaderVariant::Grid, Path::new("g.gdf")).unwrap();
        assert_eq!(header.data_start, 2);
    }

    #[test]
    fn test_header_scan_is_deterministic() {
        let first =
            parse_header(&lines(POINT_HEADER), HeaderVariant::Points, Path::new("a.dat")).unwrap();
        let second =
            parse_header(&lines(POINT_HEADER), HeaderVariant::Points, Path::new("a.dat")).unwrap();
        assert_eq!(first, second);
    }
}
