//! Core data structures for ICGEM reading.
//!
//! Defines header results, grid datasets, file kinds and read statistics
//! used throughout the library.

use crate::constants::GRID_FILE_EXTENSION;
use ndarray::{Array1, Array2};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

/// Header key/value pairs; later duplicate keys overwrite earlier ones
pub type Metadata = BTreeMap<String, String>;

/// 1-based column index to column description
pub type ColumnDescriptions = BTreeMap<usize, String>;

/// Kinds of ICGEM data files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Point table (`.dat` and similar)
    Points,
    /// Regular grid (`.gdf`)
    Grid,
}

impl FileKind {
    /// Detect file kind from the file extension
    pub fn from_path(path: &Path) -> Self {
        let is_grid = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(GRID_FILE_EXTENSION));

        if is_grid { FileKind::Grid } else { FileKind::Points }
    }
}

/// Result of scanning an ICGEM header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IcgemHeader {
    /// 0-based index of the first data line
    pub data_start: usize,
    pub metadata: Metadata,
    pub column_descriptions: ColumnDescriptions,
}

/// A named 2D field on the grid lattice, addressed `[lat_index, lon_index]`
#[derive(Debug, Clone, PartialEq)]
pub struct DataVariable {
    pub name: String,
    pub units: Option<String>,
    pub long_name: Option<String>,
    pub data: Array2<f64>,
}

impl DataVariable {
    /// Number of cells holding a measurement rather than the missing marker
    pub fn filled_cells(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Dense grid dataset built from an ICGEM grid file
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Strictly increasing unique longitudes
    pub lon: Array1<f64>,
    /// Strictly increasing unique latitudes
    pub lat: Array1<f64>,
    pub height: DataVariable,
    pub value: DataVariable,
    /// Dataset-level attributes: source file plus header metadata
    pub attrs: BTreeMap<String, String>,
}

impl Grid {
    /// Lattice shape as (latitudes, longitudes)
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    /// Grid value at an exact coordinate pair; `None` when the pair is off-axis
    pub fn value_at(&self, lon: f64, lat: f64) -> Option<f64> {
        let (row, col) = self.cell_index(lon, lat)?;
        Some(self.value.data[[row, col]])
    }

    /// Height at an exact coordinate pair; `None` when the pair is off-axis
    pub fn height_at(&self, lon: f64, lat: f64) -> Option<f64> {
        let (row, col) = self.cell_index(lon, lat)?;
        Some(self.height.data[[row, col]])
    }

    /// Number of lattice cells that received a value
    pub fn filled_cells(&self) -> usize {
        self.value.filled_cells()
    }

    /// Locate the `[lat, lon]` cell for an exact coordinate pair
    pub fn cell_index(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        let lat_idx = axis_position(self.lat.as_slice()?, lat)?;
        let lon_idx = axis_position(self.lon.as_slice()?, lon)?;
        Some((lat_idx, lon_idx))
    }
}

/// Exact-match binary search on a strictly increasing axis
pub(crate) fn axis_position(axis: &[f64], coordinate: f64) -> Option<usize> {
    axis.binary_search_by(|probe| probe.partial_cmp(&coordinate).unwrap_or(Ordering::Less))
        .ok()
}

/// Statistics gathered while reading a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub total_lines: usize,
    pub header_lines: usize,
    pub data_rows: usize,
    pub blank_lines_skipped: usize,
    /// Grid only: cells that received at least one row
    pub filled_cells: usize,
    /// Grid only: rows that overwrote an already filled cell
    pub overwritten_cells: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_grid() -> Grid {
        Grid {
            lon: array![10.0, 20.0],
            lat: array![50.0, 60.0],
            height: DataVariable {
                name: "height".to_string(),
                units: Some("m".to_string()),
                long_name: None,
                data: array![[100.0, 100.0], [100.0, f64::NAN]],
            },
            value: DataVariable {
                name: "value".to_string(),
                units: None,
                long_name: None,
                data: array![[1.1, 2.2], [0.0, f64::NAN]],
            },
            attrs: BTreeMap::new(),
        }
    }

    #[test]
    fn test_file_kind_from_path() {
        assert_eq!(FileKind::from_path(Path::new("geoid.gdf")), FileKind::Grid);
        assert_eq!(FileKind::from_path(Path::new("GEOID.GDF")), FileKind::Grid);
        assert_eq!(FileKind::from_path(Path::new("astana.dat")), FileKind::Points);
        assert_eq!(FileKind::from_path(Path::new("no_extension")), FileKind::Points);
    }

    #[test]
    fn test_value_lookup() {
        let grid = sample_grid();
        assert_eq!(grid.shape(), (2, 2));
        assert_eq!(grid.value_at(20.0, 50.0), Some(2.2));
        assert_eq!(grid.value_at(10.0, 60.0), Some(0.0));
        assert!(grid.value_at(20.0, 60.0).unwrap().is_nan());
        assert_eq!(grid.value_at(15.0, 50.0), None);
        assert_eq!(grid.height_at(10.0, 50.0), Some(100.0));
    }

    #[test]
    fn test_filled_cells_excludes_missing() {
        let grid = sample_grid();
        assert_eq!(grid.filled_cells(), 3);
    }

    #[test]
    fn test_axis_position_treats_signed_zero_as_equal() {
        let axis = [-0.0, 1.0];
        assert_eq!(axis_position(&axis, 0.0), Some(0));
        assert_eq!(axis_position(&axis, 1.0), Some(1));
        assert_eq!(axis_position(&axis, 0.5), None);
    }
}
