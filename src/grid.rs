//! Grid reading and lattice reconstruction.
//!
//! Grid files list one `lon lat height value` row per point. The rows are
//! scattered into dense `[lat, lon]` lattices whose axes are the sorted
//! unique coordinates; combinations never observed stay NaN.

use crate::config::ReaderConfig;
use crate::constants::{GRID_ROW_WIDTH, attributes};
use crate::error::{IcgemError, Result};
use crate::header::{HeaderVariant, parse_header};
use crate::models::{DataVariable, Grid, Metadata, ReadStats, axis_position};
use crate::rows::parse_numeric_rows;
use crate::source::SourceText;
use ndarray::{Array1, Array2};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Sorted unique values, compared by exact equality
fn unique_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut axis: Vec<f64> = values.collect();
    axis.sort_by(f64::total_cmp);
    axis.dedup_by(|a, b| a == b);
    axis
}

/// Build a grid from the data region of `lines`
pub fn build_grid<S: AsRef<str>>(
    lines: &[S],
    data_start: usize,
    metadata: &Metadata,
    file_path: &Path,
    stats: &mut ReadStats,
) -> Result<Grid> {
    let rows = parse_numeric_rows(lines, data_start, GRID_ROW_WIDTH, file_path, stats)?;

    let rows: Vec<(usize, [f64; GRID_ROW_WIDTH])> = rows
        .into_iter()
        .map(|row| {
            let v = row.values;
            (row.line, [v[0], v[1], v[2], v[3]])
        })
        .collect();

    for (line, [lon, lat, _, _]) in &rows {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(IcgemError::row_format(
                file_path,
                *line,
                format!("{} {}", lon, lat),
                "coordinates must be finite",
            ));
        }
    }

    let lon_axis = unique_sorted(rows.iter().map(|(_, row)| row[0]));
    let lat_axis = unique_sorted(rows.iter().map(|(_, row)| row[1]));
    let shape = (lat_axis.len(), lon_axis.len());

    let mut height = Array2::<f64>::from_elem(shape, f64::NAN);
    let mut value = Array2::<f64>::from_elem(shape, f64::NAN);
    let mut filled = Array2::<bool>::from_elem(shape, false);

    for (line, [lon, lat, h, v]) in &rows {
        let cell = axis_position(&lat_axis, *lat).zip(axis_position(&lon_axis, *lon));
        let Some((lat_idx, lon_idx)) = cell else {
            return Err(IcgemError::row_format(
                file_path,
                *line,
                format!("{} {}", lon, lat),
                "coordinate not present on derived axis",
            ));
        };

        if filled[[lat_idx, lon_idx]] {
            stats.overwritten_cells += 1;
        } else {
            filled[[lat_idx, lon_idx]] = true;
            stats.filled_cells += 1;
        }
        height[[lat_idx, lon_idx]] = *h;
        value[[lat_idx, lon_idx]] = *v;
    }

    if stats.overwritten_cells > 0 {
        warn!(
            "{} rows in {} repeat an earlier coordinate pair; later rows win",
            stats.overwritten_cells,
            file_path.display()
        );
    }
    debug!(
        "Built {}x{} lattice from {} rows ({} cells filled)",
        shape.0,
        shape.1,
        rows.len(),
        stats.filled_cells
    );

    let mut attrs = BTreeMap::new();
    attrs.insert(
        attributes::SOURCE_FILE.to_string(),
        file_path.display().to_string(),
    );
    attrs.extend(metadata.iter().map(|(k, v)| (k.clone(), v.clone())));

    Ok(Grid {
        lon: Array1::from(lon_axis),
        lat: Array1::from(lat_axis),
        height: DataVariable {
            name: attributes::HEIGHT_VARIABLE.to_string(),
            units: Some(attributes::HEIGHT_UNITS.to_string()),
            long_name: Some(attributes::HEIGHT_LONG_NAME.to_string()),
            data: height,
        },
        value: DataVariable {
            name: attributes::VALUE_VARIABLE.to_string(),
            units: metadata.get(attributes::UNIT).cloned(),
            long_name: metadata.get(attributes::FUNCTIONAL).cloned(),
            data: value,
        },
        attrs,
    })
}

/// Reader for ICGEM grid files
#[derive(Debug)]
pub struct IcgemGrid {
    path: PathBuf,
    config: ReaderConfig,
    metadata: Metadata,
    grid: Option<Grid>,
    stats: ReadStats,
}

impl IcgemGrid {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: ReaderConfig::default(),
            metadata: Metadata::new(),
            grid: None,
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
        let header = parse_header(&source.lines(), HeaderVariant::Grid, &self.path)?;
        self.metadata = header.metadata;
        Ok(&self.metadata)
    }

    /// Read the whole file
    pub fn read(&mut self) -> Result<()> {
        info!("Reading ICGEM grid: {}", self.path.display());

        let source = self.load()?;
        let lines = source.lines();
        let header = parse_header(&lines, HeaderVariant::Grid, &self.path)?;

        let mut stats = ReadStats::default();
        let grid = build_grid(
            &lines,
            header.data_start,
            &header.metadata,
            &self.path,
            &mut stats,
        )?;

        self.metadata = header.metadata;
        self.grid = Some(grid);
        self.stats = stats;
        Ok(())
    }

    fn load(&self) -> Result<SourceText> {
        SourceText::load(&self.path, self.config.resolve_encoding()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Grid dataset; `None` until `read()` succeeds
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}
