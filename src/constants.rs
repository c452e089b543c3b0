//! Application constants for the ICGEM reader
//!
//! Header tokens, attribute names and the default column-description
//! table used when a point file does not describe its own columns.

// =============================================================================
// Header Tokens
// =============================================================================

/// Sentinel that terminates the header; data starts on the following line
pub const END_OF_HEAD: &str = "end_of_head";

/// Marker line opening the numbered column-description block
pub const COLUMN_DESCRIPTION_MARKER: &str = "description of columns";

/// Unit row that precedes the data in grid files
pub const GRID_DEGREE_MARKER: &str = "[deg.]";

/// Column title row that precedes the data in grid files
pub const GRID_LONGITUDE_MARKER: &str = "longitude";

/// Encoding label used when none is configured (ICGEM files are Latin-1)
pub const DEFAULT_ENCODING: &str = "latin1";

/// Prefix for columns that have no description, suffixed with the 1-based index
pub const PLACEHOLDER_COLUMN_PREFIX: &str = "col";

/// Largest column index accepted from a description block
pub const MAX_TABLE_COLUMNS: usize = 10_000;

/// Number of values on every grid data row: lon, lat, height, value
pub const GRID_ROW_WIDTH: usize = 4;

/// File extension of ICGEM grid files
pub const GRID_FILE_EXTENSION: &str = "gdf";

// =============================================================================
// Grid Attributes
// =============================================================================

pub mod attributes {
    /// Dataset attribute holding the originating file path
    pub const SOURCE_FILE: &str = "source_file";

    /// Metadata key naming the unit of the grid value
    pub const UNIT: &str = "unit";

    /// Metadata key naming the functional the grid value represents
    pub const FUNCTIONAL: &str = "functional";

    pub const HEIGHT_VARIABLE: &str = "height";
    pub const VALUE_VARIABLE: &str = "value";
    pub const HEIGHT_UNITS: &str = "m";
    pub const HEIGHT_LONG_NAME: &str = "h_over_geoid";
}

// =============================================================================
// Default Column Tables
// =============================================================================

/// A named, versioned column-description table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTable {
    pub name: &'static str,
    pub version: u32,
    pub columns: &'static [(usize, &'static str)],
}

/// Column layout of point files produced by the ICGEM calculation service
pub const ICGEM_POINT_COLUMNS_V1: ColumnTable = ColumnTable {
    name: "icgem-point-calculation",
    version: 1,
    columns: &[
        (1, "identifier (from input)"),
        (2, "longitude  (from input)    [degree]"),
        (3, "latitude   (from input)    [degree]"),
        (4, "h_over_ell (from input)     [meter]"),
        (5, "height_anomaly              [meter]  T(h)/normal_gravity(h)"),
        (6, "height_anomaly_ell          [meter]  T(h=0)/normal_gravity(h=0)"),
        (7, "geoid                       [meter]  h_anomaly_ell + Topo-Term"),
        (8, "gravity_disturbance          [mGal]  gravity(h) - gamma(h)"),
        (9, "gravity_disturbance_sa       [mGal]  sph. approx. (h=0)"),
        (10, "gravity_anomaly              [mGal]  gravity(h) - gamma(h-h_anomaly)"),
        (11, "gravity_anomaly_sa           [mGal]  sph. approx. (h=0)"),
        (12, "gravity_anomaly_bg           [mGal]  gravity_anomaly_sa + Topo-Term"),
        (13, "gravitation                  [mGal]  gravitation(h)"),
        (14, "gravitational_potential [m**2/s**2]  gravitational_potential(h)"),
        (15, "gravity                      [mGal]  gravity(h)"),
        (16, "gravity_potential       [m**2/s**2]  gravity_potential(h)"),
        (17, "h_topo_over_ell             [meter]  geoid + topo over geoid (model)"),
        (18, "h_topo_over_geoid           [meter]  topo over geoid (from model)"),
        (19, "normal_gravity               [mGal]  normal_gravity(h)"),
        (20, "normal_gravity_ell           [mGal]  normal_gravity(h=0)"),
        (21, "vertical_deflection_abs    [arcsec]  abs(vertical_deflection(h))"),
        (22, "vertical_deflection_ew     [arcsec]  vertical_deflection_east-west(h)"),
        (23, "vertical_deflection_ns     [arcsec]  vertical_deflection_north-south(h)"),
    ],
};
