//! ICGEM Reader Library
//!
//! A Rust library for reading ICGEM (International Centre for Global Earth
//! Models) point tables and grid files of gravity-field functionals.
//!
//! This library provides tools for:
//! - Splitting the free-text header from the numeric data region
//! - Recovering column names from the numbered "description of columns" block
//! - Loading point files into polars DataFrames with file row order preserved
//! - Reconstructing grid point lists into dense lon/lat lattices
//!
//! ```no_run
//! use icgem_reader::IcgemGrid;
//!
//! # fn main() -> icgem_reader::Result<()> {
//! let mut reader = IcgemGrid::new("height_anomaly_EIGEN-6C4.gdf");
//! reader.read()?;
//! if let Some(grid) = reader.grid() {
//!     println!("{:?} cells, {} filled", grid.shape(), grid.filled_cells());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod header;
pub mod models;
pub mod rows;
pub mod source;
pub mod table;

pub use config::{ColumnNaming, ReaderConfig};
pub use error::{IcgemError, Result};
pub use grid::IcgemGrid;
pub use models::{
    ColumnDescriptions, DataVariable, FileKind, Grid, IcgemHeader, Metadata, ReadStats,
};
pub use table::IcgemTable;
