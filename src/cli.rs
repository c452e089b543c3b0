//! Command-line interface components.

use crate::config::{ColumnNaming, ReaderConfig};
use crate::error::IcgemError;
use crate::grid::IcgemGrid;
use crate::models::{FileKind, Grid, Metadata, ReadStats};
use crate::table::IcgemTable;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "icgem")]
#[command(about = "Read ICGEM point tables (.dat) and grids (.gdf) and summarise their contents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the ICGEM file; `.gdf` files are read as grids, anything else as point tables
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Text encoding of the file [default: latin1]
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// JSON reader configuration; command-line options override its values
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Only read and print the header metadata
    #[arg(long)]
    pub metadata_only: bool,

    /// Name table columns by the first word of their description
    #[arg(long)]
    pub short_names: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Reader configuration from the optional config file and command line
    pub fn reader_config(&self) -> crate::Result<ReaderConfig> {
        let mut config = match &self.config {
            Some(path) => ReaderConfig::from_json_file(path)?,
            None => ReaderConfig::default(),
        };
        if let Some(encoding) = &self.encoding {
            config = config.with_encoding(encoding.clone());
        }
        if self.short_names {
            config = config.with_column_naming(ColumnNaming::ShortName);
        }
        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("icgem_reader={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Read the file named on the command line and print a summary
pub fn run(args: &Args) -> Result<()> {
    let kind = FileKind::from_path(&args.path);
    debug!("Detected {:?} file: {}", kind, args.path.display());

    match kind {
        FileKind::Points => run_points(args),
        FileKind::Grid => run_grid(args),
    }
}

fn run_points(args: &Args) -> Result<()> {
    let config = args.reader_config().context("Failed to load reader configuration")?;
    let mut reader = IcgemTable::new(&args.path).with_config(config);

    if args.metadata_only {
        let metadata = reader
            .read_header()
            .with_context(|| format!("Failed to read header of {}", args.path.display()))?;
        print_metadata(metadata);
        return Ok(());
    }

    reader
        .read()
        .with_context(|| format!("Failed to read point table {}", args.path.display()))?;
    print_metadata(reader.metadata());

    let data = reader.data().ok_or_else(|| IcgemError::NotRead {
        path: args.path.clone(),
    })?;

    println!("\n{}", "Point table".bright_green().bold());
    println!(
        "  {} {} rows x {} columns",
        "Shape:".bright_cyan(),
        data.height().to_string().bright_white().bold(),
        data.width().to_string().bright_white().bold()
    );
    for (index, name) in reader.column_names().iter().enumerate() {
        let position = format!("{:>3}", index + 1);
        println!("  {}  {}", position.bright_yellow(), name);
    }
    println!("\n{}", data.head(Some(10)));
    print_stats(reader.stats());

    Ok(())
}

fn run_grid(args: &Args) -> Result<()> {
    let config = args.reader_config().context("Failed to load reader configuration")?;
    let mut reader = IcgemGrid::new(&args.path).with_config(config);

    if args.metadata_only {
        let metadata = reader
            .read_header()
            .with_context(|| format!("Failed to read header of {}", args.path.display()))?;
        print_metadata(metadata);
        return Ok(());
    }

    reader
        .read()
        .with_context(|| format!("Failed to read grid {}", args.path.display()))?;
    print_metadata(reader.metadata());

    let grid = reader.grid().ok_or_else(|| IcgemError::NotRead {
        path: args.path.clone(),
    })?;
    print_grid(grid);
    print_stats(reader.stats());

    Ok(())
}

fn print_metadata(metadata: &Metadata) {
    println!("{}", "Metadata".bright_green().bold());
    let width = metadata.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, value) in metadata {
        let padded = format!("{:<width$}", key, width = width);
        println!("  {}  {}", padded.bright_cyan(), value);
    }
}

fn print_grid(grid: &Grid) {
    let (n_lat, n_lon) = grid.shape();
    let total = n_lat * n_lon;
    let filled = grid.filled_cells();

    println!("\n{}", "Grid".bright_green().bold());
    println!(
        "  {} {} lat x {} lon",
        "Shape:".bright_cyan(),
        n_lat.to_string().bright_white().bold(),
        n_lon.to_string().bright_white().bold()
    );
    if let (Some(first), Some(last)) = (grid.lon.first(), grid.lon.last()) {
        println!("  {} {} .. {}", "Longitude:".bright_cyan(), first, last);
    }
    if let (Some(first), Some(last)) = (grid.lat.first(), grid.lat.last()) {
        println!("  {} {} .. {}", "Latitude:".bright_cyan(), first, last);
    }
    println!(
        "  {} {} ({})",
        "Value:".bright_cyan(),
        grid.value.long_name.as_deref().unwrap_or("unnamed"),
        grid.value.units.as_deref().unwrap_or("no unit")
    );
    println!(
        "  {} {} of {}",
        "Filled cells:".bright_cyan(),
        filled.to_string().bright_white(),
        total
    );
    if filled < total {
        println!(
            "  {} {}",
            "Missing cells:".bright_red(),
            (total - filled).to_string().bright_red().bold()
        );
    }
}

fn print_stats(stats: &ReadStats) {
    println!(
        "\n  {} {} lines, {} header, {} data rows",
        "Read:".bright_cyan(),
        stats.total_lines,
        stats.header_lines,
        stats.data_rows
    );
}
