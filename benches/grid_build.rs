use criterion::{Criterion, black_box, criterion_group, criterion_main};
use icgem_reader::grid::build_grid;
use icgem_reader::header::{HeaderVariant, parse_header};
use icgem_reader::models::{Metadata, ReadStats};
use std::path::Path;

/// A 0.1 degree grid over a 36 x 18 degree window
fn synthetic_grid() -> String {
    let mut text = String::from("functional height_anomaly\nunit meter\nend_of_head\n");
    for lat_step in 0..180 {
        for lon_step in 0..360 {
            let lon = 60.0 + lon_step as f64 * 0.1;
            let lat = 40.0 + lat_step as f64 * 0.1;
            text.push_str(&format!("{:.4} {:.4} 0.0000 {:.4}\n", lon, lat, lon - lat));
        }
    }
    text
}

fn bench_grid_build(c: &mut Criterion) {
    let text = synthetic_grid();
    let lines: Vec<&str> = text.lines().collect();
    let path = Path::new("synthetic.gdf");

    c.bench_function("parse_header", |b| {
        b.iter(|| parse_header(black_box(&lines), HeaderVariant::Grid, path))
    });

    c.bench_function("build_grid_64800_points", |b| {
        b.iter(|| {
            let mut stats = ReadStats::default();
            build_grid(black_box(&lines), 3, &Metadata::new(), path, &mut stats)
        })
    });
}

criterion_group!(benches, bench_grid_build);
criterion_main!(benches);
