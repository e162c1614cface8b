// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape3D CLI - mesh 3D building geometries and report shape indices.
//!
//! Reads a GeoJSON FeatureCollection with 3D coordinates and writes one JSON
//! line per feature to stdout. Features that cannot be meshed produce an
//! empty mesh (zero volume) rather than an error.
//!
//! Usage: shape3d <INPUT>

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use shape3d_geometry::{
    build_meshes, footprint_circularity, multipolygon_footprint_circularity, BatchSummary, Geometry,
    IndexedMesh,
};
use tracing_subscriber::EnvFilter;

mod config;
mod geojson;

use config::Config;
use geojson::FeatureCollection;

#[derive(Parser)]
#[command(name = "shape3d")]
#[command(author, version, about = "Mesh 3D (multi)polygons and report shape indices", long_about = None)]
struct Cli {
    /// Input GeoJSON FeatureCollection
    input: PathBuf,
}

/// One output line.
#[derive(Debug, Serialize)]
struct FeatureReport {
    index: usize,
    vertices: usize,
    triangles: usize,
    volume: f64,
    surface_area: f64,
    /// Footprint circularity, only for (multi)polygons
    circularity: Option<f64>,
}

impl FeatureReport {
    fn new(index: usize, geometry: Option<&Geometry>, mesh: &IndexedMesh) -> Self {
        let circularity = match geometry {
            Some(Geometry::Polygon(polygon)) => Some(footprint_circularity(polygon)),
            Some(Geometry::MultiPolygon(multi)) => Some(multipolygon_footprint_circularity(multi)),
            _ => None,
        };
        Self {
            index,
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            volume: mesh.volume(),
            surface_area: mesh.surface_area(),
            circularity,
        }
    }
}

fn init_logging(config: &Config) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr);
    if config.pretty_logs {
        builder.pretty().init();
    } else {
        builder.compact().init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(&config);

    tracing::info!(
        input = %cli.input.display(),
        worker_threads = config.worker_threads,
        "Starting shape3d"
    );

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("failed to initialize rayon thread pool")?;

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let collection: FeatureCollection =
        serde_json::from_str(&content).context("input is not a GeoJSON FeatureCollection")?;

    // Features that fail conversion keep their slot as `None`
    let geometries: Vec<Option<Geometry>> = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| match feature.to_geometry() {
            Ok(geometry) => Some(geometry),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping feature geometry");
                None
            }
        })
        .collect();

    let start = Instant::now();
    let valid: Vec<Geometry> = geometries.iter().flatten().cloned().collect();
    let mut meshed = build_meshes(&valid).into_iter();
    let meshes: Vec<IndexedMesh> = geometries
        .iter()
        .map(|g| match g {
            Some(_) => meshed.next().unwrap_or_default(),
            None => IndexedMesh::empty(),
        })
        .collect();

    let summary = BatchSummary::from_meshes(&meshes);
    tracing::info!(
        total = summary.total,
        meshed = summary.meshed,
        empty = summary.empty,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Meshing complete"
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (index, (geometry, mesh)) in geometries.iter().zip(&meshes).enumerate() {
        let report = FeatureReport::new(index, geometry.as_ref(), mesh);
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}
