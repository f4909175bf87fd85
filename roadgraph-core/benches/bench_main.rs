use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::{Coord, LineString};
use roadgraph_core::prelude::*;

/// Square street grid: one record per row and per column, crossing at
/// every vertex.
fn synthetic_grid(size: usize) -> Vec<RoadRecord> {
    let step = 0.0005;
    let mut records = Vec::with_capacity(size * 2);

    for row in 0..size {
        let points: Vec<Coord<f64>> = (0..size)
            .map(|col| Coord {
                x: -46.62 + col as f64 * step,
                y: -23.66 + row as f64 * step,
            })
            .collect();
        records.push(
            RoadRecord::new(LineString::new(points))
                .with_name(format!("Rua {row}"))
                .with_highway("residential"),
        );
    }

    for col in 0..size {
        let points: Vec<Coord<f64>> = (0..size)
            .map(|row| Coord {
                x: -46.62 + col as f64 * step,
                y: -23.66 + row as f64 * step,
            })
            .collect();
        records.push(
            RoadRecord::new(LineString::new(points))
                .with_name(format!("Avenida {col}"))
                .with_highway("secondary"),
        );
    }

    records
}

fn bench_build_graph(c: &mut Criterion) {
    let records = synthetic_grid(150);

    let segments = GraphBuildConfig::default();
    c.bench_function("road_graph_segments_150x150", |b| {
        b.iter(|| {
            let graph = create_road_graph_from(&segments, black_box(&records), &NoProgress);
            black_box(graph.map(|g| (g.node_count(), g.edge_count())).ok());
        });
    });

    let polylines = GraphBuildConfig {
        edge_shape: EdgeShape::Polyline,
        duplicates: DuplicatePolicy::PreserveFirst,
        ..GraphBuildConfig::default()
    };
    c.bench_function("road_graph_polylines_150x150", |b| {
        b.iter(|| {
            let graph = create_road_graph_from(&polylines, black_box(&records), &NoProgress);
            black_box(graph.map(|g| (g.node_count(), g.edge_count())).ok());
        });
    });
}

fn bench_export(c: &mut Criterion) {
    let records = synthetic_grid(150);
    let graph = create_road_graph_from(&GraphBuildConfig::default(), &records, &NoProgress)
        .expect("grid builds");

    c.bench_function("road_graph_export_150x150", |b| {
        b.iter(|| {
            let export = export(black_box(&graph), ExportOptions::default());
            black_box(export.edges.len());
        });
    });
}

criterion_group!(benches, bench_build_graph, bench_export);
criterion_main!(benches);
