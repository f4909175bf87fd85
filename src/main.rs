//! # roadgraph
//!
//! Turns drivable road centerlines into a routing graph and writes it as
//! `nodes.json` and `edges.json`.

use anyhow::{Context, Result};
use clap::Parser;
use roadgraph_core::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod progress;

use cli::Args;
use config::AppConfig;
use progress::RoadProgress;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = AppConfig::resolve(&args)?;
    tracing::info!(
        "building road graph from {:?} into {:?}",
        config.graph.input,
        config.output_dir
    );

    let progress = RoadProgress::new();
    let graph = create_road_graph(&config.graph, &progress);
    progress.finish();
    let graph = graph.with_context(|| {
        format!(
            "failed to build road graph from {}",
            config.graph.input.display()
        )
    })?;

    let export = export(&graph, config.export);
    let (nodes, edges) = write_json(&config.output_dir, &export).with_context(|| {
        format!(
            "failed to write graph into {}",
            config.output_dir.display()
        )
    })?;

    tracing::info!(
        "graph nodes={} edges={} written to {} and {}",
        export.nodes.len(),
        export.edges.len(),
        nodes.display(),
        edges.display()
    );

    Ok(())
}
