//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use roadgraph_core::prelude::{BoundingBox, DuplicatePolicy, EdgeShape, EdgeWeighting, InputFormat};

/// Builds a drivable road graph and writes it as `nodes.json` and
/// `edges.json`
#[derive(Debug, Parser)]
#[command(name = "roadgraph", version)]
#[command(long_about = "Builds a routing graph from road centerlines:
  roadgraph                                   # data/sao-paulo-latest.osm.pbf -> data/
  roadgraph --input roads.geojson --output-dir out
  roadgraph --bbox -46.62,-23.66,-46.52,-23.57 --edge-shape polyline --duplicates preserve-first")]
pub struct Args {
    /// TOML configuration file, overridden by the flags below
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Road data file (.osm.pbf or .geojson)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving nodes.json and edges.json
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Input format (osm, geojson), detected from the extension by default
    #[arg(long)]
    pub format: Option<InputFormat>,

    /// Keep roads touching min_lon,min_lat,max_lon,max_lat
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    #[arg(long, value_enum)]
    pub edge_shape: Option<EdgeShapeArg>,

    /// What to do when two roads connect the same pair of nodes
    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicatesArg>,

    /// Edge distance source
    #[arg(long, value_enum)]
    pub weight: Option<WeightArg>,

    /// Leave street names and highway classes out of the output
    #[arg(long)]
    pub no_street_names: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeShapeArg {
    /// One edge per pair of consecutive vertices
    Segment,
    /// One edge per stretch between junctions, keeping its path
    Polyline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    Overwrite,
    PreserveFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeightArg {
    /// Flat-earth degrees times 111000
    Planar,
    /// Length attribute of the road, prorated over its edges
    ReportedLength,
}

impl From<EdgeShapeArg> for EdgeShape {
    fn from(value: EdgeShapeArg) -> Self {
        match value {
            EdgeShapeArg::Segment => Self::Segment,
            EdgeShapeArg::Polyline => Self::Polyline,
        }
    }
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(value: DuplicatesArg) -> Self {
        match value {
            DuplicatesArg::Overwrite => Self::Overwrite,
            DuplicatesArg::PreserveFirst => Self::PreserveFirst,
        }
    }
}

impl From<WeightArg> for EdgeWeighting {
    fn from(value: WeightArg) -> Self {
        match value {
            WeightArg::Planar => Self::Planar,
            WeightArg::ReportedLength => Self::ReportedLength,
        }
    }
}
