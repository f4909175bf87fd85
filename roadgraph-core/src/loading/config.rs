use std::path::PathBuf;

use serde::Deserialize;

use super::source::{BoundingBox, InputFormat};
use crate::algo::{DuplicatePolicy, EdgeShape, EdgeWeighting};
use crate::model::Sentinels;

/// São Paulo extract read when no input is given
pub const DEFAULT_INPUT: &str = "data/sao-paulo-latest.osm.pbf";

/// Configuration for building a road graph
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphBuildConfig {
    /// Road data file (OSM PBF or GeoJSON)
    pub input: PathBuf,
    /// Input format, detected from the file extension when unset
    pub format: Option<InputFormat>,
    /// Only roads intersecting this box are kept
    pub bbox: Option<BoundingBox>,
    pub edge_shape: EdgeShape,
    pub duplicates: DuplicatePolicy,
    pub weighting: EdgeWeighting,
    pub sentinels: Sentinels,
}

impl Default for GraphBuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            format: None,
            bbox: None,
            edge_shape: EdgeShape::default(),
            duplicates: DuplicatePolicy::default(),
            weighting: EdgeWeighting::default(),
            sentinels: Sentinels::default(),
        }
    }
}
