use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("No usable road data: {0}")]
    EmptyExtraction(String),
    #[error("Road graph is empty after construction")]
    EmptyGraph,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("OSM error: {0}")]
    OsmError(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
