//! This module is responsible for loading road data from various sources
//! (OSM, GeoJSON) and building the road routing graph.

mod builder;
mod config;
pub mod geojson_layer;
pub mod osm;
pub mod source;

pub use builder::{create_road_graph, create_road_graph_from};
pub use config::{DEFAULT_INPUT, GraphBuildConfig};
pub use geojson_layer::{GeoJsonSource, parse_road_layer};
pub use osm::OsmPbfSource;
pub use source::{BoundingBox, GeometrySource, InputFormat};
