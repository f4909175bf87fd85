//! Routing graph construction from road centerline geometries.
//!
//! Road records from a [`GeometrySource`](loading::GeometrySource) are cut
//! into segments, their endpoints collapsed into canonical nodes, weighted
//! with a planar distance and reduced to the largest connected component
//! before being exported as flat node and edge lists.

pub mod algo;
pub mod error;
pub mod export;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod progress;

pub use error::Error;
pub use export::{EdgeRecord, ExportOptions, NodeRecord, RoadGraphExport, export, write_json};
pub use loading::{GraphBuildConfig, create_road_graph, create_road_graph_from};
pub use model::{Coordinate, NodeKey, RoadEdge, RoadGraph, RoadNode, RoadRecord};
pub use progress::{NoProgress, Progress};

/// Index of a node in the road graph
pub type RoadNodeId = petgraph::graph::NodeIndex;

/// Length in meters
pub type Distance = f64;
