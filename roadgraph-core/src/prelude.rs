// Re-export key components
pub use crate::algo::{
    DuplicatePolicy, EdgeShape, EdgeWeighting, RoadGraphBuilder, SegmentDecomposer,
    retain_largest_component,
};
pub use crate::export::{ExportOptions, RoadGraphExport, export, write_json};
pub use crate::loading::{
    BoundingBox, GeometrySource, GraphBuildConfig, InputFormat, create_road_graph,
    create_road_graph_from,
};
pub use crate::model::{Coordinate, RoadGraph, RoadRecord, Sentinels};
pub use crate::progress::{NoProgress, Progress};

// Core types for the road network
pub use crate::Distance; // meters
pub use crate::Error;
pub use crate::RoadNodeId;
