//! Graph construction algorithms: segment decomposition, edge insertion
//! and component filtering.

pub mod components;
pub mod graph_builder;
pub mod planar;
pub mod segments;

pub use components::{
    ComponentSummary, connected_components, largest_component, retain_largest_component,
};
pub use graph_builder::{
    BuildStats, DuplicatePolicy, EdgeDraft, EdgeInsertion, EdgeWeighting, RoadGraphBuilder,
};
pub use planar::{METERS_PER_DEGREE, planar_distance, planar_length};
pub use segments::{EdgeShape, Junctions, RoadSegment, SegmentDecomposer, is_supported, line_parts};
