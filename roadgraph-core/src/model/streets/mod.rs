//! Road network model

pub mod components;
pub mod network;

pub use components::{COORDINATE_PRECISION, Coordinate, NodeKey, RoadEdge, RoadNode};
pub use network::RoadGraph;
