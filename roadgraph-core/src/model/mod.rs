//! Data model for the road routing graph
//!
//! Contains raw road records as they come out of a geometry source and
//! the deduplicated graph built from them.

pub mod record;
pub mod streets;

pub use record::{RoadAttributes, RoadRecord, Sentinels};
pub use streets::{COORDINATE_PRECISION, Coordinate, NodeKey, RoadEdge, RoadGraph, RoadNode};
