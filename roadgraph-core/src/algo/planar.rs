//! Flat-earth distance approximation.
//!
//! Treats one degree of latitude or longitude as 111 km regardless of
//! position. Only adequate for small, city-scale extracts.

use geo::{Distance as _, Euclidean, Point};
use itertools::Itertools;

use crate::{Distance, model::Coordinate};

/// Meters per degree
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// `sqrt(dlat^2 + dlon^2) * 111000`
pub fn planar_distance(a: Coordinate, b: Coordinate) -> Distance {
    Euclidean.distance(Point::from(a), Point::from(b)) * METERS_PER_DEGREE
}

/// Sum of [`planar_distance`] over consecutive points
pub fn planar_length(points: impl IntoIterator<Item = Coordinate>) -> Distance {
    points
        .into_iter()
        .tuple_windows()
        .map(|(a, b)| planar_distance(a, b))
        .sum()
}
