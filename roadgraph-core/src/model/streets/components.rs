//! Road network components - coordinates, nodes and edges

use std::fmt;

use geo::{Coord, Point};

use crate::Distance;

/// Number of decimal digits compared when deciding whether two points coincide
pub const COORDINATE_PRECISION: usize = 6;

const PRECISION_SCALE: f64 = 1e6;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Position snapped to [`COORDINATE_PRECISION`] decimal digits
    pub fn rounded(self) -> Self {
        Self {
            lat: round_to_precision(self.lat),
            lon: round_to_precision(self.lon),
        }
    }

    /// Canonical key of the point this coordinate rounds to
    pub fn key(self) -> NodeKey {
        NodeKey::from_coordinate(self)
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lon: coord.x,
        }
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.lon, coordinate.lat)
    }
}

fn round_to_precision(value: f64) -> f64 {
    // adding 0.0 folds -0.0 into 0.0
    (value * PRECISION_SCALE).round() / PRECISION_SCALE + 0.0
}

/// Canonical node key: the rounded `"lat,lon"` string.
///
/// Two coordinates share a key exactly when they round to the same
/// position, so the key doubles as the exported node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        let rounded = coordinate.rounded();
        Self(format!(
            "{:.prec$},{:.prec$}",
            rounded.lat,
            rounded.lon,
            prec = COORDINATE_PRECISION
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Canonical key, also the exported identifier
    pub key: NodeKey,
    /// Rounded node position
    pub position: Coordinate,
    /// Name of the last road observed touching this node
    pub name: String,
}

/// Road graph edge (street segment or polyline between junctions)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Length in meters
    pub weight: Distance,
    /// Road class, e.g. `residential`
    pub highway: String,
    /// Street name
    pub name: String,
    /// Intermediate points between the two endpoints, empty for elementary segments
    pub path: Vec<Coordinate>,
}

impl RoadEdge {
    pub fn distance(&self) -> Distance {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_uses_six_decimals() {
        let key = Coordinate::new(-23.6123456789, -46.55).key();
        assert_eq!(key.as_str(), "-23.612346,-46.550000");
    }

    #[test]
    fn test_sub_precision_differences_share_key() {
        let a = Coordinate::new(10.000_000_1, 20.000_000_4);
        let b = Coordinate::new(9.999_999_9, 19.999_999_6);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.rounded(), b.rounded());
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let tiny_negative = Coordinate::new(-0.000_000_1, -0.000_000_2);
        let zero = Coordinate::new(0.0, 0.0);
        assert_eq!(tiny_negative.key(), zero.key());
        assert_eq!(zero.key().as_str(), "0.000000,0.000000");
    }

    #[test]
    fn test_geo_coord_is_lon_lat() {
        let coordinate = Coordinate::from(Coord { x: -46.5, y: -23.6 });
        assert_eq!(coordinate.lat, -23.6);
        assert_eq!(coordinate.lon, -46.5);
    }
}
