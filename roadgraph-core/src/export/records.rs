//! Serialized node and edge shapes of `nodes.json` and `edges.json`

use serde::Serialize;

use crate::{Distance, model::Coordinate};

/// Travel mode label attached to every exported edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Car,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for PathPoint {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            lat: coordinate.lat,
            lng: coordinate.lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub distance: Distance,
    /// Travel time in seconds, filled in by consumers
    #[serde(rename = "tempo")]
    pub travel_time: f64,
    #[serde(rename = "modo")]
    pub mode: TravelMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highway: Option<String>,
    #[serde(rename = "nomeRua", skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    pub path: Vec<PathPoint>,
}
