//! Road records produced by geometry sources

use geo::Geometry;
use serde::Deserialize;

/// One road as delivered by a geometry source.
///
/// Geometry coordinates are `x = longitude`, `y = latitude`.
#[derive(Debug, Clone, Default)]
pub struct RoadRecord {
    pub geometry: Option<Geometry<f64>>,
    pub name: Option<String>,
    /// Road class (`highway` tag)
    pub highway: Option<String>,
    /// Precomputed length in meters, if the source has one
    pub length: Option<f64>,
}

impl RoadRecord {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_highway(mut self, highway: impl Into<String>) -> Self {
        self.highway = Some(highway.into());
        self
    }

    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }
}

/// Values substituted for missing road attributes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Sentinels {
    pub unnamed: String,
    pub unknown_highway: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            unnamed: "Via sem nome".to_string(),
            unknown_highway: "unknown".to_string(),
        }
    }
}

/// Road attributes with every missing value already replaced
#[derive(Debug, Clone, PartialEq)]
pub struct RoadAttributes {
    pub name: String,
    pub highway: String,
    pub reported_length: Option<f64>,
}

impl RoadAttributes {
    pub fn resolve(record: &RoadRecord, sentinels: &Sentinels) -> Self {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            name: non_blank(&record.name).unwrap_or_else(|| sentinels.unnamed.clone()),
            highway: non_blank(&record.highway)
                .unwrap_or_else(|| sentinels.unknown_highway.clone()),
            reported_length: record
                .length
                .filter(|length| length.is_finite() && *length > 0.0),
        }
    }
}
