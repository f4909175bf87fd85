//! GeoJSON road layers (e.g. roads exported from a GIS or an earlier
//! extraction run)

use std::fs;
use std::path::PathBuf;

use geojson::{Feature, GeoJson};
use log::{debug, info};
use serde_json::Value as JsonValue;

use super::source::GeometrySource;
use crate::{Error, model::RoadRecord};

/// Reads a FeatureCollection, a single Feature or a bare Geometry.
///
/// `name`, `highway` and `length` feature properties become the record
/// attributes.
#[derive(Debug, Clone)]
pub struct GeoJsonSource {
    path: PathBuf,
}

impl GeoJsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GeometrySource for GeoJsonSource {
    fn load(&self) -> Result<Vec<RoadRecord>, Error> {
        info!("Processing road layer (GeoJSON): {}", self.path.display());
        let text = fs::read_to_string(&self.path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open file '{}': {}", self.path.display(), e),
            )
        })?;
        parse_road_layer(&text)
    }
}

pub fn parse_road_layer(text: &str) -> Result<Vec<RoadRecord>, Error> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJsonError(e.to_string()))?;

    let records = match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .map(feature_to_record)
            .collect(),
        GeoJson::Feature(feature) => vec![feature_to_record(feature)],
        GeoJson::Geometry(geometry) => vec![RoadRecord {
            geometry: convert_geometry(geometry),
            ..RoadRecord::default()
        }],
    };

    Ok(records)
}

fn feature_to_record(feature: Feature) -> RoadRecord {
    let text = |key: &str| match feature.property(key)? {
        JsonValue::String(value) => Some(value.clone()),
        JsonValue::Number(value) => Some(value.to_string()),
        _ => None,
    };
    let name = text("name");
    let highway = text("highway");
    let length = match feature.property("length") {
        Some(JsonValue::Number(value)) => value.as_f64(),
        Some(JsonValue::String(value)) => value.trim().parse().ok(),
        _ => None,
    };

    RoadRecord {
        geometry: feature.geometry.and_then(convert_geometry),
        name,
        highway,
        length,
    }
}

fn convert_geometry(geometry: geojson::Geometry) -> Option<geo::Geometry<f64>> {
    geo::Geometry::<f64>::try_from(geometry)
        .map_err(|e| debug!("Skipping unconvertible GeoJSON geometry: {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use geo::Geometry;

    use super::*;

    const LAYER: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "Rua Amazonas", "highway": "secondary", "length": 120.5},
                "geometry": {"type": "LineString", "coordinates": [[-46.57, -23.62], [-46.56, -23.61]]}
            },
            {
                "type": "Feature",
                "properties": {"name": null},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0]], [[5.0, 5.0], [6.0, 5.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
            },
            {"type": "Feature", "properties": null, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let records = parse_road_layer(LAYER).unwrap();
        assert_eq!(records.len(), 4);

        let first = &records[0];
        assert_eq!(first.name.as_deref(), Some("Rua Amazonas"));
        assert_eq!(first.highway.as_deref(), Some("secondary"));
        assert_eq!(first.length, Some(120.5));
        match &first.geometry {
            Some(Geometry::LineString(line)) => {
                assert_eq!(line.0[0].x, -46.57);
                assert_eq!(line.0[0].y, -23.62);
            }
            other => panic!("unexpected geometry {other:?}"),
        }

        assert_eq!(records[1].name, None);
        assert!(matches!(records[1].geometry, Some(Geometry::MultiLineString(_))));
        assert!(matches!(records[2].geometry, Some(Geometry::Point(_))));
        assert!(records[3].geometry.is_none());
    }

    #[test]
    fn test_numeric_strings_and_numbers() {
        let records = parse_road_layer(
            r#"{
                "type": "Feature",
                "properties": {"name": 25, "highway": "primary", "length": " 120.5 "},
                "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 1.0]]}
            }"#,
        )
        .unwrap();

        assert_eq!(records[0].name.as_deref(), Some("25"));
        assert_eq!(records[0].length, Some(120.5));

        let records = parse_road_layer(
            r#"{
                "type": "Feature",
                "properties": {"length": "unknown"},
                "geometry": null
            }"#,
        )
        .unwrap();
        assert_eq!(records[0].length, None);
    }

    #[test]
    fn test_bare_geometry() {
        let records =
            parse_road_layer(r#"{"type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 1.0]]}"#)
                .unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].name.is_none());
        assert!(records[0].geometry.is_some());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            parse_road_layer("{not json"),
            Err(Error::GeoJsonError(_))
        ));
    }
}
