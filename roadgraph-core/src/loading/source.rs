//! Geometry sources and input selection

use std::path::{Path, PathBuf};
use std::str::FromStr;

use geo::{Intersects, Rect, coord};
use serde::Deserialize;

use super::geojson_layer::GeoJsonSource;
use super::osm::OsmPbfSource;
use crate::{Error, model::RoadRecord};

/// Supplies raw road records
pub trait GeometrySource {
    fn load(&self) -> Result<Vec<RoadRecord>, Error>;
}

impl GeometrySource for Vec<RoadRecord> {
    fn load(&self) -> Result<Vec<RoadRecord>, Error> {
        Ok(self.clone())
    }
}

impl<S: GeometrySource + ?Sized> GeometrySource for Box<S> {
    fn load(&self) -> Result<Vec<RoadRecord>, Error> {
        (**self).load()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// OpenStreetMap protobuf extract
    Osm,
    /// GeoJSON road layer
    GeoJson,
}

impl InputFormat {
    /// Guesses the format from the file extension
    pub fn detect(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pbf") => Ok(Self::Osm),
            Some("geojson" | "json") => Ok(Self::GeoJson),
            _ => Err(Error::InvalidData(format!(
                "Cannot tell the input format of {}, expected .osm.pbf, .geojson or .json",
                path.display()
            ))),
        }
    }

    pub fn open(self, path: impl Into<PathBuf>) -> Box<dyn GeometrySource> {
        match self {
            Self::Osm => Box::new(OsmPbfSource::new(path)),
            Self::GeoJson => Box::new(GeoJsonSource::new(path)),
        }
    }
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "osm" | "pbf" => Ok(Self::Osm),
            "geojson" | "json" => Ok(Self::GeoJson),
            other => Err(Error::InvalidData(format!("Unknown input format: {other}"))),
        }
    }
}

/// Geographic filter window in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, Error> {
        let bbox = Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let values = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(format!(
                "Bounding box has non-finite bounds: {self:?}"
            )));
        }
        if self.min_lon > self.max_lon || self.min_lat > self.max_lat {
            return Err(Error::InvalidData(format!(
                "Bounding box minimum exceeds maximum: {self:?}"
            )));
        }
        Ok(())
    }

    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    /// Whether any part of the record's geometry touches the box
    pub fn intersects(&self, record: &RoadRecord) -> bool {
        let rect = self.rect();
        record
            .geometry
            .as_ref()
            .is_some_and(|geometry| geometry.intersects(&rect))
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parses `min_lon,min_lat,max_lon,max_lat`
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let bounds = value
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidData(format!("Invalid bounding box '{value}': {e}")))?;

        match bounds.as_slice() {
            &[min_lon, min_lat, max_lon, max_lat] => {
                Self::new(min_lon, min_lat, max_lon, max_lat)
            }
            _ => Err(Error::InvalidData(format!(
                "Bounding box needs 4 values (min_lon,min_lat,max_lon,max_lat), got '{value}'"
            ))),
        }
    }
}
