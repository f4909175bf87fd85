//! Run configuration: an optional TOML file with command-line overrides
//!
//! ```toml
//! output_dir = "data"
//!
//! [graph]
//! input = "data/sao-paulo-latest.osm.pbf"
//! edge_shape = "polyline"
//! duplicates = "preserve-first"
//! bbox = { min_lon = -46.62, min_lat = -23.66, max_lon = -46.52, max_lat = -23.57 }
//!
//! [graph.sentinels]
//! unnamed = "Via sem nome"
//!
//! [export]
//! street_names = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roadgraph_core::prelude::{ExportOptions, GraphBuildConfig};
use serde::Deserialize;

use crate::cli::Args;

pub const DEFAULT_OUTPUT_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory receiving nodes.json and edges.json
    pub output_dir: PathBuf,
    pub graph: GraphBuildConfig,
    pub export: ExportOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            graph: GraphBuildConfig::default(),
            export: ExportOptions::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Loads the file named by `--config`, if any, then applies the flags
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    fn apply(&mut self, args: &Args) {
        if let Some(input) = &args.input {
            self.graph.input.clone_from(input);
        }
        if let Some(output_dir) = &args.output_dir {
            self.output_dir.clone_from(output_dir);
        }
        if args.format.is_some() {
            self.graph.format = args.format;
        }
        if args.bbox.is_some() {
            self.graph.bbox = args.bbox;
        }
        if let Some(shape) = args.edge_shape {
            self.graph.edge_shape = shape.into();
        }
        if let Some(duplicates) = args.duplicates {
            self.graph.duplicates = duplicates.into();
        }
        if let Some(weight) = args.weight {
            self.graph.weighting = weight.into();
        }
        if args.no_street_names {
            self.export.street_names = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use roadgraph_core::prelude::{DuplicatePolicy, EdgeShape, EdgeWeighting, InputFormat};

    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.graph.input,
            PathBuf::from("data/sao-paulo-latest.osm.pbf")
        );
        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert!(config.export.street_names);
    }

    #[test]
    fn test_parse_full_file() {
        let config: AppConfig = toml::from_str(
            r#"
            output_dir = "out"

            [graph]
            input = "roads.geojson"
            format = "geojson"
            edge_shape = "polyline"
            duplicates = "preserve-first"
            weighting = "reported-length"
            bbox = { min_lon = -46.62, min_lat = -23.66, max_lon = -46.52, max_lat = -23.57 }

            [graph.sentinels]
            unnamed = "Sem nome"

            [export]
            street_names = false
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.graph.format, Some(InputFormat::GeoJson));
        assert_eq!(config.graph.edge_shape, EdgeShape::Polyline);
        assert_eq!(config.graph.duplicates, DuplicatePolicy::PreserveFirst);
        assert_eq!(config.graph.weighting, EdgeWeighting::ReportedLength);
        assert_eq!(config.graph.bbox.unwrap().max_lat, -23.57);
        assert_eq!(config.graph.sentinels.unnamed, "Sem nome");
        assert_eq!(config.graph.sentinels.unknown_highway, "unknown");
        assert!(!config.export.street_names);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<AppConfig>("ouptut_dir = \"x\"").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadgraph.toml");
        fs::write(
            &path,
            "output_dir = \"from-file\"\n[graph]\nedge_shape = \"polyline\"\n",
        )
        .unwrap();

        let args = Args::try_parse_from([
            "roadgraph",
            "--config",
            path.to_str().unwrap(),
            "--output-dir",
            "from-flag",
            "--duplicates",
            "preserve-first",
            "--no-street-names",
        ])
        .unwrap();
        let config = AppConfig::resolve(&args).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("from-flag"));
        assert_eq!(config.graph.edge_shape, EdgeShape::Polyline);
        assert_eq!(config.graph.duplicates, DuplicatePolicy::PreserveFirst);
        assert!(!config.export.street_names);
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::try_parse_from(["roadgraph", "--config", "missing.toml"]).unwrap();
        assert!(AppConfig::resolve(&args).is_err());
    }
}
