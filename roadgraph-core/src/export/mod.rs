//! Flat node and edge lists for downstream consumers

mod records;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

pub use records::{EdgeRecord, NodeRecord, PathPoint, TravelMode};

use crate::{Error, model::RoadGraph};

pub const NODES_FILE: &str = "nodes.json";
pub const EDGES_FILE: &str = "edges.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Emit `nome`, `nomeRua` and `highway`
    pub street_names: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { street_names: true }
    }
}

/// Exported graph. Edge endpoints always refer to ids present in `nodes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadGraphExport {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// Flattens `graph` in its internal node and edge order
pub fn export(graph: &RoadGraph, options: ExportOptions) -> RoadGraphExport {
    let g = &graph.graph;

    let nodes = g
        .node_weights()
        .map(|node| NodeRecord {
            id: node.key.to_string(),
            lat: node.position.lat,
            lng: node.position.lon,
            name: options.street_names.then(|| node.name.clone()),
        })
        .collect();

    let edges = g
        .edge_indices()
        .filter_map(|edge| {
            let (source, target) = g.edge_endpoints(edge)?;
            let weight = &g[edge];
            Some(EdgeRecord {
                from: g[source].key.to_string(),
                to: g[target].key.to_string(),
                distance: weight.distance(),
                travel_time: 0.0,
                mode: TravelMode::Car,
                highway: options.street_names.then(|| weight.highway.clone()),
                street_name: options.street_names.then(|| weight.name.clone()),
                path: weight.path.iter().copied().map(PathPoint::from).collect(),
            })
        })
        .collect();

    RoadGraphExport { nodes, edges }
}

/// Writes `nodes.json` and `edges.json` into `output_dir`, creating it if
/// needed. Returns the two written paths.
pub fn write_json(
    output_dir: &Path,
    export: &RoadGraphExport,
) -> Result<(PathBuf, PathBuf), Error> {
    fs::create_dir_all(output_dir)?;

    let nodes_path = output_dir.join(NODES_FILE);
    let edges_path = output_dir.join(EDGES_FILE);
    write_pretty(&nodes_path, &export.nodes)?;
    write_pretty(&edges_path, &export.edges)?;

    info!(
        "Saved {} nodes to {} and {} edges to {}",
        export.nodes.len(),
        nodes_path.display(),
        export.edges.len(),
        edges_path.display()
    );
    Ok((nodes_path, edges_path))
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to create file '{}': {}", path.display(), e),
        )
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;
    use serde_json::{Value, json};

    use super::*;
    use crate::algo::{DuplicatePolicy, EdgeDraft, EdgeWeighting, RoadGraphBuilder};
    use crate::model::Coordinate;

    fn sample_graph() -> RoadGraph {
        let mut builder =
            RoadGraphBuilder::new("Via sem nome", DuplicatePolicy::Overwrite, EdgeWeighting::Planar);
        let a = builder.resolve(Coordinate::new(0.0, 0.0));
        let b = builder.resolve(Coordinate::new(0.0, 0.002));
        let c = builder.resolve(Coordinate::new(0.001, 0.002));
        builder.add_edge(
            a,
            b,
            EdgeDraft {
                weight: 222.0,
                highway: "residential".to_string(),
                name: "Rua Ção".to_string(),
                path: vec![Coordinate::new(0.0, 0.001)],
            },
        );
        builder.add_edge(
            b,
            c,
            EdgeDraft {
                weight: 111.0,
                highway: "unknown".to_string(),
                name: "Via sem nome".to_string(),
                path: Vec::new(),
            },
        );
        builder.finish().0
    }

    #[test]
    fn test_edges_reference_exported_nodes() {
        let export = export(&sample_graph(), ExportOptions::default());
        let ids: HashSet<&str> = export.nodes.iter().map(|n| n.id.as_str()).collect();

        assert_eq!(export.nodes.len(), 3);
        assert_eq!(export.edges.len(), 2);
        for edge in &export.edges {
            assert!(ids.contains(edge.from.as_str()));
            assert!(ids.contains(edge.to.as_str()));
        }
    }

    #[test]
    fn test_json_shape() {
        let export = export(&sample_graph(), ExportOptions::default());
        let node = serde_json::to_value(&export.nodes[0]).unwrap();
        let edge = serde_json::to_value(&export.edges[0]).unwrap();

        assert_eq!(
            node,
            json!({"id": "0.000000,0.000000", "lat": 0.0, "lng": 0.0, "nome": "Via sem nome"})
        );
        assert_eq!(edge["from"], "0.000000,0.000000");
        assert_eq!(edge["to"], "0.000000,0.002000");
        assert_eq!(edge["distance"], 222.0);
        assert_eq!(edge["tempo"], 0.0);
        assert_eq!(edge["modo"], "car");
        assert_eq!(edge["highway"], "residential");
        assert_eq!(edge["nomeRua"], "Rua Ção");
        assert_eq!(edge["path"], json!([{"lat": 0.0, "lng": 0.001}]));
    }

    #[test]
    fn test_names_can_be_omitted() {
        let export = export(&sample_graph(), ExportOptions { street_names: false });
        let node = serde_json::to_value(&export.nodes[0]).unwrap();
        let edge = serde_json::to_value(&export.edges[1]).unwrap();

        assert!(node.get("nome").is_none());
        assert!(edge.get("nomeRua").is_none());
        assert!(edge.get("highway").is_none());
        assert_eq!(edge["path"], Value::Array(Vec::new()));
    }

    #[test]
    fn test_write_json_pretty_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data");
        let (nodes_path, edges_path) =
            write_json(&output, &export(&sample_graph(), ExportOptions::default())).unwrap();

        let nodes = std::fs::read_to_string(nodes_path).unwrap();
        let edges = std::fs::read_to_string(edges_path).unwrap();
        assert!(nodes.starts_with("[\n  {\n    \"id\""));
        assert!(edges.contains("Rua Ção"));
        let parsed: Value = serde_json::from_str(&edges).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }
}
