//! Road graph with its node registry

use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, UnGraph};

use super::components::{Coordinate, NodeKey, RoadEdge, RoadNode};
use crate::RoadNodeId;

/// Undirected road network.
///
/// Nodes are registered through [`RoadGraph::resolve`], which collapses
/// every coordinate rounding to the same [`NodeKey`] into one node.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub graph: UnGraph<RoadNode, RoadEdge>,
    index: HashMap<NodeKey, RoadNodeId>,
    unnamed: String,
}

impl RoadGraph {
    /// Creates an empty graph; `unnamed` is the display name of nodes
    /// no named road has touched yet.
    pub fn new(unnamed: impl Into<String>) -> Self {
        Self {
            graph: UnGraph::default(),
            index: HashMap::new(),
            unnamed: unnamed.into(),
        }
    }

    /// Returns the node for `coordinate`, creating it at the rounded
    /// position the first time its key is seen.
    pub fn resolve(&mut self, coordinate: Coordinate) -> RoadNodeId {
        let key = coordinate.key();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = self.graph.add_node(RoadNode {
            key: key.clone(),
            position: coordinate.rounded(),
            name: self.unnamed.clone(),
        });
        self.index.insert(key, id);
        id
    }

    /// Sets the display name of `node`, replacing any earlier one.
    pub fn annotate(&mut self, node: RoadNodeId, name: &str) {
        if let Some(node) = self.graph.node_weight_mut(node) {
            name.clone_into(&mut node.name);
        }
    }

    pub fn node_id(&self, key: &NodeKey) -> Option<RoadNodeId> {
        self.index.get(key).copied()
    }

    pub fn node(&self, id: RoadNodeId) -> Option<&RoadNode> {
        self.graph.node_weight(id)
    }

    pub fn edge_between(&self, a: RoadNodeId, b: RoadNodeId) -> Option<&RoadEdge> {
        self.graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    pub(crate) fn find_edge(&self, a: RoadNodeId, b: RoadNodeId) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn unnamed(&self) -> &str {
        &self.unnamed
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Replaces the underlying graph and rebuilds the key index from it.
    pub(crate) fn with_graph(graph: UnGraph<RoadNode, RoadEdge>, unnamed: String) -> Self {
        let index = graph
            .node_indices()
            .map(|id| (graph[id].key.clone(), id))
            .collect();
        Self {
            graph,
            index,
            unnamed,
        }
    }
}
