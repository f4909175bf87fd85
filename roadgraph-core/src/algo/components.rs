//! Connected components of the road graph

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use log::{info, warn};

use crate::{RoadNodeId, model::RoadGraph};

/// Result of reducing a graph to its largest component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentSummary {
    pub components: usize,
    pub kept_nodes: usize,
    pub dropped_nodes: usize,
    pub dropped_edges: usize,
}

/// Connected components in discovery order, each listing its nodes in
/// breadth-first order. Discovery starts from nodes in index order.
pub fn connected_components(graph: &RoadGraph) -> Vec<Vec<RoadNodeId>> {
    let mut components = Vec::new();
    let mut discovered = FixedBitSet::with_capacity(graph.node_count());
    let mut queue = VecDeque::new();

    for start in graph.graph.node_indices() {
        if discovered.put(start.index()) {
            continue;
        }
        queue.push_back(start);

        let mut component = Vec::new();
        while let Some(node) = queue.pop_front() {
            component.push(node);
            for next in graph.graph.neighbors(node) {
                if !discovered.put(next.index()) {
                    queue.push_back(next);
                }
            }
        }
        components.push(component);
    }

    components
}

/// Nodes of the component with the most nodes; the first discovered wins ties.
pub fn largest_component(graph: &RoadGraph) -> Vec<RoadNodeId> {
    pick_largest(connected_components(graph))
}

fn pick_largest(components: Vec<Vec<RoadNodeId>>) -> Vec<RoadNodeId> {
    components
        .into_iter()
        .fold(Vec::new(), |largest, component| {
            if component.len() > largest.len() {
                component
            } else {
                largest
            }
        })
}

/// Restricts `graph` to its largest connected component and every edge
/// inside it. An empty graph comes back unchanged.
pub fn retain_largest_component(graph: RoadGraph) -> (RoadGraph, ComponentSummary) {
    if graph.is_empty() {
        warn!("Road graph has no nodes, nothing to filter");
        return (graph, ComponentSummary::default());
    }

    let components = connected_components(&graph);
    let count = components.len();
    let largest = pick_largest(components);
    info!("Found {count} connected components");

    let mut keep = FixedBitSet::with_capacity(graph.node_count());
    for node in &largest {
        keep.insert(node.index());
    }

    let filtered = graph.graph.filter_map(
        |node, weight| keep.contains(node.index()).then(|| weight.clone()),
        |_, edge| Some(edge.clone()),
    );

    let summary = ComponentSummary {
        components: count,
        kept_nodes: filtered.node_count(),
        dropped_nodes: graph.node_count() - filtered.node_count(),
        dropped_edges: graph.edge_count() - filtered.edge_count(),
    };

    if summary.dropped_nodes > 0 {
        info!(
            "Kept largest component: {} nodes, dropped {} nodes and {} edges",
            summary.kept_nodes, summary.dropped_nodes, summary.dropped_edges
        );
    }

    let unnamed = graph.unnamed().to_string();
    (RoadGraph::with_graph(filtered, unnamed), summary)
}
