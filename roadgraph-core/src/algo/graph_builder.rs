//! Insertion of road segments into the road graph

use log::info;
use serde::Deserialize;

use super::planar::planar_length;
use super::segments::RoadSegment;
use crate::{
    Distance, RoadNodeId,
    model::{Coordinate, RoadEdge, RoadGraph},
};

/// What happens when an edge is inserted between an already connected pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later edge replaces weight, attributes and path
    #[default]
    Overwrite,
    /// The first edge is kept, later ones are discarded
    PreserveFirst,
}

/// Where edge weights come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeWeighting {
    /// Planar distance along the segment
    #[default]
    Planar,
    /// The segment's share of the record's reported length, planar when absent
    ReportedLength,
}

/// Outcome of a single edge insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsertion {
    Inserted,
    Replaced,
    Discarded,
    SelfLoop,
}

/// Counters collected while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    pub skipped_records: usize,
    pub segments: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub discarded: usize,
    pub self_loops: usize,
}

/// Edge data before it is attached to a pair of nodes
#[derive(Debug, Clone)]
pub struct EdgeDraft {
    pub weight: Distance,
    pub highway: String,
    pub name: String,
    pub path: Vec<Coordinate>,
}

/// Builds a [`RoadGraph`] one segment at a time
#[derive(Debug, Clone)]
pub struct RoadGraphBuilder {
    graph: RoadGraph,
    policy: DuplicatePolicy,
    weighting: EdgeWeighting,
    stats: BuildStats,
}

impl RoadGraphBuilder {
    pub fn new(
        unnamed: impl Into<String>,
        policy: DuplicatePolicy,
        weighting: EdgeWeighting,
    ) -> Self {
        Self {
            graph: RoadGraph::new(unnamed),
            policy,
            weighting,
            stats: BuildStats::default(),
        }
    }

    /// Registers `coordinate` in the graph's node registry
    pub fn resolve(&mut self, coordinate: Coordinate) -> RoadNodeId {
        self.graph.resolve(coordinate)
    }

    /// Registers both endpoints, names them after the segment's road and
    /// connects them.
    pub fn add_segment(&mut self, segment: &RoadSegment<'_>) -> EdgeInsertion {
        self.stats.segments += 1;

        let from = self.graph.resolve(segment.from);
        let to = self.graph.resolve(segment.to);
        self.graph.annotate(from, &segment.attributes.name);
        self.graph.annotate(to, &segment.attributes.name);

        let weight = match (self.weighting, segment.reported_length) {
            (EdgeWeighting::ReportedLength, Some(length)) if length > 0.0 => length,
            _ => self.planar_weight(from, to, segment),
        };

        self.add_edge(
            from,
            to,
            EdgeDraft {
                weight,
                highway: segment.attributes.highway.clone(),
                name: segment.attributes.name.clone(),
                path: segment.path.clone(),
            },
        )
    }

    /// Connects two registered nodes under the builder's [`DuplicatePolicy`].
    /// Self-loops are dropped.
    pub fn add_edge(&mut self, a: RoadNodeId, b: RoadNodeId, draft: EdgeDraft) -> EdgeInsertion {
        let outcome = if a == b {
            EdgeInsertion::SelfLoop
        } else if let Some(existing) = self.graph.find_edge(a, b) {
            match self.policy {
                DuplicatePolicy::Overwrite => {
                    let edge = into_edge(a, b, &self.graph, draft);
                    self.graph.graph[existing] = edge;
                    EdgeInsertion::Replaced
                }
                DuplicatePolicy::PreserveFirst => EdgeInsertion::Discarded,
            }
        } else {
            let edge = into_edge(a, b, &self.graph, draft);
            self.graph.graph.add_edge(a, b, edge);
            EdgeInsertion::Inserted
        };

        match outcome {
            EdgeInsertion::Inserted => self.stats.inserted += 1,
            EdgeInsertion::Replaced => self.stats.replaced += 1,
            EdgeInsertion::Discarded => self.stats.discarded += 1,
            EdgeInsertion::SelfLoop => self.stats.self_loops += 1,
        }
        outcome
    }

    pub(crate) fn record_seen(&mut self, supported: bool) {
        self.stats.records += 1;
        if !supported {
            self.stats.skipped_records += 1;
        }
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn finish(self) -> (RoadGraph, BuildStats) {
        let stats = self.stats;
        info!(
            "Built road graph: {} nodes, {} edges from {} records ({} skipped), \
            {} segments ({} replaced, {} duplicates discarded, {} self-loops dropped)",
            self.graph.node_count(),
            self.graph.edge_count(),
            stats.records,
            stats.skipped_records,
            stats.segments,
            stats.replaced,
            stats.discarded,
            stats.self_loops
        );
        (self.graph, stats)
    }

    fn planar_weight(&self, from: RoadNodeId, to: RoadNodeId, segment: &RoadSegment<'_>) -> Distance {
        let endpoint = |id: RoadNodeId| self.graph.graph[id].position;
        planar_length(
            std::iter::once(endpoint(from))
                .chain(segment.path.iter().copied())
                .chain(std::iter::once(endpoint(to))),
        )
    }
}

/// Edge paths run from the stored source endpoint to the stored target.
/// An overwrite arriving in the opposite direction is reversed to match.
fn into_edge(a: RoadNodeId, b: RoadNodeId, graph: &RoadGraph, draft: EdgeDraft) -> RoadEdge {
    let mut path = draft.path;
    if let Some(existing) = graph.find_edge(a, b) {
        if let Some((source, _)) = graph.graph.edge_endpoints(existing) {
            if source != a {
                path.reverse();
            }
        }
    }

    RoadEdge {
        weight: draft.weight,
        highway: draft.highway,
        name: draft.name,
        path,
    }
}
