//! Decomposition of road geometries into graph segments

use geo::{Geometry, LineString};
use hashbrown::HashMap;
use itertools::{Either, Itertools};
use serde::Deserialize;

use super::planar::planar_length;
use crate::model::{Coordinate, NodeKey, RoadAttributes, RoadRecord};

/// How a line part is cut into edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeShape {
    /// One edge per pair of consecutive points
    #[default]
    Segment,
    /// One edge per run of points between junctions, keeping the
    /// intermediate points as the edge path
    Polyline,
}

/// A piece of road that becomes one edge
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment<'a> {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Points strictly between `from` and `to`
    pub path: Vec<Coordinate>,
    pub attributes: &'a RoadAttributes,
    /// Share of the record's reported length covered by this segment
    pub reported_length: Option<f64>,
}

#[derive(Debug, Clone)]
struct Piece {
    from: Coordinate,
    to: Coordinate,
    path: Vec<Coordinate>,
}

impl Piece {
    fn planar_length(&self) -> f64 {
        planar_length(
            std::iter::once(self.from)
                .chain(self.path.iter().copied())
                .chain(std::iter::once(self.to)),
        )
    }
}

/// Rounded points where polyline edges must end.
///
/// A point is a junction when it ends a line part or occurs more than
/// once over all scanned geometries.
#[derive(Debug, Clone, Default)]
pub struct Junctions {
    occurrences: HashMap<NodeKey, u32>,
}

impl Junctions {
    pub fn scan<'a>(records: impl IntoIterator<Item = &'a RoadRecord>) -> Self {
        let mut occurrences: HashMap<NodeKey, u32> = HashMap::new();
        for part in records.into_iter().flat_map(line_parts) {
            let last = part.0.len().saturating_sub(1);
            for (i, coord) in part.coords().enumerate() {
                let weight = if i == 0 || i == last { 2 } else { 1 };
                *occurrences
                    .entry(Coordinate::from(*coord).key())
                    .or_default() += weight;
            }
        }
        Self { occurrences }
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.occurrences.get(key).is_some_and(|&count| count >= 2)
    }

    pub fn len(&self) -> usize {
        self.occurrences.values().filter(|&&count| count >= 2).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Line parts of a record's geometry, empty for missing or non-line geometries
pub fn line_parts(record: &RoadRecord) -> &[LineString<f64>] {
    match &record.geometry {
        Some(Geometry::LineString(line)) => std::slice::from_ref(line),
        Some(Geometry::MultiLineString(lines)) => &lines.0,
        _ => &[],
    }
}

/// Whether the record's geometry can be decomposed at all
pub fn is_supported(record: &RoadRecord) -> bool {
    matches!(
        record.geometry,
        Some(Geometry::LineString(_) | Geometry::MultiLineString(_))
    )
}

/// Cuts road records into [`RoadSegment`]s according to an [`EdgeShape`]
#[derive(Debug, Clone, Default)]
pub struct SegmentDecomposer {
    shape: EdgeShape,
    junctions: Junctions,
}

impl SegmentDecomposer {
    /// Decomposer for `shape`. Junctions are only scanned for
    /// [`EdgeShape::Polyline`], which needs the whole input up front.
    pub fn new(shape: EdgeShape, records: &[RoadRecord]) -> Self {
        let junctions = match shape {
            EdgeShape::Segment => Junctions::default(),
            EdgeShape::Polyline => Junctions::scan(records),
        };
        Self { shape, junctions }
    }

    /// Lazily yields the segments of `record`, part by part. Parts of a
    /// multi-line are never joined to each other.
    pub fn decompose<'a>(
        &'a self,
        record: &'a RoadRecord,
        attributes: &'a RoadAttributes,
    ) -> impl Iterator<Item = RoadSegment<'a>> + 'a {
        let parts = line_parts(record);
        let total_length = attributes.reported_length.map(|reported| {
            let planar: f64 = parts
                .iter()
                .map(|part| planar_length(part.coords().map(|c| Coordinate::from(*c))))
                .sum();
            (reported, planar)
        });

        parts
            .iter()
            .flat_map(move |part| match self.shape {
                EdgeShape::Segment => {
                    Either::Left(elementary(part.coords().map(|c| Coordinate::from(*c))))
                }
                EdgeShape::Polyline => Either::Right(self.split_at_junctions(part).into_iter()),
            })
            .map(move |piece| {
                let reported_length = total_length
                    .filter(|&(_, planar)| planar > 0.0)
                    .map(|(reported, planar)| reported * piece.planar_length() / planar);
                RoadSegment {
                    from: piece.from,
                    to: piece.to,
                    path: piece.path,
                    attributes,
                    reported_length,
                }
            })
    }

    fn split_at_junctions(&self, part: &LineString<f64>) -> Vec<Piece> {
        let points: Vec<Coordinate> = part.coords().map(|c| Coordinate::from(*c)).collect();
        let mut pieces = Vec::new();
        let mut start = 0;

        for end in 1..points.len() {
            if end + 1 < points.len() && !self.junctions.contains(&points[end].key()) {
                continue;
            }

            let run = &points[start..=end];
            if run.len() > 2 && run[0].key() == points[end].key() {
                // closed loop, one edge would collapse into a self-loop
                pieces.extend(elementary(run.iter().copied()));
            } else {
                pieces.push(Piece {
                    from: run[0],
                    to: points[end],
                    path: run[1..run.len() - 1].to_vec(),
                });
            }
            start = end;
        }

        pieces
    }
}

fn elementary(points: impl Iterator<Item = Coordinate>) -> impl Iterator<Item = Piece> {
    points.tuple_windows().map(|(from, to)| Piece {
        from,
        to,
        path: Vec::new(),
    })
}
