use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use geo::{Coord, Geometry, LineString, MultiLineString};
use hashbrown::{HashMap, HashSet};
use log::{debug, info};
use osmpbfreader::{OsmObj, OsmPbfReader};

use crate::{Error, loading::source::GeometrySource, model::RoadRecord};

/// Road classes open to cars in the "driving" network
const DRIVABLE_HIGHWAYS: &[&str] = &[
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "unclassified",
    "residential",
    "living_street",
    "service",
    "road",
];

const ACCESS_TAGS: &[&str] = &["access", "vehicle", "motor_vehicle"];

/// Drivable roads of an OpenStreetMap `.osm.pbf` extract
#[derive(Debug, Clone)]
pub struct OsmPbfSource {
    path: PathBuf,
}

impl OsmPbfSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GeometrySource for OsmPbfSource {
    fn load(&self) -> Result<Vec<RoadRecord>, Error> {
        let records = read_drivable_roads(&self.path)?;
        trim_heap();
        Ok(records)
    }
}

struct DrivableWay {
    nodes: Vec<i64>,
    name: Option<String>,
    highway: String,
}

/// Two passes over the file: drivable ways first, then the coordinates of
/// the nodes they reference.
fn read_drivable_roads(path: &Path) -> Result<Vec<RoadRecord>, Error> {
    info!("Processing street data (OSM): {}", path.display());

    let ways = collect_drivable_ways(path)?;
    let referenced: HashSet<i64> = ways.iter().flat_map(|way| way.nodes.iter().copied()).collect();
    info!(
        "Pass 1 complete: {} drivable ways, {} referenced nodes",
        ways.len(),
        referenced.len()
    );

    let coordinates = load_node_coordinates(path, &referenced)?;
    info!("Pass 2 complete: {} node coordinates loaded", coordinates.len());

    Ok(ways
        .into_iter()
        .map(|way| way_to_record(way, &coordinates))
        .collect())
}

fn open_reader(path: &Path) -> Result<OsmPbfReader<BufReader<File>>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(OsmPbfReader::new(BufReader::new(file)))
}

fn collect_drivable_ways(path: &Path) -> Result<Vec<DrivableWay>, Error> {
    let mut reader = open_reader(path)?;
    let mut ways = Vec::new();

    for obj in reader.iter() {
        let obj = obj.map_err(|e| Error::OsmError(e.to_string()))?;
        if let OsmObj::Way(way) = obj {
            let tag = |key: &str| way.tags.get(key).map(|value| value.as_str());
            if !is_drivable(tag) {
                continue;
            }
            ways.push(DrivableWay {
                nodes: way.nodes.iter().map(|node| node.0).collect(),
                name: tag("name").map(str::to_string),
                highway: tag("highway").unwrap_or_default().to_string(),
            });
        }
    }

    Ok(ways)
}

fn load_node_coordinates(
    path: &Path,
    referenced: &HashSet<i64>,
) -> Result<HashMap<i64, Coord<f64>>, Error> {
    let mut reader = open_reader(path)?;
    let mut coordinates = HashMap::with_capacity(referenced.len());

    for obj in reader.iter() {
        let obj = obj.map_err(|e| Error::OsmError(e.to_string()))?;
        if let OsmObj::Node(node) = obj {
            if referenced.contains(&node.id.0) {
                coordinates.insert(
                    node.id.0,
                    Coord {
                        x: node.lon(),
                        y: node.lat(),
                    },
                );
            }
        }
    }

    Ok(coordinates)
}

/// Points of the way, split wherever a node is missing from the extract so
/// no straight line is invented across the gap. Runs shorter than two
/// points are dropped.
fn way_to_record(way: DrivableWay, coordinates: &HashMap<i64, Coord<f64>>) -> RoadRecord {
    let mut parts: Vec<LineString<f64>> = Vec::new();
    let mut run: Vec<Coord<f64>> = Vec::new();
    let mut missing = 0;

    for id in &way.nodes {
        match coordinates.get(id) {
            Some(&coord) => run.push(coord),
            None => {
                missing += 1;
                close_run(&mut run, &mut parts);
            }
        }
    }
    close_run(&mut run, &mut parts);

    if missing > 0 {
        debug!(
            "Way {:?} references {} nodes missing from the extract, {} parts kept",
            way.name,
            missing,
            parts.len()
        );
    }

    let geometry = match parts.len() {
        0 => None,
        1 => parts.pop().map(Geometry::from),
        _ => Some(MultiLineString::new(parts).into()),
    };

    RoadRecord {
        geometry,
        name: way.name,
        highway: Some(way.highway),
        length: None,
    }
}

fn close_run(run: &mut Vec<Coord<f64>>, parts: &mut Vec<LineString<f64>>) {
    let points = std::mem::take(run);
    if points.len() >= 2 {
        parts.push(LineString::new(points));
    }
}

/// Whether a way with these tags belongs to the driving network
fn is_drivable<'a>(tag: impl Fn(&str) -> Option<&'a str>) -> bool {
    let Some(highway) = tag("highway") else {
        return false;
    };
    if !DRIVABLE_HIGHWAYS.contains(&highway) || tag("area") == Some("yes") {
        return false;
    }

    !ACCESS_TAGS
        .iter()
        .any(|key| matches!(tag(key), Some("no" | "private")))
}

// While parsing protobuf blocks large amounts of memory are allocated
// and not always returned to the system. Release the free tail of the heap.
//
// # Safety
//
// `malloc_trim` is only called on linux with the glibc allocator, which
// is checked by the cfg attribute at compile time.
fn trim_heap() {
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::warn!("Memory trimming failed - continuing anyway");
        } else {
            log::debug!("Successfully trimmed unused heap memory");
        }
    }
}
