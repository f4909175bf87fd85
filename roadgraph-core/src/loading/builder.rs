use log::{debug, info};

use super::config::GraphBuildConfig;
use super::source::{GeometrySource, InputFormat};
use crate::{
    Error, Progress,
    algo::{RoadGraphBuilder, SegmentDecomposer, is_supported, retain_largest_component},
    model::{RoadAttributes, RoadGraph},
};

/// Creates the road graph described by the configuration, reading roads
/// from `config.input`
///
/// # Errors
///
/// Returns an error if the input is missing or unreadable, or if no usable
/// road survives extraction and filtering
pub fn create_road_graph(
    config: &GraphBuildConfig,
    progress: &dyn Progress,
) -> Result<RoadGraph, Error> {
    validate_config(config)?;

    let format = match config.format {
        Some(format) => format,
        None => InputFormat::detect(&config.input)?,
    };
    let source = format.open(&config.input);

    create_road_graph_from(config, source.as_ref(), progress)
}

/// Creates the road graph from an already opened geometry source.
/// `config.input` and `config.format` are ignored.
///
/// # Errors
///
/// Returns an error if the source fails or no usable road survives
pub fn create_road_graph_from(
    config: &GraphBuildConfig,
    source: &dyn GeometrySource,
    progress: &dyn Progress,
) -> Result<RoadGraph, Error> {
    if let Some(bbox) = &config.bbox {
        bbox.validate()?;
    }

    let mut records = source.load()?;
    if records.is_empty() {
        return Err(Error::EmptyExtraction(
            "the source yielded no road records".to_string(),
        ));
    }
    info!("{} roads loaded", records.len());

    if let Some(bbox) = &config.bbox {
        records.retain(|record| bbox.intersects(record));
        info!("{} roads inside bounding box {:?}", records.len(), bbox);
        if records.is_empty() {
            return Err(Error::EmptyExtraction(format!(
                "no roads inside bounding box {bbox:?}"
            )));
        }
    }

    let decomposer = SegmentDecomposer::new(config.edge_shape, &records);
    let mut builder = RoadGraphBuilder::new(
        config.sentinels.unnamed.clone(),
        config.duplicates,
        config.weighting,
    );

    info!(
        "Building road graph ({:?} edges, {:?} duplicates, {:?} weights)",
        config.edge_shape, config.duplicates, config.weighting
    );
    for record in &records {
        let attributes = RoadAttributes::resolve(record, &config.sentinels);
        let supported = is_supported(record);
        if !supported {
            debug!("Skipping road '{}' without line geometry", attributes.name);
        }
        builder.record_seen(supported);

        for segment in decomposer.decompose(record, &attributes) {
            builder.add_segment(&segment);
        }
        progress.advance(1);
    }

    let (graph, _) = builder.finish();
    if graph.edge_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    let (graph, _) = retain_largest_component(graph);
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }

    info!(
        "Road graph ready: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn validate_config(config: &GraphBuildConfig) -> Result<(), Error> {
    if !config.input.exists() {
        return Err(Error::MissingInput(config.input.clone()));
    }

    Ok(())
}
