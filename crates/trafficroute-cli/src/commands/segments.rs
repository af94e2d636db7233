//! Segments command handler: located segments inside a bounding box.

use std::path::{Path, PathBuf};

use anyhow::Result;

use trafficroute_lib::BoundingBox;

use crate::commands::load_network;
use crate::output::{print_segments, OutputFormat, SegmentList};

#[derive(Debug, Clone)]
pub struct SegmentsCommandArgs {
    pub bbox: BoundingBox,
    pub observations: Option<PathBuf>,
}

pub fn handle_segments_command(
    network_path: &Path,
    format: OutputFormat,
    args: &SegmentsCommandArgs,
) -> Result<()> {
    let network = load_network(network_path, args.observations.as_deref())?;

    let segments = network.segments_in_bbox(&args.bbox);
    tracing::debug!(found = segments.len(), "bounding box query");

    print_segments(
        &SegmentList {
            bbox: args.bbox,
            segments,
        },
        format,
    )
}
