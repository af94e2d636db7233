//! Neighbors command handler: list the outgoing segments of an intersection.

use std::path::Path;

use anyhow::Result;

use crate::commands::{explain_lookup_error, load_network};
use crate::output::{print_neighbors, NeighborList, NeighborRow, OutputFormat};

pub fn handle_neighbors_command(
    network_path: &Path,
    format: OutputFormat,
    node: &str,
) -> Result<()> {
    let network = load_network(network_path, None)?;

    let edges = network
        .neighbors(node)
        .map_err(|err| explain_lookup_error(&network, err))?;

    let neighbors = edges
        .into_iter()
        .map(|(target, weight)| {
            let segment = network.segment(node, &target);
            NeighborRow {
                minutes: weight.get(),
                length_km: segment.map(|info| info.length_km),
                speed_kph: segment.map(|info| info.speed_kph),
                congestion: segment.map(|info| info.congestion()),
                node: target,
            }
        })
        .collect();

    print_neighbors(
        &NeighborList {
            node: node.to_string(),
            neighbors,
        },
        format,
    )
}
