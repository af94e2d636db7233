//! Distances command handler: travel time from one place to every other.

use std::path::{Path, PathBuf};

use anyhow::Result;

use trafficroute_lib::DistanceTable;

use crate::commands::{explain_lookup_error, load_network};
use crate::output::{print_distances, OutputFormat};

#[derive(Debug, Clone)]
pub struct DistancesCommandArgs {
    pub from: String,
    pub observations: Option<PathBuf>,
}

pub fn handle_distances_command(
    network_path: &Path,
    format: OutputFormat,
    args: &DistancesCommandArgs,
) -> Result<()> {
    let network = load_network(network_path, args.observations.as_deref())?;

    let paths = network
        .distances_from(&args.from)
        .map_err(|err| explain_lookup_error(&network, err))?;

    print_distances(&DistanceTable::from_paths(&paths), format)
}
