// Each module handles one CLI subcommand; main.rs parses arguments and
// dispatches to these handlers.

pub mod distances;
pub mod neighbors;
pub mod route;
pub mod segments;

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use trafficroute_lib::{Error as LibError, RoadNetwork};

/// Load the segment file and apply an optional observation file on top.
pub fn load_network(network_path: &Path, observations: Option<&Path>) -> Result<RoadNetwork> {
    let mut network = RoadNetwork::from_path(network_path).with_context(|| {
        format!(
            "failed to load road network from {}",
            network_path.display()
        )
    })?;

    if let Some(path) = observations {
        network
            .apply_observations_from_path(path)
            .with_context(|| format!("failed to apply observations from {}", path.display()))?;
    }
    Ok(network)
}

/// Turn an unknown-place error into one that suggests similar names.
pub fn explain_lookup_error(network: &RoadNetwork, err: LibError) -> anyhow::Error {
    let name = match &err {
        LibError::NodeNotFound { node }
        | LibError::SourceNotFound { node }
        | LibError::TargetNotFound { node } => node.clone(),
        _ => return err.into(),
    };

    let suggestions = network.fuzzy_node_matches(&name, 3);
    if suggestions.is_empty() {
        err.into()
    } else {
        anyhow!("{err}. Did you mean: {}?", suggestions.join(", "))
    }
}
