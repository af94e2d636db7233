//! Route command handler for computing the fastest path between two places.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::commands::{explain_lookup_error, load_network};
use crate::output::{print_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting intersection.
    pub from: String,
    /// Destination intersection.
    pub to: String,
    /// Speed observations applied before routing.
    pub observations: Option<PathBuf>,
}

/// Handle the route subcommand.
///
/// An unreachable destination is reported as an error so the process exits
/// non-zero.
pub fn handle_route_command(
    network_path: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = load_network(network_path, args.observations.as_deref())?;

    let summary = network
        .route(&args.from, &args.to)
        .map_err(|err| explain_lookup_error(&network, err))?;

    let Some(summary) = summary else {
        bail!("no route found from {} to {}", args.from, args.to);
    };

    tracing::debug!(
        from = %args.from,
        to = %args.to,
        hops = summary.hops,
        minutes = summary.travel_minutes,
        "route computed"
    );
    print_route(&summary, format)
}
