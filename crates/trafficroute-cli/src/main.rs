use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use trafficroute_cli::commands::distances::{handle_distances_command, DistancesCommandArgs};
use trafficroute_cli::commands::neighbors::handle_neighbors_command;
use trafficroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use trafficroute_cli::commands::segments::{handle_segments_command, SegmentsCommandArgs};
use trafficroute_cli::logging::{init_logging, LoggingConfig};
use trafficroute_cli::output::OutputFormat;
use trafficroute_lib::BoundingBox;

/// Environment variable consulted when `--network` is not given.
const NETWORK_ENV: &str = "TRAFFICROUTE_NETWORK";

#[derive(Parser, Debug)]
#[command(author, version, about = "Traffic-aware road routing")]
struct Cli {
    /// Road segment CSV file (falls back to TRAFFICROUTE_NETWORK).
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fastest route between two intersections.
    Route {
        /// Starting intersection.
        #[arg(long = "from")]
        from: String,
        /// Destination intersection.
        #[arg(long = "to")]
        to: String,
        /// Speed observation CSV applied before routing.
        #[arg(long)]
        observations: Option<PathBuf>,
    },
    /// List travel times from one intersection to every other.
    Distances {
        /// Starting intersection.
        #[arg(long = "from")]
        from: String,
        /// Speed observation CSV applied before routing.
        #[arg(long)]
        observations: Option<PathBuf>,
    },
    /// Show the outgoing segments of an intersection.
    Neighbors {
        #[arg(long)]
        node: String,
    },
    /// List located segments with an endpoint inside a bounding box.
    Segments {
        /// Box as minLon,minLat,maxLon,maxLat.
        #[arg(long, allow_hyphen_values = true)]
        bbox: BoundingBox,
        /// Speed observation CSV applied before listing.
        #[arg(long)]
        observations: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let network = cli
        .network
        .or_else(|| std::env::var_os(NETWORK_ENV).map(PathBuf::from))
        .with_context(|| format!("no road network given; pass --network or set {NETWORK_ENV}"))?;

    match cli.command {
        Command::Route {
            from,
            to,
            observations,
        } => handle_route_command(
            &network,
            cli.format,
            &RouteCommandArgs {
                from,
                to,
                observations,
            },
        ),
        Command::Distances { from, observations } => handle_distances_command(
            &network,
            cli.format,
            &DistancesCommandArgs { from, observations },
        ),
        Command::Neighbors { node } => handle_neighbors_command(&network, cli.format, &node),
        Command::Segments { bbox, observations } => handle_segments_command(
            &network,
            cli.format,
            &SegmentsCommandArgs { bbox, observations },
        ),
    }
}
