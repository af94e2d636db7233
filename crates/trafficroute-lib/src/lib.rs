//! Traffic-aware routing library entry points.
//!
//! This crate models a road network as a directed graph whose edge weights are
//! current travel times, and answers single-source shortest-path queries over
//! it with Dijkstra's algorithm. Weights can be updated at any time from speed
//! telemetry; route queries always run against a consistent snapshot.
//! Higher-level consumers (the CLI, services) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
mod heap;
pub mod network;
pub mod output;
pub mod path;
pub mod shared;
pub mod traffic;
pub mod weight;

pub use error::{Error, Result};
pub use geo::{BoundingBox, Coordinate};
pub use graph::{EdgeRef, Graph, Neighbors, NodeId};
pub use network::{RoadNetwork, SegmentInfo, SegmentView};
pub use output::{
    format_distance, format_duration, DistanceRow, DistanceTable, RenderMode, RouteStep,
    RouteSummary,
};
pub use path::{shortest_path, shortest_paths, Distance, Route, ShortestPaths};
pub use shared::{GraphSnapshot, SharedGraph};
pub use traffic::{
    delay_factor, travel_time_minutes, CongestionLevel, SpeedObservation, TrafficLevel,
};
pub use weight::Weight;
