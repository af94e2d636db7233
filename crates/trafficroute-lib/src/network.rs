//! Road network loaded from segment files and kept current from speed telemetry.
//!
//! `RoadNetwork` sits on the ingestion side of the engine: it owns segment
//! metadata (length, free-flow and current speed), derives travel-time weights
//! from it and pushes them into a [`SharedGraph`] through the public graph API.
//! The graph is only reachable through snapshots, so every edge weight stays
//! equal to the travel time of its segment.
//!
//! # Segment file
//!
//! CSV with a header row. `from`, `to` and `speed_kph` are required. Each row
//! needs either `length_km` or all of `from_lat`, `from_lon`, `to_lat`,
//! `to_lon`. `free_flow_kph` defaults to `speed_kph`. Coordinates, when
//! present, are kept for bounding-box queries.
//!
//! ```text
//! from,to,length_km,speed_kph,free_flow_kph
//! A,B,1.0,60,60
//! B,C,2.0,20,60
//! ```
//!
//! # Observation file
//!
//! CSV with `from,to,speed_kph`; each row updates an existing segment.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Coordinate};
use crate::output::{RouteStep, RouteSummary};
use crate::path::{Route, ShortestPaths};
use crate::shared::{GraphSnapshot, SharedGraph};
use crate::traffic::{
    delay_factor, travel_time_minutes, CongestionLevel, SpeedObservation, TrafficLevel,
};
use crate::weight::Weight;

/// Minimum Jaro-Winkler similarity for a node name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Physical and observed properties of one directed road segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentInfo {
    pub length_km: f64,
    pub free_flow_kph: f64,
    pub speed_kph: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Coordinate>,
}

impl SegmentInfo {
    pub fn congestion(&self) -> CongestionLevel {
        CongestionLevel::from_speed(self.speed_kph)
    }

    pub fn travel_minutes(&self) -> f64 {
        self.length_km / self.speed_kph * 60.0
    }

    pub fn free_flow_minutes(&self) -> f64 {
        self.length_km / self.free_flow_kph * 60.0
    }

    /// Whether either endpoint lies inside `bbox`; unlocated segments never do.
    pub fn touches(&self, bbox: &BoundingBox) -> bool {
        [self.start, self.end]
            .iter()
            .flatten()
            .any(|point| bbox.contains(point))
    }
}

/// A segment with its endpoints, as listed by [`RoadNetwork::segments_in_bbox`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentView {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub info: SegmentInfo,
    pub congestion: CongestionLevel,
}

#[derive(Debug, Deserialize)]
struct SegmentRecord {
    from: String,
    to: String,
    length_km: Option<f64>,
    speed_kph: f64,
    free_flow_kph: Option<f64>,
    from_lat: Option<f64>,
    from_lon: Option<f64>,
    to_lat: Option<f64>,
    to_lon: Option<f64>,
}

impl SegmentRecord {
    fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        Some((
            Coordinate::new(self.from_lat?, self.from_lon?),
            Coordinate::new(self.to_lat?, self.to_lon?),
        ))
    }

    fn length_km(&self) -> Option<f64> {
        self.length_km.or_else(|| {
            self.endpoints()
                .map(|(start, end)| start.distance_km(&end))
        })
    }
}

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    from: String,
    to: String,
    speed_kph: f64,
}

/// Road graph plus the per-segment data its weights are derived from.
#[derive(Debug, Default)]
pub struct RoadNetwork {
    graph: SharedGraph<String>,
    segments: HashMap<(String, String), SegmentInfo>,
    source: Option<PathBuf>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a segment file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut network = Self::from_reader(file)?;
        network.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            nodes = network.graph.node_count(),
            segments = network.segments.len(),
            "road network loaded"
        );
        Ok(network)
    }

    /// Load a segment file from any reader (file, in-memory buffer, ...).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        require_columns(&headers, &["from", "to", "speed_kph"])?;

        let mut network = Self::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = line_of(&record);
            let row: SegmentRecord = record.deserialize(Some(&headers)).map_err(|err| {
                Error::NetworkData {
                    line,
                    message: err.to_string(),
                }
            })?;
            let length_km = row.length_km().ok_or_else(|| Error::NetworkData {
                line,
                message: format!(
                    "segment {} -> {} needs length_km or endpoint coordinates",
                    row.from, row.to
                ),
            })?;

            network
                .add_segment(
                    row.from.clone(),
                    row.to.clone(),
                    length_km,
                    row.speed_kph,
                    row.free_flow_kph,
                )
                .map_err(|err| annotate(err, line))?;
            if let Some((start, end)) = row.endpoints() {
                network.locate_segment(&row.from, &row.to, start, end)?;
            }
        }
        Ok(network)
    }

    /// Register a directed segment; its weight is the current travel time.
    pub fn add_segment(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        length_km: f64,
        speed_kph: f64,
        free_flow_kph: Option<f64>,
    ) -> Result<()> {
        let from = from.into();
        let to = to.into();
        let free_flow_kph = free_flow_kph.unwrap_or(speed_kph);

        let key = (from.clone(), to.clone());
        if self.segments.contains_key(&key) {
            return Err(Error::DuplicateSegment { from, to });
        }

        let weight = travel_time_minutes(length_km, speed_kph)?;
        travel_time_minutes(length_km, free_flow_kph)?;

        self.graph.add_edge(from, to, weight.get())?;
        self.segments.insert(
            key,
            SegmentInfo {
                length_km,
                free_flow_kph,
                speed_kph,
                start: None,
                end: None,
            },
        );
        Ok(())
    }

    /// Attach endpoint coordinates to an existing segment.
    pub fn locate_segment(
        &mut self,
        from: &str,
        to: &str,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<()> {
        let info = self
            .segments
            .get_mut(&(from.to_string(), to.to_string()))
            .ok_or_else(|| Error::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        info.start = Some(start);
        info.end = Some(end);
        Ok(())
    }

    /// Register an intersection with no segments yet.
    pub fn add_intersection(&mut self, id: impl Into<String>) -> bool {
        self.graph.add_node(id.into())
    }

    /// Recompute a segment's weight from a new speed reading.
    pub fn apply_observation(&mut self, observation: &SpeedObservation<String>) -> Result<Weight> {
        let key = (observation.from.clone(), observation.to.clone());
        let info = self
            .segments
            .get_mut(&key)
            .ok_or_else(|| Error::EdgeNotFound {
                from: observation.from.clone(),
                to: observation.to.clone(),
            })?;

        let weight = travel_time_minutes(info.length_km, observation.speed_kph)?;
        self.graph
            .set_weight(&observation.from, &observation.to, weight.get())?;
        info.speed_kph = observation.speed_kph;

        tracing::debug!(
            from = %observation.from,
            to = %observation.to,
            speed_kph = observation.speed_kph,
            minutes = weight.get(),
            "segment speed updated"
        );
        Ok(weight)
    }

    /// Apply every row of an observation file, returning how many were applied.
    ///
    /// Stops at the first bad row; rows before it stay applied.
    pub fn apply_observations_from_reader<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        require_columns(&headers, &["from", "to", "speed_kph"])?;

        let mut applied = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            let line = line_of(&record);
            let row: ObservationRecord =
                record
                    .deserialize(Some(&headers))
                    .map_err(|err| Error::NetworkData {
                        line,
                        message: err.to_string(),
                    })?;
            let observation = SpeedObservation {
                from: row.from,
                to: row.to,
                speed_kph: row.speed_kph,
            };
            self.apply_observation(&observation)
                .map_err(|err| annotate(err, line))?;
            applied += 1;
        }
        Ok(applied)
    }

    pub fn apply_observations_from_path(&mut self, path: &Path) -> Result<usize> {
        let file = fs::File::open(path)?;
        let applied = self.apply_observations_from_reader(file)?;
        tracing::info!(path = %path.display(), applied, "speed observations applied");
        Ok(applied)
    }

    /// Current road graph. Weights change only through this network.
    pub fn snapshot(&self) -> GraphSnapshot<String> {
        self.graph.snapshot()
    }

    /// Outgoing segments of an intersection as `(target, minutes)` pairs.
    pub fn neighbors(&self, node: &str) -> Result<Vec<(String, Weight)>> {
        self.graph.neighbors_of(&node.to_string())
    }

    pub fn contains_intersection(&self, node: &str) -> bool {
        self.graph.contains_node(&node.to_string())
    }

    pub fn intersection_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn segment(&self, from: &str, to: &str) -> Option<&SegmentInfo> {
        self.segments.get(&(from.to_string(), to.to_string()))
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Located segments with at least one endpoint inside `bbox`, ordered by
    /// `(from, to)`.
    pub fn segments_in_bbox(&self, bbox: &BoundingBox) -> Vec<SegmentView> {
        let mut found: Vec<SegmentView> = self
            .segments
            .iter()
            .filter(|(_, info)| info.touches(bbox))
            .map(|((from, to), info)| SegmentView {
                from: from.clone(),
                to: to.clone(),
                info: *info,
                congestion: info.congestion(),
            })
            .collect();
        found.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        found
    }

    /// File the network was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Fastest route under current traffic; `Ok(None)` when none exists.
    pub fn route(&self, from: &str, to: &str) -> Result<Option<RouteSummary>> {
        let route = self
            .graph
            .shortest_path(&from.to_string(), &to.to_string())?;
        Ok(route.map(|route| self.summarize(&route)))
    }

    /// Travel times from `from` to every intersection.
    pub fn distances_from(&self, from: &str) -> Result<ShortestPaths<String>> {
        self.graph.shortest_paths(&from.to_string())
    }

    /// Attach segment data to a computed route.
    pub fn summarize(&self, route: &Route<String>) -> RouteSummary {
        let mut steps = Vec::with_capacity(route.steps().len());
        let mut length_km = 0.0;
        let mut free_flow_minutes = 0.0;

        for (index, node) in route.steps().iter().enumerate() {
            let segment = index
                .checked_sub(1)
                .and_then(|prev| self.segment(&route.steps()[prev], node));
            if let Some(info) = segment {
                length_km += info.length_km;
                free_flow_minutes += info.free_flow_minutes();
            }
            steps.push(RouteStep {
                index,
                node: node.clone(),
                length_km: segment.map(|info| info.length_km),
                minutes: segment.map(SegmentInfo::travel_minutes),
                speed_kph: segment.map(|info| info.speed_kph),
                congestion: segment.map(SegmentInfo::congestion),
            });
        }

        let travel_minutes = route.cost();
        RouteSummary {
            source: route.source().clone(),
            target: route.target().clone(),
            hops: route.hop_count(),
            length_km,
            travel_minutes,
            free_flow_minutes,
            traffic_level: TrafficLevel::from_delay_factor(delay_factor(
                travel_minutes,
                free_flow_minutes,
            )),
            steps,
        }
    }

    /// Intersection names similar to `name`, best match first.
    pub fn fuzzy_node_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, String)> = self
            .graph
            .node_ids()
            .into_iter()
            .map(|node| (strsim::jaro_winkler(name, &node), node))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.truncate(limit);
        scored.into_iter().map(|(_, node)| node).collect()
    }
}

fn require_columns(headers: &StringRecord, required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::NetworkData {
            line: 1,
            message: format!("missing required columns: {}", missing.join(", ")),
        })
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

/// Wrap validation failures with the offending line; lookups stay typed.
fn annotate(err: Error, line: u64) -> Error {
    match err {
        Error::InvalidWeight { .. }
        | Error::InvalidMeasurement { .. }
        | Error::DuplicateSegment { .. } => Error::NetworkData {
            line,
            message: err.to_string(),
        },
        other => other,
    }
}
