use std::fmt::Write;

use serde::Serialize;

use crate::graph::NodeId;
use crate::path::{Distance, ShortestPaths};
use crate::traffic::{CongestionLevel, TrafficLevel};

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    Markdown,
}

/// One node along a route, with the segment used to reach it.
///
/// The first step has no segment data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_kph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion: Option<CongestionLevel>,
}

/// Structured representation of a computed route that callers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub source: String,
    pub target: String,
    pub hops: usize,
    pub length_km: f64,
    pub travel_minutes: f64,
    pub free_flow_minutes: f64,
    pub traffic_level: TrafficLevel,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::Markdown => self.render_markdown(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {}, {})",
            self.source,
            self.target,
            self.hops,
            format_distance(self.length_km),
            format_duration(self.travel_minutes)
        );
        let _ = writeln!(
            buffer,
            "Traffic: {} (free flow {})",
            self.traffic_level,
            format_duration(self.free_flow_minutes)
        );
        for step in &self.steps {
            match (step.length_km, step.minutes, step.congestion) {
                (Some(length), Some(minutes), Some(congestion)) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}, {}, {} congestion)",
                        step.index,
                        step.node,
                        format_distance(length),
                        format_duration(minutes),
                        congestion
                    );
                }
                _ => {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.node);
                }
            }
        }
        buffer
    }

    fn render_markdown(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, {}, traffic: {})",
            self.source,
            self.target,
            self.hops,
            format_duration(self.travel_minutes),
            self.traffic_level
        );
        for step in &self.steps {
            let _ = writeln!(buffer, "* {}. **{}**", step.index, step.node);
        }
        buffer
    }
}

/// Single row of a distance table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceRow {
    pub node: String,
    /// `None` when the node cannot be reached from the source.
    pub minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

/// Costs from one source to every node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceTable {
    pub source: String,
    pub reachable: usize,
    pub rows: Vec<DistanceRow>,
}

impl DistanceTable {
    /// Rows are sorted by cost with unreachable nodes last; ties keep
    /// registration order.
    pub fn from_paths<N: NodeId>(paths: &ShortestPaths<N>) -> Self {
        let mut rows: Vec<(Distance, DistanceRow)> = paths
            .iter()
            .map(|(node, distance, via)| {
                (
                    distance,
                    DistanceRow {
                        node: node.to_string(),
                        minutes: distance.finite(),
                        via: via.map(ToString::to_string),
                    },
                )
            })
            .collect();
        rows.sort_by(|(a, _), (b, _)| a.value().total_cmp(&b.value()));

        Self {
            source: paths.source().to_string(),
            reachable: paths.reachable_count(),
            rows: rows.into_iter().map(|(_, row)| row).collect(),
        }
    }

    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::Markdown => self.render_markdown(),
        }
    }

    fn render_markdown(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Travel times** from _{}_ ({} of {} reachable)\n",
            self.source,
            self.reachable,
            self.rows.len()
        );
        let _ = writeln!(buffer, "| Node | Time | Via |");
        let _ = writeln!(buffer, "|------|------|-----|");
        for row in &self.rows {
            let time = row
                .minutes
                .map_or_else(|| "unreachable".to_string(), format_duration);
            let _ = writeln!(
                buffer,
                "| {} | {} | {} |",
                row.node,
                time,
                row.via.as_deref().unwrap_or("-")
            );
        }
        buffer
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Travel times from {} ({} of {} reachable):",
            self.source,
            self.reachable,
            self.rows.len()
        );
        for row in &self.rows {
            match (row.minutes, &row.via) {
                (Some(minutes), Some(via)) => {
                    let _ = writeln!(
                        buffer,
                        "  {} {} (via {})",
                        row.node,
                        format_duration(minutes),
                        via
                    );
                }
                (Some(minutes), None) => {
                    let _ = writeln!(buffer, "  {} {}", row.node, format_duration(minutes));
                }
                (None, _) => {
                    let _ = writeln!(buffer, "  {} unreachable", row.node);
                }
            }
        }
        buffer
    }
}

/// `"850 m"` below one kilometre, `"1.5 km"` otherwise.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round())
    } else {
        format!("{km:.1} km")
    }
}

/// `"45 min"` or `"1 hr 5 min"`, rounded to the nearest minute.
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    let hours = total / 60;
    let mins = total % 60;
    if hours == 0 {
        format!("{mins} min")
    } else {
        format!("{hours} hr {mins} min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::path::shortest_paths;

    fn summary() -> RouteSummary {
        RouteSummary {
            source: "A".to_string(),
            target: "C".to_string(),
            hops: 2,
            length_km: 3.0,
            travel_minutes: 6.0,
            free_flow_minutes: 4.0,
            traffic_level: TrafficLevel::Heavy,
            steps: vec![
                RouteStep {
                    index: 0,
                    node: "A".to_string(),
                    length_km: None,
                    minutes: None,
                    speed_kph: None,
                    congestion: None,
                },
                RouteStep {
                    index: 1,
                    node: "B".to_string(),
                    length_km: Some(1.0),
                    minutes: Some(2.0),
                    speed_kph: Some(30.0),
                    congestion: Some(CongestionLevel::High),
                },
                RouteStep {
                    index: 2,
                    node: "C".to_string(),
                    length_km: Some(2.0),
                    minutes: Some(4.0),
                    speed_kph: Some(30.0),
                    congestion: Some(CongestionLevel::High),
                },
            ],
        }
    }

    #[test]
    fn formats_distances() {
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(12.34), "12.3 km");
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(45.2), "45 min");
        assert_eq!(format_duration(65.0), "1 hr 5 min");
        assert_eq!(format_duration(59.6), "1 hr 0 min");
    }

    #[test]
    fn plain_render_lists_steps() {
        let text = summary().render(RenderMode::PlainText);
        assert!(text.starts_with("Route: A -> C (2 hops, 3.0 km, 6 min)"));
        assert!(text.contains("Traffic: Heavy"));
        assert!(text.contains("  1: B (1.0 km, 2 min, high congestion)"));
        assert!(text.contains("  0: A\n"));
    }

    #[test]
    fn markdown_render_bolds_nodes() {
        let text = summary().render(RenderMode::Markdown);
        assert!(text.contains("* 2. **C**"));
        assert!(text.contains("\n* 0. **A**\n"));
        assert!(!text.contains("*  "));
    }

    #[test]
    fn summary_serializes_congestion_in_snake_case() {
        let json = serde_json::to_value(summary()).unwrap();
        assert_eq!(json["traffic_level"], "heavy");
        assert_eq!(json["steps"][1]["congestion"], "high");
        assert!(json["steps"][0].get("congestion").is_none());
    }

    #[test]
    fn distance_table_sorts_unreachable_last() {
        let mut graph = Graph::from_edges([("A", "B", 5.0), ("A", "C", 1.0)]).unwrap();
        graph.add_node("Z");
        let table = DistanceTable::from_paths(&shortest_paths(&graph, &"A").unwrap());

        let order: Vec<&str> = table.rows.iter().map(|row| row.node.as_str()).collect();
        assert_eq!(order, vec!["A", "C", "B", "Z"]);
        assert_eq!(table.reachable, 3);
        assert_eq!(table.rows[3].minutes, None);
        assert!(table
            .render(RenderMode::PlainText)
            .contains("Z unreachable"));

        let markdown = table.render(RenderMode::Markdown);
        assert!(markdown.starts_with("**Travel times** from _A_ (3 of 4 reachable)"));
        assert!(markdown.contains("| A | 0 min | - |\n"));
        assert!(markdown.contains("| B | 5 min | A |\n"));
        assert!(markdown.contains("| Z | unreachable | - |\n"));
    }
}
