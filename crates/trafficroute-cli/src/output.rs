//! Output formatting for command results.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use trafficroute_lib::{
    format_distance, format_duration, BoundingBox, CongestionLevel, DistanceTable, RenderMode,
    RouteSummary, SegmentView,
};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Markdown suitable for notes or chat.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

/// One outgoing segment of an intersection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighborRow {
    pub node: String,
    pub minutes: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_kph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion: Option<CongestionLevel>,
}

/// Outgoing segments of one intersection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighborList {
    pub node: String,
    pub neighbors: Vec<NeighborRow>,
}

impl NeighborList {
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::Markdown => self.render_markdown(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = format!("Segments from {} ({}):\n", self.node, self.neighbors.len());
        for row in &self.neighbors {
            buffer.push_str(&format!("  -> {} {}", row.node, format_duration(row.minutes)));
            if let (Some(length), Some(congestion)) = (row.length_km, row.congestion) {
                buffer.push_str(&format!(
                    " ({}, {} congestion)",
                    format_distance(length),
                    congestion
                ));
            }
            buffer.push('\n');
        }
        buffer
    }

    fn render_markdown(&self) -> String {
        let mut buffer = format!(
            "**Segments** from _{}_ ({})\n\n",
            self.node,
            self.neighbors.len()
        );
        buffer.push_str("| To | Time | Length | Congestion |\n");
        buffer.push_str("|----|------|--------|------------|\n");
        for row in &self.neighbors {
            let _ = writeln!(
                buffer,
                "| {} | {} | {} | {} |",
                row.node,
                format_duration(row.minutes),
                row.length_km.map_or_else(|| "-".to_string(), format_distance),
                row.congestion.map_or_else(|| "-".to_string(), |c| c.to_string())
            );
        }
        buffer
    }
}

/// Located segments inside a bounding box.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SegmentList {
    pub bbox: BoundingBox,
    pub segments: Vec<SegmentView>,
}

impl SegmentList {
    pub fn render(&self, mode: RenderMode) -> String {
        let bbox = format!(
            "{},{},{},{}",
            self.bbox.min_lon, self.bbox.min_lat, self.bbox.max_lon, self.bbox.max_lat
        );
        let mut buffer = String::new();
        match mode {
            RenderMode::PlainText => {
                let _ = writeln!(buffer, "Segments in {} ({}):", bbox, self.segments.len());
                for view in &self.segments {
                    let _ = writeln!(
                        buffer,
                        "  {} -> {} {} ({}, {} congestion)",
                        view.from,
                        view.to,
                        format_duration(view.info.travel_minutes()),
                        format_distance(view.info.length_km),
                        view.congestion
                    );
                }
            }
            RenderMode::Markdown => {
                let _ = writeln!(buffer, "**Segments** in _{}_ ({})\n", bbox, self.segments.len());
                buffer.push_str("| From | To | Time | Length | Congestion |\n");
                buffer.push_str("|------|----|------|--------|------------|\n");
                for view in &self.segments {
                    let _ = writeln!(
                        buffer,
                        "| {} | {} | {} | {} | {} |",
                        view.from,
                        view.to,
                        format_duration(view.info.travel_minutes()),
                        format_distance(view.info.length_km),
                        view.congestion
                    );
                }
            }
        }
        buffer
    }
}

pub fn print_route(summary: &RouteSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_stdout(&summary.render(RenderMode::PlainText)),
        OutputFormat::Markdown => write_stdout(&summary.render(RenderMode::Markdown)),
        OutputFormat::Json => print_json(summary),
    }
}

pub fn print_distances(table: &DistanceTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_stdout(&table.render(RenderMode::PlainText)),
        OutputFormat::Markdown => write_stdout(&table.render(RenderMode::Markdown)),
        OutputFormat::Json => print_json(table),
    }
}

pub fn print_neighbors(list: &NeighborList, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_stdout(&list.render(RenderMode::PlainText)),
        OutputFormat::Markdown => write_stdout(&list.render(RenderMode::Markdown)),
        OutputFormat::Json => print_json(list),
    }
}

pub fn print_segments(list: &SegmentList, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_stdout(&list.render(RenderMode::PlainText)),
        OutputFormat::Markdown => write_stdout(&list.render(RenderMode::Markdown)),
        OutputFormat::Json => print_json(list),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    write_stdout(&format!("{json}\n"))
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write to stdout")
}
