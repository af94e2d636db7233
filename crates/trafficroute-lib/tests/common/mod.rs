#![allow(dead_code)]

use std::path::PathBuf;

use trafficroute_lib::{Graph, RoadNetwork};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn downtown() -> RoadNetwork {
    let path = fixtures_dir().join("downtown.csv");
    RoadNetwork::from_path(&path).expect("load fixture downtown.csv")
}

/// `A->B (1)`, `B->C (2)`, `A->C (5)`.
pub fn triangle() -> Graph<&'static str> {
    Graph::from_edges([("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 5.0)])
        .expect("triangle weights are valid")
}
