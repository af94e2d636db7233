use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use trafficroute_lib::{shortest_path, shortest_paths, Graph, SharedGraph};

const GRID_SIZE: u32 = 100;

/// Bidirectional grid with pseudo-random travel times between 1 and 10 minutes.
fn grid(size: u32) -> Graph<u32> {
    let mut graph = Graph::new();
    let mut seed = 0x2545_f491_u32;
    let mut next_weight = || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        f64::from(seed % 10 + 1)
    };

    for row in 0..size {
        for col in 0..size {
            let id = row * size + col;
            if col + 1 < size {
                graph.add_edge(id, id + 1, next_weight()).expect("valid weight");
                graph.add_edge(id + 1, id, next_weight()).expect("valid weight");
            }
            if row + 1 < size {
                graph.add_edge(id, id + size, next_weight()).expect("valid weight");
                graph.add_edge(id + size, id, next_weight()).expect("valid weight");
            }
        }
    }
    graph
}

static GRID: Lazy<Graph<u32>> = Lazy::new(|| grid(GRID_SIZE));

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRID;
    let corner = GRID_SIZE * GRID_SIZE - 1;
    let centre = (GRID_SIZE / 2) * GRID_SIZE + GRID_SIZE / 2;

    c.bench_function("shortest_paths_grid_100", |b| {
        b.iter(|| {
            let result = shortest_paths(graph, black_box(&0)).expect("source exists");
            black_box(result.reachable_count())
        });
    });

    c.bench_function("shortest_path_corner_to_corner", |b| {
        b.iter(|| {
            let route = shortest_path(graph, black_box(&0), black_box(&corner))
                .expect("nodes exist")
                .expect("grid is connected");
            black_box(route.cost())
        });
    });

    c.bench_function("shortest_path_early_exit_centre", |b| {
        b.iter(|| {
            let route = shortest_path(graph, black_box(&centre), black_box(&(centre + 1)))
                .expect("nodes exist")
                .expect("grid is connected");
            black_box(route.hop_count())
        });
    });

    c.bench_function("shared_update_then_query", |b| {
        let shared = SharedGraph::new(graph.clone());
        let mut weight = 1.0;
        b.iter(|| {
            weight = if weight > 9.0 { 1.0 } else { weight + 1.0 };
            shared.set_weight(&0, &1, weight).expect("edge exists");
            let route = shared
                .shortest_path(&0, &corner)
                .expect("nodes exist")
                .expect("grid is connected");
            black_box(route.cost())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
