use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, NodeTable};
use crate::heap::IndexedMinHeap;

/// Best known cost from the source to a node.
///
/// `Reachable` orders before `Unreachable`, so comparing two distances also
/// works across the sentinel. `Unreachable` always means no path exists; a
/// path whose total cost overflows is reported as `Reachable(f64::MAX)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Reachable(f64),
    Unreachable,
}

impl Distance {
    /// Numeric cost, with `f64::INFINITY` standing in for unreachable nodes.
    pub fn value(self) -> f64 {
        match self {
            Distance::Reachable(cost) => cost,
            Distance::Unreachable => f64::INFINITY,
        }
    }

    pub fn finite(self) -> Option<f64> {
        match self {
            Distance::Reachable(cost) => Some(cost),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Reachable(_))
    }
}

impl From<Option<f64>> for Distance {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Distance::Unreachable, Distance::Reachable)
    }
}

/// Ordered path from a source to a target with its total cost.
///
/// Always holds at least one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<N> {
    steps: Vec<N>,
    cost: f64,
}

impl<N> Route<N> {
    pub fn steps(&self) -> &[N] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<N> {
        self.steps
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn source(&self) -> &N {
        &self.steps[0]
    }

    pub fn target(&self) -> &N {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Distances and predecessors for every node, rooted at one source.
///
/// Produced fresh by [`shortest_paths`]; it keeps its own view of the node set
/// and is unaffected by later changes to the graph.
#[derive(Debug, Clone)]
pub struct ShortestPaths<N> {
    nodes: Arc<NodeTable<N>>,
    source: usize,
    distances: Vec<Option<f64>>,
    predecessors: Vec<Option<usize>>,
}

impl<N: NodeId> ShortestPaths<N> {
    pub fn source(&self) -> &N {
        self.nodes.id(self.source)
    }

    pub fn distance(&self, node: &N) -> Result<Distance> {
        let index = self.lookup(node)?;
        Ok(self.distances[index].into())
    }

    pub fn predecessor(&self, node: &N) -> Result<Option<&N>> {
        let index = self.lookup(node)?;
        Ok(self.predecessors[index].map(|pred| self.nodes.id(pred)))
    }

    pub fn is_reachable(&self, node: &N) -> Result<bool> {
        Ok(self.distance(node)?.is_reachable())
    }

    /// Reconstruct the path to `target`; `Ok(None)` when it is unreachable.
    pub fn path_to(&self, target: &N) -> Result<Option<Route<N>>> {
        let index = self.nodes.get(target).ok_or_else(|| Error::TargetNotFound {
            node: target.to_string(),
        })?;
        Ok(reconstruct_route(
            &self.nodes,
            &self.distances,
            &self.predecessors,
            index,
        ))
    }

    /// Every node with its distance and predecessor, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, Distance, Option<&N>)> + '_ {
        self.nodes.iter().enumerate().map(move |(index, node)| {
            (
                node,
                self.distances[index].into(),
                self.predecessors[index].map(|pred| self.nodes.id(pred)),
            )
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    fn lookup(&self, node: &N) -> Result<usize> {
        self.nodes.get(node).ok_or_else(|| Error::NodeNotFound {
            node: node.to_string(),
        })
    }
}

/// Compute minimum-cost paths from `source` to every node in `graph`.
pub fn shortest_paths<N: NodeId>(graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>> {
    let source_index = graph
        .index_of(source)
        .ok_or_else(|| Error::SourceNotFound {
            node: source.to_string(),
        })?;

    let search = run_search(graph, source_index, None);

    Ok(ShortestPaths {
        nodes: graph.node_table(),
        source: source_index,
        distances: search.distances,
        predecessors: search.predecessors,
    })
}

/// Find the minimum-cost path from `source` to `target`.
///
/// Returns `Ok(None)` when both nodes exist but no path connects them.
pub fn shortest_path<N: NodeId>(
    graph: &Graph<N>,
    source: &N,
    target: &N,
) -> Result<Option<Route<N>>> {
    let source_index = graph
        .index_of(source)
        .ok_or_else(|| Error::SourceNotFound {
            node: source.to_string(),
        })?;
    let target_index = graph
        .index_of(target)
        .ok_or_else(|| Error::TargetNotFound {
            node: target.to_string(),
        })?;

    if source_index == target_index {
        return Ok(Some(Route {
            steps: vec![source.clone()],
            cost: 0.0,
        }));
    }

    let search = run_search(graph, source_index, Some(target_index));
    let nodes = graph.node_table();
    Ok(reconstruct_route(
        &nodes,
        &search.distances,
        &search.predecessors,
        target_index,
    ))
}

struct Search {
    distances: Vec<Option<f64>>,
    predecessors: Vec<Option<usize>>,
}

/// Dijkstra over dense node indices.
///
/// Stops early once `stop_at` is settled; its distance and predecessor are
/// final from that point on.
fn run_search<N: NodeId>(graph: &Graph<N>, source: usize, stop_at: Option<usize>) -> Search {
    let node_count = graph.node_count();
    let mut distances: Vec<Option<f64>> = vec![None; node_count];
    let mut predecessors: Vec<Option<usize>> = vec![None; node_count];
    let mut settled = vec![false; node_count];
    let mut frontier = IndexedMinHeap::with_capacity(node_count);

    distances[source] = Some(0.0);
    frontier.push_or_decrease(source, 0.0);

    let mut settled_count = 0usize;
    let mut peak_frontier = 1usize;

    while let Some((current, current_distance)) = frontier.pop() {
        settled[current] = true;
        settled_count += 1;

        if stop_at == Some(current) {
            break;
        }

        for edge in graph.out_edges(current) {
            let next = edge.target;
            if settled[next] {
                continue;
            }

            let mut candidate = current_distance + edge.weight.get();
            if !candidate.is_finite() {
                // Clamp so a connected node never looks unreachable.
                tracing::warn!(
                    from = %graph.node_at(current),
                    to = %graph.node_at(next),
                    "path cost overflowed; saturating at f64::MAX"
                );
                candidate = f64::MAX;
            }

            // Strict improvement only: on ties the first predecessor found stays.
            if distances[next].map_or(true, |known| candidate < known) {
                distances[next] = Some(candidate);
                predecessors[next] = Some(current);
                frontier.push_or_decrease(next, candidate);
                peak_frontier = peak_frontier.max(frontier.len());
            }
        }
    }

    tracing::debug!(
        source = %graph.node_at(source),
        nodes = node_count,
        settled = settled_count,
        peak_frontier,
        "shortest-path search finished"
    );

    Search {
        distances,
        predecessors,
    }
}

fn reconstruct_route<N: NodeId>(
    nodes: &NodeTable<N>,
    distances: &[Option<f64>],
    predecessors: &[Option<usize>],
    target: usize,
) -> Option<Route<N>> {
    let cost = distances[target]?;
    let mut steps = Vec::new();
    let mut current = Some(target);
    while let Some(index) = current {
        steps.push(nodes.id(index).clone());
        current = predecessors[index];
    }
    steps.reverse();
    Some(Route { steps, cost })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_ordering_places_sentinel_last() {
        assert!(Distance::Reachable(1e300) < Distance::Unreachable);
        assert!(Distance::Reachable(1.0) < Distance::Reachable(2.0));
        assert_eq!(Distance::Unreachable.value(), f64::INFINITY);
        assert_eq!(Distance::from(None), Distance::Unreachable);
    }

    #[test]
    fn route_hop_count() {
        let route = Route {
            steps: vec!["A", "B", "C"],
            cost: 3.0,
        };
        assert_eq!(route.hop_count(), 2);
        assert_eq!(*route.source(), "A");
        assert_eq!(*route.target(), "C");
    }

    #[test]
    fn single_node_route_has_no_hops() {
        let route = Route {
            steps: vec![7u32],
            cost: 0.0,
        };
        assert_eq!(route.hop_count(), 0);
        assert_eq!(route.source(), route.target());
    }

    #[test]
    fn early_exit_matches_full_search() {
        let graph = Graph::from_edges([
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("A", "C", 2.0),
            ("C", "D", 1.0),
        ])
        .unwrap();
        let full = shortest_paths(&graph, &"A").unwrap();
        let direct = shortest_path(&graph, &"A", &"C").unwrap().unwrap();

        assert_eq!(full.path_to(&"C").unwrap().unwrap(), direct);
        // A->B->C ties the direct edge, so the first predecessor found stays.
        assert_eq!(direct.steps(), &["A", "C"]);
        assert_eq!(direct.cost(), 2.0);
    }

    #[test]
    fn overflowing_costs_saturate_instead_of_disconnecting() {
        let graph = Graph::from_edges([
            ("A", "B", f64::MAX),
            ("B", "C", f64::MAX),
            ("C", "D", 1.0),
        ])
        .unwrap();
        let result = shortest_paths(&graph, &"A").unwrap();

        assert_eq!(
            result.distance(&"B").unwrap(),
            Distance::Reachable(f64::MAX)
        );
        assert_eq!(
            result.distance(&"C").unwrap(),
            Distance::Reachable(f64::MAX)
        );
        assert_eq!(
            result.distance(&"D").unwrap(),
            Distance::Reachable(f64::MAX)
        );

        let route = shortest_path(&graph, &"A", &"C").unwrap().unwrap();
        assert_eq!(route.steps(), &["A", "B", "C"]);
        assert_eq!(route.cost(), f64::MAX);
    }
}
