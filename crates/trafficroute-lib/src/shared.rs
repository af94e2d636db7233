//! Process-wide graph handle shared between route queries and telemetry.
//!
//! Readers take a snapshot (an `Arc` clone under a brief read lock) and run
//! their whole computation against it. Writers take the write lock and modify
//! the graph through `Arc::make_mut`, which clones the graph first if any
//! snapshot is still alive. A computation therefore never sees a weight change
//! half-way through, and a long computation never blocks ingestion.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::path::{shortest_path, shortest_paths, Route, ShortestPaths};
use crate::weight::Weight;

/// Immutable view of the graph as of one instant.
pub type GraphSnapshot<N> = Arc<Graph<N>>;

/// Thread-safe, cheaply snapshotted graph.
pub struct SharedGraph<N> {
    inner: RwLock<Arc<Graph<N>>>,
}

impl<N: NodeId> Default for SharedGraph<N> {
    fn default() -> Self {
        Self::new(Graph::new())
    }
}

impl<N: NodeId> From<Graph<N>> for SharedGraph<N> {
    fn from(graph: Graph<N>) -> Self {
        Self::new(graph)
    }
}

impl<N: NodeId> SharedGraph<N> {
    pub fn new(graph: Graph<N>) -> Self {
        Self {
            inner: RwLock::new(Arc::new(graph)),
        }
    }

    /// Current graph; unaffected by any later mutation.
    pub fn snapshot(&self) -> GraphSnapshot<N> {
        Arc::clone(&*self.read())
    }

    /// Apply `edit` under the write lock.
    ///
    /// Snapshots taken before the call keep the previous graph. The individual
    /// graph operations validate before mutating, but an `edit` that performs
    /// several of them and fails part-way keeps the ones already applied.
    pub fn update<T, F>(&self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Graph<N>) -> Result<T>,
    {
        let mut guard = self.write();
        edit(Arc::make_mut(&mut *guard))
    }

    pub fn add_node(&self, id: N) -> bool {
        let mut guard = self.write();
        Arc::make_mut(&mut *guard).add_node(id)
    }

    pub fn add_edge(&self, from: N, to: N, weight: f64) -> Result<()> {
        // Validate before locking so a rejected weight never forces a copy.
        Weight::new(weight)?;
        self.update(|graph| graph.add_edge(from, to, weight))
    }

    pub fn set_weight(&self, from: &N, to: &N, weight: f64) -> Result<Weight> {
        Weight::new(weight)?;
        self.update(|graph| graph.set_weight(from, to, weight))
    }

    /// Outgoing edges of `node` as owned `(target, weight)` pairs.
    pub fn neighbors_of(&self, node: &N) -> Result<Vec<(N, Weight)>> {
        let guard = self.read();
        let edges = guard
            .neighbors(node)?
            .map(|edge| (edge.to.clone(), edge.weight))
            .collect();
        Ok(edges)
    }

    pub fn node_ids(&self) -> Vec<N> {
        self.read().node_ids().cloned().collect()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.read().contains_node(node)
    }

    pub fn node_count(&self) -> usize {
        self.read().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.read().edge_count()
    }

    /// [`shortest_paths`] against a fresh snapshot.
    pub fn shortest_paths(&self, source: &N) -> Result<ShortestPaths<N>> {
        let snapshot = self.snapshot();
        shortest_paths(&snapshot, source)
    }

    /// [`shortest_path`] against a fresh snapshot.
    pub fn shortest_path(&self, source: &N, target: &N) -> Result<Option<Route<N>>> {
        let snapshot = self.snapshot();
        shortest_path(&snapshot, source, target)
    }

    // Every mutation validates its input before touching the graph, so a
    // panicking holder cannot leave it inconsistent and poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Arc<Graph<N>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Graph<N>>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N: NodeId> fmt::Debug for SharedGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.read();
        f.debug_struct("SharedGraph")
            .field("node_count", &graph.node_count())
            .field("edge_count", &graph.edge_count())
            .finish()
    }
}
