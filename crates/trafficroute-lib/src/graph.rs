use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::slice;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::weight::Weight;

/// Identifier for an intersection or waypoint.
///
/// Any hashable, comparable key works; `Display` is only used when reporting
/// errors. Implemented automatically for `String`, `&str`, integers, etc.
pub trait NodeId: Clone + Eq + Hash + Display {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Display {}

/// Registration-ordered mapping between node identifiers and dense indices.
///
/// Shared between a graph and the results computed from it; the graph clones
/// the table before registering a node while any result still holds it.
#[derive(Debug, Clone)]
pub(crate) struct NodeTable<N> {
    ids: Vec<N>,
    index: HashMap<N, usize>,
}

impl<N: NodeId> NodeTable<N> {
    fn new() -> Self {
        Self {
            ids: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, id: &N) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn id(&self, index: usize) -> &N {
        &self.ids[index]
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn iter(&self) -> slice::Iter<'_, N> {
        self.ids.iter()
    }

    fn insert(&mut self, id: N) -> usize {
        let index = self.ids.len();
        self.index.insert(id.clone(), index);
        self.ids.push(id);
        index
    }
}

/// Outgoing edge stored in the adjacency list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub(crate) target: usize,
    pub(crate) weight: Weight,
}

/// Directed road graph with a fixed-once-added topology and mutable weights.
///
/// Every node that was registered explicitly or appeared as an edge endpoint
/// is a member of the graph; lookups for anything else fail rather than
/// reporting "no edges".
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Arc<NodeTable<N>>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> Graph<N> {
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(NodeTable::new()),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Build a graph from `(from, to, weight)` triples, in order.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Register an isolated node. Returns `false` if it was already present.
    pub fn add_node(&mut self, id: N) -> bool {
        if self.nodes.get(&id).is_some() {
            return false;
        }
        self.intern(id);
        true
    }

    /// Append an edge, registering either endpoint if needed.
    ///
    /// Parallel edges are kept as separate entries.
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) -> Result<()> {
        let weight = Weight::new(weight)?;
        let from = self.intern(from);
        let target = self.intern(to);
        self.adjacency[from].push(Edge { target, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Replace the weight of the edge `from -> to` and return the previous one.
    ///
    /// With parallel edges the first one added is updated.
    pub fn set_weight(&mut self, from: &N, to: &N, weight: f64) -> Result<Weight> {
        let weight = Weight::new(weight)?;
        let edge = self
            .first_edge_mut(from, to)
            .ok_or_else(|| Error::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        let previous = std::mem::replace(&mut edge.weight, weight);
        tracing::trace!(%from, %to, %previous, current = %weight, "edge weight updated");
        Ok(previous)
    }

    /// Current weight of the first edge `from -> to`, if any.
    pub fn weight(&self, from: &N, to: &N) -> Option<Weight> {
        let from = self.nodes.get(from)?;
        let target = self.nodes.get(to)?;
        self.adjacency[from]
            .iter()
            .find(|edge| edge.target == target)
            .map(|edge| edge.weight)
    }

    /// Outgoing edges of `node` in insertion order.
    pub fn neighbors(&self, node: &N) -> Result<Neighbors<'_, N>> {
        let index = self.nodes.get(node).ok_or_else(|| Error::NodeNotFound {
            node: node.to_string(),
        })?;
        Ok(Neighbors {
            from: self.nodes.id(index),
            nodes: &self.nodes,
            edges: self.adjacency[index].iter(),
        })
    }

    /// All registered nodes in registration order.
    pub fn node_ids(&self) -> slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.get(node).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn index_of(&self, node: &N) -> Option<usize> {
        self.nodes.get(node)
    }

    pub(crate) fn node_at(&self, index: usize) -> &N {
        self.nodes.id(index)
    }

    pub(crate) fn out_edges(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }

    pub(crate) fn node_table(&self) -> Arc<NodeTable<N>> {
        Arc::clone(&self.nodes)
    }

    fn intern(&mut self, id: N) -> usize {
        if let Some(index) = self.nodes.get(&id) {
            return index;
        }
        let index = Arc::make_mut(&mut self.nodes).insert(id);
        self.adjacency.push(Vec::new());
        index
    }

    fn first_edge_mut(&mut self, from: &N, to: &N) -> Option<&mut Edge> {
        let from = self.nodes.get(from)?;
        let target = self.nodes.get(to)?;
        self.adjacency[from]
            .iter_mut()
            .find(|edge| edge.target == target)
    }
}

/// Borrowed view of one outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef<'a, N> {
    pub from: &'a N,
    pub to: &'a N,
    pub weight: Weight,
}

/// Iterator over a node's outgoing edges, see [`Graph::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors<'a, N> {
    from: &'a N,
    nodes: &'a NodeTable<N>,
    edges: slice::Iter<'a, Edge>,
}

impl<'a, N: NodeId> Iterator for Neighbors<'a, N> {
    type Item = EdgeRef<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.edges.next()?;
        Some(EdgeRef {
            from: self.from,
            to: self.nodes.id(edge.target),
            weight: edge.weight,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

impl<N: NodeId> ExactSizeIterator for Neighbors<'_, N> {}
