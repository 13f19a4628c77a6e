use std::fmt;

use crate::PathError;
use crate::traits::{NodeId, Pather};

/// Directed graph over dense node IDs, stored as one neighbour list per ID.
///
/// # Storage
///
/// The lists live in an arena indexed by node ID. [`with_capacity`]
/// pre-sizes it; otherwise [`add_edge`] resizes the arena to `from + 1`
/// slots when `from` is past the end. Slots between the old end and `from`
/// start empty. Lookups past the end behave as an isolated node.
///
/// # Counting
///
/// [`edge_count`] counts `add_edge` calls, including repeats of an edge
/// that already exists. [`distinct_edge_count`] counts stored edges. The
/// two agree as long as no edge is added twice, which is the case for
/// graphs built by tile adjacency.
///
/// [`with_capacity`]: Self::with_capacity
/// [`add_edge`]: Self::add_edge
/// [`edge_count`]: Self::edge_count
/// [`distinct_edge_count`]: Self::distinct_edge_count
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connections {
    adjacency: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl Connections {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with `nodes` neighbour lists already allocated.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            edge_count: 0,
        }
    }

    /// Add a one-way edge `from -> to`. Adding an existing edge leaves the
    /// neighbour lists unchanged but still bumps [`edge_count`](Self::edge_count).
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        if from >= self.adjacency.len() {
            self.adjacency.resize(from + 1, Vec::new());
        }
        let neighbors = &mut self.adjacency[from];
        if !neighbors.contains(&to) {
            neighbors.push(to);
        }
        self.edge_count += 1;
        debug_assert!(self.are_connected(from, to));
    }

    /// [`add_edge`](Self::add_edge) for IDs coming from signed sources.
    pub fn try_add_edge(&mut self, from: i64, to: i64) -> Result<(), PathError> {
        let from = NodeId::try_from(from).map_err(|_| PathError::NegativeNodeId(from))?;
        let to = NodeId::try_from(to).map_err(|_| PathError::NegativeNodeId(to))?;
        self.add_edge(from, to);
        Ok(())
    }

    /// Add `a -> b` and `b -> a`.
    pub fn add_edge_both_ways(&mut self, a: NodeId, b: NodeId) {
        self.add_edge(a, b);
        self.add_edge(b, a);
    }

    /// Whether there is a direct edge `from -> to`.
    pub fn are_connected(&self, from: NodeId, to: NodeId) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|neighbors| neighbors.contains(&to))
    }

    /// Direct successors of `id`, in insertion order. Empty for IDs past the
    /// end of the arena.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of `add_edge` calls so far.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of distinct directed edges stored.
    pub fn distinct_edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Number of neighbour-list slots in the arena.
    #[inline]
    pub fn node_span(&self) -> usize {
        self.adjacency.len()
    }

    /// Drop every edge, keeping the arena allocation.
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.edge_count = 0;
    }
}

impl Pather for Connections {
    fn neighbors(&self, id: NodeId, buf: &mut Vec<NodeId>) {
        buf.extend_from_slice(Connections::neighbors(self, id));
    }
}

impl fmt::Display for Connections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Connections:")?;
        for (id, neighbors) in self.adjacency.iter().enumerate() {
            write!(f, "From: {id}:")?;
            for n in neighbors {
                write!(f, " {n}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
