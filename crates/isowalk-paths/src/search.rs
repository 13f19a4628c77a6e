//! Unweighted path search.
//!
//! Breadth-first and depth-first search share one skeleton: a frontier, a
//! visited set and a predecessor ("breadcrumb") map. They differ only in
//! which end of the frontier is popped. Breadth-first finds a path with the
//! fewest edges; depth-first finds *a* path and is kept as a simple
//! reference to check the breadth-first results against.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::traits::{NodeId, Pather};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frontier {
    Fifo,
    Lifo,
}

/// Reusable search scratch space.
///
/// Every call starts from a cleared state, so results never depend on
/// earlier calls. Keeping one `PathSearch` around only saves the
/// allocations.
#[derive(Debug, Default)]
pub struct PathSearch {
    frontier: VecDeque<NodeId>,
    visited: HashSet<NodeId>,
    breadcrumbs: HashMap<NodeId, NodeId>,
    nbuf: Vec<NodeId>,
}

impl PathSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a path from `from` to `to` using the fewest edges.
    ///
    /// Returns the full path, both endpoints included, or `None` if `to` is
    /// unreachable. When `from == to` the path is `[to]`.
    pub fn breadth_first<P: Pather>(
        &mut self,
        graph: &P,
        from: NodeId,
        to: NodeId,
    ) -> Option<Vec<NodeId>> {
        self.search(graph, from, to, Frontier::Fifo)
    }

    /// Find some path from `from` to `to`, not necessarily the shortest.
    pub fn depth_first<P: Pather>(
        &mut self,
        graph: &P,
        from: NodeId,
        to: NodeId,
    ) -> Option<Vec<NodeId>> {
        self.search(graph, from, to, Frontier::Lifo)
    }

    /// Path query used for walking. Currently breadth-first, which gives
    /// shortest paths on the unweighted tile graph.
    pub fn path_exists<P: Pather>(
        &mut self,
        graph: &P,
        from: NodeId,
        to: NodeId,
    ) -> Option<Vec<NodeId>> {
        self.breadth_first(graph, from, to)
    }

    fn search<P: Pather>(
        &mut self,
        graph: &P,
        from: NodeId,
        to: NodeId,
        order: Frontier,
    ) -> Option<Vec<NodeId>> {
        self.frontier.clear();
        self.visited.clear();
        self.breadcrumbs.clear();

        self.frontier.push_back(from);
        self.visited.insert(from);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = loop {
            let next = match order {
                Frontier::Fifo => self.frontier.pop_front(),
                Frontier::Lifo => self.frontier.pop_back(),
            };
            let Some(node) = next else {
                break false;
            };
            if node == to {
                break true;
            }

            nbuf.clear();
            graph.neighbors(node, &mut nbuf);
            for &n in nbuf.iter() {
                // Marked on push so a node is queued at most once.
                if self.visited.insert(n) {
                    self.frontier.push_back(n);
                    self.breadcrumbs.insert(n, node);
                }
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::trace!("no path from {from} to {to} ({order:?})");
            return None;
        }
        let path = self.trail(to);
        log::trace!("path from {from} to {to} ({order:?}): {path:?}");
        Some(path)
    }

    /// Walk the breadcrumbs back from `to`. Stops at a node with no
    /// predecessor, or one recorded as its own predecessor.
    fn trail(&self, to: NodeId) -> Vec<NodeId> {
        let mut path = vec![to];
        let mut n = to;
        while let Some(&prev) = self.breadcrumbs.get(&n) {
            if prev == n {
                break;
            }
            path.push(prev);
            n = prev;
        }
        path.reverse();
        path
    }
}

/// [`PathSearch::breadth_first`] with fresh scratch space.
pub fn breadth_first<P: Pather>(graph: &P, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    PathSearch::new().breadth_first(graph, from, to)
}

/// [`PathSearch::depth_first`] with fresh scratch space.
pub fn depth_first<P: Pather>(graph: &P, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    PathSearch::new().depth_first(graph, from, to)
}

/// [`PathSearch::path_exists`] with fresh scratch space.
pub fn path_exists<P: Pather>(graph: &P, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    PathSearch::new().path_exists(graph, from, to)
}
