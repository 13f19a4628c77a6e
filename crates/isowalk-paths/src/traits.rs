/// Dense, zero-based node identifier. A node's ID is its insertion index.
pub type NodeId = usize;

/// Minimal search interface: neighbour enumeration.
pub trait Pather {
    /// Append the direct successors of `id` into `buf`, in the order the
    /// search should visit them. The caller clears `buf` before calling.
    fn neighbors(&self, id: NodeId, buf: &mut Vec<NodeId>);
}
