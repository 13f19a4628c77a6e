//! The walkable floor as a graph.
//!
//! Each inserted tile is tested against every tile already present, so
//! building a floor of `n` tiles costs O(n²) adjacency tests. Floors hold
//! tens of tiles, which keeps this well under a frame.

use isowalk_core::{IsoPoint, Vec3};
use isowalk_paths::{Connections, NodeId, path_exists};

use crate::tile::FloorTile;

/// Floor tiles plus the adjacency between them.
///
/// Tiles are append-only and a tile's [`NodeId`] is its insertion index.
/// Two tiles are connected, in both directions, when their iso coordinates
/// are grid neighbours. Insertion order does not change the resulting
/// edges.
#[derive(Debug, Clone)]
pub struct FloorGraph<T> {
    tiles: Vec<FloorTile<T>>,
    connections: Connections,
}

impl<T> Default for FloorGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FloorGraph<T> {
    /// Create an empty floor.
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            connections: Connections::new(),
        }
    }

    /// Number of tiles.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of one-way connections between tiles.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.connections.edge_count()
    }

    /// Whether there is a direct connection `from -> to`.
    pub fn are_connected(&self, from: NodeId, to: NodeId) -> bool {
        self.connections.are_connected(from, to)
    }

    /// The underlying adjacency lists.
    pub fn connections(&self) -> &Connections {
        &self.connections
    }

    pub fn tile(&self, id: NodeId) -> Option<&FloorTile<T>> {
        self.tiles.get(id)
    }

    /// All tiles, indexed by node ID.
    pub fn tiles(&self) -> &[FloorTile<T>] {
        &self.tiles
    }

    /// Insert a plain tile at `pos`, returning its node ID.
    pub fn insert_node(&mut self, pos: Vec3, identity: T) -> NodeId {
        self.insert_tile(FloorTile::new(pos, identity))
    }

    /// Insert a tile, connecting it to every existing tile it touches in
    /// iso space. Returns the new tile's node ID.
    pub fn insert_tile(&mut self, mut tile: FloorTile<T>) -> NodeId {
        let id = self.tiles.len();
        tile.set_id(id);

        let mut linked = 0;
        for other in &self.tiles {
            if tile.is_adjacent_to(other) {
                self.connections.add_edge_both_ways(id, other.id());
                linked += 1;
            }
        }
        log::debug!(
            "floor tile {id} at {} (iso {}) linked to {linked} tiles",
            tile.pos(),
            tile.iso()
        );

        self.tiles.push(tile);
        id
    }

    /// The tile whose iso coordinate is closest to the projection of `pos`.
    ///
    /// This finds what is close *on screen*, which may be far away in 3D.
    /// Ties go to the lowest ID. `None` when the floor is empty.
    pub fn find_nearest_node(&self, pos: Vec3) -> Option<NodeId> {
        let target = IsoPoint::from_world(pos);
        let mut best: Option<(NodeId, f32)> = None;
        for tile in &self.tiles {
            let d = tile.iso().distance_squared(target);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((tile.id(), d)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Shortest walk from tile `from` to tile `to`, both ends included.
    ///
    /// Empty when there is no path, or when either ID is not a tile of this
    /// floor.
    pub fn find_path(&self, from: NodeId, to: NodeId) -> Vec<&FloorTile<T>> {
        if from >= self.tiles.len() || to >= self.tiles.len() {
            log::warn!(
                "path query {from} -> {to} outside floor of {} tiles",
                self.tiles.len()
            );
            return Vec::new();
        }
        match path_exists(&self.connections, from, to) {
            Some(path) => path.into_iter().map(|id| &self.tiles[id]).collect(),
            None => {
                log::debug!("no path from tile {from} to tile {to}");
                Vec::new()
            }
        }
    }

    /// Path from the tile nearest to `pos` to tile `to`: the query made when
    /// the player picks a destination.
    pub fn path_to_tile(&self, pos: Vec3, to: NodeId) -> Vec<&FloorTile<T>> {
        match self.find_nearest_node(pos) {
            Some(from) => self.find_path(from, to),
            None => Vec::new(),
        }
    }

    /// Remove every tile and connection, ready for the next scene.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.connections.clear();
    }
}
