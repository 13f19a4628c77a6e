use isowalk_core::{IsoPoint, Vec3};
use isowalk_paths::NodeId;

/// A walkable floor tile.
///
/// `T` is whatever the caller uses to identify the tile on its side, such
/// as an entity handle. The iso coordinate is computed from the position
/// when the tile is created and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "RawTile<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct FloorTile<T> {
    id: NodeId,
    identity: T,
    pos: Vec3,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    iso: IsoPoint,
    crouchy: bool,
    winner: bool,
}

impl<T> FloorTile<T> {
    /// A plain tile at `pos`. Its ID is assigned when it joins a
    /// [`FloorGraph`](crate::FloorGraph).
    pub fn new(pos: Vec3, identity: T) -> Self {
        Self {
            id: 0,
            identity,
            pos,
            iso: pos.to_iso(),
            crouchy: false,
            winner: false,
        }
    }

    /// Mark the tile as one the player has to crouch on.
    pub fn with_crouchy(mut self, crouchy: bool) -> Self {
        self.crouchy = crouchy;
        self
    }

    /// Mark the tile as the goal of the level.
    pub fn with_winner(mut self, winner: bool) -> Self {
        self.winner = winner;
        self
    }

    /// Node ID in the owning graph.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    #[inline]
    pub fn identity(&self) -> &T {
        &self.identity
    }

    /// 3D world position.
    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// Projected position, fixed at creation.
    #[inline]
    pub fn iso(&self) -> IsoPoint {
        self.iso
    }

    #[inline]
    pub fn is_crouchy(&self) -> bool {
        self.crouchy
    }

    #[inline]
    pub fn is_winner(&self) -> bool {
        self.winner
    }

    /// Whether the two tiles touch on screen.
    pub fn is_adjacent_to<U>(&self, other: &FloorTile<U>) -> bool {
        self.iso.is_adjacent(other.iso)
    }
}

/// Serialized form of a [`FloorTile`]; the iso coordinate is recomputed.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTile<T> {
    #[serde(default)]
    id: NodeId,
    identity: T,
    pos: Vec3,
    #[serde(default)]
    crouchy: bool,
    #[serde(default)]
    winner: bool,
}

#[cfg(feature = "serde")]
impl<T> From<RawTile<T>> for FloorTile<T> {
    fn from(raw: RawTile<T>) -> Self {
        let mut tile = FloorTile::new(raw.pos, raw.identity)
            .with_crouchy(raw.crouchy)
            .with_winner(raw.winner);
        tile.set_id(raw.id);
        tile
    }
}
