//! Floor tiles and the graph the player walks on.
//!
//! - [`FloorGraph`]: tiles inserted one at a time, connected to every
//!   earlier tile they touch in iso space
//! - [`Level`]: text layout of a floor, built into a [`FloorGraph`]
//! - [`Trail`]: steps a position along a found path, one waypoint at a time
//!
//! The graph is an ordinary owned value. A scene builds one when it loads
//! and drops it when it unloads.

pub mod graph;
pub mod level;
pub mod tile;
pub mod trail;

pub use graph::FloorGraph;
pub use level::{Level, LevelCell, LevelError, TileSpec};
pub use tile::FloorTile;
pub use trail::{StepEvent, Trail, WalkConfig};

pub use isowalk_paths::NodeId;
