//! **isowalk-core**: geometry types for the isometric floor walker.
//!
//! World positions are [`Vec3`]; tiles are compared for adjacency in
//! projected [`IsoPoint`] space, where a tile far away in 3D can sit right
//! next to another one on screen.

pub mod geom;

pub use geom::{DEFAULT_EPSILON, IsoPoint, Vec3, desired_yaw_degrees, very_close};
