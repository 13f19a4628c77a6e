//! Graph search over dense integer node IDs.
//!
//! - [`Connections`]: directed adjacency lists, one per node ID
//! - [`PathSearch`]: breadth-first (shortest) and depth-first path search
//! - [`PriorityQueue`]: min-priority key index for weighted searches
//!
//! Searches are generic over [`Pather`], which [`Connections`] implements.
//! A missing path is an ordinary `None`; only broken preconditions produce a
//! [`PathError`].

mod connections;
mod error;
mod queue;
mod search;
mod traits;

pub use connections::Connections;
pub use error::PathError;
pub use queue::PriorityQueue;
pub use search::{PathSearch, breadth_first, depth_first, path_exists};
pub use traits::{NodeId, Pather};
