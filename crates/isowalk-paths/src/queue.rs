//! Min-priority index keyed by integer.
//!
//! The shipped searches are unweighted and never touch this; it is the
//! building block for a Dijkstra or A* search over [`Connections`]
//! once edges carry costs.
//!
//! [`Connections`]: crate::Connections

use std::collections::HashMap;

use crate::PathError;

/// A set of unique keys, each with an integer priority. The *front* is the
/// key with the lowest priority value.
///
/// Finding the front is a linear scan, which is fine for graphs with tens
/// of nodes. Equal priorities resolve to the lowest key.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriorityQueue {
    priorities: HashMap<i32, i32>,
}

impl PriorityQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    pub fn contains(&self, key: i32) -> bool {
        self.priorities.contains_key(&key)
    }

    /// Add `key` with `priority`. Fails if `key` is already present.
    pub fn enqueue(&mut self, key: i32, priority: i32) -> Result<(), PathError> {
        if self.priorities.contains_key(&key) {
            return Err(PathError::DuplicateKey(key));
        }
        self.priorities.insert(key, priority);
        Ok(())
    }

    /// Change the priority of a present `key`.
    pub fn update_priority(&mut self, key: i32, new_priority: i32) -> Result<(), PathError> {
        match self.priorities.get_mut(&key) {
            Some(p) => {
                *p = new_priority;
                Ok(())
            }
            None => Err(PathError::MissingKey(key)),
        }
    }

    /// The key with the lowest priority value.
    pub fn front(&self) -> Result<i32, PathError> {
        self.priorities
            .iter()
            .min_by_key(|&(&key, &priority)| (priority, key))
            .map(|(&key, _)| key)
            .ok_or(PathError::EmptyQueue)
    }

    /// Remove and return the key with the lowest priority value.
    pub fn dequeue(&mut self) -> Result<i32, PathError> {
        let key = self.front()?;
        self.priorities.remove(&key);
        Ok(key)
    }
}
