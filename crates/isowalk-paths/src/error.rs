use std::fmt;

/// Broken preconditions on the graph and queue types.
///
/// These are programming errors on the caller's side. An unreachable node
/// is not one of them: searches report that as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A node ID given through a signed interface was negative.
    NegativeNodeId(i64),
    /// The key is already enqueued.
    DuplicateKey(i32),
    /// The key is not enqueued.
    MissingKey(i32),
    /// `front` or `dequeue` on an empty queue.
    EmptyQueue,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeNodeId(id) => write!(f, "node id must be non-negative, got {id}"),
            Self::DuplicateKey(key) => write!(f, "priority queue already contains key {key}"),
            Self::MissingKey(key) => write!(f, "priority queue has no key {key}"),
            Self::EmptyQueue => write!(f, "priority queue is empty"),
        }
    }
}

impl std::error::Error for PathError {}
