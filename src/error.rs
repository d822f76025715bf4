use thiserror::Error;

/// Recoverable failures of tree operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AvlTreeError {
    #[error("tree is full (capacity {capacity})")]
    Full { capacity: usize },
    #[error("tree is empty")]
    Empty,
    #[error("element not found in tree")]
    NotFound,
}
