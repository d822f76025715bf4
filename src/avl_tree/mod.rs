pub mod avl_tree;
pub(crate) mod node_arena;
pub mod traversal;

/// Index of a node in the arena's parallel arrays.
/// Only valid until the next removal, which may relocate the last slot.
pub type Slot = usize;
