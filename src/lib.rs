//! Fixed-capacity AVL tree whose nodes live in a dense arena and refer to each other by slot index.
//!
//! Nodes are stored in parallel arrays (elements, parent, left, right, height) indexed by slot.
//! Live nodes always occupy slots `0..len()`. Removing a node moves the last slot into the hole,
//! so slot indices are not stable across removals and are never exposed by the public API.
//!
//! ```
//! use arena_avl::AvlTree;
//!
//! let mut tree = AvlTree::new(16);
//! for x in [5, 3, 8, 1, 4, 7, 9].iter() {
//!     tree.insert(*x).unwrap();
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(tree.remove(&5), Ok(5));
//! assert!(!tree.contains(&5));
//! ```

pub mod avl_tree;
pub mod config;
pub mod error;
pub mod traits;
pub mod util;

pub use crate::avl_tree::avl_tree::AvlTree;
pub use crate::avl_tree::traversal::Iter;
pub use crate::config::{AvlTreeConfig, Replacement};
pub use crate::error::AvlTreeError;
pub use crate::traits::{Comparator, FloatOrder, NaturalOrder};
