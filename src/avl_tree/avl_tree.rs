use crate::avl_tree::node_arena::NodeArena;
use crate::avl_tree::Slot;
use crate::config::{AvlTreeConfig, Replacement};
use crate::error::AvlTreeError;
use crate::traits::{Comparator, NaturalOrder};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

/// Fixed-capacity AVL tree stored in a dense node arena.
///
/// Elements comparing equal are all kept; a new element goes left of any equal node it meets.
#[derive(Clone)]
pub struct AvlTree<T, C = NaturalOrder> {
    pub(crate) arena: NodeArena<T>,
    pub(crate) root: Option<Slot>,
    comparator: C,
    config: AvlTreeConfig,
}

impl<T> AvlTree<T, NaturalOrder>
where
    T: Ord,
{
    /// Create an empty tree ordered by `T: Ord` holding at most `capacity` elements
    /// # Panics
    /// Panics if `capacity` is 0
    pub fn new(capacity: usize) -> Self {
        Self::with_comparator(capacity, NaturalOrder)
    }
}

impl<T> Default for AvlTree<T, NaturalOrder>
where
    T: Ord,
{
    fn default() -> Self {
        Self::with_config(AvlTreeConfig::default(), NaturalOrder)
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Comparator<T>,
{
    /// Create an empty tree ordered by `comparator`
    /// # Panics
    /// Panics if `capacity` is 0
    pub fn with_comparator(capacity: usize, comparator: C) -> Self {
        Self::with_config(AvlTreeConfig::new(capacity), comparator)
    }

    /// Create an empty tree from a full configuration
    /// # Panics
    /// Panics if `config.capacity` is 0
    pub fn with_config(config: AvlTreeConfig, comparator: C) -> Self {
        assert!(config.capacity > 0, "AVL tree capacity must be positive");
        AvlTree {
            arena: NodeArena::with_capacity(config.capacity),
            root: None,
            comparator,
            config,
        }
    }

    /// Compare `item` to the element stored at `node`
    /// Ordering is item {ord} element[node]
    #[inline]
    fn compare_to(&self, item: &T, node: Slot) -> Ordering {
        self.comparator.compare(item, self.arena.get_element(node))
    }

    /// Add an item to the tree
    /// # Errors
    /// `AvlTreeError::Full` if the tree is at capacity. The item is dropped, use `try_insert`
    /// to get it back.
    pub fn insert(&mut self, item: T) -> Result<(), AvlTreeError> {
        let capacity = self.capacity();
        self.try_insert(item).map_err(|_| AvlTreeError::Full { capacity })
    }

    /// Add an item to the tree, handing it back if the tree is at capacity
    pub fn try_insert(&mut self, item: T) -> Result<(), T> {
        if self.arena.is_full() {
            return Err(item);
        }

        let mut parent = None;
        let mut go_left = false;
        let mut node = self.root;
        while let Some(n) = node {
            parent = Some(n);
            go_left = self.compare_to(&item, n) != Ordering::Greater;
            node = if go_left {
                self.arena.get_left(n)
            } else {
                self.arena.get_right(n)
            };
        }

        let node = self.arena.alloc(item, parent);
        match parent {
            None => self.root = Some(node),
            Some(parent) if go_left => self.arena.set_left(parent, Some(node)),
            Some(parent) => self.arena.set_right(parent, Some(node)),
        }

        self.rebalance(parent);
        Ok(())
    }

    /// Find the slot of a node comparing equal to `item`
    fn find_slot(&self, item: &T) -> Option<Slot> {
        let mut node = self.root;
        while let Some(n) = node {
            match self.compare_to(item, n) {
                Ordering::Less => node = self.arena.get_left(n),
                Ordering::Greater => node = self.arena.get_right(n),
                Ordering::Equal => return Some(n),
            }
        }
        None
    }

    /// Returns true if an element comparing equal to `item` is in the tree
    pub fn contains(&self, item: &T) -> bool {
        self.find_slot(item).is_some()
    }

    /// Find an element comparing equal to `item`
    /// Returns None if not found
    pub fn find(&self, item: &T) -> Option<&T> {
        self.find_slot(item).map(|node| self.arena.get_element(node))
    }

    /// Returns the least element or None if the tree is empty
    pub fn get_min(&self) -> Option<&T> {
        self.root.map(|root| self.arena.get_element(self.first(root)))
    }

    /// Returns the greatest element or None if the tree is empty
    pub fn get_max(&self) -> Option<&T> {
        self.root.map(|root| self.arena.get_element(self.last(root)))
    }

    /// Remove an element comparing equal to `item` and return it
    /// # Errors
    /// `AvlTreeError::Empty` if the tree is empty,
    /// `AvlTreeError::NotFound` if no element compares equal to `item`
    pub fn remove(&mut self, item: &T) -> Result<T, AvlTreeError> {
        if self.is_empty() {
            return Err(AvlTreeError::Empty);
        }
        let node = self.find_slot(item).ok_or(AvlTreeError::NotFound)?;

        let target = match self.replacement_for(node) {
            Some(replacement) => {
                // The replacement is adjacent in order so the element can move without relinking
                self.arena.swap_elements(node, replacement);
                replacement
            }
            None => node,
        };
        Ok(self.excise(target))
    }

    /// Remove and return the least element
    /// # Errors
    /// `AvlTreeError::Empty` if the tree is empty
    pub fn remove_min(&mut self) -> Result<T, AvlTreeError> {
        let root = self.root.ok_or(AvlTreeError::Empty)?;
        let node = self.first(root);
        Ok(self.excise(node))
    }

    /// Remove and return the greatest element
    /// # Errors
    /// `AvlTreeError::Empty` if the tree is empty
    pub fn remove_max(&mut self) -> Result<T, AvlTreeError> {
        let root = self.root.ok_or(AvlTreeError::Empty)?;
        let node = self.last(root);
        Ok(self.excise(node))
    }

    /// Pick the node whose element replaces the element at `node` on removal.
    /// None when `node` is a leaf and can be excised directly.
    fn replacement_for(&self, node: Slot) -> Option<Slot> {
        match (self.arena.get_left(node), self.arena.get_right(node)) {
            (None, None) => None,
            (Some(left), None) => Some(self.last(left)),
            (None, Some(right)) => Some(self.first(right)),
            (Some(left), Some(right)) => match self.config.replacement {
                Replacement::Predecessor => Some(self.last(left)),
                Replacement::Successor => Some(self.first(right)),
                Replacement::DeeperSide => {
                    let (predecessor, left_depth) = self.descend(left, NodeArena::get_right);
                    let (successor, right_depth) = self.descend(right, NodeArena::get_left);
                    if left_depth >= right_depth {
                        Some(predecessor)
                    } else {
                        Some(successor)
                    }
                }
            },
        }
    }

    /// Unlink a node with at most one child, rebalance, and release its slot
    fn excise(&mut self, node: Slot) -> T {
        let left = self.arena.get_left(node);
        let right = self.arena.get_right(node);
        assert!(left.is_none() || right.is_none());
        let child = left.or(right);

        let parent = self.arena.get_parent(node);
        match parent {
            None => {
                assert!(self.root == Some(node));
                self.root = child;
            }
            Some(parent) => {
                if self.arena.get_left(parent) == Some(node) {
                    self.arena.set_left(parent, child);
                } else {
                    assert!(self.arena.get_right(parent) == Some(node));
                    self.arena.set_right(parent, child);
                }
            }
        }
        if let Some(child) = child {
            self.arena.set_parent(child, parent);
        }

        self.arena.set_left(node, None);
        self.arena.set_right(node, None);
        self.arena.set_parent(node, None);

        // Rebalancing never touches the unlinked node, so compaction can follow it
        self.rebalance(parent);
        self.arena.release(node, &mut self.root)
    }

    /// Hand every element to `destroy` and empty the tree. Capacity is kept.
    pub fn clear_with<F>(&mut self, destroy: F)
    where
        F: FnMut(T),
    {
        debug!(len = self.len(), "clearing AVL tree");
        self.arena.clear_with(destroy);
        self.root = None;
    }

    /// Drop every element and empty the tree. Capacity is kept.
    pub fn clear(&mut self) {
        self.clear_with(drop);
    }

    /// Consume the tree, handing every element to `destroy`
    pub fn destroy<F>(mut self, destroy: F)
    where
        F: FnMut(T),
    {
        debug!(len = self.len(), "destroying AVL tree");
        self.arena.clear_with(destroy);
    }

    /// Build an independent tree with the same shape whose elements are produced by `copy`
    pub fn copy_with<F>(&self, copy: F) -> Self
    where
        F: FnMut(&T) -> T,
        C: Clone,
    {
        debug!(len = self.len(), "copying AVL tree");
        AvlTree {
            arena: self.arena.map_elements(copy),
            root: self.root,
            comparator: self.comparator.clone(),
            config: self.config,
        }
    }

    /// Run `manage` over every live element, in storage order rather than sorted order
    pub fn manage<F, R>(&self, manage: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        manage(self.arena.elements())
    }

    /// Check every structural invariant of the tree
    /// # Panics
    /// Panics if the tree is inconsistent
    pub fn assert_invariants(&self) {
        let len = self.len();
        assert!(len <= self.capacity());

        let root = match self.root {
            None => {
                assert_eq!(len, 0, "empty root with live nodes");
                return;
            }
            Some(root) => root,
        };
        assert!(root < len, "root outside the live slots");
        assert_eq!(self.arena.get_parent(root), None, "root has a parent");

        let mut visited = vec![false; len];
        let mut stack = Vec::with_capacity(len);
        stack.push(root);
        while let Some(node) = stack.pop() {
            assert!(node < len, "link to a slot outside the live slots");
            assert!(!visited[node], "slot {} reachable twice", node);
            visited[node] = true;

            let left = self.arena.get_left(node);
            let right = self.arena.get_right(node);
            for child in left.iter().chain(right.iter()) {
                assert_eq!(self.arena.get_parent(*child), Some(node));
                stack.push(*child);
            }

            let left_height = self.arena.get_height(left);
            let right_height = self.arena.get_height(right);
            assert_eq!(
                self.arena.get_height(Some(node)),
                1 + u8::max(left_height, right_height),
                "stale height at slot {}",
                node
            );
            assert!(
                (left_height as i16 - right_height as i16).abs() <= 1,
                "slot {} is out of balance",
                node
            );
        }
        assert!(visited.iter().all(|v| *v), "unreachable live slot");

        let mut node = Some(self.first(root));
        let mut count = 0;
        while let Some(n) = node {
            count += 1;
            node = self.next(n);
            if let Some(next) = node {
                assert!(
                    self.comparator
                        .compare(self.arena.get_element(n), self.arena.get_element(next))
                        != Ordering::Greater,
                    "elements out of order"
                );
            }
        }
        assert_eq!(count, len);
    }
}

impl<T, C> AvlTree<T, C> {
    /// Number of elements in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Maximum number of elements the tree can hold
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.arena.is_full()
    }

    pub fn config(&self) -> &AvlTreeConfig {
        &self.config
    }

    /// Height of the tree, 0 when empty
    pub fn height(&self) -> usize {
        self.arena.get_height(self.root) as usize
    }

    /// Returns the balance of the avl tree node
    fn balance_factor(&self, node: Slot) -> i16 {
        self.arena.get_height(self.arena.get_left(node)) as i16
            - self.arena.get_height(self.arena.get_right(node)) as i16
    }

    /// Fix heights and rebalance from `node` up to the root
    fn rebalance(&mut self, node: Option<Slot>) {
        let mut node = node;
        while let Some(n) = node {
            let parent = self.arena.get_parent(n);

            self.arena.fix_height(n);

            match self.balance_factor(n) {
                -2 => {
                    let right = self.right_child(n);
                    if self.balance_factor(right) == 1 {
                        self.rotate_right(right);
                    }
                    self.rotate_left(n);
                }
                2 => {
                    let left = self.left_child(n);
                    if self.balance_factor(left) == -1 {
                        self.rotate_left(left);
                    }
                    self.rotate_right(n);
                }
                -1..=1 => {}
                balance => {
                    panic!("AVL tree node has balance {}, heights are corrupt", balance);
                }
            }

            node = parent;
        }
    }

    fn left_child(&self, node: Slot) -> Slot {
        match self.arena.get_left(node) {
            Some(left) => left,
            None => panic!("slot {} has no left child", node),
        }
    }

    fn right_child(&self, node: Slot) -> Slot {
        match self.arena.get_right(node) {
            Some(right) => right,
            None => panic!("slot {} has no right child", node),
        }
    }

    /// Point whatever referenced `old` as a child (or the root) at `new`
    fn replace_in_parent(&mut self, parent: Option<Slot>, old: Slot, new: Slot) {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if self.arena.get_left(p) == Some(old) {
                    self.arena.set_left(p, Some(new));
                } else {
                    assert!(self.arena.get_right(p) == Some(old));
                    self.arena.set_right(p, Some(new));
                }
            }
        }
    }

    /// Rotate the subtree under node `n` left
    fn rotate_left(&mut self, n: Slot) {
        trace!(node = n, "rotating left");
        let r = self.right_child(n);
        let lr = self.arena.get_left(r);

        self.arena.set_right(n, lr);
        if let Some(lr) = lr {
            self.arena.set_parent(lr, Some(n));
        }

        let p = self.arena.get_parent(n);
        self.arena.set_parent(r, p);
        self.replace_in_parent(p, n, r);

        self.arena.set_left(r, Some(n));
        self.arena.set_parent(n, Some(r));
        self.arena.fix_height(n);
        self.arena.fix_height(r);
    }

    /// Rotate the subtree under node `n` right
    fn rotate_right(&mut self, n: Slot) {
        trace!(node = n, "rotating right");
        let l = self.left_child(n);
        let rl = self.arena.get_right(l);

        self.arena.set_left(n, rl);
        if let Some(rl) = rl {
            self.arena.set_parent(rl, Some(n));
        }

        let p = self.arena.get_parent(n);
        self.arena.set_parent(l, p);
        self.replace_in_parent(p, n, l);

        self.arena.set_right(l, Some(n));
        self.arena.set_parent(n, Some(l));
        self.arena.fix_height(n);
        self.arena.fix_height(l);
    }
}

impl<T, C> fmt::Debug for AvlTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
