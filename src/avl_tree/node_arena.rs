use crate::avl_tree::Slot;
use tracing::trace;

/// Dense storage for tree nodes.
///
/// Every node is a slot index into parallel arrays. Live nodes occupy exactly `0..len()`:
/// new nodes are appended and a released slot is filled by moving the last node into it.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<T> {
    capacity: usize,
    elements: Vec<T>,
    parent: Vec<Option<Slot>>,
    left: Vec<Option<Slot>>,
    right: Vec<Option<Slot>>,
    height: Vec<u8>,
}

impl<T> NodeArena<T> {
    /// Allocate all arrays up front for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            capacity,
            elements: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            left: Vec::with_capacity(capacity),
            right: Vec::with_capacity(capacity),
            height: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Live elements in slot order
    #[inline]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    #[inline]
    pub fn get_element(&self, node: Slot) -> &T {
        &self.elements[node]
    }

    /// Exchange the elements of two slots, leaving the links in place
    #[inline]
    pub fn swap_elements(&mut self, node1: Slot, node2: Slot) {
        self.elements.swap(node1, node2);
    }

    /// Return the parent of the node
    #[inline]
    pub fn get_parent(&self, node: Slot) -> Option<Slot> {
        self.parent[node]
    }

    /// Set the parent of the node
    #[inline]
    pub fn set_parent(&mut self, node: Slot, item: Option<Slot>) {
        self.parent[node] = item;
    }

    /// Return the left child of the node
    #[inline]
    pub fn get_left(&self, node: Slot) -> Option<Slot> {
        self.left[node]
    }

    /// Set the left child of the node
    #[inline]
    pub fn set_left(&mut self, node: Slot, item: Option<Slot>) {
        self.left[node] = item;
    }

    /// Return the right child of the node
    #[inline]
    pub fn get_right(&self, node: Slot) -> Option<Slot> {
        self.right[node]
    }

    /// Set the right child of the node
    #[inline]
    pub fn set_right(&mut self, node: Slot, item: Option<Slot>) {
        self.right[node] = item;
    }

    /// Return the height of the subtree under `node`, 0 for no node
    #[inline]
    pub fn get_height(&self, node: Option<Slot>) -> u8 {
        node.map_or(0, |node| self.height[node])
    }

    /// Recompute the height of `node` from its children
    #[inline]
    pub fn fix_height(&mut self, node: Slot) {
        let left_height = self.get_height(self.left[node]);
        let right_height = self.get_height(self.right[node]);
        self.height[node] = 1 + u8::max(left_height, right_height);
    }

    /// Store `item` in the next free slot as a leaf under `parent`
    /// # Panics
    /// Panics if the arena is full
    pub fn alloc(&mut self, item: T, parent: Option<Slot>) -> Slot {
        assert!(!self.is_full(), "node arena is full");
        let node = self.len();
        self.elements.push(item);
        self.parent.push(parent);
        self.left.push(None);
        self.right.push(None);
        self.height.push(1);
        node
    }

    /// Release a slot that has already been unlinked from the tree and return its element.
    ///
    /// The last slot is moved into the hole and its parent and children are repointed at the
    /// hole. `root` is updated if the moved node was the root. Any slot index held across this
    /// call is invalidated.
    pub fn release(&mut self, hole: Slot, root: &mut Option<Slot>) -> T {
        assert!(hole < self.len());
        debug_assert!(self.parent[hole].is_none());
        debug_assert!(self.left[hole].is_none() && self.right[hole].is_none());
        debug_assert!(*root != Some(hole));

        let last = self.len() - 1;
        if hole != last {
            trace!(from = last, to = hole, "compacting node arena");
            match self.parent[last] {
                Some(parent) => {
                    if self.left[parent] == Some(last) {
                        self.left[parent] = Some(hole);
                    } else {
                        assert!(self.right[parent] == Some(last));
                        self.right[parent] = Some(hole);
                    }
                }
                None => {
                    assert!(*root == Some(last));
                    *root = Some(hole);
                }
            }
            if let Some(left) = self.left[last] {
                self.parent[left] = Some(hole);
            }
            if let Some(right) = self.right[last] {
                self.parent[right] = Some(hole);
            }
        }

        self.parent.swap_remove(hole);
        self.left.swap_remove(hole);
        self.right.swap_remove(hole);
        self.height.swap_remove(hole);
        self.elements.swap_remove(hole)
    }

    /// Hand every element to `destroy` in slot order and empty the arena.
    /// The allocated capacity is kept.
    pub fn clear_with<F>(&mut self, destroy: F)
    where
        F: FnMut(T),
    {
        self.parent.clear();
        self.left.clear();
        self.right.clear();
        self.height.clear();
        self.elements.drain(..).for_each(destroy);
    }

    /// Build an arena with the same layout whose elements are produced by `copy`
    pub fn map_elements<F>(&self, copy: F) -> Self
    where
        F: FnMut(&T) -> T,
    {
        let mut elements = Vec::with_capacity(self.capacity);
        elements.extend(self.elements.iter().map(copy));

        let mut parent = Vec::with_capacity(self.capacity);
        parent.extend_from_slice(&self.parent);
        let mut left = Vec::with_capacity(self.capacity);
        left.extend_from_slice(&self.left);
        let mut right = Vec::with_capacity(self.capacity);
        right.extend_from_slice(&self.right);
        let mut height = Vec::with_capacity(self.capacity);
        height.extend_from_slice(&self.height);

        NodeArena {
            capacity: self.capacity,
            elements,
            parent,
            left,
            right,
            height,
        }
    }
}
