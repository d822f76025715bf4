use crate::avl_tree::avl_tree::AvlTree;
use crate::avl_tree::node_arena::NodeArena;
use crate::avl_tree::Slot;
use std::collections::VecDeque;
use std::iter::FusedIterator;

impl<T, C> AvlTree<T, C> {
    /// Follow `step` from `node` until it runs out.
    /// Returns the node reached and the number of steps taken.
    pub(crate) fn descend(
        &self,
        mut node: Slot,
        step: fn(&NodeArena<T>, Slot) -> Option<Slot>,
    ) -> (Slot, usize) {
        let mut depth = 0;
        while let Some(child) = step(&self.arena, node) {
            node = child;
            depth += 1;
        }
        (node, depth)
    }

    /// Returns the least node under `node`
    pub(crate) fn first(&self, node: Slot) -> Slot {
        self.descend(node, NodeArena::get_left).0
    }

    /// Returns the greatest node under `node`
    pub(crate) fn last(&self, node: Slot) -> Slot {
        self.descend(node, NodeArena::get_right).0
    }

    /// Returns the node following `node` in order or None if `node` is the last
    pub(crate) fn next(&self, mut node: Slot) -> Option<Slot> {
        if let Some(right) = self.arena.get_right(node) {
            return Some(self.first(right));
        }
        let mut parent = self.arena.get_parent(node);
        while let Some(p) = parent {
            if self.arena.get_right(p) != Some(node) {
                break;
            }
            node = p;
            parent = self.arena.get_parent(p);
        }
        parent
    }

    /// Returns the node preceding `node` in order or None if `node` is the first
    pub(crate) fn prev(&self, mut node: Slot) -> Option<Slot> {
        if let Some(left) = self.arena.get_left(node) {
            return Some(self.last(left));
        }
        let mut parent = self.arena.get_parent(node);
        while let Some(p) = parent {
            if self.arena.get_left(p) != Some(node) {
                break;
            }
            node = p;
            parent = self.arena.get_parent(p);
        }
        parent
    }

    /// Visit every element in sorted order until `operate` returns false.
    /// Walks back up through parent links, so no stack is needed.
    /// Returns true if every element was visited.
    pub fn in_order<F>(&self, mut operate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut node = self.root.map(|root| self.first(root));
        while let Some(n) = node {
            if !operate(self.arena.get_element(n)) {
                return false;
            }
            node = self.next(n);
        }
        true
    }

    /// Visit every element parent first, left subtree before right, until `operate` returns false.
    /// Returns true if every element was visited.
    pub fn pre_order<F>(&self, mut operate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut stack = Vec::with_capacity(self.len());
        stack.extend(self.root);
        while let Some(node) = stack.pop() {
            if !operate(self.arena.get_element(node)) {
                return false;
            }
            // Right goes in first so the left subtree comes out first
            stack.extend(self.arena.get_right(node));
            stack.extend(self.arena.get_left(node));
        }
        true
    }

    /// Visit every element children first, left subtree before right, until `operate` returns
    /// false.
    /// Returns true if every element was visited.
    pub fn post_order<F>(&self, mut operate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut stack: Vec<Slot> = Vec::with_capacity(self.len());
        let mut last_visited = None;
        let mut node = self.root;
        loop {
            if let Some(n) = node {
                stack.push(n);
                node = self.arena.get_left(n);
                continue;
            }
            let top = match stack.last() {
                Some(top) => *top,
                None => return true,
            };
            let right = self.arena.get_right(top);
            if right.is_some() && right != last_visited {
                node = right;
            } else {
                if !operate(self.arena.get_element(top)) {
                    return false;
                }
                last_visited = stack.pop();
            }
        }
    }

    /// Visit every element level by level from the root, left to right, until `operate`
    /// returns false.
    /// Returns true if every element was visited.
    pub fn level_order<F>(&self, mut operate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut queue = VecDeque::with_capacity(self.len());
        queue.extend(self.root);
        while let Some(node) = queue.pop_front() {
            if !operate(self.arena.get_element(node)) {
                return false;
            }
            queue.extend(self.arena.get_left(node));
            queue.extend(self.arena.get_right(node));
        }
        true
    }

    /// Iterate over the elements in sorted order
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self)
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        Iter::new(self)
    }
}

/// Sorted iterator over the elements of an `AvlTree`
pub struct Iter<'a, T, C> {
    tree: &'a AvlTree<T, C>,
    front: Option<Slot>,
    back: Option<Slot>,
    remaining: usize,
}

impl<'a, T, C> Iter<'a, T, C> {
    fn new(tree: &'a AvlTree<T, C>) -> Self {
        Iter {
            tree,
            front: tree.root.map(|root| tree.first(root)),
            back: tree.root.map(|root| tree.last(root)),
            remaining: tree.len(),
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        self.front = self.tree.next(node);
        Some(self.tree.arena.get_element(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        self.back = self.tree.prev(node);
        Some(self.tree.arena.get_element(node))
    }
}

impl<'a, T, C> ExactSizeIterator for Iter<'a, T, C> {}

impl<'a, T, C> FusedIterator for Iter<'a, T, C> {}

#[cfg(test)]
mod test {
    use crate::avl_tree::avl_tree::AvlTree;
    use crate::util::gen_uniform_vec;
    use proptest::prelude::*;

    fn scenario_tree() -> AvlTree<i32> {
        let mut tree = AvlTree::new(16);
        for x in [5, 3, 8, 1, 4, 7, 9].iter() {
            tree.insert(*x).unwrap();
        }
        tree
    }

    fn collect<F>(traverse: F) -> (Vec<i32>, bool)
    where
        F: FnOnce(&mut dyn FnMut(&i32) -> bool) -> bool,
    {
        let mut visited = Vec::new();
        let completed = traverse(&mut |x: &i32| {
            visited.push(*x);
            true
        });
        (visited, completed)
    }

    #[test]
    fn orders_of_scenario_tree() {
        let tree = scenario_tree();
        assert_eq!(
            collect(|f| tree.in_order(f)),
            (vec![1, 3, 4, 5, 7, 8, 9], true)
        );
        assert_eq!(
            collect(|f| tree.pre_order(f)),
            (vec![5, 3, 1, 4, 8, 7, 9], true)
        );
        assert_eq!(
            collect(|f| tree.post_order(f)),
            (vec![1, 4, 3, 7, 9, 8, 5], true)
        );
        assert_eq!(
            collect(|f| tree.level_order(f)),
            (vec![5, 3, 8, 1, 4, 7, 9], true)
        );
    }

    #[test]
    fn empty_tree_traversals() {
        let tree: AvlTree<i32> = AvlTree::new(4);
        assert_eq!(collect(|f| tree.in_order(f)), (vec![], true));
        assert_eq!(collect(|f| tree.pre_order(f)), (vec![], true));
        assert_eq!(collect(|f| tree.post_order(f)), (vec![], true));
        assert_eq!(collect(|f| tree.level_order(f)), (vec![], true));
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn traversal_stops_early() {
        let tree = scenario_tree();
        let mut seen = Vec::new();
        let completed = tree.level_order(|x| {
            seen.push(*x);
            seen.len() < 3
        });
        assert!(!completed);
        assert_eq!(seen, vec![5, 3, 8]);

        let mut count = 0;
        assert!(!tree.post_order(|x| {
            count += 1;
            *x != 3
        }));
        assert_eq!(count, 3);

        let mut count = 0;
        assert!(!tree.in_order(|x| {
            count += 1;
            *x < 5
        }));
        assert_eq!(count, 4);

        assert!(!tree.pre_order(|_| false));
    }

    /// Summary of a tree using only what needs no comparator
    fn shape<T, C>(tree: &AvlTree<T, C>) -> (usize, usize, usize, bool) {
        let mut visits = 0;
        tree.pre_order(|_| {
            visits += 1;
            true
        });
        tree.post_order(|_| {
            visits += 1;
            true
        });
        tree.level_order(|_| {
            visits += 1;
            true
        });
        (tree.len(), tree.height(), visits + tree.iter().count(), tree.is_empty())
    }

    #[test]
    fn traversals_need_no_comparator() {
        let mut tree = AvlTree::with_comparator(8, |a: &i32, b: &i32| b.cmp(a));
        assert_eq!(shape(&tree), (0, 0, 0, true));
        for x in [4, 2, 6, 1].iter() {
            tree.insert(*x).unwrap();
        }
        assert_eq!(shape(&tree), (4, 3, 16, false));
        assert!(!tree.is_full());
        assert_eq!(tree.capacity(), tree.config().capacity);
    }

    #[test]
    fn iterator_both_ends() {
        let tree = scenario_tree();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&9));
        assert_eq!(iter.next_back(), Some(&8));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.collect::<Vec<_>>(), vec![&3, &4, &5, &7]);
        assert_eq!(
            tree.iter().rev().copied().collect::<Vec<_>>(),
            vec![9, 8, 7, 5, 4, 3, 1]
        );

        let mut total = 0;
        for x in &tree {
            total += x;
        }
        assert_eq!(total, 37);
    }

    #[test]
    fn traversals_after_removals() {
        let mut tree = AvlTree::new(256);
        let items = gen_uniform_vec(256);
        for item in &items {
            tree.insert(*item).unwrap();
        }
        for item in items.iter().step_by(3) {
            tree.remove(item).unwrap();
        }
        let mut expected: Vec<i64> = items
            .iter()
            .enumerate()
            .filter(|(ix, _)| ix % 3 != 0)
            .map(|(_, x)| *x)
            .collect();
        expected.sort();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
    }

    proptest! {
        #[test]
        fn every_order_visits_each_element_once(
            items in prop::collection::vec(0..1000u16, 0..200)
        ) {
            let mut tree = AvlTree::new(200);
            for item in &items {
                tree.insert(*item).unwrap();
            }
            let mut sorted = items.clone();
            sorted.sort();

            let mut in_order = Vec::new();
            let completed = tree.in_order(|x| {
                in_order.push(*x);
                true
            });
            prop_assert!(completed);
            prop_assert_eq!(&in_order, &sorted);

            let mut pre_order = Vec::new();
            let completed = tree.pre_order(|x| {
                pre_order.push(*x);
                true
            });
            prop_assert!(completed);
            let mut post_order = Vec::new();
            let completed = tree.post_order(|x| {
                post_order.push(*x);
                true
            });
            prop_assert!(completed);
            let mut level_order = Vec::new();
            let completed = tree.level_order(|x| {
                level_order.push(*x);
                true
            });
            prop_assert!(completed);

            if let Some(root) = tree.root {
                let root = *tree.arena.get_element(root);
                prop_assert_eq!(pre_order.first(), Some(&root));
                prop_assert_eq!(post_order.last(), Some(&root));
                prop_assert_eq!(level_order.first(), Some(&root));
            }

            for order in [pre_order, post_order, level_order].iter_mut() {
                order.sort();
                prop_assert_eq!(&*order, &sorted);
            }
        }
    }
}
