//! The ways of walking a [`Tree`].
//!
//! Every order comes in two shapes. The callback methods on [`Tree`] (`pre_order`, `in_order`,
//! ...) call a visitor once per value, recursing down the tree. The `iter_*` methods instead
//! return a lazy iterator backed by an explicit stack or queue, so they work on arbitrarily
//! deep trees and can be restarted by just calling the method again.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::Tree;
//!
//! let tree = Tree::from_sorted(vec![1, 2, 3, 4, 5]);
//!
//! let mut visited = Vec::new();
//! tree.pre_order(|value| visited.push(*value));
//! assert_eq!(visited, vec![3, 1, 2, 4, 5]);
//!
//! assert!(tree.iter_pre_order().eq(visited.iter()));
//! assert_eq!(tree.iter_level_order().copied().collect::<Vec<_>>(), vec![3, 1, 4, 2, 5]);
//! ```

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::tree::{deallocate_iteratively, Link, Node, Tree};

impl<T> Tree<T> {
    /// Calls `visit` on each node's value, then on its left subtree, then on its right subtree.
    pub fn pre_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        if let Some(root) = self.root() {
            root.pre_order(&mut visit);
        }
    }

    /// Calls `visit` on the left subtree, then the node's value, then the right subtree. Values
    /// are visited in ascending order.
    pub fn in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        if let Some(root) = self.root() {
            root.in_order(&mut visit);
        }
    }

    /// Calls `visit` on both subtrees before the node's own value.
    pub fn post_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        if let Some(root) = self.root() {
            root.post_order(&mut visit);
        }
    }

    /// Calls `visit` breadth first, top level to bottom, each level left to right.
    pub fn level_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for value in self.iter_level_order() {
            visit(value);
        }
    }

    /// Same contract as [`Tree::level_order`] but without a queue: for every level it walks
    /// down from the root again, visiting only the nodes at exactly that depth. This costs
    /// `O(n * height)` instead of `O(n)`.
    pub fn level_order_recursive<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        let Some(root) = self.root() else {
            return;
        };
        for level in 1..=self.height() {
            root.visit_level(level, &mut visit);
        }
    }

    /// Ascending iterator over the values. Same as [`Tree::iter_in_order`].
    pub fn iter(&self) -> InOrder<'_, T> {
        self.iter_in_order()
    }

    /// Lazy pre-order iterator.
    pub fn iter_pre_order(&self) -> PreOrder<'_, T> {
        PreOrder {
            stack: self.root().into_iter().collect(),
            remaining: self.len(),
        }
    }

    /// Lazy in-order (ascending) iterator.
    pub fn iter_in_order(&self) -> InOrder<'_, T> {
        let mut iter = InOrder {
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root());
        iter
    }

    /// Lazy post-order iterator.
    pub fn iter_post_order(&self) -> PostOrder<'_, T> {
        PostOrder {
            stack: self.root().map(|root| (root, false)).into_iter().collect(),
            remaining: self.len(),
        }
    }

    /// Lazy level-order iterator backed by a FIFO queue seeded with the root.
    pub fn iter_level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder {
            queue: self.root().into_iter().collect(),
            remaining: self.len(),
        }
    }
}

impl<T> Node<T> {
    fn pre_order<F: FnMut(&T)>(&self, visit: &mut F) {
        visit(&self.value);
        if let Some(left) = self.left() {
            left.pre_order(visit);
        }
        if let Some(right) = self.right() {
            right.pre_order(visit);
        }
    }

    fn in_order<F: FnMut(&T)>(&self, visit: &mut F) {
        if let Some(left) = self.left() {
            left.in_order(visit);
        }
        visit(&self.value);
        if let Some(right) = self.right() {
            right.in_order(visit);
        }
    }

    fn post_order<F: FnMut(&T)>(&self, visit: &mut F) {
        if let Some(left) = self.left() {
            left.post_order(visit);
        }
        if let Some(right) = self.right() {
            right.post_order(visit);
        }
        visit(&self.value);
    }

    /// Visits the nodes `level - 1` steps below this one. Level 1 is this node.
    fn visit_level<F: FnMut(&T)>(&self, level: usize, visit: &mut F) {
        if level == 1 {
            visit(&self.value);
            return;
        }
        for child in [self.left(), self.right()].into_iter().flatten() {
            child.visit_level(level - 1, visit);
        }
    }
}

/// Pre-order iterator returned by [`Tree::iter_pre_order`].
#[derive(Debug, Clone)]
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so that left comes off first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// In-order iterator returned by [`Tree::iter_in_order`] and [`Tree::iter`].
#[derive(Debug, Clone)]
pub struct InOrder<'a, T> {
    // Every node on the stack has had its left subtree pushed (or visited) already.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Post-order iterator returned by [`Tree::iter_post_order`].
#[derive(Debug, Clone)]
pub struct PostOrder<'a, T> {
    /// Nodes paired with whether their children have been pushed yet.
    stack: Vec<(&'a Node<T>, bool)>,
    remaining: usize,
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some(&node.value);
            }
            self.stack.push((node, true));
            self.stack.extend(node.right().map(|right| (right, false)));
            self.stack.extend(node.left().map(|left| (left, false)));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Level-order iterator returned by [`Tree::iter_level_order`].
#[derive(Debug, Clone)]
pub struct LevelOrder<'a, T> {
    queue: VecDeque<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Owning in-order iterator returned by `Tree::into_iter`.
#[derive(Debug)]
pub struct IntoIter<T> {
    // Same shape as `InOrder` except that nodes are owned and their left links have been taken.
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for mut node in self.stack.drain(..) {
            deallocate_iteratively(node.right.take());
        }
    }
}

impl<'a, T> ExactSizeIterator for PreOrder<'a, T> {}
impl<'a, T> ExactSizeIterator for InOrder<'a, T> {}
impl<'a, T> ExactSizeIterator for PostOrder<'a, T> {}
impl<'a, T> ExactSizeIterator for LevelOrder<'a, T> {}
impl<T> ExactSizeIterator for IntoIter<T> {}

impl<'a, T> FusedIterator for PreOrder<'a, T> {}
impl<'a, T> FusedIterator for InOrder<'a, T> {}
impl<'a, T> FusedIterator for PostOrder<'a, T> {}
impl<'a, T> FusedIterator for LevelOrder<'a, T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_in_order()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the tree, yielding its values in ascending order.
    fn into_iter(mut self) -> Self::IntoIter {
        let remaining = self.len();
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining,
        };
        iter.push_left_spine(self.take_root());
        iter
    }
}
