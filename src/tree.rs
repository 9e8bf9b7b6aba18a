//! A binary search tree that is built balanced and can rebuild itself balanced on demand.
//!
//! Unlike a self-balancing AVL tree, inserts and deletes here never restructure the tree. The
//! tree starts out height-balanced when it is built from a sequence, may drift out of balance as
//! it is mutated, and is put back into shape by an explicit, full [`Tree::rebalance`].
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::Tree;
//!
//! let mut tree = Tree::from_unsorted(vec![5, 3, 8, 3, 1]);
//!
//! // Duplicates are dropped and values come back out in order.
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
//! assert_eq!(tree.height(), 3);
//! assert!(tree.is_balanced());
//!
//! // Lean on the right side until the tree tips over.
//! for value in 100..110 {
//!     tree.insert(value);
//! }
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.len(), 14);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr;

use log::debug;

use crate::construct;
use crate::error::{Error, Result};

/// An owned, possibly empty, subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree of unique values.
///
/// The tree exclusively owns every [`Node`] in it. Callers can look at nodes through
/// [`Tree::find`] and [`Tree::root`] but never hold on to them across a mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

/// A single value in a [`Tree`] along with its (possibly empty) children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        deallocate_iteratively(self.root.take());
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Generates a `Tree` holding just `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::with_root(33);
    /// assert_eq!(tree.root_value(), Some(&33));
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn with_root(value: T) -> Self {
        Self {
            root: Some(Node::new_boxed(value)),
            len: 1,
        }
    }

    fn from_parts(root: Link<T>, len: usize) -> Self {
        Self { root, len }
    }

    /// How many values are stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// The value stored at the root, if the tree isn't empty.
    pub fn root_value(&self) -> Option<&T> {
        self.root().map(Node::value)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        deallocate_iteratively(self.root.take());
        self.len = 0;
    }

    /// The number of levels in the tree. An empty tree has height 0 and a tree with only a root
    /// has height 1.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// The number of edges between the root and `target`, or `None` if `target` is not a node of
    /// this tree.
    ///
    /// Nodes are matched by identity, not by value: `target` has to be a reference obtained from
    /// this tree (e.g. via [`Tree::find`]). A node from another tree holding an equal value is
    /// not found.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_sorted(vec![1, 2, 3]);
    /// let other = Tree::from_sorted(vec![1, 2, 3]);
    ///
    /// let three = tree.find(&3).unwrap();
    /// assert_eq!(tree.depth(three), Some(1));
    ///
    /// let other_three = other.find(&3).unwrap();
    /// assert_eq!(tree.depth(other_three), None);
    /// ```
    pub fn depth(&self, target: &Node<T>) -> Option<usize> {
        depth(&self.root, target)
    }

    /// Whether, for every node, the heights of its two subtrees differ by at most one.
    pub fn is_balanced(&self) -> bool {
        balanced_height(&self.root).is_some()
    }

    /// Rebuilds the tree into a height-balanced shape if it isn't balanced already. The values
    /// (and so the in-order sequence) are unchanged.
    ///
    /// This is a full `O(n)` rebuild: all values are drained in order and fed back through the
    /// same builder used by [`Tree::from_sorted`].
    pub fn rebalance(&mut self) {
        if self.is_balanced() {
            return;
        }

        let old_height = self.height();
        let len = self.len;
        // The in-order sequence of a BST is already sorted and unique so no dedup is needed.
        let values: Vec<T> = mem::take(self).into_iter().collect();
        *self = Self::from_parts(construct::build_balanced(values), len);

        debug!(
            "rebalanced {} node(s): height {} -> {}",
            len,
            old_height,
            self.height()
        );
    }

    /// Moves the root out, leaving the tree empty. The caller takes over the node count.
    pub(crate) fn take_root(&mut self) -> Link<T> {
        self.len = 0;
        self.root.take()
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Builds a height-balanced tree from values that are already in ascending order. Duplicate
    /// values are dropped (the first one is kept).
    ///
    /// The ordering is trusted, not checked: unsorted input produces a tree that breaks the
    /// search order. Use [`Tree::try_from_sorted`] to have it checked or [`Tree::from_unsorted`]
    /// to have it sorted.
    pub fn from_sorted<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values = construct::dedup(values.into_iter().collect());
        let len = values.len();
        Self::from_parts(construct::build_balanced(values), len)
    }

    /// Like [`Tree::from_sorted`] but returns [`Error::Unsorted`] if some value is smaller than
    /// the one before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::{Error, Tree};
    ///
    /// assert!(Tree::try_from_sorted(vec![1, 1, 2]).is_ok());
    /// assert_eq!(
    ///     Tree::try_from_sorted(vec![1, 3, 2]).unwrap_err(),
    ///     Error::Unsorted { index: 2 },
    /// );
    /// ```
    pub fn try_from_sorted<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        match construct::first_unsorted(&values) {
            Some(index) => Err(Error::Unsorted { index }),
            None => Ok(Self::from_sorted(values)),
        }
    }

    /// Builds a height-balanced tree from values in any order. The values are sorted and
    /// deduplicated first.
    pub fn from_unsorted<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort();
        Self::from_sorted(values)
    }

    /// Finds the node holding `value`. The node stays owned by the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_sorted(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&2).map(|n| *n.value()), Some(2));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        let mut node = self.root();
        while let Some(n) = node {
            node = match value.cmp(&n.value) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n),
                Ordering::Greater => n.right(),
            };
        }
        None
    }

    /// Whether the tree holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Inserts `value` as a new leaf. Returns `false`, leaving the tree untouched, if the value
    /// is already present.
    ///
    /// Inserting never rebalances the tree.
    pub fn insert(&mut self, value: T) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return false,
                Ordering::Greater => &mut node.right,
            };
        }

        *link = Some(Node::new_boxed(value));
        self.len += 1;
        true
    }

    /// Deletes `value` from the tree and returns it. If the tree does not contain it, nothing
    /// happens.
    ///
    /// A node with two children is not unlinked itself: its in-order successor (the smallest
    /// value in its right subtree) is removed instead and moved into its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree = Tree::from_sorted(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert_eq!(tree.root_value(), Some(&3));
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        // Walk down to the link that owns the node holding `value`.
        let mut link = &mut self.root;
        loop {
            let ordering = match link.as_deref() {
                Some(node) => value.cmp(&node.value),
                None => return None,
            };
            if ordering == Ordering::Equal {
                break;
            }
            link = match link {
                Some(node) => {
                    if ordering == Ordering::Less {
                        &mut node.left
                    } else {
                        &mut node.right
                    }
                }
                None => return None,
            };
        }

        // Whatever replaces the deleted node becomes the new occupant of its parent's link.
        let (replacement, deleted) = match link.take() {
            Some(node) => unlink(node),
            None => return None,
        };
        *link = replacement;
        self.len -= 1;
        Some(deleted)
    }
}

impl<T> Tree<T>
where
    T: fmt::Display,
{
    /// Writes the [`Display`][fmt::Display] rendering of the tree to stdout.
    pub fn pretty_print(&self) {
        print!("{}", self);
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_unsorted(iter)
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Draws the tree rotated a quarter turn counter-clockwise: the right subtree is above its
/// parent and the left subtree below.
///
/// ```text
/// │       ┌── 8
/// │   ┌── 5
/// └── 3
///     └── 1
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.fmt_rotated(f, "", true),
            None => Ok(()),
        }
    }
}

impl<T> Node<T> {
    /// Creates a childless node that is not part of any tree.
    ///
    /// Trees only ever hand out references to their own nodes, so a node made here is never
    /// found by [`Tree::depth`], even if some tree holds an equal value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::{Node, Tree};
    ///
    /// let tree = Tree::with_root(1);
    /// assert_eq!(tree.depth(&Node::new(1)), None);
    /// ```
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self::new(value))
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of the left subtree.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn fmt_rotated(&self, f: &mut fmt::Formatter<'_>, prefix: &str, is_left: bool) -> fmt::Result
    where
        T: fmt::Display,
    {
        if let Some(right) = self.right() {
            let prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
            right.fmt_rotated(f, &prefix, false)?;
        }

        writeln!(
            f,
            "{}{}{}",
            prefix,
            if is_left { "└── " } else { "┌── " },
            self.value
        )?;

        if let Some(left) = self.left() {
            let prefix = format!("{}{}", prefix, if is_left { "    " } else { "│   " });
            left.fmt_rotated(f, &prefix, true)?;
        }
        Ok(())
    }
}

fn height<T>(link: &Link<T>) -> usize {
    let mut stack: Vec<(&Node<T>, usize)> =
        link.as_deref().map(|n| (n, 1)).into_iter().collect();
    let mut height = 0;
    while let Some((node, level)) = stack.pop() {
        height = height.max(level);
        stack.extend(node.left().map(|n| (n, level + 1)));
        stack.extend(node.right().map(|n| (n, level + 1)));
    }
    height
}

fn depth<T>(link: &Link<T>, target: &Node<T>) -> Option<usize> {
    let mut stack: Vec<(&Node<T>, usize)> =
        link.as_deref().map(|n| (n, 0)).into_iter().collect();
    while let Some((node, depth)) = stack.pop() {
        if ptr::eq(node, target) {
            return Some(depth);
        }
        stack.extend(node.left().map(|n| (n, depth + 1)));
        stack.extend(node.right().map(|n| (n, depth + 1)));
    }
    None
}

/// Returns the height of the subtree if it is balanced and `None` otherwise. Checking both in
/// one bottom-up pass avoids recomputing the height of every subtree at every ancestor, and the
/// walk stops at the first unbalanced node without finishing the heights above it.
fn balanced_height<T>(link: &Link<T>) -> Option<usize> {
    // Post-order walk. Nodes are paired with whether their children are finished; finished
    // subtrees leave their height on `heights`, a right child's above its left sibling's.
    let mut pending: Vec<(&Node<T>, bool)> =
        link.as_deref().map(|n| (n, false)).into_iter().collect();
    let mut heights: Vec<usize> = Vec::new();

    while let Some((node, children_done)) = pending.pop() {
        if !children_done {
            pending.push((node, true));
            pending.extend(node.right().map(|n| (n, false)));
            pending.extend(node.left().map(|n| (n, false)));
            continue;
        }

        let right = node.right.as_ref().map_or(0, |_| heights.pop().unwrap_or(0));
        let left = node.left.as_ref().map_or(0, |_| heights.pop().unwrap_or(0));
        if left.abs_diff(right) > 1 {
            return None;
        }
        heights.push(left.max(right) + 1);
    }

    Some(heights.pop().unwrap_or(0))
}

/// Removes `node` from the tree it was linked into. Returns the subtree that has to take its
/// place in the parent's link, along with the removed value.
fn unlink<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match (node.left.take(), node.right.take()) {
        (None, right) => (right, node.value),
        (left, None) => (left, node.value),

        // With two children we promote the in-order successor, i.e. the smallest value in
        // the right subtree. It has no left child so unlinking it is one of the easy cases.
        (Some(left), Some(right)) => {
            let (new_right, successor) = delete_smallest(right);
            let deleted = mem::replace(&mut node.value, successor);
            node.left = Some(left);
            node.right = new_right;
            (Some(node), deleted)
        }
    }
}

/// Unlinks the smallest node of the subtree by following `left` links. Returns the new root of
/// the subtree and the smallest value.
fn delete_smallest<T>(root: Box<Node<T>>) -> (Link<T>, T) {
    let mut subtree = Some(root);
    let mut link = &mut subtree;
    while link.as_ref().map_or(false, |n| n.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }

    let smallest = match link.take() {
        Some(smallest) => *smallest,
        None => unreachable!("smallest node searched for in an empty subtree"),
    };
    *link = smallest.right;
    (subtree, smallest.value)
}

/// Drops a subtree using an explicit stack. The derived drop glue for `Box<Node>` recurses once
/// per level which overflows the stack on long, skewed trees.
pub(crate) fn deallocate_iteratively<T>(link: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a set.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same values in both.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
    where
        K: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    assert_eq!(bst.insert(k.clone()), set.insert(k.clone()));
                }
                Op::Delete(k) => {
                    assert_eq!(bst.delete(k), set.take(k));
                }
                Op::Rebalance => {
                    bst.rebalance();
                    assert!(bst.is_balanced());
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
            assert_eq!(bst.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|value| tree.contains(value))
                && tree.iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn built_trees_are_balanced(xs: Vec<i16>) -> bool {
            let tree = Tree::from_unsorted(xs);
            tree.is_balanced() && tree.iter().zip(tree.iter().skip(1)).all(|(a, b)| a < b)
        }
    }
}
