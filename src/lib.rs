//! This crate exposes a Binary Search Tree (BST) that is built balanced and can
//! be rebuilt balanced on demand, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). With clever construction the
//! height of a BST can be limited to `O(lg N)` where `N` is the number of nodes
//! in the tree. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! ## Rebuilding instead of rotating
//!
//! Self-balancing trees (AVL, red-black) restore balance with a few rotations
//! after every insert and delete. The [`Tree`] here does not. It is built
//! balanced from a sequence by always picking the middle value as the root,
//! lets inserts and deletes skew it, and offers [`Tree::is_balanced`] and
//! [`Tree::rebalance`] to detect that and rebuild the whole thing from its
//! in-order sequence. Simple, `O(n)` per rebuild, and no per-operation cost.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: `debug` when a rebalance
//! rebuilds the tree and `trace` for bulk construction. Install any logger to
//! see them.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod construct;
pub mod error;
pub mod traverse;
pub mod tree;

#[cfg(test)]
mod test;

pub use error::{Error, Result};
pub use tree::{Node, Tree};
