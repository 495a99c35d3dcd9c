//! This crate exposes a self-balancing Binary Search Tree (an AVL tree)
//! for ordered insertion, deletion, and lookup.
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
//! Searching for values in the tree takes `O(height)` (where `height` is defined
//! as the longest path from the root `Node` to a leaf `Node`).
//!
//! ## AVL Tree
//!
//! An AVL tree additionally keeps, for every `Node`, the heights of its two subtrees within
//! one of each other. The difference `height(left) - height(right)` is the node's
//! "balance factor". Whenever an insertion or deletion pushes a balance factor to `2` or `-2`,
//! the tree restores it with one or two constant-time "rotations" on the way back up from the
//! modified position. This bounds the height by roughly `1.44 * lg(N + 2)` so every
//! single-value operation is `O(lg N)`.
//!
//! ```
//! use balanced_bst::avl::Tree;
//!
//! let tree: Tree<_> = [30, 20, 10].into_iter().collect();
//!
//! // Inserting in descending order triggered a right rotation.
//! assert_eq!(tree.preorder(), vec![&20, &10, &30]);
//! assert!(tree.is_valid());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod error;

#[cfg(test)]
mod test;
