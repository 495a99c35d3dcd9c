//! A self-balancing BST (specifically, an AVL tree) that owns its nodes through `Box`es. Every
//! mutation recurses down to the affected position and rebalances each subtree on the way back
//! up, so no node ever needs a pointer to its parent.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::avl::Tree;
//! use balanced_bst::error::TreeError;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//! assert_eq!(tree.find_min(), Err(TreeError::EmptyTree));
//!
//! assert!(tree.insert(1));
//! assert!(tree.search(&1));
//!
//! // Inserting the same value again leaves the tree alone.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing a missing value is not an error either.
//! assert!(!tree.remove(&42));
//! assert!(tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::{Result, TreeError};

/// A self-balancing Binary Search Tree of unique values. This can be used for inserting,
/// searching, and removing values in `O(lg N)` time.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copying a tree copies every node, so the copy shares nothing with the original and has the
/// exact same shape.
impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root.node())
            .finish()
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
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

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// Inserts the value into the tree. Returns `true` if the value was added and `false` if an
    /// equal value was already stored, in which case the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let inserted = self.root.insert(value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes the value from the tree. Returns `false` if the tree didn't contain it (including
    /// when the tree is empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree: Tree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert!(!tree.remove(&999));
    /// assert!(tree.remove(&20));
    /// assert!(!tree.search(&20));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        self.take(value).is_some()
    }

    /// Removes the value from the tree and hands back the stored copy, if there was one.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(String::from("a"));
    ///
    /// assert_eq!(tree.take(&String::from("a")), Some(String::from("a")));
    /// assert_eq!(tree.take(&String::from("a")), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let removed = self.root.remove(value);
        match removed {
            Some(_) => self.len -= 1,
            None => debug!("remove missed in a tree of {} values", self.len),
        }
        removed
    }

    /// Returns whether an equal value is stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.search(&1));
    /// assert!(!tree.search(&42));
    /// ```
    pub fn search(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.root.node().is_some_and(|n| n.search(value))
    }

    /// Returns the smallest value in the tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if there are no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    /// use balanced_bst::error::TreeError;
    ///
    /// let mut tree = Tree::<i32>::new();
    /// assert_eq!(tree.find_min(), Err(TreeError::EmptyTree));
    ///
    /// tree.extend([10, 20, 5]);
    /// assert_eq!(tree.find_min(), Ok(&5));
    /// ```
    pub fn find_min(&self) -> Result<&T> {
        let mut node = self.root.node().ok_or(TreeError::EmptyTree)?;
        while let Some(left) = node.left.node() {
            node = left;
        }
        Ok(&node.value)
    }

    /// Returns the largest value in the tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if there are no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    /// use balanced_bst::error::TreeError;
    ///
    /// let mut tree = Tree::<i32>::new();
    /// assert_eq!(tree.find_max(), Err(TreeError::EmptyTree));
    ///
    /// tree.extend([10, 20, 5]);
    /// assert_eq!(tree.find_max(), Ok(&20));
    /// ```
    pub fn find_max(&self) -> Result<&T> {
        let mut node = self.root.node().ok_or(TreeError::EmptyTree)?;
        while let Some(right) = node.right.node() {
            node = right;
        }
        Ok(&node.value)
    }

    /// Checks the AVL and BST invariants of every node: the balance factor is within `-1..=1`,
    /// the stored height matches the children, and values are strictly increasing from left to
    /// right. The tree maintains these itself so this only exists for diagnostics and tests.
    pub fn is_valid(&self) -> bool
    where
        T: Ord,
    {
        self.root.check(None, None).is_some()
    }

    /// Returns whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns how many levels the tree has. An empty tree has a height of 0 and a single node
    /// has a height of 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Returns the balance factor (left subtree height minus right subtree height) of the node
    /// holding the value, or `None` if the value isn't in the tree.
    pub fn balance_factor(&self, value: &T) -> Option<isize>
    where
        T: Ord,
    {
        self.root
            .node()
            .and_then(|n| n.find_node(value))
            .map(Node::balance_factor)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        debug!("clearing {} values", self.len);
        self.root = Link(None);
        self.len = 0;
    }

    /// Returns the values in pre-order: each node before its left subtree, then its right
    /// subtree.
    pub fn preorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.root.preorder(&mut out);
        out
    }

    /// Returns the values in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.inorder(), vec![&1, &2, &3]);
    /// ```
    pub fn inorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.root.inorder(&mut out);
        out
    }

    /// Returns the values in post-order: both subtrees of a node before the node itself.
    pub fn postorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.root.postorder(&mut out);
        out
    }

    /// Returns the values level by level, from the root down and left to right within a level.
    pub fn breadth_first(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut queue: VecDeque<&Node<T>> = self.root.node().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            out.push(&node.value);
            queue.extend(node.left.node());
            queue.extend(node.right.node());
        }
        out
    }
}

/// The owning edge to a (possibly empty) subtree. Rebalancing works on the `Link` rather than
/// the `Node` because a rotation replaces the node sitting in this slot.
#[derive(Clone)]
struct Link<T>(Option<Box<Node<T>>>);

impl<T> Link<T> {
    fn node(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    fn node_mut(&mut self) -> Option<&mut Node<T>> {
        self.0.as_deref_mut()
    }

    fn take(&mut self) -> Self {
        Self(self.0.take())
    }

    fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height)
    }

    fn balance_factor(&self) -> isize {
        self.node().map_or(0, Node::balance_factor)
    }

    fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let Some(node) = self.node_mut() else {
            self.0 = Some(Node::new_boxed(value));
            return true;
        };

        let inserted = match value.cmp(&node.value) {
            Ordering::Less => node.left.insert(value),
            Ordering::Equal => false,
            Ordering::Greater => node.right.insert(value),
        };

        if inserted {
            self.balance();
        }

        if cfg!(debug_assertions) {
            if let Some(node) = self.node() {
                if let Some(left) = node.left.node() {
                    assert!(node.value > left.value);
                }
                if let Some(right) = node.right.node() {
                    assert!(node.value < right.value);
                }
            }
        }
        inserted
    }

    /// Removes `value` from this subtree and returns it. Nothing is touched if it isn't found.
    fn remove(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let node = self.node_mut()?;
        let removed = match value.cmp(&node.value) {
            Ordering::Less => node.left.remove(value)?,
            Ordering::Greater => node.right.remove(value)?,
            Ordering::Equal => {
                let mut node = self.0.take()?;
                match (node.left.take(), node.right.take()) {
                    // At most one child: it's already balanced so it can take our place as is.
                    (Link(None), child) | (child, Link(None)) => {
                        *self = child;
                        return Some(node.value);
                    }
                    // Two children: the in-order successor (the smallest value of the right
                    // subtree) moves into this node and the successor's node is dropped instead.
                    (left, Link(Some(right))) => {
                        let (rest, mut successor) = right.split_min();
                        mem::swap(&mut node.value, &mut successor.value);
                        node.left = left;
                        node.right = rest;
                        self.0 = Some(node);
                        successor.value
                    }
                }
            }
        };

        self.balance();
        Some(removed)
    }

    /// Restores the AVL invariant for the node in this slot, assuming both of its subtrees are
    /// valid AVL trees whose heights differ by at most 2.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn balance(&mut self) {
        let Some(node) = self.node_mut() else {
            return;
        };
        node.fix_height();
        match node.balance_factor() {
            n if n > 1 => {
                if node.left.balance_factor() >= 0 {
                    trace!("LL case at height {}", node.height);
                    self.rotate_right();
                } else {
                    trace!("LR case at height {}", node.height);
                    self.rotate_left_right();
                }
            }
            n if n < -1 => {
                if node.right.balance_factor() <= 0 {
                    trace!("RR case at height {}", node.height);
                    self.rotate_left();
                } else {
                    trace!("RL case at height {}", node.height);
                    self.rotate_right_left();
                }
            }
            _ => {}
        }

        if cfg!(debug_assertions) {
            if let Some(node) = self.node() {
                let left_height = node.left.height();
                let right_height = node.right.height();
                assert_eq!(node.height, left_height.max(right_height) + 1);
                assert!(left_height.abs_diff(right_height) <= 1);
            }
        }
    }

    /// Rotate the node in this slot to the right. This moves the left child up vertically and
    /// the old root down vertically. Used to rebalance the tree when the left child is too tall.
    /// Does nothing when there is no left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///        old_root            new_root
    ///         /    \              /    \
    ///    new_root   z  rotate -> x   old_root
    ///     /   \                       /   \
    ///    x     y                     y     z
    /// ```
    fn rotate_right(&mut self) {
        let Some(mut old_root) = self.0.take() else {
            return;
        };
        let Some(mut new_root) = old_root.left.0.take() else {
            self.0 = Some(old_root);
            return;
        };

        // Child before parent: `old_root` is now below `new_root`.
        old_root.left = new_root.right.take();
        old_root.fix_height();

        new_root.right = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    /// The mirror image of [`Link::rotate_right`].
    fn rotate_left(&mut self) {
        let Some(mut old_root) = self.0.take() else {
            return;
        };
        let Some(mut new_root) = old_root.right.0.take() else {
            self.0 = Some(old_root);
            return;
        };

        old_root.right = new_root.left.take();
        old_root.fix_height();

        new_root.left = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    fn rotate_right_left(&mut self) {
        if let Some(node) = self.node_mut() {
            node.right.rotate_right();
        }
        self.rotate_left();
    }

    fn rotate_left_right(&mut self) {
        if let Some(node) = self.node_mut() {
            node.left.rotate_left();
        }
        self.rotate_right();
    }

    /// Returns this subtree's height if every node in it is valid and lies strictly between
    /// `lower` and `upper`.
    fn check(&self, lower: Option<&T>, upper: Option<&T>) -> Option<usize>
    where
        T: Ord,
    {
        let Some(node) = self.node() else {
            return Some(0);
        };
        if lower.is_some_and(|l| node.value <= *l) || upper.is_some_and(|u| node.value >= *u) {
            return None;
        }

        let left_height = node.left.check(lower, Some(&node.value))?;
        let right_height = node.right.check(Some(&node.value), upper)?;
        let balanced = left_height.abs_diff(right_height) <= 1;
        let height = left_height.max(right_height) + 1;
        (balanced && node.height == height).then_some(height)
    }

    fn preorder<'a>(&'a self, out: &mut Vec<&'a T>) {
        if let Some(node) = self.node() {
            out.push(&node.value);
            node.left.preorder(out);
            node.right.preorder(out);
        }
    }

    fn inorder<'a>(&'a self, out: &mut Vec<&'a T>) {
        if let Some(node) = self.node() {
            node.left.inorder(out);
            out.push(&node.value);
            node.right.inorder(out);
        }
    }

    fn postorder<'a>(&'a self, out: &mut Vec<&'a T>) {
        if let Some(node) = self.node() {
            node.left.postorder(out);
            node.right.postorder(out);
            out.push(&node.value);
        }
    }
}

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("height", &self.height)
            .field("left", &self.left.node())
            .field("right", &self.right.node())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: Link(None),
            right: Link(None),
            height: 1,
        })
    }

    fn search(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find_node(value).is_some()
    }

    fn find_node(&self, value: &T) -> Option<&Self>
    where
        T: Ord,
    {
        match value.cmp(&self.value) {
            Ordering::Less => self.left.node().and_then(|n| n.find_node(value)),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right.node().and_then(|n| n.find_node(value)),
        }
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }

    /// The difference in height between the left and right subtrees. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }

    /// Detaches the smallest node of the subtree rooted at `self`. Returns the rebalanced
    /// remainder of the subtree along with the detached node, whose children are empty.
    fn split_min(mut self: Box<Self>) -> (Link<T>, Box<Self>) {
        match self.left.0.take() {
            None => {
                let rest = self.right.take();
                self.height = 1;
                (rest, self)
            }
            Some(left) => {
                let (rest, min) = left.split_min();
                self.left = rest;
                let mut link = Link(Some(self));
                link.balance();
                (link, min)
            }
        }
    }
}
