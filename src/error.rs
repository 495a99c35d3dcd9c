//! Errors reported by the tree.
//!
//! Only queries that have no sensible answer on an empty tree fail with an error. A missing value
//! on `remove`/`search` and a duplicate value on `insert` are ordinary outcomes reported through
//! the return value of those methods.

/// Shorthand for results carrying a [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;

/// The ways a tree query can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The query needs at least one value but the tree holds none.
    #[error("the tree is empty")]
    EmptyTree,
}
