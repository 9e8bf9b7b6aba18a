//! Errors returned by the checked constructors of [`Tree`][crate::Tree].

/// Things that can go wrong when building a tree from caller-supplied data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A sequence passed to [`Tree::try_from_sorted`][crate::Tree::try_from_sorted] was not in
    /// ascending order. `index` is the first position whose value is smaller than the one before
    /// it.
    #[error("input is not sorted: value at index {index} is smaller than its predecessor")]
    Unsorted {
        /// Position of the first out-of-order value.
        index: usize,
    },
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
