//! Sparse Grid Error Hierarchy
//!
//! Defines the error types raised by grid navigation, assignment and
//! configuration loading. All grid errors are local and synchronous: they
//! are reported to the caller at the point of violation and leave the tree
//! untouched.

use config::ConfigError;

use crate::grid::Coord;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cell navigation and assignment failures
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Grid configuration loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    /// Slice assignment covers a different number of positions than values supplied
    #[error("Invalid slice size: slice covers {expected} positions but {actual} values were supplied")]
    InvalidSliceSize { expected: u64, actual: u64 },

    /// Slices only advance forward
    #[error("Invalid slice step {0}: step must be greater than 0")]
    InvalidSliceStep(i64),

    /// Attempt to descend into a materialized leaf
    #[error("Cell at {path:?} holds a value and is not indexable")]
    NotIndexable { path: Vec<Coord> },

    /// Removal of a child that does not exist
    #[error("Key {key} not found under {path:?}")]
    KeyNotFound { path: Vec<Coord>, key: Coord },

    /// Distance between cells of different dimensionality
    #[error("Unequal number of dimensions: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}
