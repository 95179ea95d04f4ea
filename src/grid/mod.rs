//! Sparse, unbounded, N-dimensional grid.
//!
//! Storage is a tree of [`Node`]s keyed by signed coordinates, rooted in a
//! single branch owned by the [`Grid`]. Dimensionality is not declared: a
//! path of length three addresses a three dimensional location simply because
//! it was written that way. [`Cell`] values are locators into the tree and
//! only assignment materializes storage.
//!
//! ```
//! use gridable::Entry;
//! use gridable::Grid;
//!
//! let grid: Grid<i32> = Grid::new();
//! grid.set(0, Entry::seq([10, 20, 30]));
//!
//! let row = grid.at(0)?;
//! assert_eq!(row.at(1)?.value(), Some(20));
//! assert_eq!(row.to_string(), "[10,20,30]");
//! # Ok::<(), gridable::Error>(())
//! ```
mod cell;
mod iter;
mod node;
mod slice;

pub use cell::Cell;
pub use cell::Grid;
pub use iter::*;
pub use node::*;
pub use slice::*;
