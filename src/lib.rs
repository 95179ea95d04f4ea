//! # gridable
//!
//! A sparse, unbounded, N-dimensional grid. Coordinates may be negative,
//! dimensionality is decided by how cells are addressed, and only assigned
//! cells take up storage. All access to the shared tree goes through a
//! [`ReaderWriterGate`], so cells can be used from many threads at once.
//!
//! ```
//! use gridable::Grid;
//!
//! let grid: Grid<i32> = Grid::new();
//! grid.at(-10)?.set(-10, 5);
//! grid.at(10)?.set(10, 7);
//!
//! assert_eq!(grid.at(-10)?.at(-10)?.value(), Some(5));
//! assert_eq!(grid.iter().count(), 2);
//! # Ok::<(), gridable::Error>(())
//! ```

mod config;
mod constants;
mod errors;
mod gate;
mod grid;

pub use self::config::*;
pub use errors::*;
pub use gate::*;
pub use grid::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
