use std::fmt;
use std::fmt::Debug;
use std::iter::FusedIterator;
use std::sync::Arc;
use std::vec;

use super::cell::GridShared;
use super::Cell;
use super::Coord;
use super::Positions;

/// Cells of every stored value under a cell, see [`Cell::iter`].
///
/// The paths are collected up front in one shared-access scope; each cell
/// still reads the live tree when asked for its value.
pub struct Leaves<V> {
    shared: Arc<GridShared<V>>,
    paths: vec::IntoIter<Vec<Coord>>,
}

impl<V> Leaves<V> {
    pub(crate) fn new(
        shared: Arc<GridShared<V>>,
        paths: Vec<Vec<Coord>>,
    ) -> Self {
        Self {
            shared,
            paths: paths.into_iter(),
        }
    }
}

impl<V> Iterator for Leaves<V> {
    type Item = Cell<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(Cell::located(Arc::clone(&self.shared), path))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

impl<V> ExactSizeIterator for Leaves<V> {}
impl<V> FusedIterator for Leaves<V> {}

impl<V> Debug for Leaves<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Leaves").field("remaining", &self.paths.len()).finish()
    }
}

/// Child cells at the positions of a slice, see [`Cell::slice`].
pub struct SliceCells<V> {
    parent: Cell<V>,
    positions: Positions,
}

impl<V> SliceCells<V> {
    pub(crate) fn new(
        parent: Cell<V>,
        positions: Positions,
    ) -> Self {
        Self { parent, positions }
    }
}

impl<V> Iterator for SliceCells<V> {
    type Item = Cell<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.positions.next()?;
        let mut path = self.parent.coordinates().to_vec();
        path.push(key);
        Some(Cell::located(Arc::clone(self.parent.shared()), path))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<V> Debug for SliceCells<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("SliceCells")
            .field("parent", &self.parent)
            .field("positions", &self.positions)
            .finish()
    }
}

/// Cells of the hyper-cube around a center cell, see [`Cell::neighbors_with`].
///
/// Offsets run from `-distance` to `+distance` on every axis, the first axis
/// varying slowest. The center itself is part of the cube.
pub struct Neighbors<V> {
    shared: Arc<GridShared<V>>,
    center: Vec<Coord>,
    offsets: Vec<Coord>,
    distance: Coord,
    include_empty: bool,
    exhausted: bool,
}

impl<V> Neighbors<V> {
    pub(crate) fn new(
        shared: Arc<GridShared<V>>,
        center: Vec<Coord>,
        include_empty: bool,
        distance: u32,
    ) -> Self {
        let distance = Coord::from(distance);
        Self {
            shared,
            offsets: vec![-distance; center.len()],
            center,
            distance,
            include_empty,
            exhausted: false,
        }
    }

    /// Odometer step over the offsets; the last axis turns fastest.
    fn advance(&mut self) {
        for offset in self.offsets.iter_mut().rev() {
            if *offset < self.distance {
                *offset += 1;
                return;
            }
            *offset = -self.distance;
        }
        self.exhausted = true;
    }
}

impl<V> Iterator for Neighbors<V> {
    type Item = Cell<V>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let path = self
                .center
                .iter()
                .zip(&self.offsets)
                .map(|(coord, offset)| coord.saturating_add(*offset))
                .collect();
            self.advance();

            let cell = Cell::located(Arc::clone(&self.shared), path);
            if self.include_empty || cell.has_value() {
                return Some(cell);
            }
        }
        None
    }
}

impl<V> FusedIterator for Neighbors<V> {}

impl<V> Debug for Neighbors<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Neighbors")
            .field("center", &self.center)
            .field("distance", &self.distance)
            .field("include_empty", &self.include_empty)
            .finish_non_exhaustive()
    }
}
