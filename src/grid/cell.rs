use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use super::Coord;
use super::Entry;
use super::GridSlice;
use super::Leaves;
use super::Neighbors;
use super::Node;
use super::SliceCells;
use crate::constants::ABSENT_RENDER;
use crate::GridConfig;
use crate::GridError;
use crate::ReaderWriterGate;
use crate::Result;

/// State shared by every cell of one grid: the tree behind its gate, and the
/// configuration the grid was built with.
pub(crate) struct GridShared<V> {
    pub(crate) gate: ReaderWriterGate<Node<V>>,
    pub(crate) config: GridConfig,
}

/// A locator into a grid: a coordinate path plus a handle to the shared root.
///
/// Creating or cloning a cell never materializes storage; only assignment
/// does. Reading an unset location yields no value rather than an error.
/// Every operation that touches the tree runs inside the grid's
/// [`ReaderWriterGate`]: mutations under exclusive access, observations under
/// shared access.
pub struct Cell<V> {
    shared: Arc<GridShared<V>>,
    path: Vec<Coord>,
}

impl<V> Cell<V> {
    pub(crate) fn located(
        shared: Arc<GridShared<V>>,
        path: Vec<Coord>,
    ) -> Self {
        Self { shared, path }
    }

    pub(crate) fn shared(&self) -> &Arc<GridShared<V>> {
        &self.shared
    }

    fn child(
        &self,
        key: Coord,
    ) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(key);
        Self::located(Arc::clone(&self.shared), path)
    }

    /// Coordinate path from the grid root to this cell.
    pub fn coordinates(&self) -> &[Coord] {
        &self.path
    }

    /// Number of axes addressed by this cell.
    pub fn dimensions(&self) -> usize {
        self.path.len()
    }

    /// Manhattan distance between the coordinates of two cells of equal
    /// dimensionality.
    pub fn distance(
        &self,
        other: &Cell<V>,
    ) -> Result<u64> {
        if self.path.len() != other.path.len() {
            return Err(GridError::DimensionMismatch {
                left: self.path.len(),
                right: other.path.len(),
            }
            .into());
        }
        Ok(self
            .path
            .iter()
            .zip(&other.path)
            .map(|(a, b)| a.abs_diff(*b))
            .sum())
    }

    /// Child cell at `key`. Refuses to descend into a cell that already
    /// holds a value.
    pub fn at(
        &self,
        key: Coord,
    ) -> Result<Cell<V>> {
        self.shared.gate.run_shared(|root| match root.resolve(&self.path) {
            Some(Node::Leaf(_)) => Err(GridError::NotIndexable {
                path: self.path.clone(),
            }
            .into()),
            _ => Ok(self.child(key)),
        })
    }

    /// Cells over the positions of `slice`. Omitted bounds default to the
    /// smallest and largest existing child keys; they are resolved once, so
    /// calling `slice` again re-derives them.
    pub fn slice(
        &self,
        slice: impl Into<GridSlice>,
    ) -> Result<SliceCells<V>> {
        let slice = slice.into();
        let positions = self.shared.gate.run_shared(|root| match root.resolve(&self.path) {
            Some(Node::Leaf(_)) => Err(GridError::NotIndexable {
                path: self.path.clone(),
            }),
            Some(node) => slice.read_positions(node.first_key(), node.last_key()),
            None => slice.read_positions(None, None),
        })?;
        Ok(SliceCells::new(self.clone(), positions))
    }

    /// Assigns `entry` at `key` below this cell.
    ///
    /// A scalar replaces whatever is stored at `key`; branches along this
    /// cell's path are created as needed. A sequence is fanned out over
    /// indices `0..len` beneath `key`, nesting for nested sequences.
    pub fn set(
        &self,
        key: Coord,
        entry: impl Into<Entry<V>>,
    ) {
        let entry = entry.into();
        debug!(path = ?self.path, key, "assigning cell");
        self.shared.gate.run_exclusive(|root| root.write(&self.path, key, entry));
    }

    /// Assigns `items` in order to the positions of `slice`.
    ///
    /// The slice must cover exactly as many positions as there are items;
    /// otherwise nothing is written.
    pub fn set_slice<I>(
        &self,
        slice: impl Into<GridSlice>,
        items: I,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Entry<V>>,
    {
        let slice = slice.into();
        let items: Vec<Entry<V>> = items.into_iter().map(Into::into).collect();
        let positions = slice.assign_positions(items.len()).inspect_err(|e| {
            warn!(path = ?self.path, ?slice, "rejected slice assignment: {}", e);
        })?;

        debug!(path = ?self.path, ?slice, count = items.len(), "assigning slice");
        self.shared.gate.run_exclusive(|root| {
            for (key, entry) in positions.zip(items) {
                root.write(&self.path, key, entry);
            }
        });
        Ok(())
    }

    /// Removes the child at `key` together with its subtree.
    pub fn remove(
        &self,
        key: Coord,
    ) -> Result<()> {
        match self.shared.gate.run_exclusive(|root| root.remove(&self.path, key)) {
            Some(_) => {
                debug!(path = ?self.path, key, "removed cell");
                Ok(())
            }
            None => {
                warn!(path = ?self.path, key, "remove of missing key");
                Err(GridError::KeyNotFound {
                    path: self.path.clone(),
                    key,
                }
                .into())
            }
        }
    }

    /// Whether this cell currently holds a value.
    pub fn has_value(&self) -> bool {
        self.shared
            .gate
            .run_shared(|root| matches!(root.resolve(&self.path), Some(Node::Leaf(_))))
    }

    /// Number of direct children; 1 for a cell holding a value, 0 for an
    /// unset cell.
    pub fn len(&self) -> usize {
        self.shared
            .gate
            .run_shared(|root| root.resolve(&self.path).map_or(0, Node::len))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is a direct child of this cell.
    pub fn contains_key(
        &self,
        key: Coord,
    ) -> bool {
        self.shared
            .gate
            .run_shared(|root| root.resolve(&self.path).is_some_and(|node| node.has_child_key(key)))
    }

    /// Whether a direct child of this cell holds `value`. Deeper
    /// descendants are not searched.
    pub fn contains_value<Q>(
        &self,
        value: &Q,
    ) -> bool
    where
        Q: ?Sized,
        V: PartialEq<Q>,
    {
        self.shared.gate.run_shared(|root| {
            root.resolve(&self.path)
                .is_some_and(|node| node.has_child_value(value))
        })
    }

    /// Shallow membership: true when `probe` is one of the child keys or the
    /// value held by one of the direct children.
    pub fn contains<Q>(
        &self,
        probe: Q,
    ) -> bool
    where
        Q: Copy + TryInto<Coord>,
        V: PartialEq<Q>,
    {
        let key = probe.try_into().ok();
        self.shared.gate.run_shared(|root| {
            root.resolve(&self.path).is_some_and(|node| {
                key.is_some_and(|key| node.has_child_key(key)) || node.has_child_value(&probe)
            })
        })
    }

    /// Cells of every value stored at or below this cell, depth first in
    /// ascending key order.
    ///
    /// The walk runs under a single shared-access scope, so it reflects one
    /// consistent state of the tree.
    pub fn iter(&self) -> Leaves<V> {
        let paths = self
            .shared
            .gate
            .run_shared(|root| root.resolve(&self.path).map(|node| node.leaf_paths(&self.path)));
        Leaves::new(Arc::clone(&self.shared), paths.unwrap_or_default())
    }

    /// Cells in the hyper-cube around this cell using the grid's configured
    /// defaults.
    pub fn neighbors(&self) -> Neighbors<V> {
        let defaults = &self.shared.config.neighbors;
        self.neighbors_with(defaults.include_empty, defaults.distance)
    }

    /// Every cell whose coordinates differ from this cell's by at most
    /// `distance` on each axis, this cell included. Unset cells are skipped
    /// unless `include_empty` is set.
    ///
    /// `distance` is taken as given; `neighbors.max_distance` only bounds the
    /// configured default.
    pub fn neighbors_with(
        &self,
        include_empty: bool,
        distance: u32,
    ) -> Neighbors<V> {
        Neighbors::new(
            Arc::clone(&self.shared),
            self.path.clone(),
            include_empty,
            distance,
        )
    }
}

impl<V: Clone> Cell<V> {
    /// The value stored at this cell, if it holds one.
    pub fn value(&self) -> Option<V> {
        self.shared.gate.run_shared(|root| match root.resolve(&self.path) {
            Some(Node::Leaf(value)) => Some(value.clone()),
            _ => None,
        })
    }

    /// A copy of the materialized content at this cell.
    pub fn content(&self) -> Option<Node<V>> {
        self.shared
            .gate
            .run_shared(|root| root.resolve(&self.path).cloned())
    }
}

impl<V: PartialEq> Cell<V> {
    /// Whether this cell holds exactly `value`. A branch never equals a
    /// value.
    pub fn eq_value(
        &self,
        value: &V,
    ) -> bool {
        self.shared.gate.run_shared(
            |root| matches!(root.resolve(&self.path), Some(Node::Leaf(stored)) if stored == value),
        )
    }
}

impl<V> Clone for Cell<V> {
    fn clone(&self) -> Self {
        Self::located(Arc::clone(&self.shared), self.path.clone())
    }
}

/// Cells compare by their resolved content, not by their coordinates.
impl<V: Clone + PartialEq> PartialEq for Cell<V> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        if Arc::ptr_eq(&self.shared, &other.shared) {
            return self
                .shared
                .gate
                .run_shared(|root| root.resolve(&self.path) == root.resolve(&other.path));
        }
        // Different grids: take a copy first so only one gate is held at a time.
        let theirs = other.content();
        self.shared
            .gate
            .run_shared(|root| root.resolve(&self.path) == theirs.as_ref())
    }
}

impl<V: Display> Display for Cell<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.shared.gate.run_shared(|root| match root.resolve(&self.path) {
            Some(node) => write!(f, "{node}"),
            None => f.write_str(ABSENT_RENDER),
        })
    }
}

impl<V> Debug for Cell<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Cell").field("path", &self.path).finish_non_exhaustive()
    }
}

impl<V> IntoIterator for &Cell<V> {
    type Item = Cell<V>;
    type IntoIter = Leaves<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owner of a sparse grid. Dereferences to the root [`Cell`], whose
/// coordinate path is empty.
///
/// ```
/// use gridable::Grid;
///
/// let grid: Grid<i32> = Grid::new();
/// grid.set(1, 3);
/// grid.at(2).unwrap().set(2, 4);
///
/// assert_eq!(grid.at(1).unwrap().value(), Some(3));
/// assert_eq!(grid.to_string(), "[3,[4]]");
/// ```
pub struct Grid<V> {
    root: Cell<V>,
}

impl<V> Grid<V> {
    pub fn new() -> Self {
        Self::assemble(GridConfig::default())
    }

    /// Builds a grid around `config`, rejecting it with `Error::Config` if
    /// it fails [`GridConfig::validate`].
    pub fn with_config(config: GridConfig) -> Result<Self> {
        let config = config.validate().inspect_err(|e| {
            warn!("rejected grid config: {}", e);
        })?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: GridConfig) -> Self {
        debug!(?config, "creating grid");
        let shared = Arc::new(GridShared {
            gate: ReaderWriterGate::new(Node::default()),
            config,
        });
        Self {
            root: Cell::located(shared, Vec::new()),
        }
    }

    /// Builds a grid from the layered configuration sources, see
    /// [`GridConfig::new`].
    pub fn from_env() -> Result<Self> {
        Self::with_config(GridConfig::new()?)
    }

    pub fn config(&self) -> &GridConfig {
        &self.root.shared().config
    }

    /// A cell handle to the root, usable after the grid is dropped.
    pub fn root(&self) -> Cell<V> {
        self.root.clone()
    }
}

impl<V> Default for Grid<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Deref for Grid<V> {
    type Target = Cell<V>;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl<V> Debug for Grid<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Grid").field("config", self.config()).finish()
    }
}

impl<V> IntoIterator for &Grid<V> {
    type Item = Cell<V>;
    type IntoIter = Leaves<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.root.iter()
    }
}
