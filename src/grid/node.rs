use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;

/// A single coordinate along one axis of the grid.
pub type Coord = i64;

/// Materialized content at a coordinate path.
///
/// A node's kind is whatever was last written there: writing a value over a
/// branch drops the whole subtree, and writing beneath a leaf turns it back
/// into a branch. An unmaterialized location has no node at all and is
/// represented as `None` when resolving.
///
/// Children are kept in ascending key order, which is the order used for
/// iteration, rendering and slicing defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<V> {
    Leaf(V),
    Branch(BTreeMap<Coord, Node<V>>),
}

/// Value accepted by assignment: either a scalar stored as a leaf, or an
/// ordered sequence fanned out over integer indices `0..len`.
///
/// Sequences nest, so `Entry::seq([Entry::seq([1]), Entry::seq([2, 3])])`
/// creates two levels of branches.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<V> {
    Leaf(V),
    Seq(Vec<Entry<V>>),
}

impl<V> Entry<V> {
    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry<V>>,
    {
        Entry::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<V> From<V> for Entry<V> {
    fn from(value: V) -> Self {
        Entry::Leaf(value)
    }
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Node::Branch(BTreeMap::new())
    }
}

impl<V> Node<V> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    /// Walks `path` from this node. Yields `None` as soon as a step is
    /// missing or lands on a leaf with path left to walk.
    pub fn resolve(
        &self,
        path: &[Coord],
    ) -> Option<&Node<V>> {
        let mut node = self;
        for key in path {
            node = match node {
                Node::Branch(children) => children.get(key)?,
                Node::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    fn resolve_mut(
        &mut self,
        path: &[Coord],
    ) -> Option<&mut Node<V>> {
        let mut node = self;
        for key in path {
            node = match node {
                Node::Branch(children) => children.get_mut(key)?,
                Node::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    fn children_mut(&mut self) -> &mut BTreeMap<Coord, Node<V>> {
        match self {
            Node::Branch(children) => children,
            Node::Leaf(_) => {
                *self = Node::default();
                self.children_mut()
            }
        }
    }

    /// Creates every missing branch along `path` and returns the children of
    /// the last one. Nothing beyond `path` is created.
    fn materialize(
        &mut self,
        path: &[Coord],
    ) -> &mut BTreeMap<Coord, Node<V>> {
        let mut node = self;
        for key in path {
            node = node.children_mut().entry(*key).or_default();
        }
        node.children_mut()
    }

    /// Stores `entry` at `path + key`, replacing whatever was there.
    pub(crate) fn write(
        &mut self,
        path: &[Coord],
        key: Coord,
        entry: Entry<V>,
    ) {
        match entry {
            Entry::Leaf(value) => {
                self.materialize(path).insert(key, Node::Leaf(value));
            }
            Entry::Seq(items) => {
                let mut child_path = Vec::with_capacity(path.len() + 1);
                child_path.extend_from_slice(path);
                child_path.push(key);
                for (index, item) in items.into_iter().enumerate() {
                    self.write(&child_path, index as Coord, item);
                }
            }
        }
    }

    /// Detaches the child `key` of the branch at `path`. Parents left empty
    /// are kept.
    pub(crate) fn remove(
        &mut self,
        path: &[Coord],
        key: Coord,
    ) -> Option<Node<V>> {
        match self.resolve_mut(path)? {
            Node::Branch(children) => children.remove(&key),
            Node::Leaf(_) => None,
        }
    }

    /// Number of direct children of a branch; a leaf counts as one.
    pub fn len(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(children) => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth-first, ascending-key walk returning the absolute path of every
    /// leaf under this node. `prefix` is the path of this node itself.
    pub(crate) fn leaf_paths(
        &self,
        prefix: &[Coord],
    ) -> Vec<Vec<Coord>> {
        let mut leaves = Vec::new();
        let mut stack = vec![(prefix.to_vec(), self)];
        while let Some((path, node)) = stack.pop() {
            match node {
                Node::Leaf(_) => leaves.push(path),
                Node::Branch(children) => {
                    for (key, child) in children.iter().rev() {
                        let mut child_path = path.clone();
                        child_path.push(*key);
                        stack.push((child_path, child));
                    }
                }
            }
        }
        leaves
    }

    pub(crate) fn has_child_key(
        &self,
        key: Coord,
    ) -> bool {
        matches!(self, Node::Branch(children) if children.contains_key(&key))
    }

    /// Shallow value membership: only direct children holding a leaf are
    /// compared.
    pub(crate) fn has_child_value<Q>(
        &self,
        probe: &Q,
    ) -> bool
    where
        Q: ?Sized,
        V: PartialEq<Q>,
    {
        match self {
            Node::Branch(children) => children
                .values()
                .any(|child| matches!(child, Node::Leaf(value) if value == probe)),
            Node::Leaf(_) => false,
        }
    }

    pub(crate) fn first_key(&self) -> Option<Coord> {
        match self {
            Node::Branch(children) => children.keys().next().copied(),
            Node::Leaf(_) => None,
        }
    }

    pub(crate) fn last_key(&self) -> Option<Coord> {
        match self {
            Node::Branch(children) => children.keys().next_back().copied(),
            Node::Leaf(_) => None,
        }
    }
}

impl<V: Display> Display for Node<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Node::Leaf(value) => write!(f, "{value}"),
            Node::Branch(children) => {
                f.write_str("[")?;
                for (position, child) in children.values().enumerate() {
                    if position > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")
            }
        }
    }
}
