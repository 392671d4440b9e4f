//! Node identity cache

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use xml_tree_traits::XmlTree;

use crate::error::Result;
use crate::node::Node;

/// Maps engine handles to the one wrapper that represents them.
///
/// Entries are never evicted; they live as long as the owning document.
pub struct NodeCache<T: XmlTree> {
    nodes: HashMap<T::Node, Node<T>>,
}

impl<T: XmlTree> NodeCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, handle: T::Node, node: Node<T>) {
        self.nodes.insert(handle, node);
    }

    /// The cached wrapper for `handle`, if it has been materialized
    pub fn get(&self, handle: &T::Node) -> Option<Node<T>> {
        self.nodes.get(handle).cloned()
    }

    pub fn contains(&self, handle: &T::Node) -> bool {
        self.nodes.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of every materialized wrapper, in no particular order
    pub fn handles(&self) -> impl Iterator<Item = &T::Node> + '_ {
        self.nodes.keys()
    }

    /// Return the wrapper for `handle`, creating it with `create` on a miss.
    ///
    /// Lookup and insert happen under one `&mut` borrow. If `create` fails
    /// the cache is left untouched.
    pub(crate) fn get_or_try_insert_with<F>(&mut self, handle: T::Node, create: F) -> Result<Node<T>>
    where
        F: FnOnce() -> Result<Node<T>>,
    {
        match self.nodes.entry(handle) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let node = create()?;
                Ok(entry.insert(node).clone())
            }
        }
    }
}

impl<T: XmlTree> fmt::Debug for NodeCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCache")
            .field("len", &self.nodes.len())
            .finish()
    }
}
