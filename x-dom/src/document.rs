//! The document facade
//!
//! A [`Document`] is the root wrapper of a parsed tree. It owns the engine
//! tree, the node identity cache and the decorator registry, and is the
//! only way to turn an engine handle into a [`Node`].

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use xml_tree_traits::{Namespaces, NodeType, XmlTree};

use crate::cache::NodeCache;
use crate::capability::CapabilityClass;
use crate::decorator::{DecoratorRef, DecoratorRegistry};
use crate::error::{Error, Result};
use crate::explore::Explorable;
use crate::node::Node;

/// Whether [`Document::explore`] has upgraded the document.
///
/// The transition is one way. Other registered decorators do not move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationState {
    Undecorated,
    Explorable,
}

/// Root of a parsed XML tree.
///
/// Cloning a `Document` shares it. Nodes hold only a weak reference back,
/// so the tree, the cache and every wrapper are released when the last
/// `Document` clone goes away.
pub struct Document<T: XmlTree> {
    inner: Rc<DocumentInner<T>>,
}

pub(crate) struct DocumentInner<T: XmlTree> {
    tree: T,
    handle: T::Node,
    node: Node<T>,
    registry: RefCell<DecoratorRegistry>,
    cache: RefCell<NodeCache<T>>,
    state: Cell<DecorationState>,
}

impl<T: XmlTree> Document<T> {
    /// Parse `xml` with `tree` and wrap the resulting document
    pub fn parse(mut tree: T, xml: &str) -> Result<Self> {
        let handle = tree.parse_xml(xml)?;
        Self::from_tree(tree, handle)
    }

    /// Wrap an already parsed document node of `tree`
    pub fn from_tree(tree: T, handle: T::Node) -> Result<Self> {
        if tree.document_of(&handle) != Some(handle) {
            return Err(Error::invalid_handle(&handle));
        }

        let inner = Rc::new_cyclic(|weak| {
            let node = Node::new(handle, NodeType::Document, weak.clone());
            let mut cache = NodeCache::new();
            cache.insert(handle, node.clone());
            DocumentInner {
                tree,
                handle,
                node,
                registry: RefCell::new(DecoratorRegistry::new()),
                cache: RefCell::new(cache),
                state: Cell::new(DecorationState::Undecorated),
            }
        });
        tracing::debug!(?handle, "created document");
        Ok(Self { inner })
    }

    pub(crate) fn from_inner(inner: Rc<DocumentInner<T>>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> &'static str {
        "document"
    }

    /// A document is its own document
    pub fn document(&self) -> Document<T> {
        self.clone()
    }

    /// The document's own node wrapper
    pub fn as_node(&self) -> Node<T> {
        self.inner.node.clone()
    }

    pub fn handle(&self) -> T::Node {
        self.inner.handle
    }

    /// The engine tree backing this document
    pub fn tree(&self) -> &T {
        &self.inner.tree
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    // ==================== Identity cache ====================

    /// The canonical wrapper for `handle`.
    ///
    /// The first lookup of a handle creates the wrapper and runs it through
    /// the decorator registry; later lookups return that same wrapper with
    /// no side effects. Handles owned by another document fail with
    /// [`Error::InvalidHandle`] and leave the cache untouched.
    ///
    /// Cache hits only need shared access, so they succeed while a
    /// [`Document::node_cache`] guard is alive. A miss that would have to
    /// insert under such a guard, or decorate under a live
    /// [`Document::decorators`] guard, fails with [`Error::Borrowed`].
    pub fn node(&self, handle: T::Node) -> Result<Node<T>> {
        if let Some(node) = self.cache()?.get(&handle) {
            return Ok(node);
        }
        let node = self.materialize(handle)?;
        self.inner
            .cache
            .try_borrow_mut()
            .map_err(|_| Error::Borrowed("node cache"))?
            .get_or_try_insert_with(handle, || Ok(node))
    }

    fn cache(&self) -> Result<Ref<'_, NodeCache<T>>> {
        self.inner
            .cache
            .try_borrow()
            .map_err(|_| Error::Borrowed("node cache"))
    }

    fn materialize(&self, handle: T::Node) -> Result<Node<T>> {
        if self.inner.tree.document_of(&handle) != Some(self.inner.handle) {
            tracing::debug!(?handle, "rejected handle not owned by this document");
            return Err(Error::invalid_handle(&handle));
        }
        let registry = self
            .inner
            .registry
            .try_borrow()
            .map_err(|_| Error::Borrowed("decorator registry"))?;
        let node_type = self.inner.tree.node_type(&handle);
        let node = Node::new(handle, node_type, Rc::downgrade(&self.inner));
        let applied = registry.apply(&node);
        tracing::trace!(?handle, ?node_type, applied, "materialized node");
        Ok(node)
    }

    /// Wrapper for the document element, if the document has one
    pub fn root(&self) -> Result<Option<Node<T>>> {
        match self.inner.tree.document_element(&self.inner.handle) {
            Some(root) => self.node(root).map(Some),
            None => Ok(None),
        }
    }

    /// Read access to the identity cache.
    ///
    /// # Panics
    ///
    /// Panics if called while a node is being inserted, which cannot happen
    /// from outside this crate.
    pub fn node_cache(&self) -> Ref<'_, NodeCache<T>> {
        self.inner.cache.borrow()
    }

    // ==================== Decoration ====================

    /// Append `unit` to the decorators for `class`.
    ///
    /// Only wrappers materialized afterwards pick it up automatically; use
    /// [`Document::decorate`] to extend existing ones. Panics while a
    /// [`Document::decorators`] guard is alive.
    pub fn register(&self, class: CapabilityClass, unit: DecoratorRef) {
        self.inner.registry.borrow_mut().register(class, unit);
    }

    /// Mutable list of decorators for `class`, created empty on first use.
    ///
    /// Pushing onto it is equivalent to [`Document::register`]. The
    /// registry stays borrowed until the guard is dropped; materializing a
    /// new node meanwhile fails with [`Error::Borrowed`].
    ///
    /// # Panics
    ///
    /// Panics if another `decorators` guard is still alive.
    pub fn decorators(&self, class: CapabilityClass) -> RefMut<'_, Vec<DecoratorRef>> {
        RefMut::map(self.inner.registry.borrow_mut(), |registry| {
            registry.decorators_mut(class)
        })
    }

    /// Apply every matching registered decorator to `node`.
    ///
    /// Nothing tracks what was applied before, so decorating a node twice
    /// extends it twice. Panics while a [`Document::decorators`] guard is
    /// alive.
    pub fn decorate(&self, node: &Node<T>) -> usize {
        self.inner.registry.borrow().apply(node)
    }

    /// True once `class` has a decorator and applies to the document itself
    pub fn is_active(&self, class: CapabilityClass) -> bool {
        self.inner
            .registry
            .borrow()
            .is_active(class, NodeType::Document)
    }

    pub fn decoration_state(&self) -> DecorationState {
        self.inner.state.get()
    }

    /// Give every node fluent navigation.
    ///
    /// Registers [`Explorable`] for all nodes and re-decorates the document
    /// wrapper so it gains navigation right away; other nodes gain it when
    /// they are first materialized. Registration is skipped if the document
    /// wrapper already carries [`Explorable`], however it got there; the
    /// state is [`DecorationState::Explorable`] afterwards either way.
    pub fn explore(&self) -> &Self {
        if !self.inner.node.is_extended_with(Explorable::NAME) {
            self.register(CapabilityClass::Node, Rc::new(Explorable));
            self.decorate(&self.inner.node);
        }
        if self.inner.state.get() == DecorationState::Undecorated {
            self.inner.state.set(DecorationState::Explorable);
            tracing::debug!(handle = ?self.inner.handle, "document is now explorable");
        }
        self
    }

    /// [`Document::explore`], then run `f` with the document
    pub fn explore_with<F>(&self, f: F) -> &Self
    where
        F: FnOnce(&Self),
    {
        self.explore();
        f(self);
        self
    }

    // ==================== Engine views ====================

    /// Serialize the whole document through the engine, unmodified
    pub fn serialize_to_text(&self) -> Result<String> {
        Ok(self.inner.tree.serialize(&self.inner.handle)?)
    }

    pub fn to_xml(&self) -> Result<String> {
        self.serialize_to_text()
    }

    pub fn inner_html(&self) -> Result<String> {
        self.serialize_to_text()
    }

    /// Namespace declarations under the root element.
    ///
    /// A document without a root element has none.
    pub fn collect_namespaces(&self) -> Result<Namespaces> {
        match self.inner.tree.document_element(&self.inner.handle) {
            Some(root) => Ok(self.inner.tree.collect_namespaces(&root)?),
            None => Ok(Namespaces::new()),
        }
    }
}

impl<T: XmlTree> Clone for Document<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: XmlTree> fmt::Debug for Document<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("handle", &self.inner.handle)
            .field("state", &self.inner.state.get())
            .field(
                "cached_nodes",
                &self.inner.cache.try_borrow().map(|cache| cache.len()).ok(),
            )
            .field(
                "decorators",
                &self.inner.registry.try_borrow().map(|r| r.len()).ok(),
            )
            .finish()
    }
}
