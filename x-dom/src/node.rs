//! Identity-stable node wrappers

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use xml_tree_traits::{NodeType, XmlTree};

use crate::decorator::{Decorator, DecoratorRef};
use crate::document::{Document, DocumentInner};
use crate::error::{Error, Result};
use crate::explore::Explorer;

/// The object callers use in place of a raw engine handle.
///
/// A `Node` is a shared reference: clones point at the same wrapper, and
/// equality is identity. Within one document there is at most one wrapper
/// per handle, so two lookups of the same handle compare equal and see the
/// same decorators.
pub struct Node<T: XmlTree> {
    inner: Rc<NodeInner<T>>,
}

struct NodeInner<T: XmlTree> {
    handle: T::Node,
    node_type: NodeType,
    document: Weak<DocumentInner<T>>,
    decorators: RefCell<Vec<DecoratorRef>>,
}

impl<T: XmlTree> Node<T> {
    pub(crate) fn new(handle: T::Node, node_type: NodeType, document: Weak<DocumentInner<T>>) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                handle,
                node_type,
                document,
                decorators: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The engine handle this wrapper stands for
    pub fn handle(&self) -> T::Node {
        self.inner.handle
    }

    pub fn node_type(&self) -> NodeType {
        self.inner.node_type
    }

    /// Whether two wrappers are the same object
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// The owning document, or `None` once it has been dropped
    pub fn document(&self) -> Option<Document<T>> {
        self.inner.document.upgrade().map(Document::from_inner)
    }

    fn require_document(&self) -> Result<Document<T>> {
        self.document().ok_or(Error::DocumentDropped)
    }

    /// Node name: `"document"`, `"text"` and `"comment"` for those kinds,
    /// the engine's name for everything else.
    pub fn name(&self) -> Result<String> {
        match self.inner.node_type {
            NodeType::Document => Ok("document".to_string()),
            NodeType::Text => Ok("text".to_string()),
            NodeType::Comment => Ok("comment".to_string()),
            _ => {
                let document = self.require_document()?;
                Ok(document
                    .tree()
                    .node_name(&self.inner.handle)
                    .unwrap_or_default())
            }
        }
    }

    /// Text value of the node as reported by the engine
    pub fn content(&self) -> Result<Option<String>> {
        let document = self.require_document()?;
        Ok(document.tree().node_value(&self.inner.handle))
    }

    pub fn parent(&self) -> Result<Option<Node<T>>> {
        let document = self.require_document()?;
        match document.tree().parent(&self.inner.handle) {
            Some(parent) => document.node(parent).map(Some),
            None => Ok(None),
        }
    }

    /// Wrappers for every child, materializing them as needed
    pub fn children(&self) -> Result<Vec<Node<T>>> {
        let document = self.require_document()?;
        document
            .tree()
            .children(&self.inner.handle)
            .into_iter()
            .map(|child| document.node(child))
            .collect()
    }

    /// Serialize this node's subtree through the engine
    pub fn serialize(&self) -> Result<String> {
        let document = self.require_document()?;
        Ok(document.tree().serialize(&self.inner.handle)?)
    }

    /// Decorators applied so far, in application order
    pub fn decorators(&self) -> Vec<DecoratorRef> {
        self.inner.decorators.borrow().clone()
    }

    pub fn is_extended_with(&self, name: &str) -> bool {
        self.inner
            .decorators
            .borrow()
            .iter()
            .any(|unit| unit.name() == name)
    }

    /// Run `f` with the most recently applied unit of type `D`.
    ///
    /// Returns `None` if the wrapper was never extended with a `D`. The unit
    /// list is not borrowed while `f` runs, so `f` may navigate or decorate
    /// freely.
    pub fn with_capability<D, R, F>(&self, f: F) -> Option<R>
    where
        D: Decorator + 'static,
        F: FnOnce(&D) -> R,
    {
        let unit = self
            .inner
            .decorators
            .borrow()
            .iter()
            .rev()
            .find(|unit| unit.as_any().is::<D>())
            .cloned()?;
        unit.as_any().downcast_ref::<D>().map(f)
    }

    /// Whether any applied decorator provides fluent navigation
    pub fn is_explorable(&self) -> bool {
        self.inner
            .decorators
            .borrow()
            .iter()
            .any(|unit| unit.provides_navigation())
    }

    /// Navigation view, available only on explorable wrappers
    pub fn explorer(&self) -> Option<Explorer<T>> {
        if self.is_explorable() {
            Some(Explorer::new(self.clone()))
        } else {
            None
        }
    }

    pub(crate) fn extend(&self, unit: DecoratorRef) {
        self.inner.decorators.borrow_mut().push(unit);
    }
}

impl<T: XmlTree> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: XmlTree> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        Node::ptr_eq(self, other)
    }
}

impl<T: XmlTree> Eq for Node<T> {}

impl<T: XmlTree> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decorators: Vec<String> = self
            .inner
            .decorators
            .borrow()
            .iter()
            .map(|unit| unit.name().to_string())
            .collect();
        f.debug_struct("Node")
            .field("handle", &self.inner.handle)
            .field("node_type", &self.inner.node_type)
            .field("decorators", &decorators)
            .finish()
    }
}
