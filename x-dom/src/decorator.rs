//! Decorators and the per-document decorator registry
//!
//! A decorator is a shared, stateless unit of behavior that a node wrapper
//! can be extended with after the fact. The registry maps capability classes
//! to ordered lists of units and applies every matching unit to a wrapper
//! when it is materialized.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use xml_tree_traits::{NodeType, XmlTree};

use crate::capability::CapabilityClass;
use crate::node::Node;

/// A behavior-extension unit that can be attached to node wrappers.
///
/// Behavior lives on the implementing type. Callers reach it through
/// [`Node::with_capability`], which finds the unit on a wrapper by its
/// concrete type via [`Decorator::as_any`].
pub trait Decorator: fmt::Debug {
    /// Name used to recognise the unit on a wrapper
    fn name(&self) -> &str;

    /// The unit as `Any`, for downcasting to its concrete type.
    /// Implementations return `self`.
    fn as_any(&self) -> &dyn Any;

    /// Whether wrappers extended with this unit gain fluent navigation
    fn provides_navigation(&self) -> bool {
        false
    }
}

/// Shared handle to a decorator
pub type DecoratorRef = Rc<dyn Decorator>;

/// The units registered against one capability class
#[derive(Debug, Clone)]
pub struct DecoratorEntry {
    class: CapabilityClass,
    units: Vec<DecoratorRef>,
}

impl DecoratorEntry {
    fn new(class: CapabilityClass) -> Self {
        Self {
            class,
            units: Vec::new(),
        }
    }

    pub fn class(&self) -> CapabilityClass {
        self.class
    }

    pub fn units(&self) -> &[DecoratorRef] {
        &self.units
    }
}

/// Ordered mapping from capability class to decorator units.
///
/// Classes are kept in the order they were first registered and units in
/// the order they were added. Nothing is ever deduplicated: a unit
/// registered twice is applied twice.
#[derive(Debug, Default)]
pub struct DecoratorRegistry {
    entries: Vec<DecoratorEntry>,
}

impl DecoratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, class: CapabilityClass) -> Option<usize> {
        self.entries.iter().position(|entry| entry.class == class)
    }

    /// Append `unit` to the list for `class`
    pub fn register(&mut self, class: CapabilityClass, unit: DecoratorRef) {
        tracing::debug!(?class, unit = unit.name(), "registering decorator");
        self.decorators_mut(class).push(unit);
    }

    /// Mutable list for `class`, created empty on first use
    pub fn decorators_mut(&mut self, class: CapabilityClass) -> &mut Vec<DecoratorRef> {
        let index = match self.position(class) {
            Some(index) => index,
            None => {
                self.entries.push(DecoratorEntry::new(class));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].units
    }

    /// Units registered for exactly `class`
    pub fn decorators(&self, class: CapabilityClass) -> &[DecoratorRef] {
        match self.position(class) {
            Some(index) => &self.entries[index].units,
            None => &[],
        }
    }

    pub fn entries(&self) -> &[DecoratorEntry] {
        &self.entries
    }

    /// Every unit that applies to a wrapper of `node_type`, in apply order
    pub fn units_for(&self, node_type: NodeType) -> Vec<DecoratorRef> {
        self.entries
            .iter()
            .filter(|entry| entry.class.matches(node_type))
            .flat_map(|entry| entry.units.iter().cloned())
            .collect()
    }

    /// Extend `node` with every matching unit and return how many were applied.
    ///
    /// The registry does not remember what it has applied; calling this
    /// again on the same wrapper extends it again.
    pub fn apply<T: XmlTree>(&self, node: &Node<T>) -> usize {
        let units = self.units_for(node.node_type());
        for unit in &units {
            tracing::trace!(unit = unit.name(), node = ?node.handle(), "applying decorator");
            node.extend(Rc::clone(unit));
        }
        units.len()
    }

    /// True once `class` has a unit and its test matches the root kind
    pub fn is_active(&self, class: CapabilityClass, root: NodeType) -> bool {
        class.matches(root) && !self.decorators(class).is_empty()
    }

    /// Total number of registered units across all classes
    pub fn len(&self) -> usize {
        self.entries.iter().map(|entry| entry.units.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
