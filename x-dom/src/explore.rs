//! The built-in explorable decorator and its navigation view

use std::any::Any;

use xml_tree_traits::{NodeType, XmlTree};

use crate::decorator::Decorator;
use crate::error::Result;
use crate::node::Node;

/// Fluent child-by-name navigation.
///
/// Installed on every node of a document by [`Document::explore`].
///
/// [`Document::explore`]: crate::Document::explore
#[derive(Debug, Clone, Copy, Default)]
pub struct Explorable;

impl Explorable {
    pub const NAME: &'static str = "explorable";
}

impl Decorator for Explorable {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn provides_navigation(&self) -> bool {
        true
    }
}

/// Navigation view over an explorable node
pub struct Explorer<T: XmlTree> {
    node: Node<T>,
}

impl<T: XmlTree> Explorer<T> {
    pub(crate) fn new(node: Node<T>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &Node<T> {
        &self.node
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Result<Option<Node<T>>> {
        first_child_named(&self.node, name)
    }

    /// Every child element with the given name, in document order
    pub fn children_named(&self, name: &str) -> Result<Vec<Node<T>>> {
        let mut found = Vec::new();
        for child in self.node.children()? {
            if is_element_named(&child, name)? {
                found.push(child);
            }
        }
        Ok(found)
    }

    /// Follow `steps` one child element at a time.
    ///
    /// Intermediate nodes do not need to be explorable themselves.
    pub fn path(&self, steps: &[&str]) -> Result<Option<Node<T>>> {
        let mut current = self.node.clone();
        for step in steps {
            match first_child_named(&current, step)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

fn is_element_named<T: XmlTree>(node: &Node<T>, name: &str) -> Result<bool> {
    Ok(node.node_type() == NodeType::Element && node.name()? == name)
}

fn first_child_named<T: XmlTree>(node: &Node<T>, name: &str) -> Result<Option<Node<T>>> {
    for child in node.children()? {
        if is_element_named(&child, name)? {
            return Ok(Some(child));
        }
    }
    Ok(None)
}
