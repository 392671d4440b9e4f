//! XML tree abstraction trait

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Namespace declarations keyed by `xmlns` / `xmlns:<prefix>`
pub type Namespaces = BTreeMap<String, String>;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node
    Element,
    /// Attribute node
    Attribute,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Processing instruction node
    ProcessingInstruction,
    /// Namespace node
    Namespace,
}

/// Build the declaration key used in [`Namespaces`] for a prefix.
///
/// The empty prefix is the default namespace and maps to plain `xmlns`.
pub fn namespace_key(prefix: &str) -> String {
    if prefix.is_empty() {
        "xmlns".to_string()
    } else {
        format!("xmlns:{}", prefix)
    }
}

/// Trait for XML tree implementations.
///
/// This is the whole surface the node layer needs from a parsing engine.
/// Nodes are plain handles into a tree owned by the implementation; the
/// engine is free to hand out the same handle value any number of times.
pub trait XmlTree {
    /// Type representing a node handle in this tree
    type Node: Copy + Eq + Hash + Debug;

    /// Parse XML from a string and return the document node
    fn parse_xml(&mut self, xml: &str) -> Result<Self::Node>;

    /// Get the document element (root element) of a document, if it has one
    fn document_element(&self, doc: &Self::Node) -> Option<Self::Node>;

    /// Get the document node that owns `node`.
    ///
    /// Returns `None` for handles issued by a different tree and for nodes
    /// that are not attached to any document. Must not panic on foreign
    /// handles.
    fn document_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Get the parent of a node, if it has one
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Get all children of a node
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Get the type of a node
    fn node_type(&self, node: &Self::Node) -> NodeType;

    /// Get the name of a node (if applicable).
    ///
    /// For elements and attributes this is the local name, without prefix.
    fn node_name(&self, node: &Self::Node) -> Option<String>;

    /// Get the text content/value of a node
    fn node_value(&self, node: &Self::Node) -> Option<String>;

    /// Serialize a node and its subtree to an XML string
    fn serialize(&self, node: &Self::Node) -> Result<String>;

    /// Collect the namespace declarations of `node` and every element below it.
    ///
    /// Declarations are visited in document order; a later declaration with
    /// the same key replaces an earlier one.
    fn collect_namespaces(&self, node: &Self::Node) -> Result<Namespaces>;
}
