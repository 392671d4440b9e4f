//! XmlTree implementation for xot

use std::sync::atomic::{AtomicU64, Ordering};

use xml_tree_traits::{
    error::{Error, Result},
    tree::{namespace_key, Namespaces, NodeType, XmlTree},
};
use xot::{Node, ValueType, Xot};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a node inside a particular [`XotTree`].
///
/// A bare `xot::Node` is only an index into one arena, so the owning tree id
/// is carried alongside it. A handle from another tree never aliases a node
/// of this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XotNode {
    tree: u64,
    node: Node,
}

impl XotNode {
    /// The raw xot node
    pub fn node(&self) -> Node {
        self.node
    }
}

/// Wrapper around Xot that implements XmlTree trait
#[derive(Debug)]
pub struct XotTree {
    id: u64,
    xot: Xot,
}

impl XotTree {
    /// Create a new XotTree
    pub fn new() -> Self {
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            xot: Xot::new(),
        }
    }

    /// Get a reference to the underlying Xot
    pub fn xot(&self) -> &Xot {
        &self.xot
    }

    /// Get a mutable reference to the underlying Xot
    pub fn xot_mut(&mut self) -> &mut Xot {
        &mut self.xot
    }

    /// Tag a raw xot node from this tree as a handle
    pub fn handle(&self, node: Node) -> XotNode {
        XotNode { tree: self.id, node }
    }

    fn owns(&self, node: &XotNode) -> bool {
        node.tree == self.id
    }
}

impl Default for XotTree {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlTree for XotTree {
    type Node = XotNode;

    fn parse_xml(&mut self, xml: &str) -> Result<Self::Node> {
        let doc = self
            .xot
            .parse(xml)
            .map_err(|e| Error::XmlParse(e.to_string()))?;
        Ok(self.handle(doc))
    }

    fn document_element(&self, doc: &Self::Node) -> Option<Self::Node> {
        if !self.owns(doc) {
            return None;
        }
        self.xot
            .children(doc.node)
            .find(|child| self.xot.is_element(*child))
            .map(|node| self.handle(node))
    }

    fn document_of(&self, node: &Self::Node) -> Option<Self::Node> {
        if !self.owns(node) {
            return None;
        }
        let mut top = node.node;
        while let Some(parent) = self.xot.parent(top) {
            top = parent;
        }
        match self.xot.value_type(top) {
            ValueType::Document => Some(self.handle(top)),
            _ => None,
        }
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        if !self.owns(node) {
            return None;
        }
        self.xot.parent(node.node).map(|p| self.handle(p))
    }

    fn children(&self, node: &Self::Node) -> Vec<Self::Node> {
        if !self.owns(node) {
            return Vec::new();
        }
        self.xot
            .children(node.node)
            .map(|child| self.handle(child))
            .collect()
    }

    fn node_type(&self, node: &Self::Node) -> NodeType {
        match self.xot.value_type(node.node) {
            ValueType::Document => NodeType::Document,
            ValueType::Element => NodeType::Element,
            ValueType::Text => NodeType::Text,
            ValueType::Comment => NodeType::Comment,
            ValueType::ProcessingInstruction => NodeType::ProcessingInstruction,
            ValueType::Attribute => NodeType::Attribute,
            ValueType::Namespace => NodeType::Namespace,
        }
    }

    fn node_name(&self, node: &Self::Node) -> Option<String> {
        match self.xot.value(node.node) {
            xot::Value::Element(element) => {
                Some(self.xot.local_name_str(element.name()).to_string())
            }
            xot::Value::Attribute(attr) => Some(self.xot.local_name_str(attr.name()).to_string()),
            xot::Value::ProcessingInstruction(pi) => {
                Some(self.xot.local_name_str(pi.target()).to_string())
            }
            _ => None,
        }
    }

    fn node_value(&self, node: &Self::Node) -> Option<String> {
        match self.xot.value(node.node) {
            xot::Value::Text(text) => Some(text.get().to_string()),
            xot::Value::Comment(comment) => Some(comment.get().to_string()),
            xot::Value::ProcessingInstruction(pi) => pi.data().map(|d| d.to_string()),
            xot::Value::Attribute(attr) => Some(attr.value().to_string()),
            xot::Value::Element(_) => Some(
                self.xot
                    .descendants(node.node)
                    .filter_map(|n| self.xot.text_str(n))
                    .collect(),
            ),
            _ => None,
        }
    }

    fn serialize(&self, node: &Self::Node) -> Result<String> {
        if !self.owns(node) {
            return Err(Error::node_access("node belongs to another tree"));
        }
        self.xot
            .to_string(node.node)
            .map_err(|e| Error::Serialize(e.to_string()))
    }

    fn collect_namespaces(&self, node: &Self::Node) -> Result<Namespaces> {
        if !self.owns(node) {
            return Err(Error::node_access("node belongs to another tree"));
        }
        let mut namespaces = Namespaces::new();
        for element in self.xot.descendants(node.node) {
            if !self.xot.is_element(element) {
                continue;
            }
            for (prefix, namespace) in self.xot.namespaces(element).iter() {
                namespaces.insert(
                    namespace_key(self.xot.prefix_str(prefix)),
                    self.xot.namespace_str(*namespace).to_string(),
                );
            }
        }
        Ok(namespaces)
    }
}
