//! Capability classes used to scope decorators to node kinds

use serde::{Deserialize, Serialize};
use xml_tree_traits::NodeType;

/// Which node wrappers a decorator applies to.
///
/// Classes nest the way the node kinds do: `Node` covers every wrapper and
/// `CharacterData` covers both text and comment nodes. Every other class
/// covers exactly one [`NodeType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityClass {
    /// Any node, including the document itself
    Node,
    /// The document root
    Document,
    /// Element nodes
    Element,
    /// Text and comment nodes
    CharacterData,
    /// Text nodes
    Text,
    /// Comment nodes
    Comment,
    /// Processing instruction nodes
    ProcessingInstruction,
    /// Attribute nodes
    Attribute,
}

impl CapabilityClass {
    /// Test whether a wrapper of the given kind belongs to this class
    pub fn matches(self, node_type: NodeType) -> bool {
        match self {
            CapabilityClass::Node => true,
            CapabilityClass::Document => node_type == NodeType::Document,
            CapabilityClass::Element => node_type == NodeType::Element,
            CapabilityClass::CharacterData => {
                matches!(node_type, NodeType::Text | NodeType::Comment)
            }
            CapabilityClass::Text => node_type == NodeType::Text,
            CapabilityClass::Comment => node_type == NodeType::Comment,
            CapabilityClass::ProcessingInstruction => {
                node_type == NodeType::ProcessingInstruction
            }
            CapabilityClass::Attribute => node_type == NodeType::Attribute,
        }
    }
}
