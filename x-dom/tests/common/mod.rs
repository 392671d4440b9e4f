//! In-memory engine used by the x-dom tests
//!
//! Trees are built by hand, and the serializer and namespace outputs are
//! scripted, so tests can check that the node layer passes engine results
//! through untouched.

#![allow(dead_code)]

use std::any::Any;
use std::sync::atomic::{AtomicU32, Ordering};

use x_dom::Decorator;
use xml_tree_traits::{Error, Namespaces, NodeType, Result, XmlTree};

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemHandle {
    tree: u32,
    index: usize,
}

#[derive(Debug)]
struct MemNode {
    node_type: NodeType,
    name: Option<String>,
    value: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
pub struct MemoryTree {
    id: u32,
    nodes: Vec<MemNode>,
    pub serialized: Option<String>,
    pub namespaces: Namespaces,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            serialized: None,
            namespaces: Namespaces::new(),
        }
    }

    fn push(&mut self, node_type: NodeType, name: Option<&str>, value: Option<&str>) -> MemHandle {
        self.nodes.push(MemNode {
            node_type,
            name: name.map(str::to_string),
            value: value.map(str::to_string),
            parent: None,
            children: Vec::new(),
        });
        MemHandle {
            tree: self.id,
            index: self.nodes.len() - 1,
        }
    }

    pub fn add_document(&mut self) -> MemHandle {
        self.push(NodeType::Document, None, None)
    }

    pub fn append(
        &mut self,
        parent: MemHandle,
        node_type: NodeType,
        name: Option<&str>,
        value: Option<&str>,
    ) -> MemHandle {
        let child = self.push(node_type, name, value);
        self.nodes[child.index].parent = Some(parent.index);
        self.nodes[parent.index].children.push(child.index);
        child
    }

    pub fn element(&mut self, parent: MemHandle, name: &str) -> MemHandle {
        self.append(parent, NodeType::Element, Some(name), None)
    }

    pub fn text(&mut self, parent: MemHandle, value: &str) -> MemHandle {
        self.append(parent, NodeType::Text, None, Some(value))
    }

    pub fn comment(&mut self, parent: MemHandle, value: &str) -> MemHandle {
        self.append(parent, NodeType::Comment, None, Some(value))
    }

    /// An element that belongs to no document
    pub fn detached_element(&mut self, name: &str) -> MemHandle {
        self.push(NodeType::Element, Some(name), None)
    }

    fn get(&self, handle: &MemHandle) -> Option<&MemNode> {
        if handle.tree != self.id {
            return None;
        }
        self.nodes.get(handle.index)
    }

    fn handle(&self, index: usize) -> MemHandle {
        MemHandle {
            tree: self.id,
            index,
        }
    }
}

impl XmlTree for MemoryTree {
    type Node = MemHandle;

    fn parse_xml(&mut self, _xml: &str) -> Result<Self::Node> {
        Err(Error::xml_parse("memory tree cannot parse text"))
    }

    fn document_element(&self, doc: &Self::Node) -> Option<Self::Node> {
        self.get(doc)?
            .children
            .iter()
            .copied()
            .find(|&index| self.nodes[index].node_type == NodeType::Element)
            .map(|index| self.handle(index))
    }

    fn document_of(&self, node: &Self::Node) -> Option<Self::Node> {
        self.get(node)?;
        let mut top = node.index;
        while let Some(parent) = self.nodes[top].parent {
            top = parent;
        }
        match self.nodes[top].node_type {
            NodeType::Document => Some(self.handle(top)),
            _ => None,
        }
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        self.get(node)?.parent.map(|index| self.handle(index))
    }

    fn children(&self, node: &Self::Node) -> Vec<Self::Node> {
        match self.get(node) {
            Some(n) => n.children.iter().map(|&index| self.handle(index)).collect(),
            None => Vec::new(),
        }
    }

    fn node_type(&self, node: &Self::Node) -> NodeType {
        self.nodes[node.index].node_type
    }

    fn node_name(&self, node: &Self::Node) -> Option<String> {
        self.get(node)?.name.clone()
    }

    fn node_value(&self, node: &Self::Node) -> Option<String> {
        self.get(node)?.value.clone()
    }

    fn serialize(&self, _node: &Self::Node) -> Result<String> {
        self.serialized
            .clone()
            .ok_or_else(|| Error::serialize("no output scripted"))
    }

    fn collect_namespaces(&self, _node: &Self::Node) -> Result<Namespaces> {
        Ok(self.namespaces.clone())
    }
}

/// `<library><book>Dune</book><book/><!--note--></library>`
pub struct Sample {
    pub tree: MemoryTree,
    pub doc: MemHandle,
    pub root: MemHandle,
    pub first: MemHandle,
    pub second: MemHandle,
    pub title: MemHandle,
    pub note: MemHandle,
}

pub fn sample() -> Sample {
    let mut tree = MemoryTree::new();
    let doc = tree.add_document();
    let root = tree.element(doc, "library");
    let first = tree.element(root, "book");
    let title = tree.text(first, "Dune");
    let second = tree.element(root, "book");
    let note = tree.comment(root, "note");
    Sample {
        tree,
        doc,
        root,
        first,
        second,
        title,
        note,
    }
}

/// Decorator that only carries a name
#[derive(Debug)]
pub struct Tag(pub &'static str);

impl Decorator for Tag {
    fn name(&self) -> &str {
        self.0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn names<T: XmlTree>(node: &x_dom::Node<T>) -> Vec<String> {
    node.decorators()
        .iter()
        .map(|unit| unit.name().to_string())
        .collect()
}
