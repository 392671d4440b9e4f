//! Collaborator interface for XML parse/serialize engines.
//!
//! The x-dom node layer never parses or formats XML itself. Everything it
//! needs from an engine goes through the [`XmlTree`] trait defined here.

pub mod error;
pub mod tree;

pub use error::{Error, Result};
pub use tree::{namespace_key, Namespaces, NodeType, XmlTree};
