//! x-dom: identity-stable node wrappers over an external XML engine
//!
//! The engine (anything implementing [`xml_tree_traits::XmlTree`]) parses and
//! serializes. This crate adds two things on top of its raw node handles:
//!
//! - a per-document identity cache, so looking up the same handle twice
//!   always yields the same [`Node`] object;
//! - a per-document decorator registry, so behavior units can be attached to
//!   wrappers by [`CapabilityClass`] without changing the node types.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use x_dom::Document;
//! use xot_tree::XotTree;
//!
//! let doc = Document::parse(XotTree::new(), "<root><item>Hello</item></root>")?;
//! doc.explore();
//! let root = doc.root()?.unwrap();
//! let item = root.explorer().unwrap().child("item")?.unwrap();
//! assert_eq!(item.content()?.as_deref(), Some("Hello"));
//! ```

pub mod cache;
pub mod capability;
pub mod decorator;
pub mod document;
pub mod error;
pub mod explore;
pub mod node;

// Re-export core types
pub use cache::NodeCache;
pub use capability::CapabilityClass;
pub use decorator::{Decorator, DecoratorEntry, DecoratorRef, DecoratorRegistry};
pub use document::{DecorationState, Document};
pub use error::{Error, Result};
pub use explore::{Explorable, Explorer};
pub use node::Node;

pub use xml_tree_traits::{Namespaces, NodeType, XmlTree};
