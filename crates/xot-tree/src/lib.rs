//! xot engine for the x-dom node layer
//!
//! Wraps a [`xot::Xot`] arena so it can serve as the external
//! parse/serialize engine behind an x-dom `Document`.

pub mod tree;

// Re-export main types
pub use tree::{XotNode, XotTree};
