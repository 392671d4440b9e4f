//! Error types for x-dom

use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A node handle that is not owned by the document was presented
    #[error("Invalid node handle: {0} does not belong to this document")]
    InvalidHandle(String),

    /// The document a wrapper belongs to no longer exists
    #[error("Document has been dropped")]
    DocumentDropped,

    /// The cache or registry is held by a live `node_cache()` or
    /// `decorators()` guard
    #[error("Document {0} is borrowed by an outstanding guard")]
    Borrowed(&'static str),

    /// Failure reported by the XML engine, passed through unchanged
    #[error(transparent)]
    Tree(#[from] xml_tree_traits::Error),
}

impl Error {
    pub(crate) fn invalid_handle<H: Debug>(handle: &H) -> Self {
        Error::InvalidHandle(format!("{:?}", handle))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
