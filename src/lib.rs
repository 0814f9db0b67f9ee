//! A dictionary keyed by byte strings.
//!
//! [`Trie`] branches on one byte of the key per level, so every key is a path
//! of nodes from the root. Keys are anything implementing [`Key`]; each code
//! unit of a key must fit in a byte or the key is rejected with
//! [`Error::InvalidKey`].

mod error;
pub mod trie;

pub use error::{Error, Result};
pub use trie::{Key, Node, Trie};
