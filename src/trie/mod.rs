pub mod iter;
mod keys;
mod node;

use crate::{Error, Result};
use iter::{Iter, Keys};
use keys::KeyBytes;
pub use node::Node;
use std::{
    collections::HashSet,
    ops::{Index, IndexMut},
};

/// Anything that can address a [`Trie`].
///
/// A key is a sequence of code units. Every unit must lie in `0..=255` to be
/// stored; wider units are rejected rather than transcoded.
pub trait Key {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_;
}

const CHILDREN: usize = 256;

/// A map from byte strings to `V`, one trie level per byte.
#[derive(Clone, PartialEq, Eq)]
pub struct Trie<V> {
    root: Node<V>,
    len: usize,
}

impl<V: core::fmt::Debug> core::fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Trie {
            root: Node::new(),
            len: 0,
        }
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Number of keys holding a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The node every key path starts from. It holds the value of the empty key.
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Drops every key, keeping the root.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.len = 0;
    }

    /// Returns whether `key` holds a value.
    ///
    /// Unlike [`Trie::get`], a key with a unit that doesn't fit in a byte is
    /// reported as absent instead of as an error.
    pub fn contains<Q: Key + ?Sized>(&self, key: &Q) -> bool {
        let mut current_node = &self.root;
        for unit in key.as_units() {
            let next = u8::try_from(unit)
                .ok()
                .and_then(|byte| current_node.child(byte));
            match next {
                Some(child) => current_node = child,
                None => return false,
            }
        }
        current_node.value.is_some()
    }

    pub fn get<Q: Key + ?Sized>(&self, key: &Q) -> Result<&V> {
        let path = key.to_bytes()?;
        self.root
            .descend(&path)
            .and_then(Node::value)
            .ok_or(Error::KeyNotFound)
    }

    pub fn get_mut<Q: Key + ?Sized>(&mut self, key: &Q) -> Result<&mut V> {
        let path = key.to_bytes()?;
        self.root
            .descend_mut(&path)
            .and_then(|node| node.value.as_mut())
            .ok_or(Error::KeyNotFound)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// The whole key is checked before any node is created, so a rejected key
    /// leaves the trie untouched.
    pub fn insert<Q: Key + ?Sized>(&mut self, key: &Q, value: V) -> Result<Option<V>> {
        let path = key.to_bytes()?;
        let previous = self.root.descend_or_create(&path).value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Returns the value under `key`, storing `default()` first if there is none.
    pub fn get_or_insert_with<Q: Key + ?Sized>(
        &mut self,
        key: &Q,
        default: impl FnOnce() -> V,
    ) -> Result<&mut V> {
        let path = key.to_bytes()?;
        // `default` runs before any node is created.
        let value = match self.root.descend(&path).and_then(Node::value) {
            Some(_) => None,
            None => Some(default()),
        };
        let slot = &mut self.root.descend_or_create(&path).value;
        match value {
            Some(value) => {
                self.len += 1;
                Ok(slot.insert(value))
            }
            None => Ok(slot
                .as_mut()
                .expect("Value should still be present after the lookup found it")),
        }
    }

    /// Takes the value under `key` and prunes every node left without a value or children.
    pub fn remove<Q: Key + ?Sized>(&mut self, key: &Q) -> Result<V> {
        let path = key.to_bytes()?;

        // Depth of the deepest node on the path that survives the removal.
        let mut keep = 0;
        let mut current_node = &self.root;
        for (depth, &byte) in path.iter().enumerate() {
            if current_node.value.is_some() || current_node.child_count > 1 {
                keep = depth;
            }
            current_node = current_node.child(byte).ok_or(Error::KeyNotFound)?;
        }
        if current_node.value.is_none() {
            return Err(Error::KeyNotFound);
        }

        let value = if path.is_empty() || current_node.child_count > 0 {
            self.root
                .descend_mut(&path)
                .and_then(|node| node.value.take())
                .expect("Value should be present at the end of a matched path")
        } else {
            let parent = self
                .root
                .descend_mut(&path[..keep])
                .expect("Surviving ancestor should lie on the matched path");
            let mut branch = parent
                .detach(path[keep])
                .expect("Dead branch should hang off the surviving ancestor");
            for &byte in &path[keep + 1..] {
                branch = branch
                    .detach(byte)
                    .expect("Dead branch should follow the matched path");
            }
            tracing::trace!(
                depth = keep,
                pruned = path.len() - keep,
                "pruned dead branch"
            );
            let value = branch
                .value
                .take()
                .expect("Value should be present at the end of a matched path");
            debug_assert!(branch.is_dead());
            value
        };

        self.len -= 1;
        Ok(value)
    }

    /// Every key holding a value.
    #[must_use]
    pub fn key_set(&self) -> HashSet<Vec<u8>> {
        self.keys().collect()
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }
}

impl<V, Q: Key + ?Sized> Index<&Q> for Trie<V> {
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("Failed to index trie: {err}"),
        }
    }
}

impl<V: Default, Q: Key + ?Sized> IndexMut<&Q> for Trie<V> {
    /// Inserts `V::default()` when `key` is absent, so `trie[key] = value` stores.
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        match self.get_or_insert_with(key, V::default) {
            Ok(value) => value,
            Err(err) => panic!("Failed to index trie: {err}"),
        }
    }
}
