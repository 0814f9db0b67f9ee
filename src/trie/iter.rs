use super::{CHILDREN, Key, Node, Trie};

/// The occupied child slots of a node, paired with the byte that reaches them.
#[derive(Debug, Clone)]
pub struct Bytes<'a, V> {
    base: &'a Node<V>,
    next: usize,
}
const _: () = assert!(
    CHILDREN <= (u8::MAX as usize + 1),
    "Trie children must be addressable by a u8"
);

impl<'a, V> Bytes<'a, V> {
    pub fn new(node: &'a Node<V>) -> Self {
        Self {
            base: node,
            next: 0,
        }
    }
}

impl<'a, V> Iterator for Bytes<'a, V> {
    type Item = (u8, &'a Node<V>);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < CHILDREN {
            let index = self.next;
            self.next += 1;
            if let Some(child) = self.base.children[index].as_deref() {
                return Some((index as u8, child));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.base.child_count))
    }
}

/// Depth-first walk over every stored key and its value.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    root: Option<&'a V>,
    stack: Vec<Bytes<'a, V>>,
    path: Vec<u8>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(trie: &'a Trie<V>) -> Self {
        Self {
            root: trie.root.value.as_ref(),
            stack: vec![trie.root.bytes()],
            path: Vec::new(),
            remaining: trie.len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.root.take() {
            self.remaining -= 1;
            return Some((Vec::new(), value));
        }
        loop {
            match self.stack.last_mut()?.next() {
                Some((byte, child)) => {
                    self.path.push(byte);
                    self.stack.push(child.bytes());
                    if let Some(value) = child.value.as_ref() {
                        self.remaining -= 1;
                        return Some((self.path.clone(), value));
                    }
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// The keys of a [`Trie`], in the same order as [`Iter`].
#[derive(Debug, Clone)]
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(super) fn new(trie: &'a Trie<V>) -> Self {
        Self {
            inner: Iter::new(trie),
        }
    }
}

impl<V> Iterator for Keys<'_, V> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Key, V> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<K: Key, V> Extend<(K, V)> for Trie<V> {
    /// Inserts every pair, skipping keys that do not fit in bytes.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if let Err(err) = self.insert(&key, value) {
                tracing::debug!(%err, "skipping key while extending trie");
            }
        }
    }
}
