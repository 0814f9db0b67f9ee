use super::{CHILDREN, iter::Bytes};
use std::any::type_name;

/// A single vertex of the trie.
///
/// The slot a node sits in within its parent is the byte that leads to it.
/// A node with no value and no children is dead and is never left attached.
pub struct Node<V> {
    pub(super) value: Option<V>,
    pub(super) children: [Option<Box<Node<V>>>; CHILDREN],
    pub(super) child_count: usize,
}

/// Shows the node's own value and the bytes of its occupied slots, not the subtree.
impl<V> core::fmt::Debug for Node<V>
where
    V: core::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(type_name::<Node<V>>())
            .field("value", &self.value)
            .field("child_count", &self.child_count)
            .field("children", &DebugChildren(self))
            .finish()
    }
}

struct DebugChildren<'a, V>(&'a Node<V>);

impl<V> core::fmt::Debug for DebugChildren<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.0.bytes().map(|(byte, _)| byte))
            .finish()
    }
}

/// A subtree copy in progress: the source's remaining children and the copy built so far.
struct Cloning<'a, V> {
    byte: u8,
    children: Bytes<'a, V>,
    node: Node<V>,
}

impl<'a, V: Clone> Cloning<'a, V> {
    fn new(byte: u8, source: &'a Node<V>) -> Self {
        let mut node = Node::new();
        node.value = source.value.clone();
        Cloning {
            byte,
            children: source.bytes(),
            node,
        }
    }
}

impl<V: Clone> Clone for Node<V> {
    // Copies depth-first on an explicit stack, attaching each subtree once it is finished.
    fn clone(&self) -> Self {
        let mut stack: Vec<Cloning<'_, V>> = Vec::new();
        let mut current = Cloning::new(0, self);
        loop {
            if let Some((byte, child)) = current.children.next() {
                stack.push(std::mem::replace(&mut current, Cloning::new(byte, child)));
                continue;
            }
            let Some(mut parent) = stack.pop() else {
                return current.node;
            };
            parent.node.attach(current.byte, current.node);
            current = parent;
        }
    }
}

impl<V: PartialEq> PartialEq for Node<V> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((left, right)) = stack.pop() {
            if left.value != right.value || left.child_count != right.child_count {
                return false;
            }
            for (left, right) in left.children.iter().zip(right.children.iter()) {
                match (left.as_deref(), right.as_deref()) {
                    (Some(left), Some(right)) => stack.push((left, right)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl<V: Eq> Eq for Node<V> {}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Node {
            value: None,
            children: std::array::from_fn(|_| None),
            child_count: 0,
        }
    }
}

impl<V> Drop for Node<V> {
    // Unlinks descendants onto a stack so dropping a long key doesn't recurse once per byte.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<V>>> =
            self.children.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.iter_mut().filter_map(Option::take));
        }
    }
}

impl<V> Node<V> {
    pub(super) fn new() -> Self {
        Node::default()
    }

    /// The value stored for the key ending at this node.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Number of occupied child slots.
    pub fn child_count(&self) -> usize {
        self.child_count
    }

    pub fn child(&self, byte: u8) -> Option<&Node<V>> {
        self.children[byte as usize].as_deref()
    }

    /// Iterates the occupied child slots in ascending byte order.
    pub fn bytes(&self) -> Bytes<'_, V> {
        Bytes::new(self)
    }

    pub(super) fn is_dead(&self) -> bool {
        self.value.is_none() && self.child_count == 0
    }

    pub(super) fn child_mut(&mut self, byte: u8) -> Option<&mut Node<V>> {
        self.children[byte as usize].as_deref_mut()
    }

    pub(super) fn child_or_insert(&mut self, byte: u8) -> &mut Node<V> {
        let slot = &mut self.children[byte as usize];
        if slot.is_none() {
            self.child_count += 1;
            tracing::trace!(byte, "creating trie node");
        }
        slot.get_or_insert_with(|| Box::new(Node::new()))
    }

    pub(super) fn attach(&mut self, byte: u8, child: Node<V>) {
        let slot = &mut self.children[byte as usize];
        debug_assert!(slot.is_none(), "Attached slot should be empty");
        *slot = Some(Box::new(child));
        self.child_count += 1;
    }

    pub(super) fn detach(&mut self, byte: u8) -> Option<Box<Node<V>>> {
        let child = self.children[byte as usize].take();
        if child.is_some() {
            self.child_count -= 1;
        }
        child
    }

    pub(super) fn descend(&self, path: &[u8]) -> Option<&Node<V>> {
        let mut current_node = self;
        for &byte in path {
            current_node = current_node.child(byte)?;
        }
        Some(current_node)
    }

    pub(super) fn descend_mut(&mut self, path: &[u8]) -> Option<&mut Node<V>> {
        let mut current_node = self;
        for &byte in path {
            current_node = current_node.child_mut(byte)?;
        }
        Some(current_node)
    }

    pub(super) fn descend_or_create(&mut self, path: &[u8]) -> &mut Node<V> {
        let mut current_node = self;
        for &byte in path {
            current_node = current_node.child_or_insert(byte);
        }
        current_node
    }
}
