use std::fmt::{Debug, Formatter};

use crate::wordlist::trie::iterators::Children;

/// One level of an R-way trie: a slot per alphabet ordinal plus an optional payload.
#[derive(Clone)]
pub(crate) struct Node<V> {
    pub(crate) value: Option<V>,
    pub(crate) children: Box<[Option<Box<Node<V>>>]>,
}

impl<V> Node<V> {
    pub(crate) fn new(radix: usize) -> Node<V> {
        Node {
            value: None,
            children: (0..radix).map(|_| None).collect(),
        }
    }

    pub(crate) fn child(&self, ordinal: usize) -> Option<&Node<V>> {
        self.children[ordinal].as_deref()
    }

    pub(crate) fn child_mut(&mut self, ordinal: usize) -> Option<&mut Node<V>> {
        self.children[ordinal].as_deref_mut()
    }

    pub(crate) fn get_or_create_child(&mut self, ordinal: usize) -> &mut Node<V> {
        let radix = self.children.len();
        self.children[ordinal].get_or_insert_with(|| Box::new(Node::new(radix)))
    }

    /// Live children in ascending ordinal order.
    pub(crate) fn children(&self) -> Children<'_, V> {
        Children::new(&self.children)
    }

    /// A node with no payload and no children carries no key and must be pruned.
    pub(crate) fn is_dead(&self) -> bool {
        self.value.is_none() && self.children.iter().all(Option::is_none)
    }

    pub(crate) fn count(&self) -> usize {
        1 + self.children().map(|(_, child)| child.count()).sum::<usize>()
    }
}

impl<V> Debug for Node<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("terminal", &self.value.is_some())
            .field("children", &self.children().map(|(ordinal, _)| ordinal).collect::<Vec<_>>())
            .finish()
    }
}
