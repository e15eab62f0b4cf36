use std::iter::Enumerate;
use std::slice;

use crate::alphabet::Alphabet;
use crate::wordlist::trie::node::Node;

/// Cursor over the occupied child slots of an R-way node.
#[derive(Debug)]
pub(crate) struct Children<'a, V> {
    slots: Enumerate<slice::Iter<'a, Option<Box<Node<V>>>>>,
}

impl<'a, V> Children<'a, V> {
    pub(crate) fn new(slots: &'a [Option<Box<Node<V>>>]) -> Self {
        Children { slots: slots.iter().enumerate() }
    }
}

impl<'a, V> Iterator for Children<'a, V> {
    type Item = (usize, &'a Node<V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|(ordinal, slot)| slot.as_deref().map(|child| (ordinal, child)))
    }
}

/// Pre-order iterator over the entries of a [`TrieMap`](crate::TrieMap),
/// yielding keys in the same order as `keys()`.
pub struct Iter<'a, V> {
    alphabet: &'a Alphabet,
    pending: Option<&'a Node<V>>,
    stack: Vec<Children<'a, V>>,
    path: Vec<u8>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(alphabet: &'a Alphabet, root: Option<&'a Node<V>>, len: usize) -> Self {
        Iter { alphabet, pending: root, stack: vec![], path: vec![], remaining: len }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.pending.take() {
                self.stack.push(node.children());
                if let Some(value) = node.value.as_ref() {
                    self.remaining -= 1;
                    return Some((String::from_utf8_lossy(&self.path).into_owned(), value));
                }
                continue;
            }
            let cursor = self.stack.last_mut()?;
            match cursor.next() {
                Some((ordinal, child)) => {
                    self.path.push(self.alphabet.symbol(ordinal));
                    self.pending = Some(child);
                }
                None => {
                    // the exhausted node's own symbol is the last one on the path
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

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}
