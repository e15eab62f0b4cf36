use std::fmt::{Debug, Formatter};

use log::trace;

use crate::error::Result;
use crate::wordlist::trie::config::TrieConfig;
use crate::wordlist::trie::iterators::Iter;
use crate::wordlist::trie::node::Node;

/// Map from string keys to values, stored as an R-way trie.
///
/// Every node owns one child slot per alphabet symbol, so lookups index
/// directly and take time proportional to the key length regardless of how
/// many keys are stored. Nodes left without a value and without children are
/// pruned on deletion, so the tree never carries dead subtrees.
///
/// ```
/// use trie_tools::TrieMap;
///
/// let mut trie = TrieMap::new();
/// trie.insert("she", 0).unwrap();
/// trie.insert("shells", 3).unwrap();
/// assert_eq!(trie.get("she"), Some(&0));
/// assert_eq!(trie.longest_prefix_of("shellsort"), "shells");
/// assert_eq!(trie.keys_that_match(".he"), vec!["she"]);
/// ```
#[derive(Clone)]
pub struct TrieMap<V> {
    pub(crate) root: Option<Box<Node<V>>>,
    len: usize,
    pub(crate) config: TrieConfig,
}

impl<V> TrieMap<V> {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        TrieMap { root: None, len: 0, config }
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count())
    }

    /// Associates `value` with `key`, returning the value it replaced.
    ///
    /// `None` removes the key. The empty key is never stored: putting it is a
    /// no-op. Fails without touching the trie when `key` holds a symbol
    /// outside the alphabet.
    pub fn put(&mut self, key: &str, value: Option<V>) -> Result<Option<V>> {
        if key.is_empty() {
            return Ok(None);
        }
        let value = match value {
            Some(value) => value,
            None => return Ok(self.delete(key)),
        };
        let path = self.config.alphabet.encode(key)?;
        let radix = self.config.alphabet.len();

        let mut node: &mut Node<V> = self.root.get_or_insert_with(|| Box::new(Node::new(radix)));
        for &ordinal in &path {
            node = node.get_or_create_child(ordinal);
        }
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        self.put(key, Some(value))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        if key.is_empty() {
            return None;
        }
        self.get_node(key)?.value.as_ref()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if key.is_empty() {
            return None;
        }
        let alphabet = &self.config.alphabet;
        let mut node = self.root.as_deref_mut()?;
        for symbol in key.bytes() {
            node = node.child_mut(alphabet.index_of(symbol)?)?;
        }
        node.value.as_mut()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, pruning every node the removal leaves empty.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        if key.is_empty() {
            return None;
        }
        let path = self.config.alphabet.encode(key).ok()?;
        let root = self.root.as_deref_mut()?;
        let (removed, dead) = Self::delete_at(root, &path);
        if dead {
            trace!("pruning empty root");
            self.root = None;
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Returns the removed value and whether `node` is now dead weight.
    fn delete_at(node: &mut Node<V>, path: &[usize]) -> (Option<V>, bool) {
        let removed = match path.split_first() {
            None => node.value.take(),
            Some((&ordinal, rest)) => {
                let (removed, dead) = match node.child_mut(ordinal) {
                    Some(child) => Self::delete_at(child, rest),
                    None => (None, false),
                };
                if dead {
                    trace!("pruning child {} at depth {}", ordinal, rest.len());
                    node.children[ordinal] = None;
                }
                removed
            }
        };
        (removed, node.is_dead())
    }

    /// The node reached by spelling `key` from the root; the root itself for "".
    pub(crate) fn get_node(&self, key: &str) -> Option<&Node<V>> {
        let alphabet = &self.config.alphabet;
        let mut node = self.root.as_deref()?;
        for symbol in key.bytes() {
            node = node.child(alphabet.index_of(symbol)?)?;
        }
        Some(node)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.config.alphabet, self.root.as_deref(), self.len)
    }

    pub fn add_all<'f, I>(&mut self, items: I) -> Result<()>
        where I: IntoIterator<Item=(&'f str, V)> {
        items.into_iter().try_for_each(|(key, value)| self.insert(key, value).map(|_| ()))
    }
}

impl<V> Default for TrieMap<V> {
    fn default() -> Self {
        TrieMap::new()
    }
}

impl<'a, V> IntoIterator for &'a TrieMap<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Debug> Debug for TrieMap<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
