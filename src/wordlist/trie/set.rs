use std::fmt::{Debug, Formatter};

use delegate::delegate;

use crate::error::Result;
use crate::wordlist::trie::config::TrieConfig;
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::trie::TrieMap;

/// Set of strings stored as an R-way trie.
///
/// Nodes carry a terminal flag instead of a value; otherwise insertion,
/// pruning and every query behave exactly as in [`TrieMap`].
#[derive(Clone, Default)]
pub struct TrieSet {
    map: TrieMap<()>,
}

impl TrieSet {
    pub fn new() -> Self {
        TrieSet { map: TrieMap::new() }
    }

    pub fn with_config(config: TrieConfig) -> Self {
        TrieSet { map: TrieMap::with_config(config) }
    }

    /// Adds `key`, returning whether it was not already present.
    pub fn add(&mut self, key: &str) -> Result<bool> {
        Ok(!key.is_empty() && self.map.insert(key, ())?.is_none())
    }

    /// Marks `key` present or absent; clearing the flag deletes the key.
    pub fn set(&mut self, key: &str, present: bool) -> Result<()> {
        self.map.put(key, present.then_some(())).map(|_| ())
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.map.delete(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item=String> + '_ {
        self.map.iter().map(|(key, _)| key)
    }

    pub fn add_all<'f, I>(&mut self, items: I) -> Result<()>
        where I: IntoIterator<Item=&'f str> {
        items.into_iter().try_for_each(|key| self.add(key).map(|_| ()))
    }

    delegate! {
        to self.map {
            pub fn config(&self) -> &TrieConfig;
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn clear(&mut self);
            pub fn node_count(&self) -> usize;
            pub fn contains(&self, key: &str) -> bool;
            pub fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str;
            pub fn keys(&self) -> Vec<String>;
            pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
            pub fn keys_with_prefix_with(&self, prefix: &str, config: &SearchConfig) -> Vec<String>;
            pub fn keys_that_match(&self, pattern: &str) -> Vec<String>;
            pub fn keys_that_match_with(&self, pattern: &str, config: &SearchConfig) -> Vec<String>;
            pub fn par_keys_that_match(&self, pattern: &str) -> Vec<String>;
        }
    }
}

impl Debug for TrieSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
