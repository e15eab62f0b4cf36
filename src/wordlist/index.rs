use crate::error::Result;
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::set::TrieSet;
use crate::wordlist::trie::ternary::TernaryTrie;
use crate::wordlist::trie::trie::TrieMap;

/// Operations every trie variant supports.
///
/// The trait is object safe, so callers can pick a variant at runtime and
/// hold it as `Box<dyn Index<V>>`.
pub trait Index<V> {
    /// Stores `value` under `key` (`None` deletes it) and returns the previous value.
    fn put(&mut self, key: &str, value: Option<V>) -> Result<Option<V>>;
    fn get(&self, key: &str) -> Option<&V>;
    fn delete(&mut self, key: &str) -> Option<V>;
    fn len(&self) -> usize;
    fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str;
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
    fn keys_that_match(&self, pattern: &str) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn keys(&self) -> Vec<String> {
        self.keys_with_prefix("")
    }

    fn keys_with_prefix_with(&self, prefix: &str, config: &SearchConfig) -> Vec<String> {
        let keys = self.keys_with_prefix(prefix).into_iter()
            .filter(|key| config.accepts_length(key.len()));
        match config.max_results {
            Some(max) => keys.take(max).collect(),
            None => keys.collect(),
        }
    }

    fn add_all<'f, I>(&mut self, items: I) -> Result<()>
        where I: IntoIterator<Item=(&'f str, V)>, Self: Sized {
        items.into_iter().try_for_each(|(key, value)| self.put(key, Some(value)).map(|_| ()))
    }
}

impl<V> Index<V> for TrieMap<V> {
    fn put(&mut self, key: &str, value: Option<V>) -> Result<Option<V>> {
        TrieMap::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        TrieMap::get(self, key)
    }

    fn delete(&mut self, key: &str) -> Option<V> {
        TrieMap::delete(self, key)
    }

    fn len(&self) -> usize {
        TrieMap::len(self)
    }

    fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str {
        TrieMap::longest_prefix_of(self, query)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        TrieMap::keys_with_prefix(self, prefix)
    }

    fn keys_that_match(&self, pattern: &str) -> Vec<String> {
        TrieMap::keys_that_match(self, pattern)
    }

    fn keys_with_prefix_with(&self, prefix: &str, config: &SearchConfig) -> Vec<String> {
        TrieMap::keys_with_prefix_with(self, prefix, config)
    }
}

impl<V> Index<V> for TernaryTrie<V> {
    fn put(&mut self, key: &str, value: Option<V>) -> Result<Option<V>> {
        TernaryTrie::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        TernaryTrie::get(self, key)
    }

    fn delete(&mut self, key: &str) -> Option<V> {
        TernaryTrie::delete(self, key)
    }

    fn len(&self) -> usize {
        TernaryTrie::len(self)
    }

    fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str {
        TernaryTrie::longest_prefix_of(self, query)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        TernaryTrie::keys_with_prefix(self, prefix)
    }

    fn keys_that_match(&self, pattern: &str) -> Vec<String> {
        TernaryTrie::keys_that_match(self, pattern)
    }

    fn keys(&self) -> Vec<String> {
        TernaryTrie::keys(self)
    }

    fn keys_with_prefix_with(&self, prefix: &str, config: &SearchConfig) -> Vec<String> {
        TernaryTrie::keys_with_prefix_with(self, prefix, config)
    }
}

/// The set stores unit payloads: `Some(())` marks a key present.
impl Index<()> for TrieSet {
    fn put(&mut self, key: &str, value: Option<()>) -> Result<Option<()>> {
        let was_present = TrieSet::contains(self, key);
        TrieSet::set(self, key, value.is_some())?;
        Ok(was_present.then_some(()))
    }

    fn get(&self, key: &str) -> Option<&()> {
        TrieSet::contains(self, key).then_some(&())
    }

    fn delete(&mut self, key: &str) -> Option<()> {
        TrieSet::remove(self, key).then_some(())
    }

    fn len(&self) -> usize {
        TrieSet::len(self)
    }

    fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str {
        TrieSet::longest_prefix_of(self, query)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        TrieSet::keys_with_prefix(self, prefix)
    }

    fn keys_that_match(&self, pattern: &str) -> Vec<String> {
        TrieSet::keys_that_match(self, pattern)
    }

    fn keys_with_prefix_with(&self, prefix: &str, config: &SearchConfig) -> Vec<String> {
        TrieSet::keys_with_prefix_with(self, prefix, config)
    }
}
