use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

use derive_new::new;
use log::trace;

use crate::error::Result;
use crate::wordlist::trie::config::TrieConfig;
use crate::wordlist::trie::search::{compile_pattern, PatternSymbol, Results};
use crate::wordlist::trie::searchconfig::SearchConfig;

type Link<V> = Option<Box<TernaryNode<V>>>;

#[derive(new, Clone)]
struct TernaryNode<V> {
    /// Alphabet ordinal of the symbol this node compares against.
    symbol: usize,
    #[new(default)]
    value: Option<V>,
    #[new(default)]
    less: Link<V>,
    #[new(default)]
    equal: Link<V>,
    #[new(default)]
    greater: Link<V>,
}

impl<V> TernaryNode<V> {
    /// No key ends here or passes through here.
    fn is_dead(&self) -> bool {
        self.value.is_none() && self.equal.is_none()
    }

    /// Detaches this node from its less/greater search tree, returning the
    /// subtree that takes its place.
    fn unlink(mut self: Box<Self>) -> Link<V> {
        match (self.less.take(), self.greater.take()) {
            (None, None) => None,
            (Some(less), None) => Some(less),
            (None, Some(greater)) => Some(greater),
            (Some(less), Some(greater)) => {
                let (mut successor, rest) = greater.take_min();
                successor.less = Some(less);
                successor.greater = rest;
                Some(successor)
            }
        }
    }

    /// Splits off the smallest node of this search tree.
    fn take_min(mut self: Box<Self>) -> (Box<Self>, Link<V>) {
        match self.less.take() {
            None => {
                let rest = self.greater.take();
                (self, rest)
            }
            Some(less) => {
                let (min, rest) = less.take_min();
                self.less = rest;
                (min, Some(self))
            }
        }
    }

    fn count(&self) -> usize {
        [&self.less, &self.equal, &self.greater].iter()
            .filter_map(|link| link.as_deref())
            .map(TernaryNode::count)
            .sum::<usize>() + 1
    }
}

/// Map from string keys to values, stored as a ternary search trie.
///
/// Each node holds a single symbol and branches three ways by comparison, so
/// memory grows with the number of stored symbols rather than with the
/// alphabet size. Prefer it over [`TrieMap`](crate::TrieMap) for large or
/// sparse alphabets. Keys come back in ascending alphabet order.
#[derive(Clone)]
pub struct TernaryTrie<V> {
    root: Link<V>,
    len: usize,
    config: TrieConfig,
}

impl<V> TernaryTrie<V> {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        TernaryTrie { root: None, len: 0, config }
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

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count())
    }

    /// Associates `value` with `key`, returning the value it replaced. `None`
    /// removes the key and the empty key is ignored, as for `TrieMap::put`.
    pub fn put(&mut self, key: &str, value: Option<V>) -> Result<Option<V>> {
        if key.is_empty() {
            return Ok(None);
        }
        let value = match value {
            Some(value) => value,
            None => return Ok(self.delete(key)),
        };
        let path = self.config.alphabet.encode(key)?;

        let mut link = &mut self.root;
        let mut d = 0;
        let previous = loop {
            let symbol = path[d];
            let node = link.get_or_insert_with(|| Box::new(TernaryNode::new(symbol)));
            match symbol.cmp(&node.symbol) {
                Ordering::Less => link = &mut node.less,
                Ordering::Greater => link = &mut node.greater,
                Ordering::Equal if d + 1 < path.len() => {
                    d += 1;
                    link = &mut node.equal;
                }
                Ordering::Equal => break node.value.replace(value),
            }
        };
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        self.put(key, Some(value))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_node(key)?.value.as_ref()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let path = self.config.alphabet.encode(key).ok()?;
        if path.is_empty() {
            return None;
        }
        let mut node = self.root.as_deref_mut()?;
        let mut d = 0;
        loop {
            match path[d].cmp(&node.symbol) {
                Ordering::Less => node = node.less.as_deref_mut()?,
                Ordering::Greater => node = node.greater.as_deref_mut()?,
                Ordering::Equal if d + 1 < path.len() => {
                    d += 1;
                    node = node.equal.as_deref_mut()?;
                }
                Ordering::Equal => return node.value.as_mut(),
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The node holding the last symbol of `key`.
    fn get_node(&self, key: &str) -> Option<&TernaryNode<V>> {
        let path = self.config.alphabet.encode(key).ok()?;
        if path.is_empty() {
            return None;
        }
        let mut node = self.root.as_deref()?;
        let mut d = 0;
        loop {
            match path[d].cmp(&node.symbol) {
                Ordering::Less => node = node.less.as_deref()?,
                Ordering::Greater => node = node.greater.as_deref()?,
                Ordering::Equal if d + 1 < path.len() => {
                    d += 1;
                    node = node.equal.as_deref()?;
                }
                Ordering::Equal => return Some(node),
            }
        }
    }

    /// Removes `key`. Every node left with neither a value nor an equal child
    /// is unlinked, so no dead nodes stay reachable.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let path = self.config.alphabet.encode(key).ok()?;
        if path.is_empty() {
            return None;
        }
        let removed = Self::delete_at(&mut self.root, &path, 0);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn delete_at(link: &mut Link<V>, path: &[usize], d: usize) -> Option<V> {
        let node = link.as_deref_mut()?;
        let removed = match path[d].cmp(&node.symbol) {
            Ordering::Less => Self::delete_at(&mut node.less, path, d),
            Ordering::Greater => Self::delete_at(&mut node.greater, path, d),
            Ordering::Equal if d + 1 < path.len() => Self::delete_at(&mut node.equal, path, d + 1),
            Ordering::Equal => node.value.take(),
        };
        if node.is_dead() {
            if let Some(dead) = link.take() {
                trace!("unlinking node for ordinal {} at depth {}", dead.symbol, d);
                *link = dead.unlink();
            }
        }
        removed
    }

    /// The longest stored key that is a prefix of `query`, or "" if there is none.
    pub fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str {
        let alphabet = &self.config.alphabet;
        let query_bytes = query.as_bytes();
        let mut length = 0;
        let mut link = self.root.as_deref();
        let mut i = 0;
        while let (Some(node), true) = (link, i < query_bytes.len()) {
            let symbol = match alphabet.index_of(query_bytes[i]) {
                Some(symbol) => symbol,
                None => break,
            };
            match symbol.cmp(&node.symbol) {
                Ordering::Less => link = node.less.as_deref(),
                Ordering::Greater => link = node.greater.as_deref(),
                Ordering::Equal => {
                    i += 1;
                    if node.value.is_some() {
                        length = i;
                    }
                    link = node.equal.as_deref();
                }
            }
        }
        query.get(..length).unwrap_or("")
    }

    /// All keys in ascending alphabet order.
    pub fn keys(&self) -> Vec<String> {
        self.keys_with_prefix_with("", &SearchConfig::default())
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.keys_with_prefix_with(prefix, &SearchConfig::default())
    }

    pub fn keys_with_prefix_with(&self, prefix: &str, config: &SearchConfig) -> Vec<String> {
        let mut results = Results::new(config);
        if prefix.is_empty() {
            self.collect(self.root.as_deref(), &mut vec![], &mut results);
        } else if let Some(node) = self.get_node(prefix) {
            if node.value.is_some() {
                results.push(prefix.as_bytes());
            }
            if results.descends_below(prefix.len()) {
                self.collect(node.equal.as_deref(), &mut prefix.as_bytes().to_vec(), &mut results);
            }
        }
        results.into_vec()
    }

    /// In-order walk: smaller siblings, this node's key, its extensions, larger siblings.
    fn collect(&self, link: Option<&TernaryNode<V>>, path: &mut Vec<u8>, results: &mut Results) {
        let node = match link {
            Some(node) if !results.is_full() => node,
            _ => return,
        };
        self.collect(node.less.as_deref(), path, results);
        path.push(self.config.alphabet.symbol(node.symbol));
        if node.value.is_some() {
            results.push(path);
        }
        if results.descends_below(path.len()) {
            self.collect(node.equal.as_deref(), path, results);
        }
        path.pop();
        self.collect(node.greater.as_deref(), path, results);
    }

    pub fn keys_that_match(&self, pattern: &str) -> Vec<String> {
        self.keys_that_match_with(pattern, &SearchConfig::default())
    }

    pub fn keys_that_match_with(&self, pattern: &str, config: &SearchConfig) -> Vec<String> {
        let mut results = Results::new(config);
        if let Some(pattern) = compile_pattern(&self.config, pattern) {
            if !pattern.is_empty() {
                self.collect_match(self.root.as_deref(), &mut vec![], &pattern, 0, &mut results);
            }
        }
        results.into_vec()
    }

    fn collect_match(&self, link: Option<&TernaryNode<V>>, path: &mut Vec<u8>,
                     pattern: &[PatternSymbol], i: usize, results: &mut Results) {
        let node = match link {
            Some(node) if !results.is_full() => node,
            _ => return,
        };
        // None stands for the wildcard, which sits on every side of the node
        let ordering = match pattern[i] {
            PatternSymbol::Any => None,
            PatternSymbol::Symbol(symbol) => Some(symbol.cmp(&node.symbol)),
        };
        if ordering.map_or(true, Ordering::is_lt) {
            self.collect_match(node.less.as_deref(), path, pattern, i, results);
        }
        if ordering.map_or(true, Ordering::is_eq) {
            path.push(self.config.alphabet.symbol(node.symbol));
            if i + 1 == pattern.len() {
                if node.value.is_some() {
                    results.push(path);
                }
            } else {
                self.collect_match(node.equal.as_deref(), path, pattern, i + 1, results);
            }
            path.pop();
        }
        if ordering.map_or(true, Ordering::is_gt) {
            self.collect_match(node.greater.as_deref(), path, pattern, i, results);
        }
    }

    pub fn add_all<'f, I>(&mut self, items: I) -> Result<()>
        where I: IntoIterator<Item=(&'f str, V)> {
        items.into_iter().try_for_each(|(key, value)| self.insert(key, value).map(|_| ()))
    }
}

impl<V> Default for TernaryTrie<V> {
    fn default() -> Self {
        TernaryTrie::new()
    }
}

impl<V: Debug> Debug for TernaryTrie<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.keys().into_iter().filter_map(|key| self.get(&key).map(|value| (key, value))))
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use crate::alphabet::Alphabet;
    use crate::error::TrieError;
    use crate::wordlist::trie::config::TrieConfig;
    use crate::wordlist::trie::searchconfig::SearchConfig;
    use crate::wordlist::trie::ternary::{TernaryNode, TernaryTrie};

    const DATA: [&str; 8] = ["she", "sells", "sea", "shells", "by", "the", "sea", "shore"];

    fn sample() -> TernaryTrie<usize> {
        let mut trie = TernaryTrie::new();
        for (i, word) in DATA.iter().enumerate() {
            trie.insert(word, i).unwrap();
        }
        trie
    }

    fn has_dead_node<V>(link: Option<&TernaryNode<V>>) -> bool {
        match link {
            None => false,
            Some(node) => node.is_dead()
                || has_dead_node(node.less.as_deref())
                || has_dead_node(node.equal.as_deref())
                || has_dead_node(node.greater.as_deref()),
        }
    }

    #[test]
    fn finds_words_in_trie() {
        let trie = sample();
        assert_eq!(trie.len(), 7);
        assert_eq!(trie.get("by"), Some(&4));
        assert_eq!(trie.get("sea"), Some(&6));
        assert_eq!(trie.get("sells"), Some(&1));
        assert_eq!(trie.get("she"), Some(&0));
        assert_eq!(trie.get("shells"), Some(&3));
        assert_eq!(trie.get("shore"), Some(&7));
        assert_eq!(trie.get("the"), Some(&5));
        assert_eq!(trie.get("null"), None);
        assert_eq!(trie.get("sh"), None);
        assert_eq!(trie.get(""), None);
    }

    #[test]
    fn overwrite_does_not_double_count() {
        let mut trie = TernaryTrie::new();
        assert_eq!(trie.insert("sea", 2).unwrap(), None);
        assert_eq!(trie.insert("sea", 6).unwrap(), Some(2));
        assert_eq!(trie.len(), 1);
        *trie.get_mut("sea").unwrap() += 1;
        assert_eq!(trie.get("sea"), Some(&7));
    }

    #[test]
    fn empty_key_is_ignored() {
        let mut trie = TernaryTrie::new();
        trie.insert("", 1).unwrap();
        assert!(!trie.contains(""));
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
    }

    #[test]
    fn is_empty() {
        let mut trie = TernaryTrie::new();
        assert!(trie.is_empty());
        trie.insert("a", ()).unwrap();
        assert!(!trie.is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let trie = sample();
        assert_eq!(trie.keys(), vec!["by", "sea", "sells", "she", "shells", "shore", "the"]);
        assert_eq!(trie.keys_with_prefix(""), trie.keys());
    }

    #[test]
    fn keys_with_prefix() {
        let trie = sample();
        assert_eq!(trie.keys_with_prefix("shor"), vec!["shore"]);
        assert_eq!(trie.keys_with_prefix("she"), vec!["she", "shells"]);
        assert_eq!(trie.keys_with_prefix("s"), vec!["sea", "sells", "she", "shells", "shore"]);
        assert!(trie.keys_with_prefix("kare").is_empty());
        assert_eq!(trie.keys_with_prefix_with("s", &SearchConfig::with_max_results(2)), vec!["sea", "sells"]);
    }

    #[test]
    fn keys_that_match() {
        let trie = sample();
        assert_eq!(trie.keys_that_match(".he.l."), vec!["shells"]);
        assert_eq!(trie.keys_that_match(".he"), vec!["she", "the"]);
        assert!(trie.keys_that_match("").is_empty());
        assert!(trie.keys_that_match("sh").is_empty());
    }

    #[test]
    fn keys_that_match_explores_greater_siblings() {
        // "the" and "by" hang off the greater and less sides of the root 's'
        let trie = sample();
        assert_eq!(trie.keys_that_match("the"), vec!["the"]);
        assert_eq!(trie.keys_that_match("t.e"), vec!["the"]);
        assert_eq!(trie.keys_that_match("b."), vec!["by"]);
        assert_eq!(trie.keys_that_match("sho.e"), vec!["shore"]);
    }

    #[test]
    fn longest_prefix() {
        let trie = sample();
        assert_eq!(trie.longest_prefix_of("shellsort"), "shells");
        assert_eq!(trie.longest_prefix_of("shell"), "she");
        assert_eq!(trie.longest_prefix_of("by"), "by");
        assert_eq!(trie.longest_prefix_of("kare"), "");
        assert_eq!(trie.longest_prefix_of(""), "");
    }

    #[test]
    fn delete_removes_and_prunes() {
        let mut trie = sample();
        assert_eq!(trie.delete("null"), None);
        assert_eq!(trie.len(), 7);

        assert_eq!(trie.delete("shells"), Some(3));
        assert_eq!(trie.len(), 6);
        assert!(trie.contains("she"));
        assert!(!has_dead_node(trie.root.as_deref()));

        // the root 's' has both a less ("by") and a greater ("the") sibling
        for word in ["she", "sells", "sea", "shore"] {
            assert!(trie.delete(word).is_some(), "{}", word);
            assert!(!has_dead_node(trie.root.as_deref()), "{}", word);
        }
        assert_eq!(trie.keys(), vec!["by", "the"]);
        assert_eq!(trie.get("the"), Some(&5));
        assert_eq!(trie.get("by"), Some(&4));

        trie.delete("by");
        trie.delete("the");
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
    }

    #[test]
    fn delete_inner_node_with_two_siblings() {
        let mut trie = TernaryTrie::new();
        trie.add_all(vec![("m", 0), ("c", 1), ("x", 2), ("a", 3), ("e", 4), ("w", 5), ("z", 6), ("v", 7)]).unwrap();
        assert_eq!(trie.delete("m"), Some(0));
        assert_eq!(trie.keys(), vec!["a", "c", "e", "v", "w", "x", "z"]);
        assert_eq!(trie.delete("x"), Some(2));
        assert_eq!(trie.keys(), vec!["a", "c", "e", "v", "w", "z"]);
        for (key, value) in [("a", 3), ("c", 1), ("e", 4), ("v", 7), ("w", 5), ("z", 6)] {
            assert_eq!(trie.get(key), Some(&value));
        }
        assert_eq!(trie.node_count(), 6);
        assert!(!has_dead_node(trie.root.as_deref()));
    }

    #[test]
    fn put_none_deletes() {
        let mut trie = sample();
        assert_eq!(trie.put("she", None).unwrap(), Some(0));
        assert!(!trie.contains("she"));
        assert!(trie.contains("shells"));
        assert_eq!(trie.len(), 6);
    }

    #[test]
    fn custom_alphabet_orders_by_ordinal() {
        let config = TrieConfig::builder().alphabet(Alphabet::new(b"tgca").unwrap()).build();
        let mut trie = TernaryTrie::with_config(config);
        trie.add_all(vec![("ac", 1), ("ta", 2), ("ca", 3), ("gg", 4)]).unwrap();
        assert_eq!(trie.keys(), vec!["ta", "gg", "ca", "ac"]);
        let nodes = trie.node_count();
        assert!(matches!(trie.insert("tu", 5), Err(TrieError::UnknownSymbol { symbol: b'u', position: 1 })));
        assert!(matches!(trie.insert("gu", 6), Err(TrieError::UnknownSymbol { symbol: b'u', position: 1 })));
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(trie.len(), 4);
        assert_eq!(trie.keys(), vec!["ta", "gg", "ca", "ac"]);
    }

    #[test]
    fn longest_prefix_stops_at_foreign_symbol() {
        let mut trie = TernaryTrie::with_config(TrieConfig::builder().alphabet(Alphabet::lowercase()).build());
        trie.add_all(vec![("a", 1), ("ab", 2), ("abc", 3)]).unwrap();
        assert_eq!(trie.longest_prefix_of("abC"), "ab");
        assert_eq!(trie.longest_prefix_of("Abc"), "");
        assert_eq!(trie.longest_prefix_of("abcd"), "abc");
    }

    #[test]
    fn debug_shows_entries() {
        let mut trie = TernaryTrie::new();
        trie.add_all(vec![("b", 2), ("a", 1)]).unwrap();
        assert_eq!(format!("{:?}", trie), r#"{"a": 1, "b": 2}"#);
    }
}
