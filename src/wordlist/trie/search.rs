use crate::wordlist::trie::config::TrieConfig;
use crate::wordlist::trie::node::Node;
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::trie::TrieMap;

/// Ordered accumulator for the keys a traversal reports.
#[derive(Debug)]
pub(crate) struct Results<'c> {
    keys: Vec<String>,
    config: &'c SearchConfig,
}

impl<'c> Results<'c> {
    pub(crate) fn new(config: &'c SearchConfig) -> Self {
        Results { keys: vec![], config }
    }

    pub(crate) fn push(&mut self, key: &[u8]) {
        if !self.is_full() && self.config.accepts_length(key.len()) {
            self.keys.push(String::from_utf8_lossy(key).into_owned());
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.config.max_results.map_or(false, |max| self.keys.len() >= max)
    }

    /// Whether keys longer than `depth` may still be reported.
    pub(crate) fn descends_below(&self, depth: usize) -> bool {
        self.config.max_length.map_or(true, |max| depth < max)
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.keys
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PatternSymbol {
    Any,
    Symbol(usize),
}

/// Translates a wildcard pattern into ordinals. `None` when a literal symbol
/// is outside the alphabet, in which case nothing can match.
pub(crate) fn compile_pattern(config: &TrieConfig, pattern: &str) -> Option<Vec<PatternSymbol>> {
    pattern.bytes()
        .map(|symbol| if symbol == config.wildcard {
            Some(PatternSymbol::Any)
        } else {
            config.alphabet.index_of(symbol).map(PatternSymbol::Symbol)
        })
        .collect()
}

impl<V> TrieMap<V> {
    /// The longest stored key that is a prefix of `query`, or "" if there is none.
    pub fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str {
        let alphabet = &self.config.alphabet;
        let mut length = 0;
        let mut node = match self.root.as_deref() {
            Some(root) => root,
            None => return "",
        };
        for (depth, symbol) in query.bytes().enumerate() {
            match alphabet.index_of(symbol).and_then(|ordinal| node.child(ordinal)) {
                Some(child) => node = child,
                None => break,
            }
            if node.value.is_some() {
                length = depth + 1;
            }
        }
        // a stored key is valid UTF-8, so `length` falls on a char boundary
        query.get(..length).unwrap_or("")
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys_with_prefix("")
    }

    /// All keys starting with `prefix`, in ascending ordinal order of their symbols.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.keys_with_prefix_with(prefix, &SearchConfig::default())
    }

    pub fn keys_with_prefix_with(&self, prefix: &str, config: &SearchConfig) -> Vec<String> {
        let mut results = Results::new(config);
        if let Some(node) = self.get_node(prefix) {
            let mut path = prefix.as_bytes().to_vec();
            self.collect(node, &mut path, &mut results);
        }
        results.into_vec()
    }

    fn collect(&self, node: &Node<V>, path: &mut Vec<u8>, results: &mut Results) {
        if results.is_full() {
            return;
        }
        if node.value.is_some() {
            results.push(path);
        }
        if !results.descends_below(path.len()) {
            return;
        }
        for (ordinal, child) in node.children() {
            path.push(self.config.alphabet.symbol(ordinal));
            self.collect(child, path, results);
            path.pop();
        }
    }

    /// Keys of exactly `pattern.len()` symbols matching `pattern` position by
    /// position, the wildcard matching any symbol.
    pub fn keys_that_match(&self, pattern: &str) -> Vec<String> {
        self.keys_that_match_with(pattern, &SearchConfig::default())
    }

    pub fn keys_that_match_with(&self, pattern: &str, config: &SearchConfig) -> Vec<String> {
        let mut results = Results::new(config);
        if let (Some(root), Some(pattern)) = (self.root.as_deref(), compile_pattern(&self.config, pattern)) {
            self.collect_match(root, &mut vec![], &pattern, &mut results);
        }
        results.into_vec()
    }

    pub(crate) fn collect_match(&self, node: &Node<V>, path: &mut Vec<u8>,
                                pattern: &[PatternSymbol], results: &mut Results) {
        if results.is_full() {
            return;
        }
        let depth = path.len();
        if depth == pattern.len() {
            if node.value.is_some() {
                results.push(path);
            }
            return;
        }
        match pattern[depth] {
            PatternSymbol::Any => {
                for (ordinal, child) in node.children() {
                    path.push(self.config.alphabet.symbol(ordinal));
                    self.collect_match(child, path, pattern, results);
                    path.pop();
                }
            }
            PatternSymbol::Symbol(ordinal) => {
                if let Some(child) = node.child(ordinal) {
                    path.push(self.config.alphabet.symbol(ordinal));
                    self.collect_match(child, path, pattern, results);
                    path.pop();
                }
            }
        }
    }
}
