use log::debug;
use rayon::prelude::*;

use crate::wordlist::trie::node::Node;
use crate::wordlist::trie::search::{compile_pattern, PatternSymbol, Results};
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::trie::TrieMap;

impl<V: Sync> TrieMap<V> {
    /// Same result as [`keys_that_match`](TrieMap::keys_that_match), with the
    /// subtrees under the root's matching children searched on the rayon pool.
    pub fn par_keys_that_match(&self, pattern: &str) -> Vec<String> {
        let (root, pattern) = match (self.root.as_deref(), compile_pattern(&self.config, pattern)) {
            (Some(root), Some(pattern)) if !pattern.is_empty() => (root, pattern),
            _ => return vec![],
        };
        let branches: Vec<(usize, &Node<V>)> = match pattern[0] {
            PatternSymbol::Any => root.children().collect(),
            PatternSymbol::Symbol(ordinal) => root.child(ordinal)
                .map(|child| (ordinal, child))
                .into_iter()
                .collect(),
        };
        debug!("searching {} branches in parallel", branches.len());

        let unbounded = SearchConfig::default();
        branches.into_par_iter()
            .map(|(ordinal, child)| {
                let mut results = Results::new(&unbounded);
                let mut path = vec![self.config.alphabet.symbol(ordinal)];
                self.collect_match(child, &mut path, &pattern, &mut results);
                results.into_vec()
            })
            .collect::<Vec<Vec<String>>>()
            .concat()
    }
}


#[cfg(test)]
mod tests {
    use crate::wordlist::trie::trie::TrieMap;

    #[test]
    fn agrees_with_sequential_search() {
        let mut trie = TrieMap::new();
        let words = ["HELLO", "HELP", "GOODBYE", "GOOD", "HOLD", "HELD", "GOLD", "BOLD", "BALD"];
        for word in words {
            trie.insert(word, word.len()).unwrap();
        }
        for pattern in ["....", "H...", ".OLD", "HEL.O", "G..D", "B.LD", "X...", "", "......."] {
            assert_eq!(trie.par_keys_that_match(pattern), trie.keys_that_match(pattern), "{}", pattern);
        }
        assert_eq!(trie.par_keys_that_match(".OLD"), vec!["BOLD", "GOLD", "HOLD"]);
    }

    #[test]
    fn empty_trie_has_no_matches() {
        assert!(TrieMap::<u8>::new().par_keys_that_match("...").is_empty());
    }
}
