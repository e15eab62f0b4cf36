//! Property tests checking every trie variant against a `BTreeMap` model.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use trie_tools::{Index, TernaryTrie, TrieMap, TrieSet};

fn key_strategy() -> impl Strategy<Value=String> {
    prop::collection::vec(prop::char::range('a', 'e'), 1..8)
        .prop_map(|chars| chars.into_iter().collect())
}

fn keys_strategy() -> impl Strategy<Value=Vec<String>> {
    prop::collection::vec(key_strategy(), 0..64)
}

#[derive(Debug, Clone)]
enum Op {
    Put(String, u32),
    Delete(String),
}

fn ops_strategy() -> impl Strategy<Value=Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (key_strategy(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
            1 => key_strategy().prop_map(Op::Delete),
        ],
        0..200,
    )
}

fn variants() -> Vec<(&'static str, Box<dyn Index<u32>>)> {
    vec![("rway", Box::new(TrieMap::new())), ("ternary", Box::new(TernaryTrie::new()))]
}

/// Pattern of the same length as `key` with every position in `holes` replaced by the wildcard.
fn punch(key: &str, holes: &[bool]) -> String {
    key.chars()
        .zip(holes.iter().chain(std::iter::repeat(&false)))
        .map(|(c, &hole)| if hole { '.' } else { c })
        .collect()
}

proptest! {
    #[test]
    fn prop_operations_agree_with_model(ops in ops_strategy()) {
        for (name, mut index) in variants() {
            let mut model = BTreeMap::new();
            for op in &ops {
                match op {
                    Op::Put(key, value) => {
                        let previous = index.put(key, Some(*value)).unwrap();
                        prop_assert_eq!(previous, model.insert(key.clone(), *value), "{}", name);
                    }
                    Op::Delete(key) => {
                        prop_assert_eq!(index.delete(key), model.remove(key), "{}", name);
                    }
                }
                prop_assert_eq!(index.len(), model.len(), "{}", name);
            }
            for (key, value) in &model {
                prop_assert_eq!(index.get(key), Some(value), "{}", name);
            }
            let keys: BTreeSet<String> = index.keys().into_iter().collect();
            prop_assert_eq!(keys, model.keys().cloned().collect::<BTreeSet<_>>(), "{}", name);
        }
    }

    #[test]
    fn prop_put_is_idempotent(keys in keys_strategy()) {
        for (name, mut index) in variants() {
            for key in &keys {
                index.put(key, Some(1)).unwrap();
            }
            let (len, stored) = (index.len(), index.keys());
            for key in &keys {
                prop_assert_eq!(index.put(key, Some(1)).unwrap(), Some(1), "{}", name);
            }
            prop_assert_eq!(index.len(), len, "{}", name);
            prop_assert_eq!(index.keys(), stored, "{}", name);
        }
    }

    #[test]
    fn prop_delete_undoes_put(keys in keys_strategy(), extra in key_strategy()) {
        for (name, mut index) in variants() {
            for key in &keys {
                index.put(key, Some(7)).unwrap();
            }
            prop_assume!(!index.contains(&extra));
            let before = index.keys();
            index.put(&extra, Some(8)).unwrap();
            prop_assert_eq!(index.delete(&extra), Some(8), "{}", name);
            prop_assert_eq!(index.keys(), before, "{}", name);
        }
    }

    #[test]
    fn prop_longest_prefix_of_stored_key_is_itself(keys in keys_strategy(), suffix in "[f-z]{0,4}") {
        for (name, mut index) in variants() {
            for key in &keys {
                index.put(key, Some(0)).unwrap();
            }
            for key in &keys {
                prop_assert_eq!(index.longest_prefix_of(key), key.as_str(), "{}", name);
                let query = format!("{}{}", key, suffix);
                prop_assert_eq!(index.longest_prefix_of(&query), key.as_str(), "{}", name);
            }
        }
    }

    #[test]
    fn prop_prefix_and_pattern_queries_agree_with_model(
        keys in keys_strategy(),
        prefix in "[a-e]{0,3}",
        probe in key_strategy(),
        holes in prop::collection::vec(any::<bool>(), 8),
    ) {
        let model: BTreeSet<String> = keys.iter().cloned().collect();
        let pattern = punch(&probe, &holes);
        let expected_prefix: BTreeSet<String> = model.iter()
            .filter(|key| key.starts_with(prefix.as_str())).cloned().collect();
        let expected_match: BTreeSet<String> = model.iter()
            .filter(|key| key.len() == pattern.len()
                && key.chars().zip(pattern.chars()).all(|(k, p)| p == '.' || k == p))
            .cloned().collect();

        for (name, mut index) in variants() {
            for key in &keys {
                index.put(key, Some(0)).unwrap();
            }
            let found: BTreeSet<String> = index.keys_with_prefix(&prefix).into_iter().collect();
            prop_assert_eq!(&found, &expected_prefix, "{}", name);
            let found: BTreeSet<String> = index.keys_that_match(&pattern).into_iter().collect();
            prop_assert_eq!(&found, &expected_match, "{}", name);
        }
    }

    #[test]
    fn prop_variants_list_keys_in_the_same_order(keys in keys_strategy()) {
        let mut rway = TrieMap::new();
        let mut ternary = TernaryTrie::new();
        for key in &keys {
            rway.insert(key, ()).unwrap();
            ternary.insert(key, ()).unwrap();
        }
        let expected: Vec<String> = keys.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(ternary.keys(), expected.clone());
        prop_assert_eq!(rway.keys(), expected);
    }

    #[test]
    fn prop_deleting_everything_leaves_no_nodes(keys in keys_strategy()) {
        let mut rway = TrieMap::new();
        let mut ternary = TernaryTrie::new();
        let mut set = TrieSet::new();
        for (i, key) in keys.iter().enumerate() {
            rway.insert(key, i).unwrap();
            ternary.insert(key, i).unwrap();
            set.add(key).unwrap();
        }
        for key in &keys {
            rway.delete(key);
            ternary.delete(key);
            set.remove(key);
        }
        prop_assert!(rway.is_empty() && ternary.is_empty() && set.is_empty());
        prop_assert_eq!(rway.node_count(), 0);
        prop_assert_eq!(ternary.node_count(), 0);
        prop_assert_eq!(set.node_count(), 0);
    }

    #[test]
    fn prop_partial_deletes_keep_only_live_nodes(
        keys in keys_strategy(),
        mask in prop::collection::vec(any::<bool>(), 64),
    ) {
        let mut ternary = TernaryTrie::new();
        let mut rway = TrieMap::new();
        for key in &keys {
            ternary.insert(key, ()).unwrap();
            rway.insert(key, ()).unwrap();
        }
        let mut survivors: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        for (key, _) in keys.iter().zip(&mask).filter(|(_, drop)| **drop) {
            ternary.delete(key);
            rway.delete(key);
            survivors.remove(key.as_str());
        }
        let prefixes: BTreeSet<&str> = survivors.iter()
            .flat_map(|key| (1..=key.len()).map(move |end| &key[..end]))
            .collect();
        prop_assert_eq!(ternary.node_count(), prefixes.len());
        let root = usize::from(!survivors.is_empty());
        prop_assert_eq!(rway.node_count(), prefixes.len() + root);
    }
}
