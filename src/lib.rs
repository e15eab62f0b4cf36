//! String-keyed maps and sets built on tries, with prefix, longest-prefix and
//! wildcard-pattern queries.
//!
//! Three containers share the [`Index`] contract:
//!
//! * [`TrieMap`]: R-way trie, one child slot per alphabet symbol.
//! * [`TrieSet`]: the same trie with a terminal flag instead of a value.
//! * [`TernaryTrie`]: ternary search trie, compact for large or sparse alphabets.
//!
//! The [`Wordlist`] loads word/frequency files into either backend.

pub mod alphabet;
pub mod error;
pub mod wordlist;

pub use crate::alphabet::Alphabet;
pub use crate::error::{Result, TrieError};
pub use crate::wordlist::index::Index;
pub use crate::wordlist::trie::config::TrieConfig;
pub use crate::wordlist::trie::searchconfig::SearchConfig;
pub use crate::wordlist::trie::set::TrieSet;
pub use crate::wordlist::trie::ternary::TernaryTrie;
pub use crate::wordlist::trie::trie::TrieMap;
pub use crate::wordlist::wordlist::{Backend, FileFormat, LoadStats, Wordlist, WordlistConfig};
