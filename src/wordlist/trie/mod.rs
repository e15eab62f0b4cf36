pub mod trie;
pub mod set;
pub mod ternary;
pub mod config;
pub mod searchconfig;
pub mod iterators;

mod node;
mod search;
mod multithreaded_search;
