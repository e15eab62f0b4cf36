use serde::{Deserialize, Serialize};

/// Limits applied to prefix and pattern queries.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: Option<usize>,
    pub max_length: Option<usize>,
    pub min_length: usize,
}

impl SearchConfig {
    pub fn new() -> SearchConfig {
        Default::default()
    }

    pub fn with_max_results(max_results: usize) -> SearchConfig {
        SearchConfig { max_results: Some(max_results), ..Default::default() }
    }

    pub(crate) fn accepts_length(&self, len: usize) -> bool {
        len >= self.min_length && self.max_length.map_or(true, |max| len <= max)
    }
}
