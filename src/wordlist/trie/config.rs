use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::alphabet::Alphabet;

/// Construction-time settings shared by every trie variant.
#[derive(TypedBuilder, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct TrieConfig {
    #[builder(default)]
    pub alphabet: Alphabet,
    /// Pattern symbol matching any single alphabet symbol in `keys_that_match`.
    #[builder(default = b'.')]
    #[serde(with = "ascii_char")]
    pub wildcard: u8,
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig::builder().build()
    }
}

mod ascii_char {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    // Only ASCII bytes are written, so every wildcard written can be read back.
    pub fn serialize<S>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        if value.is_ascii() {
            serializer.serialize_char(*value as char)
        } else {
            Err(serde::ser::Error::custom(format!("wildcard {:#04x} is not an ASCII symbol", value)))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u8, D::Error> where D: Deserializer<'de> {
        let c = char::deserialize(deserializer)?;
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(D::Error::custom(format!("wildcard {:?} is not a single-byte symbol", c)))
        }
    }
}
