use std::convert::TryFrom;
use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrieError};

/// Number of distinct byte values, and so the widest possible alphabet.
pub const EXTENDED_ASCII: usize = 256;

/// An ordered set of byte symbols.
///
/// A symbol's position in the set is its ordinal: R-way nodes allocate one
/// child slot per ordinal and every trie reports keys in ordinal order.
/// Keys are `&str`, so symbols are UTF-8 code units.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AlphabetSpec", into = "AlphabetSpec")]
pub struct Alphabet {
    symbols: Vec<u8>,
    index: [Option<u16>; EXTENDED_ASCII],
}

impl Alphabet {
    pub fn new(symbols: &[u8]) -> Result<Alphabet> {
        if symbols.is_empty() {
            return Err(TrieError::Alphabet { message: "alphabet has no symbols".to_string() });
        }
        let mut index = [None; EXTENDED_ASCII];
        for (ordinal, &symbol) in symbols.iter().enumerate() {
            if index[symbol as usize].is_some() {
                return Err(TrieError::Alphabet {
                    message: format!("symbol {:#04x} appears more than once", symbol),
                });
            }
            index[symbol as usize] = Some(ordinal as u16);
        }
        Ok(Alphabet { symbols: symbols.to_vec(), index })
    }

    fn from_range(symbols: impl Iterator<Item=u8>) -> Alphabet {
        let symbols: Vec<u8> = symbols.collect();
        let mut index = [None; EXTENDED_ASCII];
        symbols.iter().enumerate().for_each(|(ordinal, &symbol)| index[symbol as usize] = Some(ordinal as u16));
        Alphabet { symbols, index }
    }

    /// Every byte value; ordinals coincide with byte values.
    pub fn extended_ascii() -> Alphabet {
        Self::from_range(0..=u8::MAX)
    }

    pub fn ascii() -> Alphabet {
        Self::from_range(0..128)
    }

    pub fn lowercase() -> Alphabet {
        Self::from_range(b'a'..=b'z')
    }

    /// `A` to `Z` followed by the space character.
    pub fn uppercase() -> Alphabet {
        Self::from_range((b'A'..=b'Z').chain(std::iter::once(b' ')))
    }

    /// The radix of the alphabet.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.index[symbol as usize].is_some()
    }

    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.index[symbol as usize].map(usize::from)
    }

    /// Symbol for an ordinal. Ordinals come from `index_of` or from a node's
    /// slot position, so they are always below `len()`.
    pub fn symbol(&self, ordinal: usize) -> u8 {
        self.symbols[ordinal]
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Maps every byte of `key` to its ordinal.
    pub fn encode(&self, key: &str) -> Result<Vec<usize>> {
        key.bytes()
            .enumerate()
            .map(|(position, symbol)| self.index_of(symbol)
                .ok_or(TrieError::UnknownSymbol { symbol, position }))
            .collect()
    }

    /// Keeps the characters of `text` that the alphabet can spell, switching
    /// the case of ASCII letters when only the other case is available.
    pub fn normalize(&self, text: &str) -> String {
        text.chars()
            .filter_map(|c| {
                let mut buf = [0u8; 4];
                if c.encode_utf8(&mut buf).bytes().all(|b| self.contains(b)) {
                    return Some(c);
                }
                if !c.is_ascii() {
                    return None;
                }
                [c.to_ascii_uppercase(), c.to_ascii_lowercase()]
                    .into_iter()
                    .find(|&v| self.contains(v as u8))
            })
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::extended_ascii()
    }
}

impl Debug for Alphabet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alphabet")
            .field("len", &self.len())
            .field("symbols", &String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
enum AlphabetSpec {
    ExtendedAscii,
    Ascii,
    Lowercase,
    Uppercase,
    Symbols(String),
}

impl TryFrom<AlphabetSpec> for Alphabet {
    type Error = TrieError;

    fn try_from(spec: AlphabetSpec) -> Result<Self> {
        match spec {
            AlphabetSpec::ExtendedAscii => Ok(Alphabet::extended_ascii()),
            AlphabetSpec::Ascii => Ok(Alphabet::ascii()),
            AlphabetSpec::Lowercase => Ok(Alphabet::lowercase()),
            AlphabetSpec::Uppercase => Ok(Alphabet::uppercase()),
            AlphabetSpec::Symbols(symbols) => Alphabet::new(symbols.as_bytes()),
        }
    }
}

impl From<Alphabet> for AlphabetSpec {
    // Custom alphabets that are not valid UTF-8 are written lossily.
    fn from(alphabet: Alphabet) -> Self {
        if alphabet == Alphabet::extended_ascii() {
            AlphabetSpec::ExtendedAscii
        } else if alphabet == Alphabet::ascii() {
            AlphabetSpec::Ascii
        } else if alphabet == Alphabet::lowercase() {
            AlphabetSpec::Lowercase
        } else if alphabet == Alphabet::uppercase() {
            AlphabetSpec::Uppercase
        } else {
            AlphabetSpec::Symbols(String::from_utf8_lossy(&alphabet.symbols).into_owned())
        }
    }
}
