use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use derive_new::new;
use log::{debug, info, warn};
use nom::bytes::complete::take_till;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map_res};
use nom::multi::separated_list1;
use nom::IResult;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::alphabet::Alphabet;
use crate::error::{Result, TrieError};
use crate::wordlist::index::Index;
use crate::wordlist::trie::config::TrieConfig;
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::ternary::TernaryTrie;
use crate::wordlist::trie::trie::TrieMap;

/// Which trie holds the words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    #[serde(rename = "rway")]
    RWay,
    #[serde(rename = "ternary")]
    Ternary,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::RWay
    }
}

impl FromStr for Backend {
    type Err = TrieError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rway" | "r-way" => Ok(Backend::RWay),
            "ternary" | "tst" => Ok(Backend::Ternary),
            _ => Err(TrieError::UnknownBackend(s.to_string())),
        }
    }
}

/// Layout of a word list file: one word per line, optionally followed by
/// delimited columns holding a frequency.
#[derive(TypedBuilder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFormat {
    #[builder(default, setter(strip_option))]
    pub delimiter: Option<char>,
    #[builder(default = 0)]
    pub word_column: usize,
    #[builder(default = 1)]
    pub freq_column: usize,
    /// Reduce words to the alphabet (see [`Alphabet::normalize`]) before storing them.
    #[builder(default = true)]
    pub normalize: bool,
}

impl Default for FileFormat {
    fn default() -> Self {
        FileFormat::builder().build()
    }
}

fn columns(input: &str, delimiter: char) -> IResult<&str, Vec<&str>> {
    separated_list1(char(delimiter), take_till(|c| c == delimiter))(input)
}

fn frequency(input: &str) -> IResult<&str, usize> {
    all_consuming(map_res(digit1, |digits: &str| digits.parse::<usize>()))(input)
}

impl FileFormat {
    fn parse_line<'a>(&self, line: &'a str) -> std::result::Result<(&'a str, usize), String> {
        let delimiter = match self.delimiter {
            None => return Ok((line.trim(), 1)),
            Some(delimiter) => delimiter,
        };
        let (_, fields) = columns(line, delimiter).map_err(|e| e.to_string())?;
        let word = fields.get(self.word_column)
            .ok_or_else(|| format!("missing word column {}", self.word_column))?;
        let freq = fields.get(self.freq_column)
            .ok_or_else(|| format!("missing frequency column {}", self.freq_column))?;
        let (_, freq) = frequency(freq.trim())
            .map_err(|_| format!("frequency {:?} is not a number", freq))?;
        Ok((word.trim(), freq))
    }
}

/// Everything needed to build a [`Wordlist`]; readable from JSON.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordlistConfig {
    pub trie: TrieConfig,
    pub format: FileFormat,
    pub backend: Backend,
    pub search: SearchConfig,
}

impl WordlistConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<WordlistConfig> {
        let path = path.as_ref();
        let config: WordlistConfig = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        debug!("loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[derive(new, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadStats {
    pub words: usize,
    pub failures: usize,
}

/// Words and their accumulated frequencies, searchable by pattern and prefix.
pub struct Wordlist {
    index: Box<dyn Index<usize>>,
    alphabet: Alphabet,
    format: FileFormat,
}

impl Wordlist {
    pub fn new(config: &WordlistConfig) -> Wordlist {
        let index: Box<dyn Index<usize>> = match config.backend {
            Backend::RWay => Box::new(TrieMap::with_config(config.trie.clone())),
            Backend::Ternary => Box::new(TernaryTrie::with_config(config.trie.clone())),
        };
        Wordlist { index, alphabet: config.trie.alphabet.clone(), format: config.format.clone() }
    }

    /// Reads one word per line. Lines that cannot be parsed or stored are
    /// logged and counted; only I/O errors abort the load.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<LoadStats> {
        let start = Instant::now();
        let mut stats = LoadStats::default();

        for (number, line) in reader.split(b'\n').enumerate() {
            let line = match String::from_utf8(line?) {
                Ok(line) => line,
                Err(e) => {
                    warn!("skipping line {}: {}", number + 1, e);
                    stats.failures += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let stored = self.format.parse_line(&line)
                .map_err(|message| TrieError::Parse { line: number + 1, message })
                .and_then(|(word, freq)| {
                    let word = if self.format.normalize {
                        self.alphabet.normalize(word)
                    } else {
                        word.to_string()
                    };
                    if word.is_empty() {
                        return Err(TrieError::Parse { line: number + 1, message: "no storable symbols".to_string() });
                    }
                    self.add_with_freq(&word, freq)
                });
            match stored {
                Ok(()) => stats.words += 1,
                Err(e) => {
                    warn!("skipping line {}: {}", number + 1, e);
                    stats.failures += 1;
                }
            }
        }

        info!("read {} words in {:.3}s [{} failures]",
              stats.words, start.elapsed().as_secs_f64(), stats.failures);
        Ok(stats)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadStats> {
        let path = path.as_ref();
        info!("reading words from {}", path.display());
        self.load(BufReader::new(File::open(path)?))
    }

    pub fn add(&mut self, word: &str) -> Result<()> {
        self.add_with_freq(word, 1)
    }

    /// Adds `freq` to the word's running frequency, saturating at `usize::MAX`.
    pub fn add_with_freq(&mut self, word: &str, freq: usize) -> Result<()> {
        let total = self.index.get(word).copied().unwrap_or(0).saturating_add(freq);
        self.index.put(word, Some(total)).map(|_| ())
    }

    pub fn frequency(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn search(&self, pattern: &str) -> Vec<String> {
        self.index.keys_that_match(pattern)
    }

    pub fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str {
        self.index.longest_prefix_of(query)
    }

    /// Words starting with `prefix`, most frequent first (ties by key),
    /// filtered by the config's length bounds and cut at `max_results`.
    pub fn complete(&self, prefix: &str, config: &SearchConfig) -> Vec<(String, usize)> {
        let unlimited = SearchConfig { max_results: None, ..config.clone() };
        let mut ranked: Vec<(String, usize)> = self.index.keys_with_prefix_with(prefix, &unlimited)
            .into_iter()
            .filter_map(|word| {
                let freq = self.frequency(&word)?;
                Some((word, freq))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max) = config.max_results {
            ranked.truncate(max);
        }
        ranked
    }
}
