use thiserror::Error;

/// Errors raised while building tries, loading word lists or reading configuration.
#[derive(Error, Debug)]
pub enum TrieError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A key contained a byte the container's alphabet does not know about.
    #[error("symbol {symbol:#04x} at position {position} is not in the alphabet")]
    UnknownSymbol { symbol: u8, position: usize },

    #[error("invalid alphabet: {message}")]
    Alphabet { message: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("malformed line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown backend {0:?} (expected \"rway\" or \"ternary\")")]
    UnknownBackend(String),
}

pub type Result<T> = std::result::Result<T, TrieError>;
