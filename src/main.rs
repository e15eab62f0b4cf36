use std::path::PathBuf;
use std::process;
use std::time::Instant;

use structopt::StructOpt;

use trie_tools::{Backend, Result, SearchConfig, Wordlist, WordlistConfig};

/// Load a word list into a trie and query it.
#[derive(StructOpt)]
struct Cli {
    /// The path to the word list to read
    #[structopt(parse(from_os_str))]
    path: PathBuf,
    /// JSON configuration (alphabet, wildcard, file format, backend, search limits)
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Trie to store the words in: rway or ternary
    #[structopt(long)]
    backend: Option<Backend>,
    /// Column delimiter; the second column holds the word frequency
    #[structopt(short, long)]
    delimiter: Option<char>,
    #[structopt(subcommand)]
    query: Query,
}

#[derive(StructOpt)]
enum Query {
    /// Words matching a pattern where the wildcard stands for any one symbol
    Match { pattern: String },
    /// Most frequent words starting with a prefix
    Prefix {
        prefix: String,
        #[structopt(long)]
        limit: Option<usize>,
    },
    /// Longest word that is a prefix of the query
    Longest { query: String },
    /// Whether a word is in the list
    Contains { word: String },
}

fn run(args: Cli) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => WordlistConfig::from_file(path)?,
        None => WordlistConfig::default(),
    };
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if args.delimiter.is_some() {
        config.format.delimiter = args.delimiter;
    }

    let mut wl = Wordlist::new(&config);
    let start = Instant::now();
    let stats = wl.load_file(&args.path)?;
    println!("Read {} words ({} distinct, {} failures) in {:.3}s",
             stats.words, wl.len(), stats.failures, start.elapsed().as_secs_f64());

    let start = Instant::now();
    match args.query {
        Query::Match { pattern } => {
            let results = wl.search(&pattern);
            results.iter().for_each(|word| println!("{}", word));
            println!("{} matches", results.len());
        }
        Query::Prefix { prefix, limit } => {
            let search = SearchConfig { max_results: limit.or(config.search.max_results), ..config.search.clone() };
            for (word, freq) in wl.complete(&prefix, &search) {
                println!("{}\t{}", word, freq);
            }
        }
        Query::Longest { query } => println!("{:?}", wl.longest_prefix_of(&query)),
        Query::Contains { word } => println!("{}", wl.contains(&word)),
    }
    println!("in {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::from_args()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
