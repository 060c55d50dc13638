//! Gamedex CLI
//!
//! Command-line front end for the resolution engine: normalize queries,
//! rank candidate fixtures, run the full pipeline, and build correction
//! dictionaries from a title corpus.

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use gamedex::dictionary::{
    build_entries, write_dictionary_file, Corrector, Dictionary, FileDictionarySource,
};
use gamedex::resolve::{Normalizer, Ranker};
use gamedex::source::StaticCandidateSource;
use gamedex::types::Candidate;
use gamedex::Resolver;

#[derive(Parser)]
#[command(name = "gamedex")]
#[command(about = "Fuzzy game-title resolution CLI")]
#[command(version)]
struct Cli {
    /// Correction dictionary path
    #[arg(
        long,
        env = "GAMEDEX_DICT_PATH",
        default_value = "~/.local/share/gamedex/games-dictionary.txt"
    )]
    dictionary: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw query
    Normalize {
        /// Raw query text
        query: String,
    },
    /// Rank candidates from a JSON file against a query
    Rank {
        /// Normalized query text
        query: String,
        /// JSON file holding an array of candidates
        #[arg(short, long)]
        candidates: String,
    },
    /// Run the full pipeline against fixture candidates from a JSON file
    Resolve {
        /// Raw query text
        query: String,
        /// JSON file holding an array of candidates
        #[arg(short, long)]
        candidates: String,
    },
    /// Build a correction dictionary from a newline-separated title corpus
    BuildDict {
        /// Input titles file, one title per line
        titles: String,
        /// Output path (defaults to --dictionary)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Expand ~ in path
    let dict_path = shellexpand::tilde(&cli.dictionary).to_string();

    match cli.command {
        Commands::Normalize { query } => {
            let normalizer = Normalizer::new(load_corrector(&dict_path));
            println!("{}", normalizer.normalize(&query)?);
        }
        Commands::Rank { query, candidates } => {
            let candidates = read_candidates(&candidates)?;
            let ranked = Ranker::new().rank(&query, candidates);
            print_results(&ranked);
        }
        Commands::Resolve { query, candidates } => {
            let source = StaticCandidateSource::new(read_candidates(&candidates)?);
            let resolver = Resolver::new(source, Normalizer::new(load_corrector(&dict_path)));
            let ranked = resolver.resolve(&query)?;
            if ranked.is_empty() {
                println!("no results for \"{query}\"");
            } else {
                print_results(&ranked);
            }
        }
        Commands::BuildDict { titles, output } => {
            let content =
                fs::read_to_string(&titles).with_context(|| format!("reading {titles}"))?;
            let entries = build_entries(content.lines());
            let output = output
                .map(|path| shellexpand::tilde(&path).to_string())
                .unwrap_or(dict_path);
            write_dictionary_file(Path::new(&output), &entries)?;
            println!("wrote {} terms to {}", entries.len(), output);
        }
    }

    Ok(())
}

/// Load the correction dictionary, degrading to no correction when the file
/// is missing or malformed.
fn load_corrector(path: &str) -> Corrector {
    match Dictionary::load_from(&FileDictionarySource::new(path)) {
        Ok(dictionary) => Corrector::new(dictionary),
        Err(e) => {
            tracing::warn!("dictionary unavailable, corrections disabled: {e}");
            Corrector::empty()
        }
    }
}

fn read_candidates(path: &str) -> anyhow::Result<Vec<Candidate>> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let candidates: Vec<Candidate> =
        serde_json::from_str(&content).with_context(|| format!("parsing {path}"))?;
    Ok(candidates)
}

fn print_results(ranked: &[Candidate]) {
    for (position, candidate) in ranked.iter().enumerate() {
        match candidate.quality_score {
            Some(quality) => println!("{:2}. {} ({:.0}/100)", position + 1, candidate.title, quality),
            None => println!("{:2}. {}", position + 1, candidate.title),
        }
    }
}
