//! Frequency dictionary for query correction
//!
//! Implements:
//! - Immutable dictionary snapshot shared read-only across the engine
//! - Pluggable dictionary sources, with a `term frequency` file reader
//! - Corpus-to-dictionary building
//! - Nearest-term correction over the snapshot

mod builder;
mod corrector;

pub use builder::*;
pub use corrector::*;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ResolveError, Result};

/// A single term in the frequency dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub term: String,
    /// Corpus occurrence count, always at least 1
    pub frequency: u64,
}

/// Immutable frequency dictionary snapshot.
///
/// Constructed once from a [`DictionarySource`] and handed to the corrector;
/// nothing in the engine mutates a loaded snapshot. Swapping in a refreshed
/// dictionary means building a new snapshot and a new corrector around it.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    terms: HashMap<String, u64>,
}

impl Dictionary {
    /// Dictionary with no terms; correction over it is a no-op
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from entries, folding duplicate terms by summing
    /// their frequencies.
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        let mut terms: HashMap<String, u64> = HashMap::with_capacity(entries.len());
        for entry in entries {
            *terms.entry(entry.term).or_insert(0) += entry.frequency;
        }
        Self { terms }
    }

    /// Load a snapshot from a source. Failure is reported to the caller,
    /// who typically falls back to [`Dictionary::empty`] and runs the
    /// pipeline uncorrected.
    pub fn load_from(source: &dyn DictionarySource) -> Result<Self> {
        let entries = source.load()?;
        let dictionary = Self::from_entries(entries);
        info!(terms = dictionary.len(), "dictionary loaded");
        Ok(dictionary)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn frequency(&self, term: &str) -> Option<u64> {
        self.terms.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.terms.iter().map(|(term, freq)| (term.as_str(), *freq))
    }
}

/// Source of dictionary entries, typically a corpus file on disk.
///
/// Loading happens at most once per process lifetime; retrying after a
/// failure is the caller's call, never an internal loop.
pub trait DictionarySource {
    fn load(&self) -> Result<Vec<DictionaryEntry>>;
}

/// Reads `term frequency` lines, one entry per line.
///
/// Terms may themselves contain spaces ("super mario odyssey 12"), so the
/// frequency is the final whitespace-separated token, not the second one.
/// Blank lines are skipped; anything else malformed fails the whole load.
pub struct FileDictionarySource {
    path: PathBuf,
}

impl FileDictionarySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DictionarySource for FileDictionarySource {
    fn load(&self) -> Result<Vec<DictionaryEntry>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            ResolveError::DictionaryLoad(format!("{}: {}", self.path.display(), e))
        })?;

        let mut entries = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (term, frequency) = line.rsplit_once(char::is_whitespace).ok_or_else(|| {
                ResolveError::DictionaryLoad(format!(
                    "{}:{}: expected 'term frequency'",
                    self.path.display(),
                    line_no + 1
                ))
            })?;
            let frequency: u64 = frequency.parse().map_err(|_| {
                ResolveError::DictionaryLoad(format!(
                    "{}:{}: bad frequency '{}'",
                    self.path.display(),
                    line_no + 1,
                    frequency
                ))
            })?;
            if frequency == 0 {
                return Err(ResolveError::DictionaryLoad(format!(
                    "{}:{}: frequency must be at least 1",
                    self.path.display(),
                    line_no + 1
                )));
            }

            entries.push(DictionaryEntry {
                term: term.trim_end().to_string(),
                frequency,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(term: &str, frequency: u64) -> DictionaryEntry {
        DictionaryEntry {
            term: term.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_from_entries_folds_duplicates() {
        let dictionary =
            Dictionary::from_entries(vec![entry("zelda", 2), entry("zelda", 3), entry("mario", 1)]);
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.frequency("zelda"), Some(5));
        assert_eq!(dictionary.frequency("mario"), Some(1));
    }

    #[test]
    fn test_file_source_parses_multiword_terms() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the witcher 3 4").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "zelda 7").unwrap();

        let entries = FileDictionarySource::new(file.path()).load().unwrap();
        assert_eq!(
            entries,
            vec![entry("the witcher 3", 4), entry("zelda", 7)]
        );
    }

    #[test]
    fn test_file_source_missing_file_is_load_error() {
        let err = FileDictionarySource::new("/nonexistent/games-dictionary.txt")
            .load()
            .unwrap_err();
        assert!(matches!(err, ResolveError::DictionaryLoad(_)));
        assert!(err.is_degradation());
    }

    #[test]
    fn test_file_source_rejects_bad_frequency() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mario kart eight").unwrap();
        let err = FileDictionarySource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, ResolveError::DictionaryLoad(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mario 0").unwrap();
        let err = FileDictionarySource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, ResolveError::DictionaryLoad(_)));
    }
}
