//! Dictionary construction from a title corpus
//!
//! Turns a raw list of titles into frequency entries in the same character
//! space as normalized queries, so corrections and queries stay comparable.
//! Scheduling a periodic rebuild is the embedding application's job; this
//! module only does the transformation and the file write.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use super::DictionaryEntry;
use crate::error::Result;

/// Cleaned titles shorter than this are dropped from the dictionary
const MIN_TERM_LENGTH: usize = 3;

/// Build frequency entries from a title corpus.
///
/// Each title is lowercased, stripped of everything outside `[a-z0-9\s]`,
/// and whitespace-collapsed. Titles that clean down to fewer than
/// [`MIN_TERM_LENGTH`] characters are discarded; duplicates accumulate
/// frequency. Output is term-sorted so rebuilds are diffable.
pub fn build_entries<I, S>(titles: I) -> Vec<DictionaryEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut frequencies = std::collections::HashMap::<String, u64>::new();
    for title in titles {
        let term = clean_title(title.as_ref());
        if term.chars().count() < MIN_TERM_LENGTH {
            continue;
        }
        *frequencies.entry(term).or_insert(0) += 1;
    }

    let mut entries: Vec<DictionaryEntry> = frequencies
        .into_iter()
        .map(|(term, frequency)| DictionaryEntry { term, frequency })
        .collect();
    entries.sort_by(|a, b| a.term.cmp(&b.term));
    entries
}

/// Persist entries in the `term frequency` line format read by
/// [`super::FileDictionarySource`].
pub fn write_dictionary_file(path: &Path, entries: &[DictionaryEntry]) -> Result<()> {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{} {}", entry.term, entry.frequency);
    }
    fs::write(path, out)?;
    info!(terms = entries.len(), path = %path.display(), "dictionary written");
    Ok(())
}

fn clean_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionarySource;

    #[test]
    fn test_build_entries_cleans_and_counts() {
        let entries = build_entries([
            "The Witcher 3: Wild Hunt",
            "the witcher 3  wild hunt",
            "Zelda",
            "Ys", // too short once cleaned
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].term, "the witcher 3 wild hunt");
        assert_eq!(entries[0].frequency, 2);
        assert_eq!(entries[1].term, "zelda");
        assert_eq!(entries[1].frequency, 1);
    }

    #[test]
    fn test_build_entries_drops_symbol_only_titles() {
        let entries = build_entries(["!!!", "###", "ok go far"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term, "ok go far");
    }

    #[test]
    fn test_build_entries_sorted_output() {
        let entries = build_entries(["zelda", "mario", "doom"]);
        let terms: Vec<&str> = entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["doom", "mario", "zelda"]);
    }

    #[test]
    fn test_write_then_load_roundtrip() {
        let entries = build_entries(["Mario Kart 8", "Mario Kart 8", "Zelda II"]);
        let file = tempfile::NamedTempFile::new().unwrap();
        write_dictionary_file(file.path(), &entries).unwrap();

        let loaded = super::super::FileDictionarySource::new(file.path())
            .load()
            .unwrap();
        assert_eq!(loaded, entries);
    }
}
