//! Upstream candidate sources

use crate::error::Result;
use crate::types::Candidate;

/// Where candidates come from.
///
/// Implemented by the embedding application — an HTTP game database client,
/// a local index, a test fixture. The engine never fetches on its own; it
/// only consumes the output. Network and auth failures surface as
/// [`crate::error::ResolveError::Upstream`] and propagate to the caller
/// unchanged.
pub trait CandidateSource {
    /// Fetch candidates for a normalized query. Order is whatever the
    /// upstream produced; ranking happens afterwards.
    fn fetch(&self, query: &str) -> Result<Vec<Candidate>>;
}

/// Fixed in-memory candidate set.
///
/// Stands in for a real upstream in the CLI and in tests: returns the
/// candidates whose lowercased titles contain at least one query word.
pub struct StaticCandidateSource {
    candidates: Vec<Candidate>,
}

impl StaticCandidateSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl CandidateSource for StaticCandidateSource {
    fn fetch(&self, query: &str) -> Result<Vec<Candidate>> {
        let words: Vec<String> = query
            .split_whitespace()
            .map(|word| word.to_lowercase())
            .collect();

        Ok(self
            .candidates
            .iter()
            .filter(|candidate| {
                let title = candidate.title.to_lowercase();
                words.iter().any(|word| title.contains(word))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_filters_by_word() {
        let source = StaticCandidateSource::new(vec![
            Candidate::new("Mario Kart 8"),
            Candidate::new("Dark Souls"),
        ]);

        let hits = source.fetch("mario kart").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Mario Kart 8");

        assert!(source.fetch("tetris").unwrap().is_empty());
    }
}
