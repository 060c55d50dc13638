//! Candidate ranking
//!
//! Orders the upstream candidate set so the most likely intended title comes
//! first. Winner selection runs in priority order:
//! 1. word coverage: every query word appears in the title; score is the
//!    covered fraction of title words
//! 2. edit-distance similarity above a floor, as the fallback
//! 3. no winner: candidates containing all query words lead, by quality
//!    then shorter title
//! 4. otherwise quality alone, stable
//!
//! The returned list is always a permutation of the input; only the winner
//! selection filters, never the output.

use std::cmp::Ordering;

use tracing::debug;

use crate::resolve::distance::similarity;
use crate::types::Candidate;

/// Configuration for ranking
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Similarity at or below this floor never wins the top slot
    pub similarity_floor: f32,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            similarity_floor: 0.4,
        }
    }
}

/// Ranker for upstream candidate sets
pub struct Ranker {
    config: RankConfig,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranker {
    pub fn new() -> Self {
        Self {
            config: RankConfig::default(),
        }
    }

    pub fn with_config(config: RankConfig) -> Self {
        Self { config }
    }

    /// Reorder `candidates` for `query`, best guess first.
    ///
    /// Empty and single-element lists come back unchanged.
    pub fn rank(&self, query: &str, candidates: Vec<Candidate>) -> Vec<Candidate> {
        if candidates.len() <= 1 {
            return candidates;
        }

        let query = query.trim().to_lowercase();
        let query_words: Vec<&str> = query.split_whitespace().collect();

        if let Some(winner) = self.best_match(&query, &query_words, &candidates) {
            let mut rest = candidates;
            let first = rest.remove(winner);
            debug!(query = %query, winner = %first.title, "fuzzy winner promoted");
            let mut out = Vec::with_capacity(rest.len() + 1);
            out.push(first);
            out.extend(rest);
            return out;
        }

        // No fuzzy winner: candidates containing every query word lead,
        // best-rated and shortest-titled first; the remainder keeps its
        // input order behind them.
        let (mut matching, rest): (Vec<Candidate>, Vec<Candidate>) = candidates
            .into_iter()
            .partition(|c| contains_all_words(&c.title.to_lowercase(), &query_words));

        if !matching.is_empty() {
            matching.sort_by(|a, b| {
                b.quality()
                    .partial_cmp(&a.quality())
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.title.len().cmp(&b.title.len()))
            });
            matching.extend(rest);
            return matching;
        }

        // Nothing matches at all: quality is the only signal left. The sort
        // is stable, so equally-rated candidates keep their input order.
        let mut out = rest;
        out.sort_by(|a, b| {
            b.quality()
                .partial_cmp(&a.quality())
                .unwrap_or(Ordering::Equal)
        });
        out
    }

    /// Index of the single best fuzzy match, if any candidate is eligible.
    /// Ties go to the earliest input position.
    fn best_match(
        &self,
        query: &str,
        query_words: &[&str],
        candidates: &[Candidate],
    ) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let Some(score) = self.match_score(query, query_words, &candidate.title) else {
                continue;
            };
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }
        best.map(|(index, _)| index)
    }

    /// `Some(score)` when the candidate is eligible for the top slot.
    fn match_score(&self, query: &str, query_words: &[&str], title: &str) -> Option<f32> {
        let title = title.to_lowercase();
        let title = title.trim();

        if contains_all_words(title, query_words) {
            let title_words = title.split_whitespace().count().max(1);
            let score = query_words.len() as f32 / title_words as f32;
            return Some(score.min(1.0));
        }

        let score = similarity(query, title);
        (score > self.config.similarity_floor).then_some(score)
    }
}

fn contains_all_words(title_lower: &str, query_words: &[&str]) -> bool {
    query_words.iter().all(|word| title_lower.contains(word))
}
