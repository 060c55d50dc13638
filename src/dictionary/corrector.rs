//! Dictionary-backed query correction
//!
//! Proposes the closest known term within a bounded edit distance,
//! preferring smaller distance, then higher corpus frequency.

use tracing::debug;

use super::Dictionary;
use crate::resolve::distance::levenshtein;

/// Tuning knobs for the corrector
#[derive(Debug, Clone)]
pub struct CorrectorConfig {
    /// Maximum edit distance between a phrase and a proposed term
    pub max_edit_distance: usize,
    /// Phrases shorter than this are never corrected
    pub min_phrase_length: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            min_phrase_length: 4,
        }
    }
}

/// Nearest-term corrector over an injected read-only dictionary snapshot.
///
/// Works on whole cleaned phrases, not single words: the dictionary terms
/// are full titles, so "wicher 3" can land on "witcher 3" directly.
pub struct Corrector {
    dictionary: Dictionary,
    config: CorrectorConfig,
}

impl Corrector {
    pub fn new(dictionary: Dictionary) -> Self {
        Self::with_config(dictionary, CorrectorConfig::default())
    }

    pub fn with_config(dictionary: Dictionary, config: CorrectorConfig) -> Self {
        Self { dictionary, config }
    }

    /// Corrector with no vocabulary; corrects nothing. The stand-in when
    /// the dictionary source failed to load and the pipeline degrades to
    /// running uncorrected.
    pub fn empty() -> Self {
        Self::new(Dictionary::empty())
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// Propose a replacement for `phrase`, or `None` to keep it as-is.
    ///
    /// An exact vocabulary hit needs no correction. Otherwise every term
    /// within the distance bound competes, ranked by ascending distance,
    /// then descending frequency, then lexicographic order so that full
    /// ties stay deterministic across runs.
    pub fn correct(&self, phrase: &str) -> Option<String> {
        if self.dictionary.is_empty() {
            return None;
        }
        if phrase.chars().count() < self.config.min_phrase_length {
            return None;
        }
        if self.dictionary.contains(phrase) {
            return None;
        }

        let phrase_len = phrase.chars().count();
        let mut best: Option<(&str, usize, u64)> = None;

        for (term, frequency) in self.dictionary.iter() {
            // Length difference lower-bounds the edit distance
            let term_len = term.chars().count();
            if term_len.abs_diff(phrase_len) > self.config.max_edit_distance {
                continue;
            }

            let distance = levenshtein(phrase, term);
            if distance > self.config.max_edit_distance {
                continue;
            }

            let better = match best {
                None => true,
                Some((best_term, best_distance, best_frequency)) => {
                    distance < best_distance
                        || (distance == best_distance && frequency > best_frequency)
                        || (distance == best_distance
                            && frequency == best_frequency
                            && term < best_term)
                }
            };
            if better {
                best = Some((term, distance, frequency));
            }
        }

        let (term, distance, _) = best?;
        debug!(%phrase, corrected = %term, distance, "dictionary correction");
        Some(term.to_string())
    }
}
