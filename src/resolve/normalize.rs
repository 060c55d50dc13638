//! Query normalization
//!
//! Cleans a raw user query into the canonical lowercase form handed to the
//! candidate source:
//! 1. lowercase
//! 2. strip a single leading article (`the`, `a`, `an`)
//! 3. drop everything outside `[a-z0-9\s]`
//! 4. trim and collapse whitespace
//! 5. whole-phrase dictionary correction
//! 6. word-by-word alias substitution

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::dictionary::Corrector;
use crate::error::{ResolveError, Result};

/// Leading article, stripped once before punctuation removal
static ARTICLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:the|a|an)\s+").expect("article regex"));

/// Manual overrides for recurring misspellings the dictionary misses
static DEFAULT_ALIASES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("wichr", "witcher"), ("zedla", "zelda")]));

/// Raw-query cleaner.
///
/// Normalization is a pure function of the input and the corrector's
/// dictionary snapshot; the same raw query always cleans to the same string.
pub struct Normalizer {
    corrector: Corrector,
    aliases: HashMap<String, String>,
}

impl Normalizer {
    /// Normalizer with the built-in alias table
    pub fn new(corrector: Corrector) -> Self {
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { corrector, aliases }
    }

    /// Normalizer with extra aliases layered over the built-in table.
    /// An extra entry for an existing key wins.
    pub fn with_aliases<I>(corrector: Corrector, extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut normalizer = Self::new(corrector);
        normalizer.aliases.extend(extra);
        normalizer
    }

    /// Clean `raw` into the canonical search string.
    ///
    /// Fails with [`ResolveError::EmptyQuery`] only when the input had no
    /// alphanumeric content at all; correction and aliasing can never empty
    /// a non-empty phrase.
    pub fn normalize(&self, raw: &str) -> Result<String> {
        let lowered = raw.to_lowercase();
        let without_article = ARTICLE_RE.replace(&lowered, "");

        let kept: String = without_article
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
            .collect();
        let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        let corrected = match self.corrector.correct(&collapsed) {
            Some(term) => {
                info!(query = %collapsed, corrected = %term, "applied dictionary correction");
                term
            }
            None => collapsed,
        };

        let aliased = corrected
            .split(' ')
            .map(|word| self.aliases.get(word).map(String::as_str).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ");

        debug!(%raw, normalized = %aliased, "query normalized");
        Ok(aliased)
    }
}
