//! Query resolution pipeline
//!
//! Implements:
//! - Edit-distance scoring (`distance`)
//! - Query normalization (`normalize`)
//! - Candidate ranking (`rank`)
//! - TTL result caching (`cache`)
//! - The `Resolver` tying them together over a candidate source

mod cache;
pub mod distance;
mod normalize;
mod rank;

pub use cache::*;
pub use normalize::*;
pub use rank::*;

use tracing::{info, warn};

use crate::error::Result;
use crate::source::CandidateSource;
use crate::types::Candidate;

/// End-to-end resolution engine over an upstream candidate source.
///
/// Pipeline: cache check → normalize → fetch → rank → cache store. All
/// state except the cache is read-only after construction, so a resolver
/// can be shared freely across request flows.
pub struct Resolver<S: CandidateSource> {
    normalizer: Normalizer,
    ranker: Ranker,
    cache: ResolveCache,
    source: S,
}

impl<S: CandidateSource> Resolver<S> {
    pub fn new(source: S, normalizer: Normalizer) -> Self {
        Self::with_parts(source, normalizer, Ranker::new(), ResolveCache::new())
    }

    pub fn with_parts(
        source: S,
        normalizer: Normalizer,
        ranker: Ranker,
        cache: ResolveCache,
    ) -> Self {
        Self {
            normalizer,
            ranker,
            cache,
            source,
        }
    }

    /// Resolve a raw query to a ranked candidate list.
    ///
    /// Results are cached per raw query for the cache TTL. An empty
    /// upstream answer to a multi-word query is retried once with just the
    /// first word before giving up; an empty list after that is a valid
    /// no-match result, not an error.
    pub fn resolve(&self, raw_query: &str) -> Result<Vec<Candidate>> {
        self.cache.resolve(raw_query, || {
            let normalized = self.normalizer.normalize(raw_query)?;
            let mut candidates = self.source.fetch(&normalized)?;

            if candidates.is_empty() {
                if let Some((primary, _)) = normalized.split_once(' ') {
                    warn!(query = %normalized, fallback = %primary, "no candidates, retrying with primary word");
                    candidates = self.source.fetch(primary)?;
                }
            }

            if candidates.is_empty() {
                info!(query = %normalized, "no candidates found");
                return Ok(Vec::new());
            }

            let ranked = self.ranker.rank(&normalized, candidates);
            info!(
                query = %raw_query,
                normalized = %normalized,
                results = ranked.len(),
                "query resolved"
            );
            Ok(ranked)
        })
    }

    pub fn cache(&self) -> &ResolveCache {
        &self.cache
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}
