//! Gamedex - fuzzy game-title resolution
//!
//! Turns raw, possibly misspelled game queries into a cleaned canonical
//! search string and a ranked ordering of upstream candidates:
//! normalization with dictionary-backed typo correction, word-coverage and
//! edit-distance ranking, and TTL caching of resolved results.

pub mod dictionary;
pub mod error;
pub mod pager;
pub mod resolve;
pub mod source;
pub mod types;

pub use error::{ResolveError, Result};
pub use resolve::{Normalizer, Ranker, ResolveCache, Resolver};
pub use types::Candidate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
