//! Core types for the resolution engine

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A search candidate returned by an upstream source.
///
/// Ranking only ever looks at `title` and `quality_score`. Everything else
/// the upstream knows about a game (platforms, genres, release dates, cover
/// art) rides along in the opaque `metadata` bag and is returned untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Display title, exactly as the upstream returned it
    pub title: String,
    /// Aggregate quality rating on a 0-100 scale, when the source has one
    #[serde(default)]
    pub quality_score: Option<f32>,
    /// Opaque upstream fields, passed through unread
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Candidate {
    /// Candidate with a bare title and no rating
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            quality_score: None,
            metadata: HashMap::new(),
        }
    }

    /// Candidate with a title and a quality rating
    pub fn with_quality(title: impl Into<String>, quality_score: f32) -> Self {
        Self {
            title: title.into(),
            quality_score: Some(quality_score),
            metadata: HashMap::new(),
        }
    }

    /// Quality rating with missing values treated as zero
    pub(crate) fn quality(&self) -> f32 {
        self.quality_score.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_quality_is_zero() {
        assert_eq!(Candidate::new("Tetris").quality(), 0.0);
        assert_eq!(Candidate::with_quality("Tetris", 88.0).quality(), 88.0);
    }

    #[test]
    fn test_candidate_deserializes_without_optional_fields() {
        let candidate: Candidate = serde_json::from_str(r#"{"title":"Doom"}"#).unwrap();
        assert_eq!(candidate.title, "Doom");
        assert!(candidate.quality_score.is_none());
        assert!(candidate.metadata.is_empty());
    }

    #[test]
    fn test_metadata_roundtrip() {
        let raw = r#"{"title":"Myst","quality_score":77.5,"metadata":{"platform":"PC"}}"#;
        let candidate: Candidate = serde_json::from_str(raw).unwrap();
        assert_eq!(candidate.metadata["platform"], "PC");
        let back = serde_json::to_string(&candidate).unwrap();
        let again: Candidate = serde_json::from_str(&back).unwrap();
        assert_eq!(again.metadata["platform"], "PC");
    }
}
