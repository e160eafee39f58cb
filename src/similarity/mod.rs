//! Similarity analysis module.
//!
//! This module provides functionality for:
//! - Name-length-ratio similarity scoring
//! - Pairwise analysis over a collection snapshot
//! - Result classification (duplicates found vs. none)

pub mod analyzer;
pub mod score;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use analyzer::{analyze, validate, AnalyzeError};
pub use score::{name_similarity, DUPLICATE_THRESHOLD};

/// A pair of collection positions reported as likely duplicates.
///
/// Indices refer to positions in the collection snapshot the analysis
/// ran over, with `index_a < index_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityPair {
    /// Position of the first file in the collection
    pub index_a: usize,
    /// Position of the second file in the collection
    pub index_b: usize,
    /// Similarity score in percent (always above the duplicate threshold)
    pub score: u8,
}

/// Outcome of a completed analysis.
///
/// A tagged variant rather than a bare pair list: the UI branches on the
/// tag, and `DuplicatesFound` is never constructed with an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisResult {
    /// No pair scored above the duplicate threshold.
    NoDuplicates,
    /// At least one pair scored above the threshold, in `(i, j)`
    /// enumeration order.
    DuplicatesFound(Vec<SimilarityPair>),
}

impl AnalysisResult {
    /// Check whether any duplicates were reported.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        matches!(self, Self::DuplicatesFound(_))
    }

    /// Borrow the reported pairs (empty slice for `NoDuplicates`).
    #[must_use]
    pub fn pairs(&self) -> &[SimilarityPair] {
        match self {
            Self::NoDuplicates => &[],
            Self::DuplicatesFound(pairs) => pairs,
        }
    }
}
