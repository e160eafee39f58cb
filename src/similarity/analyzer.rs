//! Pairwise similarity analysis over a collection snapshot.
//!
//! # Overview
//!
//! The analyzer takes a snapshot of the collection and scores every
//! unordered pair `{i, j}` with `i < j` using the name similarity metric
//! from [`crate::similarity::score`]. Pairs scoring strictly above the
//! duplicate threshold are emitted in `(i, j)` enumeration order; this
//! ordering is part of the contract and makes the output deterministic.
//!
//! The workload is O(n^2) string-length comparisons. `n` is bounded by
//! practical file-picker selections, so no attempt is made to prune.
//!
//! # Example
//!
//! ```
//! use dupelens::collection::FileDescriptor;
//! use dupelens::similarity::{analyze, AnalysisResult};
//!
//! let files = vec![
//!     FileDescriptor::new("report.pdf", 1024),
//!     FileDescriptor::new("report_v2.pdf", 2048),
//! ];
//!
//! match analyze(&files).unwrap() {
//!     AnalysisResult::DuplicatesFound(pairs) => assert_eq!(pairs.len(), 1),
//!     AnalysisResult::NoDuplicates => panic!("expected a duplicate pair"),
//! }
//! ```

use crate::collection::FileDescriptor;

use super::score::{is_duplicate_score, name_similarity};
use super::{AnalysisResult, SimilarityPair};

/// Errors that can occur when starting an analysis.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Fewer than two files were submitted for analysis.
    #[error("Select at least 2 files! ({0} in collection)")]
    TooFewFiles(usize),

    /// A descriptor with an empty name reached the analyzer. The UI layer
    /// must never submit such a descriptor; this is a contract violation,
    /// not a user error.
    #[error("Descriptor at index {0} has an empty name")]
    EmptyName(usize),
}

/// Check that a snapshot is valid analyzer input.
///
/// # Errors
///
/// Returns [`AnalyzeError::TooFewFiles`] for fewer than two descriptors
/// and [`AnalyzeError::EmptyName`] for the first empty name, if any.
pub fn validate(files: &[FileDescriptor]) -> Result<(), AnalyzeError> {
    if files.len() < 2 {
        return Err(AnalyzeError::TooFewFiles(files.len()));
    }
    if let Some(index) = files.iter().position(|f| f.name.is_empty()) {
        return Err(AnalyzeError::EmptyName(index));
    }
    Ok(())
}

/// Compute all pairwise similarity scores and classify the result.
///
/// # Arguments
///
/// * `files` - Snapshot of the collection, indices `0..n-1`
///
/// # Returns
///
/// [`AnalysisResult::DuplicatesFound`] with the matching pairs in `(i, j)`
/// order, or [`AnalysisResult::NoDuplicates`] when no pair crosses the
/// threshold.
///
/// # Errors
///
/// Returns [`AnalyzeError::TooFewFiles`] for snapshots of fewer than two
/// descriptors and [`AnalyzeError::EmptyName`] if any name is empty.
pub fn analyze(files: &[FileDescriptor]) -> Result<AnalysisResult, AnalyzeError> {
    validate(files)?;

    let mut pairs = Vec::new();
    for i in 0..files.len() - 1 {
        for j in i + 1..files.len() {
            let score = name_similarity(&files[i].name, &files[j].name);
            if is_duplicate_score(score) {
                pairs.push(SimilarityPair {
                    index_a: i,
                    index_b: j,
                    score,
                });
            }
        }
    }

    log::info!(
        "Analyzed {} files ({} pairs), {} likely duplicates",
        files.len(),
        files.len() * (files.len() - 1) / 2,
        pairs.len()
    );

    if pairs.is_empty() {
        Ok(AnalysisResult::NoDuplicates)
    } else {
        Ok(AnalysisResult::DuplicatesFound(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(names: &[&str]) -> Vec<FileDescriptor> {
        names
            .iter()
            .map(|name| FileDescriptor::new(*name, 1024))
            .collect()
    }

    #[test]
    fn test_analyze_rejects_empty_collection() {
        assert_eq!(analyze(&[]), Err(AnalyzeError::TooFewFiles(0)));
    }

    #[test]
    fn test_analyze_rejects_single_file() {
        let files = descriptors(&["alone.txt"]);
        assert_eq!(analyze(&files), Err(AnalyzeError::TooFewFiles(1)));
    }

    #[test]
    fn test_analyze_rejects_empty_name() {
        let files = descriptors(&["ok.txt", ""]);
        assert_eq!(analyze(&files), Err(AnalyzeError::EmptyName(1)));
    }

    #[test]
    fn test_no_duplicates_for_dissimilar_names() {
        let files = descriptors(&["a.txt", "bbbbbbbbbb.txt"]);
        assert_eq!(analyze(&files), Ok(AnalysisResult::NoDuplicates));
    }

    #[test]
    fn test_duplicates_found_in_enumeration_order() {
        // Four equal-length names: every pair scores 100
        let files = descriptors(&["aa.txt", "bb.txt", "cc.txt", "dd.txt"]);
        let result = analyze(&files).unwrap();

        let indices: Vec<_> = result
            .pairs()
            .iter()
            .map(|p| (p.index_a, p.index_b))
            .collect();
        assert_eq!(
            indices,
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
        assert!(result.pairs().iter().all(|p| p.score == 100));
    }

    #[test]
    fn test_exact_threshold_pair_not_reported() {
        // 7 vs 10 chars scores exactly 70, which is below the strict cutoff
        let files = descriptors(&["abcdefg", "abcdefghij"]);
        assert_eq!(analyze(&files), Ok(AnalysisResult::NoDuplicates));
    }

    #[test]
    fn test_invoice_end_to_end_scenario() {
        let files = vec![
            FileDescriptor::new("invoice_final.pdf", 12 * 1024),
            FileDescriptor::new("invoice_final_v2.pdf", 13 * 1024),
            FileDescriptor::new("readme.txt", 1024),
        ];

        let result = analyze(&files).unwrap();
        let pairs = result.pairs();

        // Only (0, 1) crosses the threshold; both pairs against readme.txt
        // score well below it.
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].index_a, pairs[0].index_b), (0, 1));
        assert_eq!(pairs[0].score, 85);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let files = descriptors(&["report.pdf", "report_v2.pdf"]);
        let first = analyze(&files).unwrap();
        let second = analyze(&files).unwrap();
        assert_eq!(first, second);
    }
}
