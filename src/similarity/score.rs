//! Name similarity scoring.
//!
//! # Overview
//!
//! The similarity metric is the ratio of the shorter name length to the
//! longer name length, scaled to a 0-100 integer:
//!
//! ```text
//! score = round(min(len_a, len_b) / max(len_a, len_b) * 100)
//! ```
//!
//! Lengths are counted in Unicode scalar values. Names of equal length
//! score exactly 100. The metric is deliberately metadata-only: no file
//! content is ever read.
//!
//! # Example
//!
//! ```
//! use dupelens::similarity::{name_similarity, DUPLICATE_THRESHOLD};
//!
//! let score = name_similarity("invoice_final.pdf", "invoice_final_v2.pdf");
//! assert!(score > DUPLICATE_THRESHOLD);
//! ```

/// Score cutoff above which a pair is reported as a likely duplicate.
///
/// The comparison is strict: a pair scoring exactly 70 is NOT reported.
pub const DUPLICATE_THRESHOLD: u8 = 70;

/// Compute the similarity score for two non-empty names.
///
/// Returns an integer in `0..=100`. Rounding is half-away-from-zero
/// (`f64::round`), so a 7-character name against a 10-character name
/// scores exactly 70.
///
/// # Panics
///
/// Debug assertion fails for empty names; callers must validate input
/// first (see [`crate::similarity::analyzer`]).
#[must_use]
pub fn name_similarity(a: &str, b: &str) -> u8 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    debug_assert!(len_a > 0 && len_b > 0, "empty names are undefined input");

    let min = len_a.min(len_b) as f64;
    let max = len_a.max(len_b) as f64;
    (min / max * 100.0).round() as u8
}

/// Check whether a score crosses the duplicate threshold.
#[must_use]
pub fn is_duplicate_score(score: u8) -> bool {
    score > DUPLICATE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_lengths_score_100() {
        assert_eq!(name_similarity("abc.txt", "xyz.doc"), 100);
    }

    #[test]
    fn test_score_is_symmetric() {
        let a = "report.pdf";
        let b = "report_final_v2.pdf";
        assert_eq!(name_similarity(a, b), name_similarity(b, a));
    }

    #[test]
    fn test_threshold_boundary_70_is_not_duplicate() {
        // 7 chars vs 10 chars: round(7/10 * 100) = 70, strict > excludes it
        let score = name_similarity("aaaaaaa", "aaaaaaaaaa");
        assert_eq!(score, 70);
        assert!(!is_duplicate_score(score));
    }

    #[test]
    fn test_threshold_boundary_78_is_duplicate() {
        // 7 chars vs 9 chars: round(7/9 * 100) = 78
        let score = name_similarity("aaaaaaa", "aaaaaaaaa");
        assert_eq!(score, 78);
        assert!(is_duplicate_score(score));
    }

    #[test]
    fn test_invoice_scenario_scores() {
        // 17 chars vs 20 chars -> round(17/20 * 100) = 85
        assert_eq!(
            name_similarity("invoice_final.pdf", "invoice_final_v2.pdf"),
            85
        );
        // Lengths 19 vs 22 -> round(19/22 * 100) = 86
        assert_eq!(
            name_similarity("invoice_final_1.pdf", "invoice_final_v2.2.pdf"),
            86
        );
    }

    #[test]
    fn test_char_counting_for_non_ascii() {
        // Both names are 10 scalar values despite different byte lengths
        assert_eq!(name_similarity("résumé.pdf", "report.pdfx"), 91);
    }

    #[test]
    fn test_score_range() {
        for (a, b) in [
            ("a", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            ("short", "short"),
            ("x.txt", "y.markdown"),
        ] {
            let score = name_similarity(a, b);
            assert!(score <= 100);
        }
    }
}
