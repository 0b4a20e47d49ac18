//! Pairwise sequence alignment engine for computational historical linguistics
//!
//! This library provides the core dynamic-programming kernels used to align
//! discrete token sequences (sound classes, IPA segments) under global,
//! local, overlap and dialign regimes.
//!
//! # Features
//! - Context-aware alignment with per-position gap weights, prosodic context
//!   strings, restricted characters and a prosodic match bonus
//! - Profile-column alignment for merging existing alignments
//! - Basic alignment with a uniform gap penalty in all four modes
//! - Classical Needleman-Wunsch, Smith-Waterman, Waterman-Eggert and
//!   Levenshtein edit distance over raw tokens
//! - Similarity-to-distance normalization against self-alignment baselines

pub mod engines;
pub mod modules;

// Re-export commonly used items
pub use engines::compute::basic::{basic_align, BasicSettings};
pub use engines::compute::classical::{
    edit_dist, edit_dist_normalized, nw_align, sw_align, unit_score, we_align,
};
pub use engines::compute::context::{sc_align, ContextSettings};
pub use engines::compute::matrices::{init_matrices, Trace, FORBIDDEN};
pub use engines::compute::profile::{profile_align, ProfileSettings};
pub use engines::compute::scoring::{
    downey_distance, score_profile, self_basic_score, self_context_score, ScoreTable, Scorer,
};
pub use engines::compute::traceback::{walk_global, walk_local};
pub use engines::compute::{AlignError, AlignResult, DiagonalScoring, Mode};
pub use modules::seq::context::ContextSeq;
pub use modules::seq::profile::{ProfileColumn, PROFILE_GAP};
pub use modules::seq::site::{AlignedSeq, LocalSegments, PairAlignment, Site, GAP};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_metadata() {
        assert_eq!(PKG_NAME, "lingalign");
        assert!(!VERSION.is_empty());
    }

    // End-to-end smoke test through the root re-exports.
    #[test]
    fn test_cognate_pair_alignment() {
        let german = ["t", "o", "x", "t", "e", "r"];
        let english = ["d", "o", "t", "e", "r"];
        let weights_a = vec![1.0; german.len()];
        let weights_b = vec![1.0; english.len()];
        let prosody_a = ['C', 'V', 'C', 'C', 'V', 'c'];
        let prosody_b = ['C', 'V', 'C', 'V', 'c'];

        let table = ScoreTable::cross(&german, &english, 2.0, -1.0);
        let scorer = Scorer::Table(table);

        let result = sc_align(
            ContextSeq::new(&german, &weights_a, &prosody_a),
            ContextSeq::new(&english, &weights_b, &prosody_b),
            &scorer,
            &ContextSettings {
                distance: true,
                ..ContextSettings::default()
            },
        )
        .unwrap();

        assert_eq!(result.alm_a.sites().len(), result.alm_b.sites().len());
        assert_eq!(result.alm_b.gap_count(), 1);
        let distance = result.distance.unwrap();
        assert!(distance > 0.0 && distance < 1.0);
    }
}
