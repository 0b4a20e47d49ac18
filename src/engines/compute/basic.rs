//! Basic pairwise alignment
//!
//! The context-free sibling of the context-aware aligner: a uniform gap
//! penalty instead of per-position weights, no prosodic bonus and no
//! restricted characters, but the same four modes and the same
//! consecutive-gap rescaling.

use std::fmt;
use std::hash::Hash;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::matrices::{init_matrices, Trace};
use super::scoring::{downey_distance, self_basic_score, Scorer};
use super::traceback::{walk_global, walk_local};
use super::{AlignResult, DiagonalScoring, Mode};
use crate::modules::seq::site::{AlignedSeq, PairAlignment};

/// Parameters of the basic aligner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicSettings {
    /// Uniform gap penalty
    pub gop: i32,
    /// Gap penalty multiplier for consecutive gaps in the same sequence
    pub scale: f64,
    pub mode: Mode,
    /// Also compute the normalized distance
    pub distance: bool,
    pub diagonal: DiagonalScoring,
}

impl Default for BasicSettings {
    fn default() -> Self {
        Self {
            gop: -1,
            scale: 0.5,
            mode: Mode::Global,
            distance: false,
            diagonal: DiagonalScoring::default(),
        }
    }
}

/// Align two token sequences without linguistic context.
pub fn basic_align<T>(
    seq_a: &[T],
    seq_b: &[T],
    scorer: &Scorer<T>,
    settings: &BasicSettings,
) -> AlignResult<PairAlignment<T>>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    let m = seq_a.len();
    let n = seq_b.len();
    debug!("basic alignment: {}x{} tokens, {} mode", m, n, settings.mode);

    let gop = f64::from(settings.gop);
    let gop_a = vec![gop; m];
    let gop_b = vec![gop; n];

    let (mut matrix, mut traceback) =
        init_matrices(&gop_a, &gop_b, settings.mode, settings.scale);

    let mut sim = 0.0;
    let mut best = (0, 0);

    for i in 1..=n {
        for j in 1..=m {
            // Gap in A, consuming B.
            let gap_a = if j == m && settings.mode == Mode::Overlap {
                matrix[i - 1][j]
            } else if settings.mode == Mode::Dialign {
                matrix[i - 1][j]
            } else if traceback[i - 1][j] == Trace::GapA {
                matrix[i - 1][j] + gop * settings.scale
            } else {
                matrix[i - 1][j] + gop
            };

            // Gap in B, consuming A.
            let gap_b = if i == n && settings.mode == Mode::Overlap {
                matrix[i][j - 1]
            } else if settings.mode == Mode::Dialign {
                matrix[i][j - 1]
            } else if traceback[i][j - 1] == Trace::GapB {
                matrix[i][j - 1] + gop * settings.scale
            } else {
                matrix[i][j - 1] + gop
            };

            let matched = if settings.mode == Mode::Dialign {
                let pair = scorer.score(&seq_a[j - 1], &seq_b[i - 1])?;
                let mut best_run = f64::NEG_INFINITY;
                let mut run = 0.0;
                for k in 0..i.min(j) {
                    run += match settings.diagonal {
                        DiagonalScoring::ClosingPair => pair,
                        DiagonalScoring::PairSum => {
                            scorer.score(&seq_a[j - 1 - k], &seq_b[i - 1 - k])?
                        }
                    };
                    best_run = best_run.max(matrix[i - k - 1][j - k - 1] + run);
                }
                best_run
            } else {
                matrix[i - 1][j - 1] + scorer.score(&seq_a[j - 1], &seq_b[i - 1])?
            };

            if settings.mode == Mode::Local {
                if gap_a > matched && gap_a >= gap_b && gap_a >= 0.0 {
                    matrix[i][j] = gap_a;
                    traceback[i][j] = Trace::GapA;
                } else if matched >= gap_b && matched >= 0.0 {
                    matrix[i][j] = matched;
                    traceback[i][j] = Trace::Diagonal;
                } else if gap_b >= 0.0 {
                    matrix[i][j] = gap_b;
                    traceback[i][j] = Trace::GapB;
                } else {
                    matrix[i][j] = 0.0;
                    traceback[i][j] = Trace::Stop;
                }
                if matrix[i][j] >= sim {
                    sim = matrix[i][j];
                    best = (i, j);
                }
            } else if gap_a > matched && gap_a >= gap_b {
                matrix[i][j] = gap_a;
                traceback[i][j] = Trace::GapA;
            } else if matched >= gap_b {
                matrix[i][j] = matched;
                traceback[i][j] = Trace::Diagonal;
            } else {
                matrix[i][j] = gap_b;
                traceback[i][j] = Trace::GapB;
            }
        }
    }

    let (alm_a, alm_b) = if settings.mode == Mode::Local {
        let (seg_a, seg_b) = walk_local(&traceback, seq_a, seq_b, best.0, best.1);
        (AlignedSeq::Segments(seg_a), AlignedSeq::Segments(seg_b))
    } else {
        sim = matrix[n][m];
        let (alm_a, alm_b) = walk_global(&traceback, seq_a, seq_b);
        (AlignedSeq::Flat(alm_a), AlignedSeq::Flat(alm_b))
    };
    trace!("fill complete, similarity {}", sim);

    let distance = if settings.distance {
        let self_a = self_basic_score(seq_a, scorer)?;
        let self_b = self_basic_score(seq_b, scorer)?;
        Some(downey_distance(sim, self_a, self_b))
    } else {
        None
    };

    Ok(PairAlignment {
        alm_a,
        alm_b,
        score: sim,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::seq::site::Site;
    use proptest::prelude::*;

    const ALPHABET: [&str; 3] = ["p", "t", "k"];

    fn token_seq(indices: &[usize]) -> Vec<&'static str> {
        indices.iter().map(|&i| ALPHABET[i]).collect()
    }

    #[test]
    fn test_global_alignment_with_trailing_gap() {
        let seq_a = ["a", "b", "a", "b"];
        let seq_b = ["a", "b", "a"];
        let scorer: Scorer<&str> = Scorer::Simple;

        let result = basic_align(
            &seq_a,
            &seq_b,
            &scorer,
            &BasicSettings {
                gop: -1,
                scale: 0.5,
                ..BasicSettings::default()
            },
        )
        .unwrap();

        assert_eq!(result.score, 2.0);
        assert_eq!(
            result.alm_a.sites(),
            &[
                Site::Token("a"),
                Site::Token("b"),
                Site::Token("a"),
                Site::Token("b"),
            ]
        );
        assert_eq!(
            result.alm_b.sites(),
            &[
                Site::Token("a"),
                Site::Token("b"),
                Site::Token("a"),
                Site::Gap,
            ]
        );
    }

    #[test]
    fn test_overlap_mode_free_leading_gap() {
        let seq_a = ["x", "x", "a", "b"];
        let seq_b = ["a", "b"];
        let scorer: Scorer<&str> = Scorer::Simple;

        let result = basic_align(
            &seq_a,
            &seq_b,
            &scorer,
            &BasicSettings {
                mode: Mode::Overlap,
                ..BasicSettings::default()
            },
        )
        .unwrap();

        assert_eq!(result.score, 2.0);
        assert_eq!(result.alm_b.gap_count(), 2);
    }

    #[test]
    fn test_dialign_identical_sequences() {
        let seq = ["a", "b", "a"];
        let scorer: Scorer<&str> = Scorer::Simple;

        let result = basic_align(
            &seq,
            &seq,
            &scorer,
            &BasicSettings {
                mode: Mode::Dialign,
                ..BasicSettings::default()
            },
        )
        .unwrap();

        assert_eq!(result.score, 3.0);
        assert_eq!(result.alm_a.gap_count(), 0);
    }

    #[test]
    fn test_distance_flag_keeps_score() {
        let seq_a = ["a", "b"];
        let seq_b = ["a", "b"];
        let scorer: Scorer<&str> = Scorer::Simple;

        let result = basic_align(
            &seq_a,
            &seq_b,
            &scorer,
            &BasicSettings {
                distance: true,
                ..BasicSettings::default()
            },
        )
        .unwrap();

        assert_eq!(result.score, 2.0);
        assert!(result.distance.unwrap().abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_global_alignment_covers_both_sequences(
            a in proptest::collection::vec(0..3usize, 1..10),
            b in proptest::collection::vec(0..3usize, 1..10),
        ) {
            let seq_a = token_seq(&a);
            let seq_b = token_seq(&b);
            let scorer: Scorer<&str> = Scorer::Simple;

            let result = basic_align(&seq_a, &seq_b, &scorer, &BasicSettings::default()).unwrap();
            prop_assert_eq!(result.alm_a.sites().len(), result.alm_b.sites().len());
            prop_assert_eq!(result.alm_a.tokens(), seq_a);
            prop_assert_eq!(result.alm_b.tokens(), seq_b);
        }

        #[test]
        fn prop_distance_is_symmetric(
            a in proptest::collection::vec(0..3usize, 1..10),
            b in proptest::collection::vec(0..3usize, 1..10),
        ) {
            let seq_a = token_seq(&a);
            let seq_b = token_seq(&b);
            let scorer: Scorer<&str> = Scorer::Simple;
            let settings = BasicSettings { distance: true, ..BasicSettings::default() };

            let ab = basic_align(&seq_a, &seq_b, &scorer, &settings).unwrap();
            let ba = basic_align(&seq_b, &seq_a, &scorer, &settings).unwrap();
            prop_assert!((ab.distance.unwrap() - ba.distance.unwrap()).abs() < 1e-9);
        }

        #[test]
        fn prop_local_similarity_is_non_negative(
            a in proptest::collection::vec(0..3usize, 1..10),
            b in proptest::collection::vec(0..3usize, 1..10),
        ) {
            let seq_a = token_seq(&a);
            let seq_b = token_seq(&b);
            let scorer: Scorer<&str> = Scorer::Simple;
            let settings = BasicSettings { mode: Mode::Local, ..BasicSettings::default() };

            let result = basic_align(&seq_a, &seq_b, &scorer, &settings).unwrap();
            prop_assert!(result.score >= 0.0);
        }
    }
}
