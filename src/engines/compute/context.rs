//! Context-aware pairwise alignment
//!
//! The central recurrence of the engine. Beyond plain dynamic programming it
//! knows about the linguistic context of every position: per-position
//! gap-opening weights, prosodic context codes with a match bonus,
//! consecutive-gap rescaling, and restricted prosodic characters that may
//! only align against each other.

use std::fmt;
use std::hash::Hash;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::matrices::{init_matrices, Trace, FORBIDDEN};
use super::scoring::{downey_distance, self_context_score, Scorer};
use super::traceback::{walk_global, walk_local};
use super::{AlignResult, DiagonalScoring, Mode};
use crate::modules::seq::context::ContextSeq;
use crate::modules::seq::site::{AlignedSeq, PairAlignment};

/// Parameters of the context-aware aligner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSettings {
    /// Base gap penalty, multiplied by the per-position weights
    pub gop: i32,
    /// Gap penalty multiplier for consecutive gaps in the same sequence
    pub scale: f64,
    /// Score bonus for matching prosodic context
    pub factor: f64,
    /// Prosodic codes that may only align against each other
    pub restricted: String,
    pub mode: Mode,
    /// Also compute the normalized distance
    pub distance: bool,
    pub diagonal: DiagonalScoring,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            gop: -1,
            scale: 0.5,
            factor: 0.3,
            restricted: "T_".to_string(),
            mode: Mode::Global,
            distance: false,
            diagonal: DiagonalScoring::default(),
        }
    }
}

/// Align two context-annotated sequences.
///
/// The prosodic bonus scales a match by `1 + factor` when the two prosodic
/// codes agree and by `1 + factor/2` when they are at least two code points
/// apart; gap penalties are the per-position weights times `gop`, rescaled by
/// `scale` while a gap run continues. Restricted-context positions may not be
/// consumed against an unrestricted context except at the terminal
/// row/column.
pub fn sc_align<T>(
    seq_a: ContextSeq<'_, T>,
    seq_b: ContextSeq<'_, T>,
    scorer: &Scorer<T>,
    settings: &ContextSettings,
) -> AlignResult<PairAlignment<T>>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    let m = seq_a.len();
    let n = seq_b.len();
    debug!(
        "context alignment: {}x{} tokens, {} mode",
        m, n, settings.mode
    );

    // Effective per-position gap penalties.
    let gop_a: Vec<f64> = seq_a
        .weights
        .iter()
        .map(|w| f64::from(settings.gop) * w)
        .collect();
    let gop_b: Vec<f64> = seq_b
        .weights
        .iter()
        .map(|w| f64::from(settings.gop) * w)
        .collect();

    let (mut matrix, mut traceback) =
        init_matrices(&gop_a, &gop_b, settings.mode, settings.scale);

    let mut sim = 0.0;
    let mut best = (0, 0);

    for i in 1..=n {
        for j in 1..=m {
            let pro_a = seq_a.prosody[j - 1];
            let pro_b = seq_b.prosody[i - 1];
            let res_a = settings.restricted.contains(pro_a);
            let res_b = settings.restricted.contains(pro_b);

            // Gap in A, consuming B.
            let gap_a = if j == m && settings.mode == Mode::Overlap {
                matrix[i - 1][j]
            } else if res_b && !res_a && j != m {
                matrix[i - 1][j] + FORBIDDEN
            } else if settings.mode == Mode::Dialign {
                matrix[i - 1][j]
            } else if traceback[i - 1][j] == Trace::GapA {
                matrix[i - 1][j] + gop_b[i - 1] * settings.scale
            } else {
                matrix[i - 1][j] + gop_b[i - 1]
            };

            // Gap in B, consuming A.
            let gap_b = if i == n && settings.mode == Mode::Overlap {
                matrix[i][j - 1]
            } else if res_a && !res_b && i != n {
                matrix[i][j - 1] + FORBIDDEN
            } else if settings.mode == Mode::Dialign {
                matrix[i][j - 1]
            } else if traceback[i][j - 1] == Trace::GapB {
                matrix[i][j - 1] + gop_a[j - 1] * settings.scale
            } else {
                matrix[i][j - 1] + gop_a[j - 1]
            };

            // Prosodic multiplier for the pair closing at this cell.
            let bonus = if pro_a == pro_b {
                1.0 + settings.factor
            } else if (pro_a as i32 - pro_b as i32).abs() >= 2 {
                1.0 + settings.factor * 0.5
            } else {
                1.0
            };

            let matched = if settings.mode == Mode::Dialign {
                let pair =
                    scorer.score(&seq_a.tokens[j - 1], &seq_b.tokens[i - 1])? * bonus;
                let mut best_run = f64::NEG_INFINITY;
                let mut run = 0.0;
                for k in 0..i.min(j) {
                    run += match settings.diagonal {
                        DiagonalScoring::ClosingPair => pair,
                        DiagonalScoring::PairSum => {
                            scorer.score(&seq_a.tokens[j - 1 - k], &seq_b.tokens[i - 1 - k])?
                                * bonus
                        }
                    };
                    best_run = best_run.max(matrix[i - k - 1][j - k - 1] + run);
                }
                best_run
            } else {
                matrix[i - 1][j - 1]
                    + scorer.score(&seq_a.tokens[j - 1], &seq_b.tokens[i - 1])? * bonus
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
        let (seg_a, seg_b) = walk_local(&traceback, seq_a.tokens, seq_b.tokens, best.0, best.1);
        (AlignedSeq::Segments(seg_a), AlignedSeq::Segments(seg_b))
    } else {
        sim = matrix[n][m];
        let (alm_a, alm_b) = walk_global(&traceback, seq_a.tokens, seq_b.tokens);
        (AlignedSeq::Flat(alm_a), AlignedSeq::Flat(alm_b))
    };
    trace!("fill complete, similarity {}", sim);

    let distance = if settings.distance {
        let self_a = self_context_score(seq_a.tokens, scorer, settings.factor)?;
        let self_b = self_context_score(seq_b.tokens, scorer, settings.factor)?;
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
