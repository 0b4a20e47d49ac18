//! Profile-column alignment
//!
//! Aligns two profiles (columns of an already-built alignment) against each
//! other with the same context-aware recurrence as token alignment, scoring
//! cells over all cross-pairs of column entries. Used when merging partial
//! alignments.

use std::fmt;
use std::hash::Hash;

use log::debug;
use serde::{Deserialize, Serialize};

use super::matrices::{init_matrices, Trace, FORBIDDEN};
use super::scoring::{score_profile, Scorer};
use super::traceback::walk_global;
use super::{AlignError, AlignResult, DiagonalScoring, Mode};
use crate::modules::seq::context::ContextSeq;
use crate::modules::seq::profile::ProfileColumn;
use crate::modules::seq::site::{AlignedSeq, PairAlignment};

/// Parameters of the profile aligner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Base gap penalty, multiplied by the per-column weights
    pub gop: i32,
    /// Gap penalty multiplier for consecutive gaps in the same profile
    pub scale: f64,
    /// Score bonus for matching prosodic context
    pub factor: f64,
    /// Prosodic codes that may only align against each other
    pub restricted: String,
    /// One of global, overlap, dialign; local profiles are not alignable
    pub mode: Mode,
    /// Counter weight of in-profile gaps during column scoring
    pub gap_weight: f64,
    pub diagonal: DiagonalScoring,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            gop: -1,
            scale: 0.5,
            factor: 0.3,
            restricted: "T_".to_string(),
            mode: Mode::Global,
            gap_weight: 0.5,
            diagonal: DiagonalScoring::default(),
        }
    }
}

/// Align two profiles column-wise.
///
/// Identical in structure to token alignment, with column-pair scores in
/// place of token-pair scores. Only global, overlap and dialign modes exist
/// for profiles.
///
/// # Errors
/// `AlignError::InvalidMode` for `Mode::Local`; `AlignError::MissingScore`
/// when the table lacks an entry for a pair of column tokens.
pub fn profile_align<T>(
    prof_a: ContextSeq<'_, ProfileColumn<T>>,
    prof_b: ContextSeq<'_, ProfileColumn<T>>,
    scorer: &Scorer<T>,
    settings: &ProfileSettings,
) -> AlignResult<PairAlignment<ProfileColumn<T>>>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    if settings.mode == Mode::Local {
        return Err(AlignError::InvalidMode(Mode::Local.name().to_string()));
    }

    let m = prof_a.len();
    let n = prof_b.len();
    debug!(
        "profile alignment: {}x{} columns, {} mode",
        m, n, settings.mode
    );

    let gop_a: Vec<f64> = prof_a
        .weights
        .iter()
        .map(|w| f64::from(settings.gop) * w)
        .collect();
    let gop_b: Vec<f64> = prof_b
        .weights
        .iter()
        .map(|w| f64::from(settings.gop) * w)
        .collect();

    let (mut matrix, mut traceback) =
        init_matrices(&gop_a, &gop_b, settings.mode, settings.scale);

    for i in 1..=n {
        for j in 1..=m {
            let pro_a = prof_a.prosody[j - 1];
            let pro_b = prof_b.prosody[i - 1];
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

            let bonus = if pro_a == pro_b {
                1.0 + settings.factor
            } else if (pro_a as i32 - pro_b as i32).abs() >= 2 {
                1.0 + settings.factor * 0.5
            } else {
                1.0
            };

            let matched = if settings.mode == Mode::Dialign {
                let pair = score_profile(
                    &prof_a.tokens[j - 1],
                    &prof_b.tokens[i - 1],
                    scorer,
                    settings.gap_weight,
                )? * bonus;
                let mut best_run = f64::NEG_INFINITY;
                let mut run = 0.0;
                for k in 0..i.min(j) {
                    run += match settings.diagonal {
                        DiagonalScoring::ClosingPair => pair,
                        DiagonalScoring::PairSum => {
                            score_profile(
                                &prof_a.tokens[j - 1 - k],
                                &prof_b.tokens[i - 1 - k],
                                scorer,
                                settings.gap_weight,
                            )? * bonus
                        }
                    };
                    best_run = best_run.max(matrix[i - k - 1][j - k - 1] + run);
                }
                best_run
            } else {
                matrix[i - 1][j - 1]
                    + score_profile(
                        &prof_a.tokens[j - 1],
                        &prof_b.tokens[i - 1],
                        scorer,
                        settings.gap_weight,
                    )? * bonus
            };

            if gap_a > matched && gap_a >= gap_b {
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

    let sim = matrix[n][m];
    let (alm_a, alm_b) = walk_global(&traceback, prof_a.tokens, prof_b.tokens);

    Ok(PairAlignment {
        alm_a: AlignedSeq::Flat(alm_a),
        alm_b: AlignedSeq::Flat(alm_b),
        score: sim,
        distance: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::seq::site::Site;

    fn column(tokens: &[Option<&'static str>]) -> ProfileColumn<&'static str> {
        ProfileColumn::new(tokens.to_vec())
    }

    fn plain_settings() -> ProfileSettings {
        ProfileSettings {
            gop: -1,
            scale: 1.0,
            factor: 0.0,
            restricted: String::new(),
            gap_weight: 0.5,
            ..ProfileSettings::default()
        }
    }

    #[test]
    fn test_local_mode_is_rejected() {
        let cols = [column(&[Some("a")])];
        let weights = [1.0];
        let prosody = ['C'];
        let prof = ContextSeq::new(&cols, &weights, &prosody);
        let scorer: Scorer<&str> = Scorer::Simple;

        let err = profile_align(
            prof,
            prof,
            &scorer,
            &ProfileSettings {
                mode: Mode::Local,
                ..plain_settings()
            },
        )
        .unwrap_err();
        assert_eq!(err, AlignError::InvalidMode("local".to_string()));
    }

    #[test]
    fn test_shorter_profile_is_gapped() {
        let cols_a = [column(&[Some("a")]), column(&[Some("b")])];
        let cols_b = [column(&[Some("a")])];
        let weights_a = [1.0, 1.0];
        let weights_b = [1.0];
        let prosody_a = ['C', 'C'];
        let prosody_b = ['C'];
        let scorer: Scorer<&str> = Scorer::Simple;

        let result = profile_align(
            ContextSeq::new(&cols_a, &weights_a, &prosody_a),
            ContextSeq::new(&cols_b, &weights_b, &prosody_b),
            &scorer,
            &plain_settings(),
        )
        .unwrap();

        assert_eq!(result.score, 0.0);
        assert!(result.distance.is_none());
        assert_eq!(
            result.alm_b.sites(),
            &[Site::Token(column(&[Some("a")])), Site::Gap]
        );
    }

    #[test]
    fn test_deep_columns_average_over_members() {
        // One column of depth two against itself: one (a, a) pair plus three
        // gap pairings at weight 0.5 average to 1 / 2.5.
        let cols = [column(&[Some("a"), None])];
        let weights = [1.0];
        let prosody = ['C'];
        let prof = ContextSeq::new(&cols, &weights, &prosody);
        let scorer: Scorer<&str> = Scorer::Simple;

        let result = profile_align(prof, prof, &scorer, &plain_settings()).unwrap();
        assert!((result.score - 0.4).abs() < 1e-9);
    }
}
