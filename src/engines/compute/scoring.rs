//! Scoring primitives
//!
//! Everything the alignment kernels need to score a cell: pairwise token
//! scores from an explicit table or the simple ±1 rule, profile-column
//! scores, self-alignment baselines, and the similarity-to-distance
//! normalization.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use itertools::iproduct;

use super::{AlignError, AlignResult};
use crate::modules::seq::profile::ProfileColumn;

/// Explicit lookup table mapping ordered token pairs to scores.
#[derive(Debug, Clone)]
pub struct ScoreTable<T: Eq + Hash>(HashMap<T, HashMap<T, f64>>);

impl<T: Eq + Hash> ScoreTable<T> {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, a: T, b: T, score: f64) {
        self.0.entry(a).or_default().insert(b, score);
    }

    pub fn get(&self, a: &T, b: &T) -> Option<f64> {
        self.0.get(a)?.get(b).copied()
    }
}

impl<T: Eq + Hash> Default for ScoreTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<((T, T), f64)> for ScoreTable<T> {
    fn from_iter<I: IntoIterator<Item = ((T, T), f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for ((a, b), score) in iter {
            table.insert(a, b, score);
        }
        table
    }
}

impl<T: Eq + Hash + Clone> ScoreTable<T> {
    /// Fill a table over the Cartesian product of two observed token sets,
    /// scoring `matched` on equality and `mismatched` otherwise.
    pub fn cross(
        tokens_a: &[T],
        tokens_b: &[T],
        matched: f64,
        mismatched: f64,
    ) -> Self {
        let alphabet: Vec<&T> = tokens_a.iter().chain(tokens_b.iter()).collect();
        let mut table = Self::new();
        for (x, y) in iproduct!(alphabet.iter().copied(), alphabet.iter().copied()) {
            let score = if x == y { matched } else { mismatched };
            table.insert(x.clone(), y.clone(), score);
        }
        table
    }
}

/// The scoring capability handed to an aligner, chosen once at entry:
/// an explicit table, or the simple +1/−1 rule used when no table exists.
#[derive(Debug, Clone)]
pub enum Scorer<T: Eq + Hash> {
    Table(ScoreTable<T>),
    Simple,
}

impl<T: Eq + Hash + fmt::Debug> Scorer<T> {
    /// Score a token pair.
    ///
    /// # Errors
    /// `AlignError::MissingScore` when the table lacks an entry for the pair.
    pub fn score(&self, a: &T, b: &T) -> AlignResult<f64> {
        match self {
            Scorer::Table(table) => {
                table.get(a, b).ok_or_else(|| AlignError::MissingScore {
                    a: format!("{:?}", a),
                    b: format!("{:?}", b),
                })
            }
            Scorer::Simple => Ok(if a == b { 1.0 } else { -1.0 }),
        }
    }
}

/// Score a pair of profile columns.
///
/// Every cross-pair of column entries contributes: a pair of tokens adds its
/// pairwise score and counts 1, a pair touching an in-profile gap only adds
/// `gap_weight` to the counter. The result is the accumulated score averaged
/// over the counter; an all-gap pairing yields 0 rather than dividing by
/// zero.
pub fn score_profile<T: Eq + Hash + fmt::Debug>(
    col_a: &ProfileColumn<T>,
    col_b: &ProfileColumn<T>,
    scorer: &Scorer<T>,
    gap_weight: f64,
) -> AlignResult<f64> {
    let mut score = 0.0;
    let mut counter = 0.0;

    for (x, y) in iproduct!(col_a.entries(), col_b.entries()) {
        match (x, y) {
            (Some(x), Some(y)) => {
                score += scorer.score(x, y)?;
                counter += 1.0;
            }
            _ => counter += gap_weight,
        }
    }

    if counter == 0.0 {
        return Ok(0.0);
    }
    Ok(score / counter)
}

/// Self-alignment baseline for context-aware similarity scores.
///
/// Every position matched against itself also matches its own prosodic
/// context, so the prosodic bonus applies throughout.
pub fn self_context_score<T: Eq + Hash + fmt::Debug>(
    seq: &[T],
    scorer: &Scorer<T>,
    factor: f64,
) -> AlignResult<f64> {
    let mut sim = 0.0;
    for token in seq {
        sim += scorer.score(token, token)? * (1.0 + factor);
    }
    Ok(sim)
}

/// Self-alignment baseline for basic similarity scores.
pub fn self_basic_score<T: Eq + Hash + fmt::Debug>(
    seq: &[T],
    scorer: &Scorer<T>,
) -> AlignResult<f64> {
    let mut sim = 0.0;
    for token in seq {
        sim += scorer.score(token, token)?;
    }
    Ok(sim)
}

/// Normalize a similarity to a distance against the self-score baselines:
/// `1 − 2·sim / (self_a + self_b)`.
///
/// Identical sequences yield 0. Non-metric tables can push the result outside
/// [0, 1]; callers tolerate that.
pub fn downey_distance(sim: f64, self_a: f64, self_b: f64) -> f64 {
    1.0 - 2.0 * sim / (self_a + self_b)
}
