//! Matrix allocation and seeding
//!
//! Every aligner works on a pair of (N+1)×(M+1) matrices: cell scores and
//! traceback codes. Seeding of the first row and column is what
//! distinguishes the modes before the fill even starts.

use serde::{Deserialize, Serialize};

use super::Mode;

/// Traceback cell codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trace {
    /// Reset cell; produced by local mode only
    Stop,
    /// Diagonal step consuming one token of each sequence
    Diagonal,
    /// Gap in the second sequence, consuming the first
    GapB,
    /// Gap in the first sequence, consuming the second
    GapA,
}

/// Score floor for forbidden transitions. No combination of legitimate cell
/// scores can recover from it.
pub const FORBIDDEN: f64 = -1_000_000_000.0;

/// Allocate and seed the score and traceback matrices for an alignment of an
/// M-token against an N-token sequence.
///
/// `gop_a` and `gop_b` are the effective per-position gap penalties, base
/// penalty already multiplied in. Row index runs over the second sequence.
pub fn init_matrices(
    gop_a: &[f64],
    gop_b: &[f64],
    mode: Mode,
    scale: f64,
) -> (Vec<Vec<f64>>, Vec<Vec<Trace>>) {
    let m = gop_a.len();
    let n = gop_b.len();

    let mut matrix = vec![vec![0.0; m + 1]; n + 1];
    let mut traceback = vec![vec![Trace::Stop; m + 1]; n + 1];

    match mode {
        // Local alignments may reset anywhere; the origin keeps the reset
        // code and all border scores stay zero.
        Mode::Local => {}
        Mode::Global => {
            traceback[0][0] = Trace::Diagonal;
            for j in 1..=m {
                matrix[0][j] = matrix[0][j - 1] + gop_a[j - 1] * scale;
                traceback[0][j] = Trace::GapB;
            }
            for i in 1..=n {
                matrix[i][0] = matrix[i - 1][0] + gop_b[i - 1] * scale;
                traceback[i][0] = Trace::GapA;
            }
        }
        // Free end gaps: the borders are walkable but cost nothing.
        Mode::Overlap | Mode::Dialign => {
            traceback[0][0] = Trace::Diagonal;
            for j in 1..=m {
                traceback[0][j] = Trace::GapB;
            }
            for i in 1..=n {
                traceback[i][0] = Trace::GapA;
            }
        }
    }

    (matrix, traceback)
}
