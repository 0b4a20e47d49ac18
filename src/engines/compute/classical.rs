//! Classical alignment algorithms
//!
//! Integer-scored Needleman-Wunsch, Smith-Waterman, Waterman-Eggert and
//! Levenshtein edit distance over raw token sequences, without any of the
//! linguistic context machinery.

use log::debug;

use super::matrices::Trace;
use super::traceback::walk_global;
use crate::modules::seq::site::{LocalSegments, Site};

/// The default scoring capability when no table is supplied: +1 on equality,
/// -1 otherwise.
pub fn unit_score<T: PartialEq>(a: &T, b: &T) -> i32 {
    if a == b {
        1
    } else {
        -1
    }
}

/// Global alignment with a uniform gap penalty.
pub fn nw_align<T, F>(
    seq_a: &[T],
    seq_b: &[T],
    score: F,
    gap: i32,
) -> (Vec<Site<T>>, Vec<Site<T>>, i32)
where
    T: Clone,
    F: Fn(&T, &T) -> i32,
{
    let m = seq_a.len();
    let n = seq_b.len();
    debug!("needleman-wunsch: {}x{} tokens", m, n);

    let mut matrix = vec![vec![0i32; m + 1]; n + 1];
    let mut traceback = vec![vec![Trace::Stop; m + 1]; n + 1];

    traceback[0][0] = Trace::Diagonal;
    for j in 1..=m {
        matrix[0][j] = matrix[0][j - 1] + gap;
        traceback[0][j] = Trace::GapB;
    }
    for i in 1..=n {
        matrix[i][0] = matrix[i - 1][0] + gap;
        traceback[i][0] = Trace::GapA;
    }

    for i in 1..=n {
        for j in 1..=m {
            let gap_a = matrix[i - 1][j] + gap;
            let gap_b = matrix[i][j - 1] + gap;
            let matched = matrix[i - 1][j - 1] + score(&seq_a[j - 1], &seq_b[i - 1]);

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

    let (alm_a, alm_b) = walk_global(&traceback, seq_a, seq_b);
    (alm_a, alm_b, matrix[n][m])
}

/// Fill a local (Smith-Waterman style) matrix pair and return it together
/// with the maximum cell.
fn fill_local<T, F>(
    seq_a: &[T],
    seq_b: &[T],
    score: F,
    gap: i32,
) -> (Vec<Vec<i32>>, Vec<Vec<Trace>>, usize, usize)
where
    F: Fn(&T, &T) -> i32,
{
    let m = seq_a.len();
    let n = seq_b.len();

    let mut matrix = vec![vec![0i32; m + 1]; n + 1];
    let mut traceback = vec![vec![Trace::Stop; m + 1]; n + 1];

    let mut sim = 0;
    let mut imax = 0;
    let mut jmax = 0;

    for i in 1..=n {
        for j in 1..=m {
            let gap_a = matrix[i - 1][j] + gap;
            let gap_b = matrix[i][j - 1] + gap;
            let matched = matrix[i - 1][j - 1] + score(&seq_a[j - 1], &seq_b[i - 1]);

            if gap_a > matched && gap_a >= gap_b && gap_a >= 0 {
                matrix[i][j] = gap_a;
                traceback[i][j] = Trace::GapA;
            } else if matched >= gap_b && matched >= 0 {
                matrix[i][j] = matched;
                traceback[i][j] = Trace::Diagonal;
            } else if gap_b >= 0 {
                matrix[i][j] = gap_b;
                traceback[i][j] = Trace::GapB;
            } else {
                matrix[i][j] = 0;
                traceback[i][j] = Trace::Stop;
            }

            if matrix[i][j] >= sim {
                sim = matrix[i][j];
                imax = i;
                jmax = j;
            }
        }
    }

    (matrix, traceback, imax, jmax)
}

/// Local alignment.
///
/// Returns the unaligned flanks and the aligned core of each sequence plus
/// the maximum similarity. The traceback inserts gaps into working copies of
/// the input sequences and cuts them at the pre- and post-alignment cursor
/// positions.
pub fn sw_align<T, F>(
    seq_a: &[T],
    seq_b: &[T],
    score: F,
    gap: i32,
) -> (LocalSegments<T>, LocalSegments<T>, i32)
where
    T: Clone,
    F: Fn(&T, &T) -> i32,
{
    debug!("smith-waterman: {}x{} tokens", seq_a.len(), seq_b.len());
    let (matrix, traceback, imax, jmax) = fill_local(seq_a, seq_b, score, gap);
    let sim = matrix[imax][jmax];

    let mut alm_a: Vec<Site<T>> = seq_a.iter().cloned().map(Site::Token).collect();
    let mut alm_b: Vec<Site<T>> = seq_b.iter().cloned().map(Site::Token).collect();

    let mut i = imax;
    let mut j = jmax;
    let mut gaps_a = 0;
    let mut gaps_b = 0;

    while traceback[i][j] != Trace::Stop {
        match traceback[i][j] {
            Trace::GapA => {
                alm_a.insert(j, Site::Gap);
                gaps_a += 1;
                i -= 1;
            }
            Trace::Diagonal => {
                i -= 1;
                j -= 1;
            }
            _ => {
                alm_b.insert(i, Site::Gap);
                gaps_b += 1;
                j -= 1;
            }
        }
    }

    let (imin, jmin) = (i, j);
    let tokens = |sites: &[Site<T>]| -> Vec<T> {
        sites.iter().filter_map(|s| s.as_token().cloned()).collect()
    };

    let seg_a = LocalSegments {
        prefix: tokens(&alm_a[..jmin]),
        core: alm_a[jmin..jmax + gaps_a].to_vec(),
        suffix: tokens(&alm_a[jmax + gaps_a..]),
    };
    let seg_b = LocalSegments {
        prefix: tokens(&alm_b[..imin]),
        core: alm_b[imin..imax + gaps_b].to_vec(),
        suffix: tokens(&alm_b[imax + gaps_b..]),
    };

    (seg_a, seg_b, sim)
}

/// All non-overlapping local alignments in non-increasing score order.
///
/// Fills like Smith-Waterman, then repeatedly extracts the best remaining
/// cell from a flat tracer copy of the scores, walks its alignment, and
/// clears the consumed rectangle of both tracer and traceback.
pub fn we_align<T, F>(
    seq_a: &[T],
    seq_b: &[T],
    score: F,
    gap: i32,
) -> Vec<(Vec<Site<T>>, Vec<Site<T>>, i32)>
where
    T: Clone,
    F: Fn(&T, &T) -> i32,
{
    debug!("waterman-eggert: {}x{} tokens", seq_a.len(), seq_b.len());
    let (matrix, mut traceback, _, _) = fill_local(seq_a, seq_b, score, gap);

    let width = seq_a.len() + 1;
    let mut tracer: Vec<i32> = matrix.iter().flatten().copied().collect();
    let mut out = Vec::new();

    loop {
        let best = tracer.iter().copied().max().unwrap_or(0);
        if best == 0 {
            break;
        }
        let Some(idx) = tracer.iter().position(|&v| v == best) else {
            break;
        };
        let imax = idx / width;
        let jmax = idx % width;

        let mut core_a = Vec::new();
        let mut core_b = Vec::new();
        let mut i = imax;
        let mut j = jmax;

        while traceback[i][j] != Trace::Stop {
            match traceback[i][j] {
                Trace::GapA => {
                    core_a.push(Site::Gap);
                    core_b.push(Site::Token(seq_b[i - 1].clone()));
                    i -= 1;
                }
                Trace::Diagonal => {
                    core_a.push(Site::Token(seq_a[j - 1].clone()));
                    core_b.push(Site::Token(seq_b[i - 1].clone()));
                    i -= 1;
                    j -= 1;
                }
                _ => {
                    core_a.push(Site::Token(seq_a[j - 1].clone()));
                    core_b.push(Site::Gap);
                    j -= 1;
                }
            }
        }

        core_a.reverse();
        core_b.reverse();
        out.push((core_a, core_b, matrix[imax][jmax]));

        // Clear the consumed rectangle. The start cell is cleared explicitly
        // as well, so a zero-penalty plateau cannot stall the sweep.
        let (imin, jmin) = (i, j);
        tracer[imax * width + jmax] = 0;
        for i in imin + 1..=imax {
            for j in jmin + 1..=jmax {
                tracer[i * width + j] = 0;
                traceback[i][j] = Trace::Stop;
            }
        }
    }

    out
}

/// Unit-cost Levenshtein distance.
pub fn edit_dist<T: PartialEq>(seq_a: &[T], seq_b: &[T]) -> usize {
    let m = seq_a.len();
    let n = seq_b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(seq_a[i - 1] != seq_b[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

/// Edit distance normalized by the longer sequence, in [0, 1].
pub fn edit_dist_normalized<T: PartialEq>(seq_a: &[T], seq_b: &[T]) -> f64 {
    let longest = seq_a.len().max(seq_b.len());
    if longest == 0 {
        return 0.0;
    }
    edit_dist(seq_a, seq_b) as f64 / longest as f64
}
