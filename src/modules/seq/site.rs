//! Aligned sequence positions
//!
//! An alignment is a pair of equal-length sequences whose positions hold
//! either a token or a gap. Gaps are a tagged variant rather than a magic
//! string; the `-` glyph only exists at the display boundary.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The glyph used when rendering a gap position.
pub const GAP: &str = "-";

/// One position of an aligned sequence: a token or a gap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site<T> {
    Token(T),
    Gap,
}

impl<T> Site<T> {
    /// Returns the token at this position, if it is not a gap.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            Site::Token(t) => Some(t),
            Site::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Site::Gap)
    }
}

impl<T: fmt::Display> fmt::Display for Site<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Token(t) => t.fmt(f),
            Site::Gap => f.write_str(GAP),
        }
    }
}

/// One side of a local alignment: the unaligned flanks and the aligned core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSegments<T> {
    /// Tokens before the aligned region
    pub prefix: Vec<T>,
    /// The aligned region, including gaps
    pub core: Vec<Site<T>>,
    /// Tokens after the aligned region
    pub suffix: Vec<T>,
}

/// One side of a pairwise alignment.
///
/// Global, overlap and dialign alignments cover their sequence entirely and
/// come back flat; local alignments keep their unaligned flanks as separate
/// segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignedSeq<T> {
    Flat(Vec<Site<T>>),
    Segments(LocalSegments<T>),
}

impl<T> AlignedSeq<T> {
    /// The aligned sites: the whole sequence for flat alignments, the core
    /// for segmented ones.
    pub fn sites(&self) -> &[Site<T>] {
        match self {
            AlignedSeq::Flat(sites) => sites,
            AlignedSeq::Segments(segments) => &segments.core,
        }
    }

    /// Number of gap positions among the aligned sites.
    pub fn gap_count(&self) -> usize {
        self.sites().iter().filter(|site| site.is_gap()).count()
    }

    pub fn as_segments(&self) -> Option<&LocalSegments<T>> {
        match self {
            AlignedSeq::Segments(segments) => Some(segments),
            AlignedSeq::Flat(_) => None,
        }
    }
}

impl<T: Clone> AlignedSeq<T> {
    /// All tokens in sequence order with gaps stripped, flanks included.
    pub fn tokens(&self) -> Vec<T> {
        match self {
            AlignedSeq::Flat(sites) => sites.iter().filter_map(|s| s.as_token()).cloned().collect(),
            AlignedSeq::Segments(segments) => segments
                .prefix
                .iter()
                .chain(segments.core.iter().filter_map(|s| s.as_token()))
                .chain(segments.suffix.iter())
                .cloned()
                .collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for AlignedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignedSeq::Flat(sites) => {
                write!(f, "{}", sites.iter().join(" "))
            }
            AlignedSeq::Segments(segments) => write!(
                f,
                "{} | {} | {}",
                segments.prefix.iter().join(" "),
                segments.core.iter().join(" "),
                segments.suffix.iter().join(" "),
            ),
        }
    }
}

/// A completed pairwise alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairAlignment<T> {
    /// First sequence, aligned
    pub alm_a: AlignedSeq<T>,
    /// Second sequence, aligned
    pub alm_b: AlignedSeq<T>,
    /// Similarity score of the alignment
    pub score: f64,
    /// Normalized distance, when requested
    pub distance: Option<f64>,
}

impl<T: fmt::Display> PairAlignment<T> {
    /// Render the two aligned rows, one per line.
    pub fn format(&self) -> String {
        format!("{}\n{}\n", self.alm_a, self.alm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_display() {
        assert_eq!(Site::Token("th").to_string(), "th");
        assert_eq!(Site::<&str>::Gap.to_string(), "-");
    }

    #[test]
    fn test_tokens_strip_gaps() {
        let aligned = AlignedSeq::Flat(vec![
            Site::Token("a"),
            Site::Gap,
            Site::Token("b"),
        ]);
        assert_eq!(aligned.tokens(), vec!["a", "b"]);
        assert_eq!(aligned.gap_count(), 1);
    }

    #[test]
    fn test_segment_tokens_include_flanks() {
        let aligned = AlignedSeq::Segments(LocalSegments {
            prefix: vec!["x"],
            core: vec![Site::Token("a"), Site::Gap],
            suffix: vec!["y"],
        });
        assert_eq!(aligned.tokens(), vec!["x", "a", "y"]);
        assert_eq!(aligned.to_string(), "x | a - | y");
    }
}
