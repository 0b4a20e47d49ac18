//! Alignment compute kernels
//!
//! This module provides the dynamic-programming kernels for pairwise
//! alignment: scoring primitives, matrix seeding, traceback, and the
//! context-aware, profile, basic and classical aligners built on top of them.

pub mod basic;
pub mod classical;
pub mod context;
pub mod matrices;
pub mod profile;
pub mod scoring;
pub mod traceback;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Alignment operation result type
pub type AlignResult<T> = Result<T, AlignError>;

/// Error types for alignment operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlignError {
    #[error("Invalid alignment mode: {0}")]
    InvalidMode(String),

    #[error("No score entry for token pair ({a}, {b})")]
    MissingScore { a: String, b: String },
}

/// The dynamic-programming regime an alignment is computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Alignment covering the entirety of both sequences
    Global,
    /// Alignment of the best-scoring contiguous sub-regions
    Local,
    /// Global alignment with free terminal gaps (semi-global)
    Overlap,
    /// Alignment built from gap-free diagonal runs
    Dialign,
}

impl Mode {
    /// The lowercase name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Global => "global",
            Mode::Local => "local",
            Mode::Overlap => "overlap",
            Mode::Dialign => "dialign",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Mode::Global),
            "local" => Ok(Mode::Local),
            "overlap" => Ok(Mode::Overlap),
            "dialign" => Ok(Mode::Dialign),
            other => Err(AlignError::InvalidMode(other.to_string())),
        }
    }
}

/// How a dialign diagonal run is scored.
///
/// The historical accumulation re-adds the score of the run's closing token
/// pair once per cell of the run; `PairSum` instead sums the distinct pair
/// scores along the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalScoring {
    /// Repeat the closing pair's score over the run length
    #[default]
    ClosingPair,
    /// Sum each aligned pair's score along the run
    PairSum,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_roundtrip() {
        for mode in [Mode::Global, Mode::Local, Mode::Overlap, Mode::Dialign] {
            assert_eq!(Mode::from_str(mode.name()).unwrap(), mode);
        }
    }

    #[test]
    fn test_invalid_mode_carries_name() {
        match Mode::from_str("semiglobal") {
            Err(AlignError::InvalidMode(name)) => assert_eq!(name, "semiglobal"),
            other => panic!("Expected InvalidMode, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_mode_message() {
        let err = Mode::from_str("").unwrap_err();
        assert_eq!(err.to_string(), "Invalid alignment mode: ");
    }
}
