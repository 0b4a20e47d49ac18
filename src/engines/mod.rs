//! Computation engines

pub mod compute;
