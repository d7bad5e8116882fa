//! # cdist-math
//!
//! Continuous distributions (Gamma, Beta, LogNormal) with moments, density,
//! CDF, and sampling; the random sources and special functions they draw on.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Uniform random sources.
pub mod random_numbers;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Special functions (Gamma, Beta, error function).
pub mod special_functions;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{Beta, ContinuousDistribution, Gamma, LogNormal};
pub use random_numbers::{MersenneTwisterUniformRng, RandomSource, RngSource};
pub use statistics::Statistics;
