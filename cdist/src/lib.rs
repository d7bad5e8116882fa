//! # cdist
//!
//! Gamma, Beta, and LogNormal distributions: moments, density, log-density,
//! CDF, and sampling, with every limiting parameter value (`0`, `+∞`)
//! resolved to a well-defined degenerate distribution.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than the individual `cdist-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! cdist = "0.1"
//! ```
//!
//! ```rust
//! use cdist::math::distributions::{ContinuousDistribution, Gamma};
//! use cdist::math::random_numbers::MersenneTwisterUniformRng;
//!
//! let mut rng = MersenneTwisterUniformRng::new(42);
//! let mut g = Gamma::with_source(2.0, 1.0, &mut rng).unwrap();
//! assert_eq!(g.mean(), 2.0);
//! assert!(g.sample() >= 0.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and settings.
pub use cdist_core as core;

/// Distributions, random sources, and special functions.
pub use cdist_math as math;

pub use cdist_core::{Error, Result, Settings};
pub use cdist_math::{Beta, ContinuousDistribution, Gamma, LogNormal};
