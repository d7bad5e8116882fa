//! Continuous probability distributions.
//!
//! Provides the Gamma, Beta, and LogNormal distributions together with the
//! Box–Muller normal sampler they build on.  Every distribution accepts the
//! limiting parameter values `0` and `+∞` and resolves them to a degenerate
//! distribution (a point mass, or Bernoulli(½) for `Beta(0, 0)`); the
//! resolution is computed once per call by a `*Kind` classification and is
//! shared by the moments, the density, the CDF, and the sampler.
//!
//! Parameter checks follow the [`Settings`] captured at construction.  With
//! checks disabled, invalid parameters are stored as given and the formulas
//! produce whatever IEEE-754 value results (NaN, ±∞).

use cdist_core::{Error, Real, Result, Settings};
use std::cmp::Ordering;

pub mod beta;
pub mod gamma;
pub mod log_normal;
pub mod normal;

pub use beta::{Beta, BetaKind};
pub use gamma::{Gamma, GammaKind};
pub use log_normal::{LogNormal, LogNormalKind};
pub use normal::{box_muller_pair, standard_normal, NormalSamples};

/// Moments, density, and cumulative distribution of a univariate continuous
/// distribution.
pub trait ContinuousDistribution {
    /// Lower bound of the support.
    fn minimum(&self) -> Real;

    /// Upper bound of the support.
    fn maximum(&self) -> Real;

    /// Mean.
    fn mean(&self) -> Real;

    /// Variance.
    fn variance(&self) -> Real;

    /// Standard deviation.
    fn std_dev(&self) -> Real;

    /// Entropy in nats.
    fn entropy(&self) -> Real;

    /// Skewness.
    fn skewness(&self) -> Real;

    /// Mode.
    fn mode(&self) -> Real;

    /// Median, when a closed form is available.
    ///
    /// # Errors
    /// [`Error::NotSupported`] for distributions without one.
    fn median(&self) -> Result<Real>;

    /// Probability density at `x`.
    ///
    /// Zero outside the support and `+∞` at the atom of a point mass.
    fn density(&self, x: Real) -> Real;

    /// Natural logarithm of the density at `x`.
    fn density_ln(&self, x: Real) -> Real;

    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: Real) -> Real;
}

/// Accept or reject a parameter set under `settings`.
///
/// `describe` is only evaluated for an invalid set.
pub(crate) fn validate(
    settings: &Settings,
    valid: bool,
    describe: impl FnOnce() -> String,
) -> Result<()> {
    if valid {
        return Ok(());
    }
    let message = describe();
    if settings.check_parameters() {
        tracing::debug!(%message, "rejected distribution parameters");
        return Err(Error::InvalidParameter(message));
    }
    tracing::trace!(%message, "parameter checks disabled, keeping invalid parameters");
    Ok(())
}

/// Check that `p` is a probability.
pub(crate) fn check_probability(p: Real) -> Result<()> {
    cdist_core::ensure!((0.0..=1.0).contains(&p), "probability must lie in [0, 1], got {p}");
    Ok(())
}

/// The value of `(s - 1) * ln(y)` at `y = 0`.
///
/// The product is `0 * -∞` for `s = 1`, which the density treats as `0`.
pub(crate) fn ln_power_at_zero(s: Real) -> Real {
    match s.partial_cmp(&1.0) {
        Some(Ordering::Less) => f64::INFINITY,
        Some(Ordering::Equal) => 0.0,
        Some(Ordering::Greater) => f64::NEG_INFINITY,
        None => f64::NAN,
    }
}
