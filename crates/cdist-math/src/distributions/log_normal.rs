//! Log-normal distribution: `exp(Z)` for `Z ~ Normal(μ, σ)`.

use super::{normal, validate, ContinuousDistribution, NormalSamples};
use crate::random_numbers::{MersenneTwisterUniformRng, RandomSource, RngSource};
use crate::special_functions::{erf_inv, erfc};
use crate::statistics::Statistics;
use cdist_core::{ensure, Real, Result, Settings};
use std::f64::consts::SQRT_2;

/// ln √(2π)
const LN_SQRT_2PI: Real = 0.918_938_533_204_672_8;

/// Classification of a `(μ, σ)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogNormalKind {
    /// `σ = 0`: all mass at `exp(μ)`.
    PointMass(Real),
    /// Positive `σ`.
    Regular,
}

impl LogNormalKind {
    /// Classify a parameter pair.
    pub fn classify(mu: Real, sigma: Real) -> Self {
        if sigma == 0.0 {
            LogNormalKind::PointMass(mu.exp())
        } else {
            LogNormalKind::Regular
        }
    }
}

/// Log-normal distribution with log-location `μ` and log-scale `σ ≥ 0`.
///
/// ```
/// use cdist_math::distributions::{ContinuousDistribution, LogNormal};
///
/// let d = LogNormal::with_mean_variance(2.0, 0.5).unwrap();
/// assert!((d.mean() - 2.0).abs() < 1e-12);
/// assert!((d.variance() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LogNormal<R = MersenneTwisterUniformRng> {
    mu: Real,
    sigma: Real,
    settings: Settings,
    random: R,
}

impl LogNormal {
    /// Create a LogNormal(`mu`, `sigma`) distribution with the default
    /// source and the global settings.
    ///
    /// # Errors
    /// [`cdist_core::Error::InvalidParameter`] when `mu` is not finite or
    /// `sigma` is negative, infinite, or NaN, and parameter checks are enabled.
    pub fn new(mu: Real, sigma: Real) -> Result<Self> {
        Self::with_settings(mu, sigma, Settings::global())
    }

    /// Create a distribution with explicit settings.
    pub fn with_settings(mu: Real, sigma: Real, settings: Settings) -> Result<Self> {
        LogNormal::with_source_and_settings(mu, sigma, MersenneTwisterUniformRng::default(), settings)
    }

    /// Create the distribution with the given mean and variance.
    ///
    /// `σ² = ln(1 + var/mean²)` and `μ = ln(mean) − σ²/2`.
    pub fn with_mean_variance(mean: Real, variance: Real) -> Result<Self> {
        ensure!(
            mean > 0.0 && variance >= 0.0,
            "log-normal requires mean > 0 and variance >= 0, got mean={mean}, variance={variance}"
        );
        let sigma2 = (variance / (mean * mean)).ln_1p();
        Self::new(mean.ln() - 0.5 * sigma2, sigma2.sqrt())
    }

    /// Fit `μ` and `σ` to the sample mean and standard deviation of
    /// `ln(x)` over `samples`.
    ///
    /// # Errors
    /// [`cdist_core::Error::InvalidParameter`] for fewer than two samples or
    /// a sample that is not strictly positive and finite.
    pub fn estimate<I>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = Real>,
    {
        let mut stats = Statistics::new();
        for x in samples {
            ensure!(
                x > 0.0 && x.is_finite(),
                "log-normal estimate requires positive finite samples, got {x}"
            );
            stats.add(x.ln());
        }
        let (mu, sigma) = match (stats.mean(), stats.std_dev()) {
            (Some(mu), Some(sigma)) => (mu, sigma),
            _ => {
                return Err(cdist_core::Error::InvalidParameter(format!(
                    "log-normal estimate requires at least 2 samples, got {}",
                    stats.samples()
                )))
            }
        };
        Self::new(mu, sigma)
    }

    /// Draw one variate from `rng` after validating the parameters.
    pub fn sample_with<S: RandomSource + ?Sized>(rng: &mut S, mu: Real, sigma: Real) -> Result<Real> {
        check_parameters(&Settings::global(), mu, sigma)?;
        Ok(sample_unchecked(rng, mu, sigma))
    }

    /// Infinite lazy sequence of variates drawn from `rng`, after validating
    /// the parameters.
    pub fn samples_with<S: RandomSource>(
        rng: S,
        mu: Real,
        sigma: Real,
    ) -> Result<impl Iterator<Item = Real>> {
        check_parameters(&Settings::global(), mu, sigma)?;
        Ok(NormalSamples::new(rng, mu, sigma).map(Real::exp))
    }
}

impl<R: RandomSource> LogNormal<R> {
    /// Create a distribution drawing from `random`, with the global settings.
    pub fn with_source(mu: Real, sigma: Real, random: R) -> Result<Self> {
        Self::with_source_and_settings(mu, sigma, random, Settings::global())
    }

    /// Create a distribution drawing from `random`, with explicit settings.
    pub fn with_source_and_settings(
        mu: Real,
        sigma: Real,
        random: R,
        settings: Settings,
    ) -> Result<Self> {
        check_parameters(&settings, mu, sigma)?;
        Ok(Self {
            mu,
            sigma,
            settings,
            random,
        })
    }

    /// Whether `(mu, sigma)` is a valid parameter set.
    pub fn is_valid_parameter_set(mu: Real, sigma: Real) -> bool {
        mu.is_finite() && sigma >= 0.0 && sigma.is_finite()
    }

    /// Log-location `μ`.
    pub fn mu(&self) -> Real {
        self.mu
    }

    /// Log-scale `σ`.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// Settings captured at construction.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Classification of the current parameters.
    pub fn kind(&self) -> LogNormalKind {
        LogNormalKind::classify(self.mu, self.sigma)
    }

    /// Replace both parameters.  On error nothing changes.
    pub fn set_parameters(&mut self, mu: Real, sigma: Real) -> Result<()> {
        check_parameters(&self.settings, mu, sigma)?;
        self.mu = mu;
        self.sigma = sigma;
        Ok(())
    }

    /// Replace `μ`, keeping `σ`.
    pub fn set_mu(&mut self, mu: Real) -> Result<()> {
        self.set_parameters(mu, self.sigma)
    }

    /// Replace `σ`, keeping `μ`.
    pub fn set_sigma(&mut self, sigma: Real) -> Result<()> {
        self.set_parameters(self.mu, sigma)
    }

    /// Mutable access to the random source.
    pub fn random_source_mut(&mut self) -> &mut R {
        &mut self.random
    }

    /// Replace the random source.
    pub fn set_random_source(&mut self, random: R) {
        self.random = random;
    }

    /// Inverse CDF: `exp(μ + σ√2·erf⁻¹(2p − 1))`.
    pub fn inverse_cdf(&self, p: Real) -> Result<Real> {
        super::check_probability(p)?;
        Ok(match self.kind() {
            LogNormalKind::PointMass(at) => at,
            LogNormalKind::Regular if p == 0.0 => 0.0,
            LogNormalKind::Regular if p == 1.0 => f64::INFINITY,
            LogNormalKind::Regular => (self.mu + self.sigma * SQRT_2 * erf_inv(2.0 * p - 1.0)).exp(),
        })
    }

    /// Draw one variate from the bound source.
    pub fn sample(&mut self) -> Real {
        sample_unchecked(&mut self.random, self.mu, self.sigma)
    }

    /// Infinite lazy sequence of variates from the bound source.
    ///
    /// Maps `exp` over a lazy normal sequence, so both outputs of every
    /// Box–Muller pair are used.
    pub fn samples(&mut self) -> impl Iterator<Item = Real> + '_ {
        NormalSamples::new(&mut self.random, self.mu, self.sigma).map(Real::exp)
    }

    /// Fill `values` with variates from the bound source.
    pub fn fill(&mut self, values: &mut [Real]) {
        let source = NormalSamples::new(&mut self.random, self.mu, self.sigma);
        for (v, z) in values.iter_mut().zip(source) {
            *v = z.exp();
        }
    }
}

fn check_parameters(settings: &Settings, mu: Real, sigma: Real) -> Result<()> {
    validate(
        settings,
        mu.is_finite() && sigma >= 0.0 && sigma.is_finite(),
        || format!("log-normal requires finite mu and finite sigma >= 0, got mu={mu}, sigma={sigma}"),
    )
}

/// Draw one LogNormal(`mu`, `sigma`) variate without checking the parameters.
pub(crate) fn sample_unchecked<S: RandomSource + ?Sized>(rng: &mut S, mu: Real, sigma: Real) -> Real {
    normal::sample_unchecked(rng, mu, sigma).exp()
}

impl<R> rand::distributions::Distribution<Real> for LogNormal<R> {
    fn sample<G: rand::Rng + ?Sized>(&self, rng: &mut G) -> Real {
        sample_unchecked(&mut RngSource::new(rng), self.mu, self.sigma)
    }
}

impl<R> ContinuousDistribution for LogNormal<R> {
    fn minimum(&self) -> Real {
        0.0
    }

    fn maximum(&self) -> Real {
        f64::INFINITY
    }

    fn mean(&self) -> Real {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }

    fn variance(&self) -> Real {
        let s2 = self.sigma * self.sigma;
        s2.exp_m1() * (2.0 * self.mu + s2).exp()
    }

    fn std_dev(&self) -> Real {
        self.variance().sqrt()
    }

    /// Entropy; `-∞` for `σ = 0`.
    fn entropy(&self) -> Real {
        0.5 + self.sigma.ln() + self.mu + LN_SQRT_2PI
    }

    fn skewness(&self) -> Real {
        let e = (self.sigma * self.sigma).exp();
        (e + 2.0) * (e - 1.0).sqrt()
    }

    fn mode(&self) -> Real {
        (self.mu - self.sigma * self.sigma).exp()
    }

    fn median(&self) -> Result<Real> {
        Ok(self.mu.exp())
    }

    fn density(&self, x: Real) -> Real {
        if x <= 0.0 {
            return 0.0;
        }
        match LogNormalKind::classify(self.mu, self.sigma) {
            LogNormalKind::PointMass(at) => {
                if x == at {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            LogNormalKind::Regular if x == f64::INFINITY => 0.0,
            LogNormalKind::Regular => {
                let a = (x.ln() - self.mu) / self.sigma;
                (-0.5 * a * a).exp() / (x * self.sigma * (2.0 * std::f64::consts::PI).sqrt())
            }
        }
    }

    fn density_ln(&self, x: Real) -> Real {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        match LogNormalKind::classify(self.mu, self.sigma) {
            LogNormalKind::PointMass(at) => {
                if x == at {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            }
            LogNormalKind::Regular if x == f64::INFINITY => f64::NEG_INFINITY,
            LogNormalKind::Regular => {
                let ln_x = x.ln();
                let a = (ln_x - self.mu) / self.sigma;
                -0.5 * a * a - ln_x - self.sigma.ln() - LN_SQRT_2PI
            }
        }
    }

    fn cdf(&self, x: Real) -> Real {
        if x <= 0.0 {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        match LogNormalKind::classify(self.mu, self.sigma) {
            LogNormalKind::PointMass(at) => {
                if x >= at {
                    1.0
                } else {
                    0.0
                }
            }
            LogNormalKind::Regular => 0.5 * erfc((self.mu - x.ln()) / (self.sigma * SQRT_2)),
        }
    }
}
