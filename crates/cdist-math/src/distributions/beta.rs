//! Beta distribution on `[0, 1]` with shape parameters `α` and `β`.
//!
//! Variates are the ratio `X / (X + Y)` of two independent standard Gamma
//! variates `X ~ Γ(α, 1)`, `Y ~ Γ(β, 1)`.

use super::{gamma, ln_power_at_zero, validate, ContinuousDistribution};
use crate::random_numbers::{MersenneTwisterUniformRng, RandomSource, RngSource};
use crate::solvers1d;
use crate::special_functions::{beta_regularized, digamma, ln_beta, ln_gamma};
use cdist_core::{not_supported, Real, Result, Settings};

/// Above this shape the density is evaluated in the log domain.
const LOG_DOMAIN_SHAPE: Real = 80.0;

/// Classification of an `(α, β)` pair.
///
/// Infinite shapes are checked before zero shapes, so `Beta(0, ∞)` is the
/// point mass at 0 and `Beta(∞, 0)` the point mass at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BetaKind {
    /// All mass at one point: `0.5` for `α = β = ∞`, `1` for `α = ∞` or
    /// `β = 0`, `0` for `β = ∞` or `α = 0`.
    PointMass(Real),
    /// `α = β = 0`: half the mass at 0 and half at 1.
    BernoulliHalf,
    /// `α = β = 1`: uniform on `[0, 1]`.
    Uniform,
    /// Finite positive shapes.
    Regular,
}

impl BetaKind {
    /// Classify a parameter pair.
    pub fn classify(a: Real, b: Real) -> Self {
        let (a_inf, b_inf) = (a == f64::INFINITY, b == f64::INFINITY);
        if a_inf && b_inf {
            BetaKind::PointMass(0.5)
        } else if a_inf {
            BetaKind::PointMass(1.0)
        } else if b_inf {
            BetaKind::PointMass(0.0)
        } else if a == 0.0 && b == 0.0 {
            BetaKind::BernoulliHalf
        } else if a == 0.0 {
            BetaKind::PointMass(0.0)
        } else if b == 0.0 {
            BetaKind::PointMass(1.0)
        } else if a == 1.0 && b == 1.0 {
            BetaKind::Uniform
        } else {
            BetaKind::Regular
        }
    }
}

/// Beta distribution with shapes `α ≥ 0` and `β ≥ 0`.
///
/// ```
/// use cdist_math::distributions::{Beta, ContinuousDistribution};
///
/// let b = Beta::new(0.0, 0.0).unwrap();
/// assert_eq!(b.cdf(0.3), 0.5);
/// assert_eq!(b.density(1.0), f64::INFINITY);
/// ```
#[derive(Debug, Clone)]
pub struct Beta<R = MersenneTwisterUniformRng> {
    a: Real,
    b: Real,
    settings: Settings,
    random: R,
}

impl Beta {
    /// Create a Beta(`a`, `b`) distribution with the default source and the
    /// global settings.
    ///
    /// # Errors
    /// [`cdist_core::Error::InvalidParameter`] when either shape is negative
    /// or NaN and parameter checks are enabled.
    pub fn new(a: Real, b: Real) -> Result<Self> {
        Self::with_settings(a, b, Settings::global())
    }

    /// Create a distribution with explicit settings.
    pub fn with_settings(a: Real, b: Real, settings: Settings) -> Result<Self> {
        Beta::with_source_and_settings(a, b, MersenneTwisterUniformRng::default(), settings)
    }

    /// Draw one variate from `rng` after validating the parameters.
    pub fn sample_with<S: RandomSource + ?Sized>(rng: &mut S, a: Real, b: Real) -> Result<Real> {
        check_parameters(&Settings::global(), a, b)?;
        Ok(sample_unchecked(rng, a, b))
    }

    /// Infinite lazy sequence of variates drawn from `rng`, after validating
    /// the parameters.
    pub fn samples_with<S: RandomSource>(mut rng: S, a: Real, b: Real) -> Result<impl Iterator<Item = Real>> {
        check_parameters(&Settings::global(), a, b)?;
        Ok(std::iter::repeat_with(move || sample_unchecked(&mut rng, a, b)))
    }
}

impl<R: RandomSource> Beta<R> {
    /// Create a distribution drawing from `random`, with the global settings.
    pub fn with_source(a: Real, b: Real, random: R) -> Result<Self> {
        Self::with_source_and_settings(a, b, random, Settings::global())
    }

    /// Create a distribution drawing from `random`, with explicit settings.
    pub fn with_source_and_settings(a: Real, b: Real, random: R, settings: Settings) -> Result<Self> {
        check_parameters(&settings, a, b)?;
        Ok(Self {
            a,
            b,
            settings,
            random,
        })
    }

    /// Whether `(a, b)` is a valid parameter set.
    pub fn is_valid_parameter_set(a: Real, b: Real) -> bool {
        a >= 0.0 && b >= 0.0
    }

    /// Shape parameter α.
    pub fn a(&self) -> Real {
        self.a
    }

    /// Shape parameter β.
    pub fn b(&self) -> Real {
        self.b
    }

    /// Settings captured at construction.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Classification of the current parameters.
    pub fn kind(&self) -> BetaKind {
        BetaKind::classify(self.a, self.b)
    }

    /// Replace both shapes.  On error nothing changes.
    pub fn set_parameters(&mut self, a: Real, b: Real) -> Result<()> {
        check_parameters(&self.settings, a, b)?;
        self.a = a;
        self.b = b;
        Ok(())
    }

    /// Replace α, keeping β.
    pub fn set_a(&mut self, a: Real) -> Result<()> {
        self.set_parameters(a, self.b)
    }

    /// Replace β, keeping α.
    pub fn set_b(&mut self, b: Real) -> Result<()> {
        self.set_parameters(self.a, b)
    }

    /// Mutable access to the random source.
    pub fn random_source_mut(&mut self) -> &mut R {
        &mut self.random
    }

    /// Replace the random source.
    pub fn set_random_source(&mut self, random: R) {
        self.random = random;
    }

    /// Inverse CDF (quantile function).
    ///
    /// For `Beta(0, 0)` returns 0 for `p ≤ ½` and 1 above.
    pub fn inverse_cdf(&self, p: Real) -> Result<Real> {
        super::check_probability(p)?;
        Ok(match self.kind() {
            BetaKind::PointMass(at) => at,
            BetaKind::BernoulliHalf => {
                if p <= 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            BetaKind::Uniform => p,
            BetaKind::Regular if p == 0.0 => 0.0,
            BetaKind::Regular if p == 1.0 => 1.0,
            BetaKind::Regular => solvers1d::brent(|x| self.cdf(x) - p, 0.0, 1.0, 0.0)?,
        })
    }

    /// Draw one variate from the bound source.
    pub fn sample(&mut self) -> Real {
        sample_unchecked(&mut self.random, self.a, self.b)
    }

    /// Infinite lazy sequence of variates from the bound source.
    pub fn samples(&mut self) -> impl Iterator<Item = Real> + '_ {
        let (a, b) = (self.a, self.b);
        let random = &mut self.random;
        std::iter::repeat_with(move || sample_unchecked(&mut *random, a, b))
    }

    /// Fill `values` with variates from the bound source.
    pub fn fill(&mut self, values: &mut [Real]) {
        for v in values.iter_mut() {
            *v = sample_unchecked(&mut self.random, self.a, self.b);
        }
    }
}

fn check_parameters(settings: &Settings, a: Real, b: Real) -> Result<()> {
    validate(settings, a >= 0.0 && b >= 0.0, || {
        format!("beta requires a >= 0 and b >= 0, got a={a}, b={b}")
    })
}

/// Draw one Beta(`a`, `b`) variate without checking the parameters.
///
/// Point masses consume no entropy and `Beta(0, 0)` consumes one uniform.
pub(crate) fn sample_unchecked<S: RandomSource + ?Sized>(rng: &mut S, a: Real, b: Real) -> Real {
    match BetaKind::classify(a, b) {
        BetaKind::PointMass(at) => at,
        BetaKind::BernoulliHalf => {
            if rng.next_real() < 0.5 {
                0.0
            } else {
                1.0
            }
        }
        BetaKind::Uniform | BetaKind::Regular => {
            let x = gamma::sample_unchecked(rng, a, 1.0);
            let y = gamma::sample_unchecked(rng, b, 1.0);
            let sum = x + y;
            if sum == 0.0 {
                // both draws underflowed; the limit puts mass a/(a+b) at 1
                if rng.next_real() * (a + b) < a {
                    1.0
                } else {
                    0.0
                }
            } else {
                x / sum
            }
        }
    }
}

impl<R> rand::distributions::Distribution<Real> for Beta<R> {
    fn sample<G: rand::Rng + ?Sized>(&self, rng: &mut G) -> Real {
        sample_unchecked(&mut RngSource::new(rng), self.a, self.b)
    }
}

impl<R> ContinuousDistribution for Beta<R> {
    fn minimum(&self) -> Real {
        0.0
    }

    fn maximum(&self) -> Real {
        1.0
    }

    fn mean(&self) -> Real {
        match BetaKind::classify(self.a, self.b) {
            BetaKind::PointMass(at) => at,
            BetaKind::BernoulliHalf => 0.5,
            _ => self.a / (self.a + self.b),
        }
    }

    fn variance(&self) -> Real {
        let (a, b) = (self.a, self.b);
        match BetaKind::classify(a, b) {
            BetaKind::PointMass(_) => 0.0,
            BetaKind::BernoulliHalf => 0.25,
            _ => (a * b) / ((a + b) * (a + b) * (a + b + 1.0)),
        }
    }

    fn std_dev(&self) -> Real {
        self.variance().sqrt()
    }

    fn entropy(&self) -> Real {
        let (a, b) = (self.a, self.b);
        match BetaKind::classify(a, b) {
            BetaKind::PointMass(_) => 0.0,
            BetaKind::BernoulliHalf => std::f64::consts::LN_2,
            BetaKind::Uniform => 0.0,
            BetaKind::Regular => {
                ln_beta(a, b) - (a - 1.0) * digamma(a) - (b - 1.0) * digamma(b)
                    + (a + b - 2.0) * digamma(a + b)
            }
        }
    }

    /// Skewness; the point masses keep the sign of the limit they come from
    /// (`-2` at 1, `+2` at 0).
    fn skewness(&self) -> Real {
        let (a, b) = (self.a, self.b);
        match BetaKind::classify(a, b) {
            BetaKind::PointMass(at) if at == 1.0 => -2.0,
            BetaKind::PointMass(at) if at == 0.0 => 2.0,
            BetaKind::PointMass(_) | BetaKind::BernoulliHalf | BetaKind::Uniform => 0.0,
            BetaKind::Regular => {
                2.0 * (b - a) * (a + b + 1.0).sqrt() / ((a + b + 2.0) * (a * b).sqrt())
            }
        }
    }

    /// Mode, clamped to the support when one shape is below one.
    ///
    /// For `α < 1` and `β < 1` the density is U-shaped and the value returned
    /// is the interior stationary point.
    fn mode(&self) -> Real {
        let (a, b) = (self.a, self.b);
        match BetaKind::classify(a, b) {
            BetaKind::PointMass(at) => at,
            BetaKind::BernoulliHalf | BetaKind::Uniform => 0.5,
            BetaKind::Regular => ((a - 1.0) / (a + b - 2.0)).clamp(0.0, 1.0),
        }
    }

    fn median(&self) -> Result<Real> {
        not_supported!("the beta distribution has no closed-form median")
    }

    fn density(&self, x: Real) -> Real {
        if !(0.0..=1.0).contains(&x) {
            return 0.0;
        }
        let (a, b) = (self.a, self.b);
        match BetaKind::classify(a, b) {
            BetaKind::PointMass(at) => {
                if x == at {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            BetaKind::BernoulliHalf => {
                if x == 0.0 || x == 1.0 {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            BetaKind::Uniform => 1.0,
            BetaKind::Regular if a > LOG_DOMAIN_SHAPE || b > LOG_DOMAIN_SHAPE => {
                self.density_ln(x).exp()
            }
            BetaKind::Regular => {
                let norm = (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b)).exp();
                let p = norm * x.powf(a - 1.0) * (1.0 - x).powf(b - 1.0);
                if p.is_finite() || x == 0.0 || x == 1.0 {
                    p
                } else {
                    // a power term overflowed on its own
                    self.density_ln(x).exp()
                }
            }
        }
    }

    fn density_ln(&self, x: Real) -> Real {
        if !(0.0..=1.0).contains(&x) {
            return f64::NEG_INFINITY;
        }
        let (a, b) = (self.a, self.b);
        match BetaKind::classify(a, b) {
            BetaKind::PointMass(at) => {
                if x == at {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            }
            BetaKind::BernoulliHalf => {
                if x == 0.0 || x == 1.0 {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            }
            BetaKind::Uniform => 0.0,
            BetaKind::Regular => {
                let left = if x == 0.0 {
                    ln_power_at_zero(a)
                } else {
                    (a - 1.0) * x.ln()
                };
                let right = if x == 1.0 {
                    ln_power_at_zero(b)
                } else {
                    (b - 1.0) * (-x).ln_1p()
                };
                left + right - ln_beta(a, b)
            }
        }
    }

    fn cdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        match BetaKind::classify(self.a, self.b) {
            BetaKind::PointMass(at) => {
                if x >= at {
                    1.0
                } else {
                    0.0
                }
            }
            BetaKind::BernoulliHalf => 0.5,
            BetaKind::Uniform => x,
            BetaKind::Regular => beta_regularized(self.a, self.b, x),
        }
    }
}
