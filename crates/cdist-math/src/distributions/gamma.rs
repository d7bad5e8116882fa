//! Gamma distribution with shape `k` and rate `λ` (scale = 1/λ).
//!
//! Variates are generated with the Marsaglia–Tsang squeeze/rejection method,
//! boosted by one for shapes below one.
//!
//! Reference: Marsaglia, G. & Tsang, W. W. (2000). *A simple method for
//! generating gamma variables*. ACM TOMS 26(3), 363–372.

use super::{ln_power_at_zero, normal, validate, ContinuousDistribution};
use crate::random_numbers::{MersenneTwisterUniformRng, RandomSource, RngSource};
use crate::solvers1d;
use crate::special_functions::{digamma, gamma_lower_regularized, ln_gamma};
use cdist_core::{not_supported, Real, Result, Settings};

/// Classification of a `(shape, rate)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GammaKind {
    /// `shape = 0` and `rate = 0`: moments are NaN, density is 0 everywhere.
    Undefined,
    /// `rate = +∞`: all mass at `shape`.
    PointMass(Real),
    /// `shape = 0` with a finite positive rate: all mass at the origin.
    Origin,
    /// `shape = +∞` or `rate = 0`: the mass has drifted to `+∞`.
    Escaped,
    /// `shape = 1`: exponential with the given rate.
    Exponential,
    /// Finite positive shape and rate.
    Regular,
}

impl GammaKind {
    /// Classify a parameter pair, most degenerate case first.
    pub fn classify(shape: Real, rate: Real) -> Self {
        if rate == f64::INFINITY {
            GammaKind::PointMass(shape)
        } else if shape == 0.0 && rate == 0.0 {
            GammaKind::Undefined
        } else if shape == 0.0 && rate > 0.0 {
            GammaKind::Origin
        } else if shape == f64::INFINITY || rate == 0.0 {
            GammaKind::Escaped
        } else if shape == 1.0 {
            GammaKind::Exponential
        } else {
            GammaKind::Regular
        }
    }
}

/// Gamma distribution with shape `k ≥ 0` and rate `λ ≥ 0`.
///
/// Owns its random source; the default is a Mersenne Twister with the
/// reference seed.  Pass `&mut rng` to [`Gamma::with_source`] to share one
/// generator between several distributions.
///
/// ```
/// use cdist_math::distributions::{ContinuousDistribution, Gamma};
///
/// let mut g = Gamma::new(2.0, 0.5).unwrap();
/// assert_eq!(g.mean(), 4.0);
/// assert!(g.sample() >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Gamma<R = MersenneTwisterUniformRng> {
    shape: Real,
    rate: Real,
    settings: Settings,
    random: R,
}

impl Gamma {
    /// Create a Gamma(`shape`, `rate`) distribution with the default source
    /// and the global settings.
    ///
    /// # Errors
    /// [`cdist_core::Error::InvalidParameter`] when `shape < 0`, `rate < 0`,
    /// or either is NaN, and parameter checks are enabled.
    pub fn new(shape: Real, rate: Real) -> Result<Self> {
        Self::with_settings(shape, rate, Settings::global())
    }

    /// Create a distribution with explicit settings.
    pub fn with_settings(shape: Real, rate: Real, settings: Settings) -> Result<Self> {
        Gamma::with_source_and_settings(shape, rate, MersenneTwisterUniformRng::default(), settings)
    }

    /// Create a distribution from shape and scale (`rate = 1 / scale`).
    pub fn with_shape_scale(shape: Real, scale: Real) -> Result<Self> {
        Self::new(shape, 1.0 / scale)
    }

    /// Create a distribution from shape and rate.
    pub fn with_shape_rate(shape: Real, rate: Real) -> Result<Self> {
        Self::new(shape, rate)
    }

    /// Draw one variate from `rng` after validating the parameters.
    pub fn sample_with<S: RandomSource + ?Sized>(rng: &mut S, shape: Real, rate: Real) -> Result<Real> {
        check_parameters(&Settings::global(), shape, rate)?;
        Ok(sample_unchecked(rng, shape, rate))
    }

    /// Infinite lazy sequence of variates drawn from `rng`, after validating
    /// the parameters.
    ///
    /// Pass `&mut rng` to keep using the generator afterwards.
    pub fn samples_with<S: RandomSource>(
        mut rng: S,
        shape: Real,
        rate: Real,
    ) -> Result<impl Iterator<Item = Real>> {
        check_parameters(&Settings::global(), shape, rate)?;
        Ok(std::iter::repeat_with(move || sample_unchecked(&mut rng, shape, rate)))
    }
}

impl<R: RandomSource> Gamma<R> {
    /// Create a distribution drawing from `random`, with the global settings.
    pub fn with_source(shape: Real, rate: Real, random: R) -> Result<Self> {
        Self::with_source_and_settings(shape, rate, random, Settings::global())
    }

    /// Create a distribution drawing from `random`, with explicit settings.
    pub fn with_source_and_settings(
        shape: Real,
        rate: Real,
        random: R,
        settings: Settings,
    ) -> Result<Self> {
        check_parameters(&settings, shape, rate)?;
        Ok(Self {
            shape,
            rate,
            settings,
            random,
        })
    }

    /// Whether `(shape, rate)` is a valid parameter set.
    pub fn is_valid_parameter_set(shape: Real, rate: Real) -> bool {
        shape >= 0.0 && rate >= 0.0
    }

    /// Shape parameter `k`.
    pub fn shape(&self) -> Real {
        self.shape
    }

    /// Rate parameter `λ`.
    pub fn rate(&self) -> Real {
        self.rate
    }

    /// Scale parameter `1/λ`.
    pub fn scale(&self) -> Real {
        1.0 / self.rate
    }

    /// Settings captured at construction.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Classification of the current parameters.
    pub fn kind(&self) -> GammaKind {
        GammaKind::classify(self.shape, self.rate)
    }

    /// Replace both parameters.  On error nothing changes.
    pub fn set_parameters(&mut self, shape: Real, rate: Real) -> Result<()> {
        check_parameters(&self.settings, shape, rate)?;
        self.shape = shape;
        self.rate = rate;
        Ok(())
    }

    /// Replace the shape, keeping the rate.
    pub fn set_shape(&mut self, shape: Real) -> Result<()> {
        self.set_parameters(shape, self.rate)
    }

    /// Replace the rate, keeping the shape.
    pub fn set_rate(&mut self, rate: Real) -> Result<()> {
        self.set_parameters(self.shape, rate)
    }

    /// Replace the scale, keeping the shape.
    pub fn set_scale(&mut self, scale: Real) -> Result<()> {
        self.set_parameters(self.shape, 1.0 / scale)
    }

    /// Mutable access to the random source.
    pub fn random_source_mut(&mut self) -> &mut R {
        &mut self.random
    }

    /// Replace the random source.
    pub fn set_random_source(&mut self, random: R) {
        self.random = random;
    }

    /// Inverse CDF (quantile function), by root finding on the CDF.
    ///
    /// # Errors
    /// [`cdist_core::Error::InvalidParameter`] unless `p ∈ [0, 1]`.
    pub fn inverse_cdf(&self, p: Real) -> Result<Real> {
        super::check_probability(p)?;
        let (shape, rate) = (self.shape, self.rate);
        Ok(match self.kind() {
            GammaKind::PointMass(at) => at,
            GammaKind::Origin => 0.0,
            GammaKind::Undefined => f64::NAN,
            GammaKind::Escaped => f64::INFINITY,
            _ if p == 0.0 => 0.0,
            _ if p == 1.0 => f64::INFINITY,
            GammaKind::Exponential => -(-p).ln_1p() / rate,
            GammaKind::Regular => {
                let guess = (shape + 4.0 * shape.sqrt()) / rate;
                solvers1d::invert_increasing(|x| self.cdf(x), p, 0.0, guess)?
            }
        })
    }

    /// Draw one variate from the bound source.
    pub fn sample(&mut self) -> Real {
        sample_unchecked(&mut self.random, self.shape, self.rate)
    }

    /// Infinite lazy sequence of variates from the bound source.
    ///
    /// Each call starts a fresh sequence; the parameters in effect at the
    /// call are used for every element.
    pub fn samples(&mut self) -> impl Iterator<Item = Real> + '_ {
        let (shape, rate) = (self.shape, self.rate);
        let random = &mut self.random;
        std::iter::repeat_with(move || sample_unchecked(&mut *random, shape, rate))
    }

    /// Fill `values` with variates from the bound source.
    pub fn fill(&mut self, values: &mut [Real]) {
        for v in values.iter_mut() {
            *v = sample_unchecked(&mut self.random, self.shape, self.rate);
        }
    }
}

fn check_parameters(settings: &Settings, shape: Real, rate: Real) -> Result<()> {
    validate(settings, shape >= 0.0 && rate >= 0.0, || {
        format!("gamma requires shape >= 0 and rate >= 0, got shape={shape}, rate={rate}")
    })
}

/// Draw one Gamma(`shape`, `rate`) variate without checking the parameters.
///
/// Loops until the Marsaglia–Tsang acceptance test passes; there is no
/// iteration bound.
pub(crate) fn sample_unchecked<S: RandomSource + ?Sized>(rng: &mut S, shape: Real, rate: Real) -> Real {
    if rate == f64::INFINITY {
        return shape;
    }

    let (a, alphafix) = if shape < 1.0 {
        (shape + 1.0, rng.next_real().powf(1.0 / shape))
    } else {
        (shape, 1.0)
    };

    let d = a - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let mut x = normal::standard_normal(rng);
        let mut v = 1.0 + c * x;
        while v <= 0.0 {
            x = normal::standard_normal(rng);
            v = 1.0 + c * x;
        }
        v = v * v * v;

        let u = rng.next_real();
        let x2 = x * x;
        // squeeze
        if u < 1.0 - 0.0331 * x2 * x2 {
            return alphafix * d * v / rate;
        }
        if u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return alphafix * d * v / rate;
        }
    }
}

impl<R> rand::distributions::Distribution<Real> for Gamma<R> {
    fn sample<G: rand::Rng + ?Sized>(&self, rng: &mut G) -> Real {
        sample_unchecked(&mut RngSource::new(rng), self.shape, self.rate)
    }
}

impl<R> ContinuousDistribution for Gamma<R> {
    fn minimum(&self) -> Real {
        0.0
    }

    fn maximum(&self) -> Real {
        f64::INFINITY
    }

    fn mean(&self) -> Real {
        match GammaKind::classify(self.shape, self.rate) {
            GammaKind::PointMass(at) => at,
            GammaKind::Undefined => f64::NAN,
            _ => self.shape / self.rate,
        }
    }

    fn variance(&self) -> Real {
        match GammaKind::classify(self.shape, self.rate) {
            GammaKind::PointMass(_) => 0.0,
            GammaKind::Undefined => f64::NAN,
            _ => self.shape / (self.rate * self.rate),
        }
    }

    fn std_dev(&self) -> Real {
        match GammaKind::classify(self.shape, self.rate) {
            GammaKind::PointMass(_) => 0.0,
            GammaKind::Undefined => f64::NAN,
            _ => self.shape.sqrt() / self.rate,
        }
    }

    fn entropy(&self) -> Real {
        let (k, rate) = (self.shape, self.rate);
        match GammaKind::classify(k, rate) {
            GammaKind::PointMass(_) | GammaKind::Origin => 0.0,
            GammaKind::Undefined => f64::NAN,
            _ => k - rate.ln() + ln_gamma(k) + (1.0 - k) * digamma(k),
        }
    }

    fn skewness(&self) -> Real {
        match GammaKind::classify(self.shape, self.rate) {
            GammaKind::PointMass(_) => 0.0,
            GammaKind::Undefined => f64::NAN,
            _ => 2.0 / self.shape.sqrt(),
        }
    }

    /// Mode; `0` whenever the density peaks at the origin (`shape ≤ 1`).
    fn mode(&self) -> Real {
        match GammaKind::classify(self.shape, self.rate) {
            GammaKind::PointMass(at) => at,
            GammaKind::Undefined => f64::NAN,
            _ if self.shape <= 1.0 => 0.0,
            _ => (self.shape - 1.0) / self.rate,
        }
    }

    fn median(&self) -> Result<Real> {
        not_supported!("the gamma distribution has no closed-form median")
    }

    fn density(&self, x: Real) -> Real {
        if x < 0.0 {
            return 0.0;
        }
        let (k, rate) = (self.shape, self.rate);
        match GammaKind::classify(k, rate) {
            GammaKind::PointMass(at) => {
                if x == at {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            GammaKind::Origin => {
                if x == 0.0 {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            GammaKind::Undefined | GammaKind::Escaped => 0.0,
            _ if x == f64::INFINITY => 0.0,
            GammaKind::Exponential => rate * (-rate * x).exp(),
            // rate^k and x^(k-1) overflow separately long before the density does
            GammaKind::Regular => self.density_ln(x).exp(),
        }
    }

    fn density_ln(&self, x: Real) -> Real {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        let (k, rate) = (self.shape, self.rate);
        match GammaKind::classify(k, rate) {
            GammaKind::PointMass(at) => {
                if x == at {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            }
            GammaKind::Origin => {
                if x == 0.0 {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            }
            GammaKind::Undefined | GammaKind::Escaped => f64::NEG_INFINITY,
            _ if x == f64::INFINITY => f64::NEG_INFINITY,
            GammaKind::Exponential => rate.ln() - rate * x,
            GammaKind::Regular if x == 0.0 => ln_power_at_zero(k),
            GammaKind::Regular => k * rate.ln() + (k - 1.0) * x.ln() - rate * x - ln_gamma(k),
        }
    }

    fn cdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        match GammaKind::classify(self.shape, self.rate) {
            GammaKind::PointMass(at) => {
                if x >= at {
                    1.0
                } else {
                    0.0
                }
            }
            GammaKind::Origin => 1.0,
            GammaKind::Undefined | GammaKind::Escaped => 0.0,
            GammaKind::Exponential => -(-self.rate * x).exp_m1(),
            GammaKind::Regular => gamma_lower_regularized(self.shape, x * self.rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gamma(shape: Real, rate: Real) -> Gamma {
        Gamma::with_settings(shape, rate, Settings::default()).unwrap()
    }

    #[test]
    fn classification() {
        assert_eq!(GammaKind::classify(0.0, 0.0), GammaKind::Undefined);
        assert_eq!(GammaKind::classify(3.0, f64::INFINITY), GammaKind::PointMass(3.0));
        assert_eq!(GammaKind::classify(0.0, f64::INFINITY), GammaKind::PointMass(0.0));
        assert_eq!(GammaKind::classify(0.0, 2.0), GammaKind::Origin);
        assert_eq!(GammaKind::classify(2.0, 0.0), GammaKind::Escaped);
        assert_eq!(GammaKind::classify(f64::INFINITY, 2.0), GammaKind::Escaped);
        assert_eq!(GammaKind::classify(1.0, 2.0), GammaKind::Exponential);
        assert_eq!(GammaKind::classify(2.5, 2.0), GammaKind::Regular);
    }

    #[test]
    fn gamma_cdf() {
        // Gamma(1, 1) = Exponential(1), CDF = 1 - e^(-x)
        let d = gamma(1.0, 1.0);
        let x: Real = 2.0;
        assert_abs_diff_eq!(d.cdf(x), 1.0 - (-x).exp(), epsilon = 1e-12);

        // Gamma(2, 1): CDF = 1 - (1 + x) e^(-x)
        let d = gamma(2.0, 1.0);
        assert_abs_diff_eq!(d.cdf(x), 1.0 - (1.0 + x) * (-x).exp(), epsilon = 1e-10);
    }

    #[test]
    fn gamma_pdf() {
        // Gamma(3, 2): 2^3 x^2 e^(-2x) / 2!
        let d = gamma(3.0, 2.0);
        let x: Real = 1.5;
        let expected = 8.0 * x * x * (-2.0 * x).exp() / 2.0;
        assert_abs_diff_eq!(d.density(x), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(d.density_ln(x), expected.ln(), epsilon = 1e-12);
    }

    #[test]
    fn density_at_origin_depends_on_shape() {
        assert_eq!(gamma(0.5, 1.0).density(0.0), f64::INFINITY);
        assert_eq!(gamma(0.5, 1.0).density_ln(0.0), f64::INFINITY);
        assert_eq!(gamma(1.0, 3.0).density(0.0), 3.0);
        assert_abs_diff_eq!(gamma(1.0, 3.0).density_ln(0.0), 3.0_f64.ln(), epsilon = 1e-15);
        assert_eq!(gamma(2.0, 1.0).density(0.0), 0.0);
        assert_eq!(gamma(2.0, 1.0).density_ln(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn large_shape_density_uses_log_domain() {
        let d = gamma(400.0, 2.0);
        let x = 200.0;
        let p = d.density(x);
        assert!(p.is_finite() && p > 0.0);
        assert_abs_diff_eq!(p.ln(), d.density_ln(x), epsilon = 1e-9);
    }

    #[test]
    fn density_finite_for_extreme_rates() {
        // (shape, rate, x): rate^k or x^(k-1) alone is out of f64 range
        let cases = [
            (150.0, 200.0, 0.745),
            (50.0, 1.0e7, 4.9e-6),
            (2.0, 1.0e200, 1.0e-200),
            (3.0, 1.0e-200, 1.0e200),
        ];
        for (k, rate, x) in cases {
            let d = gamma(k, rate);
            let p = d.density(x);
            assert!(p.is_finite() && p > 0.0, "Gamma({k}, {rate}) density at {x} = {p}");
            assert_abs_diff_eq!(p.ln(), d.density_ln(x), epsilon = 1e-9);
        }
        // Gamma(2, λ) at x = 1/λ: λ e^(-1)
        let p = gamma(2.0, 1.0e200).density(1.0e-200);
        assert!((p / (1.0e200 * (-1.0_f64).exp()) - 1.0).abs() < 1e-12, "density {p}");
    }

    #[test]
    fn outside_support() {
        let d = gamma(2.0, 1.0);
        assert_eq!(d.density(-1.0), 0.0);
        assert_eq!(d.density_ln(-1.0), f64::NEG_INFINITY);
        assert_eq!(d.cdf(-1.0), 0.0);
        assert_eq!(d.cdf(f64::INFINITY), 1.0);
        assert_eq!(d.density(f64::INFINITY), 0.0);
    }

    #[test]
    fn point_mass_at_infinite_rate() {
        let d = gamma(2.5, f64::INFINITY);
        assert_eq!(d.mean(), 2.5);
        assert_eq!(d.variance(), 0.0);
        assert_eq!(d.std_dev(), 0.0);
        assert_eq!(d.entropy(), 0.0);
        assert_eq!(d.skewness(), 0.0);
        assert_eq!(d.mode(), 2.5);
        assert_eq!(d.density(2.5), f64::INFINITY);
        assert_eq!(d.density(2.0), 0.0);
        assert_eq!(d.density_ln(2.0), f64::NEG_INFINITY);
        assert_eq!(d.cdf(2.4), 0.0);
        assert_eq!(d.cdf(2.5), 1.0);
        assert_eq!(d.inverse_cdf(0.3).unwrap(), 2.5);
    }

    #[test]
    fn undefined_zero_zero() {
        let d = gamma(0.0, 0.0);
        assert!(d.mean().is_nan());
        assert!(d.variance().is_nan());
        assert!(d.std_dev().is_nan());
        assert!(d.entropy().is_nan());
        assert!(d.skewness().is_nan());
        assert!(d.mode().is_nan());
        assert_eq!(d.density(1.0), 0.0);
        assert_eq!(d.density_ln(1.0), f64::NEG_INFINITY);
        assert_eq!(d.cdf(1.0), 0.0);
    }

    #[test]
    fn zero_shape_is_mass_at_origin() {
        let mut d = gamma(0.0, 2.0);
        assert_eq!(d.mean(), 0.0);
        assert_eq!(d.variance(), 0.0);
        assert_eq!(d.mode(), 0.0);
        assert_eq!(d.entropy(), 0.0);
        assert_eq!(d.density(0.0), f64::INFINITY);
        assert_eq!(d.density(0.1), 0.0);
        assert_eq!(d.cdf(0.0), 1.0);
        assert!(d.samples().take(100).all(|x| x == 0.0));
    }

    #[test]
    fn moments() {
        let d = gamma(4.0, 2.0);
        assert_eq!(d.mean(), 2.0);
        assert_eq!(d.variance(), 1.0);
        assert_eq!(d.std_dev(), 1.0);
        assert_eq!(d.skewness(), 1.0);
        assert_eq!(d.mode(), 1.5);
        assert_eq!(d.scale(), 0.5);
        // Exponential(λ): entropy 1 - ln λ
        assert_abs_diff_eq!(gamma(1.0, 2.0).entropy(), 1.0 - 2.0_f64.ln(), epsilon = 1e-12);
        assert_eq!(gamma(0.5, 1.0).mode(), 0.0);
        assert!(d.median().unwrap_err().is_not_supported());
    }

    #[test]
    fn gamma_inverse_cdf() {
        let d = gamma(3.0, 2.0);
        for p in [0.1, 0.25, 0.5, 0.75, 0.9] {
            let x = d.inverse_cdf(p).unwrap();
            let p2 = d.cdf(x);
            assert!((p2 - p).abs() < 1e-6, "roundtrip failed for p={p}: got {p2}");
        }
        let e = gamma(1.0, 2.0);
        assert_abs_diff_eq!(e.inverse_cdf(0.5).unwrap(), 2.0_f64.ln() / 2.0, epsilon = 1e-12);
        assert_eq!(d.inverse_cdf(0.0).unwrap(), 0.0);
        assert_eq!(d.inverse_cdf(1.0).unwrap(), f64::INFINITY);
        assert!(d.inverse_cdf(1.5).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn scale_setters() {
        let mut d = Gamma::with_shape_scale(2.0, 4.0).unwrap();
        assert_eq!(d.rate(), 0.25);
        d.set_scale(0.5).unwrap();
        assert_eq!(d.rate(), 2.0);
        assert_eq!(d.shape(), 2.0);
        d.set_shape(3.0).unwrap();
        d.set_rate(1.0).unwrap();
        assert_eq!((d.shape(), d.rate()), (3.0, 1.0));
    }

    #[test]
    fn failed_setter_keeps_previous_parameters() {
        let mut d = gamma(2.0, 3.0);
        assert!(d.set_shape(-1.0).unwrap_err().is_invalid_parameter());
        assert!(d.set_parameters(1.0, f64::NAN).is_err());
        assert_eq!((d.shape(), d.rate()), (2.0, 3.0));
    }

    #[test]
    fn unchecked_settings_accept_invalid_parameters() {
        let d = Gamma::with_settings(-1.0, 1.0, Settings::unchecked()).unwrap();
        assert_eq!(d.shape(), -1.0);
        assert!(d.skewness().is_nan());
    }

    #[test]
    fn sampler_shape_below_one() {
        let mut d = Gamma::with_source_and_settings(
            0.3,
            1.0,
            MersenneTwisterUniformRng::new(7),
            Settings::default(),
        )
        .unwrap();
        let n = 50_000;
        let mean = d.samples().take(n).sum::<Real>() / n as Real;
        assert!((mean - 0.3).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn fill_matches_sequence() {
        let source = MersenneTwisterUniformRng::new(99);
        let mut a = Gamma::with_source(2.0, 1.0, source.clone()).unwrap();
        let mut b = Gamma::with_source(2.0, 1.0, source).unwrap();
        let mut values = [0.0; 16];
        a.fill(&mut values);
        let expected: Vec<Real> = b.samples().take(16).collect();
        assert_eq!(values.to_vec(), expected);
    }
}
