//! Normal variates by the Box–Muller transform.
//!
//! Box, G. E. P. & Muller, M. E. (1958). *A note on the generation of random
//! normal deviates*. Ann. Math. Statist. 29(2), 610–611.

use crate::random_numbers::RandomSource;
use cdist_core::Real;
use std::f64::consts::TAU;
use std::iter::FusedIterator;

/// Draw two independent standard normal deviates from two uniforms.
///
/// The first uniform is mapped onto `(0, 1]` so the logarithm stays finite.
pub fn box_muller_pair<S: RandomSource + ?Sized>(rng: &mut S) -> (Real, Real) {
    let u1 = 1.0 - rng.next_real();
    let u2 = rng.next_real();
    let radius = (-2.0 * u1.ln()).sqrt();
    let (sin, cos) = (TAU * u2).sin_cos();
    (radius * cos, radius * sin)
}

/// Draw one standard normal deviate, consuming exactly two uniforms.
#[inline]
pub fn standard_normal<S: RandomSource + ?Sized>(rng: &mut S) -> Real {
    box_muller_pair(rng).0
}

/// Draw from Normal(`mu`, `sigma`) without checking the parameters.
#[inline]
pub(crate) fn sample_unchecked<S: RandomSource + ?Sized>(rng: &mut S, mu: Real, sigma: Real) -> Real {
    mu + sigma * standard_normal(rng)
}

/// Infinite lazy sequence of Normal(`mu`, `sigma`) variates.
///
/// Both outputs of each Box–Muller pair are used, so the sequence consumes
/// one uniform per variate.  The source is only touched when the consumer
/// pulls an element for which no spare value is buffered.
#[derive(Debug, Clone)]
pub struct NormalSamples<S> {
    rng: S,
    mu: Real,
    sigma: Real,
    spare: Option<Real>,
}

impl<S: RandomSource> NormalSamples<S> {
    /// Start a new sequence drawing from `rng`.
    pub fn new(rng: S, mu: Real, sigma: Real) -> Self {
        Self {
            rng,
            mu,
            sigma,
            spare: None,
        }
    }
}

impl<S: RandomSource> Iterator for NormalSamples<S> {
    type Item = Real;

    fn next(&mut self) -> Option<Real> {
        let z = match self.spare.take() {
            Some(z) => z,
            None => {
                let (z0, z1) = box_muller_pair(&mut self.rng);
                self.spare = Some(z1);
                z0
            }
        };
        Some(self.mu + self.sigma * z)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<S: RandomSource> FusedIterator for NormalSamples<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_numbers::MersenneTwisterUniformRng;
    use crate::statistics::Statistics;

    /// Replays a fixed list of uniforms.
    struct Scripted(Vec<Real>);

    impl RandomSource for Scripted {
        fn next_real(&mut self) -> Real {
            self.0.remove(0)
        }
    }

    #[test]
    fn box_muller_known_values() {
        // u1 = 1 - 0.75 = 0.25, u2 = 0 -> (sqrt(-2 ln 0.25), 0)
        let mut rng = Scripted(vec![0.75, 0.0]);
        let (z0, z1) = box_muller_pair(&mut rng);
        assert!((z0 - (-2.0 * 0.25_f64.ln()).sqrt()).abs() < 1e-15);
        assert!(z1.abs() < 1e-15);
    }

    #[test]
    fn zero_uniform_stays_finite() {
        let mut rng = Scripted(vec![0.0, 0.3]);
        let z = standard_normal(&mut rng);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn sequence_uses_both_outputs() {
        let mut rng = Scripted(vec![0.75, 0.125]);
        let expected = box_muller_pair(&mut Scripted(vec![0.75, 0.125]));
        let mut seq = NormalSamples::new(&mut rng, 1.0, 2.0);
        assert_eq!(seq.next(), Some(1.0 + 2.0 * expected.0));
        assert_eq!(seq.next(), Some(1.0 + 2.0 * expected.1));
        drop(seq);
        assert!(rng.0.is_empty());
    }

    #[test]
    fn sequence_moments() {
        let stats: Statistics = NormalSamples::new(MersenneTwisterUniformRng::new(42), 3.0, 0.5)
            .take(50_000)
            .collect();
        let mean = stats.mean().unwrap();
        let sd = stats.std_dev().unwrap();
        assert!((mean - 3.0).abs() < 0.02, "mean {mean}");
        assert!((sd - 0.5).abs() < 0.02, "std dev {sd}");
    }
}
