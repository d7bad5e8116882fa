//! Uniform random sources.
//!
//! Samplers draw all of their entropy through the [`RandomSource`]
//! capability, one uniform deviate in `[0, 1)` at a time.  Two sources are
//! provided: [`MersenneTwisterUniformRng`] over `rand_mt`, used as the default
//! source of every distribution, and [`RngSource`], which adapts any
//! `rand::RngCore`.
//!
//! A mutable reference to a source is itself a source, so one generator can
//! feed several distributions in turn:
//!
//! ```
//! use cdist_math::distributions::Gamma;
//! use cdist_math::random_numbers::MersenneTwisterUniformRng;
//!
//! let mut rng = MersenneTwisterUniformRng::new(7);
//! let mut gamma = Gamma::with_source(2.0, 1.0, &mut rng).unwrap();
//! assert!(gamma.sample() >= 0.0);
//! ```
//!
//! Sources carry no internal locking.  Sharing one between threads requires
//! external synchronisation by the caller.

use cdist_core::Real;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_mt::Mt19937GenRand64;

/// Map the top 53 bits of a `u64` onto `[0, 1)`.
#[inline]
fn u64_to_unit(u: u64) -> Real {
    (u >> 11) as Real * (1.0 / (1u64 << 53) as Real)
}

/// A source of uniform deviates in `[0, 1)`.
pub trait RandomSource {
    /// Produce the next uniform deviate in `[0, 1)`.
    fn next_real(&mut self) -> Real;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    #[inline]
    fn next_real(&mut self) -> Real {
        (**self).next_real()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    #[inline]
    fn next_real(&mut self) -> Real {
        (**self).next_real()
    }
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
#[derive(Clone)]
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
    seed: u64,
}

impl MersenneTwisterUniformRng {
    /// Seed used by [`Default`], the reference seed of MT19937.
    pub const DEFAULT_SEED: u64 = 5489;

    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
            seed,
        }
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the next integer deviate.
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

impl Default for MersenneTwisterUniformRng {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl std::fmt::Debug for MersenneTwisterUniformRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwisterUniformRng")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl RandomSource for MersenneTwisterUniformRng {
    #[inline]
    fn next_real(&mut self) -> Real {
        u64_to_unit(self.rng.next_u64())
    }
}

/// Adapter exposing any `rand::RngCore` as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    inner: R,
}

impl<R: RngCore> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped generator.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the adapter.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl RngSource<StdRng> {
    /// A `StdRng` seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// A `StdRng` seeded deterministically.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    #[inline]
    fn next_real(&mut self) -> Real {
        u64_to_unit(self.inner.next_u64())
    }
}
