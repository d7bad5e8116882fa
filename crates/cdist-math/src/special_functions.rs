//! Special functions consumed by the distributions.
//!
//! Thin wrappers over `statrs::function`.  The `statrs` routines panic on
//! arguments outside their domain; the wrappers here return NaN instead so
//! that unchecked parameter sets propagate IEEE-754 results rather than
//! aborting.

use cdist_core::Real;

/// The Gamma function Γ(z).
///
/// Uses the Lanczos approximation via `statrs`.
pub fn gamma(z: Real) -> Real {
    statrs::function::gamma::gamma(z)
}

/// The natural logarithm of the Gamma function: ln Γ(z).
pub fn ln_gamma(z: Real) -> Real {
    statrs::function::gamma::ln_gamma(z)
}

/// The natural logarithm of the Beta function: ln B(a, b).
///
/// NaN unless `a > 0` and `b > 0`.
pub fn ln_beta(a: Real, b: Real) -> Real {
    statrs::function::beta::checked_ln_beta(a, b).unwrap_or(f64::NAN)
}

/// The digamma function ψ(z) = d/dz ln Γ(z).
pub fn digamma(z: Real) -> Real {
    statrs::function::gamma::digamma(z)
}

/// The regularized lower incomplete Gamma function P(a, x).
///
/// NaN when `a` is not a finite positive number.
pub fn gamma_lower_regularized(a: Real, x: Real) -> Real {
    if x <= 0.0 {
        return if a > 0.0 { 0.0 } else { f64::NAN };
    }
    if x == f64::INFINITY {
        return if a > 0.0 && a.is_finite() { 1.0 } else { f64::NAN };
    }
    statrs::function::gamma::checked_gamma_lr(a, x).unwrap_or(f64::NAN)
}

/// The regularized incomplete Beta function I_x(a, b).
///
/// NaN unless `a > 0`, `b > 0`, and `x ∈ [0, 1]`.
pub fn beta_regularized(a: Real, b: Real, x: Real) -> Real {
    statrs::function::beta::checked_beta_reg(a, b, x).unwrap_or(f64::NAN)
}

/// The error function erf(x).
///
/// erf(x) = 2/√π ∫₀ˣ e^{-t²} dt
pub fn erf(x: Real) -> Real {
    statrs::function::erf::erf(x)
}

/// The complementary error function erfc(x) = 1 - erf(x).
///
/// Accurate in the far tail where `1 - erf(x)` cancels.
pub fn erfc(x: Real) -> Real {
    statrs::function::erf::erfc(x)
}

/// The inverse error function erf⁻¹(x).
pub fn erf_inv(x: Real) -> Real {
    statrs::function::erf::erf_inv(x)
}
