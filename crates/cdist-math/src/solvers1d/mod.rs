//! 1D root finding, used to invert cumulative distribution functions.

use cdist_core::{
    errors::{Error, Result},
    Real,
};

const MAX_ITERATIONS: u32 = 200;
const DEFAULT_ACCURACY: Real = 1.0e-12;

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation.
/// A non-positive `accuracy` selects the default of `1e-12`.
///
/// The interval must bracket the root: `f(x_min)` and `f(x_max)` of opposite
/// sign, or one of them exactly zero.  A NaN at either end counts as not
/// bracketed, so a CDF evaluated with unchecked invalid parameters yields
/// [`Error::InvalidParameter`] instead of iterating on NaN.
///
/// # Errors
/// [`Error::InvalidParameter`] when the root is not bracketed,
/// [`Error::Convergence`] after 200 iterations without meeting `accuracy`.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let acc = if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    };
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa * fb > 0.0 || (fa * fb).is_nan() {
        return Err(Error::InvalidParameter(format!(
            "root not bracketed: f({a}) = {fa}, f({b}) = {fb}"
        )));
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                let p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                let q = (q - 1.0) * (r - 1.0) * (s - 1.0);
                (p, q)
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b);
    }
    Err(Error::Convergence(format!(
        "Brent solver: no root within {MAX_ITERATIONS} iterations"
    )))
}

/// Solve `cdf(x) = p` for a non-decreasing `cdf` on `[lower, ∞)`.
///
/// The upper end of the bracket starts at `guess` (or 1 when the guess is
/// not a usable positive number) and doubles until `cdf` reaches `p`.
pub fn invert_increasing<F>(cdf: F, p: Real, lower: Real, guess: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let mut upper = if guess.is_finite() && guess > lower {
        guess
    } else {
        lower + 1.0
    };
    while cdf(upper) < p {
        upper = lower + 2.0 * (upper - lower);
        if !upper.is_finite() {
            return Ok(f64::INFINITY);
        }
    }
    brent(|x| cdf(x) - p, lower, upper, 0.0)
}
