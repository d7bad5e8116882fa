//! Error types for cdist.
//!
//! Every fallible operation in the workspace returns the single
//! `thiserror`-derived [`Error`] enum.  Parameter preconditions are written
//! with the [`ensure!`](crate::ensure) macro; statistics without a closed form
//! bail out through [`not_supported!`](crate::not_supported).

use thiserror::Error;

/// The top-level error type used throughout cdist.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A distribution parameter (or an argument such as a probability)
    /// violates its invariant.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested quantity has no implementation for this distribution.
    ///
    /// This is a permanent capability gap; retrying will not help.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// An iterative numerical routine failed to converge.
    #[error("no convergence: {0}")]
    Convergence(String),
}

impl Error {
    /// `true` for [`Error::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter(_))
    }

    /// `true` for [`Error::NotSupported`].
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
    }
}

/// Shorthand `Result` type used throughout cdist.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameter(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use cdist_core::{ensure, errors::Error};
/// fn probability(p: f64) -> cdist_core::errors::Result<f64> {
///     ensure!((0.0..=1.0).contains(&p), "p must lie in [0, 1], got {p}");
///     Ok(p)
/// }
/// assert!(probability(0.5).is_ok());
/// assert_eq!(
///     probability(2.0),
///     Err(Error::InvalidParameter("p must lie in [0, 1], got 2".into()))
/// );
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::NotSupported(...))` immediately.
///
/// # Example
/// ```
/// use cdist_core::{not_supported, errors::Error};
/// fn median() -> cdist_core::errors::Result<f64> {
///     not_supported!("no closed form for the median");
/// }
/// assert!(median().unwrap_err().is_not_supported());
/// ```
#[macro_export]
macro_rules! not_supported {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::NotSupported(format!($($msg)*)))
    };
}
