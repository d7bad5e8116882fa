//! # cdist-core
//!
//! Core types, error definitions, and settings for cdist.
//!
//! This crate provides the building blocks shared by the other crates in the
//! workspace: the `Real` alias, the [`Error`] enum with its `ensure!` /
//! `not_supported!` macros, and the parameter-check [`Settings`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `not_supported!` macros.
pub mod errors;

/// Parameter-check settings.
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::{ScopedSettings, Settings};
