//! Library settings.
//!
//! [`Settings`] is a small `Copy` value holding the parameter-check switch.
//! Every distribution captures a `Settings` when it is constructed and
//! consults that copy on each mutation, so two instances built with
//! different settings never interfere.
//!
//! Constructors that do not take explicit settings snapshot the process-wide
//! default returned by [`Settings::global`].  The default starts with
//! parameter checks enabled and can be changed with
//! [`Settings::set_global`] or, scoped to a block, with [`ScopedSettings`].

use std::sync::{Mutex, OnceLock, PoisonError};

/// Configuration consulted when distribution parameters are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Settings {
    check_parameters: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_parameters: true,
        }
    }
}

static GLOBAL: OnceLock<Mutex<Settings>> = OnceLock::new();

fn global_cell() -> &'static Mutex<Settings> {
    GLOBAL.get_or_init(|| Mutex::new(Settings::default()))
}

impl Settings {
    /// Settings with parameter checks switched on or off.
    pub const fn new(check_parameters: bool) -> Self {
        Self { check_parameters }
    }

    /// Settings with parameter checks disabled.
    ///
    /// Invalid parameters are then accepted as-is and propagate into NaN or
    /// infinite results instead of raising an error.
    pub const fn unchecked() -> Self {
        Self::new(false)
    }

    /// Whether parameter sets are validated.
    pub const fn check_parameters(&self) -> bool {
        self.check_parameters
    }

    /// Return a copy with the parameter-check switch replaced.
    #[must_use]
    pub const fn with_check_parameters(self, check_parameters: bool) -> Self {
        Self { check_parameters }
    }

    /// The current process-wide default.
    pub fn global() -> Settings {
        *global_cell()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the process-wide default, returning the previous value.
    ///
    /// Distributions that already exist keep the settings they captured.
    pub fn set_global(settings: Settings) -> Settings {
        let mut guard = global_cell()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, settings)
    }
}

/// RAII guard that installs a process-wide default and restores the previous
/// one when dropped.
///
/// ```
/// use cdist_core::{ScopedSettings, Settings};
///
/// let before = Settings::global();
/// {
///     let _guard = ScopedSettings::new(Settings::unchecked());
///     assert!(!Settings::global().check_parameters());
/// }
/// assert_eq!(Settings::global(), before);
/// ```
#[derive(Debug)]
pub struct ScopedSettings {
    previous: Settings,
}

impl ScopedSettings {
    /// Install `settings` as the global default for the guard's lifetime.
    pub fn new(settings: Settings) -> Self {
        Self {
            previous: Settings::set_global(settings),
        }
    }
}

impl Drop for ScopedSettings {
    fn drop(&mut self) {
        Settings::set_global(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_checks_parameters() {
        assert!(Settings::default().check_parameters());
        assert!(!Settings::unchecked().check_parameters());
        assert!(Settings::unchecked().with_check_parameters(true).check_parameters());
    }

    #[test]
    fn scoped_settings_restore_previous_value() {
        let before = Settings::global();
        {
            let _outer = ScopedSettings::new(Settings::unchecked());
            {
                let _inner = ScopedSettings::new(Settings::default());
                assert!(Settings::global().check_parameters());
            }
            assert!(!Settings::global().check_parameters());
        }
        assert_eq!(Settings::global(), before);
    }
}
