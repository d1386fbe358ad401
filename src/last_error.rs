//! The error-source capability: seeding failures from ambient error state.
//!
//! Many C-shaped APIs report failure out of band — the call returns a
//! sentinel and the real error value sits in thread-local state (`errno`,
//! the Win32 last-error code). The core does not retrieve such state itself;
//! it consumes anything that can, through the minimal [`LastError`]
//! capability, via the `failure_from_last` constructors.
//!
//! [`LastOsError`] is the provided implementation, backed by
//! [`std::io::Error::last_os_error`], which covers both the POSIX and the
//! Windows flavor of ambient error state.

use crate::escalation::Escalate;

/// A capability for capturing "the last operation's error value".
///
/// `get` must snapshot the ambient state *at the moment of the call* —
/// several captured values can coexist (one per stored failure), so
/// implementations carry the captured value rather than re-reading global
/// state on use.
pub trait LastError {
    /// Captures the current error value for the calling thread.
    fn get() -> Self;
}

/// The calling thread's last OS error code, captured at construction.
///
/// Portable stand-in for `errno` / `GetLastError`: the code is read through
/// [`std::io::Error::last_os_error`] the instant the value is created and
/// frozen from then on. Escalating a `LastOsError` panics with the system's
/// description of the code.
///
/// # Examples
///
/// ```no_run
/// use tripwire::{Fallible, LastOsError};
///
/// fn remove_scratch_dir() -> Fallible<(), LastOsError> {
///     if std::fs::remove_dir("/tmp/scratch").is_err() {
///         Fallible::failure_from_last()
///     } else {
///         Fallible::success(())
///     }
/// }
/// ```
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastOsError {
    /// The captured raw OS error code.
    code: i32,
}

#[cfg(feature = "std")]
impl LastOsError {
    /// The code meaning "no error occurred".
    pub const NO_ERROR: i32 = 0;

    /// The captured raw OS error code.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Whether the captured code equals `code`.
    #[must_use]
    pub fn is(&self, code: i32) -> bool {
        self.code == code
    }

    /// Whether the thread's *current* (not captured) error code equals
    /// `code`.
    #[must_use]
    pub fn current_is(code: i32) -> bool {
        Self::get().is(code)
    }
}

#[cfg(feature = "std")]
impl LastError for LastOsError {
    fn get() -> Self {
        Self {
            code: std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or(Self::NO_ERROR),
        }
    }
}

#[cfg(feature = "std")]
impl core::fmt::Display for LastOsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&std::io::Error::from_raw_os_error(self.code), f)
    }
}

#[cfg(feature = "std")]
impl From<LastOsError> for std::io::Error {
    fn from(error: LastOsError) -> Self {
        Self::from_raw_os_error(error.code())
    }
}

#[cfg(feature = "std")]
impl Escalate for LastOsError {
    #[cold]
    fn escalate(self) -> ! {
        debug_assert!(
            self.code != Self::NO_ERROR,
            "escalating without a stored error"
        );
        crate::escalation::raise_message(format_args!("{self}"))
    }
}
