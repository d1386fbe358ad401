//! The escalation policy: converting stored failures into panics.
//!
//! Escalation is the exception-style half of the dual-mode contract. A
//! failure travelling through a [`Fallible`](crate::Fallible) either gets
//! inspected explicitly, or — when the wrapper dies uninspected — is handed
//! to this module and raised as a panic.
//!
//! Two entry points exist:
//!
//! - [`escalate`] raises unconditionally. This is the expression-position
//!   flavor, used when the caller asked for the success value and there is
//!   none ([`Fallible::value`](crate::Fallible::value),
//!   [`Outcome::escalate_if_error`](crate::Outcome::escalate_if_error)).
//! - [`conditional_escalate`] is the destructor flavor. Destructors of
//!   temporaries run in reverse construction order within one expression, so
//!   a second uninspected failure can reach its destructor while the panic
//!   from the first is already unwinding. Raising again would abort the
//!   process; instead the late failure is suppressed (dropped), and the
//!   [escalation hook](crate::hooks) is told about it.
//!
//! How a given error type converts into a panic is the [`Escalate`] trait,
//! implemented per error type. The [`raise`] and [`raise_message`] helpers
//! cover the two common implementation bodies, and
//! [`escalate_via_display!`](crate::escalate_via_display) generates the
//! message-based one.

use core::any::type_name;

use crate::hooks::{self, EscalationEvent};

/// Converts an error value into a panic.
///
/// Implement this for every error type that can travel through the
/// auto-escalating wrappers. The implementation consumes the error and must
/// diverge by panicking; the surrounding library decides *whether* to invoke
/// it (explicit escalation calls always do, destructors only when the thread
/// is not already unwinding).
///
/// # Implementing
///
/// Implementations should be marked `#[cold]`: escalation is the failure
/// path and should stay out of the caller's hot code. Two ready-made bodies
/// cover most types:
///
/// - panic with a formatted message — what the
///   [`escalate_via_display!`](crate::escalate_via_display) macro generates
///   for any `Display` type;
/// - panic with the error itself as the payload ([`raise`]), so that
///   `catch`-style recovery can downcast it back out.
///
/// Escalating a value that represents "no error" (for example an OS error
/// code of zero) is a contract violation; implementations for such types
/// should debug-assert against it.
pub trait Escalate {
    /// Consumes the error and raises it as a panic.
    fn escalate(self) -> !;
}

/// Raises `error` as a panic, consuming it.
///
/// All escalation funnels through here: the [escalation
/// hook](crate::hooks::set_escalation_hook) is notified first, then the
/// error's [`Escalate`] implementation runs. Never returns.
///
/// # Examples
///
/// ```should_panic
/// tripwire::escalation::escalate("the disk fell out".to_string());
/// ```
#[cold]
#[track_caller]
pub fn escalate<E: Escalate>(error: E) -> ! {
    hooks::notify(&EscalationEvent::new(type_name::<E>(), false));
    error.escalate()
}

/// Escalates `error` unless the thread is already unwinding, in which case
/// the error is dropped and the hook is notified of the suppression.
///
/// This is the rule destructors must follow: one panic per unwind. Without
/// the `std` feature there is no way to ask whether the thread is
/// unwinding, so this escalates unconditionally.
#[cold]
#[track_caller]
pub fn conditional_escalate<E: Escalate>(error: E) {
    if unwinding() {
        hooks::notify(&EscalationEvent::new(type_name::<E>(), true));
        drop(error);
    } else {
        escalate(error);
    }
}

/// Whether a panic is currently propagating on this thread.
#[inline]
fn unwinding() -> bool {
    #[cfg(feature = "std")]
    {
        std::thread::panicking()
    }
    #[cfg(not(feature = "std"))]
    {
        false
    }
}

/// Panics with `payload` as the panic payload.
///
/// Building block for [`Escalate`] implementations that want the error
/// object itself to fly, so recovery code can downcast it back out of
/// [`catch_unwind`](std::panic::catch_unwind).
#[cfg(feature = "std")]
#[cold]
#[track_caller]
pub fn raise<P: core::any::Any + Send + 'static>(payload: P) -> ! {
    std::panic::panic_any(payload)
}

/// Panics with a formatted message.
///
/// Building block for [`Escalate`] implementations that describe the error
/// rather than carry it; the panic payload is the formatted string.
///
/// # Examples
///
/// ```should_panic
/// tripwire::escalation::raise_message(format_args!("timed out after {} ms", 250));
/// ```
#[cold]
#[track_caller]
pub fn raise_message(args: core::fmt::Arguments<'_>) -> ! {
    panic!("{args}")
}

crate::escalate_via_display!(&'static str, alloc::string::String);

#[cfg(feature = "std")]
impl Escalate for std::io::Error {
    #[cold]
    fn escalate(self) -> ! {
        raise_message(format_args!("{self}"))
    }
}
