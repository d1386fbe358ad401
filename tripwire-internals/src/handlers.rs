//! Trait definition for turning stored failures into panics.
//!
//! Escalation is the exception-style half of the dual-mode contract: a
//! failure that was never inspected explicitly does not vanish, it is
//! converted into a panic. *How* a given error type converts is an open
//! extension point — an error code might format a descriptive message, a
//! rich error object might fly as the panic payload itself — so the
//! conversion is a per-type trait rather than a fixed function.
//!
//! The trait is defined in this crate so that both the storage layer and
//! downstream crates can name it; the [`tripwire`] crate re-exports it along
//! with helpers ([`raise`], [`raise_message`]) and a derive-style macro
//! ([`escalate_via_display!`]) for the common cases.
//!
//! [`tripwire`]: https://docs.rs/tripwire/latest/tripwire/
//! [`raise`]: https://docs.rs/tripwire/latest/tripwire/escalation/fn.raise.html
//! [`raise_message`]: https://docs.rs/tripwire/latest/tripwire/escalation/fn.raise_message.html
//! [`escalate_via_display!`]: https://docs.rs/tripwire/latest/tripwire/macro.escalate_via_display.html

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
/// - panic with a formatted message — what the `escalate_via_display!` macro
///   generates for any `Display` type;
/// - panic with the error itself as the payload (`raise`), so that
///   `catch`-style recovery can downcast it back out.
///
/// Escalating a value that represents "no error" (for example an OS error
/// code of zero) is a contract violation; implementations for such types
/// should debug-assert against it.
pub trait Escalate {
    /// Consumes the error and raises it as a panic.
    fn escalate(self) -> !;
}
