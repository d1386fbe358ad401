//! Process-global observation hook for escalations.
//!
//! The core deliberately has no logging or telemetry of its own; this hook
//! is the attachment point for embedders that want one. It is invoked once
//! per escalation decision — right before a failure is raised as a panic,
//! and also when a failure is *suppressed* because the thread was already
//! unwinding (the one case where an error is otherwise dropped silently).
//!
//! The hook is stored behind an `RwLock` so steady-state reads are
//! uncontended; with the `std` feature it is [`std::sync::RwLock`], without
//! it a [`spin::RwLock`]. Setting the hook is expected to happen once at
//! startup.
//!
//! # Examples
//!
//! ```
//! use tripwire::hooks;
//!
//! hooks::set_escalation_hook(Box::new(|event| {
//!     eprintln!("escalating {} (suppressed: {})", event.error_type(), event.suppressed());
//! }));
//! # let _ = hooks::take_escalation_hook();
//! ```

use alloc::boxed::Box;

#[cfg(not(feature = "std"))]
use spin::RwLock;
#[cfg(feature = "std")]
use std::sync::RwLock;

/// What the escalation hook gets told about a failure leaving the library.
#[derive(Clone, Copy, Debug)]
pub struct EscalationEvent<'a> {
    /// Type name of the error being escalated.
    error_type: &'a str,
    /// Whether escalation was suppressed by the already-unwinding rule.
    suppressed: bool,
}

impl<'a> EscalationEvent<'a> {
    /// Builds an event; crate-internal, the hook only ever observes these.
    pub(crate) fn new(error_type: &'a str, suppressed: bool) -> Self {
        Self {
            error_type,
            suppressed,
        }
    }

    /// The [`type_name`](core::any::type_name) of the escalating error.
    #[must_use]
    pub fn error_type(&self) -> &str {
        self.error_type
    }

    /// `true` when the failure was dropped instead of raised because another
    /// panic was already unwinding the thread.
    #[must_use]
    pub fn suppressed(&self) -> bool {
        self.suppressed
    }
}

/// Signature of the escalation hook.
pub type EscalationHook = Box<dyn Fn(&EscalationEvent<'_>) + Send + Sync>;

/// The installed hook, if any.
static ESCALATION_HOOK: RwLock<Option<EscalationHook>> = RwLock::new(None);

/// Installs `hook` as the process-wide escalation observer, replacing any
/// previous one.
pub fn set_escalation_hook(hook: EscalationHook) {
    *write_guard() = Some(hook);
}

/// Removes and returns the installed escalation observer.
pub fn take_escalation_hook() -> Option<EscalationHook> {
    write_guard().take()
}

/// Runs the installed hook, if any.
pub(crate) fn notify(event: &EscalationEvent<'_>) {
    #[cfg(feature = "std")]
    let guard = ESCALATION_HOOK
        .read()
        .expect("unable to acquire the escalation hook lock");
    #[cfg(not(feature = "std"))]
    let guard = ESCALATION_HOOK.read();

    if let Some(hook) = guard.as_ref() {
        hook(event);
    }
}

/// Acquires the hook write lock on either lock implementation.
fn write_guard() -> impl core::ops::DerefMut<Target = Option<EscalationHook>> {
    #[cfg(feature = "std")]
    {
        ESCALATION_HOOK
            .write()
            .expect("unable to acquire the escalation hook lock")
    }
    #[cfg(not(feature = "std"))]
    {
        ESCALATION_HOOK.write()
    }
}
