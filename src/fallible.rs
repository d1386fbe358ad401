//! The auto-escalating wrappers fallible operations return.

use core::{fmt, mem, mem::ManuallyDrop};

use crate::{
    escalation::Escalate,
    last_error::LastError,
    outcome::{Outcome, UnitOutcome},
    sanitizer,
};

/// The return type of a fallible operation: an [`Outcome`] that escalates
/// its error if the caller never looks at it.
///
/// This is the expression-position half of the dual mode. A `Fallible` is
/// meant to live for exactly one expression at the call site, where the
/// caller picks a mode:
///
/// - **exception style** — [`value`](Self::value) hands back the success
///   value or escalates the failure into a panic;
/// - **error-code style** — [`into_outcome`](Self::into_outcome) (or the
///   `Result` conversion) hands back retained storage for explicit
///   inspection, and nothing escalates;
/// - **just tell me** — [`succeeded`](Self::succeeded) answers the boolean
///   and deliberately discards the error;
/// - **I don't care** — [`ignore_failure`](Self::ignore_failure) waives the
///   check.
///
/// Choosing no mode at all is the bug this type exists to catch: dropping an
/// unconsumed `Fallible` holding a failure raises that failure as a panic
/// (suppressed only when the thread is already unwinding).
///
/// Every method consumes `self` and the type is neither `Clone` nor `Copy`,
/// so a produced result is consumed exactly once, checked at compile time.
/// Do not store a `Fallible` in a struct or collection — it is a transfer
/// device, not a container; retain an [`Outcome`] instead. The one
/// sanctioned way to hand an unconsumed result further up the call chain is
/// [`propagate`](Self::propagate).
///
/// # Examples
///
/// ```
/// use tripwire::Fallible;
///
/// fn parse_port(raw: &str) -> Fallible<u16, String> {
///     match raw.parse::<u16>() {
///         Ok(port) => Fallible::success(port),
///         Err(err) => Fallible::failure(err.to_string()),
///     }
/// }
///
/// // Exception style: a failure here would panic with the parse error.
/// let port = parse_port("8080").value();
/// assert_eq!(port, 8080);
///
/// // Error-code style: retain, then branch.
/// let outcome = parse_port("70000").into_outcome();
/// assert!(!outcome.succeeded());
/// assert!(outcome.error().contains("number too large"));
/// ```
#[must_use = "dropping an unconsumed fallible value escalates its error"]
pub struct Fallible<R, E: Escalate> {
    /// The wrapped storage. `ManuallyDrop` because every consuming method
    /// and `Drop` itself moves the storage out exactly once.
    inner: ManuallyDrop<Outcome<R, E>>,
}

impl<R, E: Escalate> Fallible<R, E> {
    /// Creates a successful fallible result.
    pub fn success(value: R) -> Self {
        Self::wrap(Outcome::success(value))
    }

    /// Creates a failed fallible result.
    #[cold]
    pub fn failure(error: E) -> Self {
        Self::wrap(Outcome::failure(error))
    }

    /// Creates a failed fallible result seeded from the thread's current
    /// error-source value.
    #[cold]
    pub fn failure_from_last() -> Self
    where
        E: LastError,
    {
        Self::wrap(Outcome::failure_from_last())
    }

    /// The re-wrap factory: registers fresh, uninspected storage with the
    /// sanitizer. All construction funnels through here.
    fn wrap(outcome: Outcome<R, E>) -> Self {
        debug_assert!(
            !outcome.inspected(),
            "re-wrapping an already-inspected outcome"
        );
        sanitizer::add_instance();
        Self {
            inner: ManuallyDrop::new(outcome),
        }
    }

    /// Moves the storage out and defuses `Drop`; the caller takes over the
    /// sanitizer bookkeeping.
    fn defuse(mut self) -> Outcome<R, E> {
        // SAFETY: `inner` is live until this point, and `self` is forgotten
        // immediately afterwards, so the storage is moved out exactly once
        // and `Drop` never observes the hollowed-out wrapper.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        mem::forget(self);
        inner
    }

    /// Returns the success value, or escalates the stored error into a
    /// panic.
    #[track_caller]
    pub fn value(self) -> R {
        let inner = self.defuse();
        let _guard = sanitizer::InstanceGuard::new(true);
        inner.escalate_if_error()
    }

    /// Whether the operation succeeded.
    ///
    /// Consumes the result: an error checked this way has been seen, and is
    /// deliberately dropped with the storage. Keep the storage instead
    /// ([`into_outcome`](Self::into_outcome)) if the error value matters.
    pub fn succeeded(self) -> bool {
        let inner = self.defuse();
        let _guard = sanitizer::InstanceGuard::new(true);
        inner.succeeded()
    }

    /// Converts into retained storage for explicit inspection.
    ///
    /// Ownership leaves the wrapper through a sanctioned exit, so nothing
    /// escalates — not now, and not when the returned [`Outcome`] is later
    /// dropped. The storage comes back exactly as produced: uninspected.
    pub fn into_outcome(self) -> Outcome<R, E> {
        let inner = self.defuse();
        sanitizer::remove_instance(true);
        inner
    }

    /// Waives the check: marks the result inspected without reading it and
    /// drops it, escalating nothing.
    ///
    /// For call sites that intentionally discard the error.
    pub fn ignore_failure(self) {
        let inner = self.defuse();
        inner.mark_inspected();
        sanitizer::remove_instance(true);
    }

    /// Hands the unconsumed result upward as a fresh fallible value.
    ///
    /// This is the only way to re-export a result without consuming it: the
    /// original wrapper is spent (it will never escalate), and the caller
    /// receives a new, uninspected wrapper carrying the same storage. Any
    /// other path out of a `Fallible` counts as inspection.
    pub fn propagate(self) -> Self {
        let inner = self.defuse();
        // The fresh wrapper registers before the spent one checks out, so
        // the sanitizer never sees the nesting go empty mid-handoff.
        let fresh = Self::wrap(inner);
        sanitizer::remove_instance(true);
        fresh
    }
}

impl<R, E: Escalate> Drop for Fallible<R, E> {
    fn drop(&mut self) {
        // SAFETY: every consuming method forgets `self` after taking the
        // storage, so `drop` only ever runs on a wrapper whose `inner` is
        // still live, and takes it exactly once.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        // The guard reports the removal even when escalation unwinds out of
        // this frame; by then the thread counts as panicking and the
        // sanitizer exempts the rest of the expression's temporaries.
        let _guard = sanitizer::InstanceGuard::new(inner.inspected());
        inner.escalate_if_uninspected();
    }
}

impl<R, E: Escalate> From<Result<R, E>> for Fallible<R, E> {
    fn from(result: Result<R, E>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error),
        }
    }
}

impl<R, E: Escalate> From<Outcome<R, E>> for Fallible<R, E> {
    /// Re-arms retained storage as a fallible value.
    ///
    /// Contract: the storage must be uninspected (debug-asserted) — an
    /// already-inspected outcome cannot be passed off as a fresh result.
    fn from(outcome: Outcome<R, E>) -> Self {
        Self::wrap(outcome)
    }
}

impl<R, E> fmt::Debug for Fallible<R, E>
where
    R: fmt::Debug,
    E: Escalate + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fallible").field(&*self.inner).finish()
    }
}

/// The return type of a fallible operation with no success payload.
///
/// The void-result counterpart of [`Fallible`]: success carries nothing, so
/// the value exit is [`ensure`](Self::ensure) (escalate on failure, return
/// unit) rather than `value`. The same single-consumption rules apply.
///
/// Unlike `Fallible`, no expression can legitimately hold two unconsumed
/// `Possible`s at once — there is no multi-argument scenario for a unit
/// result — so debug builds enforce at most one live instance per thread.
///
/// # Examples
///
/// ```
/// use tripwire::Possible;
///
/// fn flush(dirty: bool) -> Possible<String> {
///     if dirty {
///         Possible::failure("buffer busy".to_string())
///     } else {
///         Possible::success()
///     }
/// }
///
/// flush(false).ensure(); // would panic if flushing failed
/// assert!(!flush(true).succeeded());
/// ```
#[must_use = "dropping an unconsumed possible failure escalates its error"]
pub struct Possible<E: Escalate> {
    /// The wrapped unit storage; same single-move discipline as
    /// [`Fallible`].
    inner: ManuallyDrop<UnitOutcome<E>>,
}

impl<E: Escalate> Possible<E> {
    /// Creates a successful void result.
    pub fn success() -> Self {
        Self::wrap(Outcome::success(()))
    }

    /// Creates a failed void result.
    #[cold]
    pub fn failure(error: E) -> Self {
        Self::wrap(Outcome::failure(error))
    }

    /// Creates a failed void result seeded from the thread's current
    /// error-source value.
    #[cold]
    pub fn failure_from_last() -> Self
    where
        E: LastError,
    {
        Self::wrap(Outcome::failure_from_last())
    }

    /// Registers with the single-slot void counter; all construction
    /// funnels through here.
    fn wrap(outcome: UnitOutcome<E>) -> Self {
        debug_assert!(
            !outcome.inspected(),
            "re-wrapping an already-inspected outcome"
        );
        sanitizer::add_void_instance();
        Self {
            inner: ManuallyDrop::new(outcome),
        }
    }

    /// Moves the storage out and defuses `Drop`.
    fn defuse(mut self) -> UnitOutcome<E> {
        // SAFETY: `inner` is live until this point, and `self` is forgotten
        // immediately afterwards, so the storage is moved out exactly once
        // and `Drop` never observes the hollowed-out wrapper.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        mem::forget(self);
        inner
    }

    /// Escalates the stored error into a panic, if there is one.
    #[track_caller]
    pub fn ensure(self) {
        let inner = self.defuse();
        let _guard = sanitizer::VoidInstanceGuard;
        inner.escalate_if_error();
    }

    /// Whether the operation succeeded; an error checked this way is
    /// deliberately dropped.
    pub fn succeeded(self) -> bool {
        let inner = self.defuse();
        let _guard = sanitizer::VoidInstanceGuard;
        inner.succeeded()
    }

    /// Converts into retained storage for explicit inspection; nothing
    /// escalates.
    pub fn into_outcome(self) -> UnitOutcome<E> {
        let inner = self.defuse();
        sanitizer::remove_void_instance();
        inner
    }

    /// Waives the check; see [`Fallible::ignore_failure`].
    pub fn ignore_failure(self) {
        let inner = self.defuse();
        inner.mark_inspected();
        sanitizer::remove_void_instance();
    }

    /// Hands the unconsumed result upward as a fresh void fallible value.
    pub fn propagate(self) -> Self {
        let inner = self.defuse();
        // The void slot is single-occupancy: check out before re-arming.
        sanitizer::remove_void_instance();
        Self::wrap(inner)
    }
}

impl<E: Escalate> Drop for Possible<E> {
    fn drop(&mut self) {
        // SAFETY: every consuming method forgets `self` after taking the
        // storage, so `drop` only ever runs on a wrapper whose `inner` is
        // still live, and takes it exactly once.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        let _guard = sanitizer::VoidInstanceGuard;
        inner.escalate_if_uninspected();
    }
}

impl<E: Escalate> From<Result<(), E>> for Possible<E> {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(error) => Self::failure(error),
        }
    }
}

impl<E: Escalate> From<UnitOutcome<E>> for Possible<E> {
    /// Re-arms retained unit storage; same contract as the [`Fallible`]
    /// conversion.
    fn from(outcome: UnitOutcome<E>) -> Self {
        Self::wrap(outcome)
    }
}

impl<E: Escalate + fmt::Debug> fmt::Debug for Possible<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Possible").field(&*self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_passes_success_through() {
        assert_eq!(Fallible::<u32, &'static str>::success(11).value(), 11);
    }

    #[test]
    fn succeeded_consumes_and_answers() {
        assert!(Fallible::<u32, &'static str>::success(1).succeeded());
        assert!(!Fallible::<u32, &'static str>::failure("down").succeeded());
    }

    #[test]
    fn into_outcome_returns_uninspected_storage() {
        let outcome = Fallible::<u32, &'static str>::failure("later").into_outcome();
        assert!(!outcome.inspected());
        assert!(!outcome.succeeded());
        assert_eq!(*outcome.error(), "later");

        let outcome = Fallible::<u32, &'static str>::success(6).into_outcome();
        assert!(!outcome.inspected());
        assert!(outcome.succeeded());
        // Inspected storage drops without ceremony past this point.
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "re-wrapping an already-inspected outcome")]
    fn rearming_inspected_storage_is_a_contract_violation() {
        let outcome = Outcome::<u32, &'static str>::failure("seen");
        assert!(!outcome.succeeded());
        let _ = Fallible::from(outcome);
    }

    #[test]
    fn ignored_failures_do_not_escalate() {
        Fallible::<u32, &'static str>::failure("noise").ignore_failure();
    }

    #[test]
    fn propagate_yields_a_fresh_unconsumed_wrapper() {
        fn inner() -> Fallible<u32, &'static str> {
            Fallible::failure("deep")
        }
        fn outer() -> Fallible<u32, &'static str> {
            inner().propagate()
        }
        let outcome = outer().into_outcome();
        assert!(!outcome.inspected());
        assert!(!outcome.succeeded());
    }

    #[test]
    fn possible_ensure_and_succeeded() {
        Possible::<&'static str>::success().ensure();
        assert!(!Possible::<&'static str>::failure("busy").succeeded());
    }

    #[test]
    fn possible_round_trips_through_storage() {
        let outcome = Possible::<&'static str>::failure("busy").into_outcome();
        assert!(!outcome.succeeded());
        assert_eq!(*outcome.error(), "busy");
        // Inspected storage can be dropped without ceremony.
    }
}
