//! Retained result storage: a tagged sum of success or failure, plus the
//! inspection contract.

use core::fmt;

use tripwire_internals::RawOutcome;

use crate::{
    escalation::{self, Escalate},
    last_error::LastError,
};

/// A discriminated union of a success value `R` or an error value `E`,
/// carrying a one-way "has this been inspected" flag.
///
/// This is the error-code half of the dual mode: the form a fallible result
/// takes when the caller wants to keep it around and branch on it
/// explicitly. Auto-escalation lives in [`Fallible`](crate::Fallible), not
/// here — a plain `Outcome` going out of scope drops its payload and nothing
/// else, so storage can be passed around and die incidentally without
/// surprise panics.
///
/// # The inspection contract
///
/// Reading either payload requires knowing which one is live, and the only
/// sanctioned way to learn that is [`succeeded`](Self::succeeded) (or,
/// idiomatically, consuming the value via [`into_result`](Self::into_result)
/// and matching). Payload accessors debug-assert that an inspection
/// happened; accessing the wrong payload is a contract violation and panics
/// in all builds.
///
/// The flag is interior-mutable (`succeeded` takes `&self`), which makes
/// `Outcome` deliberately `!Sync`; results are single-thread values.
///
/// # Examples
///
/// ```
/// use tripwire::Outcome;
///
/// let outcome: Outcome<u32, String> = Outcome::failure("bad header".to_string());
/// if outcome.succeeded() {
///     println!("read {} bytes", outcome.result());
/// } else {
///     assert_eq!(outcome.error(), "bad header");
/// }
/// ```
#[must_use = "an unexamined outcome silently swallows its error"]
pub struct Outcome<R, E> {
    /// The raw storage cell; this layer owns the contract, the cell owns the
    /// bytes.
    raw: RawOutcome<R, E>,
}

/// Result storage for operations that succeed with no payload.
///
/// The success member of the sum is `()`, so this stores only the error (if
/// any) and the bookkeeping. The dedicated wrapper for this shape is
/// [`Possible`](crate::Possible).
pub type UnitOutcome<E> = Outcome<(), E>;

impl<R, E> Outcome<R, E> {
    /// Creates successful storage holding `value`, uninspected.
    pub fn success(value: R) -> Self {
        Self {
            raw: RawOutcome::new_success(value),
        }
    }

    /// Creates failed storage holding `error`, uninspected.
    #[cold]
    pub fn failure(error: E) -> Self {
        Self {
            raw: RawOutcome::new_failure(error),
        }
    }

    /// Creates failed storage seeded from the thread's current error-source
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "std")] {
    /// use tripwire::{LastOsError, Outcome};
    ///
    /// let outcome: Outcome<u32, LastOsError> = Outcome::failure_from_last();
    /// # let _ = outcome.succeeded();
    /// # }
    /// ```
    #[cold]
    pub fn failure_from_last() -> Self
    where
        E: LastError,
    {
        Self::failure(E::get())
    }

    /// Whether the success/failure state has been read, without reading it.
    pub fn inspected(&self) -> bool {
        self.raw.is_inspected()
    }

    /// Whether the operation succeeded.
    ///
    /// This is the inspection: calling it latches the
    /// [`inspected`](Self::inspected) flag. Idempotent — repeated calls
    /// return the same answer and never touch the payload.
    pub fn succeeded(&self) -> bool {
        self.raw.mark_inspected();
        self.raw.is_success()
    }

    /// Borrows the success value.
    ///
    /// Contract: the outcome must have been inspected (debug-asserted) and
    /// must actually hold a success (panics otherwise).
    pub fn result(&self) -> &R {
        debug_assert!(self.inspected(), "outcome used without prior inspection");
        match self.raw.success() {
            Some(value) => value,
            None => panic!("queried the result of a failed operation"),
        }
    }

    /// Mutably borrows the success value.
    ///
    /// Same contract as [`result`](Self::result).
    pub fn result_mut(&mut self) -> &mut R {
        debug_assert!(self.inspected(), "outcome used without prior inspection");
        match self.raw.success_mut() {
            Some(value) => value,
            None => panic!("queried the result of a failed operation"),
        }
    }

    /// Borrows the error value.
    ///
    /// Contract: the outcome must have been inspected (debug-asserted) and
    /// must actually hold a failure (panics otherwise).
    pub fn error(&self) -> &E {
        debug_assert!(self.inspected(), "outcome used without prior inspection");
        match self.raw.failure() {
            Some(error) => error,
            None => panic!("queried the error of a succeeded operation"),
        }
    }

    /// Consumes the outcome into a plain [`Result`].
    ///
    /// This is the idiomatic inspection: the `match` the caller writes next
    /// *is* the success check, so no flag discipline survives the
    /// conversion.
    pub fn into_result(self) -> Result<R, E> {
        self.raw.mark_inspected();
        self.raw.into_state()
    }

    /// Unwraps the success value of an outcome the caller knows succeeded.
    ///
    /// Being wrong about that is a contract violation: debug-asserted, and a
    /// panic in all builds (the failure payload cannot be conjured into an
    /// `R`).
    pub fn assume_success(self) -> R {
        let succeeded = self.succeeded();
        debug_assert!(succeeded, "assumed success of a failed operation");
        match self.raw.into_state() {
            Ok(value) => value,
            Err(_) => panic!("assumed success of a failed operation"),
        }
    }

    /// Latches the inspected flag without reading the state; used by wrapper
    /// paths where ownership leaves through a sanctioned exit.
    pub(crate) fn mark_inspected(&self) {
        self.raw.mark_inspected();
    }
}

impl<R, E: Escalate> Outcome<R, E> {
    /// Returns the success value, or escalates the stored error.
    ///
    /// The check counts as inspection; on failure the error is consumed by
    /// the [escalation policy](crate::escalation) and this never returns.
    pub fn escalate_if_error(self) -> R {
        match self.into_result() {
            Ok(value) => value,
            Err(error) => escalation::escalate(error),
        }
    }

    /// Destructor-path escalation: no-op when already inspected, otherwise
    /// escalates a stored failure unless the thread is already unwinding.
    ///
    /// This is the entry point the auto-escalating wrappers call when they
    /// go out of scope; it is public because retained storage can opt into
    /// the same end-of-scope semantics explicitly.
    pub fn escalate_if_uninspected(self) {
        if !self.inspected()
            && let Err(error) = self.into_result()
        {
            escalation::conditional_escalate(error);
        }
    }
}

impl<R, E> From<Result<R, E>> for Outcome<R, E> {
    fn from(result: Result<R, E>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error),
        }
    }
}

impl<R, E> fmt::Debug for Outcome<R, E>
where
    R: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug-formatting must not count as inspection, so this reads the
        // raw cell directly.
        let mut s = f.debug_struct("Outcome");
        match (self.raw.success(), self.raw.failure()) {
            (Some(value), _) => s.field("result", value),
            (_, Some(error)) => s.field("error", error),
            (None, None) => unreachable!(),
        };
        s.field("inspected", &self.inspected()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_inspection_marks_and_is_idempotent() {
        let outcome: Outcome<u32, &'static str> = Outcome::success(42);
        assert!(!outcome.inspected());
        assert!(outcome.succeeded());
        assert!(outcome.inspected());
        assert!(outcome.succeeded());
        assert_eq!(*outcome.result(), 42);
    }

    #[test]
    fn failure_inspection_exposes_the_error() {
        let outcome: Outcome<u32, &'static str> = Outcome::failure("not found");
        assert!(!outcome.succeeded());
        assert_eq!(*outcome.error(), "not found");
    }

    #[test]
    #[should_panic(expected = "queried the result of a failed operation")]
    fn result_on_failure_is_a_contract_violation() {
        let outcome: Outcome<u32, &'static str> = Outcome::failure("not found");
        assert!(!outcome.succeeded());
        let _ = outcome.result();
    }

    #[test]
    #[should_panic(expected = "queried the error of a succeeded operation")]
    fn error_on_success_is_a_contract_violation() {
        let outcome: Outcome<u32, &'static str> = Outcome::success(1);
        assert!(outcome.succeeded());
        let _ = outcome.error();
    }

    #[test]
    fn into_result_round_trips() {
        let outcome: Outcome<u32, &'static str> = Outcome::success(7);
        assert_eq!(outcome.into_result(), Ok(7));
        let outcome: Outcome<u32, &'static str> = Result::Err("gone").into();
        assert_eq!(outcome.into_result(), Err("gone"));
    }

    #[test]
    fn result_mut_updates_in_place() {
        let mut outcome: Outcome<u32, &'static str> = Outcome::success(1);
        assert!(outcome.succeeded());
        *outcome.result_mut() += 1;
        assert_eq!(outcome.into_result(), Ok(2));
    }

    #[test]
    fn assume_success_unwraps() {
        let outcome: Outcome<u32, &'static str> = Outcome::success(9);
        assert_eq!(outcome.assume_success(), 9);
    }

    #[test]
    fn escalate_if_error_passes_successes_through() {
        let outcome: Outcome<u32, &'static str> = Outcome::success(3);
        assert_eq!(outcome.escalate_if_error(), 3);
    }

    #[test]
    fn unit_outcome_has_no_success_payload() {
        let outcome: UnitOutcome<&'static str> = Outcome::success(());
        assert!(outcome.succeeded());
        outcome.escalate_if_uninspected();
    }
}
