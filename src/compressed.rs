//! The compressed storage variant: no discriminant, the success payload
//! reports its own validity.

use core::{fmt, marker::PhantomData};

use tripwire_internals::RawCompressed;

use crate::escalation::{self, Escalate};

/// A success payload that can report whether it represents a usable value.
///
/// This is the capability that lets [`CompressedOutcome`] drop the separate
/// discriminant: "did the operation succeed" becomes "is the stored value
/// valid". Implementations must be cheap and side-effect free — the signal
/// is read on every inspection.
///
/// The trait is deliberately *not* implemented for plain integers or
/// `bool`: every value of such types converts to a boolean, which makes the
/// signal meaningless. Implement it for types with a genuine invalid state.
pub trait Validity {
    /// Whether this value represents a successful, usable result.
    fn is_valid(&self) -> bool;
}

impl<T> Validity for Option<T> {
    fn is_valid(&self) -> bool {
        self.is_some()
    }
}

impl<T> Validity for *const T {
    fn is_valid(&self) -> bool {
        !self.is_null()
    }
}

impl<T> Validity for *mut T {
    fn is_valid(&self) -> bool {
        !self.is_null()
    }
}

/// Result storage that stores only the success payload, deriving the
/// discriminant from the payload's own [`Validity`] signal.
///
/// This is a space optimization for the special case where the error type
/// carries no information (a zero-size marker): instead of a tagged union
/// plus discriminant, only `R` and the inspection flag are stored, and
/// [`error`](Self::error) materializes a default-constructed `E` on demand.
///
/// It is an explicit opt-in — nothing selects this representation
/// automatically based on the involved types, precisely because "the error
/// is always `E::default()`" surprises callers who expect a rich error
/// value. Reach for it when profiling says the discriminant byte matters;
/// otherwise use [`Outcome`](crate::Outcome).
///
/// # Examples
///
/// ```
/// use tripwire::CompressedOutcome;
///
/// #[derive(Default, Debug, PartialEq)]
/// struct NotFound;
///
/// let lookup: CompressedOutcome<Option<u32>, NotFound> =
///     CompressedOutcome::from_value(Some(7));
/// assert!(lookup.succeeded());
/// assert_eq!(lookup.result(), &Some(7));
///
/// let missing: CompressedOutcome<Option<u32>, NotFound> = CompressedOutcome::failure();
/// assert!(!missing.succeeded());
/// assert_eq!(missing.error(), NotFound);
/// ```
#[must_use = "an unexamined outcome silently swallows its error"]
pub struct CompressedOutcome<R: Validity, E> {
    /// The raw cell: the payload plus the inspection flag, nothing else.
    raw: RawCompressed<R>,
    /// The error type exists only at the type level; values are
    /// default-constructed on demand.
    marker: PhantomData<fn() -> E>,
}

impl<R: Validity, E: Default> CompressedOutcome<R, E> {
    /// Creates storage around `value`, uninspected.
    ///
    /// Whether this is a success or a failure is decided by the value
    /// itself, at inspection time.
    pub fn from_value(value: R) -> Self {
        Self {
            raw: RawCompressed::new(value),
            marker: PhantomData,
        }
    }

    /// Creates failed storage from `R`'s default value.
    ///
    /// Contract: the default of a validity-reporting type must be invalid
    /// (debug-asserted); otherwise the failure would read back as success.
    #[cold]
    pub fn failure() -> Self
    where
        R: Default,
    {
        let value = R::default();
        debug_assert!(
            !value.is_valid(),
            "default success value reports itself valid"
        );
        Self::from_value(value)
    }

    /// Whether the validity signal has been read, without reading it.
    pub fn inspected(&self) -> bool {
        self.raw.is_inspected()
    }

    /// Whether the stored value reports itself valid.
    ///
    /// This is the inspection: calling it latches the
    /// [`inspected`](Self::inspected) flag.
    pub fn succeeded(&self) -> bool {
        self.raw.mark_inspected();
        self.raw.value().is_valid()
    }

    /// Borrows the success value.
    ///
    /// Contract: inspected and valid (debug-asserted). Unlike the full
    /// representation there is no separate payload to mix up, so nothing is
    /// checked in release builds — an invalid value is simply returned as
    /// stored.
    pub fn result(&self) -> &R {
        debug_assert!(self.inspected(), "outcome used without prior inspection");
        debug_assert!(
            self.raw.value().is_valid(),
            "queried the result of a failed operation"
        );
        self.raw.value()
    }

    /// Mutably borrows the success value. Same contract as
    /// [`result`](Self::result).
    pub fn result_mut(&mut self) -> &mut R {
        debug_assert!(self.inspected(), "outcome used without prior inspection");
        debug_assert!(
            self.raw.value().is_valid(),
            "queried the result of a failed operation"
        );
        self.raw.value_mut()
    }

    /// Returns the error value: always `E::default()`, by value.
    ///
    /// Contract: inspected and invalid (debug-asserted).
    #[cold]
    pub fn error(&self) -> E {
        debug_assert!(self.inspected(), "outcome used without prior inspection");
        debug_assert!(
            !self.raw.value().is_valid(),
            "queried the error of a succeeded operation"
        );
        E::default()
    }

    /// Consumes the storage into a plain [`Result`], deciding by validity.
    pub fn into_result(self) -> Result<R, E> {
        if self.succeeded() {
            Ok(self.raw.into_value())
        } else {
            Err(E::default())
        }
    }

    /// Unwraps a value the caller knows is valid (debug-asserted).
    pub fn assume_success(self) -> R {
        let succeeded = self.succeeded();
        debug_assert!(succeeded, "assumed success of a failed operation");
        self.raw.into_value()
    }

    /// Re-expands into the full representation, preserving the inspection
    /// state.
    pub fn into_outcome(self) -> crate::Outcome<R, E> {
        let inspected = self.inspected();
        let outcome = match self.into_result() {
            Ok(value) => crate::Outcome::success(value),
            Err(error) => crate::Outcome::failure(error),
        };
        if inspected {
            outcome.mark_inspected();
        }
        outcome
    }
}

impl<R: Validity, E: Default + Escalate> CompressedOutcome<R, E> {
    /// Returns the success value, or escalates a default-constructed error.
    pub fn escalate_if_error(self) -> R {
        match self.into_result() {
            Ok(value) => value,
            Err(error) => escalation::escalate(error),
        }
    }

    /// Destructor-path escalation; see
    /// [`Outcome::escalate_if_uninspected`](crate::Outcome::escalate_if_uninspected).
    pub fn escalate_if_uninspected(self) {
        if !self.inspected()
            && let Err(error) = self.into_result()
        {
            escalation::conditional_escalate(error);
        }
    }
}

impl<R, E> From<CompressedOutcome<R, E>> for crate::Outcome<R, E>
where
    R: Validity,
    E: Default,
{
    fn from(compressed: CompressedOutcome<R, E>) -> Self {
        compressed.into_outcome()
    }
}

impl<R, E> fmt::Debug for CompressedOutcome<R, E>
where
    R: Validity + fmt::Debug,
    E: Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedOutcome")
            .field("value", self.raw.value())
            .field("inspected", &self.inspected())
            .finish()
    }
}
