//! This module encapsulates the fields of [`RawOutcome`]. Since this is the
//! only place they are visible, the discriminant can never change after
//! construction and the inspection flag can only move through
//! [`InspectionFlag::mark`]. The [`tripwire`] crate layers the inspection
//! contract on top of these primitives.
//!
//! [`tripwire`]: https://docs.rs/tripwire/latest/tripwire/

use crate::flag::InspectionFlag;

/// The live payload of a [`RawOutcome`]: exactly one of a success value or a
/// failure value.
enum State<R, E> {
    /// The operation succeeded and produced `R`.
    Success(R),
    /// The operation failed and produced `E`.
    Failure(E),
}

/// The full storage representation: a tagged sum of a success payload or a
/// failure payload, plus the one-way inspection flag.
///
/// This type is mechanism only. It does not assert anything about *when* its
/// payloads may be read — that contract belongs to the caller. What it does
/// guarantee, by field privacy and by using an `enum` for the payloads, is:
///
/// - exactly one payload is live at any time;
/// - the discriminant is immutable after construction;
/// - the inspection flag only ever transitions from `false` to `true`;
/// - dropping the cell drops the live payload and nothing else.
pub struct RawOutcome<R, E> {
    /// The live payload and the discriminant in one.
    state: State<R, E>,
    /// Whether the success/failure state has been read by someone.
    inspected: InspectionFlag,
}

impl<R, E> RawOutcome<R, E> {
    /// Creates a cell holding a success payload, uninspected.
    pub fn new_success(value: R) -> Self {
        Self {
            state: State::Success(value),
            inspected: InspectionFlag::new(),
        }
    }

    /// Creates a cell holding a failure payload, uninspected.
    pub fn new_failure(error: E) -> Self {
        Self {
            state: State::Failure(error),
            inspected: InspectionFlag::new(),
        }
    }

    /// Reads the inspection flag without changing it.
    pub fn is_inspected(&self) -> bool {
        self.inspected.get()
    }

    /// Latches the inspection flag.
    pub fn mark_inspected(&self) {
        self.inspected.mark();
    }

    /// Reads the discriminant without recording an inspection.
    pub fn is_success(&self) -> bool {
        matches!(self.state, State::Success(_))
    }

    /// Borrows the success payload, if this cell holds one.
    pub fn success(&self) -> Option<&R> {
        match &self.state {
            State::Success(value) => Some(value),
            State::Failure(_) => None,
        }
    }

    /// Mutably borrows the success payload, if this cell holds one.
    pub fn success_mut(&mut self) -> Option<&mut R> {
        match &mut self.state {
            State::Success(value) => Some(value),
            State::Failure(_) => None,
        }
    }

    /// Borrows the failure payload, if this cell holds one.
    pub fn failure(&self) -> Option<&E> {
        match &self.state {
            State::Success(_) => None,
            State::Failure(error) => Some(error),
        }
    }

    /// Consumes the cell and extracts the live payload.
    ///
    /// The inspection flag is discarded; whether this extraction counted as
    /// an inspection is the caller's business.
    pub fn into_state(self) -> Result<R, E> {
        match self.state {
            State::Success(value) => Ok(value),
            State::Failure(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_not_impl_any;

    use super::*;

    // Duplicate ownership of the live payload must be impossible.
    assert_not_impl_any!(RawOutcome<u8, u8>: Clone, Copy, Sync);

    #[test]
    fn success_cell_roundtrip() {
        let cell = RawOutcome::<u32, &str>::new_success(7);
        assert!(cell.is_success());
        assert!(!cell.is_inspected());
        assert_eq!(cell.success(), Some(&7));
        assert_eq!(cell.failure(), None);
        assert_eq!(cell.into_state(), Ok(7));
    }

    #[test]
    fn failure_cell_roundtrip() {
        let cell = RawOutcome::<u32, &str>::new_failure("nope");
        assert!(!cell.is_success());
        assert_eq!(cell.success(), None);
        assert_eq!(cell.failure(), Some(&"nope"));
        assert_eq!(cell.into_state(), Err("nope"));
    }

    #[test]
    fn marking_does_not_touch_the_payload() {
        let mut cell = RawOutcome::<u32, &str>::new_success(1);
        cell.mark_inspected();
        assert!(cell.is_inspected());
        *cell.success_mut().unwrap() = 2;
        assert_eq!(cell.into_state(), Ok(2));
    }
}
