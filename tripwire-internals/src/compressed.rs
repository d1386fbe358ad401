//! This module encapsulates the fields of [`RawCompressed`]. The compressed
//! representation carries no discriminant at all: the success payload itself
//! reports whether it is valid, and the failure "payload" is materialized on
//! demand by the layer above. All this cell stores is the value and the
//! one-way inspection flag.

use crate::flag::InspectionFlag;

/// The compressed storage representation: a success payload whose own
/// validity signal doubles as the discriminant, plus the inspection flag.
///
/// This cell knows nothing about validity — it cannot, since deriving
/// success from the payload requires a capability trait that lives in the
/// public crate. It only guarantees that the value is stored untouched and
/// that the flag transitions one way.
pub struct RawCompressed<R> {
    /// The stored payload; whether it encodes success is the caller's call.
    value: R,
    /// Whether the validity of `value` has been read by someone.
    inspected: InspectionFlag,
}

impl<R> RawCompressed<R> {
    /// Creates a cell around `value`, uninspected.
    pub fn new(value: R) -> Self {
        Self {
            value,
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

    /// Borrows the stored payload.
    pub fn value(&self) -> &R {
        &self.value
    }

    /// Mutably borrows the stored payload.
    pub fn value_mut(&mut self) -> &mut R {
        &mut self.value
    }

    /// Consumes the cell and extracts the payload, discarding the flag.
    pub fn into_value(self) -> R {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_extracts_untouched() {
        let cell = RawCompressed::new(Some(3u8));
        assert!(!cell.is_inspected());
        assert_eq!(cell.value(), &Some(3));
        cell.mark_inspected();
        assert!(cell.is_inspected());
        assert_eq!(cell.into_value(), Some(3));
    }
}
