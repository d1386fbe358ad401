//! The one-way inspection flag shared by both storage representations.
//!
//! This module encapsulates the only mutable state in the crate. Since the
//! [`Cell`] is not visible anywhere else, the flag is guaranteed to support
//! exactly two operations — read and set-to-true — which makes the
//! `Uninspected → Inspected` transition one-way by construction.

use core::cell::Cell;

/// A `false → true` latch recording whether a stored result has been
/// inspected.
///
/// The flag is interior-mutable so that inspection can be recorded through a
/// shared reference (checking a result for success is logically a read, even
/// though it arms the latch). This is what makes the storage cells `!Sync`;
/// they are single-thread values by design.
pub(crate) struct InspectionFlag(Cell<bool>);

impl InspectionFlag {
    /// Creates a new flag in the uninspected state.
    pub(crate) const fn new() -> Self {
        Self(Cell::new(false))
    }

    /// Reads the flag without changing it.
    pub(crate) fn get(&self) -> bool {
        self.0.get()
    }

    /// Latches the flag to the inspected state.
    ///
    /// Idempotent; there is deliberately no way to clear the flag again.
    pub(crate) fn mark(&self) {
        self.0.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninspected_and_latches() {
        let flag = InspectionFlag::new();
        assert!(!flag.get());
        flag.mark();
        assert!(flag.get());
        flag.mark();
        assert!(flag.get());
    }
}
