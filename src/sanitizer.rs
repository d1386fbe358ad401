//! Debug-only per-thread accounting of live fallible wrappers.
//!
//! Rust's ownership system already makes "forgot to check the result" hard:
//! the wrappers are `#[must_use]` and every accessor consumes them. This
//! module is the runtime backstop behind that, kept as a debug-only
//! diagnostic: it counts how many wrappers are simultaneously alive on the
//! current thread and whether at least one of them got inspected.
//!
//! The subtlety the counter exists for: several wrappers can legitimately
//! coexist within a single expression (for example as two arguments to one
//! call, where evaluation order is unspecified), and an early exit caused by
//! one failure can leave the others uninspected through no fault of the
//! programmer. So a wrapper dying uninspected is only a violation when *no*
//! sibling was inspected, *no* sibling is still alive to be inspected later,
//! and *no* panic is already unwinding the thread.
//!
//! Void-result wrappers ([`Possible`](crate::Possible)) use a separate
//! single-slot counter: there is no multi-argument scenario for them, so two
//! alive at once is itself a violation.
//!
//! Everything here compiles to nothing unless `debug_assertions` and the
//! `std` feature (for thread-local storage) are both on.

#[cfg(all(debug_assertions, feature = "std"))]
mod imp {
    use core::cell::Cell;
    use std::thread;

    /// Per-thread wrapper accounting.
    struct Sanitizer {
        /// Number of currently live (non-void) fallible wrappers.
        live: Cell<u8>,
        /// Whether any wrapper in the current nesting was inspected.
        any_inspected: Cell<bool>,
        /// Number of currently live void-result wrappers; at most one.
        live_void: Cell<u8>,
    }

    std::thread_local! {
        /// Lazily initialized on first use per thread; never torn down.
        static SANITIZER: Sanitizer = const {
            Sanitizer {
                live: Cell::new(0),
                any_inspected: Cell::new(false),
                live_void: Cell::new(0),
            }
        };
    }

    pub(crate) fn add_instance() {
        SANITIZER.with(|s| s.live.set(s.live.get() + 1));
    }

    pub(crate) fn remove_instance(was_inspected: bool) {
        SANITIZER.with(|s| {
            let live = s.live.get();
            debug_assert!(live > 0, "mismatched sanitizer add/remove");
            let live = live - 1;
            s.live.set(live);
            s.any_inspected.set(s.any_inspected.get() | was_inspected);
            debug_assert!(
                s.any_inspected.get() || live > 0 || thread::panicking(),
                "uninspected fallible value"
            );
            // A fresh nesting starts with a clean latch.
            if live == 0 {
                s.any_inspected.set(false);
            }
        });
    }

    pub(crate) fn add_void_instance() {
        SANITIZER.with(|s| {
            debug_assert_eq!(
                s.live_void.get(),
                0,
                "more than one live void fallible value"
            );
            s.live_void.set(s.live_void.get() + 1);
        });
    }

    pub(crate) fn remove_void_instance() {
        SANITIZER.with(|s| {
            debug_assert_eq!(
                s.live_void.get(),
                1,
                "more than one live void fallible value"
            );
            s.live_void.set(0);
        });
    }
}

#[cfg(not(all(debug_assertions, feature = "std")))]
mod imp {
    pub(crate) fn add_instance() {}

    pub(crate) fn remove_instance(_was_inspected: bool) {}

    pub(crate) fn add_void_instance() {}

    pub(crate) fn remove_void_instance() {}
}

pub(crate) use imp::{add_instance, add_void_instance, remove_instance, remove_void_instance};

/// Drop guard that records one wrapper's removal, including when the scope
/// exits through an escalation panic.
pub(crate) struct InstanceGuard {
    /// The inspection state to report on removal.
    was_inspected: bool,
}

impl InstanceGuard {
    pub(crate) fn new(was_inspected: bool) -> Self {
        Self { was_inspected }
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        remove_instance(self.was_inspected);
    }
}

/// Drop guard for the void-result slot.
pub(crate) struct VoidInstanceGuard;

impl Drop for VoidInstanceGuard {
    fn drop(&mut self) {
        remove_void_instance();
    }
}
