//! Cross-module contract tests for the dual-mode propagation types:
//! escalation through `catch_unwind`, suppression during unwinding, the
//! debug sanitizer's tolerance rules, and payload ownership across moves.

use std::{
    any::Any,
    cell::Cell,
    panic::catch_unwind,
    sync::atomic::{AtomicUsize, Ordering},
};

use static_assertions::assert_not_impl_any;
use tripwire::{
    Escalate, Fallible, Outcome, Possible, UnitOutcome,
    escalation::{self, raise},
    prelude::ResultExt,
};

assert_not_impl_any!(Fallible<u32, String>: Clone, Copy);
assert_not_impl_any!(Possible<String>: Clone, Copy);
assert_not_impl_any!(Outcome<u32, String>: Clone, Copy, Sync);

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}

#[derive(Debug, thiserror::Error)]
#[error("operation timed out after {0} ms")]
struct Timeout(u64);

tripwire::escalate_via_display!(Timeout);

#[derive(Debug, PartialEq, derive_more::Display, derive_more::Error)]
#[display("endpoint {endpoint} not found")]
struct NotFound {
    endpoint: &'static str,
}

tripwire::escalate_via_display!(NotFound);

#[test]
fn value_on_failure_escalates_with_the_transformed_message() {
    let unwound = catch_unwind(|| Fallible::<u32, Timeout>::failure(Timeout(250)).value());
    let payload = unwound.unwrap_err();
    assert_eq!(
        panic_message(payload.as_ref()),
        "operation timed out after 250 ms"
    );
}

#[test]
fn explicit_inspection_sees_the_original_error() {
    let outcome = Fallible::<u32, NotFound>::failure(NotFound { endpoint: "/v2" }).into_outcome();
    assert!(!outcome.succeeded());
    assert_eq!(outcome.error(), &NotFound { endpoint: "/v2" });
    // Inspected storage dies quietly; no escalation fires past this point.
}

#[test]
fn dropped_uninspected_failure_escalates_exactly_once_with_the_error() {
    static ESCALATIONS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    struct Tracked(u32);

    impl Escalate for Tracked {
        fn escalate(self) -> ! {
            ESCALATIONS.fetch_add(1, Ordering::SeqCst);
            raise(self)
        }
    }

    let unwound = catch_unwind(|| {
        let fallible = Fallible::<(), Tracked>::failure(Tracked(7));
        drop(fallible);
    });
    let payload = unwound.unwrap_err();
    assert_eq!(payload.downcast_ref::<Tracked>().unwrap().0, 7);
    assert_eq!(ESCALATIONS.load(Ordering::SeqCst), 1);
}

#[test]
fn ignored_failure_never_escalates() {
    Fallible::<u32, Timeout>::failure(Timeout(1)).ignore_failure();
    Possible::<Timeout>::failure(Timeout(2)).ignore_failure();
}

#[test]
fn late_failure_during_unwinding_is_suppressed_not_doubled() {
    let unwound = catch_unwind(|| {
        let _late = Fallible::<u32, Timeout>::failure(Timeout(9));
        // `_late` is still unconsumed when this panic starts unwinding; its
        // drop must suppress rather than escalate on top.
        panic!("primary failure");
    });
    let payload = unwound.unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "primary failure");
}

#[test]
fn possible_ensure_escalates_on_failure() {
    let unwound = catch_unwind(|| Possible::<Timeout>::failure(Timeout(30)).ensure());
    let payload = unwound.unwrap_err();
    assert_eq!(
        panic_message(payload.as_ref()),
        "operation timed out after 30 ms"
    );
}

#[test]
fn moved_storage_drops_its_payload_exactly_once() {
    struct Tracker<'a>(&'a Cell<u32>);

    impl Drop for Tracker<'_> {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let drops = Cell::new(0);
    {
        let outcome: Outcome<Tracker<'_>, &'static str> = Outcome::success(Tracker(&drops));
        let moved = outcome;
        assert!(moved.succeeded());
        let payload = moved.into_result().unwrap();
        assert_eq!(drops.get(), 0);
        drop(payload);
    }
    assert_eq!(drops.get(), 1);

    let drops = Cell::new(0);
    {
        let fallible: Fallible<Tracker<'_>, &'static str> = Fallible::success(Tracker(&drops));
        let payload = fallible.value();
        drop(payload);
    }
    assert_eq!(drops.get(), 1);
}

#[test]
fn propagated_failures_escalate_at_the_outermost_caller() {
    fn inner() -> Fallible<u32, Timeout> {
        Fallible::failure(Timeout(77))
    }

    fn outer() -> Fallible<u32, Timeout> {
        inner().propagate()
    }

    let unwound = catch_unwind(|| outer().value());
    let payload = unwound.unwrap_err();
    assert_eq!(
        panic_message(payload.as_ref()),
        "operation timed out after 77 ms"
    );
}

#[test]
fn results_flow_through_the_extension_trait() {
    let parsed: Result<u16, Timeout> = Ok(4000);
    assert_eq!(parsed.into_fallible().value(), 4000);

    let failed: Result<u16, Timeout> = Err(Timeout(5));
    let outcome = failed.into_outcome();
    assert!(!outcome.succeeded());
    assert_eq!(outcome.error().0, 5);
}

#[test]
fn unit_outcomes_round_trip_through_possible() {
    let possible = Possible::<Timeout>::failure(Timeout(3));
    let outcome: UnitOutcome<Timeout> = possible.into_outcome();
    assert!(!outcome.succeeded());
    let rearmed: Possible<Timeout> = Possible::from(Outcome::failure(Timeout(4)));
    assert!(!rearmed.succeeded());
}

#[test]
fn escalate_is_usable_directly_on_retained_storage() {
    let unwound = catch_unwind(|| {
        let outcome: Outcome<u32, Timeout> = Outcome::failure(Timeout(12));
        outcome.escalate_if_error()
    });
    let payload = unwound.unwrap_err();
    assert_eq!(
        panic_message(payload.as_ref()),
        "operation timed out after 12 ms"
    );

    // The conditional entry point is a no-op on inspected storage.
    let outcome: Outcome<u32, Timeout> = Outcome::failure(Timeout(13));
    assert!(!outcome.succeeded());
    outcome.escalate_if_uninspected();
}

#[test]
fn conditional_escalation_raises_when_nothing_is_unwinding() {
    let unwound = catch_unwind(|| escalation::conditional_escalate(Timeout(21)));
    let payload = unwound.unwrap_err();
    assert_eq!(
        panic_message(payload.as_ref()),
        "operation timed out after 21 ms"
    );
}

#[cfg(debug_assertions)]
mod sanitizer_rules {
    use std::panic::AssertUnwindSafe;

    use super::*;

    #[test]
    fn sibling_wrappers_with_one_inspection_are_tolerated() {
        let first = Fallible::<u32, Timeout>::failure(Timeout(1));
        let second = Fallible::<u32, Timeout>::success(2);
        // Both alive at once, as if evaluated as two arguments of one call.
        assert!(second.succeeded());
        let outcome = first.into_outcome();
        assert!(!outcome.succeeded());
    }

    #[test]
    fn sibling_wrappers_with_no_inspection_are_flagged() {
        let unwound = catch_unwind(|| {
            let first = Fallible::<u32, Timeout>::success(1);
            let second = Fallible::<u32, Timeout>::success(2);
            drop(second);
            drop(first);
        });
        let payload = unwound.unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "uninspected fallible value");
    }

    #[test]
    fn a_single_forgotten_success_is_flagged() {
        let unwound = catch_unwind(|| {
            let forgotten = Fallible::<u32, Timeout>::success(5);
            drop(forgotten);
        });
        let payload = unwound.unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "uninspected fallible value");
    }

    #[test]
    fn an_unrelated_panic_excuses_uninspected_siblings() {
        let held = Fallible::<u32, Timeout>::success(8);
        let unwound = catch_unwind(AssertUnwindSafe(|| {
            let _first = Fallible::<u32, Timeout>::success(1);
            panic!("external failure");
        }));
        assert_eq!(
            panic_message(unwound.unwrap_err().as_ref()),
            "external failure"
        );
        assert!(held.succeeded());
    }

    #[test]
    fn coexisting_void_wrappers_are_flagged() {
        let unwound = catch_unwind(|| {
            let first = Possible::<Timeout>::success();
            let second = Possible::<Timeout>::success();
            drop(second);
            drop(first);
        });
        let payload = unwound.unwrap_err();
        assert!(
            panic_message(payload.as_ref()).contains("more than one live void fallible value")
        );
    }

    #[test]
    fn counters_recover_after_a_flagged_scope() {
        let _ = catch_unwind(|| {
            let forgotten = Fallible::<u32, Timeout>::success(1);
            drop(forgotten);
        });
        // The thread's accounting must be balanced again afterwards.
        assert!(Fallible::<u32, Timeout>::success(2).succeeded());
        Possible::<Timeout>::success().ensure();
    }
}
