#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A dual-mode error propagation primitive: inspect failures explicitly, or
//! let them escalate.
//!
//! ## Overview
//!
//! Some call sites want error-code style control flow — check a flag, branch,
//! recover. Others want exception style — ask for the value and let a failure
//! unwind. This crate lets a fallible function serve both from a single
//! return type, with the guarantee that no produced error can ever be
//! silently lost: every result is inspected exactly once, or its failure
//! escalates into a panic.
//!
//! ## Quick Example
//!
//! ```
//! use tripwire::prelude::*;
//!
//! fn parse_port(raw: &str) -> Fallible<u16, String> {
//!     match raw.parse::<u16>() {
//!         Ok(port) => Fallible::success(port),
//!         Err(err) => Fallible::failure(err.to_string()),
//!     }
//! }
//!
//! // Exception mode: a failure would escalate into a panic carrying the
//! // parse error's message.
//! let port = parse_port("8080").value();
//! assert_eq!(port, 8080);
//!
//! // Error-code mode: retain the outcome and branch on it explicitly.
//! let outcome = parse_port("not a port").into_outcome();
//! assert!(!outcome.succeeded());
//! assert!(outcome.error().contains("invalid digit"));
//! ```
//!
//! ## Core Concepts
//!
//! Two types carry the whole model:
//!
//! - [`Outcome<R, E>`] is *retained storage*: a tagged sum of a success value
//!   or an error value, plus a one-way "inspected" flag. Reading either
//!   payload requires inspecting the success state first (via
//!   [`succeeded`](Outcome::succeeded), or idiomatically by consuming it into
//!   a [`Result`]). Storage never panics on drop — it is safe to keep around,
//!   return, and discard after inspection.
//!
//! - [`Fallible<R, E>`] is the *transfer device* fallible functions return: a
//!   short-lived wrapper around an `Outcome` meant to be consumed in the
//!   very expression that received it. The caller picks a mode —
//!   [`value`](Fallible::value) (escalate on failure),
//!   [`into_outcome`](Fallible::into_outcome) (retain for inspection),
//!   [`succeeded`](Fallible::succeeded) (boolean check),
//!   [`ignore_failure`](Fallible::ignore_failure) (waive) — and choosing no
//!   mode is itself handled: dropping an unconsumed failure escalates it.
//!
//! Escalation converts the stored error into a panic through the per-type
//! [`Escalate`] transform (see [`escalation`]), notifying the process-global
//! [escalation hook](hooks) on the way out. A failure whose destructor runs
//! while *another* panic is already unwinding is suppressed instead of
//! aborting the process.
//!
//! [`UnitOutcome`] and [`Possible`] are the payload-free spellings for
//! operations that succeed with nothing, and [`CompressedOutcome`] is an
//! opt-in storage layout for the special case where the success value can
//! vouch for its own validity and the error is a zero-size marker.
//!
//! ## Consumed Exactly Once
//!
//! The wrappers are `#[must_use]`, neither `Clone` nor `Copy`, and every
//! method consumes `self`, so the type system enforces single consumption at
//! compile time. The runtime backstop — a debug-only, per-thread sanitizer
//! counting live wrappers — exists for the one case ownership cannot see:
//! several wrappers produced inside one expression where *none* of them ends
//! up inspected.
//!
//! ## Feature Flags
//!
//! - `std` *(default)* — enables the debug sanitizer, [`LastOsError`], the
//!   payload-carrying [`escalation::raise`], and suppression of escalation
//!   during unwinding. Without it the crate is `no_std` (`alloc` is still
//!   required for message formatting) and escalation is unconditional.

extern crate alloc;

#[macro_use]
mod macros;

pub mod escalation;
pub mod hooks;
pub mod prelude;

mod compressed;
mod fallible;
mod last_error;
mod outcome;
mod result_ext;
mod sanitizer;

#[cfg(feature = "std")]
pub use self::last_error::LastOsError;
pub use self::{
    compressed::{CompressedOutcome, Validity},
    escalation::Escalate,
    fallible::{Fallible, Possible},
    last_error::LastError,
    outcome::{Outcome, UnitOutcome},
    result_ext::ResultExt,
};
