//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use tripwire::prelude::*;
//!
//! fn checked_div(a: u32, b: u32) -> Fallible<u32, String> {
//!     if b == 0 {
//!         Fallible::failure("division by zero".to_string())
//!     } else {
//!         Fallible::success(a / b)
//!     }
//! }
//!
//! assert_eq!(checked_div(10, 2).value(), 5);
//! assert!(!checked_div(1, 0).succeeded());
//! ```
//!
//! # What's Included
//!
//! - **[`Outcome`]** / **[`UnitOutcome`]**: retained result storage
//! - **[`Fallible`]** / **[`Possible`]**: the auto-escalating wrappers
//! - **[`Escalate`]**: the error-to-panic transform trait
//! - **[`LastError`]**: the error-source capability
//! - **[`ResultExt`]**: extension methods for `Result`
//! - **[`escalate_via_display!`]**: the transform-impl macro

pub use crate::{
    Escalate, Fallible, LastError, Outcome, Possible, UnitOutcome, escalate_via_display,
    result_ext::ResultExt,
};
