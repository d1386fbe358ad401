#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`tripwire`].
//!
//! # Overview
//!
//! This crate contains the raw storage cells that power the [`tripwire`]
//! dual-mode error propagation library, plus the [`handlers::Escalate`]
//! trait that turns stored failures into panics.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`tripwire`] crate,
//! not this one.
//!
//! # Architecture
//!
//! Two parallel storage cells exist, one per representation:
//!
//! - [`RawOutcome`]: the full representation — a tagged sum of a success
//!   payload or a failure payload, plus the inspection flag.
//! - [`RawCompressed`]: the compressed representation — just a success
//!   payload whose own validity signal doubles as the discriminant, plus the
//!   inspection flag.
//!
//! Both are *mechanism only*: they offer constructors, flag reads, flag
//! marking, payload peeks, and consuming extraction, and they attach no
//! meaning to any of it. The inspection *contract* (what may be read when,
//! and what an uninspected value does at end of life) is policy and lives in
//! the [`tripwire`] crate.
//!
//! # Invariant Strategy
//!
//! The correctness of the public crate rests on two invariants that this
//! crate makes locally verifiable by keeping every field module-private:
//!
//! - **The discriminant is immutable after construction.** [`RawOutcome`]
//!   stores its payloads in a Rust `enum`, so the compiler enforces that
//!   exactly one payload is live and that the variant can never be swapped
//!   in place; the API offers no way to replace the state short of consuming
//!   the cell.
//! - **The inspection flag transitions one way.** The flag type
//!   ([`flag::InspectionFlag`]) exposes `get` and `mark` but no way to clear,
//!   so `false → true` is the only possible transition. Every path that
//!   reports the flag as `true` follows an actual inspection.
//!
//! [`tripwire`]: https://docs.rs/tripwire/latest/tripwire/

mod compressed;
mod flag;
pub mod handlers;
mod outcome;

pub use compressed::RawCompressed;
pub use outcome::RawOutcome;
