//! Extension methods for moving standard [`Result`]s into the dual-mode
//! types.

use crate::{Fallible, Outcome, escalation::Escalate};

mod sealed {
    //! Seals [`ResultExt`](super::ResultExt) to `Result`.

    /// Sealing trait.
    pub trait Sealed {}
    impl<R, E> Sealed for Result<R, E> {}
}

/// Adapters from [`Result`] into [`Outcome`] and [`Fallible`].
///
/// These are the method-position spellings of the `From` conversions, for
/// use at the tail of a combinator chain or a `?`-style body.
///
/// # Examples
///
/// ```
/// use tripwire::{Fallible, prelude::ResultExt};
///
/// fn parse_retries(raw: &str) -> Fallible<u8, String> {
///     raw.parse::<u8>().map_err(|e| e.to_string()).into_fallible()
/// }
///
/// assert_eq!(parse_retries("3").value(), 3);
/// ```
pub trait ResultExt<R, E>: sealed::Sealed {
    /// Converts into retained storage for explicit inspection.
    #[must_use]
    fn into_outcome(self) -> Outcome<R, E>;

    /// Converts into an auto-escalating fallible value.
    #[must_use]
    fn into_fallible(self) -> Fallible<R, E>
    where
        E: Escalate;
}

impl<R, E> ResultExt<R, E> for Result<R, E> {
    #[inline]
    fn into_outcome(self) -> Outcome<R, E> {
        self.into()
    }

    #[inline]
    fn into_fallible(self) -> Fallible<R, E>
    where
        E: Escalate,
    {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_converts_both_ways() {
        let outcome = Ok::<u32, &'static str>(4).into_outcome();
        assert!(outcome.succeeded());

        let fallible = Err::<u32, &'static str>("no").into_fallible();
        assert!(!fallible.succeeded());
    }
}
