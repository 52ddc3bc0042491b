use std::{fmt, panic::Location};

use super::errors::SimpleError;

pub type Result<T, E = SimpleError> = std::result::Result<T, E>;

/// An operation that only reports whether it failed.
pub type VoidResult<E = SimpleError> = Result<(), E>;

/// An operation that hands out exclusive ownership of a heap value.
pub type UniqueResult<T, E = SimpleError> = Result<Box<T>, E>;

/// Inspection and annotation helpers shared by every fallible call in the crate.
///
/// The accessors treat asking for the wrong variant as a bug in the caller and
/// panic, pointing at the call site.
pub trait ResultExt<T, E> {
    fn succeeded(&self) -> bool;

    fn failed(&self) -> bool;

    fn value(&self) -> &T;

    fn error(&self) -> &E;

    /// Text of the error prefixed with `prefix`, as `"<prefix>: <message>"`.
    fn error_with_prefix(&self, prefix: fmt::Arguments<'_>) -> SimpleError;

    fn with_prefix<P>(self, prefix: P) -> Result<T>
    where
        P: fmt::Display;

    /// Prefixes a failure with the source location of the caller.
    fn located(self) -> Result<T>;

    fn drop_value(self) -> VoidResult<E>;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: fmt::Display,
{
    fn succeeded(&self) -> bool {
        self.is_ok()
    }

    fn failed(&self) -> bool {
        self.is_err()
    }

    #[track_caller]
    fn value(&self) -> &T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("value() called on a failed result: {error}"),
        }
    }

    #[track_caller]
    fn error(&self) -> &E {
        match self {
            Ok(_) => panic!("error() called on a successful result"),
            Err(error) => error,
        }
    }

    #[track_caller]
    fn error_with_prefix(&self, prefix: fmt::Arguments<'_>) -> SimpleError {
        crate::simple_error!("{prefix}: {}", self.error())
    }

    fn with_prefix<P>(self, prefix: P) -> Result<T>
    where
        P: fmt::Display,
    {
        self.map_err(|error| crate::simple_error!("{prefix}: {error}"))
    }

    #[track_caller]
    fn located(self) -> Result<T> {
        let location = Location::caller();
        self.map_err(|error| {
            crate::simple_error!("({}:{}): {error}", location.file(), location.line())
        })
    }

    fn drop_value(self) -> VoidResult<E> {
        self.map(|_| ())
    }
}

pub trait ConsumeExt<T: ?Sized, E> {
    /// Hands the owned value to `f` on success, keeping only the outcome.
    fn consume<F>(self, f: F) -> VoidResult<E>
    where
        F: FnOnce(&mut T);
}

impl<T: ?Sized, E> ConsumeExt<T, E> for UniqueResult<T, E> {
    fn consume<F>(self, f: F) -> VoidResult<E>
    where
        F: FnOnce(&mut T),
    {
        self.map(|mut value| f(&mut *value))
    }
}

/// Maps every item through `f`, stopping at the first failure.
pub fn map_all<I, U, E, F>(items: I, mut f: F) -> Result<Vec<U>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<U, E>,
    E: fmt::Display,
{
    items
        .into_iter()
        .map(|item| f(item).with_prefix("failed to map results"))
        .collect()
}
