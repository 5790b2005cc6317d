use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::{OpaqueError, chain, opaque::MessageError};

/// Attach a human readable context to the failure case of a `Result` or `Option`,
/// turning it into an [`OpaqueError`].
///
/// A `None` becomes an error of its own, with the context as its message prefix.
///
/// # Examples
///
/// ```
/// use uadetect_error::ErrorContext;
///
/// let err = "v2".parse::<u8>().context("rule #7 version").unwrap_err();
/// assert_eq!(err.to_string(), "rule #7 version: invalid digit found in string");
///
/// let err = None::<&str>.with_context(|| format!("brand {}", "Archos")).unwrap_err();
/// assert_eq!(err.to_string(), "brand Archos: Option is None");
/// ```
pub trait ErrorContext: sealed::Sealed + Sized {
    type Context;

    /// Add a context, only computed on failure.
    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;

    /// Add a context.
    fn context<C>(self, context: C) -> Self::Context
    where
        C: Display + Send + Sync + 'static,
    {
        self.with_context(|| context)
    }
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    type Context = Result<T, OpaqueError>;

    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| error.with_context(context))
    }
}

impl<T> ErrorContext for Option<T> {
    type Context = Result<T, OpaqueError>;

    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| MessageError("Option is None").with_context(context))
    }
}

/// Helpers available on every sized, thread safe error.
///
/// For a [`BoxError`](crate::BoxError) use the free functions
/// [`error_chain`](crate::error_chain) and [`root_cause`](crate::root_cause).
///
/// # Examples
///
/// ```
/// use uadetect_error::ErrorExt;
///
/// let err = std::io::Error::other("connection reset").context("memcached get");
/// assert_eq!(err.to_string(), "memcached get: connection reset");
/// assert_eq!(err.chain().count(), 2);
/// assert!(err.root_cause().is::<std::io::Error>());
/// ```
pub trait ErrorExt: Error + Send + Sync + Sized + 'static {
    /// Wrap the error, prefixing its message with `context`.
    fn context<C>(self, context: C) -> OpaqueError
    where
        C: Display + Send + Sync + 'static,
    {
        OpaqueError::from_std(ContextError {
            context,
            source: self,
        })
    }

    /// Like [`ErrorExt::context`], computing the context on demand.
    fn with_context<C, F>(self, context: F) -> OpaqueError
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.context(context())
    }

    /// This error followed by its sources.
    fn chain(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        chain::error_chain(self)
    }

    /// The innermost source of this error.
    fn root_cause(&self) -> &(dyn Error + 'static) {
        chain::root_cause(self)
    }
}

impl<E: Error + Send + Sync + 'static> ErrorExt for E {}

struct ContextError<C, E> {
    context: C,
    source: E,
}

impl<C: Display, E: fmt::Debug> fmt::Debug for ContextError<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextError")
            .field(&self.context.to_string())
            .field(&self.source)
            .finish()
    }
}

impl<C: Display, E: Display> Display for ContextError<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl<C, E> Error for ContextError<C, E>
where
    C: Display,
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

mod sealed {
    pub trait Sealed {}

    impl<T, E> Sealed for Result<T, E> {}
    impl<T> Sealed for Option<T> {}
}
