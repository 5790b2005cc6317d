use std::error::Error;

/// Iterate over `error` followed by each of its sources, outermost first.
///
/// Works for unsized errors as well, such as the one behind a [`BoxError`]:
///
/// ```
/// use uadetect_error::{BoxError, ErrorExt, OpaqueError, error_chain};
///
/// let error: BoxError = OpaqueError::from_display("timeout").context("store get").into();
/// let messages: Vec<_> = error_chain(&*error).map(|e| e.to_string()).collect();
/// assert_eq!(messages, ["store get: timeout", "timeout"]);
/// ```
///
/// [`BoxError`]: crate::BoxError
pub fn error_chain<'a>(
    error: &'a (dyn Error + 'static),
) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(error), |&error| error.source())
}

/// The innermost source of `error`, or `error` itself when it has none.
#[must_use]
pub fn root_cause<'a>(error: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut cause = error;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause
}
