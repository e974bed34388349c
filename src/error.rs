//! Error and result types for the `diminish` crate.

use std::borrow::Cow;
use std::fmt;

/// A result that is either `Ok(T)` or `Err(diminish::Error)`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

enum ErrorInner {
    Kind(Box<ErrorKind>),

    /// For internal usage only: break out of a shrink pass after one of its
    /// candidates was accepted, so that the pass restarts from the new value.
    /// This isn't an `ErrorKind` because we don't want to allocate for it.
    EarlyExit,
}

/// An error that can occur when using the `diminish` crate.
///
/// This type is a thin wrapper around [`ErrorKind`], which contains the
/// specific kind of error that occurred.
///
/// # Examples
///
/// ```
/// use diminish::{Error, ErrorKind};
///
/// let error: Error = {
///     // ...
/// #   Error::initial_not_interesting()
/// };
///
/// match error.kind() {
///     ErrorKind::InitialNotInteresting => println!("nothing to shrink!"),
///     ErrorKind::Predicate(msg) => println!("predicate failed: {msg}"),
///
///     // The `ErrorKind` type is not exhaustive, so we always need a catch-all arm.
///     unknown => println!("unknown! {unknown:?}"),
/// }
/// ```
pub struct Error {
    inner: ErrorInner,
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self {
            inner: ErrorInner::Kind(Box::new(kind)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ErrorInner::Kind(kind) => match &**kind {
                ErrorKind::Exhausted => {
                    write!(f, "the shrink budget is exhausted")
                }
                ErrorKind::InitialNotInteresting => {
                    write!(f, "the initial value does not satisfy the predicate")
                }
                ErrorKind::Predicate(msg) => {
                    write!(f, "the predicate failed: {msg}")
                }
                ErrorKind::Other(msg) => {
                    write!(f, "an unknown error occurred: {msg}")
                }
            },
            ErrorInner::EarlyExit => {
                write!(f, "internal error variant: early exit from shrink pass")
            }
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl Error {
    #[inline]
    pub(crate) fn early_exit() -> Self {
        Self {
            inner: ErrorInner::EarlyExit,
        }
    }

    #[inline]
    pub(crate) fn is_early_exit(&self) -> bool {
        matches!(self.inner, ErrorInner::EarlyExit)
    }

    /// Returns a new error indicating that the shrink budget is exhausted.
    #[must_use]
    pub fn exhausted() -> Self {
        ErrorKind::Exhausted.into()
    }

    /// Returns a new error indicating that the value a shrinker was
    /// constructed with does not satisfy its predicate.
    #[must_use]
    pub fn initial_not_interesting() -> Self {
        ErrorKind::InitialNotInteresting.into()
    }

    /// Returns a new error indicating that the predicate failed in a way that
    /// is unrelated to the failure being shrunk.
    #[must_use]
    pub fn predicate(msg: impl Into<ErrorMessage>) -> Self {
        ErrorKind::Predicate(msg.into()).into()
    }

    /// Returns a new error with the given message.
    #[must_use]
    pub fn other(msg: impl Into<ErrorMessage>) -> Self {
        ErrorKind::Other(msg.into()).into()
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        match &self.inner {
            ErrorInner::Kind(kind) => kind,
            ErrorInner::EarlyExit => unreachable!(),
        }
    }

    /// Returns `true` if the error's kind is
    /// [`Exhausted`][ErrorKind::Exhausted].
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(&self.inner, ErrorInner::Kind(k) if matches!(**k, ErrorKind::Exhausted))
    }

    /// Returns `true` if the error's kind is
    /// [`InitialNotInteresting`][ErrorKind::InitialNotInteresting].
    #[must_use]
    pub fn is_initial_not_interesting(&self) -> bool {
        matches!(self.kind(), ErrorKind::InitialNotInteresting)
    }

    /// Returns `true` if the error's kind is
    /// [`Predicate`][ErrorKind::Predicate].
    #[must_use]
    pub fn is_predicate(&self) -> bool {
        matches!(self.kind(), ErrorKind::Predicate(_))
    }

    /// Returns `true` if the error's kind is [`Other`][ErrorKind::Other].
    #[must_use]
    pub fn is_other(&self) -> bool {
        matches!(self.kind(), ErrorKind::Other(_))
    }
}

/// The kind of an error that can occur when using the `diminish` crate.
///
/// This enum is not exhaustive, and new variants may be added in the future.
/// When matching on this enum, a catch-all arm should be used to handle any
/// new variants that are added.
#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    /// The shrink session ran out of predicate calls or time.
    ///
    /// This is never returned from [`Shrinker::run`][crate::Shrinker::run]:
    /// running out of budget is a normal way for a session to stop.
    Exhausted,

    /// The shrinker was constructed with a value that does not satisfy its
    /// predicate, so there is nothing to shrink.
    InitialNotInteresting,

    /// The predicate reported a failure unrelated to the one being shrunk.
    Predicate(ErrorMessage),

    /// Some other error occurred.
    Other(ErrorMessage),
}

impl From<Error> for ErrorKind {
    #[inline]
    fn from(err: Error) -> Self {
        match err.inner {
            ErrorInner::Kind(kind) => *kind,
            ErrorInner::EarlyExit => unreachable!(),
        }
    }
}

/// A message that can be attached to an error.
///
/// This is a thin wrapper around a borrowed or owned string.
///
/// # Examples
///
/// ```
/// use diminish::ErrorMessage;
///
/// let msg = ErrorMessage::new("something went wrong");
/// assert_eq!(msg.as_str(), "something went wrong");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorMessage {
    inner: Cow<'static, str>,
}

impl ErrorMessage {
    /// Returns a new error message with the given string.
    #[must_use]
    pub fn new(msg: impl Into<ErrorMessage>) -> Self {
        msg.into()
    }

    /// Returns the message as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for ErrorMessage {
    #[inline]
    fn from(s: &'static str) -> Self {
        Self {
            inner: Cow::Borrowed(s),
        }
    }
}

impl From<Cow<'static, str>> for ErrorMessage {
    #[inline]
    fn from(s: Cow<'static, str>) -> Self {
        Self { inner: s }
    }
}

impl From<String> for ErrorMessage {
    #[inline]
    fn from(s: String) -> Self {
        Self { inner: s.into() }
    }
}
