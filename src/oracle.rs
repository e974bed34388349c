//! Interestingness predicates and the caching oracle that wraps them.
//!
//! A [`Predicate`] answers "is this value still interesting?", typically by
//! re-running an entire failing test. That makes it the expensive part of
//! shrinking, so shrinkers never call a predicate directly. Instead they go
//! through an [`Oracle`][crate::Oracle], usually a [`CachedOracle`], which
//! remembers every answer it has seen and enforces the session's call budget.
//!
//! Predicates are expected, but not trusted, to be deterministic. A predicate
//! may also fail in ways unrelated to the failure being shrunk, either by
//! returning an error (see [`fallible`]) or by panicking. Such failures never
//! count as "interesting"; they are recorded as an [`Anomaly`] instead.

use crate::log;
use crate::{Error, ErrorMessage, Oracle, Result};
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// An interestingness predicate.
///
/// Returns `Ok(true)` when the value still triggers the failure being shrunk,
/// `Ok(false)` when it does not, and `Err(_)` when the predicate failed for
/// some unrelated reason.
///
/// This trait is implemented for all `FnMut(&T) -> bool` closures. Use
/// [`fallible`] for closures that can report unrelated failures.
///
/// Predicates should be deterministic: calling one twice with equal values
/// should give the same answer both times. The shrinking engine tolerates
/// predicates that are not, but may then return a value that is not as small
/// as it could be.
pub trait Predicate<T>
where
    T: ?Sized,
{
    /// Test whether `value` is interesting.
    fn test(&mut self, value: &T) -> Result<bool>;
}

impl<T, F> Predicate<T> for F
where
    T: ?Sized,
    F: FnMut(&T) -> bool,
{
    #[inline]
    fn test(&mut self, value: &T) -> Result<bool> {
        Ok(self(value))
    }
}

/// A predicate built from a closure that may report unrelated failures.
///
/// See the [`fallible`] function for details.
#[derive(Clone, Debug)]
pub struct Fallible<F> {
    f: F,
}

/// Create a predicate from a closure returning `Result<bool, E>`.
///
/// An `Err(e)` means that the predicate failed for a reason unrelated to the
/// failure being shrunk. The value is then treated as uninteresting and the
/// error is recorded as an [`Anomaly::Unrelated`].
///
/// # Example
///
/// ```
/// use diminish::{oracle, shrinkers as s, Shrinker};
///
/// let predicate = oracle::fallible(|x: &u32| {
///     if *x == 7 {
///         Err("the test harness fell over")
///     } else {
///         Ok(*x > 5)
///     }
/// });
///
/// let mut shrinker = Shrinker::new(s::integer(), 100u32, predicate).unwrap();
/// assert_eq!(shrinker.run(), 6);
/// ```
pub fn fallible<F>(f: F) -> Fallible<F> {
    Fallible { f }
}

impl<T, F, E> Predicate<T> for Fallible<F>
where
    T: ?Sized,
    F: FnMut(&T) -> std::result::Result<bool, E>,
    E: Display,
{
    #[inline]
    fn test(&mut self, value: &T) -> Result<bool> {
        (self.f)(value).map_err(|e| Error::predicate(e.to_string()))
    }
}

/// Something unexpected that a predicate did during a shrink session.
///
/// Anomalies never stop a session. They are collected so that the caller can
/// surface them as warnings next to the shrunken value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Anomaly<T> {
    /// The predicate failed for a reason unrelated to the failure being shrunk,
    /// by returning an error or by panicking.
    Unrelated {
        /// The candidate value the predicate was given.
        value: T,
        /// The predicate's error or panic message.
        message: ErrorMessage,
    },

    /// The predicate accepted this value once but rejected it when it was
    /// re-verified.
    Flaky {
        /// The value whose result changed.
        value: T,
    },
}

impl<T> fmt::Display for Anomaly<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::Unrelated { value, message } => {
                write!(f, "unrelated predicate failure on {value:?}: {message}")
            }
            Anomaly::Flaky { value } => {
                write!(f, "flaky predicate result for {value:?}")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Budget {
    max_calls: Option<u64>,
    deadline: Option<Instant>,
}

impl Budget {
    fn is_spent(&self, calls: u64) -> bool {
        self.max_calls.is_some_and(|max| calls >= max)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// The interestingness oracle: a [`Predicate`] plus a result cache, a call
/// counter, and a call budget.
///
/// The cache guarantees that the predicate is never invoked twice with equal
/// candidates. Only cache misses are counted as calls and charged against the
/// budget.
///
/// Each shrink session owns exactly one `CachedOracle`; you normally get at it
/// through a [`Shrinker`][crate::Shrinker] rather than constructing one
/// yourself.
///
/// # Example
///
/// ```
/// use diminish::{oracle::CachedOracle, Oracle};
///
/// let mut oracle = CachedOracle::new(|x: &i32| *x % 2 == 0);
///
/// assert!(oracle.check(&4)?);
/// assert!(!oracle.check(&5)?);
/// assert!(oracle.check(&4)?);
///
/// // The second check of `4` was answered from the cache.
/// assert_eq!(oracle.calls(), 2);
/// # Ok::<(), diminish::Error>(())
/// ```
pub struct CachedOracle<T, P> {
    predicate: P,
    cache: HashMap<T, bool>,
    calls: u64,
    budget: Budget,
    exhausted: bool,
    anomalies: Vec<Anomaly<T>>,
}

impl<T, P> Debug for CachedOracle<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedOracle")
            .field("cached", &self.cache.len())
            .field("calls", &self.calls)
            .field("budget", &self.budget)
            .field("exhausted", &self.exhausted)
            .field("anomalies", &self.anomalies.len())
            .finish_non_exhaustive()
    }
}

impl<T, P> CachedOracle<T, P>
where
    T: Clone + Eq + Hash + Debug,
    P: Predicate<T>,
{
    /// Create a new oracle around the given predicate, with an empty cache and
    /// an unlimited budget.
    pub fn new(predicate: P) -> Self {
        CachedOracle {
            predicate,
            cache: HashMap::new(),
            calls: 0,
            budget: Budget::default(),
            exhausted: false,
            anomalies: Vec::new(),
        }
    }

    /// Limit the number of predicate calls this oracle will make.
    pub fn set_max_calls(&mut self, max_calls: Option<u64>) {
        self.budget.max_calls = max_calls;
    }

    /// Stop making predicate calls once `deadline` has passed.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.budget.deadline = deadline;
    }

    /// The number of times the underlying predicate has been invoked for a
    /// candidate.
    #[inline]
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// The anomalies observed so far.
    #[inline]
    #[must_use]
    pub fn anomalies(&self) -> &[Anomaly<T>] {
        &self.anomalies
    }

    /// Record the value a session starts from as interesting without asking
    /// the predicate.
    pub(crate) fn assume_interesting(&mut self, value: &T) {
        self.cache.insert(value.clone(), true);
    }

    /// Evaluate the value a session starts from.
    ///
    /// This is not counted as a call, and unrelated failures are returned as
    /// errors rather than recorded as anomalies.
    pub(crate) fn establish(&mut self, value: &T) -> Result<bool> {
        let interesting = self.evaluate(value)?;
        self.cache.insert(value.clone(), interesting);
        Ok(interesting)
    }

    /// Evaluate `value` again, ignoring the cache, and record a flaky anomaly
    /// if the result no longer matches the cached one.
    ///
    /// This deliberately breaks the "never called twice" guarantee for
    /// `value`, and counts as a call, but is not charged against the budget.
    pub(crate) fn reverify(&mut self, value: &T) -> bool {
        self.calls += 1;
        let interesting = self.evaluate_or_record(value);
        if self.cache.get(value) == Some(&true) && !interesting {
            log::warn!("predicate result for {value:?} changed from interesting to uninteresting");
            self.anomalies.push(Anomaly::Flaky {
                value: value.clone(),
            });
        }
        self.cache.insert(value.clone(), interesting);
        interesting
    }

    fn evaluate(&mut self, value: &T) -> Result<bool> {
        let predicate = &mut self.predicate;
        match panic::catch_unwind(AssertUnwindSafe(|| predicate.test(value))) {
            Ok(result) => result,
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
                    format!("panicked: {s}")
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    format!("panicked: {s}")
                } else {
                    "panicked".to_string()
                };
                Err(Error::predicate(message))
            }
        }
    }

    fn evaluate_or_record(&mut self, value: &T) -> bool {
        match self.evaluate(value) {
            Ok(interesting) => interesting,
            Err(e) => {
                log::warn!("treating {value:?} as uninteresting: {e}");
                let message = match crate::ErrorKind::from(e) {
                    crate::ErrorKind::Predicate(msg) => msg,
                    other => ErrorMessage::from(format!("{other:?}")),
                };
                self.anomalies.push(Anomaly::Unrelated {
                    value: value.clone(),
                    message,
                });
                false
            }
        }
    }
}

impl<T, P> Oracle<T> for CachedOracle<T, P>
where
    T: Clone + Eq + Hash + Debug,
    P: Predicate<T>,
{
    fn check(&mut self, candidate: &T) -> Result<bool> {
        if let Some(&interesting) = self.cache.get(candidate) {
            log::trace!("cache hit for {candidate:?}: {interesting}");
            return Ok(interesting);
        }

        if self.exhausted || self.budget.is_spent(self.calls) {
            if !self.exhausted {
                log::warn!("shrink budget exhausted after {} predicate calls", self.calls);
            }
            self.exhausted = true;
            return Err(Error::exhausted());
        }

        self.calls += 1;
        let interesting = self.evaluate_or_record(candidate);
        log::trace!("call #{}: {candidate:?} is interesting? {interesting}", self.calls);
        self.cache.insert(candidate.clone(), interesting);
        Ok(interesting)
    }
}
