#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod _guide;
pub mod error;
mod log;
pub mod oracle;
pub mod order;
mod rng;
pub mod shrinkers;

use oracle::{Anomaly, CachedOracle, Predicate};
use order::Simplicity;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::time::{Duration, Instant};

pub use error::{Error, ErrorKind, ErrorMessage, Result};
pub use rng::Rng;

#[cfg(feature = "check")]
pub mod check;

/// The bounds every value being shrunk must satisfy.
///
/// Values are cloned to build candidates, hashed and compared to cache
/// predicate results, debug-printed in logs and anomalies, and ordered by
/// [`Simplicity`]. This trait is implemented automatically for every type
/// that meets those bounds.
pub trait Value: Clone + Eq + Hash + Debug + Simplicity {}

impl<T> Value for T where T: Clone + Eq + Hash + Debug + Simplicity {}

/// The source of truth about whether a candidate is interesting.
///
/// Shrink passes never see the underlying [`Predicate`]; they see an `Oracle`.
/// The session's oracle is a [`CachedOracle`], but shrinkers that delegate to
/// other shrinkers may adapt it, for example to test a single element of a
/// sequence by splicing it back into the whole sequence.
pub trait Oracle<T> {
    /// Is `candidate` interesting?
    ///
    /// Returns an [`Exhausted`][ErrorKind::Exhausted] error once the session's
    /// budget is spent and `candidate` was not already known.
    fn check(&mut self, candidate: &T) -> Result<bool>;
}

fn _static_assert_object_safety(_: &dyn Oracle<u8>) {}

impl<O, T> Oracle<T> for &mut O
where
    O: Oracle<T> + ?Sized,
{
    #[inline]
    fn check(&mut self, candidate: &T) -> Result<bool> {
        (**self).check(candidate)
    }
}

/// The set of candidates a shrink pass proposes for the current value.
///
/// This type is passed to [`Shrink::run_pass`]. Passes register each of their
/// candidate replacements, in priority order, with the
/// [`candidate`][Candidates::candidate] method.
pub struct Candidates<'a, T> {
    current: &'a T,
    oracle: &'a mut dyn Oracle<T>,
    accepted: Option<T>,
}

impl<'a, T> Candidates<'a, T>
where
    T: Value,
{
    fn new(current: &'a T, oracle: &'a mut dyn Oracle<T>) -> Self {
        Candidates {
            current,
            oracle,
            accepted: None,
        }
    }

    /// The value that the pass is trying to shrink.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &'a T {
        self.current
    }

    /// Propose `candidate` as a replacement for the current value.
    ///
    /// Candidates that are not strictly simpler than the current value are
    /// skipped without consulting the oracle. If the oracle reports that
    /// `candidate` is interesting, it is accepted and this method returns an
    /// internal early-exit error. That error must be propagated with `?` so
    /// that the pass restarts from the newly accepted value.
    #[inline]
    pub fn candidate(&mut self, candidate: T) -> Result<()> {
        assert!(
            self.accepted.is_none(),
            "a candidate was already accepted; did you forget to `?`-propagate \
             the result of a `Candidates::candidate` call?",
        );

        if !candidate.is_simpler_than(self.current) {
            log::trace!("skipping {candidate:?}: not simpler than {:?}", self.current);
            return Ok(());
        }

        if self.oracle.check(&candidate)? {
            log::trace!("accepted {candidate:?}");
            self.accepted = Some(candidate);
            return Err(Error::early_exit());
        }

        Ok(())
    }

    /// The oracle that candidates are checked against.
    ///
    /// Passes that delegate to another shrinker adapt this oracle and hand it
    /// to [`shrinkers::minimize`].
    #[inline]
    pub fn oracle(&mut self) -> &mut dyn Oracle<T> {
        &mut *self.oracle
    }

    fn into_accepted(self) -> Option<T> {
        self.accepted
    }
}

/// A shrinker for `T` values: an ordered list of shrink passes.
///
/// Each pass proposes candidate replacements for the current value through a
/// [`Candidates`] set. The engine drives the passes with greedy
/// first-improvement: the first interesting candidate is accepted and the
/// same pass restarts from it. Once a full sweep over every pass makes no
/// progress, the value is minimal with respect to this shrinker.
///
/// Any `Shrink<T>` can be injected as the element shrinker of a
/// [`Collection`][shrinkers::Collection], which is how new element domains are
/// supported.
///
/// # Example
///
/// ```
/// use diminish::{Candidates, Result, Shrink, Shrinker};
///
/// /// Shrinks `u32`s by only trying powers of two below the current value.
/// struct PowersOfTwo;
///
/// impl Shrink<u32> for PowersOfTwo {
///     type Pass = ();
///
///     fn passes(&self) -> &[()] {
///         &[()]
///     }
///
///     fn run_pass(&mut self, _pass: (), c: &mut Candidates<'_, u32>) -> Result<()> {
///         let current = *c.current();
///         for shift in 0..32 {
///             let candidate = 1u32 << shift;
///             if candidate >= current {
///                 break;
///             }
///             c.candidate(candidate)?;
///         }
///         Ok(())
///     }
/// }
///
/// let mut shrinker = Shrinker::new(PowersOfTwo, 1000, |x: &u32| *x > 100)?;
/// assert_eq!(shrinker.run(), 128);
/// # Ok::<(), diminish::Error>(())
/// ```
pub trait Shrink<T> {
    /// Identifies one of this shrinker's passes.
    type Pass: Copy + Debug;

    /// This shrinker's passes, in priority order.
    fn passes(&self) -> &[Self::Pass];

    /// Run `pass` against [`candidates.current()`][Candidates::current].
    ///
    /// Implementations must register their candidates deterministically and
    /// must `?`-propagate every error from
    /// [`Candidates::candidate`].
    fn run_pass(&mut self, pass: Self::Pass, candidates: &mut Candidates<'_, T>) -> Result<()>;
}

impl<S, T> Shrink<T> for &mut S
where
    S: Shrink<T>,
{
    type Pass = S::Pass;

    fn passes(&self) -> &[Self::Pass] {
        (**self).passes()
    }

    fn run_pass(&mut self, pass: Self::Pass, candidates: &mut Candidates<'_, T>) -> Result<()> {
        (**self).run_pass(pass, candidates)
    }
}

/// A trait for types that have a default shrinker.
pub trait DefaultShrink: Sized {
    /// The default shrinker for this type.
    type DefaultShrink: Shrink<Self> + Default;
}

/// A shrink session.
///
/// A session owns the value being shrunk, its [`CachedOracle`], and its
/// configuration. It is created with a value that is already known to be
/// interesting, [`run`][Shrinker::run] to a fixpoint, and then discarded.
///
/// # Example
///
/// ```
/// use diminish::{shrinkers as s, Shrinker};
///
/// let mut shrinker = Shrinker::new(s::integer(), 27, |x: &i32| *x > 10)?
///     // Give up after 1000 predicate calls.
///     .max_calls(1000);
///
/// assert_eq!(shrinker.run(), 11);
/// assert!(shrinker.converged());
/// println!("shrunk with {} predicate calls", shrinker.calls_made());
/// # Ok::<(), diminish::Error>(())
/// ```
pub struct Shrinker<T, S, P> {
    shrink: S,
    oracle: CachedOracle<T, P>,
    initial: T,
    current: T,
    history: Vec<T>,
    improvements: usize,
    converged: bool,
    verify_final: bool,
    timeout: Option<Duration>,
    on_improvement: Option<Box<dyn FnMut(&T)>>,
}

impl<T, S, P> Debug for Shrinker<T, S, P>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shrinker")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("oracle", &self.oracle)
            .field("improvements", &self.improvements)
            .field("converged", &self.converged)
            .finish_non_exhaustive()
    }
}

impl<T, S, P> Shrinker<T, S, P>
where
    T: Value,
    S: Shrink<T>,
    P: Predicate<T>,
{
    /// Create a new shrink session for `initial`, which must satisfy
    /// `predicate`.
    ///
    /// The predicate is evaluated once on `initial` to establish that it is
    /// interesting. That evaluation is not counted in
    /// [`calls_made`][Shrinker::calls_made].
    ///
    /// # Errors
    ///
    /// Returns an [`InitialNotInteresting`][ErrorKind::InitialNotInteresting]
    /// error if `initial` does not satisfy `predicate`, and a
    /// [`Predicate`][ErrorKind::Predicate] error if the predicate fails on it.
    pub fn new(shrink: S, initial: T, predicate: P) -> Result<Self> {
        let mut oracle = CachedOracle::new(predicate);
        if !oracle.establish(&initial)? {
            log::debug!("refusing to shrink uninteresting value {initial:?}");
            return Err(Error::initial_not_interesting());
        }
        Ok(Self::from_oracle(shrink, oracle, initial))
    }

    /// Create a new shrink session for `initial` without checking it against
    /// `predicate`.
    ///
    /// Use this when the caller has just observed `initial` to be interesting,
    /// for example because a test failed on it. If `initial` is in fact not
    /// interesting, shrinking still only ever returns `initial` or values the
    /// predicate accepted.
    pub fn new_unchecked(shrink: S, initial: T, predicate: P) -> Self {
        let mut oracle = CachedOracle::new(predicate);
        oracle.assume_interesting(&initial);
        Self::from_oracle(shrink, oracle, initial)
    }

    fn from_oracle(shrink: S, oracle: CachedOracle<T, P>, initial: T) -> Self {
        Shrinker {
            shrink,
            oracle,
            current: initial.clone(),
            initial,
            history: Vec::new(),
            improvements: 0,
            converged: false,
            verify_final: false,
            timeout: None,
            on_improvement: None,
        }
    }

    /// Stop shrinking after the predicate has been called `max_calls` times.
    ///
    /// Defaults to unlimited.
    pub fn max_calls(mut self, max_calls: u64) -> Self {
        self.oracle.set_max_calls(Some(max_calls));
        self
    }

    /// Stop shrinking once `timeout` has elapsed since
    /// [`run`][Shrinker::run] was called.
    ///
    /// The deadline is checked before each predicate call, so a single slow
    /// predicate call can overrun it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Call `f` with each newly accepted value.
    pub fn on_improvement(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_improvement = Some(Box::new(f));
        self
    }

    /// Whether to re-run the predicate on the final value, bypassing the
    /// cache, to guard against flaky predicates.
    ///
    /// If the final value is not interesting anymore, previously accepted
    /// values are re-verified, most recent first, and the first one that
    /// still is becomes the result. The initial value is the last resort.
    ///
    /// Defaults to `false`.
    pub fn verify_final(mut self, verify_final: bool) -> Self {
        self.verify_final = verify_final;
        self
    }

    /// Shrink the value to a fixpoint, or until the budget runs out, and
    /// return the simplest interesting value found.
    ///
    /// Running an already-converged session again makes no further progress
    /// and no further predicate calls.
    pub fn run(&mut self) -> T {
        log::info!("shrinking {:?}", self.current);
        if let Some(timeout) = self.timeout {
            self.oracle.set_deadline(Some(Instant::now() + timeout));
        }

        let record = self.verify_final;
        let history = &mut self.history;
        let on_improvement = &mut self.on_improvement;
        let minimized = shrinkers::minimize(
            &mut self.shrink,
            &mut self.oracle,
            self.current.clone(),
            |value| {
                if record {
                    history.push(value.clone());
                }
                if let Some(f) = on_improvement.as_mut() {
                    f(value);
                }
            },
        );

        self.improvements += minimized.improvements;
        self.converged = minimized.converged;
        self.current = minimized.value;

        if self.verify_final {
            self.verify();
        }

        log::info!(
            "shrunk to {:?} after {} predicate calls ({})",
            self.current,
            self.oracle.calls(),
            if self.converged {
                "converged"
            } else {
                "not converged"
            },
        );
        self.current.clone()
    }

    fn verify(&mut self) {
        if self.current == self.initial || self.oracle.reverify(&self.current) {
            return;
        }

        self.converged = false;
        while let Some(value) = self.history.pop() {
            if value == self.current {
                continue;
            }
            if self.oracle.reverify(&value) {
                log::warn!("falling back to previously accepted value {value:?}");
                self.current = value;
                return;
            }
        }

        log::warn!("falling back to the initial value {:?}", self.initial);
        self.current = self.initial.clone();
    }

    /// The number of times the predicate has been called for a candidate.
    #[inline]
    #[must_use]
    pub fn calls_made(&self) -> u64 {
        self.oracle.calls()
    }

    /// Whether the last [`run`][Shrinker::run] reached a fixpoint, rather
    /// than stopping early because its budget ran out.
    #[inline]
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// The number of candidates accepted so far.
    #[inline]
    #[must_use]
    pub fn improvements(&self) -> usize {
        self.improvements
    }

    /// The simplest interesting value found so far.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &T {
        &self.current
    }

    /// The anomalies the predicate exhibited during this session.
    #[inline]
    #[must_use]
    pub fn anomalies(&self) -> &[Anomaly<T>] {
        self.oracle.anomalies()
    }
}

impl<T, P> Shrinker<T, T::DefaultShrink, P>
where
    T: Value + DefaultShrink,
    P: Predicate<T>,
{
    /// Like [`Shrinker::new`] but uses `T`'s default shrinker.
    ///
    /// # Example
    ///
    /// ```
    /// use diminish::Shrinker;
    ///
    /// let mut shrinker = Shrinker::with_default(vec![9u16; 5], |v: &Vec<u16>| v.len() >= 3)?;
    /// assert_eq!(shrinker.run(), vec![0, 0, 0]);
    /// # Ok::<(), diminish::Error>(())
    /// ```
    pub fn with_default(initial: T, predicate: P) -> Result<Self> {
        Self::new(shrinkers::default::<T>(), initial, predicate)
    }
}
