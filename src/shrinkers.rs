//! The provided set of [`Shrink`] implementations, and the loop that drives
//! them.
//!
//! It is idiomatic to import this module with the alias `s`:
//!
//! ```rust
//! use diminish::shrinkers as s;
//! ```

use super::*;
use crate::log;

mod bytes;
mod collection;
mod integer;

pub use bytes::*;
pub use collection::*;
pub use integer::*;

/// A convenience function to get the default shrinker for a type.
///
/// This is equivalent to `<T as DefaultShrink>::DefaultShrink::default()` but a
/// little less wordy.
pub fn default<T>() -> <T as DefaultShrink>::DefaultShrink
where
    T: DefaultShrink,
{
    T::DefaultShrink::default()
}

/// The result of [`minimize`].
#[derive(Debug)]
#[non_exhaustive]
pub struct Minimized<T> {
    /// The simplest interesting value found.
    pub value: T,

    /// Whether a full sweep over every pass made no progress. This is `false`
    /// when the oracle's budget ran out first.
    pub converged: bool,

    /// The number of candidates accepted.
    pub improvements: usize,

    /// Why shrinking stopped before a fixpoint: either an
    /// [`Exhausted`][ErrorKind::Exhausted] budget or an error returned by one
    /// of the shrinker's passes. `None` when converged.
    pub error: Option<Error>,
}

/// Shrink `initial` with `shrink` against `oracle` until a fixpoint is
/// reached or the oracle's budget is exhausted.
///
/// `initial` must already be known to be interesting. `on_improvement` is
/// called with every accepted value.
///
/// This is the engine behind [`Shrinker::run`]. Call it directly when one
/// shrinker delegates to another, as [`Collection`] does for its elements.
///
/// # Example
///
/// ```
/// use diminish::{oracle::CachedOracle, shrinkers as s};
///
/// let mut oracle = CachedOracle::new(|x: &u64| *x >= 1000);
/// let minimized = s::minimize(&mut s::integer(), &mut oracle, 123456u64, |_| {});
///
/// assert_eq!(minimized.value, 1000);
/// assert!(minimized.converged);
/// ```
pub fn minimize<T, S>(
    shrink: &mut S,
    oracle: &mut dyn Oracle<T>,
    initial: T,
    mut on_improvement: impl FnMut(&T),
) -> Minimized<T>
where
    T: Value,
    S: Shrink<T>,
{
    let passes = shrink.passes().to_vec();
    let mut current = initial;
    let mut improvements = 0;

    for sweep in 0.. {
        log::debug!("sweep {sweep} starting from {current:?}");
        let mut clean = true;

        for &pass in &passes {
            loop {
                let (result, accepted) = {
                    let mut candidates = Candidates::new(&current, &mut *oracle);
                    let result = shrink.run_pass(pass, &mut candidates);
                    (result, candidates.into_accepted())
                };

                match (result, accepted) {
                    (Err(e), Some(value)) if e.is_early_exit() => {
                        log::debug!("{pass:?} shrank {current:?} to {value:?}");
                        current = value;
                        improvements += 1;
                        clean = false;
                        on_improvement(&current);
                    }

                    (Ok(()), None) => break,

                    (Err(e), None) if !e.is_early_exit() => {
                        if e.is_exhausted() {
                            log::debug!("budget exhausted during {pass:?}");
                        } else {
                            log::error!("shrink pass {pass:?} failed, stopping: {e}");
                        }
                        return Minimized {
                            value: current,
                            converged: false,
                            improvements,
                            error: Some(e),
                        };
                    }

                    // A pass either accepted a candidate without propagating
                    // the resulting early-exit error, or produced an early-exit
                    // error without accepting anything.
                    (_, _) => panic!(
                        "Shrink pass {pass:?} did not propagate the early-exit error \
                         for an accepted candidate. This means that errors are not \
                         always being propagated, for example a `?` is missing from \
                         a call to the `Candidates::candidate` method. Errors must be \
                         propagated in `Shrink::run_pass` implementations.",
                    ),
                }
            }
        }

        if clean {
            log::debug!("fixpoint reached after {} sweeps: {current:?}", sweep + 1);
            break;
        }
    }

    Minimized {
        value: current,
        converged: true,
        improvements,
        error: None,
    }
}
