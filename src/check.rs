//! A small framework for property-based testing that shrinks its failures with
//! `diminish`.
//!
//! The primary entry point for this framework is the [`Check`] type.
//!
//! This framework is designed to be used for smoke tests inside `#[test]`
//! functions. It generates inputs from a seeded [`Rng`], checks a property
//! against each of them, and, on the first failure, shrinks the failing input
//! down to a minimal one that fails in the same way.
//!
//! # Example
//!
//! ```
//! mod tests {
//!     use diminish::{check::Check, shrinkers as s};
//!
//!     fn test_sorting_is_idempotent() {
//!         let result = Check::new().iters(500).run(
//!             s::collection(s::integer()),
//!             |rng| rng.vec(20, |rng| rng.any::<i32>()),
//!             |v: &Vec<i32>| {
//!                 let mut once = v.clone();
//!                 once.sort();
//!                 let mut twice = once.clone();
//!                 twice.sort();
//!                 if once == twice {
//!                     Ok(())
//!                 } else {
//!                     Err("sorting is not idempotent!")
//!                 }
//!             },
//!         );
//!         assert!(result.is_ok());
//!     }
//! }
//! ```

use crate::log;
use crate::{oracle, shrinkers, DefaultShrink, Error, Rng, Shrink, Shrinker, Value};
use std::panic::{self, AssertUnwindSafe};

const DEFAULT_SEED: u64 = 0xd1e1_5eed;

/// The result of running a check.
///
/// If the check passes, this is `Ok(())`.
///
/// If the check fails, this is `Err(CheckError::Failed(_))` with the shrunken
/// failing input and its failure message.
///
/// If there is some other kind of error while running the check, for example if
/// a failing input stops failing when it is run again, then this is
/// `Err(CheckError::Error(_))`.
pub type CheckResult<T> = std::result::Result<(), CheckError<T>>;

/// An error when running a `Check`.
#[derive(Debug)]
pub enum CheckError<T> {
    /// The check failed.
    ///
    /// This indicates that the property being checked is not upheld for the
    /// given input.
    Failed(CheckFailure<T>),

    /// An error occurred while running the check.
    Error(Error),
}

impl<T> From<Error> for CheckError<T> {
    fn from(v: Error) -> Self {
        Self::Error(v)
    }
}

impl<T> From<CheckFailure<T>> for CheckError<T> {
    fn from(v: CheckFailure<T>) -> Self {
        Self::Failed(v)
    }
}

impl<T> CheckError<T> {
    /// Unwrap the underlying `CheckError::Failed(_)` payload, panicking if this
    /// is not a `CheckError::Failed`.
    #[track_caller]
    pub fn unwrap_failed(self) -> CheckFailure<T> {
        match self {
            CheckError::Failed(f) => f,
            _ => panic!("CheckError::unwrap_failed called on non-failed CheckError"),
        }
    }

    /// Unwrap the underlying `CheckError::Error(_)` payload, panicking if this
    /// is not a `CheckError::Error(_)`.
    #[track_caller]
    pub fn unwrap_error(self) -> Error {
        match self {
            CheckError::Error(e) => e,
            _ => panic!("CheckError::unwrap_error called on non-error CheckError"),
        }
    }
}

/// A property failure, after shrinking.
///
/// # Example
///
/// ```
/// use diminish::{check::Check, shrinkers as s};
///
/// let failure = Check::new()
///     .run(
///         s::integer(),
///         |rng| rng.gen_range(0..10_000u32),
///         |x| if *x < 5000 { Ok(()) } else { Err("too big!") },
///     )
///     .unwrap_err()
///     .unwrap_failed();
///
/// assert_eq!(failure.value, 5000);
/// assert_eq!(failure.message, "too big!");
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct CheckFailure<T> {
    /// The shrunken input that triggers the failure.
    pub value: T,

    /// The generated input that first triggered the failure.
    pub original: T,

    /// The failure message.
    pub message: String,

    /// The number of property runs spent shrinking.
    pub shrink_calls: u64,

    /// Whether shrinking reached a fixpoint before running out of budget.
    pub converged: bool,
}

/// A check that can be run to test a property.
#[derive(Debug)]
pub struct Check {
    iters: usize,
    seed: u64,
    max_shrink_calls: u64,
}

impl Default for Check {
    fn default() -> Check {
        Check::new()
    }
}

impl Check {
    /// Create a new `Check`.
    pub fn new() -> Check {
        Check {
            iters: 1000,
            seed: DEFAULT_SEED,
            max_shrink_calls: 1000,
        }
    }

    /// Configure the number of inputs to generate and test.
    pub fn iters(&mut self, iters: usize) -> &mut Check {
        self.iters = iters;
        self
    }

    /// Configure the seed for input generation.
    pub fn seed(&mut self, seed: u64) -> &mut Check {
        self.seed = seed;
        self
    }

    /// Configure the number of property runs to spend shrinking a failing
    /// input before reporting the failure.
    pub fn max_shrink_calls(&mut self, max_shrink_calls: u64) -> &mut Check {
        self.max_shrink_calls = max_shrink_calls;
        self
    }

    /// Run this configured `Check`, using `T`'s default shrinker to shrink
    /// failing inputs.
    pub fn run_with_defaults<T, M>(
        &self,
        generate: impl FnMut(&mut Rng) -> T,
        property: impl FnMut(&T) -> std::result::Result<(), M>,
    ) -> CheckResult<T>
    where
        T: Value + DefaultShrink,
        M: ToString,
    {
        self.run(shrinkers::default::<T>(), generate, property)
    }

    /// Run this configured `Check`, generating inputs with `generate` and
    /// checking that `property` returns `Ok(_)` for all of them. A failing
    /// input is shrunk with `shrink`.
    pub fn run<S, T, M>(
        &self,
        shrink: S,
        mut generate: impl FnMut(&mut Rng) -> T,
        mut property: impl FnMut(&T) -> std::result::Result<(), M>,
    ) -> CheckResult<T>
    where
        S: Shrink<T>,
        T: Value,
        M: ToString,
    {
        let mut rng = Rng::new(self.seed);

        for _ in 0..self.iters {
            let value = generate(&mut rng);
            if let Some(message) = failure(&mut property, &value) {
                log::info!("failed on input {value:?}: {message}");
                return self.shrink(shrink, value, property, message);
            }
        }
        Ok(())
    }

    fn shrink<S, T, M>(
        &self,
        shrink: S,
        original: T,
        mut property: impl FnMut(&T) -> std::result::Result<(), M>,
        message: String,
    ) -> CheckResult<T>
    where
        S: Shrink<T>,
        T: Value,
        M: ToString,
    {
        // Only failures with the original message are interesting; anything
        // else is a different bug and must not be shrunk toward.
        let predicate = oracle::fallible(|value: &T| -> std::result::Result<bool, String> {
            match failure(&mut property, value) {
                None => Ok(false),
                Some(m) if m == message => Ok(true),
                Some(m) => Err(m),
            }
        });

        let mut shrinker =
            Shrinker::new(shrink, original.clone(), predicate)?.max_calls(self.max_shrink_calls);
        let value = shrinker.run();

        for anomaly in shrinker.anomalies() {
            log::warn!("while shrinking: {anomaly}");
        }
        log::info!("shrunk failing input down to {value:?}");

        let shrink_calls = shrinker.calls_made();
        let converged = shrinker.converged();
        drop(shrinker);

        Err(CheckFailure {
            value,
            original,
            message,
            shrink_calls,
            converged,
        }
        .into())
    }
}

/// Run `property` on `value`, returning its failure message if it fails.
fn failure<T, M>(
    property: &mut impl FnMut(&T) -> std::result::Result<(), M>,
    value: &T,
) -> Option<String>
where
    M: ToString,
{
    match panic::catch_unwind(AssertUnwindSafe(|| property(value))) {
        Ok(Ok(())) => None,
        Ok(Err(message)) => Some(message.to_string()),
        Err(_) => Some("<panicked>".to_string()),
    }
}
