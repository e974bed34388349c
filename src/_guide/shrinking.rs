/*!

# How Shrinking Works

A shrink session starts from a value that is already known to be
*interesting*, meaning that it satisfies the session's
[`Predicate`][crate::oracle::Predicate]. Every step replaces the current value
with a candidate that is both interesting and strictly simpler, so the
session's current value only ever gets simpler, and it always satisfies the
predicate.

## Passes, Sweeps, and Fixpoints

A shrinker ([`Shrink`][crate::Shrink]) is an ordered list of *passes*. Each pass
proposes candidate replacements for the current value, most aggressive first.
For example, the [integer shrinker][crate::shrinkers::integer()] first tries
zero, then halving, then moving toward zero by smaller and smaller steps.

The engine drives passes with greedy first-improvement:

1. Run the pass, checking its candidates in order.

2. As soon as one candidate is interesting, accept it and restart the *same*
   pass from the new value.

3. Once the pass has no interesting candidates left, move on to the next pass.

A *sweep* runs every pass like this. Sweeps repeat until one of them makes no
progress at all; the value is then a fixpoint, and
[`Shrinker::converged`][crate::Shrinker::converged] returns `true`.

## Predicate Calls

Predicates are usually expensive: they rerun a whole failing test. Every
candidate therefore goes through a [`CachedOracle`][crate::oracle::CachedOracle]
first, which guarantees that the predicate is never called twice with equal
values. Candidates that are not strictly simpler than the current value are
discarded before they reach the oracle at all.

Only real predicate calls are counted by
[`Shrinker::calls_made`][crate::Shrinker::calls_made], and only they are
charged against [`Shrinker::max_calls`][crate::Shrinker::max_calls]. When the
budget runs out, shrinking stops and returns the best value found so far
without converging.

## Example

```rust
# fn foo() -> diminish::Result<()> {
use diminish::{shrinkers as s, Shrinker};
use std::{cell::RefCell, rc::Rc};

let seen = Rc::new(RefCell::new(vec![]));
let log = seen.clone();

let mut shrinker = Shrinker::new(s::integer(), 1000u32, |x: &u32| *x >= 37)?
    .on_improvement(move |x| log.borrow_mut().push(*x));

assert_eq!(shrinker.run(), 37);

// Each accepted value was strictly smaller than the last.
let seen = seen.borrow();
assert!(seen.windows(2).all(|w| w[1] < w[0]));
assert_eq!(seen.last(), Some(&37));
# Ok(())
# }
# foo().unwrap();
```

## Flaky and Failing Predicates

Predicates are expected to be deterministic, but the engine does not trust
them blindly:

* If a predicate returns an error (see
  [`oracle::fallible`][crate::oracle::fallible]) or panics, the candidate is
  treated as uninteresting and the failure is recorded as an
  [`Anomaly`][crate::oracle::Anomaly].

* With [`Shrinker::verify_final`][crate::Shrinker::verify_final] enabled, the
  final value is checked once more, bypassing the cache. If it stopped being
  interesting, the session falls back to the most recent earlier value that
  still is.

 */
