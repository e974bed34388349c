use diminish::{
    oracle::{self, Anomaly, CachedOracle},
    shrinkers as s, Error, ErrorKind, Oracle, Shrinker,
};
use std::{cell::Cell, collections::HashSet, rc::Rc, time::Duration};

#[test]
fn uninteresting_initial_value_is_rejected() {
    let _ = env_logger::try_init();

    let invocations = Rc::new(Cell::new(0u64));
    let counter = invocations.clone();
    let err = Shrinker::new(s::integer(), 5, move |x: &i32| {
        counter.set(counter.get() + 1);
        *x > 10
    })
    .unwrap_err();
    assert!(err.is_initial_not_interesting());
    assert!(matches!(err.kind(), ErrorKind::InitialNotInteresting));

    // Only the validation call; no shrinking was attempted.
    assert_eq!(invocations.get(), 1);
}

#[test]
fn failing_predicate_on_initial_value_is_an_error() {
    let _ = env_logger::try_init();

    let err = Shrinker::new(s::integer(), 5u32, |_: &u32| -> bool { panic!("nope") })
        .unwrap_err();
    assert!(err.is_predicate());

    let predicate = oracle::fallible(|_: &u32| Err::<bool, _>("harness is broken"));
    let err = Shrinker::new(s::integer(), 5u32, predicate).unwrap_err();
    match err.kind() {
        ErrorKind::Predicate(msg) => assert_eq!(msg.as_str(), "harness is broken"),
        other => panic!("unexpected error kind: {other:?}"),
    }
}

#[test]
fn cache_hits_are_not_counted() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let invocations = Rc::new(Cell::new(0));
    let counter = invocations.clone();
    let mut oracle = CachedOracle::new(move |x: &u32| {
        counter.set(counter.get() + 1);
        *x > 10
    });

    assert!(oracle.check(&11)?);
    assert!(oracle.check(&11)?);
    assert!(!oracle.check(&3)?);
    assert!(!oracle.check(&3)?);
    assert_eq!(oracle.calls(), 2);
    assert_eq!(invocations.get(), 2);
    Ok(())
}

#[test]
fn calls_made_counts_real_predicate_calls() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let invocations = Rc::new(Cell::new(0u64));
    let counter = invocations.clone();
    let mut shrinker = Shrinker::new(s::integer(), 5000u32, move |x: &u32| {
        counter.set(counter.get() + 1);
        *x > 1234
    })?;
    assert_eq!(shrinker.run(), 1235);

    // The initial validation is not counted.
    assert_eq!(shrinker.calls_made() + 1, invocations.get());
    Ok(())
}

#[test]
fn unchecked_sessions_make_no_validation_call() {
    let _ = env_logger::try_init();

    let invocations = Rc::new(Cell::new(0u64));
    let counter = invocations.clone();
    let mut shrinker = Shrinker::new_unchecked(s::integer(), 27i32, move |x: &i32| {
        counter.set(counter.get() + 1);
        *x > 10
    });
    assert_eq!(shrinker.run(), 11);
    assert_eq!(shrinker.calls_made(), invocations.get());
}

#[test]
fn running_again_is_a_no_op() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(
        s::collection(s::integer()),
        vec![13u8, 0, 200, 7],
        |v: &Vec<u8>| v.iter().map(|x| u32::from(*x)).sum::<u32>() >= 100,
    )?;

    let first = shrinker.run();
    let calls = shrinker.calls_made();
    assert!(shrinker.converged());

    let second = shrinker.run();
    assert_eq!(first, second);
    assert_eq!(shrinker.calls_made(), calls);
    assert!(shrinker.converged());
    Ok(())
}

#[test]
fn max_calls_stops_early() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 1u64 << 40, |x: &u64| *x >= 1_000_000)?
        .max_calls(5);

    let value = shrinker.run();
    assert!(!shrinker.converged());
    assert_eq!(shrinker.calls_made(), 5);
    assert!(value >= 1_000_000);
    assert!(value < 1 << 40);
    Ok(())
}

#[test]
fn zero_timeout_returns_initial_value() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker =
        Shrinker::new(s::integer(), 1000u32, |x: &u32| *x > 10)?.timeout(Duration::ZERO);

    assert_eq!(shrinker.run(), 1000);
    assert!(!shrinker.converged());
    assert_eq!(shrinker.calls_made(), 0);
    Ok(())
}

#[test]
fn panics_are_unrelated_failures() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 100u32, |x: &u32| {
        if *x == 50 {
            panic!("boom");
        }
        *x > 20
    })?;

    assert_eq!(shrinker.run(), 21);

    let anomalies = shrinker.anomalies();
    assert_eq!(anomalies.len(), 1);
    assert!(
        matches!(
            &anomalies[0],
            Anomaly::Unrelated { value: 50, message } if message.as_str().contains("boom")
        ),
        "unexpected anomaly: {}",
        anomalies[0]
    );
    Ok(())
}

#[test]
fn errors_are_unrelated_failures() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let predicate = oracle::fallible(|x: &u32| {
        if *x == 6 {
            Err("the test harness fell over")
        } else {
            Ok(*x > 5)
        }
    });
    let mut shrinker = Shrinker::new(s::integer(), 7000u32, predicate)?;

    assert_eq!(shrinker.run(), 7);
    let anomalies = shrinker.anomalies();
    assert_eq!(anomalies.len(), 1);
    assert!(matches!(anomalies[0], Anomaly::Unrelated { value: 6, .. }));
    Ok(())
}

/// A predicate that is interesting for `x > 10`, except that `11` is only
/// interesting the first time it is seen.
fn flaky() -> impl FnMut(&i32) -> bool {
    let mut seen = HashSet::new();
    move |x: &i32| *x > 10 && (*x != 11 || seen.insert(*x))
}

#[test]
fn flaky_result_is_kept_without_verification() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 27, flaky())?;
    assert_eq!(shrinker.run(), 11);
    assert!(shrinker.anomalies().is_empty());
    Ok(())
}

#[test]
fn verify_final_falls_back_to_earlier_value() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 27, flaky())?.verify_final(true);
    assert_eq!(shrinker.run(), 13);
    assert!(!shrinker.converged());
    assert_eq!(shrinker.anomalies(), &[Anomaly::Flaky { value: 11 }]);
    Ok(())
}

#[test]
fn verify_final_accepts_stable_results() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 27, |x: &i32| *x > 10)?.verify_final(true);
    assert_eq!(shrinker.run(), 11);
    assert!(shrinker.converged());
    assert!(shrinker.anomalies().is_empty());
    Ok(())
}

/// An oracle that answers `x > 10` for at most `left` calls.
struct Limited {
    left: u32,
}

impl Oracle<u32> for Limited {
    fn check(&mut self, candidate: &u32) -> diminish::Result<bool> {
        if self.left == 0 {
            return Err(Error::exhausted());
        }
        self.left -= 1;
        Ok(*candidate > 10)
    }
}

#[test]
fn custom_oracles_report_exhaustion_from_check() {
    let _ = env_logger::try_init();

    let minimized = s::minimize(&mut s::integer(), &mut Limited { left: 2 }, 1000u32, |_| {});
    assert!(!minimized.converged);
    assert!(minimized.value > 10);
    assert!(minimized.error.is_some_and(|e| e.is_exhausted()));

    let minimized = s::minimize(&mut s::integer(), &mut Limited { left: 1000 }, 1000u32, |_| {});
    assert_eq!(minimized.value, 11);
    assert!(minimized.converged);
    assert!(minimized.error.is_none());
}
