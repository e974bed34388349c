use diminish::{order::Simplicity, shrinkers as s, Shrinker};
use std::{cell::RefCell, rc::Rc};

#[test]
fn shrinks_to_threshold() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 27, |x: &i32| *x > 10)?;
    assert_eq!(shrinker.run(), 11);
    assert!(shrinker.converged());
    Ok(())
}

#[test]
fn shrinks_to_zero_when_everything_is_interesting() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 12345u64, |_: &u64| true)?;
    assert_eq!(shrinker.run(), 0);
    assert_eq!(shrinker.calls_made(), 1);

    let mut shrinker = Shrinker::new(s::integer(), i8::MIN, |_: &i8| true)?;
    assert_eq!(shrinker.run(), 0);
    Ok(())
}

#[test]
fn negative_values_flip_sign() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), -50i32, |x: &i32| x.abs() >= 7)?;
    assert_eq!(shrinker.run(), 7);
    Ok(())
}

#[test]
fn negative_values_stay_negative_when_required() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), -100i64, |x: &i64| *x < -5)?;
    assert_eq!(shrinker.run(), -6);
    Ok(())
}

#[test]
fn extreme_values() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), i128::MIN, |x: &i128| *x < 0)?;
    assert_eq!(shrinker.run(), -1);

    let mut shrinker = Shrinker::new(s::integer(), u128::MAX, |x: &u128| *x > 1)?;
    assert_eq!(shrinker.run(), 2);

    let mut shrinker = Shrinker::new(s::integer(), isize::MAX, |x: &isize| *x % 2 == 1)?;
    assert_eq!(shrinker.run(), 1);
    Ok(())
}

#[test]
fn large_thresholds_need_few_calls() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::new(s::integer(), 1u64 << 40, |x: &u64| *x >= 1_000_000)?;
    assert_eq!(shrinker.run(), 1_000_000);
    assert!(shrinker.converged());
    assert!(
        shrinker.calls_made() < 4 * 41,
        "too many predicate calls: {}",
        shrinker.calls_made()
    );
    Ok(())
}

#[test]
fn calls_grow_linearly_with_bit_width() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    for bits in [16u32, 32, 64, 120] {
        let n = 1u128 << bits;
        let threshold = n / 2 + n / 3 + 7;
        let mut shrinker = Shrinker::new(s::integer(), n, move |x: &u128| *x >= threshold)?;
        assert_eq!(shrinker.run(), threshold);
        assert!(shrinker.converged());
        assert!(
            shrinker.calls_made() <= 4 * u64::from(bits) + 16,
            "{} predicate calls for a {bits}-bit value",
            shrinker.calls_made()
        );
    }
    Ok(())
}

#[test]
fn each_improvement_is_strictly_simpler() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let seen = Rc::new(RefCell::new(vec![]));
    let log = seen.clone();

    let mut shrinker = Shrinker::new(s::integer(), -987_654i64, |x: &i64| x.abs() > 321)?
        .on_improvement(move |x| log.borrow_mut().push(*x));
    let result = shrinker.run();

    let seen = seen.borrow();
    assert!(!seen.is_empty());
    assert_eq!(seen.len(), shrinker.improvements());
    assert_eq!(seen.last(), Some(&result));
    assert!(seen[0].is_simpler_than(&-987_654));
    for w in seen.windows(2) {
        assert!(w[1].is_simpler_than(&w[0]), "{} is not simpler than {}", w[1], w[0]);
    }
    Ok(())
}

#[test]
fn default_shrinker() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = Shrinker::with_default(200u8, |x: &u8| *x > 100)?;
    assert_eq!(shrinker.run(), 101);
    Ok(())
}
