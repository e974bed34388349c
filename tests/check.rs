#![cfg(feature = "check")]

use diminish::{check::Check, shrinkers as s};

#[test]
fn passing_property() {
    let _ = env_logger::try_init();

    let result = Check::new().iters(100).run(
        s::integer(),
        |rng| rng.any::<u8>(),
        |_: &u8| Ok::<(), &str>(()),
    );
    assert!(result.is_ok());
}

#[test]
fn failing_property_is_shrunk() {
    let _ = env_logger::try_init();

    let failure = Check::new()
        .run(
            s::collection(s::integer()),
            |rng| rng.vec(10, |rng| rng.gen_range(0..100u32)),
            |v: &Vec<u32>| {
                if v.iter().any(|x| *x >= 50) {
                    Err("found a big one")
                } else {
                    Ok(())
                }
            },
        )
        .unwrap_err()
        .unwrap_failed();

    assert_eq!(failure.value, vec![50]);
    assert_eq!(failure.message, "found a big one");
    assert!(failure.original.iter().any(|x| *x >= 50));
    assert!(failure.converged);
    assert!(failure.shrink_calls > 0);
}

#[test]
fn other_failures_are_not_shrunk_toward() {
    let _ = env_logger::try_init();

    let failure = Check::new()
        .run(
            s::integer(),
            |rng| rng.gen_range(500..1000u32),
            |x: &u32| {
                if *x >= 100 {
                    Err("big")
                } else if *x >= 10 {
                    Err("medium")
                } else {
                    Ok(())
                }
            },
        )
        .unwrap_err()
        .unwrap_failed();

    assert_eq!(failure.value, 100);
    assert_eq!(failure.message, "big");
}

#[test]
fn panics_are_failures() {
    let _ = env_logger::try_init();

    let failure = Check::new()
        .run(
            s::integer(),
            |rng| rng.gen_range(0..1000u32),
            |x: &u32| {
                assert!(*x < 300);
                Ok::<(), String>(())
            },
        )
        .unwrap_err()
        .unwrap_failed();

    assert_eq!(failure.value, 300);
    assert_eq!(failure.message, "<panicked>");
}

#[test]
fn default_shrinkers() {
    let _ = env_logger::try_init();

    let failure = Check::new()
        .run_with_defaults(
            |rng| rng.bytes(32),
            |b: &Vec<u8>| {
                if b.contains(&0xff) {
                    Err("found 0xff")
                } else {
                    Ok(())
                }
            },
        )
        .unwrap_err()
        .unwrap_failed();

    assert_eq!(failure.value, vec![0xff]);
}

#[test]
fn same_seed_same_failure() {
    let _ = env_logger::try_init();

    let original = |seed| {
        Check::new()
            .seed(seed)
            .run(
                s::integer(),
                |rng| rng.any::<u64>(),
                |x: &u64| if *x % 3 == 0 { Err("multiple of three") } else { Ok(()) },
            )
            .unwrap_err()
            .unwrap_failed()
            .original
    };

    assert_eq!(original(42), original(42));
}

#[test]
fn shrink_budget() {
    let _ = env_logger::try_init();

    let failure = Check::new()
        .max_shrink_calls(3)
        .run(
            s::integer(),
            |rng| rng.gen_range(1_000_000..2_000_000u64),
            |x: &u64| if *x < 10 { Ok(()) } else { Err("too big") },
        )
        .unwrap_err()
        .unwrap_failed();

    assert!(!failure.converged);
    assert_eq!(failure.shrink_calls, 3);
    assert!(failure.value >= 10);
}

#[test]
fn failures_that_do_not_reproduce_are_errors() {
    let _ = env_logger::try_init();

    let mut first = true;
    let err = Check::new()
        .run(
            s::integer(),
            |rng| rng.any::<u32>(),
            |_: &u32| {
                if std::mem::take(&mut first) {
                    Err("only once")
                } else {
                    Ok(())
                }
            },
        )
        .unwrap_err()
        .unwrap_error();

    assert!(err.is_initial_not_interesting());
}
