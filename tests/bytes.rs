use diminish::shrinkers::BytesShrinker;
use std::{cell::RefCell, rc::Rc};

#[test]
fn shrinks_leading_byte() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = BytesShrinker::new(&[0x05, 0x05], |b: &[u8]| !b.is_empty() && b[0] >= 3)?;
    assert_eq!(shrinker.run(), vec![0x03]);
    assert!(shrinker.converged());
    assert_eq!(shrinker.current(), &[0x03u8][..]);
    Ok(())
}

#[test]
fn shrinks_to_a_single_byte() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = BytesShrinker::new(b"hello, world", |b: &[u8]| b.contains(&b'w'))?;
    assert_eq!(shrinker.run(), b"w".to_vec());
    Ok(())
}

#[test]
fn shrinks_to_empty() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let mut shrinker = BytesShrinker::new(&[0xff; 64], |_: &[u8]| true)?;
    assert_eq!(shrinker.run(), Vec::<u8>::new());
    assert_eq!(shrinker.calls_made(), 1);
    Ok(())
}

#[test]
fn bytes_shrink_independently() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    // Read as a big-endian number this is 2, but there is no move that turns
    // it into the shorter `[0x02]`.
    let mut shrinker = BytesShrinker::new(&[0x00, 0x02], |b: &[u8]| {
        b.len() == 2 && u16::from_be_bytes([b[0], b[1]]) >= 1
    })?;
    assert_eq!(shrinker.run(), vec![0x00, 0x01]);
    Ok(())
}

#[test]
fn uninteresting_initial_value() {
    let _ = env_logger::try_init();

    let err = BytesShrinker::new(b"abc", |b: &[u8]| b.len() > 3).unwrap_err();
    assert!(err.is_initial_not_interesting());
}

#[test]
fn improvements_and_budget() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let seen = Rc::new(RefCell::new(vec![]));
    let log = seen.clone();

    let mut shrinker = BytesShrinker::new(&[9, 9, 9, 9], |b: &[u8]| b.len() >= 2)?
        .max_calls(1)
        .on_improvement(move |b| log.borrow_mut().push(b.to_vec()));

    // Deleting everything is rejected, and then the budget is gone.
    assert_eq!(shrinker.run(), vec![9, 9, 9, 9]);
    assert!(!shrinker.converged());
    assert_eq!(shrinker.calls_made(), 1);
    assert!(seen.borrow().is_empty());
    assert!(shrinker.anomalies().is_empty());
    Ok(())
}
