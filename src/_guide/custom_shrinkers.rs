/*!

# Writing Custom Shrinkers

Integers, `Vec`s, and byte strings have shrinkers in the
[`shrinkers`][crate::shrinkers] module. To shrink values of your own types,
implement two traits:

1. [`Simplicity`][crate::order::Simplicity], which defines what "simpler" means
   for your type. Candidates that are not strictly simpler than the current
   value are never tried.

2. [`Shrink`][crate::Shrink], which proposes candidates through
   [`Candidates::candidate`][crate::Candidates::candidate]. Always propagate
   its result with `?`: that is how an accepted candidate restarts your pass.

Any `Shrink<T>` can then be used as the element shrinker of a
[`collection`][crate::shrinkers::collection()], so `Vec<T>` shrinks with no extra
work.

## Example

```rust
# fn foo() -> diminish::Result<()> {
use diminish::{order::Simplicity, shrinkers as s, Candidates, Result, Shrink, Shrinker};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Color {
    Red,
    Green,
    Blue,
}

// Earlier variants are simpler.
impl Simplicity for Color {
    fn simplicity_cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

struct ColorShrink;

impl Shrink<Color> for ColorShrink {
    type Pass = ();

    fn passes(&self) -> &[()] {
        &[()]
    }

    fn run_pass(&mut self, _pass: (), c: &mut Candidates<'_, Color>) -> Result<()> {
        for color in [Color::Red, Color::Green] {
            c.candidate(color)?;
        }
        Ok(())
    }
}

let mut shrinker = Shrinker::new(
    s::collection(ColorShrink),
    vec![Color::Blue, Color::Green, Color::Blue, Color::Red],
    |v: &Vec<Color>| v.iter().filter(|c| **c != Color::Red).count() >= 2,
)?;

assert_eq!(shrinker.run(), vec![Color::Green, Color::Green]);
# Ok(())
# }
# foo().unwrap();
```

## Defaults

Implement [`DefaultShrink`][crate::DefaultShrink] to make your shrinker the one
[`Shrinker::with_default`][crate::Shrinker::with_default] and
[`shrinkers::default`][crate::shrinkers::default] pick. The shrinker must then
also implement `Default`.

 */
