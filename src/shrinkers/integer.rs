use super::*;

/// A primitive integer type that the [`Integer`] shrinker can shrink.
///
/// Shrinking works on an integer's sign and magnitude, with the magnitude
/// widened to `u128`, so that every move is expressible, and none overflows,
/// for every primitive integer type.
pub trait Int: Value + Copy {
    /// Is this integer less than zero?
    fn is_negative(self) -> bool;

    /// The absolute value of this integer.
    fn magnitude(self) -> u128;

    /// Construct an integer from a sign and magnitude, returning `None` when it
    /// is not representable in this type.
    fn from_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self>;
}

macro_rules! ints {
    (
        unsigned: $( $u:ty ),* ;
        signed: $( $s:ty => $su:ty ),* ;
    ) => {
        $(
            impl Int for $u {
                #[inline]
                fn is_negative(self) -> bool {
                    false
                }

                #[inline]
                fn magnitude(self) -> u128 {
                    self as u128
                }

                #[inline]
                fn from_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self> {
                    if negative && magnitude != 0 {
                        return None;
                    }
                    <$u>::try_from(magnitude).ok()
                }
            }

            impl DefaultShrink for $u {
                type DefaultShrink = Integer;
            }
        )*

        $(
            impl Int for $s {
                #[inline]
                fn is_negative(self) -> bool {
                    self < 0
                }

                #[inline]
                fn magnitude(self) -> u128 {
                    self.unsigned_abs() as u128
                }

                #[inline]
                fn from_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self> {
                    let magnitude = <$su>::try_from(magnitude).ok()?;
                    if !negative || magnitude == 0 {
                        return <$s>::try_from(magnitude).ok();
                    }
                    // `-magnitude` is `!(magnitude - 1)` in two's complement,
                    // which also covers `<$s>::MIN`.
                    let below = magnitude - 1;
                    if below > <$s>::MAX as $su {
                        return None;
                    }
                    Some(!(below as $s))
                }
            }

            impl DefaultShrink for $s {
                type DefaultShrink = Integer;
            }
        )*
    };
}

ints! {
    unsigned: u8, u16, u32, u64, u128, usize;
    signed: i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize;
}

/// The passes of the [`Integer`] shrinker, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegerPass {
    /// Try zero.
    Zero,
    /// Try half the value, then the value moved toward zero by successively
    /// smaller powers of two.
    BinaryDescent,
    /// Try the value one step closer to zero.
    Decrement,
    /// Try the negation of a negative value.
    Negate,
    /// Try the value with its lowest set bit cleared.
    ClearLowestBit,
}

impl IntegerPass {
    const ALL: [IntegerPass; 5] = [
        IntegerPass::Zero,
        IntegerPass::BinaryDescent,
        IntegerPass::Decrement,
        IntegerPass::Negate,
        IntegerPass::ClearLowestBit,
    ];
}

/// The default shrinker for primitive integers.
///
/// See the [`integer()`] function to create new instances and for example
/// usage.
#[derive(Clone, Debug, Default)]
pub struct Integer {
    resume: Option<Descent>,
}

/// Where an interrupted binary descent picks up again: the value it accepted
/// and the next step to try from it.
#[derive(Clone, Copy, Debug)]
struct Descent {
    negative: bool,
    magnitude: u128,
    step: u128,
}

/// Create a new shrinker for primitive integers.
///
/// Integers shrink toward zero, and a negative value shrinks to its positive
/// counterpart when that is still interesting. For a threshold-like predicate,
/// shrinking from `n` takes `O(log n)` predicate calls.
///
/// # Example
///
/// ```
/// use diminish::{shrinkers as s, Shrinker};
///
/// let mut shrinker = Shrinker::new(s::integer(), -1_000_000i64, |x: &i64| x.abs() > 1234)?;
///
/// assert_eq!(shrinker.run(), 1235);
/// # Ok::<(), diminish::Error>(())
/// ```
pub fn integer() -> Integer {
    Integer { resume: None }
}

impl<T> Shrink<T> for Integer
where
    T: Int,
{
    type Pass = IntegerPass;

    fn passes(&self) -> &[IntegerPass] {
        &IntegerPass::ALL
    }

    fn run_pass(&mut self, pass: IntegerPass, c: &mut Candidates<'_, T>) -> Result<()> {
        let value = *c.current();
        let negative = value.is_negative();
        let magnitude = value.magnitude();

        let mut propose = |negative: bool, magnitude: u128| -> Result<()> {
            match T::from_sign_magnitude(negative, magnitude) {
                Some(candidate) => c.candidate(candidate),
                None => Ok(()),
            }
        };

        match pass {
            IntegerPass::Zero => propose(false, 0),

            IntegerPass::BinaryDescent => {
                let mut step = match self.resume.take() {
                    Some(d) if d.negative == negative && d.magnitude == magnitude => d.step,
                    _ => {
                        let half = magnitude / 2;
                        propose(negative, half)?;
                        if half == 0 {
                            return Ok(());
                        }
                        1u128 << (127 - half.leading_zeros())
                    }
                };

                // After an accept, the restarted pass resumes one step lower.
                while step >= 2 {
                    let target = magnitude - step;
                    let result = propose(negative, target);
                    if matches!(&result, Err(e) if e.is_early_exit()) {
                        self.resume = Some(Descent {
                            negative,
                            magnitude: target,
                            step: step >> 1,
                        });
                    }
                    result?;
                    step >>= 1;
                }
                Ok(())
            }

            IntegerPass::Decrement if magnitude > 0 => propose(negative, magnitude - 1),

            IntegerPass::Negate if negative => propose(false, magnitude),

            IntegerPass::ClearLowestBit if magnitude > 0 => {
                propose(negative, magnitude & (magnitude - 1))
            }

            IntegerPass::Decrement | IntegerPass::Negate | IntegerPass::ClearLowestBit => Ok(()),
        }
    }
}
