//! The "simpler than" relation that shrinking descends along.
//!
//! Every value domain defines a total preorder through the [`Simplicity`]
//! trait. A shrinker only ever replaces its current value with a candidate
//! that is *strictly* simpler, which is what guarantees termination.
//!
//! * Integers compare by magnitude first, and on ties a non-negative value is
//!   simpler than a negative one: `0 < 1 < -1 < 2 < -2 < ...`.
//!
//! * Sequences compare in [shortlex order][shortlex]: shorter sequences are
//!   simpler, and sequences of equal length compare element-wise from left to
//!   right.

use std::cmp::Ordering;

/// A total preorder of values by how simple they are.
///
/// # Example
///
/// ```
/// use diminish::order::Simplicity;
///
/// assert!(3i32.is_simpler_than(&-3));
/// assert!((-3i32).is_simpler_than(&4));
/// assert!(vec![9u8, 9].is_simpler_than(&vec![0, 0, 0]));
/// assert!(vec![1u8, 9].is_simpler_than(&vec![2, 0]));
/// ```
pub trait Simplicity {
    /// Compare `self` with `other`, where `Ordering::Less` means that `self`
    /// is simpler.
    fn simplicity_cmp(&self, other: &Self) -> Ordering;

    /// Is `self` strictly simpler than `other`?
    #[inline]
    fn is_simpler_than(&self, other: &Self) -> bool {
        self.simplicity_cmp(other) == Ordering::Less
    }
}

macro_rules! unsigned {
    ( $( $ty:ty ),* ) => {
        $(
            impl Simplicity for $ty {
                #[inline]
                fn simplicity_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

macro_rules! signed {
    ( $( $ty:ty ),* ) => {
        $(
            impl Simplicity for $ty {
                #[inline]
                fn simplicity_cmp(&self, other: &Self) -> Ordering {
                    (self.unsigned_abs(), *self < 0).cmp(&(other.unsigned_abs(), *other < 0))
                }
            }
        )*
    };
}

unsigned!(u8, u16, u32, u64, u128, usize);
signed!(i8, i16, i32, i64, i128, isize);

/// Compare two sequences in shortlex order, using `T`'s [`Simplicity`] for
/// elements.
///
/// # Example
///
/// ```
/// use diminish::order::shortlex;
/// use std::cmp::Ordering;
///
/// assert_eq!(shortlex(&[5, 5], &[0, 0, 0]), Ordering::Less);
/// assert_eq!(shortlex(&[0, 1], &[0, -1]), Ordering::Less);
/// assert_eq!(shortlex::<i8>(&[], &[]), Ordering::Equal);
/// ```
pub fn shortlex<T>(a: &[T], b: &[T]) -> Ordering
where
    T: Simplicity,
{
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(x, y)| x.simplicity_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

impl<T> Simplicity for [T]
where
    T: Simplicity,
{
    #[inline]
    fn simplicity_cmp(&self, other: &Self) -> Ordering {
        shortlex(self, other)
    }
}

impl<T> Simplicity for Vec<T>
where
    T: Simplicity,
{
    #[inline]
    fn simplicity_cmp(&self, other: &Self) -> Ordering {
        shortlex(self, other)
    }
}
