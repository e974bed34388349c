//! A thin, seeded wrapper over `rand::rngs::SmallRng` for drawing test inputs.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::{rngs::SmallRng, Rng as _, SeedableRng};

const DEFAULT_SEED: u64 = 0x5eed_d1e1_5eed_d1e1;

/// A pseudorandom number generator for generating test inputs.
///
/// Not cryptographically secure. The same seed always produces the same
/// sequence of values, so a failing input can be regenerated from its seed.
///
/// # Example
///
/// ```
/// use diminish::Rng;
///
/// let mut a = Rng::new(42);
/// let mut b = Rng::new(42);
///
/// let xs: Vec<u8> = a.vec(10, |rng| rng.any());
/// let ys: Vec<u8> = b.vec(10, |rng| rng.any());
/// assert_eq!(xs, ys);
/// ```
#[derive(Clone, Debug)]
pub struct Rng {
    inner: SmallRng,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Rng {
    /// Create a new `Rng` from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate a uniformly random value of any type that `rand` knows how
    /// to generate.
    #[inline]
    pub fn any<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.inner.gen()
    }

    /// Generate a random value in the given range.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Return `true` with probability `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is not in `0.0..=1.0`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p)
    }

    /// Choose a random element from a slice.
    ///
    /// If the slice is empty, then `None` is returned.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.inner.gen_range(0..items.len());
        items.get(index)
    }

    /// Generate a vector of up to `max_len` elements, each generated by
    /// `element`.
    pub fn vec<T>(&mut self, max_len: usize, mut element: impl FnMut(&mut Rng) -> T) -> Vec<T> {
        let len = self.inner.gen_range(0..=max_len);
        (0..len).map(|_| element(self)).collect()
    }

    /// Generate up to `max_len` random bytes.
    pub fn bytes(&mut self, max_len: usize) -> Vec<u8> {
        let len = self.inner.gen_range(0..=max_len);
        let mut buf = vec![0; len];
        self.inner.fill(&mut buf[..]);
        buf
    }
}
