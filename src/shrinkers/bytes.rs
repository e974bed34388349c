use super::*;

/// A shrink session for byte strings.
///
/// This is a thin adapter over a [`Shrinker`] that uses a
/// [`Collection`] of [`Integer`]s: each byte is an integer element in
/// `0..=255`, so byte strings shrink by deleting bytes and by shrinking the
/// remaining bytes toward zero independently. Predicates are written against
/// `&[u8]`.
///
/// Because bytes shrink independently, a byte string is not treated as one
/// big number. For example, `[0x00, 0x02]` can shrink to `[0x00, 0x01]` by
/// shrinking its last byte, or to `[0x02]` by deleting its first byte, but
/// there is no move that trades the two off against each other.
///
/// # Example
///
/// ```
/// use diminish::shrinkers::BytesShrinker;
///
/// let mut shrinker = BytesShrinker::new(b"hello", |b: &[u8]| b.contains(&b'l'))?;
///
/// assert_eq!(shrinker.run(), vec![b'l']);
/// # Ok::<(), diminish::Error>(())
/// ```
pub struct BytesShrinker<P> {
    inner: Shrinker<Vec<u8>, Collection<Integer>, AsSlice<P>>,
}

impl<P> fmt::Debug for BytesShrinker<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BytesShrinker")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Adapts a predicate on byte slices to the owned byte vectors that the
/// underlying collection shrinker works with.
struct AsSlice<P> {
    predicate: P,
}

impl<P> Predicate<Vec<u8>> for AsSlice<P>
where
    P: Predicate<[u8]>,
{
    #[inline]
    fn test(&mut self, value: &Vec<u8>) -> Result<bool> {
        self.predicate.test(value.as_slice())
    }
}

fn bytes_shrinker() -> Collection<Integer> {
    collection(integer())
}

impl<P> BytesShrinker<P>
where
    P: Predicate<[u8]>,
{
    /// Create a new shrink session for `initial`, which must satisfy
    /// `predicate`.
    ///
    /// See [`Shrinker::new`] for details.
    pub fn new(initial: &[u8], predicate: P) -> Result<Self> {
        let inner = Shrinker::new(bytes_shrinker(), initial.to_vec(), AsSlice { predicate })?;
        Ok(BytesShrinker { inner })
    }

    /// Create a new shrink session for `initial` without checking it against
    /// `predicate`.
    ///
    /// See [`Shrinker::new_unchecked`] for details.
    pub fn new_unchecked(initial: &[u8], predicate: P) -> Self {
        let inner = Shrinker::new_unchecked(bytes_shrinker(), initial.to_vec(), AsSlice { predicate });
        BytesShrinker { inner }
    }

    /// See [`Shrinker::max_calls`].
    pub fn max_calls(self, max_calls: u64) -> Self {
        BytesShrinker {
            inner: self.inner.max_calls(max_calls),
        }
    }

    /// See [`Shrinker::timeout`].
    pub fn timeout(self, timeout: Duration) -> Self {
        BytesShrinker {
            inner: self.inner.timeout(timeout),
        }
    }

    /// See [`Shrinker::verify_final`].
    pub fn verify_final(self, verify_final: bool) -> Self {
        BytesShrinker {
            inner: self.inner.verify_final(verify_final),
        }
    }

    /// See [`Shrinker::on_improvement`].
    pub fn on_improvement(self, mut f: impl FnMut(&[u8]) + 'static) -> Self {
        BytesShrinker {
            inner: self.inner.on_improvement(move |v: &Vec<u8>| f(v.as_slice())),
        }
    }

    /// Shrink the byte string and return the simplest interesting one found.
    ///
    /// See [`Shrinker::run`].
    pub fn run(&mut self) -> Vec<u8> {
        self.inner.run()
    }

    /// See [`Shrinker::calls_made`].
    #[must_use]
    pub fn calls_made(&self) -> u64 {
        self.inner.calls_made()
    }

    /// See [`Shrinker::converged`].
    #[must_use]
    pub fn converged(&self) -> bool {
        self.inner.converged()
    }

    /// See [`Shrinker::current`].
    #[must_use]
    pub fn current(&self) -> &[u8] {
        self.inner.current()
    }

    /// See [`Shrinker::anomalies`].
    #[must_use]
    pub fn anomalies(&self) -> &[Anomaly<Vec<u8>>] {
        self.inner.anomalies()
    }
}
