use super::*;
use std::cmp;

/// The passes of the [`Collection`] shrinker, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionPass {
    /// Delete contiguous runs of elements, from the whole sequence down to
    /// runs of two, at offsets spaced one run apart.
    CoarseDeletion,
    /// Delete single elements.
    FineDeletion,
    /// Shrink each element in place with the element shrinker.
    Elements,
}

impl CollectionPass {
    const ALL: [CollectionPass; 3] = [
        CollectionPass::CoarseDeletion,
        CollectionPass::FineDeletion,
        CollectionPass::Elements,
    ];
}

/// A shrinker for `Vec<T>`s, generic over the shrinker for its elements.
///
/// See the [`collection()`] function to create new instances and for example
/// usage.
#[derive(Clone, Debug, Default)]
pub struct Collection<S> {
    element: S,
    min_len: usize,
    cursor: Option<Cursor>,
}

/// The element an interrupted element pass continues from, valid only while
/// the sequence keeps its length.
#[derive(Clone, Copy, Debug)]
struct Cursor {
    index: usize,
    len: usize,
}

/// Create a new shrinker for `Vec<T>`s that uses `element` to shrink each
/// element.
///
/// Sequences shrink in shortlex order: first by deleting elements, then by
/// shrinking the elements that remain. Because a shorter sequence is always
/// simpler, a successful deletion always takes priority over changing
/// elements.
///
/// # Example
///
/// ```
/// use diminish::{shrinkers as s, Shrinker};
///
/// let mut shrinker = Shrinker::new(
///     s::collection(s::integer()),
///     vec![5, 5, 5, 1, 5],
///     |v: &Vec<i32>| v.iter().any(|x| *x > 3),
/// )?;
///
/// assert_eq!(shrinker.run(), vec![4]);
/// # Ok::<(), diminish::Error>(())
/// ```
pub fn collection<S>(element: S) -> Collection<S> {
    Collection {
        element,
        min_len: 0,
        cursor: None,
    }
}

impl<S> Collection<S> {
    /// Never shrink below `min_len` elements.
    ///
    /// Deletions that would leave fewer elements are not attempted.
    ///
    /// # Example
    ///
    /// ```
    /// use diminish::{shrinkers as s, Shrinker};
    ///
    /// let mut shrinker = Shrinker::new(
    ///     s::collection(s::integer()).min_len(2),
    ///     vec![7u8; 10],
    ///     |_: &Vec<u8>| true,
    /// )?;
    ///
    /// assert_eq!(shrinker.run(), vec![0, 0]);
    /// # Ok::<(), diminish::Error>(())
    /// ```
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

impl<S, T> Shrink<Vec<T>> for Collection<S>
where
    S: Shrink<T>,
    T: Value,
{
    type Pass = CollectionPass;

    fn passes(&self) -> &[CollectionPass] {
        &CollectionPass::ALL
    }

    fn run_pass(&mut self, pass: CollectionPass, c: &mut Candidates<'_, Vec<T>>) -> Result<()> {
        let current = c.current();
        let len = current.len();

        match pass {
            CollectionPass::CoarseDeletion => {
                let mut size = len;
                while size >= 2 {
                    if len - size >= self.min_len {
                        let last = len - size;
                        let mut start = 0;
                        loop {
                            c.candidate(without(current, start, size))?;
                            if start == last {
                                break;
                            }
                            start = cmp::min(start + size, last);
                        }
                    }
                    size /= 2;
                }
                Ok(())
            }

            CollectionPass::FineDeletion => {
                if len > self.min_len {
                    for index in 0..len {
                        c.candidate(without(current, index, 1))?;
                    }
                }
                Ok(())
            }

            CollectionPass::Elements => {
                let start = match self.cursor.take() {
                    Some(cursor) if cursor.len == len && cursor.index < len => cursor.index,
                    _ => 0,
                };

                for index in start..len {
                    let original = &current[index];
                    let minimized = {
                        let mut splice = Splice {
                            whole: c.oracle(),
                            base: current,
                            index,
                        };
                        minimize(&mut self.element, &mut splice, original.clone(), |_| {})
                    };

                    if minimized.value != *original {
                        let mut spliced = current.clone();
                        spliced[index] = minimized.value;
                        let result = c.candidate(spliced);
                        if matches!(&result, Err(e) if e.is_early_exit()) {
                            self.cursor = Some(Cursor { index, len });
                        }
                        result?;
                    }

                    if let Some(e) = minimized.error {
                        return Err(e);
                    }
                }
                Ok(())
            }
        }
    }
}

impl<T> DefaultShrink for Vec<T>
where
    T: DefaultShrink + Value,
{
    type DefaultShrink = Collection<T::DefaultShrink>;
}

fn without<T: Clone>(seq: &[T], start: usize, len: usize) -> Vec<T> {
    let mut result = Vec::with_capacity(seq.len() - len);
    result.extend_from_slice(&seq[..start]);
    result.extend_from_slice(&seq[start + len..]);
    result
}

/// Checks a candidate element by splicing it into the whole sequence at
/// `index` and checking the whole sequence.
struct Splice<'a, T> {
    whole: &'a mut dyn Oracle<Vec<T>>,
    base: &'a [T],
    index: usize,
}

impl<T> Oracle<T> for Splice<'_, T>
where
    T: Clone,
{
    fn check(&mut self, candidate: &T) -> Result<bool> {
        let mut whole = self.base.to_vec();
        whole[self.index] = candidate.clone();
        self.whole.check(&whole)
    }
}
