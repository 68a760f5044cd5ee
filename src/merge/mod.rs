//! A lazy k-way merge of sequences that are each already sorted in descending
//! order.
//!
//! The merge keeps one record per non-exhausted input in a max-heap, keyed on the
//! input's current head, and always yields the root's head next. An input is
//! advanced past a yielded head only on the following pull, and at most one
//! element per input is buffered at any time. Once only a single input remains,
//! its cursor is drained directly without further heap work.
//!
//! Equal heads are broken by input position: the head of the *later* input ranks
//! greater, so it is yielded first.
//!
//! ```
//! use maxheapq::merge::{merge_by, merge_by_key, Natural, Reversed};
//!
//! let by_len: Vec<_> = merge_by_key(
//!     [vec!["horse", "dog"], vec!["kangaroo", "fish", "cat"]],
//!     |s: &&str| s.len(),
//! )
//! .collect();
//! assert_eq!(by_len, ["kangaroo", "horse", "fish", "cat", "dog"]);
//!
//! // Ascending inputs merge into an ascending output under `Reversed`.
//! let ascending: Vec<_> = merge_by([vec![1, 4, 9], vec![2, 3]], Reversed(Natural)).collect();
//! assert_eq!(ascending, [1, 2, 3, 4, 9]);
//! ```

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

use crate::heap::{heapify, heappop, sift_down};

mod order;

pub use order::{ByKey, Keyed, MergeOrder, Natural, Reversed};

/// Merges `iterables`, each sorted in descending natural order, into a single
/// descending iterator.
///
/// ```
/// use maxheapq::merge;
///
/// let merged: Vec<_> = merge([vec![6, 5, 3, 2, 2, 1], vec![9, 7, 4, 3, 1], vec![10]]).collect();
/// assert_eq!(merged, [10, 9, 7, 6, 5, 4, 3, 3, 2, 2, 1, 1]);
/// ```
pub fn merge<I>(iterables: I) -> Merge<<I::Item as IntoIterator>::IntoIter, Natural>
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: PartialOrd,
{
    merge_by(iterables, Natural)
}

/// Merges `iterables`, each sorted in descending order of `key`, into a single
/// iterator that is descending in `key`.
///
/// `key` is called once per element that passes through the heap.
pub fn merge_by_key<I, K, F>(
    iterables: I,
    key: F,
) -> Merge<<I::Item as IntoIterator>::IntoIter, ByKey<F>>
where
    I: IntoIterator,
    I::Item: IntoIterator,
    K: PartialOrd,
    F: FnMut(&<I::Item as IntoIterator>::Item) -> K,
{
    merge_by(iterables, ByKey(key))
}

/// Merges `iterables` under an arbitrary [`MergeOrder`]: each input must already be
/// sorted so that its heads never rank greater than the head before them.
///
/// Nothing is pulled from any input until the returned iterator is first advanced.
pub fn merge_by<I, O>(iterables: I, order: O) -> Merge<<I::Item as IntoIterator>::IntoIter, O>
where
    I: IntoIterator,
    I::Item: IntoIterator,
    O: MergeOrder<<I::Item as IntoIterator>::Item>,
{
    let cursors = iterables.into_iter().map(IntoIterator::into_iter).collect();
    Merge { order, stage: Stage::Fresh(cursors) }
}

/// One live input: the head it last produced, its position among the inputs and
/// the cursor over what it has left.
///
/// `head` is `None` only for the root, between yielding its head and the next
/// pull, which refills or discards the record before comparing it again.
#[derive(Debug)]
struct Source<H, I> {
    head: Option<H>,
    rank: usize,
    rest: I,
}

// Records rank by head first, then by input position; the cursor never takes part.
impl<H: PartialEq, I> PartialEq for Source<H, I> {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.rank == other.rank
    }
}

impl<H: PartialOrd, I> PartialOrd for Source<H, I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (&self.head, self.rank).partial_cmp(&(&other.head, other.rank))
    }
}

#[derive(Debug)]
enum Stage<H, I> {
    /// No input has been touched yet.
    Fresh(Vec<I>),
    /// Several inputs may still yield; `Source`s form a max-heap. When `pending`,
    /// the root's head has been yielded and its cursor is advanced on the next pull.
    Heap { sources: Vec<Source<H, I>>, pending: bool },
    /// One input is left and its head has already been yielded.
    Tail(I),
    Done,
}

/// An iterator that merges several sorted inputs into one sorted output.
///
/// This `struct` is created by [`merge`], [`merge_by_key`] and [`merge_by`]. See
/// their documentation for more.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Merge<I: Iterator, O: MergeOrder<I::Item>> {
    order: O,
    stage: Stage<O::Head, I>,
}

impl<I, O> fmt::Debug for Merge<I, O>
where
    I: Iterator + fmt::Debug,
    O: MergeOrder<I::Item> + fmt::Debug,
    O::Head: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merge").field("order", &self.order).field("stage", &self.stage).finish()
    }
}

impl<I: Iterator, O: MergeOrder<I::Item>> Merge<I, O> {
    /// Pulls the first element of every input and arranges the non-empty ones into
    /// a heap. Empty inputs are dropped here.
    fn prime(&mut self) {
        if let Stage::Fresh(cursors) = &mut self.stage {
            let cursors = mem::take(cursors);
            let order = &mut self.order;
            let mut sources: Vec<_> = cursors
                .into_iter()
                .enumerate()
                .filter_map(|(rank, mut rest)| {
                    let first = rest.next()?;
                    Some(Source { head: Some(order.head(first)), rank, rest })
                })
                .collect();
            heapify(&mut sources);
            self.stage = Stage::Heap { sources, pending: false };
        }
    }

    /// Moves the root's cursor past the head already yielded: a new head is sifted
    /// into place, an exhausted input is removed from the heap.
    fn advance_root(order: &mut O, sources: &mut Vec<Source<O::Head, I>>) {
        let Some(top) = sources.first_mut() else { return };
        match top.rest.next() {
            Some(item) => {
                top.head = Some(order.head(item));
                // SAFETY: `sources` is non-empty.
                unsafe { sift_down(sources, 0) };
            }
            None => {
                // The record's head was already yielded.
                let _ = heappop(sources);
            }
        }
    }
}

impl<I: Iterator, O: MergeOrder<I::Item>> Iterator for Merge<I, O> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.prime();
        match &mut self.stage {
            Stage::Heap { sources, pending } => {
                if mem::take(pending) {
                    Self::advance_root(&mut self.order, sources);
                }
                if sources.len() > 1 {
                    // Yield first; the cursor moves on at the next pull.
                    *pending = true;
                    return sources[0].head.take().map(O::into_item);
                }
                match sources.pop() {
                    Some(Source { head, rest, .. }) => {
                        self.stage = Stage::Tail(rest);
                        head.map(O::into_item)
                    }
                    None => {
                        self.stage = Stage::Done;
                        None
                    }
                }
            }
            Stage::Tail(rest) => {
                let item = rest.next();
                if item.is_none() {
                    self.stage = Stage::Done;
                }
                item
            }
            // `prime` never leaves the stage fresh.
            Stage::Fresh(_) | Stage::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.stage {
            Stage::Fresh(cursors) => cursors.iter().map(Iterator::size_hint).fold((0, Some(0)), add),
            Stage::Heap { sources, .. } => sources
                .iter()
                .map(|source| {
                    let held = usize::from(source.head.is_some());
                    add((held, Some(held)), source.rest.size_hint())
                })
                .fold((0, Some(0)), add),
            Stage::Tail(rest) => rest.size_hint(),
            Stage::Done => (0, Some(0)),
        }
    }
}

impl<I: Iterator, O: MergeOrder<I::Item>> FusedIterator for Merge<I, O> {}

fn add(a: (usize, Option<usize>), b: (usize, Option<usize>)) -> (usize, Option<usize>) {
    let lower = a.0.saturating_add(b.0);
    let upper = match (a.1, b.1) {
        (Some(x), Some(y)) => x.checked_add(y),
        _ => None,
    };
    (lower, upper)
}
