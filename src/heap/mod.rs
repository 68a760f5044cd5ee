//! Max-heap primitives over plain vectors and slices.
//!
//! Insertion and popping the largest element have *O*(log(*n*)) time complexity.
//! Checking the largest element is *O*(1): it is always `heap[0]`. Converting a
//! vector into a heap is done in place in *O*(*n*).
//!
//! The binary tree is implicit: the children of index `k` live at `2*k + 1` and
//! `2*k + 2`, and its parent at `(k - 1) / 2`. Elements only need [`PartialOrd`];
//! the routines consult `>` and `<` and nothing else, so an incomparable pair
//! (such as a `NaN` against anything) is treated as "not out of order".
//!
//! It is a logic error to reorder a heap other than through these functions, or to
//! mutate an element so that its ordering relative to the others changes. The
//! resulting behavior is unspecified but memory safe.
//!
//! ```
//! use maxheapq::heap::{heapify, heappop, heappushpop, heapreplace};
//!
//! let mut heap = vec![2.5, -1.0, 7.25, 3.0];
//! heapify(&mut heap);
//!
//! assert_eq!(heapreplace(&mut heap, 0.5), Ok(7.25));
//! assert_eq!(heappushpop(&mut heap, 10.0), 10.0);
//! assert_eq!(heappop(&mut heap), Ok(3.0));
//! ```

// Under `PartialOrd`, `!(a > b)` and `a <= b` differ.
#![allow(clippy::neg_cmp_op_on_partial_ord)]

use alloc::vec::Vec;
use core::mem::swap;

use crate::HeapError;

mod gap;
#[cfg(test)]
mod tests;

use gap::Gap;

/// Pushes `item` onto `heap`, maintaining the heap invariant.
///
/// # Time complexity
///
/// *O*(log(*n*)) comparisons, plus the amortized cost of growing the vector.
pub fn heappush<T: PartialOrd>(heap: &mut Vec<T>, item: T) {
    heap.push(item);
    let last = heap.len() - 1;
    // SAFETY: `last` indexes the element just pushed.
    unsafe { sift_up(heap, last) };
}

/// Removes and returns the greatest item of `heap`, maintaining the heap invariant.
///
/// # Errors
///
/// Fails with [`HeapErrorKind::Empty`](crate::HeapErrorKind::Empty) if `heap` is
/// empty.
///
/// ```
/// use maxheapq::{heappop, HeapErrorKind};
///
/// let mut heap = vec![3, 1];
/// assert_eq!(heappop(&mut heap), Ok(3));
/// assert_eq!(heappop(&mut heap), Ok(1));
/// assert_eq!(
///     heappop(&mut heap).unwrap_err().kind(),
///     HeapErrorKind::Empty { operation: "heappop" },
/// );
/// ```
pub fn heappop<T: PartialOrd>(heap: &mut Vec<T>) -> Result<T, HeapError> {
    let mut item = heap.pop().ok_or(HeapError::empty("heappop"))?;
    if !heap.is_empty() {
        swap(&mut item, &mut heap[0]);
        // SAFETY: !heap.is_empty() means that 0 < heap.len()
        unsafe { sift_down(heap, 0) };
    }
    Ok(item)
}

/// Pops and returns the greatest item of `heap`, then adds `item`; the size of the
/// heap is unchanged.
///
/// This is more efficient than [`heappop`] followed by [`heappush`] and suits
/// fixed-size heaps. Note that the returned value may be larger than `item`.
///
/// # Errors
///
/// Fails with [`HeapErrorKind::Empty`](crate::HeapErrorKind::Empty) if `heap` is
/// empty; `item` is dropped in that case.
pub fn heapreplace<T: PartialOrd>(heap: &mut [T], mut item: T) -> Result<T, HeapError> {
    let root = heap.first_mut().ok_or(HeapError::empty("heapreplace"))?;
    swap(&mut item, root);
    // SAFETY: the root exists, so 0 < heap.len()
    unsafe { sift_down(heap, 0) };
    Ok(item)
}

/// Pushes `item` and then pops the greatest item, touching the heap at most once.
///
/// When `item` is at least as large as the current root (or `heap` is empty) it is
/// handed straight back and `heap` is left alone.
///
/// ```
/// use maxheapq::heappushpop;
///
/// let mut heap: Vec<i32> = vec![];
/// assert_eq!(heappushpop(&mut heap, 4), 4);
/// assert!(heap.is_empty());
///
/// let mut heap = vec![5, 3, 1];
/// assert_eq!(heappushpop(&mut heap, 2), 5);
/// assert_eq!(heap[0], 3);
/// ```
pub fn heappushpop<T: PartialOrd>(heap: &mut [T], mut item: T) -> T {
    if let Some(root) = heap.first_mut() {
        if *root > item {
            swap(&mut item, root);
            // SAFETY: the root exists, so 0 < heap.len()
            unsafe { sift_down(heap, 0) };
        }
    }
    item
}

/// Rearranges `data` into a max-heap, in place, in *O*(*n*) time.
///
/// Works bottom-up: the last index with a child is `n / 2 - 1`, and by the time
/// a parent is sifted down both of its subtrees are already heaps.
pub fn heapify<T: PartialOrd>(data: &mut [T]) {
    let mut n = data.len() / 2;
    while n > 0 {
        n -= 1;
        // SAFETY: n starts from data.len() / 2 and goes down to 0, so it is only
        //  out of bounds when data is empty, which the loop condition rules out.
        unsafe { sift_down(data, n) };
    }
}

/// Returns whether `data` satisfies the max-heap invariant: no element compares
/// greater than its parent.
#[must_use]
pub fn is_heap<T: PartialOrd>(data: &[T]) -> bool {
    (1..data.len()).all(|child| !(data[child] > data[(child - 1) / 2]))
}

/// Sorts `data` in ascending order, in place.
///
/// `data` is heapified first, then the root is repeatedly swapped to the end of the
/// shrinking heap prefix. The prefix stays a valid heap throughout, so this is the
/// in-place equivalent of draining it with [`heappop`].
///
/// ```
/// use maxheapq::heapsort;
///
/// let mut data = [4, -2, 9, 0, 9, 3];
/// heapsort(&mut data);
/// assert_eq!(data, [-2, 0, 3, 4, 9, 9]);
/// ```
pub fn heapsort<T: PartialOrd>(data: &mut [T]) {
    heapify(data);
    let mut end = data.len();
    while end > 1 {
        end -= 1;
        data.swap(0, end);
        // SAFETY: 1 <= end, so the prefix `..end` is non-empty.
        unsafe { sift_down(&mut data[..end], 0) };
    }
}

// Both sift routines lift the element at `pos` out into a `Gap`, shift the
// elements on its path into the vacancy, and write it back once at the end.

/// Moves the element at `pos` towards the root while it is greater than its
/// parent.
///
/// # Safety
///
/// The caller must guarantee that `pos < data.len()`.
pub(crate) unsafe fn sift_up<T: PartialOrd>(data: &mut [T], pos: usize) {
    // SAFETY: The caller guarantees that pos < data.len()
    let mut gap = unsafe { Gap::lift(data, pos) };

    while gap.at() > 0 {
        let parent = (gap.at() - 1) >> 1;

        // SAFETY: gap.at() > 0, so parent < gap.at() is in bounds and not vacant.
        if !(gap.held() > unsafe { gap.peek(parent) }) {
            break;
        }

        // SAFETY: Same as above
        unsafe { gap.pull_from(parent) };
    }
}

/// Moves the element at `pos` towards the leaves while one of its children is
/// greater than it. Of two children the right one is followed only when it is
/// strictly greater than the left.
///
/// # Safety
///
/// The caller must guarantee that `pos < data.len()`.
pub(crate) unsafe fn sift_down<T: PartialOrd>(data: &mut [T], pos: usize) {
    let end = data.len();
    // SAFETY: The caller guarantees that pos < data.len()
    let mut gap = unsafe { Gap::lift(data, pos) };
    let mut child = 2 * gap.at() + 1;

    // Loop invariant: child == 2 * gap.at() + 1.
    while child < end {
        let right = child + 1;
        // SAFETY: child < right < end, and both are greater than gap.at().
        if right < end && unsafe { gap.peek(child) < gap.peek(right) } {
            child = right;
        }

        // SAFETY: child is the left or right child, proven in bounds and not vacant.
        if !(gap.held() < unsafe { gap.peek(child) }) {
            return;
        }

        // SAFETY: same as above.
        unsafe { gap.pull_from(child) };
        child = 2 * gap.at() + 1;
    }
}
