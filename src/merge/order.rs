//! How the current heads of merged sources are ranked against one another.
//!
//! [`Natural`] ranks values as they are, [`ByKey`] ranks them by a derived key, and
//! [`Reversed`] flips whichever order it wraps so that ascending inputs can be merged
//! into an ascending output.

use core::cmp::{Ordering, Reverse};

/// Turns each item pulled from a source into a comparable head, and back.
///
/// A head is built once per item, so a key function is evaluated exactly once for
/// every element that passes through the heap.
pub trait MergeOrder<T> {
    /// What the merge heap compares.
    type Head: PartialOrd;

    /// Wraps `item` for ranking.
    fn head(&mut self, item: T) -> Self::Head;

    /// Recovers the item from its head.
    fn into_item(head: Self::Head) -> T;
}

/// A zero-sized order that ranks items by their own [`PartialOrd`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<T: PartialOrd> MergeOrder<T> for Natural {
    type Head = T;

    #[inline]
    fn head(&mut self, item: T) -> T {
        item
    }

    #[inline]
    fn into_item(head: T) -> T {
        head
    }
}

/// Ranks items by the result of a key function.
#[derive(Clone, Copy, Debug)]
pub struct ByKey<F>(pub F);

impl<T, K, F> MergeOrder<T> for ByKey<F>
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    type Head = Keyed<K, T>;

    #[inline]
    fn head(&mut self, item: T) -> Keyed<K, T> {
        Keyed { key: (self.0)(&item), item }
    }

    #[inline]
    fn into_item(head: Keyed<K, T>) -> T {
        head.item
    }
}

/// Flips the order it wraps: the smallest head ranks greatest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reversed<O>(pub O);

impl<T, O: MergeOrder<T>> MergeOrder<T> for Reversed<O> {
    type Head = Reverse<O::Head>;

    #[inline]
    fn head(&mut self, item: T) -> Self::Head {
        Reverse(self.0.head(item))
    }

    #[inline]
    fn into_item(head: Self::Head) -> T {
        O::into_item(head.0)
    }
}

/// An item paired with its precomputed key. Compares by `key` only.
#[derive(Clone, Copy, Debug)]
pub struct Keyed<K, T> {
    key: K,
    item: T,
}

impl<K: PartialEq, T> PartialEq for Keyed<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: PartialOrd, T> PartialOrd for Keyed<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}
