//! Bounded selection of the `n` largest or smallest items of an iterator.
//!
//! Only `n` candidates are held at a time: a heap whose root is the weakest
//! candidate kept so far, updated with [`heappushpop`] as the input streams past.
//! Items whose keys compare equal keep their input order in the result.

use alloc::vec::Vec;
use core::cmp::{Ordering, Reverse};

use crate::heap::{heapify, heappushpop, heapsort};


/// A candidate: compared by `key`, then by `order`; `value` is carried along.
struct Ranked<K, O, V> {
    key: K,
    order: O,
    value: V,
}

impl<K: PartialEq, O: PartialEq, V> PartialEq for Ranked<K, O, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.order == other.order
    }
}

impl<K: PartialOrd, O: PartialOrd, V> PartialOrd for Ranked<K, O, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (&self.key, &self.order).partial_cmp(&(&other.key, &other.order))
    }
}

/// Returns the `n` largest items of `iterable`, greatest first.
///
/// ```
/// use maxheapq::nlargest;
///
/// assert_eq!(nlargest(3, [5, 1, 8, 3, 9, 2]), [9, 8, 5]);
/// assert_eq!(nlargest(10, [2, 1]), [2, 1]);
/// ```
pub fn nlargest<I>(n: usize, iterable: I) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: PartialOrd,
{
    largest(n, iterable.into_iter().map(|item| (item, ())))
        .into_iter()
        .map(|(item, ())| item)
        .collect()
}

/// Returns the `n` items of `iterable` with the largest keys, greatest first.
///
/// Of items with equal keys, those earlier in `iterable` come first.
///
/// ```
/// use maxheapq::nlargest_by_key;
///
/// let words = ["ox", "emu", "yak", "gnu", "horse"];
/// assert_eq!(nlargest_by_key(3, words, |w: &&str| w.len()), ["horse", "emu", "yak"]);
/// ```
pub fn nlargest_by_key<I, K, F>(n: usize, iterable: I, mut key: F) -> Vec<I::Item>
where
    I: IntoIterator,
    K: PartialOrd,
    F: FnMut(&I::Item) -> K,
{
    let keyed = iterable.into_iter().map(|item| (key(&item), item));
    largest(n, keyed).into_iter().map(|(_, item)| item).collect()
}

/// Returns the `n` smallest items of `iterable`, least first.
///
/// ```
/// use maxheapq::nsmallest;
///
/// assert_eq!(nsmallest(2, [5.5, -1.0, 8.0, 0.25]), [-1.0, 0.25]);
/// ```
pub fn nsmallest<I>(n: usize, iterable: I) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: PartialOrd,
{
    smallest(n, iterable.into_iter().map(|item| (item, ())))
        .into_iter()
        .map(|(item, ())| item)
        .collect()
}

/// Returns the `n` items of `iterable` with the smallest keys, least first.
///
/// Of items with equal keys, those earlier in `iterable` come first.
pub fn nsmallest_by_key<I, K, F>(n: usize, iterable: I, mut key: F) -> Vec<I::Item>
where
    I: IntoIterator,
    K: PartialOrd,
    F: FnMut(&I::Item) -> K,
{
    let keyed = iterable.into_iter().map(|item| (key(&item), item));
    smallest(n, keyed).into_iter().map(|(_, item)| item).collect()
}

fn largest<K: PartialOrd, V>(n: usize, entries: impl Iterator<Item = (K, V)>) -> Vec<(K, V)> {
    // Reversed on both levels: the root is the smallest key kept, and of equal keys
    // the latest arrival, which is the first to be displaced.
    let ranked = entries
        .enumerate()
        .map(|(order, (key, value))| Reverse(Ranked { key, order: Reverse(order), value }));
    select(n, ranked).into_iter().map(|Reverse(r)| (r.key, r.value)).collect()
}

fn smallest<K: PartialOrd, V>(n: usize, entries: impl Iterator<Item = (K, V)>) -> Vec<(K, V)> {
    let ranked = entries.enumerate().map(|(order, (key, value))| Ranked { key, order, value });
    select(n, ranked).into_iter().map(|r| (r.key, r.value)).collect()
}

/// Keeps the `n` least items of `entries` in a max-heap and returns them ascending.
fn select<T: PartialOrd>(n: usize, mut entries: impl Iterator<Item = T>) -> Vec<T> {
    if n == 0 {
        return Vec::new();
    }

    let mut kept: Vec<T> = entries.by_ref().take(n).collect();
    heapify(&mut kept);
    for entry in entries {
        // Hands back whichever is greater: the newcomer or the current root.
        heappushpop(&mut kept, entry);
    }

    heapsort(&mut kept);
    kept
}
