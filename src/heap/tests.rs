use super::*;
use crate::test_helpers::test_rng;
use crate::HeapErrorKind;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp::Ordering;
use rand::Rng;
use std::panic::{catch_unwind, AssertUnwindSafe};

fn assert_heap<T: PartialOrd + core::fmt::Debug>(data: &[T]) {
    for i in 0..data.len() {
        for child in [2 * i + 1, 2 * i + 2] {
            if child < data.len() {
                assert!(data[i] >= data[child], "{:?}: index {} < child {}", data, i, child);
            }
        }
    }
    assert!(is_heap(data));
}

fn random_vec(len: usize) -> Vec<i32> {
    let mut rng = test_rng();
    (0..len).map(|_| rng.gen_range(-50..50)).collect()
}

#[test]
fn test_heapify_invariant() {
    let mut data = vec![4, 6, 2, 1, 7, 9, 2, 6, 2, 1];
    heapify(&mut data);
    assert_heap(&data);
    assert_eq!(data[0], 9);
}

#[test]
fn test_heapify_invariant_with_negatives() {
    let mut data = vec![-7, 10, 12, -33, -4, 2, 5, 3, -99];
    heapify(&mut data);
    assert_heap(&data);
    assert_eq!(data[0], 12);
}

#[test]
fn test_heapify_invariant_with_reals() {
    let mut data = vec![5.5, 3.0, 7.4, 7.7, 1.0, 3.33, 10.15];
    heapify(&mut data);
    assert_heap(&data);
    assert_eq!(data[0], 10.15);
}

#[test]
fn test_heapify_random() {
    for len in [0, 1, 2, 3, 7, 8, 9, 64, 513] {
        let mut data = random_vec(len);
        let mut expected = data.clone();
        heapify(&mut data);
        assert_heap(&data);

        let mut permuted = data.clone();
        permuted.sort();
        expected.sort();
        assert_eq!(permuted, expected);
    }
}

#[test]
fn test_heapify_empty() {
    let mut data: Vec<i32> = vec![];
    heapify(&mut data);
    assert!(data.is_empty());
}

#[test]
fn test_heapify_idempotent() {
    let mut data = random_vec(100);
    heapify(&mut data);
    let once = data.clone();
    heapify(&mut data);
    assert_eq!(data, once);
}

#[test]
fn test_is_heap() {
    assert!(is_heap::<i32>(&[]));
    assert!(is_heap(&[1]));
    assert!(is_heap(&[3, 3, 3]));
    assert!(is_heap(&[9, 4, 8, 1, 4]));
    assert!(!is_heap(&[1, 2]));
    assert!(!is_heap(&[9, 4, 8, 5]));
}

#[test]
fn test_pop_from_empty() {
    let mut heap: Vec<i32> = vec![];
    let err = heappop(&mut heap).unwrap_err();
    assert_eq!(err.kind(), HeapErrorKind::Empty { operation: "heappop" });
    assert_eq!(err.to_string(), "heappop on an empty heap: index 0 is out of range");
}

#[test]
fn test_replace_on_empty() {
    let mut heap: Vec<i32> = vec![];
    let err = heapreplace(&mut heap, 1).unwrap_err();
    assert_eq!(err.kind(), HeapErrorKind::Empty { operation: "heapreplace" });
    assert!(heap.is_empty());
}

#[test]
fn test_pushpop_on_empty() {
    let mut heap: Vec<i32> = vec![];
    assert_eq!(heappushpop(&mut heap, 4), 4);
    assert!(heap.is_empty());
}

#[test]
fn test_push() {
    let mut heap = vec![32, 6, 13, 4, 5, 9, 1, 3];
    assert_heap(&heap);
    heappush(&mut heap, 100);
    assert_eq!(heap[0], 100);
    assert_eq!(heap.len(), 9);
    assert_heap(&heap);
}

#[test]
fn test_push_random() {
    let mut heap = Vec::new();
    for x in random_vec(200) {
        heappush(&mut heap, x);
        assert_heap(&heap);
    }
}

#[test]
fn test_pop() {
    let mut heap = vec![1];
    assert_eq!(heappop(&mut heap), Ok(1));
    assert!(heap.is_empty());

    let mut heap = random_vec(300);
    let mut expected = heap.clone();
    expected.sort_by(|a, b| b.cmp(a));
    heapify(&mut heap);

    let mut popped = Vec::new();
    while let Ok(x) = heappop(&mut heap) {
        assert_heap(&heap);
        popped.push(x);
    }
    assert_eq!(popped, expected);
}

#[test]
fn test_replace() {
    let mut heap = vec![5, 2, 4];
    assert_eq!(heapreplace(&mut heap, 10), Ok(5));
    assert_eq!(heap, [10, 2, 4]);

    // The returned value may exceed the replacement.
    assert_eq!(heapreplace(&mut heap, 1), Ok(10));
    assert_eq!(heap.len(), 3);
    assert_eq!(heap[0], 4);
    assert_heap(&heap);
}

#[test]
fn test_pushpop() {
    let mut heap = vec![5, 3, 4];
    assert_eq!(heappushpop(&mut heap, 6), 6);
    assert_eq!(heap, [5, 3, 4]);
    assert_eq!(heappushpop(&mut heap, 5), 5);
    assert_eq!(heap, [5, 3, 4]);
    assert_eq!(heappushpop(&mut heap, 1), 5);
    assert_eq!(heap, [4, 3, 1]);
}

#[test]
fn test_pushpop_matches_push_then_pop() {
    let mut rng = test_rng();
    let mut a = random_vec(50);
    heapify(&mut a);
    let mut b = a.clone();

    for _ in 0..200 {
        let x = rng.gen_range(-60..60);
        let fast = heappushpop(&mut a, x);
        heappush(&mut b, x);
        let slow = heappop(&mut b).unwrap();
        assert_eq!(fast, slow);
        assert_heap(&a);

        let mut sa = a.clone();
        let mut sb = b.clone();
        sa.sort();
        sb.sort();
        assert_eq!(sa, sb);
    }
}

#[test]
fn test_heapsort() {
    let mut empty: [u8; 0] = [];
    heapsort(&mut empty);

    for len in [1, 2, 5, 16, 100, 257] {
        let mut data = random_vec(len);
        let mut expected = data.clone();
        expected.sort();
        heapsort(&mut data);
        assert_eq!(data, expected);
    }
}

/// Compares on `key` alone, so `tag` reveals which of two equal elements moved.
#[derive(Debug, Clone, Copy)]
struct Tagged {
    key: i32,
    tag: char,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

fn tags(data: &[Tagged]) -> alloc::string::String {
    data.iter().map(|t| t.tag).collect()
}

#[test]
fn test_sift_down_prefers_left_on_tie() {
    let t = |key, tag| Tagged { key, tag };
    let mut heap = vec![t(5, 'a'), t(3, 'b'), t(3, 'c')];
    assert_eq!(heapreplace(&mut heap, t(1, 'z')).unwrap().tag, 'a');
    assert_eq!(tags(&heap), "bzc");
}

#[test]
fn test_sift_down_stops_on_equal_child() {
    let t = |key, tag| Tagged { key, tag };
    let mut heap = vec![t(5, 'a'), t(4, 'b'), t(3, 'c')];
    heapreplace(&mut heap, t(4, 'z')).unwrap();
    assert_eq!(tags(&heap), "zbc");
}

#[test]
fn test_sift_up_stops_on_equal_parent() {
    let t = |key, tag| Tagged { key, tag };
    let mut heap = vec![t(5, 'a'), t(2, 'b')];
    heappush(&mut heap, t(5, 'c'));
    assert_eq!(tags(&heap), "abc");
    heappush(&mut heap, t(6, 'd'));
    assert_eq!(tags(&heap), "dacb");
}

#[test]
fn test_incomparable_elements() {
    let mut heap = vec![1.0, f64::NAN, 3.0, 2.0, f64::NAN];
    heapify(&mut heap);
    heappush(&mut heap, 0.5);
    assert_eq!(heap.len(), 6);

    let mut count = 0;
    while heappop(&mut heap).is_ok() {
        count += 1;
    }
    assert_eq!(count, 6);
}

/// Panics once its shared comparison budget runs out.
#[derive(Debug)]
struct Fuse<'a> {
    value: i32,
    budget: &'a Cell<usize>,
}

impl PartialEq for Fuse<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Fuse<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let left = self.budget.get();
        if left == 0 {
            panic!("comparison budget exhausted");
        }
        self.budget.set(left - 1);
        self.value.partial_cmp(&other.value)
    }
}

#[test]
fn test_panic_safe() {
    let values = random_vec(64);
    let mut expected = values.clone();
    expected.sort();

    for budget in [0, 1, 5, 20, 40, 70] {
        let budget = Cell::new(budget);
        let mut heap: Vec<Fuse<'_>> =
            values.iter().map(|&value| Fuse { value, budget: &budget }).collect();

        let result = catch_unwind(AssertUnwindSafe(|| {
            heapify(&mut heap);
            heappush(&mut heap, Fuse { value: 1000, budget: &budget });
            heappop(&mut heap).unwrap();
        }));
        assert!(result.is_err());

        // Whatever ran before the panic, no element was lost or duplicated.
        let mut seen: Vec<i32> = heap.iter().map(|f| f.value).filter(|&v| v != 1000).collect();
        seen.sort();
        assert_eq!(seen, expected);
    }
}
