//! Max-heap primitives that operate directly on a caller's `Vec` or slice, a lazy
//! k-way [`merge`] of descending sequences built on top of them, and bounded
//! [`nlargest`] / [`nsmallest`] selection.
//!
//! A max-heap is a sequence for which `a[k] >= a[2*k+1]` and `a[k] >= a[2*k+2]`
//! for every `k` where those indices exist. Its first element is always its
//! greatest. There is no wrapper type: the heap *is* the sequence, and the
//! functions in this crate keep it valid.
//!
//! ```
//! use maxheapq::{heapify, heappop, heappush};
//!
//! let mut heap = vec![4, 1, 7, 3];
//! heapify(&mut heap);
//! assert_eq!(heap[0], 7);
//!
//! heappush(&mut heap, 9);
//! assert_eq!(heappop(&mut heap), Ok(9));
//! assert_eq!(heappop(&mut heap), Ok(7));
//! ```
//!
//! ```
//! use maxheapq::merge;
//!
//! let merged: Vec<_> = merge([vec![6, 5, 3], vec![9, 4], vec![10]]).collect();
//! assert_eq!(merged, [10, 9, 6, 5, 4, 3]);
//! ```
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(feature = "error_in_core", feature(error_in_core))]
// documentation controls
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![deny(missing_docs)]
#![cfg_attr(
    test,
    allow(
        clippy::bool_assert_comparison,
        clippy::needless_range_loop,
        clippy::redundant_clone,
        clippy::useless_vec,
    )
)]

extern crate alloc;

mod error;
pub mod heap;
pub mod merge;
pub mod select;

pub use error::{HeapError, HeapErrorKind};
pub use heap::{heapify, heappop, heappush, heappushpop, heapreplace, heapsort, is_heap};
pub use merge::{merge, merge_by, merge_by_key, Merge};
pub use select::{nlargest, nlargest_by_key, nsmallest, nsmallest_by_key};
