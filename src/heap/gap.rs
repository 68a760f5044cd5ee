use core::mem::ManuallyDrop;
use core::ptr;

/// The element being sifted by `sift_up` or `sift_down`, held outside the heap
/// while parents or children move into its slot.
///
/// Every heap operation in this crate, and each step of a merge, ends in one of
/// those two sifts. The vacant slot walks along the path of the sift with
/// [`Gap::pull_from`]; dropping the `Gap` writes the held element into it, so a
/// user comparison that panics still leaves the heap a permutation of its input.
pub(super) struct Gap<'a, T: 'a> {
    slots: &'a mut [T],
    held: ManuallyDrop<T>,
    at: usize,
}

impl<'a, T> Gap<'a, T> {
    /// Lifts the element at `at` out of `slots`.
    ///
    /// The gap covers all of `slots`: any index below `slots.len()` other than the
    /// vacant one may be peeked at or pulled from, so a sift over a prefix of a
    /// heap is given just that prefix.
    ///
    /// # Safety
    ///
    /// `at` must be a valid index into `slots`.
    #[inline]
    pub(super) unsafe fn lift(slots: &'a mut [T], at: usize) -> Self {
        debug_assert!(at < slots.len());
        // SAFETY: the caller guarantees `at` is in bounds; the bitwise copy is the
        //  only live owner until it is written back in `drop`.
        let held = unsafe { ptr::read(slots.get_unchecked(at)) };
        Gap { slots, held: ManuallyDrop::new(held), at }
    }

    /// Index of the vacant slot.
    #[inline]
    pub(super) fn at(&self) -> usize {
        self.at
    }

    /// The lifted element.
    #[inline]
    pub(super) fn held(&self) -> &T {
        &self.held
    }

    /// The element occupying `index`.
    ///
    /// # Safety
    ///
    /// `index` must be in bounds and must not be the vacant slot.
    #[inline]
    pub(super) unsafe fn peek(&self, index: usize) -> &T {
        debug_assert!(index != self.at);
        debug_assert!(index < self.slots.len());
        // SAFETY: upheld by the caller.
        unsafe { self.slots.get_unchecked(index) }
    }

    /// Moves the element at `index` into the vacancy; `index` becomes vacant.
    ///
    /// # Safety
    ///
    /// `index` must be in bounds and must not be the vacant slot.
    #[inline]
    pub(super) unsafe fn pull_from(&mut self, index: usize) {
        debug_assert!(index != self.at);
        debug_assert!(index < self.slots.len());
        // SAFETY: both indices are in bounds and distinct, so the regions do not
        //  overlap; the source slot is treated as vacant from here on.
        unsafe {
            let base = self.slots.as_mut_ptr();
            ptr::copy_nonoverlapping(base.add(index), base.add(self.at), 1);
        }
        self.at = index;
    }
}

impl<T> Drop for Gap<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `at` is always in bounds and vacant, so writing the held element
        //  there restores a fully initialised slice without dropping anything.
        unsafe {
            ptr::copy_nonoverlapping(&*self.held, self.slots.get_unchecked_mut(self.at), 1);
        }
    }
}
