// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable storage shared by [`SecretVec`](crate::SecretVec) and
//! [`SecretString`](crate::SecretString).
//!
//! Layout invariants:
//! - `ptr == None` if and only if `cap == 0` ("Empty").
//! - `len <= cap`; slots `[0, len)` hold live values, slots `[len, cap)` hold zeros.
//! - Every block leaves through [`SecretAllocator::deallocate`], which erases it.

use core::marker::PhantomData;
use core::mem;
use core::ops::{Bound, Range, RangeBounds};
use core::ptr::{self, NonNull};

use allocator_api2::alloc::{Allocator, Global};
use bastion_util::secure_erase_elements;

use crate::{SecretAllocError, SecretAllocator};

pub(crate) struct SecretBuffer<T, A: Allocator = Global> {
    ptr: Option<NonNull<T>>,
    len: usize,
    cap: usize,
    alloc: SecretAllocator<A>,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer owns its values exactly like `Vec<T, A>` does.
unsafe impl<T: Send, A: Allocator + Send> Send for SecretBuffer<T, A> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for SecretBuffer<T, A> {}

/// Open gap of `count` slots at `index`, with `tail` live values parked right after it.
///
/// Dropping the guard closes whatever part of the gap was not filled: the tail moves
/// back, the vacated slots are erased and `len` is restored. This runs both on normal
/// completion and when a fill callback panics.
struct Gap<'a, T, A: Allocator> {
    buf: &'a mut SecretBuffer<T, A>,
    index: usize,
    count: usize,
    tail: usize,
    filled: usize,
}

impl<T, A: Allocator> Drop for Gap<'_, T, A> {
    fn drop(&mut self) {
        let base = self.buf.base().as_ptr();
        let unfilled = self.count - self.filled;

        if unfilled > 0 {
            // SAFETY: the tail lives at `index + count`; both ranges are in bounds.
            unsafe {
                ptr::copy(
                    base.add(self.index + self.count),
                    base.add(self.index + self.filled),
                    self.tail,
                );
                secure_erase_elements(base.add(self.index + self.filled + self.tail), unfilled);
            }
        }

        self.buf.len = self.index + self.filled + self.tail;
    }
}

/// Resolves `range` against a sequence of `len` values.
pub(crate) fn resolve_range<R: RangeBounds<usize>>(
    range: R,
    len: usize,
) -> Result<Range<usize>, SecretAllocError> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };

    if start > end || end > len {
        return Err(SecretAllocError::InvalidRange { start, end, len });
    }

    Ok(start..end)
}

impl<T, A: Allocator> SecretBuffer<T, A> {
    pub(crate) const fn new_in(alloc: SecretAllocator<A>) -> Self {
        Self {
            ptr: None,
            len: 0,
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    pub(crate) fn with_capacity_in(
        capacity: usize,
        alloc: SecretAllocator<A>,
    ) -> Result<Self, SecretAllocError> {
        let mut buf = Self::new_in(alloc);
        buf.reserve_exact(capacity)?;
        Ok(buf)
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) fn is_bound(&self) -> bool {
        self.ptr.is_some()
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &SecretAllocator<A> {
        &self.alloc
    }

    #[inline(always)]
    pub(crate) fn as_non_null(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Start of the block, or a dangling pointer when Empty.
    #[inline(always)]
    fn base(&self) -> NonNull<T> {
        self.ptr.unwrap_or(NonNull::dangling())
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const T {
        self.base().as_ptr()
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.base().as_ptr()
    }

    #[inline(always)]
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized; a dangling base is fine for len 0.
        unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    pub(crate) fn checked_range<R: RangeBounds<usize>>(
        &self,
        range: R,
    ) -> Result<Range<usize>, SecretAllocError> {
        resolve_range(range, self.len)
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    /// Moves the live values into a block of exactly `new_cap` slots.
    ///
    /// The new block is obtained before the old one is touched, so a failed
    /// allocation leaves the buffer unchanged.
    pub(crate) fn reserve_exact(&mut self, new_cap: usize) -> Result<(), SecretAllocError> {
        if new_cap <= self.cap {
            return Ok(());
        }

        let new_ptr = self.alloc.allocate::<T>(new_cap)?;
        if let Some(old) = self.ptr {
            // SAFETY: distinct blocks; both hold at least `len` slots.
            unsafe { ptr::copy_nonoverlapping(old.as_ptr(), new_ptr.as_ptr(), self.len) };
        }

        let old_ptr = self.ptr.replace(new_ptr);
        let old_cap = mem::replace(&mut self.cap, new_cap);

        // SAFETY: the old block came from this allocator with `old_cap` slots and its
        // values were moved out bitwise above.
        unsafe { self.alloc.deallocate(old_ptr, old_cap) };

        log::trace!("secret buffer reallocated: {} -> {} slots", old_cap, new_cap);

        Ok(())
    }

    /// Room for `additional` more values, exactly.
    pub(crate) fn reserve_additional(&mut self, additional: usize) -> Result<(), SecretAllocError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(SecretAllocError::CapacityOverflow)?;
        self.reserve_exact(required)
    }

    /// Room for `additional` more values, growing to `max(2 * cap, len + additional)`.
    pub(crate) fn reserve_amortized(&mut self, additional: usize) -> Result<(), SecretAllocError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(SecretAllocError::CapacityOverflow)?;
        if required <= self.cap {
            return Ok(());
        }

        let doubled = self.cap.saturating_mul(2);
        self.reserve_exact(doubled.max(required))
    }

    /// Reallocates to exactly `len` slots. An empty buffer goes back to Empty.
    pub(crate) fn shrink_to_fit(&mut self) -> Result<(), SecretAllocError> {
        if self.cap == self.len {
            return Ok(());
        }

        let new_ptr = if self.len == 0 {
            None
        } else {
            let new_ptr = self.alloc.allocate::<T>(self.len)?;
            // SAFETY: distinct blocks of at least `len` slots.
            unsafe { ptr::copy_nonoverlapping(self.as_ptr(), new_ptr.as_ptr(), self.len) };
            Some(new_ptr)
        };

        let old_ptr = mem::replace(&mut self.ptr, new_ptr);
        let old_cap = mem::replace(&mut self.cap, self.len);

        // SAFETY: values were moved out bitwise above.
        unsafe { self.alloc.deallocate(old_ptr, old_cap) };

        log::trace!("secret buffer shrunk: {} -> {} slots", old_cap, self.cap);

        Ok(())
    }

    // =========================================================================
    // Single values
    // =========================================================================

    /// # Safety
    ///
    /// `len < cap`.
    #[inline(always)]
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.cap);

        // SAFETY: slot `len` is in bounds and vacant (caller contract).
        unsafe { self.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    pub(crate) fn push(&mut self, value: T) -> Result<(), SecretAllocError> {
        self.reserve_amortized(1)?;

        // SAFETY: capacity reserved above.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY: slot `len` held a live value that is now moved out; the slot is
        // then erased and no longer counted as live.
        unsafe {
            let slot = self.as_mut_ptr().add(self.len);
            let value = slot.read();
            secure_erase_elements(slot, 1);
            Some(value)
        }
    }

    /// Inserts one value at `index` with amortized growth.
    pub(crate) fn insert(&mut self, index: usize, value: T) -> Result<usize, SecretAllocError> {
        if index > self.len {
            return Err(SecretAllocError::OutOfBounds {
                index,
                len: self.len,
            });
        }

        self.reserve_amortized(1)?;

        // SAFETY: `index <= len < cap`; the tail shifts by one slot inside the block.
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(value);
        }
        self.len += 1;

        Ok(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<T, SecretAllocError> {
        if index >= self.len {
            return Err(SecretAllocError::OutOfBounds {
                index,
                len: self.len,
            });
        }

        let old_len = self.len;

        // SAFETY: `index < len`; the value is moved out, the tail moves down, and the
        // vacated last slot is erased.
        unsafe {
            let base = self.as_mut_ptr();
            let value = base.add(index).read();
            ptr::copy(base.add(index + 1), base.add(index), old_len - index - 1);
            secure_erase_elements(base.add(old_len - 1), 1);
            self.len = old_len - 1;
            Ok(value)
        }
    }

    // =========================================================================
    // Ranges
    // =========================================================================

    /// Opens a gap of `count` slots at `index` and fills it from `fill`.
    ///
    /// `fill(base, i)` produces the `i`-th new value. `base` is the start of the block
    /// as it is *after* any reallocation, with the gap already open: a value that was
    /// at position `j` before the call now lives at `j` if `j < index`, otherwise at
    /// `j + count`.
    ///
    /// A single value grows with the amortized policy, larger counts grow exactly.
    /// If `fill` returns `None` early, the unfilled part of the gap is closed again.
    pub(crate) fn insert_with<F>(
        &mut self,
        index: usize,
        count: usize,
        mut fill: F,
    ) -> Result<usize, SecretAllocError>
    where
        F: FnMut(NonNull<T>, usize) -> Option<T>,
    {
        if index > self.len {
            return Err(SecretAllocError::OutOfBounds {
                index,
                len: self.len,
            });
        }

        if count == 0 {
            return Ok(index);
        }

        if count == 1 {
            self.reserve_amortized(1)?;
        } else {
            self.reserve_additional(count)?;
        }

        let base = self.base();
        let tail = self.len - index;

        // SAFETY: `len + count <= cap`, so the shifted tail stays in the block.
        unsafe { ptr::copy(base.as_ptr().add(index), base.as_ptr().add(index + count), tail) };

        // Only the prefix is live while the gap is open.
        self.len = index;

        let mut gap = Gap {
            buf: self,
            index,
            count,
            tail,
            filled: 0,
        };

        while gap.filled < count {
            let Some(value) = fill(base, gap.filled) else {
                break;
            };

            // SAFETY: slot `index + filled` is inside the open gap.
            unsafe { base.as_ptr().add(index + gap.filled).write(value) };
            gap.filled += 1;
        }

        Ok(index)
    }

    pub(crate) fn insert_n(
        &mut self,
        index: usize,
        count: usize,
        value: &T,
    ) -> Result<usize, SecretAllocError>
    where
        T: Clone,
    {
        self.insert_with(index, count, |_, _| Some(value.clone()))
    }

    pub(crate) fn insert_slice(&mut self, index: usize, src: &[T]) -> Result<usize, SecretAllocError>
    where
        T: Clone,
    {
        self.insert_with(index, src.len(), |_, i| src.get(i).cloned())
    }

    pub(crate) fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, SecretAllocError>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let count = iter.len();
        self.insert_with(index, count, |_, _| iter.next())
    }

    /// Inserts clones of the values in `range` (positions before the call) at `index`.
    ///
    /// Sources are resolved by index against the block as it is after growth, so a
    /// range that overlaps the insertion point or the reallocated block is copied
    /// correctly.
    pub(crate) fn insert_from_within<R>(
        &mut self,
        index: usize,
        range: R,
    ) -> Result<usize, SecretAllocError>
    where
        T: Clone,
        R: RangeBounds<usize>,
    {
        let Range { start, end } = self.checked_range(range)?;
        if index > self.len {
            return Err(SecretAllocError::OutOfBounds {
                index,
                len: self.len,
            });
        }

        let count = end - start;
        self.insert_with(index, count, |base, i| {
            let j = start + i;
            let at = if j < index { j } else { j + count };

            // SAFETY: `at` addresses a live value: either in the prefix or in the
            // tail parked behind the gap.
            Some(unsafe { (*base.as_ptr().add(at)).clone() })
        })
    }

    /// Drops the values in `range`, moves the tail down and erases the vacated slots.
    ///
    /// Returns the position of the value that followed the removed range.
    pub(crate) fn erase_range<R: RangeBounds<usize>>(
        &mut self,
        range: R,
    ) -> Result<usize, SecretAllocError> {
        let Range { start, end } = self.checked_range(range)?;
        let count = end - start;
        if count == 0 {
            return Ok(start);
        }

        let old_len = self.len;
        self.len = start;

        // SAFETY: `[start, end)` is live and dropped once; the tail moves inside the
        // block; the last `count` slots are vacated afterwards.
        unsafe {
            let base = self.as_mut_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), count));
            ptr::copy(base.add(end), base.add(start), old_len - end);
            secure_erase_elements(base.add(old_len - count), count);
        }

        self.len = old_len - count;

        Ok(start)
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let tail = self.len - new_len;
        self.len = new_len;

        // SAFETY: `[new_len, new_len + tail)` was live and is no longer counted.
        unsafe {
            let first = self.as_mut_ptr().add(new_len);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, tail));
            secure_erase_elements(first, tail);
        }
    }

    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops every value and releases the block. The buffer ends up Empty.
    pub(crate) fn release(&mut self) {
        self.clear();

        let ptr = self.ptr.take();
        let cap = mem::replace(&mut self.cap, 0);

        // SAFETY: every value was dropped by `clear`; the block came from `alloc`.
        unsafe { self.alloc.deallocate(ptr, cap) };
    }
}

impl<T, A: Allocator + Clone> SecretBuffer<T, A> {
    // =========================================================================
    // Whole-content replacement
    // =========================================================================

    /// Replaces the contents with `count` values produced by `fill`.
    ///
    /// The current block is reused when it is large enough. Otherwise a block of
    /// exactly `count` slots is built first and swapped in only once complete, so an
    /// allocation failure leaves the old contents intact.
    pub(crate) fn assign_with<F>(&mut self, count: usize, mut fill: F) -> Result<(), SecretAllocError>
    where
        F: FnMut(usize) -> Option<T>,
    {
        if count <= self.cap {
            self.clear();
            for i in 0..count {
                let Some(value) = fill(i) else {
                    break;
                };
                // SAFETY: `len <= i < count <= cap`.
                unsafe { self.push_unchecked(value) };
            }
            return Ok(());
        }

        let mut fresh = Self::with_capacity_in(count, self.alloc.clone())?;
        for i in 0..count {
            let Some(value) = fill(i) else {
                break;
            };
            // SAFETY: `fresh` has exactly `count` slots.
            unsafe { fresh.push_unchecked(value) };
        }

        *self = fresh;

        Ok(())
    }

    /// Deep copy with capacity equal to the length.
    pub(crate) fn try_clone(&self) -> Result<Self, SecretAllocError>
    where
        T: Clone,
    {
        let mut out = Self::with_capacity_in(self.len, self.alloc.clone())?;
        for value in self.as_slice() {
            // SAFETY: `out` has exactly `self.len` slots.
            unsafe { out.push_unchecked(value.clone()) };
        }
        Ok(out)
    }

    /// Copy-assignment: reuses the current block when it is large enough.
    pub(crate) fn clone_from_buffer(&mut self, src: &Self) -> Result<(), SecretAllocError>
    where
        T: Clone,
    {
        let values = src.as_slice();
        self.assign_with(values.len(), |i| values.get(i).cloned())
    }

    /// Moves the contents out, leaving `self` Empty.
    pub(crate) fn take(&mut self) -> Self {
        let empty = Self::new_in(self.alloc.clone());
        mem::replace(self, empty)
    }
}

impl<T, A: Allocator> Drop for SecretBuffer<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
