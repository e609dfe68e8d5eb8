// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Adapters for foreign `(pointer, length)` pairs.

use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::{Contiguous, ContiguousMut};

#[inline(always)]
fn non_null_or_dangling<T>(ptr: *mut T, len: usize) -> NonNull<T> {
    debug_assert!(!ptr.is_null() || len == 0, "null region with non-zero length");

    match NonNull::new(ptr) {
        Some(ptr) => ptr,
        None => NonNull::dangling(),
    }
}

/// A read-only region described by a raw pointer and a runtime item count.
///
/// Used to view memory owned by code outside Rust, e.g. buffers handed back by a
/// native library.
///
/// ```rust
/// use bastion_view::{RawRegion, ViewExt};
///
/// let backing = [10u16, 20, 30];
/// let region = unsafe { RawRegion::from_raw_parts(backing.as_ptr(), backing.len()) };
///
/// let tail = region.item_range_from(1).unwrap();
/// assert_eq!(tail.as_slice(), &[20, 30]);
/// ```
pub struct RawRegion<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

impl<T> Clone for RawRegion<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawRegion<'_, T> {}

impl<'a, T> RawRegion<'a, T> {
    /// Wraps `len` items starting at `ptr`.
    ///
    /// A null `ptr` is accepted when `len == 0`.
    ///
    /// # Safety
    ///
    /// For the lifetime `'a`, `ptr` must be aligned and valid for reads of `len`
    /// initialized items, and the memory must not be mutated through other pointers.
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self {
            ptr: non_null_or_dangling(ptr.cast_mut(), len),
            len,
            _marker: PhantomData,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the region holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Contiguous for RawRegion<'_, T> {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        // SAFETY: validity for `len` items over `'a` is the constructor's contract.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

/// A writable region described by a raw pointer and a runtime item count.
pub struct RawRegionMut<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T> RawRegionMut<'a, T> {
    /// Wraps `len` items starting at `ptr`.
    ///
    /// A null `ptr` is accepted when `len == 0`.
    ///
    /// # Safety
    ///
    /// For the lifetime `'a`, `ptr` must be aligned and valid for reads and writes of
    /// `len` initialized items, and no other pointer may access the memory.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Self {
            ptr: non_null_or_dangling(ptr, len),
            len,
            _marker: PhantomData,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the region holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Contiguous for RawRegionMut<'_, T> {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        // SAFETY: see `from_raw_parts`.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> ContiguousMut for RawRegionMut<'_, T> {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        // SAFETY: see `from_raw_parts`; `&mut self` guarantees exclusivity.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}
