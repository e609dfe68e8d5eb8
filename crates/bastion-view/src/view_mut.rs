// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

use zerocopy::{AsBytes, FromBytes};

use crate::bounds::{checked_range, checked_range_from};
use crate::{Contiguous, ContiguousMut, View, ViewError, ViewParts};

/// An exclusive, non-owning window onto a contiguous run of `T`.
///
/// The mutable counterpart of [`View`], typically used for output buffers that a
/// native operation writes into. Slicing consumes the view; call
/// [`reborrow`](Self::reborrow) to slice without giving it up.
///
/// ```rust
/// use bastion_view::{ViewError, ViewMutExt};
///
/// let mut out = [0u8; 8];
///
/// let mut tail = out.item_range_from_mut(4)?;
/// tail.as_mut_slice().fill(0xFF);
///
/// assert_eq!(out, [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
/// # Ok::<(), ViewError>(())
/// ```
pub struct ViewMut<'a, T> {
    items: &'a mut [T],
}

impl<T> fmt::Debug for ViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewMut")
            .field("elem_size", &self.elem_size())
            .field("count", &self.len())
            .finish()
    }
}

impl<'a, T> ViewMut<'a, T> {
    /// Views the whole slice.
    #[inline(always)]
    pub fn new(items: &'a mut [T]) -> Self {
        Self { items }
    }

    /// Size of one element in bytes.
    #[inline(always)]
    pub const fn elem_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    /// Number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the view covers no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Length in bytes.
    #[inline(always)]
    pub fn size_bytes(&self) -> usize {
        self.elem_size() * self.len()
    }

    /// Pointer to the first element.
    #[inline(always)]
    pub fn begin(&self) -> *const T {
        self.items.as_ptr_range().start
    }

    /// Pointer one past the last element.
    #[inline(always)]
    pub fn end(&self) -> *const T {
        self.items.as_ptr_range().end
    }

    /// [`begin`](Self::begin) as a byte pointer.
    #[inline(always)]
    pub fn begin_bytes(&self) -> *const u8 {
        self.begin().cast()
    }

    /// [`end`](Self::end) as a byte pointer.
    #[inline(always)]
    pub fn end_bytes(&self) -> *const u8 {
        self.end().cast()
    }

    /// Writable pointer to the first element.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.items.as_mut_ptr()
    }

    /// The viewed elements.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &*self.items
    }

    /// The viewed elements, mutably.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.items
    }

    /// Gives up the view and returns the underlying slice with its full lifetime.
    #[inline(always)]
    pub fn into_slice(self) -> &'a mut [T] {
        self.items
    }

    /// A shorter-lived mutable view of the same elements.
    #[inline(always)]
    pub fn reborrow(&mut self) -> ViewMut<'_, T> {
        ViewMut::new(&mut *self.items)
    }

    /// A read-only view of the same elements.
    #[inline(always)]
    pub fn as_view(&self) -> View<'_, T> {
        View::new(&*self.items)
    }

    /// Splits the view into the triple consumed by native operations.
    pub fn parts(&self) -> ViewParts {
        ViewParts {
            ptr: self.begin_bytes(),
            elem_size: self.elem_size(),
            count: self.len(),
        }
    }

    /// Sub-view of the elements `[begin, end)`.
    pub fn item_range_mut(self, begin: usize, end: usize) -> Result<ViewMut<'a, T>, ViewError> {
        let range = checked_range(begin, end, self.len())?;
        let items = self.items;
        Ok(ViewMut::new(&mut items[range]))
    }

    /// Sub-view of the elements from `begin` to the end of this view.
    pub fn item_range_from_mut(self, begin: usize) -> Result<ViewMut<'a, T>, ViewError> {
        let range = checked_range_from(begin, self.len())?;
        let items = self.items;
        Ok(ViewMut::new(&mut items[range]))
    }
}

impl<'a, T: AsBytes + FromBytes> ViewMut<'a, T> {
    /// The whole view as a writable byte view.
    #[inline(always)]
    pub fn byte_view_mut(self) -> ViewMut<'a, u8> {
        let items = self.items;
        ViewMut::new(items.as_bytes_mut())
    }

    /// Writable byte view of the bytes `[begin, end)` of this view.
    pub fn byte_range_mut(self, begin: usize, end: usize) -> Result<ViewMut<'a, u8>, ViewError> {
        let items = self.items;
        let bytes = items.as_bytes_mut();
        let range = checked_range(begin, end, bytes.len())?;
        Ok(ViewMut::new(&mut bytes[range]))
    }

    /// Writable byte view from byte `begin` to the end of this view.
    pub fn byte_range_from_mut(self, begin: usize) -> Result<ViewMut<'a, u8>, ViewError> {
        let items = self.items;
        let bytes = items.as_bytes_mut();
        let range = checked_range_from(begin, bytes.len())?;
        Ok(ViewMut::new(&mut bytes[range]))
    }
}

impl<T> Contiguous for ViewMut<'_, T> {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        &*self.items
    }
}

impl<T> ContiguousMut for ViewMut<'_, T> {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        &mut *self.items
    }
}
