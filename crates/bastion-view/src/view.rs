// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

use zerocopy::AsBytes;

use crate::bounds::{checked_range, checked_range_from};
use crate::{Contiguous, ViewError};

/// The `(pointer, element size, element count)` triple handed to native code.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ViewParts {
    /// First byte of the region.
    pub ptr: *const u8,
    /// Size of one element in bytes.
    pub elem_size: usize,
    /// Number of elements.
    pub count: usize,
}

impl ViewParts {
    /// Total length in bytes.
    pub fn size_bytes(&self) -> usize {
        self.elem_size * self.count
    }
}

/// A read-only, non-owning window onto a contiguous run of `T`.
///
/// Constructed through [`ViewExt`](crate::ViewExt) on any [`Contiguous`] container.
/// Slicing a view validates against the view's own extent only, so views compose.
pub struct View<'a, T> {
    items: &'a [T],
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

impl<T> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("elem_size", &self.elem_size())
            .field("count", &self.len())
            .finish()
    }
}

/// Two views are equal when they cover the same memory.
impl<T> PartialEq for View<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_region(other)
    }
}

impl<T> Eq for View<'_, T> {}

impl<'a, T> View<'a, T> {
    /// Views the whole slice.
    #[inline(always)]
    pub const fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    /// Size of one element in bytes.
    #[inline(always)]
    pub const fn elem_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    /// Number of elements.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the view covers no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Length in bytes.
    #[inline(always)]
    pub const fn size_bytes(&self) -> usize {
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

    /// The viewed elements, with the view's full lifetime.
    #[inline(always)]
    pub const fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Splits the view into the triple consumed by native operations.
    pub fn parts(&self) -> ViewParts {
        ViewParts {
            ptr: self.begin_bytes(),
            elem_size: self.elem_size(),
            count: self.len(),
        }
    }

    /// `true` if both views start at the same address and cover the same elements.
    pub fn same_region(&self, other: &View<'_, T>) -> bool {
        core::ptr::eq(self.begin(), other.begin()) && self.len() == other.len()
    }

    /// Sub-view of the elements `[begin, end)`.
    pub fn item_range(self, begin: usize, end: usize) -> Result<View<'a, T>, ViewError> {
        let range = checked_range(begin, end, self.len())?;
        Ok(View::new(&self.items[range]))
    }

    /// Sub-view of the elements from `begin` to the end of this view.
    pub fn item_range_from(self, begin: usize) -> Result<View<'a, T>, ViewError> {
        let range = checked_range_from(begin, self.len())?;
        Ok(View::new(&self.items[range]))
    }
}

impl<'a, T: AsBytes> View<'a, T> {
    /// The viewed elements reinterpreted as bytes.
    #[inline(always)]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.items.as_bytes()
    }

    /// The whole view as a byte view.
    #[inline(always)]
    pub fn byte_view(self) -> View<'a, u8> {
        View::new(self.as_bytes())
    }

    /// Byte view of the bytes `[begin, end)` of this view.
    pub fn byte_range(self, begin: usize, end: usize) -> Result<View<'a, u8>, ViewError> {
        let bytes = self.as_bytes();
        let range = checked_range(begin, end, bytes.len())?;
        Ok(View::new(&bytes[range]))
    }

    /// Byte view from byte `begin` to the end of this view.
    pub fn byte_range_from(self, begin: usize) -> Result<View<'a, u8>, ViewError> {
        let bytes = self.as_bytes();
        let range = checked_range_from(begin, bytes.len())?;
        Ok(View::new(&bytes[range]))
    }
}

impl<T> Contiguous for View<'_, T> {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        self.items
    }
}
