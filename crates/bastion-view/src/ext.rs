// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Slicing entry points for every [`Contiguous`] container.

use zerocopy::{AsBytes, FromBytes};

use crate::bounds::StaticBounds;
use crate::{Contiguous, ContiguousMut, StaticExtent, View, ViewError, ViewMut};

/// Read-only slicing, implemented for every [`Contiguous`] type.
///
/// The `static_*` methods exist only for fixed-extent containers and check their
/// bounds at compile time:
///
/// ```rust
/// use bastion_view::ViewExt;
///
/// let block = [0u32; 4];
/// let head = block.static_byte_range::<0, 8>();
/// assert_eq!(head.len(), 8);
/// ```
///
/// ```compile_fail
/// use bastion_view::ViewExt;
///
/// let block = [0u32; 4];
/// let _ = block.static_byte_range::<0, 17>();
/// ```
///
/// ```compile_fail
/// use bastion_view::ViewExt;
///
/// let block = [0u8; 4];
/// let _ = block.static_item_range::<3, 2>();
/// ```
///
/// Runtime-sized containers have no static forms at all:
///
/// ```compile_fail
/// use bastion_view::ViewExt;
///
/// let data = vec![0u8; 4];
/// let _ = data.static_item_range::<0, 2>();
/// ```
pub trait ViewExt: Contiguous {
    /// A view of every item.
    #[inline(always)]
    fn view(&self) -> View<'_, Self::Item> {
        View::new(self.as_items())
    }

    /// A view of the items `[begin, end)`.
    #[inline]
    fn item_range(&self, begin: usize, end: usize) -> Result<View<'_, Self::Item>, ViewError> {
        self.view().item_range(begin, end)
    }

    /// A view of the items from `begin` to the end.
    #[inline]
    fn item_range_from(&self, begin: usize) -> Result<View<'_, Self::Item>, ViewError> {
        self.view().item_range_from(begin)
    }

    /// A byte view of the bytes `[begin, end)`.
    #[inline]
    fn byte_range(&self, begin: usize, end: usize) -> Result<View<'_, u8>, ViewError>
    where
        Self::Item: AsBytes,
    {
        self.view().byte_range(begin, end)
    }

    /// A byte view from byte `begin` to the end.
    #[inline]
    fn byte_range_from(&self, begin: usize) -> Result<View<'_, u8>, ViewError>
    where
        Self::Item: AsBytes,
    {
        self.view().byte_range_from(begin)
    }

    /// Items `[B, E)`, checked at compile time.
    #[inline]
    fn static_item_range<const B: usize, const E: usize>(&self) -> View<'_, Self::Item>
    where
        Self: StaticExtent,
    {
        let () = StaticBounds::<Self, B, E>::ITEMS;
        View::new(&self.as_items()[B..E])
    }

    /// Items from `B` to the end, checked at compile time.
    #[inline]
    fn static_item_range_from<const B: usize>(&self) -> View<'_, Self::Item>
    where
        Self: StaticExtent,
    {
        let () = StaticBounds::<Self, B, 0>::ITEMS_FROM;
        View::new(&self.as_items()[B..])
    }

    /// Bytes `[B, E)`, checked at compile time.
    #[inline]
    fn static_byte_range<const B: usize, const E: usize>(&self) -> View<'_, u8>
    where
        Self: StaticExtent,
        Self::Item: AsBytes,
    {
        let () = StaticBounds::<Self, B, E>::BYTES;
        View::new(&self.as_items().as_bytes()[B..E])
    }

    /// Bytes from `B` to the end, checked at compile time.
    #[inline]
    fn static_byte_range_from<const B: usize>(&self) -> View<'_, u8>
    where
        Self: StaticExtent,
        Self::Item: AsBytes,
    {
        let () = StaticBounds::<Self, B, 0>::BYTES_FROM;
        View::new(&self.as_items().as_bytes()[B..])
    }
}

impl<C: Contiguous + ?Sized> ViewExt for C {}

/// Mutable slicing, implemented for every [`ContiguousMut`] type.
///
/// Mutable byte views additionally require `Item: FromBytes`, so that any bytes
/// written through the view still form valid items.
pub trait ViewMutExt: ContiguousMut {
    /// A mutable view of every item.
    #[inline(always)]
    fn view_mut(&mut self) -> ViewMut<'_, Self::Item> {
        ViewMut::new(self.as_items_mut())
    }

    /// A mutable view of the items `[begin, end)`.
    #[inline]
    fn item_range_mut(
        &mut self,
        begin: usize,
        end: usize,
    ) -> Result<ViewMut<'_, Self::Item>, ViewError> {
        self.view_mut().item_range_mut(begin, end)
    }

    /// A mutable view of the items from `begin` to the end.
    #[inline]
    fn item_range_from_mut(&mut self, begin: usize) -> Result<ViewMut<'_, Self::Item>, ViewError> {
        self.view_mut().item_range_from_mut(begin)
    }

    /// A mutable byte view of the bytes `[begin, end)`.
    #[inline]
    fn byte_range_mut(&mut self, begin: usize, end: usize) -> Result<ViewMut<'_, u8>, ViewError>
    where
        Self::Item: AsBytes + FromBytes,
    {
        self.view_mut().byte_range_mut(begin, end)
    }

    /// A mutable byte view from byte `begin` to the end.
    #[inline]
    fn byte_range_from_mut(&mut self, begin: usize) -> Result<ViewMut<'_, u8>, ViewError>
    where
        Self::Item: AsBytes + FromBytes,
    {
        self.view_mut().byte_range_from_mut(begin)
    }

    /// Items `[B, E)`, checked at compile time.
    #[inline]
    fn static_item_range_mut<const B: usize, const E: usize>(&mut self) -> ViewMut<'_, Self::Item>
    where
        Self: StaticExtent,
    {
        let () = StaticBounds::<Self, B, E>::ITEMS;
        ViewMut::new(&mut self.as_items_mut()[B..E])
    }

    /// Items from `B` to the end, checked at compile time.
    #[inline]
    fn static_item_range_from_mut<const B: usize>(&mut self) -> ViewMut<'_, Self::Item>
    where
        Self: StaticExtent,
    {
        let () = StaticBounds::<Self, B, 0>::ITEMS_FROM;
        ViewMut::new(&mut self.as_items_mut()[B..])
    }

    /// Bytes `[B, E)`, checked at compile time.
    #[inline]
    fn static_byte_range_mut<const B: usize, const E: usize>(&mut self) -> ViewMut<'_, u8>
    where
        Self: StaticExtent,
        Self::Item: AsBytes + FromBytes,
    {
        let () = StaticBounds::<Self, B, E>::BYTES;
        ViewMut::new(&mut self.as_items_mut().as_bytes_mut()[B..E])
    }

    /// Bytes from `B` to the end, checked at compile time.
    #[inline]
    fn static_byte_range_from_mut<const B: usize>(&mut self) -> ViewMut<'_, u8>
    where
        Self: StaticExtent,
        Self::Item: AsBytes + FromBytes,
    {
        let () = StaticBounds::<Self, B, 0>::BYTES_FROM;
        ViewMut::new(&mut self.as_items_mut().as_bytes_mut()[B..])
    }
}

impl<C: ContiguousMut + ?Sized> ViewMutExt for C {}
