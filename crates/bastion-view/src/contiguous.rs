// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Classification of container types.
//!
//! The set of sliceable containers is closed and explicit: a type is viewable exactly
//! when it implements [`Contiguous`]. Containers whose elements are not laid out in one
//! block have no implementation and are rejected at compile time:
//!
//! ```compile_fail
//! use std::collections::LinkedList;
//! use bastion_view::ViewExt;
//!
//! let list: LinkedList<u8> = LinkedList::new();
//! let _ = list.view();
//! ```
//!
//! ```compile_fail
//! use std::collections::VecDeque;
//! use bastion_view::ViewExt;
//!
//! let ring: VecDeque<u8> = VecDeque::new();
//! let _ = ring.item_range(0, 0);
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A container whose items occupy one contiguous block of memory.
///
/// Implementing this trait is what makes a type sliceable. The associated constants
/// expose the classification facts: the item type, the item size in bytes and, for
/// fixed-extent containers, the count.
pub trait Contiguous {
    /// Element type.
    type Item;

    /// Item count when it is part of the type, `None` for runtime-sized containers.
    const STATIC_COUNT: Option<usize> = None;

    /// `true` if the count is known at compile time.
    const IS_STATIC: bool = Self::STATIC_COUNT.is_some();

    /// Size of one item in bytes.
    const ELEMENT_SIZE: usize = core::mem::size_of::<Self::Item>();

    /// Borrows the items as a slice.
    fn as_items(&self) -> &[Self::Item];
}

/// A [`Contiguous`] container that can hand out its items mutably.
pub trait ContiguousMut: Contiguous {
    /// Borrows the items as a mutable slice.
    fn as_items_mut(&mut self) -> &mut [Self::Item];
}

/// A [`Contiguous`] container whose count is fixed by its type.
///
/// Only these containers offer the compile-time-checked `static_*` slicing forms.
pub trait StaticExtent: Contiguous {
    /// Number of items.
    const COUNT: usize;
}

// =============================================================================
// Fixed-size arrays
// =============================================================================

impl<T, const N: usize> Contiguous for [T; N] {
    type Item = T;

    const STATIC_COUNT: Option<usize> = Some(N);

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> ContiguousMut for [T; N] {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> StaticExtent for [T; N] {
    const COUNT: usize = N;
}

// =============================================================================
// Slices and owned dynamic arrays
// =============================================================================

impl<T> Contiguous for [T] {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        self
    }
}

impl<T> ContiguousMut for [T] {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Contiguous for Vec<T> {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> ContiguousMut for Vec<T> {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Contiguous for Box<[T]> {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        self
    }
}

impl<T> ContiguousMut for Box<[T]> {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        self
    }
}

// =============================================================================
// Strings
// =============================================================================
// Items are UTF-8 code units. Strings are read-only through views: arbitrary byte
// writes could break the encoding.

impl Contiguous for str {
    type Item = u8;

    #[inline(always)]
    fn as_items(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Contiguous for String {
    type Item = u8;

    #[inline(always)]
    fn as_items(&self) -> &[u8] {
        self.as_bytes()
    }
}
