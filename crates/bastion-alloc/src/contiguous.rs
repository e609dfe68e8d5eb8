// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! View adapters for the secret containers.
//!
//! ```rust
//! use bastion_alloc::{SecretArray, SecretVec};
//! use bastion_view::{ViewExt, ViewMutExt};
//!
//! let mut nonce = SecretArray::<u8, 12>::new();
//! nonce.static_item_range_mut::<0, 4>().as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);
//! assert_eq!(nonce.static_byte_range_from::<8>().len(), 4);
//!
//! let key = SecretVec::<u32>::from_slice(&[1, 2, 3, 4]).unwrap();
//! assert_eq!(key.byte_range(4, 8).unwrap().len(), 4);
//! ```

use allocator_api2::alloc::Allocator;
use bastion_view::{Contiguous, ContiguousMut, StaticExtent};
use zerocopy::FromZeroes;

use crate::{SecretArray, SecretString, SecretVec};

impl<T, A: Allocator> Contiguous for SecretVec<T, A> {
    type Item = T;

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> ContiguousMut for SecretVec<T, A> {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// Items are the content bytes; the terminator is not part of any view.
impl<A: Allocator> Contiguous for SecretString<A> {
    type Item = u8;

    #[inline(always)]
    fn as_items(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<T: FromZeroes, const N: usize> Contiguous for SecretArray<T, N> {
    type Item = T;

    const STATIC_COUNT: Option<usize> = Some(N);

    #[inline(always)]
    fn as_items(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: FromZeroes, const N: usize> ContiguousMut for SecretArray<T, N> {
    #[inline(always)]
    fn as_items_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: FromZeroes, const N: usize> StaticExtent for SecretArray<T, N> {
    const COUNT: usize = N;
}
