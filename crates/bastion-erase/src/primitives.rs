// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Erasure for primitive scalars.

use bastion_util::{erase_primitive, is_region_erased};

use crate::{ErasureProbe, SecureErase};

macro_rules! impl_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl SecureErase for $t {
                #[inline(always)]
                fn secure_erase(&mut self) {
                    erase_primitive(self);
                }
            }

            impl ErasureProbe for $t {
                #[inline(always)]
                fn is_erased(&self) -> bool {
                    // Byte-level check: `-0.0 == 0.0` must not count as erased.
                    // SAFETY: `self` is readable for `size_of::<$t>()` bytes.
                    unsafe {
                        is_region_erased(
                            (self as *const $t).cast::<u8>(),
                            core::mem::size_of::<$t>(),
                        )
                    }
                }
            }
        )*
    };
}

impl_primitive!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, f32, f64,
);
