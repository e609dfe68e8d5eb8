// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{Contiguous, StaticExtent, View, ViewExt};

fn classify<C: Contiguous + ?Sized>() -> (bool, usize, Option<usize>) {
    (C::IS_STATIC, C::ELEMENT_SIZE, C::STATIC_COUNT)
}

#[test]
fn test_array_is_static() {
    assert_eq!(classify::<[u32; 5]>(), (true, 4, Some(5)));
    assert_eq!(<[u64; 3] as StaticExtent>::COUNT, 3);
}

#[test]
fn test_dynamic_containers() {
    assert_eq!(classify::<Vec<u16>>(), (false, 2, None));
    assert_eq!(classify::<[u8]>(), (false, 1, None));
    assert_eq!(classify::<Box<[u64]>>(), (false, 8, None));
    assert_eq!(classify::<View<'static, u32>>(), (false, 4, None));
}

#[test]
fn test_strings_are_byte_containers() {
    assert_eq!(classify::<String>(), (false, 1, None));
    assert_eq!(classify::<str>(), (false, 1, None));

    let s = String::from("héllo");
    assert_eq!(s.view().len(), s.len());
    assert_eq!("abc".item_range(1, 3).map(|v| v.as_slice()), Ok(&b"bc"[..]));
}

#[test]
fn test_zero_sized_items() {
    let units = [(); 4];

    assert_eq!(classify::<[(); 4]>(), (true, 0, Some(4)));
    assert_eq!(units.view().size_bytes(), 0);
    assert_eq!(units.item_range(1, 3).map(|v| v.len()), Ok(2));
}

#[test]
fn test_boxed_slice_and_vec_agree() {
    let vec = vec![1u8, 2, 3];
    let boxed: Box<[u8]> = vec.clone().into_boxed_slice();

    assert_eq!(vec.view().as_slice(), boxed.view().as_slice());
}
