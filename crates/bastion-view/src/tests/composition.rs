// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::{ViewError, ViewExt};

#[test]
fn test_nested_view_is_checked_against_parent_only() {
    let data = [0u8; 16];
    let parent = data.item_range(4, 8).expect("valid range");

    // Valid for the container, not for the parent.
    assert_eq!(
        parent.item_range(0, 6),
        Err(ViewError::OutOfRange {
            requested: 6,
            extent: 4
        })
    );
}

#[test]
fn test_byte_view_of_item_view() {
    let data = [0x01u16, 0x02, 0x03, 0x04];

    let items = data.item_range(1, 3).expect("valid range");
    let bytes = items.byte_range(2, 4).expect("valid range");

    assert_eq!(bytes.as_slice(), &0x03u16.to_ne_bytes());
    assert_eq!(bytes, data.byte_range(4, 6).expect("valid range"));
}

fn range_strategy() -> impl Strategy<Value = (usize, usize, usize, usize, usize)> {
    (0usize..64).prop_flat_map(|n| {
        (Just(n), 0..=n).prop_flat_map(|(n, b1)| {
            (Just(n), Just(b1), b1..=n).prop_flat_map(|(n, b1, e1)| {
                let inner = e1 - b1;
                (Just(n), Just(b1), Just(e1), 0..=inner).prop_flat_map(move |(n, b1, e1, b2)| {
                    (Just(n), Just(b1), Just(e1), Just(b2), b2..=inner)
                })
            })
        })
    })
}

proptest! {
    #[test]
    fn prop_nested_item_range_equals_flat((n, b1, e1, b2, e2) in range_strategy()) {
        let data: Vec<u32> = (0..n as u32).collect();

        let nested = data
            .item_range(b1, e1)
            .and_then(|v| v.item_range(b2, e2))
            .expect("valid nested range");
        let flat = data.item_range(b1 + b2, b1 + e2).expect("valid flat range");

        prop_assert!(nested.same_region(&flat));
    }

    #[test]
    fn prop_byte_range_matches_slice_bytes(n in 0usize..32, b in 0usize..160, e in 0usize..160) {
        let data: Vec<u32> = (0..n as u32).collect();
        let extent = n * 4;

        match data.byte_range(b, e) {
            Ok(view) => {
                prop_assert!(b <= e && e <= extent);
                prop_assert_eq!(view.as_slice(), &data.view().as_bytes()[b..e]);
            }
            Err(ViewError::InvalidArgument { .. }) => prop_assert!(b > e),
            Err(ViewError::OutOfRange { requested, extent: reported }) => {
                prop_assert!(b <= e);
                prop_assert_eq!(requested, e);
                prop_assert_eq!(reported, extent);
            }
        }
    }
}
