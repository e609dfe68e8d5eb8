// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bastion_util::{constant_time_eq, is_slice_erased};
use proptest::prelude::*;

#[test]
fn test_constant_time_eq_empty() {
    assert!(constant_time_eq(&[], &[]));
}

#[test]
fn test_constant_time_eq_length_mismatch() {
    assert!(!constant_time_eq(&[1, 2, 3], &[1, 2]));
}

#[test]
fn test_constant_time_eq_last_byte_differs() {
    assert!(!constant_time_eq(&[0, 0, 0, 1], &[0, 0, 0, 2]));
}

#[test]
fn test_is_slice_erased() {
    assert!(is_slice_erased(&[]));
    assert!(is_slice_erased(&[0; 32]));
    assert!(!is_slice_erased(&[0, 0, 1]));
}

proptest! {
    #[test]
    fn prop_constant_time_eq_matches_eq(a in proptest::collection::vec(any::<u8>(), 0..64),
                                        b in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(constant_time_eq(&a, &b), a == b);
        prop_assert!(constant_time_eq(&a, &a));
    }
}
