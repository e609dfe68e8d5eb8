// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use allocator_api2::alloc::Global;

use super::tracked;
use crate::{SecretAllocError, SecretAllocator};

// =============================================================================
// allocate()
// =============================================================================

#[test]
fn test_allocate_returns_zeroed_block() {
    let (counter, alloc) = tracked();

    let ptr = alloc.allocate::<u64>(8).expect("allocation");
    let block = unsafe { core::slice::from_raw_parts(ptr.as_ptr(), 8) };
    assert!(block.iter().all(|&w| w == 0));

    assert_eq!(counter.outstanding(), 8);
    assert_eq!(counter.allocations(), 1);

    unsafe { alloc.deallocate(Some(ptr), 8) };
}

#[test]
fn test_allocate_zero_elements_is_dangling() {
    let (counter, alloc) = tracked();

    let ptr = alloc.allocate::<u32>(0).expect("allocation");
    assert_eq!(ptr, core::ptr::NonNull::dangling());

    unsafe { alloc.deallocate(Some(ptr), 0) };

    assert_eq!(counter.outstanding(), 0);
    assert_eq!(counter.erased_blocks(), 0);
    assert_eq!(counter.erased_bytes(), 0);
}

#[test]
fn test_allocate_capacity_overflow() {
    let (counter, alloc) = tracked();

    let result = alloc.allocate::<u64>(usize::MAX);

    assert_eq!(result, Err(SecretAllocError::CapacityOverflow));
    assert_eq!(counter.allocations(), 0);
    assert_eq!(counter.outstanding(), 0);
}

#[test]
fn test_allocate_injected_failure_reports_bytes() {
    let (counter, alloc) = tracked();
    counter.fail_next();

    let result = alloc.allocate::<u32>(4);

    assert_eq!(result, Err(SecretAllocError::AllocationFailure { bytes: 16 }));
    assert_eq!(counter.allocations(), 0);
    assert_eq!(counter.outstanding(), 0);
}

#[test]
fn test_fail_after_lets_earlier_allocations_through() {
    let (counter, alloc) = tracked();
    counter.fail_after(2);

    let a = alloc.allocate::<u8>(1).expect("first");
    let b = alloc.allocate::<u8>(1).expect("second");
    assert!(alloc.allocate::<u8>(1).is_err());

    counter.clear_failures();
    let c = alloc.allocate::<u8>(1).expect("after clear");

    unsafe {
        alloc.deallocate(Some(a), 1);
        alloc.deallocate(Some(b), 1);
        alloc.deallocate(Some(c), 1);
    }
    assert_eq!(counter.outstanding(), 0);
}

// =============================================================================
// deallocate()
// =============================================================================

#[test]
fn test_deallocate_erases_whole_block() {
    let (counter, alloc) = tracked();

    let ptr = alloc.allocate::<u32>(4).expect("allocation");
    unsafe { core::slice::from_raw_parts_mut(ptr.as_ptr(), 4) }.fill(0xDEAD_BEEF);

    unsafe { alloc.deallocate(Some(ptr), 4) };

    assert_eq!(counter.outstanding(), 0);
    assert_eq!(counter.releases(), 1);
    assert_eq!(counter.erased_blocks(), 1);
    assert_eq!(counter.erased_bytes(), 16);
}

#[test]
fn test_deallocate_none_is_noop() {
    let (counter, alloc) = tracked();

    unsafe { alloc.deallocate::<u64>(None, 0) };

    assert_eq!(counter.releases(), 0);
}

#[test]
fn test_clones_share_counter_and_interoperate() {
    let (counter, alloc) = tracked();
    let other = alloc.clone();

    let ptr = alloc.allocate::<u16>(3).expect("allocation");
    unsafe { other.deallocate(Some(ptr), 3) };

    assert_eq!(counter.outstanding(), 0);
    assert_eq!(counter.erased_bytes(), 6);
}

#[test]
fn test_untracked_allocator_has_no_counter() {
    let alloc = SecretAllocator::new_in(Global);
    assert!(alloc.counter().is_none());

    let ptr = alloc.allocate::<u8>(16).expect("allocation");
    unsafe { alloc.deallocate(Some(ptr), 16) };
}

#[test]
fn test_debug_hides_state() {
    let (_, alloc) = tracked();
    assert_eq!(format!("{alloc:?}"), "SecretAllocator { .. }");
}
