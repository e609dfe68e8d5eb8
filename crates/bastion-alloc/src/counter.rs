// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Diagnostic counters for tests.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

const NEVER: usize = usize::MAX;

#[derive(Debug)]
struct CounterState {
    outstanding: AtomicIsize,
    allocations: AtomicUsize,
    releases: AtomicUsize,
    erased_blocks: AtomicUsize,
    erased_bytes: AtomicUsize,
    fail_after: AtomicUsize,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            outstanding: AtomicIsize::new(0),
            allocations: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            erased_blocks: AtomicUsize::new(0),
            erased_bytes: AtomicUsize::new(0),
            fail_after: AtomicUsize::new(NEVER),
        }
    }
}

/// Shared bookkeeping for secret allocations.
///
/// Attach one to a [`SecretAllocator`](crate::SecretAllocator) (or a tracked
/// [`SecretArray`](crate::SecretArray)) and every clone of that allocator reports
/// into it. Counters are per-instance, so tests running in parallel never interfere.
///
/// ```rust
/// use bastion_alloc::{SecretAllocator, SecretCounter, SecretVec};
///
/// let counter = SecretCounter::new();
/// let alloc = SecretAllocator::new().with_counter(counter.clone());
///
/// let mut v = SecretVec::<u32>::with_capacity_in(4, alloc).unwrap();
/// v.push(1).unwrap();
/// assert_eq!(counter.outstanding(), 4);
///
/// drop(v);
/// assert_eq!(counter.outstanding(), 0);
/// assert_eq!(counter.erased_bytes(), 16);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SecretCounter(Arc<CounterState>);

impl SecretCounter {
    /// A fresh counter with every figure at zero and no failure scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements currently allocated and not yet released.
    pub fn outstanding(&self) -> isize {
        self.0.outstanding.load(Ordering::SeqCst)
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.0.allocations.load(Ordering::SeqCst)
    }

    /// Blocks released so far.
    pub fn releases(&self) -> usize {
        self.0.releases.load(Ordering::SeqCst)
    }

    /// Non-empty blocks erased before release.
    pub fn erased_blocks(&self) -> usize {
        self.0.erased_blocks.load(Ordering::SeqCst)
    }

    /// Bytes erased before release.
    pub fn erased_bytes(&self) -> usize {
        self.0.erased_bytes.load(Ordering::SeqCst)
    }

    /// Lets the next `n` allocations succeed and fails every one after them.
    pub fn fail_after(&self, n: usize) {
        self.0.fail_after.store(n, Ordering::SeqCst);
    }

    /// Fails every allocation from now on.
    pub fn fail_next(&self) {
        self.fail_after(0);
    }

    /// Cancels any scheduled failure.
    pub fn clear_failures(&self) {
        self.0.fail_after.store(NEVER, Ordering::SeqCst);
    }

    pub(crate) fn should_fail(&self) -> bool {
        let remaining = &self.0.fail_after;
        match remaining.load(Ordering::SeqCst) {
            NEVER => false,
            0 => true,
            _ => {
                remaining.fetch_sub(1, Ordering::SeqCst);
                false
            }
        }
    }

    pub(crate) fn on_allocate(&self, count: usize) {
        self.0.allocations.fetch_add(1, Ordering::SeqCst);
        self.0
            .outstanding
            .fetch_add(count as isize, Ordering::SeqCst);
    }

    pub(crate) fn on_release(&self, count: usize, erased_bytes: usize) {
        self.0.releases.fetch_add(1, Ordering::SeqCst);
        self.0
            .outstanding
            .fetch_sub(count as isize, Ordering::SeqCst);

        if erased_bytes > 0 {
            self.0.erased_blocks.fetch_add(1, Ordering::SeqCst);
            self.0
                .erased_bytes
                .fetch_add(erased_bytes, Ordering::SeqCst);
        }
    }
}
