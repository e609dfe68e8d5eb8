// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod allocator;
mod differential;

use crate::{SecretAllocator, SecretCounter};

/// Installs the test logger once; later calls are no-ops.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh counter and a global-heap allocator reporting into it.
pub(crate) fn tracked() -> (SecretCounter, SecretAllocator) {
    init_logging();

    let counter = SecretCounter::new();
    let alloc = SecretAllocator::new().with_counter(counter.clone());
    (counter, alloc)
}
