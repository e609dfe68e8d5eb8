// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::sync::Arc;
use core::ptr;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::{ErasureProbe, SecureErase};

/// Shared flag recording whether an owner ran its erasure path.
///
/// The flag starts pristine. Calling [`SecureErase::secure_erase`] on the sentinel
/// marks it erased; every clone observes the same flag, which is what lets a test
/// keep a clone alive past the owner's drop.
///
/// ```rust
/// use bastion_erase::{EraseSentinel, ErasureProbe, SecureErase};
///
/// let mut sentinel = EraseSentinel::default();
/// let observer = sentinel.clone();
///
/// assert!(!observer.is_erased());
/// sentinel.secure_erase();
/// assert!(observer.is_erased());
/// ```
#[derive(Clone, Debug)]
pub struct EraseSentinel(Arc<AtomicBool>);

impl EraseSentinel {
    /// Puts the flag back into the pristine state.
    pub fn reset(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Default for EraseSentinel {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl PartialEq for EraseSentinel {
    fn eq(&self, other: &Self) -> bool {
        self.0.load(Ordering::Relaxed) == other.0.load(Ordering::Relaxed)
    }
}

impl Eq for EraseSentinel {}

impl SecureErase for EraseSentinel {
    fn secure_erase(&mut self) {
        // SAFETY: `as_ptr` points into the live `AtomicBool` owned by the Arc.
        unsafe {
            ptr::write_volatile(self.0.as_ptr(), false);
        }
        core::sync::atomic::fence(Ordering::SeqCst);
    }
}

impl ErasureProbe for EraseSentinel {
    fn is_erased(&self) -> bool {
        !self.0.load(Ordering::Relaxed)
    }
}
