// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Core erasure traits.

use super::sentinel::EraseSentinel;

/// Types that can overwrite their own contents with zeros.
///
/// Implementations must use writes the compiler cannot elide. This trait is
/// dyn-compatible, so heterogeneous values can be erased through
/// `&mut dyn SecureErase`.
pub trait SecureErase {
    /// Erases the value in place.
    fn secure_erase(&mut self);
}

/// Runtime check that a value holds no residual data.
///
/// ```rust
/// use bastion_erase::{ErasureProbe, SecureErase};
///
/// let mut pin: u32 = 1234;
/// assert!(!pin.is_erased());
///
/// pin.secure_erase();
/// assert!(pin.is_erased());
/// ```
pub trait ErasureProbe {
    /// Returns `true` if every byte of the value is zero.
    fn is_erased(&self) -> bool;
}

/// Types carrying an [`EraseSentinel`] that their `Drop` impl trips.
pub trait AssertEraseOnDrop {
    /// Clones the internal sentinel so it can be observed after the value is gone.
    ///
    /// The clone must share its flag with the value's own sentinel.
    fn clone_sentinel(&self) -> EraseSentinel;

    /// Drops `self` and asserts that erasure ran during the drop.
    ///
    /// The observer is reset before the drop, so an earlier explicit erasure of
    /// `self` does not mask a `Drop` that skips it.
    ///
    /// # Panics
    ///
    /// Panics if `clone_sentinel` hands out a detached flag, or if the drop path
    /// never erased the value.
    fn assert_erase_on_drop(self)
    where
        Self: Sized,
    {
        let type_name = core::any::type_name::<Self>();
        let mut observer = self.clone_sentinel();

        observer.secure_erase();
        assert!(
            self.clone_sentinel().is_erased(),
            "{type_name}: clone_sentinel returned a detached flag"
        );
        observer.reset();

        drop(self);
        assert!(observer.is_erased(), "{type_name}: drop did not erase the value");
    }
}
