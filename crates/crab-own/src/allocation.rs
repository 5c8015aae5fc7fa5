//! Scalar vs array allocation shapes.
//!
//! [`ExclusiveOwner`](crate::ExclusiveOwner) is one type for both a single
//! value and a fixed-length array. The [`Allocation`] trait is implemented
//! for every sized `T` (the scalar shape) and for `[T]` (the array shape)
//! and decides what raw representation crosses the manual-management
//! boundary in [`wrap_unchecked`](crate::ExclusiveOwner::wrap_unchecked) and
//! [`unwrap`](crate::ExclusiveOwner::unwrap).

#![allow(unsafe_code)]

use std::ptr::{self, NonNull};

use crab_core::{invariant, InvariantViolation};

mod private {
    pub trait Sealed {}

    impl<T> Sealed for T {}
    impl<T> Sealed for [T] {}
}

/// The shape of an owned heap allocation.
///
/// Sealed: implemented for every sized `T` and for `[T]`.
pub trait Allocation: private::Sealed {
    /// What an owner of this shape hands out when released: `*mut T` for a
    /// scalar, `(*mut T, usize)` (pointer and element count) for an array.
    type Raw;

    /// Whether this is the array shape.
    const IS_ARRAY: bool;

    /// Split an owned pointer into its raw representation.
    fn into_raw(ptr: NonNull<Self>) -> Self::Raw;

    /// Rebuild an owned pointer from its raw representation.
    ///
    /// A null address is rejected by the invariant checks.
    ///
    /// # Safety
    ///
    /// The address must be non-null. Ownership is not validated here.
    unsafe fn from_raw(raw: Self::Raw) -> NonNull<Self>;
}

impl<T> Allocation for T {
    type Raw = *mut T;

    const IS_ARRAY: bool = false;

    fn into_raw(ptr: NonNull<T>) -> *mut T {
        ptr.as_ptr()
    }

    unsafe fn from_raw(raw: *mut T) -> NonNull<T> {
        invariant!(
            !raw.is_null(),
            InvariantViolation::NullPointer {
                context: "ExclusiveOwner::wrap_unchecked"
            }
        );
        // SAFETY: non-null is the caller's contract, checked above when
        // checks are enabled.
        unsafe { NonNull::new_unchecked(raw) }
    }
}

impl<T> Allocation for [T] {
    type Raw = (*mut T, usize);

    const IS_ARRAY: bool = true;

    fn into_raw(ptr: NonNull<[T]>) -> (*mut T, usize) {
        (ptr.as_ptr().cast::<T>(), ptr.len())
    }

    unsafe fn from_raw((data, len): (*mut T, usize)) -> NonNull<[T]> {
        invariant!(
            !data.is_null(),
            InvariantViolation::NullPointer {
                context: "ExclusiveOwner::wrap_unchecked"
            }
        );
        // SAFETY: as for the scalar shape; the slice metadata is just `len`.
        unsafe { NonNull::new_unchecked(ptr::slice_from_raw_parts_mut(data, len)) }
    }
}
