//! Low-level primitives for heap allocation and deallocation.
//!
//! The only module in this crate that talks to the allocator. Every owner
//! allocation goes through `Box`, so the scalar/array pairing of allocation
//! and deallocation is carried in the pointer metadata: a thin `NonNull<T>`
//! is freed as `Box<T>`, a `NonNull<[T]>` as `Box<[T]>`.

#![allow(unsafe_code)]

use std::ptr::NonNull;

/// Move `value` into a fresh scalar allocation.
pub(crate) fn alloc<T>(value: T) -> NonNull<T> {
    NonNull::from(Box::leak(Box::new(value)))
}

/// Hand a `Box` over to manual management.
pub(crate) fn from_box<T: ?Sized>(boxed: Box<T>) -> NonNull<T> {
    NonNull::from(Box::leak(boxed))
}

/// Rebuild the `Box` that owns `ptr`.
///
/// # Safety
///
/// `ptr` must come from [`alloc`], [`from_box`] or an
/// equivalent `Box` allocation, and must not be used again afterwards.
pub(crate) unsafe fn into_box<T: ?Sized>(ptr: NonNull<T>) -> Box<T> {
    // SAFETY: forwarded to the caller.
    unsafe { Box::from_raw(ptr.as_ptr()) }
}

/// Drop the pointee and release its allocation.
///
/// # Safety
///
/// Same contract as [`into_box`].
pub(crate) unsafe fn dealloc<T: ?Sized>(ptr: NonNull<T>) {
    // SAFETY: forwarded to the caller.
    drop(unsafe { into_box(ptr) });
}

/// Drop `first` then `second` and release both allocations.
///
/// Both boxes are rebuilt before either pointee is dropped, so `second` is
/// still freed when dropping `first` panics.
///
/// # Safety
///
/// Same contract as [`into_box`], for each pointer.
pub(crate) unsafe fn dealloc_pair<A: ?Sized, B: ?Sized>(first: NonNull<A>, second: NonNull<B>) {
    // SAFETY: forwarded to the caller.
    let (first, second) = unsafe { (into_box(first), into_box(second)) };
    drop(first);
    drop(second);
}
