//! Non-owning borrow views.
//!
//! A [`Ref`] or [`RefMut`] is a plain address with a lifetime attached. It
//! never participates in deallocation. Owning handles hand these out through
//! explicit `as_view` calls so that every borrow is visible at the call site.

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::InvariantViolation;
use crate::invariant;

/// A read-only, non-owning view of a `T`.
pub struct Ref<'a, T: ?Sized> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: ?Sized> Ref<'a, T> {
    /// View an existing shared reference.
    pub fn new(value: &'a T) -> Self {
        Self {
            ptr: NonNull::from(value),
            _marker: PhantomData,
        }
    }

    /// View the value at `ptr`.
    ///
    /// A null `ptr` is rejected by the invariant checks.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live, initialised `T` that is not mutated for
    /// the whole of `'a`.
    pub unsafe fn from_ptr_unchecked(ptr: *const T) -> Self {
        invariant!(
            !ptr.is_null(),
            InvariantViolation::NullPointer {
                context: "Ref::from_ptr_unchecked"
            }
        );
        Self {
            // SAFETY: non-null is the caller's contract, checked above when
            // checks are enabled.
            ptr: unsafe { NonNull::new_unchecked(ptr.cast_mut()) },
            _marker: PhantomData,
        }
    }

    /// The viewed address.
    pub fn as_ptr(this: Self) -> *const T {
        this.ptr.as_ptr()
    }

    /// Unwrap into a plain reference with the view's lifetime.
    pub fn get(this: Self) -> &'a T {
        // SAFETY: construction guarantees a live `T` for `'a`.
        unsafe { this.ptr.as_ref() }
    }
}

impl<T: ?Sized> Clone for Ref<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Ref<'_, T> {}

// SAFETY: a `Ref` is semantically a `&T`.
unsafe impl<T: ?Sized + Sync> Send for Ref<'_, T> {}
// SAFETY: as above.
unsafe impl<T: ?Sized + Sync> Sync for Ref<'_, T> {}

impl<T: ?Sized> Deref for Ref<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: construction guarantees a live `T` for the view's lifetime.
        unsafe { self.ptr.as_ref() }
    }
}

impl<'a, T: ?Sized> From<&'a T> for Ref<'a, T> {
    fn from(value: &'a T) -> Self {
        Self::new(value)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Ref<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Ref<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// An exclusive, non-owning view of a `T`.
pub struct RefMut<'a, T: ?Sized> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: ?Sized> RefMut<'a, T> {
    /// View an existing exclusive reference.
    pub fn new(value: &'a mut T) -> Self {
        Self {
            ptr: NonNull::from(value),
            _marker: PhantomData,
        }
    }

    /// View the value at `ptr` mutably.
    ///
    /// A null `ptr` is rejected by the invariant checks.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live, initialised `T` with no other live
    /// reference to it for the whole of `'a`.
    pub unsafe fn from_ptr_unchecked(ptr: *mut T) -> Self {
        invariant!(
            !ptr.is_null(),
            InvariantViolation::NullPointer {
                context: "RefMut::from_ptr_unchecked"
            }
        );
        Self {
            // SAFETY: non-null is the caller's contract, checked above when
            // checks are enabled.
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            _marker: PhantomData,
        }
    }

    /// The viewed address.
    pub fn as_ptr(this: &Self) -> *mut T {
        this.ptr.as_ptr()
    }

    /// Give up exclusivity and keep a read-only view for the same lifetime.
    pub fn into_ref(this: Self) -> Ref<'a, T> {
        Ref {
            ptr: this.ptr,
            _marker: PhantomData,
        }
    }

    /// Unwrap into a plain exclusive reference with the view's lifetime.
    pub fn get(this: Self) -> &'a mut T {
        let mut ptr = this.ptr;
        // SAFETY: construction guarantees a live, unaliased `T` for `'a`,
        // and `this` is consumed so no second path to it remains.
        unsafe { ptr.as_mut() }
    }
}

// SAFETY: a `RefMut` is semantically a `&mut T`.
unsafe impl<T: ?Sized + Send> Send for RefMut<'_, T> {}
// SAFETY: as above.
unsafe impl<T: ?Sized + Sync> Sync for RefMut<'_, T> {}

impl<T: ?Sized> Deref for RefMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: construction guarantees a live `T` for the view's lifetime.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: ?Sized> DerefMut for RefMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: construction guarantees exclusive access for the view's
        // lifetime and `&mut self` keeps it exclusive.
        unsafe { self.ptr.as_mut() }
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for RefMut<'a, T> {
    fn from(value: &'a mut T) -> Self {
        Self::new(value)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for RefMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for RefMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_reads_through() {
        let value = 17u32;
        let view = Ref::new(&value);
        let copy = view;
        assert_eq!(*view, 17);
        assert_eq!(*copy, 17);
        assert_eq!(Ref::as_ptr(view), &value as *const u32);
    }

    #[test]
    fn ref_mut_writes_through() {
        let mut value = vec![1, 2];
        {
            let mut view = RefMut::new(&mut value);
            view.push(3);
        }
        assert_eq!(value, [1, 2, 3]);
    }

    #[test]
    fn ref_mut_downgrades() {
        let mut value = String::from("crab");
        let view = RefMut::into_ref(RefMut::new(&mut value));
        assert_eq!(view.len(), 4);
        assert_eq!(view.to_string(), "crab");
    }

    #[test]
    fn from_valid_pointer() {
        let value = [1u8, 2, 3];
        // SAFETY: `value` outlives the view and is not mutated.
        let view = unsafe { Ref::from_ptr_unchecked(&value as *const [u8; 3]) };
        assert_eq!(view[2], 3);
    }

    #[test]
    #[should_panic(expected = "null pointer passed to Ref::from_ptr_unchecked")]
    fn null_pointer_is_fatal() {
        // SAFETY: deliberately violated; the check fires before any read.
        let _ = unsafe { Ref::<u8>::from_ptr_unchecked(std::ptr::null()) };
    }

    #[test]
    #[should_panic(expected = "null pointer passed to RefMut::from_ptr_unchecked")]
    fn null_mut_pointer_is_fatal() {
        // SAFETY: deliberately violated; the check fires before any write.
        let _ = unsafe { RefMut::<u8>::from_ptr_unchecked(std::ptr::null_mut()) };
    }

    #[test]
    fn debug_forwards() {
        let value = Some(2);
        assert_eq!(format!("{:?}", Ref::new(&value)), "Some(2)");
    }
}
