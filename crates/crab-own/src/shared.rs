//! Reference-counted, read-only heap handles.
//!
//! A [`SharedOwner`] holds two allocations jointly with every clone of
//! itself: the value and a plain `Cell<usize>` counter. The counter always
//! equals the number of live handles. Cloning bumps it by exactly one,
//! moving leaves it alone, and dropping the last handle frees the value and
//! then the counter.
//!
//! The counter is not atomic, so a lineage of handles must stay on one
//! thread. The compiler enforces this (`SharedOwner` is neither `Send` nor
//! `Sync`):
//!
//! ```compile_fail
//! use crab_own::SharedOwner;
//!
//! let shared = SharedOwner::new(1);
//! std::thread::spawn(move || drop(shared));
//! ```
//!
//! Access is read-only:
//!
//! ```compile_fail
//! use crab_own::SharedOwner;
//!
//! let mut shared = SharedOwner::new(vec![1]);
//! shared.push(2);
//! ```

#![allow(unsafe_code)]

use std::borrow::Borrow;
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::ptr::{self, NonNull};

use crab_core::{invariant, InvariantViolation, Ref};

use crate::exclusive::ExclusiveOwner;
use crate::raw;

/// Shared, reference-counted owner of a heap value.
///
/// Operations are associated functions (`SharedOwner::count(&shared)`) so
/// they never shadow methods of the pointee.
pub struct SharedOwner<T: ?Sized> {
    data: NonNull<T>,
    count: NonNull<Cell<usize>>,
    _owns: PhantomData<T>,
}

/// Fail unless `data` and `count` are both non-null.
fn check_pair<T: ?Sized>(data: *const T, count: *const Cell<usize>) {
    invariant!(
        !data.is_null() && !count.is_null(),
        InvariantViolation::CorruptedPair {
            data_null: data.is_null(),
            count_null: count.is_null(),
        }
    );
}

impl<T: ?Sized> SharedOwner<T> {
    /// Adopt a checked pair without touching the counter.
    ///
    /// # Safety
    ///
    /// Both pointers must be live `Box` allocations shared only by handles of
    /// this lineage, and the counter must already account for the new handle.
    unsafe fn from_pair(data: *mut T, count: *mut Cell<usize>) -> Self {
        check_pair(data, count);
        // SAFETY: non-null checked above when checks are enabled; otherwise
        // the caller's contract.
        unsafe {
            Self {
                data: NonNull::new_unchecked(data),
                count: NonNull::new_unchecked(count),
                _owns: PhantomData,
            }
        }
    }

    /// Create a new handle on `(data, count)` and register it.
    ///
    /// # Safety
    ///
    /// As for [`from_pair`](Self::from_pair), except that the counter does
    /// not yet account for the new handle.
    unsafe fn attach(data: *mut T, count: *mut Cell<usize>) -> Self {
        // SAFETY: forwarded to the caller.
        let this = unsafe { Self::from_pair(data, count) };
        let counter = this.counter();
        match counter.get().checked_add(1) {
            Some(next) => counter.set(next),
            None => std::process::abort(),
        }
        this
    }

    fn counter(&self) -> &Cell<usize> {
        // SAFETY: the counter outlives every handle that points at it.
        unsafe { self.count.as_ref() }
    }

    /// Claim an existing heap allocation with a fresh counter.
    ///
    /// A null pointer is rejected by the invariant checks.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live `Box` allocation not owned by anything else.
    pub unsafe fn from_owned_unchecked(ptr: *mut T) -> Self {
        invariant!(
            !ptr.is_null(),
            InvariantViolation::NullPointer {
                context: "SharedOwner::from_owned_unchecked"
            }
        );
        let count = raw::alloc(Cell::new(0));
        // SAFETY: `ptr` is the caller's, `count` is fresh and at zero.
        unsafe { Self::attach(ptr, count.as_ptr()) }
    }

    /// Share a value that so far had a single owner.
    pub fn from_exclusive(owner: ExclusiveOwner<T>) -> Self {
        // SAFETY: exclusive owners hold `Box` allocations, and `into_raw`
        // gives up the only other claim on it.
        unsafe { Self::from_owned_unchecked(ExclusiveOwner::into_raw(owner)) }
    }

    /// Number of live handles sharing this value.
    pub fn count(this: &Self) -> usize {
        this.counter().get()
    }

    /// Whether two handles share the same allocation.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        ptr::addr_eq(this.data.as_ptr(), other.data.as_ptr())
    }

    /// Address of the shared value.
    pub fn as_ptr(this: &Self) -> *const T {
        this.data.as_ptr()
    }

    /// Borrow the shared value as a non-owning read-only view.
    pub fn as_view(this: &Self) -> Ref<'_, T> {
        Ref::new(&**this)
    }

    /// Give up this handle as its raw value and counter pointers.
    ///
    /// The counter keeps counting this handle until it is rebuilt with
    /// [`from_raw_parts`](Self::from_raw_parts).
    #[must_use = "the handle leaks unless it is rebuilt with `from_raw_parts`"]
    pub fn into_raw_parts(this: Self) -> (*const T, *const Cell<usize>) {
        let this = ManuallyDrop::new(this);
        (this.data.as_ptr(), this.count.as_ptr())
    }

    /// Rebuild a handle given up with [`into_raw_parts`](Self::into_raw_parts).
    ///
    /// A pair whose halves disagree on null-ness is rejected by the invariant
    /// checks.
    ///
    /// # Safety
    ///
    /// The pair must come from one call to `into_raw_parts` and be rebuilt at
    /// most once.
    pub unsafe fn from_raw_parts(data: *const T, count: *const Cell<usize>) -> Self {
        // SAFETY: forwarded to the caller; the counter still accounts for the
        // handle given up by `into_raw_parts`.
        unsafe { Self::from_pair(data.cast_mut(), count.cast_mut()) }
    }

    fn release(&mut self) {
        let remaining = {
            let counter = self.counter();
            let current = counter.get();
            invariant!(current > 0, InvariantViolation::CountUnderflow);
            let remaining = current.wrapping_sub(1);
            counter.set(remaining);
            remaining
        };
        if remaining == 0 {
            tracing::trace!(target: "crab::shared", "last handle released, freeing value");
            // SAFETY: no other handle is left, so nothing can observe either
            // allocation again. Value first, then counter.
            unsafe { raw::dealloc_pair(self.data, self.count) };
        }
    }
}

impl<T> SharedOwner<T> {
    /// Move `value` into a new shared allocation with a count of one.
    pub fn new(value: T) -> Self {
        let data = raw::alloc(value);
        let count = raw::alloc(Cell::new(0));
        // SAFETY: both allocations are fresh and the counter is at zero.
        unsafe { Self::attach(data.as_ptr(), count.as_ptr()) }
    }

    /// Move the value out if this is the only handle.
    ///
    /// Otherwise the handle is given back unchanged.
    pub fn try_unwrap(this: Self) -> Result<T, Self> {
        if Self::count(&this) != 1 {
            return Err(this);
        }
        let this = ManuallyDrop::new(this);
        // SAFETY: the count is one, so this handle is the only owner of both
        // allocations, and `ManuallyDrop` keeps `release` from running.
        unsafe {
            let value = *raw::into_box(this.data);
            raw::dealloc(this.count);
            Ok(value)
        }
    }
}

impl<T: ?Sized> Clone for SharedOwner<T> {
    fn clone(&self) -> Self {
        // SAFETY: `self` keeps the pair alive while the new handle registers.
        unsafe { Self::attach(self.data.as_ptr(), self.count.as_ptr()) }
    }
}

impl<T: ?Sized> Drop for SharedOwner<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: ?Sized> Deref for SharedOwner<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the value lives while any handle does.
        unsafe { self.data.as_ref() }
    }
}

impl<T> From<T> for SharedOwner<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: ?Sized> From<ExclusiveOwner<T>> for SharedOwner<T> {
    fn from(owner: ExclusiveOwner<T>) -> Self {
        Self::from_exclusive(owner)
    }
}

impl<T: ?Sized> AsRef<T> for SharedOwner<T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T: ?Sized> Borrow<T> for SharedOwner<T> {
    fn borrow(&self) -> &T {
        self
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for SharedOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for SharedOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: ?Sized> fmt::Pointer for SharedOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&Self::as_ptr(self), f)
    }
}

impl<T: ?Sized + PartialEq> PartialEq for SharedOwner<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: ?Sized + Eq> Eq for SharedOwner<T> {}

impl<T: ?Sized + PartialOrd> PartialOrd for SharedOwner<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: ?Sized + Ord> Ord for SharedOwner<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: ?Sized + Hash> Hash for SharedOwner<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}
