//! Single-owner heap handles.
//!
//! An [`ExclusiveOwner`] owns exactly one heap allocation, either a single
//! value (`ExclusiveOwner<T>`) or a fixed-length array
//! (`ExclusiveOwner<[T]>`). It is never null and never aliased: it cannot be
//! cloned, and moving it out of a binding makes that binding unusable at
//! compile time.
//!
//! ```compile_fail
//! use crab_own::ExclusiveOwner;
//!
//! let a = ExclusiveOwner::make(5);
//! let b = a;
//! assert_eq!(*a, 5); // `a` was moved into `b`
//! ```
//!
//! ```compile_fail
//! use crab_own::ExclusiveOwner;
//!
//! let a = ExclusiveOwner::make(5);
//! let b = a.clone(); // exclusive owners are not `Clone`
//! ```
//!
//! The allocation is freed exactly once: when the owner is dropped, or never
//! by the owner if it was given back with [`ExclusiveOwner::unwrap`].

#![allow(unsafe_code)]

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};

use crab_core::{invariant, InvariantViolation, Ref, RefMut};

use crate::allocation::Allocation;
use crate::raw;

/// Owned, non-null, non-aliased pointer to a heap value or array.
///
/// Most operations are associated functions (`ExclusiveOwner::unwrap(owner)`
/// rather than `owner.unwrap()`) so they never shadow methods of the pointee.
pub struct ExclusiveOwner<T: ?Sized> {
    ptr: NonNull<T>,
    _owns: PhantomData<T>,
}

// SAFETY: the owner is the only path to the allocation, so it is exactly as
// thread-safe as `T` itself (the same reasoning as `Box<T>`).
unsafe impl<T: ?Sized + Send> Send for ExclusiveOwner<T> {}
// SAFETY: `&ExclusiveOwner<T>` only hands out `&T`.
unsafe impl<T: ?Sized + Sync> Sync for ExclusiveOwner<T> {}

impl<T: ?Sized> ExclusiveOwner<T> {
    fn from_non_null(ptr: NonNull<T>) -> Self {
        Self {
            ptr,
            _owns: PhantomData,
        }
    }

    /// Give up ownership without running the destructor.
    fn into_non_null(this: Self) -> NonNull<T> {
        let this = ManuallyDrop::new(this);
        this.ptr
    }

    /// Take ownership of an existing `Box`.
    pub fn from_box(boxed: Box<T>) -> Self {
        Self::from_non_null(raw::from_box(boxed))
    }

    /// Hand the allocation back as a standard `Box`.
    pub fn into_box(this: Self) -> Box<T> {
        // SAFETY: every owner allocation is a `Box` allocation and `this` is
        // consumed, so it is rebuilt exactly once.
        unsafe { raw::into_box(Self::into_non_null(this)) }
    }

    /// Release ownership as a (possibly fat) raw pointer.
    ///
    /// Works for every pointee, including narrowed trait objects. The caller
    /// becomes responsible for freeing it, e.g. with [`from_raw`](Self::from_raw).
    pub fn into_raw(this: Self) -> *mut T {
        Self::into_non_null(this).as_ptr()
    }

    /// Reclaim a pointer produced by [`into_raw`](Self::into_raw) or by
    /// `Box::into_raw`.
    ///
    /// A null pointer is rejected by the invariant checks.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live `Box` allocation not owned by anything else.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        invariant!(
            !ptr.is_null(),
            InvariantViolation::NullPointer {
                context: "ExclusiveOwner::from_raw"
            }
        );
        // SAFETY: non-null is the caller's contract, checked above when
        // checks are enabled.
        Self::from_non_null(unsafe { NonNull::new_unchecked(ptr) })
    }

    /// Address of the owned value.
    pub fn as_ptr(this: &Self) -> *const T {
        this.ptr.as_ptr()
    }

    /// Mutable address of the owned value.
    pub fn as_mut_ptr(this: &mut Self) -> *mut T {
        this.ptr.as_ptr()
    }

    /// Borrow the owned value as a non-owning read-only view.
    pub fn as_view(this: &Self) -> Ref<'_, T> {
        Ref::new(&**this)
    }

    /// Borrow the owned value as a non-owning read-write view.
    pub fn as_view_mut(this: &mut Self) -> RefMut<'_, T> {
        RefMut::new(&mut **this)
    }

    /// Narrow ownership to a more general view of the same allocation.
    ///
    /// `coerce` performs the unsizing coercion, typically
    /// `|b| -> Box<dyn Trait> { b }` (see [`narrow!`](crate::narrow)). The
    /// value is not moved or reallocated: the narrowed owner points at the
    /// same address, and a coercion that returns a different allocation is
    /// an invariant violation.
    pub fn narrow<U: ?Sized>(
        this: Self,
        coerce: impl FnOnce(Box<T>) -> Box<U>,
    ) -> ExclusiveOwner<U> {
        let before = Self::as_ptr(&this);
        let narrowed = coerce(Self::into_box(this));
        let after: *const U = &*narrowed;
        invariant!(ptr::addr_eq(before, after), InvariantViolation::AddressChanged);
        ExclusiveOwner::from_box(narrowed)
    }
}

impl<T: ?Sized + Allocation> ExclusiveOwner<T> {
    /// Claim an existing heap allocation.
    ///
    /// For a scalar owner `raw` is the pointer. For an array owner it is the
    /// pointer and element count. A null pointer is rejected by the invariant
    /// checks; nothing else can be validated.
    ///
    /// # Safety
    ///
    /// The allocation must come from `Box::new` (scalar) or a boxed slice of
    /// exactly that length (array), and must not be owned by anything else.
    pub unsafe fn wrap_unchecked(raw: T::Raw) -> Self {
        // SAFETY: forwarded to the caller.
        Self::from_non_null(unsafe { T::from_raw(raw) })
    }

    /// Give up ownership and return the raw allocation.
    ///
    /// The owner is consumed and its destructor does not run: the caller is
    /// now responsible for freeing the allocation, for instance with
    /// [`wrap_unchecked`](Self::wrap_unchecked).
    #[must_use = "the allocation leaks unless it is freed or wrapped again"]
    pub fn unwrap(this: Self) -> T::Raw {
        T::into_raw(Self::into_non_null(this))
    }

    /// Alias of [`unwrap`](Self::unwrap).
    #[must_use = "the allocation leaks unless it is freed or wrapped again"]
    pub fn release(this: Self) -> T::Raw {
        Self::unwrap(this)
    }
}

impl<T> ExclusiveOwner<T> {
    /// Move `value` into a new heap allocation.
    pub fn make(value: T) -> Self {
        Self::from_non_null(raw::alloc(value))
    }

    /// Move the value back out, freeing the allocation.
    pub fn into_inner(this: Self) -> T {
        *Self::into_box(this)
    }
}

impl<T: Default> ExclusiveOwner<[T]> {
    /// Allocate `count` default-constructed elements.
    pub fn make_array(count: usize) -> Self {
        let elements: Box<[T]> = (0..count).map(|_| T::default()).collect();
        Self::from_non_null(raw::from_box(elements))
    }
}

impl<T: Clone> ExclusiveOwner<[T]> {
    /// Allocate `count` elements, each a clone of `fill`.
    pub fn make_array_filled(count: usize, fill: &T) -> Self {
        let elements = vec![fill.clone(); count].into_boxed_slice();
        Self::from_non_null(raw::from_box(elements))
    }
}

impl<T> ExclusiveOwner<[T]> {
    /// Take ownership of an existing boxed slice.
    pub fn from_boxed_slice(elements: Box<[T]>) -> Self {
        Self::from_non_null(raw::from_box(elements))
    }

    /// Number of elements recorded at construction.
    pub fn len(&self) -> usize {
        self.ptr.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: ?Sized> Drop for ExclusiveOwner<T> {
    fn drop(&mut self) {
        // SAFETY: the owner holds the only pointer to a `Box` allocation,
        // and `unwrap`/`into_box` bypass this destructor.
        unsafe { raw::dealloc(self.ptr) }
    }
}

impl<T: ?Sized> Deref for ExclusiveOwner<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the pointer is non-null and owned for as long as `self`.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: ?Sized> DerefMut for ExclusiveOwner<T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        unsafe { self.ptr.as_mut() }
    }
}

impl<T> Index<usize> for ExclusiveOwner<[T]> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        invariant!(index < len, InvariantViolation::IndexOutOfBounds { index, len });
        // SAFETY: in bounds, checked above when checks are enabled.
        unsafe { self.as_slice().get_unchecked(index) }
    }
}

impl<T> IndexMut<usize> for ExclusiveOwner<[T]> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        invariant!(index < len, InvariantViolation::IndexOutOfBounds { index, len });
        // SAFETY: in bounds, checked above when checks are enabled.
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }
}

impl<'a, T> IntoIterator for &'a ExclusiveOwner<[T]> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ExclusiveOwner<[T]> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> From<T> for ExclusiveOwner<T> {
    fn from(value: T) -> Self {
        Self::make(value)
    }
}

impl<T: ?Sized> From<Box<T>> for ExclusiveOwner<T> {
    fn from(boxed: Box<T>) -> Self {
        Self::from_box(boxed)
    }
}

impl<T> From<Vec<T>> for ExclusiveOwner<[T]> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_boxed_slice(elements.into_boxed_slice())
    }
}

impl<T: ?Sized> AsRef<T> for ExclusiveOwner<T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T: ?Sized> AsMut<T> for ExclusiveOwner<T> {
    fn as_mut(&mut self) -> &mut T {
        self
    }
}

impl<T: ?Sized> Borrow<T> for ExclusiveOwner<T> {
    fn borrow(&self) -> &T {
        self
    }
}

impl<T: ?Sized> BorrowMut<T> for ExclusiveOwner<T> {
    fn borrow_mut(&mut self) -> &mut T {
        self
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for ExclusiveOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for ExclusiveOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: ?Sized> fmt::Pointer for ExclusiveOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&Self::as_ptr(self), f)
    }
}

impl<T: ?Sized + PartialEq> PartialEq for ExclusiveOwner<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: ?Sized + Eq> Eq for ExclusiveOwner<T> {}

impl<T: ?Sized + PartialOrd> PartialOrd for ExclusiveOwner<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: ?Sized + Ord> Ord for ExclusiveOwner<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: ?Sized + Hash> Hash for ExclusiveOwner<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}
