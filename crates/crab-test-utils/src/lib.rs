//! Test utilities and fixture types for Crab development.
//!
//! Provides instrumented stand-ins that record their own destruction
//! ([`DropCounter`], [`Tracked`]) and a small polymorphic hierarchy
//! ([`Shape`], [`Circle`], [`Square`]) for narrowing tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Circle, Shape, Square};

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared tally of how many [`Tracked`] values have been dropped.
///
/// Cloning the counter shares the tally, so a test can keep one handle and
/// give the others away.
#[derive(Clone, Default)]
pub struct DropCounter {
    drops: Arc<AtomicUsize>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so that dropping it bumps this counter.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        Tracked {
            value,
            drops: self.clone(),
        }
    }

    /// Number of tracked values dropped so far.
    pub fn count(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    pub(crate) fn record(&self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl fmt::Debug for DropCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropCounter")
            .field("drops", &self.count())
            .finish()
    }
}

/// A value that reports its own destruction to a [`DropCounter`].
///
/// Clones report to the same counter, so every clone counts as one more
/// drop when it goes away.
#[derive(Clone)]
pub struct Tracked<T> {
    value: T,
    drops: DropCounter,
}

impl<T> Tracked<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.drops.record();
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
