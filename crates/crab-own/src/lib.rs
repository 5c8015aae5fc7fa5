//! Exclusive and reference-counted owning handles for heap values.
//!
//! Two independent handle types, both built on the global allocator:
//!
//! ```text
//! ExclusiveOwner<T>        one owner, move-only
//! ├── scalar  (T)          Box-style single value
//! └── array   ([T])        fixed length, bounds-checked indexing
//! SharedOwner<T>           many owners, read-only, non-atomic count
//! └── value + Cell<usize>  two allocations, freed together on last drop
//! ```
//!
//! Scalar and array owners share one type. The [`Allocation`] trait picks
//! the raw representation each variant hands out and takes back.
//!
//! # Invariant checks
//!
//! Null pointers handed to the unchecked constructors, out-of-range array
//! indices and corrupted shared pairs are caught by `crab_core::invariant!`
//! when checks are compiled in (debug builds, or the `checks` feature).
//! Otherwise they are undefined behaviour.
//!
//! # Unsafe code
//!
//! Every allocator call lives in the private `raw` module. The owner
//! modules opt in to `unsafe` for pointer dereferences only, each with a
//! `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod allocation;
pub mod exclusive;
mod raw;
pub mod shared;

pub use allocation::Allocation;
pub use exclusive::ExclusiveOwner;
pub use shared::SharedOwner;

/// Narrow an [`ExclusiveOwner`] to a trait-object (or other unsized) view of
/// the same allocation.
///
/// ```
/// use std::fmt::Display;
/// use crab_own::{narrow, ExclusiveOwner};
///
/// let owner = ExclusiveOwner::make(7u8);
/// let shown: ExclusiveOwner<dyn Display> = narrow!(owner => dyn Display);
/// assert_eq!(shown.to_string(), "7");
/// ```
#[macro_export]
macro_rules! narrow {
    ($owner:expr => $target:ty) => {
        $crate::ExclusiveOwner::narrow($owner, |boxed| -> ::std::boxed::Box<$target> { boxed })
    };
}
