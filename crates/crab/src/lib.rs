//! Crab: heap ownership primitives with compile-time ownership intent.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Crab sub-crates. For most users, adding `crab` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use crab::prelude::*;
//!
//! // Exactly one owner.
//! let mut scores = ExclusiveOwner::<[u32]>::make_array_filled(4, &7);
//! scores[0] = 10;
//! assert_eq!(scores.iter().sum::<u32>(), 31);
//!
//! // Shared, freed on last release.
//! let name = SharedOwner::new(String::from("crab"));
//! let alias = name.clone();
//! assert_eq!(SharedOwner::count(&name), 2);
//! drop(name);
//! assert_eq!(alias.as_str(), "crab");
//!
//! // Restartable integer intervals.
//! let total: u32 = range(0, scores.len() as u32).into_iter().sum();
//! assert_eq!(total, 6);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `crab-core` | Invariant checks, check mode, violations, borrow views |
//! | [`own`] | `crab-own` | `ExclusiveOwner`, `SharedOwner`, allocation shapes |
//! | [`range`] | `crab-range` | `Interval` and its iterator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Invariant checks, check mode, violations, and borrow views (`crab-core`).
///
/// [`types::Ref`] and [`types::RefMut`] are also available in the [`prelude`].
pub use crab_core as types;

/// Owning handles (`crab-own`).
///
/// [`own::ExclusiveOwner`] for single ownership of a value or array,
/// [`own::SharedOwner`] for reference-counted read-only sharing.
pub use crab_own as own;

/// Integer intervals (`crab-range`).
pub use crab_range as range;

pub use crab_own::narrow;

/// Common imports for typical Crab usage.
///
/// ```rust
/// use crab::prelude::*;
/// ```
pub mod prelude {
    // Owners
    pub use crab_own::{narrow, Allocation, ExclusiveOwner, SharedOwner};

    // Borrow views
    pub use crab_core::{Ref, RefMut};

    // Checks
    pub use crab_core::{CheckMode, InvariantViolation, CHECK_MODE};

    // Intervals
    pub use crab_range::{range, range_inclusive, range_inclusive_to, range_to, Interval};
}
