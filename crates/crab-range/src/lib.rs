//! Restartable integer intervals.
//!
//! An [`Interval`] is a `Copy` description of `[min, max)`. Iterating it
//! always starts again from `min`, so one interval can drive any number of
//! loops:
//!
//! ```
//! use crab_range::{range, range_inclusive};
//!
//! let indices = range(2u32, 5);
//! assert_eq!(indices.into_iter().collect::<Vec<_>>(), [2, 3, 4]);
//! assert_eq!(indices.into_iter().sum::<u32>(), 9);
//!
//! assert_eq!(range_inclusive(-1i8, 1).into_iter().count(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod integer;
pub mod interval;

pub use integer::Integer;
pub use interval::{range, range_inclusive, range_inclusive_to, range_to, Interval, IntervalIter};
