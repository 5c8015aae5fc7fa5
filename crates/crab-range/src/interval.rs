//! Half-open integer intervals and their iterator.

use std::iter::FusedIterator;

use crab_core::{invariant, InvariantViolation};

use crate::integer::Integer;

/// The integers in `[min, max)`.
///
/// Construction enforces `min <= max` through the invariant checks.
/// Inclusive intervals are stored as `[min, max + 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T: Integer> {
    min: T,
    max: T,
}

impl<T: Integer> Interval<T> {
    /// The interval `[min, max)`.
    #[track_caller]
    pub fn new(min: T, max: T) -> Self {
        invariant!(
            min <= max,
            InvariantViolation::InvalidInterval {
                min: min.to_string(),
                max: max.to_string(),
            }
        );
        Self { min, max }
    }

    /// The interval `[min, max]`.
    ///
    /// `max` must be below the largest value of `T`.
    #[track_caller]
    pub fn new_inclusive(min: T, max: T) -> Self {
        let end = max.checked_next();
        invariant!(
            end.is_some(),
            InvariantViolation::IntervalOverflow {
                max: max.to_string(),
            }
        );
        // Only reachable with checks disabled, where the precondition is the
        // caller's.
        Self::new(min, end.unwrap_or(T::MAX))
    }

    /// Smallest value in the interval.
    pub fn lower_bound(&self) -> T {
        self.min
    }

    /// One past the largest value in the interval.
    pub fn upper_bound(&self) -> T {
        self.max
    }

    /// Number of values, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        T::distance(self.min, self.max).unwrap_or(usize::MAX)
    }

    /// Whether the interval holds no values.
    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }

    /// Whether `value` lies in the interval.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value < self.max
    }

    /// A fresh iterator starting at the lower bound.
    pub fn iter(&self) -> IntervalIter<T> {
        IntervalIter {
            front: self.min,
            back: self.max,
        }
    }
}

impl<T: Integer> IntoIterator for Interval<T> {
    type Item = T;
    type IntoIter = IntervalIter<T>;

    fn into_iter(self) -> IntervalIter<T> {
        self.iter()
    }
}

impl<T: Integer> IntoIterator for &Interval<T> {
    type Item = T;
    type IntoIter = IntervalIter<T>;

    fn into_iter(self) -> IntervalIter<T> {
        self.iter()
    }
}

/// Iterator over an [`Interval`].
#[derive(Clone, Debug)]
pub struct IntervalIter<T: Integer> {
    front: T,
    back: T,
}

impl<T: Integer> Iterator for IntervalIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front < self.back {
            let value = self.front;
            self.front = value.next();
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match T::distance(self.front, self.back) {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl<T: Integer> DoubleEndedIterator for IntervalIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front < self.back {
            self.back = self.back.prev();
            Some(self.back)
        } else {
            None
        }
    }
}

impl<T: Integer> FusedIterator for IntervalIter<T> {}

// Widths whose every interval length fits in `usize` on all supported
// targets, mirroring which `std::ops::Range`s are exact-size.
macro_rules! impl_exact_size {
    ($($t:ty),* $(,)?) => {
        $(impl ExactSizeIterator for IntervalIter<$t> {})*
    };
}

impl_exact_size!(u8, u16, u32, usize, i8, i16, i32, isize);

/// `[min, max)`.
///
/// ```
/// let mut total = 0;
/// for i in crab_range::range(5usize, 100) {
///     total += i;
/// }
/// assert_eq!(total, (5..100).sum::<usize>());
/// ```
#[track_caller]
pub fn range<T: Integer>(min: T, max: T) -> Interval<T> {
    Interval::new(min, max)
}

/// `[0, max)`.
#[track_caller]
pub fn range_to<T: Integer>(max: T) -> Interval<T> {
    Interval::new(T::ZERO, max)
}

/// `[min, max]`.
#[track_caller]
pub fn range_inclusive<T: Integer>(min: T, max: T) -> Interval<T> {
    Interval::new_inclusive(min, max)
}

/// `[0, max]`.
#[track_caller]
pub fn range_inclusive_to<T: Integer>(max: T) -> Interval<T> {
    Interval::new_inclusive(T::ZERO, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_bounds() {
        let interval = range(3u8, 6);
        assert_eq!(interval.lower_bound(), 3);
        assert_eq!(interval.upper_bound(), 6);
        assert_eq!(interval.len(), 3);
        assert!(interval.contains(5));
        assert!(!interval.contains(6));
    }

    #[test]
    fn restartable() {
        let interval = range_to(4i32);
        let first: Vec<_> = interval.into_iter().collect();
        let second: Vec<_> = interval.iter().collect();
        assert_eq!(first, [0, 1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_interval_yields_nothing() {
        let interval = range(7u64, 7);
        assert!(interval.is_empty());
        assert_eq!(interval.iter().next(), None);
    }

    #[test]
    fn inclusive_includes_max() {
        assert_eq!(range_inclusive(1u16, 3).into_iter().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(range_inclusive_to(2usize).len(), 3);
    }

    #[test]
    fn reverse_iteration() {
        let values: Vec<_> = range(-2i64, 2).into_iter().rev().collect();
        assert_eq!(values, [1, 0, -1, -2]);
    }

    #[test]
    fn meets_in_the_middle() {
        let mut iter = range(0u32, 4).iter();
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn full_width_signed_range() {
        assert_eq!(range(i8::MIN, i8::MAX).iter().count(), 255);
    }

    #[test]
    fn full_width_pointer_ranges_are_exact_size() {
        assert_eq!(range(0usize, usize::MAX).iter().len(), usize::MAX);
        assert_eq!(range(isize::MIN, isize::MAX).iter().len(), usize::MAX);
        assert_eq!(range(0usize, usize::MAX).len(), usize::MAX);
    }

    #[test]
    fn wider_than_usize_has_no_upper_hint() {
        let iter = range(0u128, u128::MAX).iter();
        assert_eq!(iter.size_hint(), (usize::MAX, None));
        assert_eq!(range(0u128, u128::MAX).len(), usize::MAX);
    }

    #[test]
    #[should_panic(expected = "invalid interval: min 5 is greater than max 2")]
    fn inverted_bounds_are_fatal() {
        let _ = range(5u32, 2);
    }

    #[test]
    #[should_panic(expected = "invalid interval: min 0 is greater than max -3")]
    fn negative_range_to_is_fatal() {
        let _ = range_to(-3i32);
    }

    #[test]
    #[should_panic(expected = "inclusive interval upper bound 255 overflows its type")]
    fn inclusive_at_type_max_is_fatal() {
        let _ = range_inclusive(0u8, u8::MAX);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn matches_std_range(min in -1000i32..1000, span in 0i32..200) {
                let max = min + span;
                let ours: Vec<_> = range(min, max).into_iter().collect();
                let std: Vec<_> = (min..max).collect();
                prop_assert_eq!(ours, std);
            }

            #[test]
            fn len_matches_iteration_count(min in 0u16..500, span in 0u16..500) {
                let interval = range(min, min + span);
                prop_assert_eq!(interval.len(), interval.iter().count());
                prop_assert_eq!(interval.iter().len(), span as usize);
            }

            #[test]
            fn inclusive_matches_std(min in -100i64..100, span in 0i64..100) {
                let max = min + span;
                let ours: Vec<_> = range_inclusive(min, max).into_iter().collect();
                let std: Vec<_> = (min..=max).collect();
                prop_assert_eq!(ours, std);
            }
        }
    }
}
