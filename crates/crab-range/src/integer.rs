//! The primitive integer types an [`Interval`](crate::Interval) can range over.

use std::fmt;
use std::hash::Hash;

mod private {
    pub trait Sealed {}
}

/// A primitive integer type.
///
/// Sealed: implemented for every built-in signed and unsigned integer.
pub trait Integer: Copy + Ord + Hash + fmt::Debug + fmt::Display + private::Sealed {
    /// Zero.
    const ZERO: Self;
    /// The largest value of the type.
    const MAX: Self;

    /// `self + 1`, or `None` at [`MAX`](Self::MAX).
    fn checked_next(self) -> Option<Self>;

    /// `self + 1`. The caller guarantees `self < MAX`.
    fn next(self) -> Self;

    /// `self - 1`. The caller guarantees `self > MIN`.
    fn prev(self) -> Self;

    /// Number of values in `[lo, hi)`, or `None` if it exceeds `usize::MAX`.
    ///
    /// The caller guarantees `lo <= hi`.
    fn distance(lo: Self, hi: Self) -> Option<usize>;
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl Integer for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn checked_next(self) -> Option<Self> {
                    self.checked_add(1)
                }

                #[inline]
                fn next(self) -> Self {
                    self + 1
                }

                #[inline]
                fn prev(self) -> Self {
                    self - 1
                }

                #[inline]
                fn distance(lo: Self, hi: Self) -> Option<usize> {
                    usize::try_from(hi.abs_diff(lo)).ok()
                }
            }
        )*
    };
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_spans_signed_ranges() {
        assert_eq!(i8::distance(i8::MIN, i8::MAX), Some(255));
        assert_eq!(i64::distance(-3, 4), Some(7));
        assert_eq!(u8::distance(5, 5), Some(0));
    }

    #[test]
    fn distance_is_exact_at_full_pointer_width() {
        assert_eq!(usize::distance(0, usize::MAX), Some(usize::MAX));
        assert_eq!(isize::distance(isize::MIN, isize::MAX), Some(usize::MAX));
    }

    #[test]
    fn distance_beyond_usize_is_none() {
        assert_eq!(u128::distance(0, u128::MAX), None);
    }

    #[test]
    fn checked_next_stops_at_max() {
        assert_eq!(u16::MAX.checked_next(), None);
        assert_eq!(7i32.checked_next(), Some(8));
    }
}
