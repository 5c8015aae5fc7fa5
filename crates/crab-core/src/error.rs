//! Precondition violations detected by the invariant checks.
//!
//! None of these are recoverable. They describe a broken ownership
//! contract and are only ever raised through [`fatal`](crate::fatal).

use std::error::Error;
use std::fmt;

/// A violated ownership or range precondition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A null address was handed to an unchecked wrap or borrow constructor.
    NullPointer {
        /// The operation that received the null address.
        context: &'static str,
    },
    /// An array owner was indexed past its recorded length.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length recorded at construction.
        len: usize,
    },
    /// A shared owner holds a value pointer and a counter pointer that
    /// disagree on null-ness.
    CorruptedPair {
        /// Whether the value pointer is null.
        data_null: bool,
        /// Whether the counter pointer is null.
        count_null: bool,
    },
    /// A shared counter was released while already at zero.
    CountUnderflow,
    /// An interval was constructed with `min > max`.
    InvalidInterval {
        /// Lower bound, rendered.
        min: String,
        /// Upper bound, rendered.
        max: String,
    },
    /// An inclusive interval ends at the largest value of its type.
    IntervalOverflow {
        /// The inclusive upper bound that could not be made exclusive.
        max: String,
    },
    /// A narrowing conversion returned a different allocation than the one
    /// it was given.
    AddressChanged,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullPointer { context } => write!(f, "null pointer passed to {context}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: index {index}, length {len}")
            }
            Self::CorruptedPair {
                data_null,
                count_null,
            } => match (data_null, count_null) {
                (true, false) => {
                    write!(f, "corrupted shared owner: missing data but kept reference count")
                }
                (false, true) => {
                    write!(f, "corrupted shared owner: missing reference count but kept data")
                }
                _ => write!(f, "corrupted shared owner: data and reference count are both null"),
            },
            Self::CountUnderflow => write!(f, "shared owner released with a zero reference count"),
            Self::InvalidInterval { min, max } => {
                write!(f, "invalid interval: min {min} is greater than max {max}")
            }
            Self::IntervalOverflow { max } => {
                write!(f, "inclusive interval upper bound {max} overflows its type")
            }
            Self::AddressChanged => {
                write!(f, "narrowing conversion moved the value to a new allocation")
            }
        }
    }
}

impl Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_message_carries_both_numbers() {
        let v = InvariantViolation::IndexOutOfBounds { index: 4, len: 4 };
        assert_eq!(v.to_string(), "index out of bounds: index 4, length 4");
    }

    #[test]
    fn corrupted_pair_names_the_missing_half() {
        let missing_count = InvariantViolation::CorruptedPair {
            data_null: false,
            count_null: true,
        };
        assert!(missing_count.to_string().contains("missing reference count"));

        let missing_data = InvariantViolation::CorruptedPair {
            data_null: true,
            count_null: false,
        };
        assert!(missing_data.to_string().contains("missing data"));
    }

    #[test]
    fn is_std_error() {
        let v: Box<dyn Error> = Box::new(InvariantViolation::CountUnderflow);
        assert!(v.source().is_none());
    }
}
