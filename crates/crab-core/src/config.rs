//! Build-time check configuration.

use std::fmt;

/// Selects whether invariant checks are compiled into the owning handles.
///
/// The mode is fixed at build time and identical for every handle in the
/// process. There is no runtime switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckMode {
    /// Every [`invariant!`](crate::invariant) call site evaluates its
    /// condition and aborts the operation with a panic on failure.
    Fatal,
    /// Conditions are not evaluated. A violated precondition is undefined
    /// behaviour rather than a clean failure.
    Unchecked,
}

impl CheckMode {
    /// The mode selected by the current build configuration.
    ///
    /// `Fatal` when `debug_assertions` is on or the `checks` feature is
    /// enabled, `Unchecked` otherwise.
    pub const fn from_build() -> Self {
        if cfg!(any(debug_assertions, feature = "checks")) {
            Self::Fatal
        } else {
            Self::Unchecked
        }
    }

    /// Whether this mode evaluates invariant conditions.
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

impl Default for CheckMode {
    fn default() -> Self {
        Self::from_build()
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => write!(f, "fatal"),
            Self::Unchecked => write!(f, "unchecked"),
        }
    }
}

/// The check mode of this build.
pub const CHECK_MODE: CheckMode = CheckMode::from_build();
