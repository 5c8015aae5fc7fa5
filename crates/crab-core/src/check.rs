//! The invariant-check facility.
//!
//! Every precondition in the workspace goes through [`invariant!`]. Whether
//! the condition is evaluated at all is decided once, at build time, by
//! [`CHECK_MODE`]. A failing check calls [`fatal`], which records the
//! violation through `tracing` and panics.

use crate::config::CHECK_MODE;
use crate::error::InvariantViolation;

/// Whether invariant conditions are evaluated in this build.
#[inline(always)]
pub const fn checks_enabled() -> bool {
    CHECK_MODE.is_fatal()
}

/// Abort the current operation because an ownership contract was broken.
///
/// Never returns. The violation is emitted as a `tracing` error event before
/// the panic so that it survives a `panic = "abort"` profile.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal(violation: InvariantViolation) -> ! {
    let location = std::panic::Location::caller();
    tracing::error!(
        target: "crab::check",
        %violation,
        file = location.file(),
        line = location.line(),
        "invariant violated"
    );
    panic!("{violation}");
}

/// Check an invariant, calling [`fatal`] with the given violation if it
/// does not hold.
///
/// The condition is only evaluated when [`checks_enabled`] is true. The
/// violation expression is only evaluated on failure.
///
/// ```
/// use crab_core::{invariant, InvariantViolation};
///
/// let len = 4;
/// let index = 3;
/// invariant!(index < len, InvariantViolation::IndexOutOfBounds { index, len });
/// ```
///
/// ```should_panic
/// use crab_core::{invariant, InvariantViolation};
///
/// let len = 4;
/// let index = 4;
/// invariant!(index < len, InvariantViolation::IndexOutOfBounds { index, len });
/// ```
#[macro_export]
macro_rules! invariant {
    ($cond:expr, $violation:expr $(,)?) => {
        if $crate::check::checks_enabled() && !($cond) {
            $crate::check::fatal($violation);
        }
    };
}
