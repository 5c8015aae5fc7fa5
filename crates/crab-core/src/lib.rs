//! Core types for the Crab ownership primitives.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces shared by every owning handle in the workspace:
//!
//! - [`check`]: the invariant-check facility ([`invariant!`], [`fatal`]).
//! - [`config`]: the build-time [`CheckMode`] switch.
//! - [`error`]: the [`InvariantViolation`] taxonomy.
//! - [`view`]: non-owning borrow views ([`Ref`], [`RefMut`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod check;
pub mod config;
pub mod error;
pub mod view;

pub use check::{checks_enabled, fatal};
pub use config::{CheckMode, CHECK_MODE};
pub use error::InvariantViolation;
pub use view::{Ref, RefMut};
