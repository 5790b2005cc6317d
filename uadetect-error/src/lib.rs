//! Error types for uadetect.
//!
//! The [`BoxError`] type is a type-erased error type that can be used to represent any error that
//! implements the `std::error::Error` trait and is used for cases where it is usually not
//! that important what specific error type is returned, but rather that an error occurred.
//!
//! [`OpaqueError`] hides such a [`BoxError`] behind a concrete type, which is what
//! the public (fallible) API of the engine returns, e.g. when compiling a rule set.
//!
//! Use [`ErrorContext`] to attach context to a `Result` or `Option`,
//! and [`ErrorExt`] or [`error_chain`] to walk the chain of causes.
//!
//! # uadetect
//!
//! Crate used by the end-user `uadetect` crate and its member crates alike.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

mod opaque;
pub use opaque::OpaqueError;

mod chain;
pub use chain::{error_chain, root_cause};

mod context;
pub use context::{ErrorContext, ErrorExt};
