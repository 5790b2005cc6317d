//! utilities crate for uadetect
//!
//! `uadetect-utils` contains utilities used by `uadetect`,
//! not really being part of one of the other crates, or used
//! by plenty of other crates.
//!
//! # uadetect
//!
//! Crate used by the end-user `uadetect` crate and its member crates alike.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[doc(hidden)]
#[macro_use]
pub mod macros;

pub mod str;
