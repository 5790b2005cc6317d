//! string utilities

mod search;
#[doc(inline)]
pub use search::{
    any_eq_ignore_ascii_case, ends_with_ignore_ascii_case, strip_suffix_ignore_ascii_case,
};
