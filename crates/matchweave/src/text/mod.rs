//! # Text Views
//!
//! This module holds the immutable UTF-16 view the matchers scan over.
//!
//! [`Utf16Text`] owns the code units of a source string; navigators and
//! matchers address it by UTF-16 unit offsets, combining surrogate pairs
//! into code points on read.

mod utf16;

#[doc(inline)]
pub use utf16::{
    Utf16Text, code_point_at, code_point_before, code_point_width, encode_units, is_high_surrogate,
    is_low_surrogate, units_to_string,
};
