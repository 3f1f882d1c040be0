//! Mask and OR contiguous ranges of address division values without enumerating them.
//!
//! An address division (an IPv4 octet, an IPv6 segment, or several of them joined) may hold a
//! range of values. Applying a bitwise AND or OR to every value of a range produces a set that
//! is not always a range itself. The algebras in this crate decide whether it is, and produce
//! the bounds of the result, in time independent of the size of the range:
//!
//! * [mask_range] and [Masker]: AND with a mask, for divisions of up to 64 bits.
//! * [mask_extended_range] and [ExtendedMasker]: AND with a mask, for divisions of up to 128
//!   bits carried as two 64-bit limbs.
//! * [bitwise_or_range] and [BitwiseOrer]: OR with a mask.
//!
//! [Division] and [WideDivision] apply the algebras to validated ranges and reject results that
//! are not sequential.

pub mod division;
pub use division::{Division, WideDivision};
mod error;
pub use error::Error;
pub mod extended;
pub use extended::{mask_extended_range, ExtendedMasker};
pub mod masker;
pub use masker::{mask_range, Masker};
pub mod orer;
pub use orer::{bitwise_or_range, BitwiseOrer};
mod strategy;
mod word;
pub use word::Word;

use core::fmt::Display;

/// Formats a range and the mask applied to it as `lower-upper /mask`.
pub fn mask_string<T: Display>(lower: T, upper: T, mask: T) -> String {
    format!("{lower}-{upper} /{mask}")
}
