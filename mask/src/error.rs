//! Error types for division operations

use thiserror::Error;

/// Error type for division operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid bit count: {0}")]
    InvalidBitCount(u32),
    #[error("invalid range: {0} > {1}")]
    InvalidRange(u128, u128), // lower, upper
    #[error("value too large: {0} > {1}")]
    ValueTooLarge(u128, u128), // value, max
    #[error("invalid prefix length: {0} > {1}")]
    InvalidPrefixLength(u32, u32), // prefix length, bit count
    #[error("mask mismatch: {0}")]
    MaskMismatch(String),
}
