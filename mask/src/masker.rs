//! Masking a contiguous range of division values with a bitwise AND.
//!
//! Masking every value of a range does not generally produce another range: `[12, 19]` masked
//! with `0x0f` yields `{12, 13, 14, 15, 0, 1, 2, 3}`. [mask_range] decides, without enumerating
//! the range, whether the masked values are contiguous and what their bounds are.
//!
//! # Example
//!
//! ```
//! use ipaddr_mask::mask_range;
//!
//! // 10.0.0.0-10.255.255.255 as a single 32-bit division
//! let (value, upper_value) = (0x0a00_0000, 0x0aff_ffff);
//!
//! // Masking with 0.0.255.255 leaves every combination of the low two octets
//! let masker = mask_range(value, upper_value, 0x0000_ffff, 0xffff_ffff);
//! assert!(masker.is_sequential());
//! assert_eq!(masker.masked_lower(value, 0x0000_ffff), 0x0000_0000);
//! assert_eq!(masker.masked_upper(upper_value, 0x0000_ffff), 0x0000_ffff);
//!
//! // Masking with 0.255.0.0 leaves gaps between 0.1.0.0, 0.2.0.0, ...
//! let masker = mask_range(value, upper_value, 0x00ff_0000, 0xffff_ffff);
//! assert!(!masker.is_sequential());
//! assert_eq!(masker.masked_lower(value, 0x00ff_0000), 0x0000_0000);
//! assert_eq!(masker.masked_upper(upper_value, 0x00ff_0000), 0x00ff_0000);
//! ```

use crate::{
    strategy::{self, Strategy},
    word::Word,
};

/// How a specific range is masked by a specific mask.
///
/// Obtained from [mask_range] (or [Masker::new] for other word sizes) and queried with the same
/// range and mask it was computed for.
///
/// The bounds returned by [Masker::masked_lower] and [Masker::masked_upper] are always the
/// smallest and largest masked values, but they only describe the whole masked image when
/// [Masker::is_sequential] returns true. Otherwise some values between them are unreachable and
/// the pair is merely an enclosing approximation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Masker<W = u64> {
    /// Each bound is masked directly.
    Default { sequential: bool },

    /// The bits under `upper_mask` take every combination, so they are cleared in the lower
    /// bound and set in the upper bound before masking.
    FullRange { upper_mask: W, sequential: bool },

    /// The image is not sequential. `lower` and `upper` are the members of the range with the
    /// smallest and largest masked values and replace the bounds supplied by the caller.
    SpecificValue { lower: W, upper: W },
}

impl<W: Word> Masker<W> {
    /// Masks each bound directly and reports a sequential result.
    pub const DEFAULT: Self = Self::Default { sequential: true };

    /// Masks each bound directly and reports a non-sequential result.
    pub const DEFAULT_NON_SEQUENTIAL: Self = Self::Default { sequential: false };

    /// Computes how `[value, upper_value]` is masked by `mask_value`.
    ///
    /// `max_value` is the largest value of the division (`2^n - 1` for an `n`-bit division).
    /// [Word::MAX] is accepted when the width is unknown.
    ///
    /// The caller must ensure `value <= upper_value <= max_value`; otherwise the result is
    /// unspecified.
    pub fn new(value: W, upper_value: W, mask_value: W, max_value: W) -> Self {
        strategy::select(value, upper_value, mask_value, max_value).into()
    }

    /// Returns the lower bound of the masked range, given the lower bound of the range.
    #[inline]
    pub fn masked_lower(&self, value: W, mask_value: W) -> W {
        match *self {
            Self::Default { .. } => value & mask_value,
            Self::FullRange { upper_mask, .. } => value & !upper_mask & mask_value,
            Self::SpecificValue { lower, .. } => lower & mask_value,
        }
    }

    /// Returns the upper bound of the masked range, given the upper bound of the range.
    #[inline]
    pub fn masked_upper(&self, upper_value: W, mask_value: W) -> W {
        match *self {
            Self::Default { .. } => upper_value & mask_value,
            Self::FullRange { upper_mask, .. } => (upper_value | upper_mask) & mask_value,
            Self::SpecificValue { upper, .. } => upper & mask_value,
        }
    }

    /// Returns true if the masked values form exactly the range between the masked bounds.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        match *self {
            Self::Default { sequential } | Self::FullRange { sequential, .. } => sequential,
            Self::SpecificValue { .. } => false,
        }
    }
}

impl<W> From<Strategy<W>> for Masker<W> {
    fn from(strategy: Strategy<W>) -> Self {
        match strategy {
            Strategy::Uniform { sequential } => Self::Default { sequential },
            Strategy::FullRange {
                upper_mask,
                sequential,
            } => Self::FullRange {
                upper_mask,
                sequential,
            },
            Strategy::Extremes { lower, upper } => Self::SpecificValue { lower, upper },
        }
    }
}

/// Computes how the range `[value, upper_value]` of a division with largest value `max_value`
/// is masked by `mask_value`.
///
/// Pass `u64::MAX` as `max_value` when the width of the division is unknown. The caller must
/// ensure `value <= upper_value <= max_value`.
pub fn mask_range(value: u64, upper_value: u64, mask_value: u64, max_value: u64) -> Masker {
    Masker::new(value, upper_value, mask_value, max_value)
}
