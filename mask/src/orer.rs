//! OR-ing a contiguous range of division values with a mask.
//!
//! This is the dual of [crate::masker]: a one bit in the mask forces that position to one just
//! as a zero bit forces it to zero when masking, so the positions where the mask is zero are
//! the ones the range can still vary in. Since `x | m == !(!x & !m)`, OR-ing a range is
//! sequential exactly when masking its complement with the complemented mask is.

use crate::{
    strategy::{self, Strategy},
    word::Word,
};

/// How a specific range is OR-ed with a specific mask.
///
/// The bounds returned by [BitwiseOrer::ored_lower] and [BitwiseOrer::ored_upper] are the
/// smallest and largest OR-ed values. They describe the whole image only when
/// [BitwiseOrer::is_sequential] returns true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitwiseOrer<W = u64> {
    /// Each bound is OR-ed directly.
    Default { sequential: bool },

    /// The bits under `upper_mask` take every combination, so they are cleared in the lower
    /// bound and set in the upper bound before OR-ing.
    FullRange { upper_mask: W, sequential: bool },

    /// The image is not sequential. `lower` and `upper` are the members of the range with the
    /// smallest and largest OR-ed values and replace the bounds supplied by the caller.
    SpecificValue { lower: W, upper: W },
}

impl<W: Word> BitwiseOrer<W> {
    /// OR-s each bound directly and reports a sequential result.
    pub const DEFAULT: Self = Self::Default { sequential: true };

    /// OR-s each bound directly and reports a non-sequential result.
    pub const DEFAULT_NON_SEQUENTIAL: Self = Self::Default { sequential: false };

    /// Computes how `[value, upper_value]` is OR-ed with `mask_value`.
    ///
    /// `max_value` is the largest value of the division; [Word::MAX] is accepted when the
    /// width is unknown. The caller must ensure `value <= upper_value <= max_value`.
    pub fn new(value: W, upper_value: W, mask_value: W, max_value: W) -> Self {
        strategy::select(value, upper_value, !mask_value & max_value, max_value).into()
    }

    /// Returns the lower bound of the OR-ed range, given the lower bound of the range.
    #[inline]
    pub fn ored_lower(&self, value: W, mask_value: W) -> W {
        match *self {
            Self::Default { .. } => value | mask_value,
            Self::FullRange { upper_mask, .. } => (value & !upper_mask) | mask_value,
            Self::SpecificValue { lower, .. } => lower | mask_value,
        }
    }

    /// Returns the upper bound of the OR-ed range, given the upper bound of the range.
    #[inline]
    pub fn ored_upper(&self, upper_value: W, mask_value: W) -> W {
        match *self {
            Self::Default { .. } => upper_value | mask_value,
            Self::FullRange { upper_mask, .. } => upper_value | upper_mask | mask_value,
            Self::SpecificValue { upper, .. } => upper | mask_value,
        }
    }

    /// Returns true if the OR-ed values form exactly the range between the OR-ed bounds.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        match *self {
            Self::Default { sequential } | Self::FullRange { sequential, .. } => sequential,
            Self::SpecificValue { .. } => false,
        }
    }
}

impl<W> From<Strategy<W>> for BitwiseOrer<W> {
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
/// is OR-ed with `mask_value`.
///
/// Pass `u64::MAX` as `max_value` when the width of the division is unknown. The caller must
/// ensure `value <= upper_value <= max_value`.
pub fn bitwise_or_range(
    value: u64,
    upper_value: u64,
    mask_value: u64,
    max_value: u64,
) -> BitwiseOrer {
    BitwiseOrer::new(value, upper_value, mask_value, max_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mask_range,
        test::{assert_image, image},
    };
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use test_case::test_case;

    fn check(value: u64, upper_value: u64, mask_value: u64, max_value: u64) {
        let orer = bitwise_or_range(value, upper_value, mask_value, max_value);
        let ored = image((value..=upper_value).map(u128::from), |x| {
            x | u128::from(mask_value)
        });
        assert_image(
            &ored,
            u128::from(orer.ored_lower(value, mask_value)),
            u128::from(orer.ored_upper(upper_value, mask_value)),
            orer.is_sequential(),
            (value, upper_value, mask_value, max_value, orer),
        );
    }

    #[test_case(0x0c, 0x13, 0xf0, false, 0xf0, 0xff; "straddling a nibble")]
    #[test_case(0x00, 0xff, 0xf0, true, 0xf0, 0xff; "full range high nibble")]
    #[test_case(5, 5, 0xf0, true, 0xf5, 0xf5; "single value")]
    #[test_case(0x00, 0xff, 0x00, true, 0, 255; "zero mask")]
    #[test_case(0x12, 0x34, 0xff, true, 0xff, 0xff; "all ones mask")]
    #[test_case(0x00, 0xff, 0x0f, false, 0x0f, 0xff; "full range low nibble")]
    #[test_case(0x10, 0x2f, 0xf0, true, 0xf0, 0xff; "folding a full nibble")]
    fn test_bitwise_or_range_8_bit(
        value: u64,
        upper_value: u64,
        mask_value: u64,
        sequential: bool,
        lower: u64,
        upper: u64,
    ) {
        let orer = bitwise_or_range(value, upper_value, mask_value, 0xff);
        assert_eq!(orer.is_sequential(), sequential);
        assert_eq!(orer.ored_lower(value, mask_value), lower);
        assert_eq!(orer.ored_upper(upper_value, mask_value), upper);
        check(value, upper_value, mask_value, 0xff);
    }

    #[test]
    fn test_exhaustive_6_bit() {
        for value in 0..64u64 {
            for upper_value in value..64 {
                for mask_value in 0..64 {
                    check(value, upper_value, mask_value, 0x3f);
                }
            }
        }
    }

    #[test]
    fn test_default_instances() {
        assert!(BitwiseOrer::<u64>::DEFAULT.is_sequential());
        assert!(!BitwiseOrer::<u64>::DEFAULT_NON_SEQUENTIAL.is_sequential());
        assert_eq!(bitwise_or_range(9, 9, 0xf0, 0xff), BitwiseOrer::DEFAULT);
        assert_eq!(
            bitwise_or_range(0, 0xff, 0x55, 0xff),
            BitwiseOrer::DEFAULT_NON_SEQUENTIAL
        );
    }

    #[test]
    fn test_duality_exhaustive_8_bit() {
        for value in 0..=0xffu64 {
            for upper_value in value..=0xff {
                for mask_value in 0..=0xffu64 {
                    let orer = bitwise_or_range(value, upper_value, mask_value, 0xff);
                    let masker =
                        mask_range(0xff - upper_value, 0xff - value, 0xff - mask_value, 0xff);
                    assert_eq!(orer.is_sequential(), masker.is_sequential());
                    assert_eq!(
                        orer.ored_lower(value, mask_value),
                        0xff - masker.masked_upper(0xff - value, 0xff - mask_value)
                    );
                    assert_eq!(
                        orer.ored_upper(upper_value, mask_value),
                        0xff - masker.masked_lower(0xff - upper_value, 0xff - mask_value)
                    );
                }
            }
        }
    }

    #[test]
    fn test_random_64_bit_short_ranges() {
        let mut rng = StdRng::seed_from_u64(64);
        for _ in 0..5_000 {
            let value = rng.gen::<u64>() >> rng.gen_range(0..64u32);
            let upper_value = value.saturating_add(rng.gen_range(0..512));
            let mask_value = match rng.gen_range(0..3) {
                0 => rng.gen::<u64>(),
                1 => u64::MAX << rng.gen_range(0..64u32),
                _ => (u64::MAX << rng.gen_range(0..64u32)) ^ (1 << rng.gen_range(0..12u32)),
            };
            check(value, upper_value, mask_value, u64::MAX);
        }
    }

    #[test]
    fn test_wide_word() {
        // The low nibble of 16 values straddling the 64-bit boundary is fully covered
        let boundary = 1u128 << 64;
        let mask = !0x0fu128;
        let orer = BitwiseOrer::new(boundary - 8, boundary + 7, mask, u128::MAX);
        assert!(orer.is_sequential());
        assert_eq!(orer.ored_lower(boundary - 8, mask), mask);
        assert_eq!(orer.ored_upper(boundary + 7, mask), u128::MAX);
    }
}
