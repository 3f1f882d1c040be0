//! Masking ranges of divisions wider than 64 bits.
//!
//! Values are carried as two 64-bit limbs: the "extended" limb holds the high 64 bits and the
//! plain limb holds the low 64 bits, which is how divisions joining five or more IPv6 segments
//! are assembled. When the extended limb is the same across the range only the low limb can
//! vary and masking reduces to [mask_range]. Otherwise the limbs are joined and the range is
//! analyzed at 128-bit precision.

use crate::{mask_range, Masker};

/// Joins an extended (high) limb and a low limb into one value.
#[inline]
pub(crate) fn join(extended: u64, low: u64) -> u128 {
    (u128::from(extended) << 64) | u128::from(low)
}

/// Splits a value into its extended (high) limb and its low limb.
#[inline]
pub(crate) fn split(value: u128) -> (u64, u64) {
    ((value >> 64) as u64, value as u64)
}

/// How a specific 128-bit range is masked by a specific 128-bit mask.
///
/// Like [Masker], the bounds are the smallest and largest masked values, and they describe the
/// whole masked image only when [ExtendedMasker::is_sequential] returns true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedMasker {
    /// The extended limb is fixed across the range. The low limb is masked by the wrapped
    /// [Masker] and the extended limb is masked directly.
    Low(Masker<u64>),

    /// The extended limb varies across the range and the strategy spans both limbs.
    Wide(Masker<u128>),
}

impl ExtendedMasker {
    /// Masks each limb of each bound directly and reports a sequential result.
    pub const DEFAULT: Self = Self::Low(Masker::DEFAULT);

    /// Masks each limb of each bound directly and reports a non-sequential result.
    pub const DEFAULT_NON_SEQUENTIAL: Self = Self::Low(Masker::DEFAULT_NON_SEQUENTIAL);

    /// Returns the low limb of the masked lower bound.
    #[inline]
    pub fn masked_lower(&self, value: u64, mask_value: u64) -> u64 {
        match self {
            Self::Low(masker) => masker.masked_lower(value, mask_value),
            Self::Wide(masker) => {
                split(masker.masked_lower(join(0, value), join(0, mask_value))).1
            }
        }
    }

    /// Returns the low limb of the masked upper bound.
    #[inline]
    pub fn masked_upper(&self, upper_value: u64, mask_value: u64) -> u64 {
        match self {
            Self::Low(masker) => masker.masked_upper(upper_value, mask_value),
            Self::Wide(masker) => {
                split(masker.masked_upper(join(0, upper_value), join(0, mask_value))).1
            }
        }
    }

    /// Returns the extended limb of the masked lower bound.
    #[inline]
    pub fn extended_masked_lower(&self, extended_value: u64, extended_mask_value: u64) -> u64 {
        match self {
            Self::Low(_) => extended_value & extended_mask_value,
            Self::Wide(masker) => {
                split(masker.masked_lower(
                    join(extended_value, 0),
                    join(extended_mask_value, 0),
                ))
                .0
            }
        }
    }

    /// Returns the extended limb of the masked upper bound.
    #[inline]
    pub fn extended_masked_upper(
        &self,
        extended_upper_value: u64,
        extended_mask_value: u64,
    ) -> u64 {
        match self {
            Self::Low(_) => extended_upper_value & extended_mask_value,
            Self::Wide(masker) => {
                split(masker.masked_upper(
                    join(extended_upper_value, 0),
                    join(extended_mask_value, 0),
                ))
                .0
            }
        }
    }

    /// Returns true if the masked values form exactly the range between the masked bounds.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        match self {
            Self::Low(masker) => masker.is_sequential(),
            Self::Wide(masker) => masker.is_sequential(),
        }
    }
}

/// Computes how a 128-bit range is masked by a 128-bit mask, with every operand given as an
/// extended (high) limb and a low limb.
///
/// The range is `[(extended_value, value), (extended_upper_value, upper_value)]` and the
/// largest value of the division is `(extended_max_value, max_value)`. A division wider than 64
/// bits has a low limb maximum of `u64::MAX`. Passing `u64::MAX` for both maximum limbs is
/// accepted when the width is unknown. The caller must ensure the range is ordered and within
/// the maximum.
#[allow(clippy::too_many_arguments)]
pub fn mask_extended_range(
    value: u64,
    extended_value: u64,
    upper_value: u64,
    extended_upper_value: u64,
    mask_value: u64,
    extended_mask_value: u64,
    max_value: u64,
    extended_max_value: u64,
) -> ExtendedMasker {
    if extended_value == extended_upper_value {
        return ExtendedMasker::Low(mask_range(value, upper_value, mask_value, max_value));
    }
    match Masker::new(
        join(extended_value, value),
        join(extended_upper_value, upper_value),
        join(extended_mask_value, mask_value),
        join(extended_max_value, max_value),
    ) {
        // Limb-wise masking of the bounds is already correct
        Masker::Default { sequential } => ExtendedMasker::Low(Masker::Default { sequential }),
        masker => ExtendedMasker::Wide(masker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{assert_image, image};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Masks `[value, upper_value]` through the limb interface and joins the bounds.
    fn masked(value: u128, upper_value: u128, mask: u128, max: u128) -> (u128, u128, bool) {
        let (extended_value, low_value) = split(value);
        let (extended_upper_value, low_upper_value) = split(upper_value);
        let (extended_mask, low_mask) = split(mask);
        let (extended_max, low_max) = split(max);
        let masker = mask_extended_range(
            low_value,
            extended_value,
            low_upper_value,
            extended_upper_value,
            low_mask,
            extended_mask,
            low_max,
            extended_max,
        );
        let lower = join(
            masker.extended_masked_lower(extended_value, extended_mask),
            masker.masked_lower(low_value, low_mask),
        );
        let upper = join(
            masker.extended_masked_upper(extended_upper_value, extended_mask),
            masker.masked_upper(low_upper_value, low_mask),
        );
        (lower, upper, masker.is_sequential())
    }

    fn check(value: u128, upper_value: u128, mask: u128, max: u128) {
        let (lower, upper, sequential) = masked(value, upper_value, mask, max);
        let image = image(value..=upper_value, |x| x & mask);
        assert_image(
            &image,
            lower,
            upper,
            sequential,
            (value, upper_value, mask, max),
        );
    }

    #[test]
    fn test_join_split() {
        assert_eq!(join(1, 2), (1 << 64) | 2);
        assert_eq!(split((7 << 64) | 9), (7, 9));
        assert_eq!(split(u128::MAX), (u64::MAX, u64::MAX));
    }

    #[test]
    fn test_constant_extended_limb_delegates() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10_000 {
            let a = rng.gen::<u64>() >> rng.gen_range(0..64u32);
            let b = rng.gen::<u64>() >> rng.gen_range(0..64u32);
            let (value, upper_value) = (a.min(b), a.max(b));
            let mask_value = rng.gen::<u64>() >> rng.gen_range(0..64u32);
            let extended = rng.gen::<u64>();
            let extended_mask = rng.gen::<u64>();

            let expected = mask_range(value, upper_value, mask_value, u64::MAX);
            let masker = mask_extended_range(
                value,
                extended,
                upper_value,
                extended,
                mask_value,
                extended_mask,
                u64::MAX,
                u64::MAX,
            );
            assert_eq!(masker, ExtendedMasker::Low(expected));
            assert_eq!(
                masker.masked_lower(value, mask_value),
                expected.masked_lower(value, mask_value)
            );
            assert_eq!(
                masker.masked_upper(upper_value, mask_value),
                expected.masked_upper(upper_value, mask_value)
            );
            assert_eq!(masker.is_sequential(), expected.is_sequential());
            assert_eq!(
                masker.extended_masked_lower(extended, extended_mask),
                extended & extended_mask
            );
        }
    }

    #[test]
    fn test_default_instances() {
        assert!(ExtendedMasker::DEFAULT.is_sequential());
        assert!(!ExtendedMasker::DEFAULT_NON_SEQUENTIAL.is_sequential());
        assert_eq!(
            mask_extended_range(9, 3, 9, 3, 0x0f, u64::MAX, 0xff, u64::MAX),
            ExtendedMasker::DEFAULT
        );
        assert_eq!(
            mask_extended_range(0, 3, 0xff, 3, 0xaa, u64::MAX, 0xff, u64::MAX),
            ExtendedMasker::DEFAULT_NON_SEQUENTIAL
        );

        // Results of the wide strategy that mask each bound directly use the low-limb defaults
        assert_eq!(
            mask_extended_range(0, 0, 5, 1, u64::MAX, u64::MAX, u64::MAX, u64::MAX),
            ExtendedMasker::DEFAULT
        );
        assert_eq!(
            mask_extended_range(0, 0, u64::MAX, u64::MAX, 0, u64::MAX, u64::MAX, u64::MAX),
            ExtendedMasker::DEFAULT_NON_SEQUENTIAL
        );
    }

    #[test]
    fn test_crossing_limbs() {
        let boundary = 1u128 << 64;

        // Low 4 bits of 16 values straddling the limb boundary: every nibble appears
        let (lower, upper, sequential) = masked(boundary - 8, boundary + 7, 0x0f, u128::MAX);
        assert!(sequential);
        assert_eq!((lower, upper), (0, 0x0f));

        // Only 8 values: the nibbles wrap around
        let (lower, upper, sequential) = masked(boundary - 4, boundary + 3, 0x0f, u128::MAX);
        assert!(!sequential);
        assert_eq!((lower, upper), (0, 0x0f));

        // Keep the low bit of the extended limb and all of the low limb
        let (lower, upper, sequential) =
            masked(boundary - 4, boundary + 3, (boundary << 1) - 1, u128::MAX);
        assert!(sequential);
        assert_eq!((lower, upper), (boundary - 4, boundary + 3));
    }

    #[test]
    fn test_full_width() {
        // 96-bit division
        let max = (1u128 << 96) - 1;
        let (lower, upper, sequential) = masked(0, max, max >> 8, max);
        assert!(sequential);
        assert_eq!((lower, upper), (0, max >> 8));

        let (_, _, sequential) = masked(0, max, max ^ (1 << 70), max);
        assert!(!sequential);

        let (lower, upper, sequential) = masked(0, u128::MAX, u128::MAX, u128::MAX);
        assert!(sequential);
        assert_eq!((lower, upper), (0, u128::MAX));
    }

    #[test]
    fn test_random_short_ranges() {
        let mut rng = StdRng::seed_from_u64(128);
        for _ in 0..5_000 {
            // Place the range on or near a limb boundary so the extended limb varies
            let extended = rng.gen::<u64>() >> rng.gen_range(1..64u32);
            let value = join(extended, u64::MAX - rng.gen_range(0..256));
            let upper_value = value + rng.gen_range(0..512);
            let mask = match rng.gen_range(0..4) {
                0 => rng.gen::<u128>(),
                1 => u128::MAX >> rng.gen_range(0..128u32),
                2 => (u128::MAX >> rng.gen_range(0..128u32)) ^ (1 << rng.gen_range(0..10u32)),
                _ => join(rng.gen(), u64::MAX >> rng.gen_range(0..64u32)),
            };
            check(value, upper_value, mask, u128::MAX);
        }
    }
}
