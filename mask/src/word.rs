//! Unsigned words a masking strategy can be computed over.

use core::{
    fmt::Debug,
    hash::Hash,
    ops::{BitAnd, BitOr, BitXor, Not},
};

mod sealed {
    pub trait Sealed {}
}

/// An unsigned word wide enough to hold every value of a division.
///
/// Implemented for [u64] (divisions of up to 64 bits) and [u128] (extended divisions of up to
/// 128 bits). The trait is sealed: the masking algorithms rely on two's-complement unsigned
/// semantics that no other type is guaranteed to provide.
pub trait Word:
    sealed::Sealed
    + Copy
    + Debug
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// The word with no bits set.
    const ZERO: Self;

    /// The word with only the lowest bit set.
    const ONE: Self;

    /// The word with every bit set.
    const MAX: Self;

    /// Number of bits in the word.
    const BITS: u32;

    /// Number of zero bits above the highest set bit.
    fn leading_zeros(self) -> u32;

    /// Logical right shift that yields zero once `shift` reaches [Self::BITS].
    fn shr(self, shift: u32) -> Self;

    /// Subtraction modulo `2^BITS`.
    fn wrapping_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_word {
    ($($t:ty),+) => {
        $(
            impl sealed::Sealed for $t {}

            impl Word for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$t>::MAX;
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn leading_zeros(self) -> u32 {
                    <$t>::leading_zeros(self)
                }

                #[inline]
                fn shr(self, shift: u32) -> Self {
                    self.checked_shr(shift).unwrap_or(0)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$t>::wrapping_sub(self, rhs)
                }
            }
        )+
    };
}

impl_word!(u64, u128);

/// Returns the largest value of a `bit_count`-bit division held in a `W`.
///
/// A `bit_count` of zero yields zero and anything at or above [Word::BITS] yields [Word::MAX].
#[inline]
pub(crate) fn max_value<W: Word>(bit_count: u32) -> W {
    if bit_count == 0 {
        return W::ZERO;
    }
    W::MAX.shr(W::BITS.saturating_sub(bit_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shr_saturates_at_width() {
        assert_eq!(Word::shr(u64::MAX, 0), u64::MAX);
        assert_eq!(Word::shr(u64::MAX, 63), 1);
        assert_eq!(Word::shr(u64::MAX, 64), 0);
        assert_eq!(Word::shr(u64::MAX, 200), 0);
        assert_eq!(Word::shr(u128::MAX, 127), 1);
        assert_eq!(Word::shr(u128::MAX, 128), 0);
    }

    #[test]
    fn test_max_value() {
        assert_eq!(max_value::<u64>(0), 0);
        assert_eq!(max_value::<u64>(1), 1);
        assert_eq!(max_value::<u64>(8), 0xff);
        assert_eq!(max_value::<u64>(48), 0xffff_ffff_ffff);
        assert_eq!(max_value::<u64>(64), u64::MAX);
        assert_eq!(max_value::<u64>(65), u64::MAX);
        assert_eq!(max_value::<u128>(72), (1u128 << 72) - 1);
        assert_eq!(max_value::<u128>(128), u128::MAX);
    }
}
