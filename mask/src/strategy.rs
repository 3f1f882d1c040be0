//! Bit analysis shared by the AND ([crate::Masker]) and OR ([crate::BitwiseOrer]) algebras.
//!
//! Both operations let some bit positions of a value through unchanged and force the others to
//! a constant (zero for AND, one for OR). Whether a contiguous range stays contiguous after the
//! operation depends only on which positions pass through, so the analysis is written once in
//! terms of those "passing" bits and each algebra maps the result onto its own bounds.

use crate::word::Word;

/// How a range `[value, upper_value]` behaves once only the passing bits can vary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Strategy<W> {
    /// The bounds are obtained by applying the operation to each end of the range.
    Uniform { sequential: bool },

    /// Every combination of the bits covered by `upper_mask` may appear, so the bounds are
    /// obtained by forcing those bits to all zeros (lower) and all ones (upper) first.
    FullRange { upper_mask: W, sequential: bool },

    /// The image is not sequential; `lower` and `upper` are the members of the range producing
    /// the smallest and largest results.
    Extremes { lower: W, upper: W },
}

/// Selects the strategy for `[value, upper_value]` where `passing` marks the bit positions the
/// operation leaves unchanged and `max_value` is the largest value of the division.
///
/// `max_value == W::MAX` is accepted as an unbounded width and refined from `upper_value` when
/// the answer depends on it.
pub(crate) fn select<W: Word>(value: W, upper_value: W, passing: W, max_value: W) -> Strategy<W> {
    debug_assert!(value <= upper_value, "range lower bound above upper bound");
    if value == upper_value || passing == W::ZERO || passing == max_value {
        return Strategy::Uniform { sequential: true };
    }

    // The endpoints agree on every bit above the highest differing bit, so only that bit and
    // the bits below it can change across the range.
    let differing = value ^ upper_value;
    if differing == W::ONE {
        return Strategy::Uniform { sequential: true };
    }
    let highest_differing_bit_in_range = differing.leading_zeros();
    let differing_masked = passing & W::MAX.shr(highest_differing_bit_in_range);
    if differing_masked == W::ZERO {
        return Strategy::Uniform { sequential: true };
    }

    // Below the highest passing bit that can vary, every bit must pass as well.
    let highest_differing_bit_masked = differing_masked.leading_zeros();
    let host_mask = W::MAX.shr(highest_differing_bit_masked + 1);
    let mut sequential = passing & host_mask == host_mask;
    let widened = highest_differing_bit_masked > highest_differing_bit_in_range;

    let mut max_value = max_value;
    if max_value == W::MAX && (!sequential || widened) {
        // differing is neither 0 nor 1, so upper_value has at least two significant bits
        max_value = W::MAX.shr(upper_value.leading_zeros());
    }
    if value == W::ZERO && upper_value == max_value {
        return Strategy::Uniform { sequential };
    }

    if widened {
        // The bits between the two positions are forced, which folds the range onto itself.
        // It stays sequential only if it holds at least 2^n values, where n counts the bits
        // at and below the highest passing one (count - 1 >= 2^n - 1 == upper_mask).
        let upper_mask = W::MAX.shr(highest_differing_bit_masked);
        if sequential {
            sequential = upper_value.wrapping_sub(value) >= upper_mask;
        }
        return Strategy::FullRange {
            upper_mask,
            sequential,
        };
    }
    if sequential {
        return Strategy::Uniform { sequential: true };
    }

    // Greedy search for the members of the range with the extreme results. The highest
    // differing bit is zero in the lower candidate and one in the upper candidate; below it,
    // each passing bit is set in the upper candidate and cleared in the lower one whenever
    // the candidate stays within the range.
    let mut upper_to_be_masked = upper_value & !host_mask;
    let mut lower_to_be_masked = value | host_mask;
    let mut next_bit = host_mask ^ host_mask.shr(1);
    while next_bit != W::ZERO {
        if passing & next_bit != W::ZERO {
            let candidate = upper_to_be_masked | next_bit;
            if candidate <= upper_value {
                upper_to_be_masked = candidate;
            }
            let candidate = lower_to_be_masked & !next_bit;
            if candidate >= value {
                lower_to_be_masked = candidate;
            }
        }
        next_bit = next_bit.shr(1);
    }
    Strategy::Extremes {
        lower: lower_to_be_masked,
        upper: upper_to_be_masked,
    }
}
