//! Address divisions: fixed-width slots of an address holding a single value or a contiguous
//! range of values.
//!
//! Divisions are the callers of the masking algebras. Masking or OR-ing a division must produce
//! another division, so a non-sequential result is reported as [Error::MaskMismatch] instead of
//! being approximated.
//!
//! # Example
//!
//! ```
//! use ipaddr_mask::{Division, Error};
//!
//! // The third octet of 1.2.16-47.4
//! let octet = Division::new(16, 47, 8).unwrap();
//!
//! // Every low nibble appears, so keeping it leaves a range
//! let masked = octet.mask(0x0f).unwrap();
//! assert_eq!((masked.value(), masked.upper_value()), (0, 15));
//!
//! // 12-19 wraps around in the low nibble
//! let octet = Division::new(12, 19, 8).unwrap();
//! assert_eq!(octet.mask(0x0f), Err(Error::MaskMismatch("12-19 /15".into())));
//! ```

use crate::{
    bitwise_or_range,
    extended::{join, split},
    mask_extended_range, mask_range, mask_string,
    word::max_value,
    BitwiseOrer, Error,
};
use tracing::{debug, trace};

/// A division of up to 64 bits holding every value in `[value, upper_value]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Division {
    value: u64,
    upper_value: u64,
    bit_count: u32,
}

impl Division {
    /// Creates a `bit_count`-bit division holding `[value, upper_value]`.
    pub fn new(value: u64, upper_value: u64, bit_count: u32) -> Result<Self, Error> {
        if bit_count == 0 || bit_count > u64::BITS {
            return Err(Error::InvalidBitCount(bit_count));
        }
        if value > upper_value {
            return Err(Error::InvalidRange(value.into(), upper_value.into()));
        }
        let max_value = max_value::<u64>(bit_count);
        if upper_value > max_value {
            return Err(Error::ValueTooLarge(upper_value.into(), max_value.into()));
        }
        Ok(Self {
            value,
            upper_value,
            bit_count,
        })
    }

    /// Creates a `bit_count`-bit division holding only `value`.
    pub fn single(value: u64, bit_count: u32) -> Result<Self, Error> {
        Self::new(value, value, bit_count)
    }

    /// Creates a `bit_count`-bit division holding every value of its width.
    pub fn full(bit_count: u32) -> Result<Self, Error> {
        Self::new(0, max_value(bit_count), bit_count)
    }

    /// Returns the lowest value in the division.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns the highest value in the division.
    pub fn upper_value(&self) -> u64 {
        self.upper_value
    }

    /// Returns the width of the division.
    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Returns the largest value a division of this width can hold.
    pub fn max_value(&self) -> u64 {
        max_value(self.bit_count)
    }

    /// Returns true if the division holds more than one value.
    pub fn is_multiple(&self) -> bool {
        self.value != self.upper_value
    }

    /// Returns the number of values in the division.
    pub fn count(&self) -> u128 {
        u128::from(self.upper_value - self.value) + 1
    }

    /// Returns true if `value` is in the division.
    pub fn contains(&self, value: u64) -> bool {
        self.value <= value && value <= self.upper_value
    }

    /// Masks every value of the division with `mask`.
    ///
    /// Mask bits beyond the width of the division are ignored. Returns
    /// [Error::MaskMismatch] if the masked values are not contiguous.
    pub fn mask(&self, mask: u64) -> Result<Self, Error> {
        let max_value = self.max_value();
        let mask = mask & max_value;
        let masker = mask_range(self.value, self.upper_value, mask, max_value);
        if !masker.is_sequential() {
            let mismatch = mask_string(self.value, self.upper_value, mask);
            debug!(%mismatch, "masked range is not sequential");
            return Err(Error::MaskMismatch(mismatch));
        }
        Ok(self.with_range(
            masker.masked_lower(self.value, mask),
            masker.masked_upper(self.upper_value, mask),
        ))
    }

    /// OR-s every value of the division with `mask`.
    ///
    /// Mask bits beyond the width of the division are ignored. Returns
    /// [Error::MaskMismatch] if the OR-ed values are not contiguous.
    pub fn bitwise_or(&self, mask: u64) -> Result<Self, Error> {
        let max_value = self.max_value();
        let mask = mask & max_value;
        let orer = bitwise_or_range(self.value, self.upper_value, mask, max_value);
        if !orer.is_sequential() {
            let mismatch = mask_string(self.value, self.upper_value, mask);
            debug!(%mismatch, "OR-ed range is not sequential");
            return Err(Error::MaskMismatch(mismatch));
        }
        Ok(self.with_range(
            orer.ored_lower(self.value, mask),
            orer.ored_upper(self.upper_value, mask),
        ))
    }

    /// Returns true if every value of the division masks to `value`.
    pub fn matches_with_mask(&self, value: u64, mask: u64) -> bool {
        if self.is_multiple() {
            // Every bit that can change across the range must be masked out
            let differing = self.value ^ self.upper_value;
            let varying = u64::MAX >> differing.leading_zeros();
            if varying & mask != 0 {
                return false;
            }
        }
        value == self.value & mask
    }

    /// Returns true if masking the division with `mask` yields exactly `[lower, upper]`.
    pub fn matches_range_with_mask(&self, lower: u64, upper: u64, mask: u64) -> bool {
        if lower == upper {
            return self.matches_with_mask(lower, mask);
        }
        if !self.is_multiple() {
            return false;
        }
        let masker = mask_range(self.value, self.upper_value, mask, self.max_value());
        masker.is_sequential()
            && lower == masker.masked_lower(self.value, mask)
            && upper == masker.masked_upper(self.upper_value, mask)
    }

    /// Returns the division spanning every host of the networks in this division, keeping the
    /// top `prefix_len` bits.
    pub fn to_network(&self, prefix_len: u32) -> Result<Self, Error> {
        let host_mask = self.host_mask(prefix_len)?;
        let network = self.with_range(self.value & !host_mask, self.upper_value | host_mask);
        trace!(
            prefix_len,
            lower = network.value,
            upper = network.upper_value,
            "derived network division"
        );
        Ok(network)
    }

    /// Returns the division holding the host bits (below the top `prefix_len` bits) of this
    /// division.
    ///
    /// When the host values are not contiguous the result is the smallest division enclosing
    /// them, so it may hold values no member of this division maps to. [Self::mask] with the
    /// low `bit_count - prefix_len` bits set returns [Error::MaskMismatch] in that case.
    pub fn to_host(&self, prefix_len: u32) -> Result<Self, Error> {
        let host_mask = self.host_mask(prefix_len)?;
        let masker = mask_range(self.value, self.upper_value, host_mask, self.max_value());
        let host = self.with_range(
            masker.masked_lower(self.value, host_mask),
            masker.masked_upper(self.upper_value, host_mask),
        );
        trace!(
            prefix_len,
            lower = host.value,
            upper = host.upper_value,
            sequential = masker.is_sequential(),
            "derived host division"
        );
        Ok(host)
    }

    /// Returns the division with the host bits (below the top `prefix_len` bits) of every value
    /// cleared.
    ///
    /// Returns [Error::MaskMismatch] if the cleared values are not contiguous, unless
    /// `boundaries_only` is set, in which case only the bounds of the division are cleared.
    pub fn to_zero_host(&self, prefix_len: u32, boundaries_only: bool) -> Result<Self, Error> {
        let network_mask = self.max_value() & !self.host_mask(prefix_len)?;
        if !boundaries_only {
            return self.mask(network_mask);
        }
        // Clearing low bits never reorders values
        let zero_host = self.with_range(
            self.value & network_mask,
            self.upper_value & network_mask,
        );
        trace!(
            prefix_len,
            lower = zero_host.value,
            upper = zero_host.upper_value,
            "derived zero host boundaries"
        );
        Ok(zero_host)
    }

    /// Returns the division with the host bits (below the top `prefix_len` bits) of every value
    /// set.
    ///
    /// Returns [Error::MaskMismatch] if the resulting values are not contiguous.
    pub fn to_max_host(&self, prefix_len: u32) -> Result<Self, Error> {
        let host_mask = self.host_mask(prefix_len)?;
        self.bitwise_or(host_mask)
    }

    fn host_mask(&self, prefix_len: u32) -> Result<u64, Error> {
        if prefix_len > self.bit_count {
            return Err(Error::InvalidPrefixLength(prefix_len, self.bit_count));
        }
        Ok(max_value(self.bit_count - prefix_len))
    }

    fn with_range(&self, value: u64, upper_value: u64) -> Self {
        Self {
            value,
            upper_value,
            bit_count: self.bit_count,
        }
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Division {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let bit_count = u.int_in_range(1..=u64::BITS)?;
        let max_value = max_value::<u64>(bit_count);
        let value = u.int_in_range(0..=max_value)?;
        let upper_value = u.int_in_range(value..=max_value)?;
        Ok(Self {
            value,
            upper_value,
            bit_count,
        })
    }
}

/// A division of up to 128 bits holding every value in `[value, upper_value]`.
///
/// Masking goes through [mask_extended_range], so divisions that are only ranged in their low
/// 64 bits are handled at 64-bit precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WideDivision {
    value: u128,
    upper_value: u128,
    bit_count: u32,
}

impl WideDivision {
    /// Creates a `bit_count`-bit division holding `[value, upper_value]`.
    pub fn new(value: u128, upper_value: u128, bit_count: u32) -> Result<Self, Error> {
        if bit_count == 0 || bit_count > u128::BITS {
            return Err(Error::InvalidBitCount(bit_count));
        }
        if value > upper_value {
            return Err(Error::InvalidRange(value, upper_value));
        }
        let max_value = max_value::<u128>(bit_count);
        if upper_value > max_value {
            return Err(Error::ValueTooLarge(upper_value, max_value));
        }
        Ok(Self {
            value,
            upper_value,
            bit_count,
        })
    }

    /// Creates a `bit_count`-bit division holding only `value`.
    pub fn single(value: u128, bit_count: u32) -> Result<Self, Error> {
        Self::new(value, value, bit_count)
    }

    /// Creates a `bit_count`-bit division holding every value of its width.
    pub fn full(bit_count: u32) -> Result<Self, Error> {
        Self::new(0, max_value(bit_count), bit_count)
    }

    /// Returns the lowest value in the division.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// Returns the highest value in the division.
    pub fn upper_value(&self) -> u128 {
        self.upper_value
    }

    /// Returns the width of the division.
    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Returns the largest value a division of this width can hold.
    pub fn max_value(&self) -> u128 {
        max_value(self.bit_count)
    }

    /// Returns true if the division holds more than one value.
    pub fn is_multiple(&self) -> bool {
        self.value != self.upper_value
    }

    /// Returns the number of values in the division, or `None` if it holds all `2^128`.
    pub fn count(&self) -> Option<u128> {
        (self.upper_value - self.value).checked_add(1)
    }

    /// Masks every value of the division with `mask`.
    ///
    /// Mask bits beyond the width of the division are ignored. Returns
    /// [Error::MaskMismatch] if the masked values are not contiguous.
    pub fn mask(&self, mask: u128) -> Result<Self, Error> {
        let mask = mask & self.max_value();
        let (lower, upper, sequential) = self.masked(mask);
        if !sequential {
            let mismatch = mask_string(self.value, self.upper_value, mask);
            debug!(%mismatch, "masked range is not sequential");
            return Err(Error::MaskMismatch(mismatch));
        }
        Ok(self.with_range(lower, upper))
    }

    /// OR-s every value of the division with `mask`.
    ///
    /// Mask bits beyond the width of the division are ignored. Returns
    /// [Error::MaskMismatch] if the OR-ed values are not contiguous.
    pub fn bitwise_or(&self, mask: u128) -> Result<Self, Error> {
        let max_value = self.max_value();
        let mask = mask & max_value;
        let orer = BitwiseOrer::new(self.value, self.upper_value, mask, max_value);
        if !orer.is_sequential() {
            let mismatch = mask_string(self.value, self.upper_value, mask);
            debug!(%mismatch, "OR-ed range is not sequential");
            return Err(Error::MaskMismatch(mismatch));
        }
        Ok(self.with_range(
            orer.ored_lower(self.value, mask),
            orer.ored_upper(self.upper_value, mask),
        ))
    }

    /// Returns the division spanning every host of the networks in this division, keeping the
    /// top `prefix_len` bits.
    pub fn to_network(&self, prefix_len: u32) -> Result<Self, Error> {
        let host_mask = self.host_mask(prefix_len)?;
        let network = self.with_range(self.value & !host_mask, self.upper_value | host_mask);
        trace!(
            prefix_len,
            lower = network.value,
            upper = network.upper_value,
            "derived network division"
        );
        Ok(network)
    }

    /// Returns the division holding the host bits (below the top `prefix_len` bits) of this
    /// division.
    ///
    /// When the host values are not contiguous the result is the smallest division enclosing
    /// them, so it may hold values no member of this division maps to. [Self::mask] with the
    /// low `bit_count - prefix_len` bits set returns [Error::MaskMismatch] in that case.
    pub fn to_host(&self, prefix_len: u32) -> Result<Self, Error> {
        let host_mask = self.host_mask(prefix_len)?;
        let (lower, upper, sequential) = self.masked(host_mask);
        let host = self.with_range(lower, upper);
        trace!(
            prefix_len,
            lower = host.value,
            upper = host.upper_value,
            sequential,
            "derived host division"
        );
        Ok(host)
    }

    /// Masks the division limb by limb, returning the bounds and whether they are sequential.
    fn masked(&self, mask: u128) -> (u128, u128, bool) {
        let (extended_value, value) = split(self.value);
        let (extended_upper_value, upper_value) = split(self.upper_value);
        let (extended_mask, mask) = split(mask);
        let (extended_max_value, max_value) = split(self.max_value());
        let masker = mask_extended_range(
            value,
            extended_value,
            upper_value,
            extended_upper_value,
            mask,
            extended_mask,
            max_value,
            extended_max_value,
        );
        let lower = join(
            masker.extended_masked_lower(extended_value, extended_mask),
            masker.masked_lower(value, mask),
        );
        let upper = join(
            masker.extended_masked_upper(extended_upper_value, extended_mask),
            masker.masked_upper(upper_value, mask),
        );
        (lower, upper, masker.is_sequential())
    }

    /// Returns the division with the host bits (below the top `prefix_len` bits) of every value
    /// cleared.
    ///
    /// Returns [Error::MaskMismatch] if the cleared values are not contiguous, unless
    /// `boundaries_only` is set, in which case only the bounds of the division are cleared.
    pub fn to_zero_host(&self, prefix_len: u32, boundaries_only: bool) -> Result<Self, Error> {
        let network_mask = self.max_value() & !self.host_mask(prefix_len)?;
        if !boundaries_only {
            return self.mask(network_mask);
        }
        // Clearing low bits never reorders values
        let zero_host = self.with_range(
            self.value & network_mask,
            self.upper_value & network_mask,
        );
        trace!(
            prefix_len,
            lower = zero_host.value,
            upper = zero_host.upper_value,
            "derived zero host boundaries"
        );
        Ok(zero_host)
    }

    /// Returns the division with the host bits (below the top `prefix_len` bits) of every value
    /// set.
    ///
    /// Returns [Error::MaskMismatch] if the resulting values are not contiguous.
    pub fn to_max_host(&self, prefix_len: u32) -> Result<Self, Error> {
        let host_mask = self.host_mask(prefix_len)?;
        self.bitwise_or(host_mask)
    }

    fn host_mask(&self, prefix_len: u32) -> Result<u128, Error> {
        if prefix_len > self.bit_count {
            return Err(Error::InvalidPrefixLength(prefix_len, self.bit_count));
        }
        Ok(max_value(self.bit_count - prefix_len))
    }

    fn with_range(&self, value: u128, upper_value: u128) -> Self {
        Self {
            value,
            upper_value,
            bit_count: self.bit_count,
        }
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for WideDivision {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let bit_count = u.int_in_range(1..=u128::BITS)?;
        let max_value = max_value::<u128>(bit_count);
        let value = u.int_in_range(0..=max_value)?;
        let upper_value = u.int_in_range(value..=max_value)?;
        Ok(Self {
            value,
            upper_value,
            bit_count,
        })
    }
}
