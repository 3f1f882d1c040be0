#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use ipaddr_mask::mask_extended_range;
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct FuzzInput {
    value: u128,
    upper_value: u128,
    mask: u128,
    max_value: u128,
}

impl<'a> Arbitrary<'a> for FuzzInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let bits = u.int_in_range(65..=128u32)?;
        let max_value = u128::MAX >> (128 - bits);
        // Start near a limb boundary so the high limb tends to vary
        let value = if u.arbitrary()? {
            let high = u.int_in_range(0..=(max_value >> 64) as u64)?;
            let below = u128::from(u.arbitrary::<u16>()?);
            (u128::from(high) << 64).saturating_sub(below)
        } else {
            u.int_in_range(0..=max_value)?
        };
        let span = u128::from(u.arbitrary::<u16>()?);
        let upper_value = value.saturating_add(span).min(max_value);
        let mask = u.int_in_range(0..=max_value)?;
        Ok(FuzzInput {
            value,
            upper_value,
            mask,
            max_value,
        })
    }
}

fn limbs(value: u128) -> (u64, u64) {
    ((value >> 64) as u64, value as u64)
}

fn fuzz(input: FuzzInput) {
    let FuzzInput {
        value,
        upper_value,
        mask,
        max_value,
    } = input;
    let (extended_value, low_value) = limbs(value);
    let (extended_upper_value, low_upper_value) = limbs(upper_value);
    let (extended_mask, low_mask) = limbs(mask);
    let (extended_max_value, low_max_value) = limbs(max_value);
    let masker = mask_extended_range(
        low_value,
        extended_value,
        low_upper_value,
        extended_upper_value,
        low_mask,
        extended_mask,
        low_max_value,
        extended_max_value,
    );
    let lower = (u128::from(masker.extended_masked_lower(extended_value, extended_mask)) << 64)
        | u128::from(masker.masked_lower(low_value, low_mask));
    let upper = (u128::from(masker.extended_masked_upper(extended_upper_value, extended_mask))
        << 64)
        | u128::from(masker.masked_upper(low_upper_value, low_mask));

    let mut image: Vec<u128> = (value..=upper_value).map(|x| x & mask).collect();
    image.sort_unstable();
    image.dedup();
    let sequential = image.windows(2).all(|pair| pair[1] == pair[0] + 1);

    assert_eq!(lower, image[0]);
    assert_eq!(upper, image[image.len() - 1]);
    assert_eq!(masker.is_sequential(), sequential);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
