#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use ipaddr_mask::mask_range;
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct FuzzInput {
    value: u64,
    upper_value: u64,
    mask_value: u64,
    max_value: u64,
}

impl<'a> Arbitrary<'a> for FuzzInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let bits = u.int_in_range(1..=64u32)?;
        let max_value = u64::MAX >> (64 - bits);
        let value = u.int_in_range(0..=max_value)?;
        // Keep the range small enough to enumerate
        let span = u64::from(u.arbitrary::<u16>()?);
        let upper_value = value.saturating_add(span).min(max_value);
        let mask_value = u.int_in_range(0..=max_value)?;
        // Also exercise the unbounded width
        let max_value = if u.arbitrary()? { u64::MAX } else { max_value };
        Ok(FuzzInput {
            value,
            upper_value,
            mask_value,
            max_value,
        })
    }
}

fn fuzz(input: FuzzInput) {
    let FuzzInput {
        value,
        upper_value,
        mask_value,
        max_value,
    } = input;
    let masker = mask_range(value, upper_value, mask_value, max_value);

    let mut image: Vec<u64> = (value..=upper_value).map(|x| x & mask_value).collect();
    image.sort_unstable();
    image.dedup();
    let sequential = image.windows(2).all(|pair| pair[1] == pair[0] + 1);

    assert_eq!(masker.masked_lower(value, mask_value), image[0]);
    assert_eq!(masker.masked_upper(upper_value, mask_value), image[image.len() - 1]);
    assert_eq!(masker.is_sequential(), sequential);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
