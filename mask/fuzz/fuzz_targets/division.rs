#![no_main]

use arbitrary::Arbitrary;
use ipaddr_mask::{Division, Error, WideDivision};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Mask(Division, u64),
    BitwiseOr(Division, u64),
    Prefix(Division, u32),
    MatchesRange(Division, u64, u64, u64),
    Host(Division, u32, bool),
    WideMask(WideDivision, u128),
    WideBitwiseOr(WideDivision, u128),
    WidePrefix(WideDivision, u32),
    WideHost(WideDivision, u32, bool),
}

fn check(result: Result<(u128, u128, u32), Error>, value: u128, upper_value: u128, bit_count: u32) {
    match result {
        Ok((lower, upper, bits)) => {
            assert!(lower <= upper);
            assert_eq!(bits, bit_count);
            assert!(bits == 128 || upper >> bits == 0);
        }
        Err(Error::MaskMismatch(mismatch)) => {
            assert!(mismatch.starts_with(&format!("{value}-{upper_value} /")));
        }
        Err(Error::InvalidPrefixLength(prefix_len, bits)) => {
            assert!(prefix_len > bits);
            assert_eq!(bits, bit_count);
        }
        Err(err) => panic!("unexpected error: {err}"),
    }
}

fn narrow(division: Result<Division, Error>) -> Result<(u128, u128, u32), Error> {
    division.map(|d| (d.value().into(), d.upper_value().into(), d.bit_count()))
}

fn wide(division: Result<WideDivision, Error>) -> Result<(u128, u128, u32), Error> {
    division.map(|d| (d.value(), d.upper_value(), d.bit_count()))
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Mask(d, mask) => {
            let (value, upper_value) = (d.value().into(), d.upper_value().into());
            check(narrow(d.mask(mask)), value, upper_value, d.bit_count());
        }
        FuzzInput::BitwiseOr(d, mask) => {
            let (value, upper_value) = (d.value().into(), d.upper_value().into());
            check(narrow(d.bitwise_or(mask)), value, upper_value, d.bit_count());
        }
        FuzzInput::Prefix(d, prefix_len) => {
            let prefix_len = prefix_len % 80;
            let (value, upper_value) = (d.value().into(), d.upper_value().into());
            let network = d.to_network(prefix_len);
            if let Ok(network) = network {
                assert!(network.value() <= d.value());
                assert!(network.upper_value() >= d.upper_value());
            }
            check(narrow(network), value, upper_value, d.bit_count());
            check(narrow(d.to_host(prefix_len)), value, upper_value, d.bit_count());
        }
        FuzzInput::MatchesRange(d, lower, upper, mask) => {
            if d.matches_range_with_mask(lower, upper, mask) {
                let masked = d.mask(mask).expect("matching range must be sequential");
                assert_eq!((masked.value(), masked.upper_value()), (lower, upper));
            }
        }
        FuzzInput::Host(d, prefix_len, boundaries_only) => {
            let prefix_len = prefix_len % 80;
            let (value, upper_value) = (d.value().into(), d.upper_value().into());
            let zero_host = d.to_zero_host(prefix_len, boundaries_only);
            match &zero_host {
                Ok(zero_host) => {
                    assert!(zero_host.value() <= d.value());
                    // Clearing host bits only keeps a range when one network is left
                    if !boundaries_only && prefix_len < d.bit_count() {
                        assert!(!zero_host.is_multiple());
                    }
                }
                Err(Error::MaskMismatch(_)) => assert!(!boundaries_only),
                Err(_) => assert!(prefix_len > d.bit_count()),
            }
            check(narrow(zero_host), value, upper_value, d.bit_count());
            check(narrow(d.to_max_host(prefix_len)), value, upper_value, d.bit_count());
        }
        FuzzInput::WideMask(d, mask) => {
            check(wide(d.mask(mask)), d.value(), d.upper_value(), d.bit_count());
        }
        FuzzInput::WideBitwiseOr(d, mask) => {
            check(wide(d.bitwise_or(mask)), d.value(), d.upper_value(), d.bit_count());
        }
        FuzzInput::WidePrefix(d, prefix_len) => {
            let prefix_len = prefix_len % 144;
            check(wide(d.to_network(prefix_len)), d.value(), d.upper_value(), d.bit_count());
            check(wide(d.to_host(prefix_len)), d.value(), d.upper_value(), d.bit_count());
        }
        FuzzInput::WideHost(d, prefix_len, boundaries_only) => {
            let prefix_len = prefix_len % 144;
            let zero_host = d.to_zero_host(prefix_len, boundaries_only);
            if boundaries_only && prefix_len <= d.bit_count() {
                assert!(zero_host.is_ok());
            }
            check(wide(zero_host), d.value(), d.upper_value(), d.bit_count());
            check(wide(d.to_max_host(prefix_len)), d.value(), d.upper_value(), d.bit_count());
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
