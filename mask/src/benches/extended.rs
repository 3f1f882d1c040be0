use criterion::{criterion_group, Criterion};
use ipaddr_mask::mask_extended_range;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn bench_mask_extended_range(c: &mut Criterion) {
    // Whether the high limb varies across the range decides which precision is used
    for varying in [false, true] {
        let mut rng = StdRng::seed_from_u64(varying as u64);
        let cases: Vec<[u64; 6]> = (0..1_024)
            .map(|_| {
                let extended = rng.gen::<u64>() >> 1;
                let extended_upper = if varying { extended + 1 } else { extended };
                let a = rng.gen::<u64>();
                let b = rng.gen::<u64>();
                let (value, upper_value) = if varying { (a, b) } else { (a.min(b), a.max(b)) };
                [
                    value,
                    extended,
                    upper_value,
                    extended_upper,
                    rng.gen(),
                    rng.gen(),
                ]
            })
            .collect();
        c.bench_function(
            &format!(
                "{}/fn=mask_extended_range varying={varying}",
                module_path!()
            ),
            |b| {
                b.iter(|| {
                    for &[value, extended, upper_value, extended_upper, mask, extended_mask] in
                        &cases
                    {
                        let masker = mask_extended_range(
                            value,
                            extended,
                            upper_value,
                            extended_upper,
                            mask,
                            extended_mask,
                            u64::MAX,
                            u64::MAX,
                        );
                        black_box((
                            masker.extended_masked_lower(extended, extended_mask),
                            masker.masked_lower(value, mask),
                            masker.extended_masked_upper(extended_upper, extended_mask),
                            masker.masked_upper(upper_value, mask),
                            masker.is_sequential(),
                        ));
                    }
                });
            },
        );
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_mask_extended_range,
}
