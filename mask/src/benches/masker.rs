use criterion::{criterion_group, Criterion};
use ipaddr_mask::mask_range;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn bench_mask_range(c: &mut Criterion) {
    for bits in [8u32, 16, 32, 64] {
        let max_value = u64::MAX >> (64 - bits);
        let mut rng = StdRng::seed_from_u64(bits as u64);
        let cases: Vec<(u64, u64, u64)> = (0..1_024)
            .map(|_| {
                let a = rng.gen_range(0..=max_value);
                let b = rng.gen_range(0..=max_value);
                (a.min(b), a.max(b), rng.gen_range(0..=max_value))
            })
            .collect();
        c.bench_function(
            &format!("{}/fn=mask_range bits={bits}", module_path!()),
            |b| {
                b.iter(|| {
                    for &(value, upper_value, mask_value) in &cases {
                        let masker = mask_range(value, upper_value, mask_value, max_value);
                        black_box((
                            masker.masked_lower(value, mask_value),
                            masker.masked_upper(upper_value, mask_value),
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
    targets = bench_mask_range,
}
