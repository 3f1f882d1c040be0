use criterion::criterion_main;

mod extended;
mod masker;

criterion_main!(masker::benches, extended::benches, orer::benches);
