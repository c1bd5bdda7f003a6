use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poker_test::{
    analysis::PokerTest,
    classify::{classify, digit_extraction, DigitLength},
    source::{NumberSource, RandomSource},
};

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_five_digits", |b| {
        b.iter(|| {
            let digits = digit_extraction(black_box(0.72484), DigitLength::Five);
            classify(&digits, DigitLength::Five)
        })
    });
}

fn bench_run(c: &mut Criterion) {
    let numbers = RandomSource::from_seed(1, 10_000)
        .next_batch()
        .expect("random source cannot fail");

    let mut group = c.benchmark_group("run_10k");
    for length in DigitLength::ALL {
        let test = PokerTest::new(length);
        group.bench_function(format!("k{}", length), |b| {
            b.iter(|| test.run(black_box(&numbers)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_run);
criterion_main!(benches);
