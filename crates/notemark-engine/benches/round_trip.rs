use criterion::{Criterion, criterion_group, criterion_main};
use notemark_engine::{ExportOptions, ParseOptions, parse_markdown, to_markdown, verify_round_trip};
mod common;

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    let options = ParseOptions::default();
    let original = parse_markdown(&content, &options).tree;

    group.bench_function("to_markdown", |b| {
        b.iter(|| to_markdown(std::hint::black_box(&original), &ExportOptions::default()));
    });

    let reimported = parse_markdown(&to_markdown(&original, &ExportOptions::default()), &options).tree;
    group.bench_function("verify_round_trip", |b| {
        b.iter(|| verify_round_trip(std::hint::black_box(&original), &reimported));
    });

    group.finish();
}

criterion_group!(benches, bench_round_trip);
criterion_main!(benches);
