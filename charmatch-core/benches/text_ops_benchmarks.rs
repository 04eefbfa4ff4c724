//! Benchmarks for the text operations on growing inputs

use charmatch_core::{constants, utf16, CharMatcher};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Generate text with the given number of words, mixing spacing styles
fn generate_text(num_words: usize) -> Vec<u16> {
    let words = [
        "alpha", "  beta", "\tgamma", "delta  ", "\u{3000}epsilon", "zeta\n", "42",
    ];

    let text = words
        .iter()
        .cycle()
        .take(num_words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    utf16::encode(&text)
}

fn benchmark_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let ws = constants::whitespace();
    let digit = constants::digit();

    for size in [100, 1_000, 10_000].iter() {
        let text = generate_text(*size);
        group.throughput(Throughput::Elements(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("count_in", size), &text, |b, text| {
            b.iter(|| ws.count_in(black_box(text)));
        });
        group.bench_with_input(BenchmarkId::new("last_index_in", size), &text, |b, text| {
            b.iter(|| digit.last_index_in(black_box(text)));
        });
    }

    group.finish();
}

fn benchmark_transformations(c: &mut Criterion) {
    let mut group = c.benchmark_group("transformations");
    let ws = constants::whitespace();
    let vowels = CharMatcher::any_of_str("aeiou");

    for size in [100, 1_000, 10_000].iter() {
        let text = generate_text(*size);
        group.throughput(Throughput::Elements(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("remove_from", size), &text, |b, text| {
            b.iter(|| vowels.remove_from(black_box(text)));
        });
        group.bench_with_input(BenchmarkId::new("replace_from", size), &text, |b, text| {
            b.iter(|| vowels.replace_from(black_box(text), u16::from(b'*')));
        });
        group.bench_with_input(BenchmarkId::new("collapse_from", size), &text, |b, text| {
            b.iter(|| ws.collapse_from(black_box(text), u16::from(b' ')));
        });
        group.bench_with_input(
            BenchmarkId::new("trim_and_collapse_from", size),
            &text,
            |b, text| {
                b.iter(|| ws.trim_and_collapse_from(black_box(text), u16::from(b' ')));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_queries, benchmark_transformations);
criterion_main!(benches);
