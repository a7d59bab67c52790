// Benchmarks for field declaration, blocking keys and comparator scoring
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dedupx::prelude::*;
use rand::prelude::*;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz ";

fn generate_random_string(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

fn generate_random_pairs(count: usize, len: usize) -> Vec<(String, String)> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            (
                generate_random_string(&mut rng, len),
                generate_random_string(&mut rng, len),
            )
        })
        .collect()
}

fn benchmark_declare(c: &mut Criterion) {
    let mut group = c.benchmark_group("declare_field");
    let comparators = Comparators::new();

    for type_name in ["ShortString", "String", "Text"] {
        group.bench_with_input(
            BenchmarkId::new("default", type_name),
            &type_name,
            |b, &type_name| {
                b.iter(|| {
                    let variant = declare_field(
                        black_box("name"),
                        type_name,
                        &FieldOptions::default(),
                        &comparators,
                    )
                    .unwrap();
                    black_box(variant);
                });
            },
        );
    }

    let corpus: Vec<String> = generate_random_pairs(1000, 40)
        .into_iter()
        .map(|(a, _)| a)
        .collect();
    let options = FieldOptions::default().with_corpus(corpus);
    group.bench_function("text_with_corpus_1000", |b| {
        b.iter(|| {
            let variant = declare_field("notes", "Text", black_box(&options), &comparators).unwrap();
            black_box(variant);
        });
    });

    group.finish();
}

fn benchmark_comparators(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let comparators = Comparators::new();
    let corpus: Vec<String> = generate_random_pairs(1000, 40)
        .into_iter()
        .map(|(a, _)| a)
        .collect();

    let candidates = [
        ("affine_gap", comparators.affine_gap()),
        ("crf", comparators.crf()),
        ("cosine", comparators.cosine(&corpus)),
    ];

    for len in [10, 40] {
        let pairs = generate_random_pairs(100, len);
        for (name, comparator) in &candidates {
            group.bench_with_input(BenchmarkId::new(*name, len), &pairs, |b, pairs| {
                b.iter(|| {
                    for (x, y) in pairs {
                        black_box(comparator.compare(black_box(x), black_box(y)));
                    }
                });
            });
        }
    }

    group.finish();
}

fn benchmark_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocking_keys");
    let variant = declare_field(
        "name",
        "ShortString",
        &FieldOptions::default(),
        &Comparators::new(),
    )
    .unwrap();
    let values: Vec<String> = generate_random_pairs(100, 30)
        .into_iter()
        .map(|(a, _)| a)
        .collect();

    group.bench_function("short_string_base_predicates", |b| {
        b.iter(|| {
            for value in &values {
                for predicate in variant.base_predicates() {
                    black_box(predicate.keys(value));
                }
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_declare, benchmark_comparators, benchmark_keys);
criterion_main!(benches);
