// Performance benchmarks for the matching pipeline
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use shelfmatch_core::{candidates_for, Catalog, CatalogIndex, Product};
use shelfmatch_similarity::{rank_candidates, Metric};

const WORDS: &[&str] = &[
    "mleko", "jablka", "chleb", "rohlik", "maslo", "jogurt", "syr", "kureci", "prsa", "zitny",
    "polotucne", "plnotucne", "gala", "golden", "trvanlive", "bile", "cerstve", "1kg", "500g",
];

fn random_name(rng: &mut impl Rng) -> String {
    let count = rng.random_range(2..=5);
    (0..count)
        .map(|_| *WORDS.choose(rng).unwrap())
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_catalog(size: usize, tag: Catalog, seed: u64) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|i| {
            Product::new(random_name(&mut rng), format!("http://{tag}/{i}"), 9.9, tag).unwrap()
        })
        .collect()
}

fn benchmark_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("catalog", size), size, |b, &size| {
            b.iter_batched(
                || random_catalog(size, Catalog::A, 7),
                |products| CatalogIndex::build(Catalog::A, products).unwrap(),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");

    let index = CatalogIndex::build(Catalog::B, random_catalog(10_000, Catalog::B, 11)).unwrap();
    let queries = random_catalog(100, Catalog::A, 13);

    group.bench_function("candidates_for_10k", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(candidates_for(query, &index));
            }
        });
    });

    group.finish();
}

fn benchmark_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");

    let left = random_catalog(200, Catalog::A, 17);
    let right = random_catalog(200, Catalog::B, 23);

    for metric in [Metric::Prefix, Metric::CommonSubsequence, Metric::EditDistance] {
        group.bench_function(metric.name(), |b| {
            b.iter(|| {
                for (product, candidate) in left.iter().zip(&right) {
                    black_box(metric.score(product, candidate));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    let index = CatalogIndex::build(Catalog::B, random_catalog(10_000, Catalog::B, 19)).unwrap();
    let query = Product::new("mleko polotucne trvanlive 1kg", "http://a/0", 9.9, Catalog::A).unwrap();
    let candidates = candidates_for(&query, &index);

    group.bench_function("rank_edit_distance", |b| {
        b.iter(|| black_box(rank_candidates(&query, &candidates, Metric::EditDistance)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_index_build,
    benchmark_candidates,
    benchmark_metrics,
    benchmark_ranking
);
criterion_main!(benches);
