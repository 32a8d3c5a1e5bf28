use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fennec::{CreateArgs, Database, Document, SearchParams};
use rand::Rng;
use serde_json::json;

const VOCABULARY: &[&str] = &[
    "quick", "brown", "fox", "jumps", "lazy", "dog", "river", "mountain", "silent", "storm",
    "amber", "winter", "harvest", "signal", "copper", "meadow", "lantern", "compass", "orchard",
    "thunder",
];

fn random_document(id: usize, words: usize) -> Document {
    let mut rng = rand::thread_rng();
    let text: String = (0..words)
        .map(|_| VOCABULARY[rng.gen_range(0..VOCABULARY.len())])
        .collect::<Vec<_>>()
        .join(" ");

    json!({
        "id": id.to_string(),
        "text": text,
        "price": rng.gen_range(0.0..100.0),
        "in_stock": rng.gen_bool(0.5),
    })
    .as_object()
    .unwrap()
    .clone()
}

fn populated(count: usize) -> Database {
    let mut db = Database::create(CreateArgs::new(json!({
        "text": "string",
        "price": "number",
        "in_stock": "boolean",
    })))
    .unwrap();
    for id in 0..count {
        db.insert(random_document(id, 16)).unwrap();
    }
    db
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_single", |b| {
        let mut db = populated(0);
        let mut id = 0;
        b.iter(|| {
            db.insert(black_box(random_document(id, 16))).unwrap();
            id += 1;
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_term");
    for size in [100, 1_000, 10_000] {
        let db = populated(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &db, |b, db| {
            b.iter(|| db.search(black_box(&SearchParams::term("quick brown"))).unwrap());
        });
    }
    group.finish();
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let db = populated(1_000);
    c.bench_function("search_fuzzy_tolerance_1", |b| {
        let mut params = SearchParams::term("quik");
        params.tolerance = Some(1);
        b.iter(|| db.search(black_box(&params)).unwrap());
    });
}

fn bench_filtered_sorted_search(c: &mut Criterion) {
    let db = populated(1_000);
    let params: SearchParams = serde_json::from_value(json!({
        "term": "fox",
        "where": {"in_stock": true, "price": {"between": [10, 60]}},
        "sortBy": {"property": "price", "order": "ASC"}
    }))
    .unwrap();
    c.bench_function("search_filtered_sorted", |b| {
        b.iter(|| db.search(black_box(&params)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_search,
    bench_fuzzy_search,
    bench_filtered_sorted_search
);
criterion_main!(benches);
