use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use yaml_stringify::{stringify, stringify_with_options, to_string, yaml, DumpOptions, Value};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{:04}", i),
                name: format!("Product {}", i),
                price: 9.99 + i as f64 * 0.37,
                quantity: i * 3,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, products| {
            b.iter(|| to_string(black_box(products)))
        });
    }
    group.finish();
}

fn benchmark_serialize_nested(c: &mut Criterion) {
    let data: Vec<NestedData> = (0..50)
        .map(|i| NestedData {
            id: i,
            metadata: Metadata {
                created: "2024-01-01".to_string(),
                updated: "2024-06-30".to_string(),
                version: i % 7,
            },
            tags: vec!["alpha".to_string(), "beta".to_string(), "true".to_string()],
        })
        .collect();

    c.bench_function("serialize_nested", |b| b.iter(|| to_string(black_box(&data))));
}

fn benchmark_stringify_flow(c: &mut Criterion) {
    let value = yaml!({
        "matrix": [[1, 2, 3], [4, 5, 6], [7, 8, 9]],
        "labels": { "x": "width", "y": "height" },
        "scale": 0.125
    });
    let options = DumpOptions::new().with_flow_level(1);

    c.bench_function("stringify_flow", |b| {
        b.iter(|| stringify_with_options(black_box(&value), &options))
    });
}

fn benchmark_strings(c: &mut Criterion) {
    let long_line = "lorem ipsum dolor sit amet ".repeat(20);
    let value = yaml!({
        "plain": "just some words",
        "quoted": "key: value",
        "ambiguous": "0x1F",
        "multiline": "first line\nsecond line\n",
        "folded": (format!("{}\n{}", long_line, long_line)),
        "escaped": "bell\u{7}tab\t"
    });

    c.bench_function("stringify_string_styles", |b| {
        b.iter(|| stringify(black_box(&value)))
    });
}

fn benchmark_floats(c: &mut Criterion) {
    let value = Value::Sequence(
        (0..200)
            .map(|i| Value::from((i as f64).powi(3) / 7.0 - 1e-7 * i as f64))
            .collect(),
    );

    c.bench_function("stringify_floats", |b| b.iter(|| stringify(black_box(&value))));
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_serialize_array,
    benchmark_serialize_nested,
    benchmark_stringify_flow,
    benchmark_strings,
    benchmark_floats
);
criterion_main!(benches);
