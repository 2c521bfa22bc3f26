use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ordered_json::{from_str, to_string, to_string_pretty, List, OrderedMap, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn benchmark_map_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");

    for size in [100, 1_000, 10_000].iter() {
        let keys: Vec<String> = (0..*size).map(|i| format!("key-{}", i)).collect();

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = OrderedMap::with_capacity(keys.len());
                for (i, k) in keys.iter().enumerate() {
                    map.set(k.clone(), i);
                }
                black_box(map)
            })
        });

        group.bench_with_input(BenchmarkId::new("hash_map", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = HashMap::with_capacity(keys.len());
                for (i, k) in keys.iter().enumerate() {
                    map.insert(k.clone(), i);
                }
                black_box(map)
            })
        });
    }
    group.finish();
}

fn benchmark_map_churn(c: &mut Criterion) {
    let keys: Vec<String> = (0..1_000).map(|i| format!("key-{}", i)).collect();
    let mut map = OrderedMap::new();
    for (i, k) in keys.iter().enumerate() {
        map.set(k.clone(), i);
    }

    c.bench_function("map_remove_reinsert", |b| {
        b.iter(|| {
            for k in keys.iter().step_by(3) {
                if let Some(v) = map.remove(k.as_str()) {
                    map.set(k.clone(), v);
                }
            }
        })
    });

    c.bench_function("map_lookup", |b| {
        b.iter(|| {
            let mut sum = 0;
            for k in &keys {
                sum += map.get(k.as_str()).copied().unwrap_or(0);
            }
            black_box(sum)
        })
    });
}

fn benchmark_list_moves(c: &mut Criterion) {
    let mut list: List<u32> = (0..1_000).collect();
    let ids: Vec<_> = (0..1_000).filter_map(|i| list.at(i)).collect();

    c.bench_function("list_move_to_front", |b| {
        b.iter(|| {
            for id in ids.iter().rev() {
                list.move_to_front(black_box(*id));
            }
        })
    });

    c.bench_function("list_iterate", |b| {
        b.iter(|| black_box(list.iter().map(|v| u64::from(*v)).sum::<u64>()))
    });
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

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let json = r#"{"id":123,"name":"Alice","email":"alice@example.com","active":true}"#;

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(json)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 100, 500].iter() {
        let products = products(*size);

        group.bench_with_input(BenchmarkId::new("compact", size), &products, |b, p| {
            b.iter(|| to_string(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("pretty", size), &products, |b, p| {
            b.iter(|| to_string_pretty(black_box(p)))
        });
    }
    group.finish();
}

fn benchmark_decode_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_value");

    for size in [10, 100, 500].iter() {
        let json = to_string(&products(*size)).unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("value", size), &json, |b, json| {
            b.iter(|| from_str::<Value>(black_box(json)))
        });
        group.bench_with_input(BenchmarkId::new("decode_json", size), &json, |b, json| {
            b.iter(|| {
                let mut list: List<Value> = List::new();
                list.decode_json(black_box(json.as_bytes())).map(|_| list)
            })
        });
    }
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let products = products(100);
    let mut group = c.benchmark_group("comparison");

    group.bench_function("ordered_json_serialize", |b| {
        b.iter(|| ordered_json::to_string(black_box(&products)))
    });

    group.bench_function("serde_json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&products)))
    });

    let json = serde_json::to_string(&products).unwrap_or_default();

    group.bench_function("ordered_json_deserialize", |b| {
        b.iter(|| ordered_json::from_str::<Vec<Product>>(black_box(&json)))
    });

    group.bench_function("serde_json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Vec<Product>>(black_box(&json)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map_insert,
    benchmark_map_churn,
    benchmark_list_moves,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_decode_value,
    benchmark_comparison_with_json
);
criterion_main!(benches);
