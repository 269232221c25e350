//! Benchmarks for struct inference operations
//!
//! Run with: cargo bench -p shapegen-core

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use shapegen_core::inference::{FormatRegistry, SampleValueKind, StructInferrer, to_field_name};

/// Generate a CSV sample with the given number of data records
fn generate_sample_csv(count: usize) -> String {
    let mut csv = String::from("order_id,customer-name,is_paid,total_usd,placed_at,note\n");
    for i in 0..count {
        csv.push_str(&format!(
            "{},\"Customer {}\",{},{},2024/01/{:02} 10:30:00,\n",
            1000 + i,
            i,
            i % 2 == 0,
            10.0 + (i as f64 * 1.25),
            1 + (i % 28),
        ));
    }
    csv
}

/// Benchmark sniffing of individual values
fn bench_value_sniffing(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_sniffing");
    let inferrer = StructInferrer::new();

    let test_cases = vec![
        ("bool", "true"),
        ("int", "123456"),
        ("float", "3.14159"),
        ("timestamp", "2024/01/15 10:30:00"),
        ("plain_string", "hello world"),
    ];

    for (name, value) in test_cases {
        group.bench_with_input(BenchmarkId::new("sniff", name), &value, |b, value| {
            b.iter(|| black_box(inferrer.sniff(value)));
        });
    }

    group.finish();
}

/// Benchmark header cell conversion
fn bench_field_naming(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_naming");

    for header in ["id", "billing-id", "customer_account_number", "created:at"] {
        group.bench_with_input(BenchmarkId::new("to_field_name", header), &header, |b, h| {
            b.iter(|| black_box(to_field_name(h)));
        });
    }

    group.finish();
}

/// Benchmark parsing plus inference over samples of varying size
fn bench_struct_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("struct_inference");
    let registry = FormatRegistry::with_defaults();
    let inferrer = StructInferrer::new();

    for count in [10, 100, 1000].iter() {
        let csv = generate_sample_csv(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("infer_all", count), &csv, |b, csv| {
            b.iter(|| {
                let sample = registry
                    .parse("csv", &mut csv.as_bytes())
                    .expect("sample parses");
                black_box(inferrer.infer_sample_all(&sample))
            });
        });
    }

    group.finish();
}

/// Benchmark kind merging
fn bench_kind_merging(c: &mut Criterion) {
    let mut group = c.benchmark_group("kind_merging");

    group.bench_function("merge_numbers", |b| {
        b.iter(|| black_box(SampleValueKind::Int64.merge(black_box(SampleValueKind::Float64))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_value_sniffing,
    bench_field_naming,
    bench_struct_inference,
    bench_kind_merging
);
criterion_main!(benches);
