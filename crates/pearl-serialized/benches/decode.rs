//! Benchmarks for the serialized-value decoder.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pearl_serialized::Decoder;

/// Build a `pear.conf`-like array with `entries` string pairs.
fn config_blob(entries: usize) -> String {
    let mut body = String::new();
    for i in 0..entries {
        let key = format!("key_{i}");
        let value = format!("/usr/share/php/pear/data/{i}");
        body.push_str(&format!(
            "s:{}:\"{key}\";s:{}:\"{value}\";",
            key.len(),
            value.len()
        ));
    }
    format!("a:{entries}:{{{body}}}")
}

/// Build `depth` nested single-element arrays around an int.
fn nested_blob(depth: usize) -> String {
    let mut out = "a:1:{i:0;".repeat(depth);
    out.push_str("i:1;");
    out.push_str(&"}".repeat(depth));
    out
}

fn bench_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_flat");
    let decoder = Decoder::new();

    for entries in [10, 100, 1000] {
        let input = config_blob(entries);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entries), &input, |b, input| {
            b.iter(|| decoder.parse(black_box(input)));
        });
    }

    group.finish();
}

fn bench_filtered(c: &mut Criterion) {
    let input = config_blob(1000);
    let Ok(decoder) = Decoder::with_attribute_filter("key_1.*") else {
        return;
    };
    c.bench_function("decode_filtered_1000", |b| {
        b.iter(|| decoder.parse(black_box(&input)));
    });
}

fn bench_nested(c: &mut Criterion) {
    let input = nested_blob(256);
    let decoder = Decoder::new();
    c.bench_function("decode_nested_256", |b| {
        b.iter(|| decoder.parse(black_box(&input)));
    });
}

criterion_group!(benches, bench_flat, bench_filtered, bench_nested);
criterion_main!(benches);
