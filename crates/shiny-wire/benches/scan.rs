use bson::rawdoc;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shiny_wire::{count_frames, nested_field, nth_frame_field, scalar_field};

// ── Helpers ─────────────────────────────────────────────────

fn wide_doc(fields: usize) -> Vec<u8> {
    let mut doc = bson::raw::RawDocumentBuf::new();
    for i in 0..fields {
        let key = bson::raw::CString::try_from(format!("field_{i}").as_str())
            .expect("generated key is a valid cstring");
        doc.append(key, (i as i32) * 3);
    }
    doc.append(
        bson::cstr!("Address"),
        rawdoc! { "City": "New York", "Zip": "10001" },
    );
    doc.append(bson::cstr!("last"), 999_i32);
    doc.into_bytes()
}

fn result_set(frames: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for i in 0..frames {
        let doc = rawdoc! {
            "EmployeeID": (274 + (i % 17)) as i32,
            "CustomerID": (1000 + i) as i32,
            "TotalDue": 23130.2957 + i as f64,
        };
        buf.extend_from_slice(doc.as_bytes());
    }
    buf
}

// ── Field scan ──────────────────────────────────────────────

fn bench_scalar_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_field");
    for n in [10, 100, 1_000] {
        let doc = wide_doc(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &doc, |b, doc| {
            b.iter(|| scalar_field(doc, "last"));
        });
    }
    group.finish();
}

fn bench_nested_field(c: &mut Criterion) {
    let doc = wide_doc(100);
    c.bench_function("nested_field", |b| {
        b.iter(|| nested_field(&doc, "Address.City"));
    });
}

// ── Frame walk ──────────────────────────────────────────────

fn bench_frame_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("frames");
    for n in [100, 1_000, 10_000] {
        let buf = result_set(n);
        group.bench_with_input(BenchmarkId::new("count", n), &buf, |b, buf| {
            b.iter(|| count_frames(buf));
        });
        group.bench_with_input(BenchmarkId::new("nth_field", n), &buf, |b, buf| {
            b.iter(|| nth_frame_field(buf, n - 1, "TotalDue"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scalar_field, bench_nested_field, bench_frame_walk);
criterion_main!(benches);
