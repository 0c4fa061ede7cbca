use blogdoc::{analyze, extract_text, normalize, render, score};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn load_fixture(name: &str) -> Option<String> {
    let path = Path::new("tests/fixtures").join(name).join("source.json");
    fs::read_to_string(&path).ok()
}

/// A large rich-tree post: `sections` headings, each followed by prose and a list.
fn synthetic_post(sections: usize) -> Value {
    let mut content = Vec::with_capacity(sections * 3);
    for i in 0..sections {
        content.push(serde_json::json!({
            "type": "heading",
            "attrs": {"level": 2 + (i % 3)},
            "content": [{"type": "text", "text": format!("Section {}", i)}]
        }));
        content.push(serde_json::json!({
            "type": "paragraph",
            "content": [
                {"type": "text", "text": "Automated pipelines catch regressions early. "},
                {"type": "text", "text": "Reviewers", "marks": [{"type": "bold"}]},
                {"type": "text", "text": " spend their time on design instead of <details>."}
            ]
        }));
        content.push(serde_json::json!({
            "type": "bulletList",
            "content": [
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Faster feedback"}]}]},
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Fewer surprises"}]}]}
            ]
        }));
    }
    serde_json::json!({"type": "doc", "content": content})
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for name in ["legacy-post", "rich-post", "stringified-legacy"] {
        let raw = match load_fixture(name) {
            Some(s) => s,
            None => continue,
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(_) => continue,
        };

        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::new("fixture", name), &value, |b, value| {
            b.iter(|| std::hint::black_box(normalize(std::hint::black_box(value))));
        });
    }

    for sections in [10, 100, 1000] {
        let value = synthetic_post(sections);
        group.bench_with_input(
            BenchmarkId::new("synthetic", sections),
            &value,
            |b, value| {
                b.iter(|| std::hint::black_box(normalize(std::hint::black_box(value))));
            },
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for sections in [10, 100, 1000] {
        let doc = normalize(&synthetic_post(sections));
        group.bench_with_input(BenchmarkId::new("synthetic", sections), &doc, |b, doc| {
            b.iter(|| std::hint::black_box(render(std::hint::black_box(doc))));
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let doc = normalize(&synthetic_post(100));
    let text = extract_text(&doc);

    group.bench_function("extract_text", |b| {
        b.iter(|| std::hint::black_box(extract_text(std::hint::black_box(&doc))))
    });
    group.bench_function("score", |b| {
        b.iter(|| std::hint::black_box(score(std::hint::black_box(&text))))
    });
    group.bench_function("analyze", |b| {
        b.iter(|| std::hint::black_box(analyze(std::hint::black_box(&doc))))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_render, bench_analysis);
criterion_main!(benches);
