//! End-to-end pipeline throughput benchmarks
//!
//! Measures parsing, importing and style resolution with varying:
//! - Section counts (1, 10, 100, 1000)
//! - Style sheet sizes (0, 10, 100 rules)
//!
//! Run benchmarks: `cargo bench --bench pipeline_throughput`
//!
//! Compare specific stages:
//! ```
//! cargo bench --bench pipeline_throughput -- "stages"
//! cargo bench --bench pipeline_throughput -- "sheet_size"
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use graphe::{MarkupParser, PathQuery, PipelineBuilder};
use serde_json::{Value, json};
use std::hint::black_box;

/// A document with `count` sections of mixed block and inline content.
fn generate_document(count: usize) -> String {
    let sections: String = (0..count)
        .map(|i| {
            format!(
                r#"<section id="s{i}" class="{class}">
    <h2>Section {i}</h2>
    <p>Record <b>{i}</b> has <i>value <u>{value}</u></i>.</p>
    <div><p class="note" style="margin: 2mm 4mm">See <a url="https://example.org/{i}">details</a>.</p></div>
</section>"#,
                class = if i % 2 == 0 { "even" } else { "odd" },
                value = i * 7,
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<document version="0.1"><title>Benchmark</title><sections>{}</sections></document>"#,
        sections
    )
}

/// A style sheet whose first rules set fonts and spacing, padded with class rules.
fn generate_sheet(rule_count: usize) -> String {
    let base = [
        json!({ "selectors": [{ "element-name": "section" }],
                "properties": [{ "name": "font-name", "value": "Helvetica" },
                               { "name": "page-size", "value": "210mm 297mm" }] }),
        json!({ "selectors": [{ "element-name": "p" }],
                "properties": [{ "name": "margin", "value": "1cm" },
                               { "name": "font-name", "value": "inherit" }] }),
        json!({ "selectors": [{ "class": "even" }, "subelement", { "element-name": "h2" }],
                "properties": [{ "name": "font-weight", "value": "bold" }] }),
    ];
    let rules: Vec<Value> = base
        .into_iter()
        .cycle()
        .take(rule_count)
        .collect();
    json!({ "rules": rules }).to_string()
}

/// Benchmark the full pipeline with varying section counts
fn benchmark_pipeline_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_throughput");
    let pipeline = PipelineBuilder::new()
        .with_style_json(&generate_sheet(3))
        .expect("Failed to load style sheet")
        .build();

    for count in [1, 10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let source = generate_document(count);

        group.bench_with_input(BenchmarkId::new("sections", count), &source, |b, source| {
            b.iter(|| pipeline.compile(black_box(source)).expect("Failed to compile document"));
        });
    }

    group.finish();
}

/// Benchmark each stage separately on a fixed document
fn benchmark_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let source = generate_document(100);
    let pipeline = PipelineBuilder::new()
        .with_style_json(&generate_sheet(3))
        .expect("Failed to load style sheet")
        .build();
    let markup = pipeline.parse(&source).expect("Failed to parse document");
    let imported = pipeline.import(&markup).expect("Failed to import document");

    group.bench_function("parse", |b| {
        b.iter(|| MarkupParser::new().parse_document(black_box(&source)).expect("Failed to parse"));
    });
    group.bench_function("import", |b| {
        b.iter(|| pipeline.import(black_box(&markup)).expect("Failed to import"));
    });
    group.bench_function("resolve", |b| {
        b.iter(|| {
            let mut document = imported.clone();
            pipeline.resolve(&mut document);
            document
        });
    });
    group.bench_function("query", |b| {
        b.iter(|| markup.find(black_box("//section//p@style")).expect("Failed to query"));
    });

    group.finish();
}

/// Benchmark style resolution as the sheet grows
fn benchmark_sheet_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet_size");
    let source = generate_document(100);

    for rule_count in [0, 10, 100] {
        let pipeline = PipelineBuilder::new()
            .with_style_json(&generate_sheet(rule_count))
            .expect("Failed to load style sheet")
            .build();
        let markup = pipeline.parse(&source).expect("Failed to parse document");
        let imported = pipeline.import(&markup).expect("Failed to import document");

        group.bench_with_input(BenchmarkId::new("rules", rule_count), &imported, |b, imported| {
            b.iter(|| {
                let mut document = imported.clone();
                pipeline.resolve(&mut document);
                document
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pipeline_throughput,
    benchmark_stages,
    benchmark_sheet_size
);
criterion_main!(benches);
