//! Benchmarks for cmsrender rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic rich-text documents and page payloads.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

/// Creates a rich-text document with the given number of blocks.
fn create_rich_text(block_count: usize) -> Value {
    let children: Vec<Value> = (0..block_count)
        .map(|i| match i % 4 {
            0 => json!({"type": "heading", "tag": "h2", "children": [{"text": format!("Heading {i}")}]}),
            1 => json!({"type": "paragraph", "children": [
                {"type": "text", "text": "Read the brochure at https://example.edu/brochure.pdf or visit ", "format": 1},
                {"type": "link", "url": "https://example.edu/admissions", "children": [{"text": "admissions"}]}
            ]}),
            2 => json!({"type": "list", "listType": "bullet", "children": [
                {"type": "listitem", "children": [{"text": "Hostel"}]},
                {"type": "listitem", "children": [{"text": "Library"}]}
            ]}),
            _ => json!({"type": "paragraph", "children": [{"text": "Watch https://youtu.be/abc123 now"}]}),
        })
        .collect();
    json!({"root": {"children": children}})
}

/// Creates a dynamic page response with the given number of table sections.
fn create_page(section_count: usize) -> Value {
    let sections: Vec<Value> = (0..section_count)
        .map(|i| {
            json!({
                "id": i,
                "title": format!("Section {i}"),
                "order": section_count - i,
                "contentType": "mixedDynamic",
                "content": create_rich_text(8),
                "dynamicTableConfig": {
                    "columns": [
                        {"key": "program", "label": "Program"},
                        {"key": "fee", "label": "Fee"}
                    ],
                    "rows": (0..20)
                        .map(|r| json!({"data": {"program": format!("Program {r}"), "fee": r * 1000}}))
                        .collect::<Vec<_>>()
                }
            })
        })
        .collect();
    json!({"success": true, "data": {"slug": "fees", "pageTitle": "Fees", "sections": sections}})
}

/// Benchmark rich-text rendering at various sizes.
fn bench_rich_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("rich_text");
    let options = cmsrender::RenderOptions::default();

    for block_count in [8, 64, 256].iter() {
        let doc = cmsrender::rich_text_from_value(&create_rich_text(*block_count));

        group.bench_function(format!("{}_blocks", block_count), |b| {
            b.iter(|| cmsrender::render::to_html(black_box(&doc), &options));
        });
    }

    group.finish();
}

/// Benchmark page normalization.
fn bench_normalize(c: &mut Criterion) {
    let page = create_page(10);

    c.bench_function("normalize_page", |b| {
        b.iter(|| cmsrender::normalize_value(black_box(page.clone()), "fees"));
    });
}

/// Benchmark full page rendering.
fn bench_page(c: &mut Criterion) {
    let page = cmsrender::normalize_value(create_page(10), "fees");
    let options = cmsrender::RenderOptions::default();

    c.bench_function("render_page", |b| {
        b.iter(|| cmsrender::render::render_page(black_box(&page), &options).to_html());
    });
}

criterion_group!(benches, bench_rich_text, bench_normalize, bench_page);
criterion_main!(benches);
