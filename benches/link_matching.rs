//! Link matching benchmark suite.
//!
//! Measures the per-page cost of the initial scan:
//! - Pages of 100, 1 000 and 10 000 anchors
//! - One in ten anchors points at a product
//!
//! Run with: cargo bench --bench link_matching
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use product_overlay::{
    Command, ElementSnapshot, LinkMatcher, OverlayController, Viewport, WidgetOptions,
};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const PAGE_SIZES: &[usize] = &[100, 1_000, 10_000];

fn page(size: usize) -> Vec<ElementSnapshot> {
    (0..size)
        .map(|i| {
            let href = if i % 10 == 0 {
                format!("https://gum.co/product-{i}?ref=bench")
            } else {
                format!("https://example.com/articles/{i}")
            };
            ElementSnapshot::anchor(format!("el-{i}"), href)
        })
        .collect()
}

// ============================================================================
// Benchmark: Product Id Extraction
// ============================================================================

fn bench_extract(c: &mut Criterion) {
    let matcher = LinkMatcher::new(["gum.co", "gumroad.com/l", "shop.gumroad.com"])
        .expect("valid fragments");

    let mut group = c.benchmark_group("extract_product_id");
    group.bench_function("hit", |b| {
        b.iter(|| matcher.extract_product_id(black_box(Some("https://gumroad.com/l/demo?x=1"))))
    });
    group.bench_function("miss", |b| {
        b.iter(|| matcher.extract_product_id(black_box(Some("https://example.com/articles/42"))))
    });
    group.finish();
}

// ============================================================================
// Benchmark: Initial Scan
// ============================================================================

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_existing");

    for &size in PAGE_SIZES {
        let elements = page(size);
        group.bench_with_input(BenchmarkId::new("anchors", size), &elements, |b, elements| {
            b.iter(|| {
                let mut controller = OverlayController::new(
                    WidgetOptions::new(),
                    None,
                    Viewport::new(1280, 800),
                    Vec::<Command>::new(),
                )
                .expect("controller");
                black_box(controller.scan_existing(elements))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_scan);
criterion_main!(benches);
