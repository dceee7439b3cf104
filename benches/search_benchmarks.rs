//! Benchmarks for text-layer search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdf_locate::fragment::TextFragment;
use pdf_locate::geometry::Matrix;
use pdf_locate::search::{SearchQuery, TextSearcher};
use pdf_locate::source::MemoryPages;

fn build_document(pages: usize, lines_per_page: usize) -> MemoryPages {
    let line = "We are looking for a rockstar engineer who thrives under pressure";
    let width = line.len() as f32 * 5.5;
    let pages = (0..pages)
        .map(|_| {
            (0..lines_per_page)
                .map(|i| {
                    TextFragment::new(
                        line,
                        width,
                        11.0,
                        Matrix::translation(72.0, 720.0 - i as f32 * 14.0),
                    )
                })
                .collect()
        })
        .collect();
    MemoryPages::new(pages)
}

fn bench_search(c: &mut Criterion) {
    let mut doc = build_document(50, 40);

    c.bench_function("search_substring_50_pages", |b| {
        let query = SearchQuery::new("rockstar");
        b.iter(|| TextSearcher::search(&mut doc, black_box(&query)).unwrap())
    });

    c.bench_function("search_whole_word_50_pages", |b| {
        let query = SearchQuery::new("engineer").with_whole_word(true);
        b.iter(|| TextSearcher::search(&mut doc, black_box(&query)).unwrap())
    });

    c.bench_function("search_no_match_50_pages", |b| {
        let query = SearchQuery::new("ninja").with_match_case(true);
        b.iter(|| TextSearcher::search(&mut doc, black_box(&query)).unwrap())
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
