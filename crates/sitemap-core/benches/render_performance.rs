//! Benchmarks for building and rendering sitemaps

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sitemap_core::{ChangeFrequency, Sitemap, Url};

// Mix of schemes, trailing slashes and repeats so every pipeline pass has work
fn create_test_urls(count: usize) -> Vec<Url> {
    (0..count)
        .map(|i| {
            let scheme = if i % 7 == 0 { "http" } else { "https" };
            let slash = if i % 3 == 0 { "/" } else { "" };
            Url::new(format!("{scheme}://example.com/section-{}/page-{}{slash}", i % 10, i / 2))
                .with_changefreq(ChangeFrequency::Weekly)
        })
        .collect()
}

fn build_sitemap(urls: &[Url], dedup: bool) -> Sitemap {
    let mut sitemap = Sitemap::create();
    sitemap.set_delete_duplicates(dedup).set_delete_http(true);
    for url in urls {
        sitemap.add(url.clone());
    }
    sitemap
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for count in [100usize, 1_000, 5_000] {
        let urls = create_test_urls(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("plain", count), &urls, |b, urls| {
            b.iter(|| {
                let mut sitemap = build_sitemap(urls, false);
                black_box(sitemap.render().expect("render"))
            });
        });

        group.bench_with_input(BenchmarkId::new("delete_duplicates", count), &urls, |b, urls| {
            b.iter(|| {
                let mut sitemap = build_sitemap(urls, true);
                black_box(sitemap.render().expect("render"))
            });
        });
    }

    group.finish();
}

fn bench_omit(c: &mut Criterion) {
    let urls = create_test_urls(1_000);
    let omitted: Vec<String> = (0..100)
        .map(|i| format!("example.com/section-{}/page-{}", i % 10, i * 3))
        .collect();

    c.bench_function("omit_urls_1000x100", |b| {
        b.iter(|| {
            let mut sitemap = build_sitemap(&urls, false);
            sitemap.omit_urls(&omitted);
            black_box(sitemap.tags().len())
        });
    });
}

criterion_group!(benches, bench_render, bench_omit);
criterion_main!(benches);
