//! Benchmarks for site index operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quire_site::{ContentPage, SiteIndex, SortDirection, build_tree};
use serde_json::json;

/// Generate pages spread over `sections` top-level sections, each two levels
/// deep, with weights, dates and tags.
fn generate_pages(sections: usize, per_section: usize) -> Vec<ContentPage> {
    let mut pages = Vec::with_capacity(sections * (per_section + 1));
    for s in 0..sections {
        pages.push(
            ContentPage::builder(format!("section-{s}/index.md"))
                .meta("weight", json!(s * 10))
                .build(),
        );
        for p in 0..per_section {
            let path = if p % 2 == 0 {
                format!("section-{s}/page-{p}.md")
            } else {
                format!("section-{s}/nested/page-{p}.md")
            };
            pages.push(
                ContentPage::builder(path)
                    .meta("weight", json!((p * 7) % 13))
                    .meta("date", json!(format!("2026-{:02}-{:02}", p % 12 + 1, p % 28 + 1)))
                    .taxonomy("tags", [format!("tag-{}", p % 5), format!("tag-{}", s % 3)])
                    .build(),
            );
        }
    }
    pages
}

fn bench_regular_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("regular_pages");

    for (sections, per_section) in [(5, 20), (20, 50), (50, 100)] {
        let pages = generate_pages(sections, per_section);
        group.bench_with_input(
            BenchmarkId::new("order", pages.len()),
            &pages,
            |b, pages| {
                b.iter(|| {
                    let site = SiteIndex::new(pages.clone());
                    site.regular_pages().len()
                });
            },
        );
    }

    group.finish();
}

fn bench_tree(c: &mut Criterion) {
    let pages = generate_pages(20, 50);
    let site = SiteIndex::new(pages);
    let shared = site.all();

    c.bench_function("build_tree_1020_pages", |b| {
        b.iter(|| build_tree(&shared).children().len());
    });
}

fn bench_lookups(c: &mut Criterion) {
    let site = SiteIndex::new(generate_pages(20, 50));

    let mut group = c.benchmark_group("site_lookup");

    group.bench_function("find_by_slug_hit", |b| {
        b.iter(|| site.find_by_slug("section-19/nested/page-49"));
    });

    group.bench_function("find_by_slug_miss", |b| {
        b.iter(|| site.find_by_slug("nonexistent/path"));
    });

    group.bench_function("find_by_url_path_hit", |b| {
        b.iter(|| site.find_by_url_path("/section-10/page-20/"));
    });

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let site = SiteIndex::new(generate_pages(20, 50));
    let Some(page) = site.find_by_slug("section-10/page-20").cloned() else {
        return;
    };

    c.bench_function("next_in_section", |b| {
        b.iter(|| site.next_in_section(&page));
    });
}

fn bench_taxonomy(c: &mut Criterion) {
    let pages = generate_pages(20, 50);

    c.bench_function("taxonomy_build", |b| {
        b.iter(|| {
            let site = SiteIndex::new(pages.clone());
            site.taxonomy("tags").len()
        });
    });
}

fn bench_collection_queries(c: &mut Criterion) {
    let site = SiteIndex::new(generate_pages(20, 50));
    let all = site.all();

    let mut group = c.benchmark_group("collection");

    group.bench_function("by_date_desc", |b| {
        b.iter(|| all.by_date(SortDirection::Desc, "meta.date").len());
    });

    group.bench_function("where_intersect", |b| {
        b.iter(|| all.where_op("taxonomies.tags", "intersect", json!(["tag-1"])).len());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_regular_pages,
    bench_tree,
    bench_lookups,
    bench_navigation,
    bench_taxonomy,
    bench_collection_queries
);
criterion_main!(benches);
