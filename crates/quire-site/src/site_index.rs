//! Site-wide page index.
//!
//! [`SiteIndex`] owns the full page list of one build and answers every
//! query templates need: ordered listings, slug and URL lookups, sections,
//! taxonomies, and previous/next navigation.
//!
//! # Architecture
//!
//! Pages are stored once as `Arc<ContentPage>` and shared by every derived
//! structure. Derived structures are computed lazily on first use and then
//! kept for the lifetime of the index:
//!
//! - `regular_pages`: all pages ordered by `(weight asc, date desc,
//!   title asc case-insensitive, relative path asc)`
//! - `tree`: the [`Section`] tree built from the regular pages
//! - `sections`: the top-level sections ordered by `(weight, key)`, where
//!   the weight is the index page's weight if present, otherwise the
//!   smallest weight in the whole subtree
//! - `section_pages`: regular pages grouped by top-level section key
//! - `taxonomies`: one [`TaxonomyCollection`] per requested name
//!
//! Nothing is ever invalidated. A changed page list needs a new index.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::collection::PageCollection;
use crate::normalize::{humanize, normalize_slug, normalize_url_path};
use crate::page::{ContentPage, MAX_WEIGHT};
use crate::pager::{Pager, PagerSettings};
use crate::section::{ROOT_LABEL, Section, build_tree};
use crate::taxonomy::TaxonomyCollection;

/// One ancestor entry of a page's breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Section label.
    pub label: String,
    /// Section path (e.g. `"guide/setup"`).
    pub path: String,
    /// URL of the section's index page, if it has one.
    pub url: Option<String>,
}

/// Memoized query facade over all pages of a site.
#[derive(Debug)]
pub struct SiteIndex {
    pages: Vec<Arc<ContentPage>>,
    regular_pages: OnceLock<PageCollection>,
    tree: OnceLock<Section>,
    sections: OnceLock<Vec<Section>>,
    section_pages: OnceLock<HashMap<String, PageCollection>>,
    taxonomies: RwLock<HashMap<String, Arc<TaxonomyCollection>>>,
}

impl SiteIndex {
    /// Create an index from a page list.
    ///
    /// The index keeps its own copy; the caller's list can change freely
    /// afterwards.
    pub fn new(pages: impl IntoIterator<Item = ContentPage>) -> Self {
        Self::from_shared(pages.into_iter().map(Arc::new))
    }

    /// Create an index from already shared pages.
    pub fn from_shared(pages: impl IntoIterator<Item = Arc<ContentPage>>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            regular_pages: OnceLock::new(),
            tree: OnceLock::new(),
            sections: OnceLock::new(),
            section_pages: OnceLock::new(),
            taxonomies: RwLock::new(HashMap::new()),
        }
    }

    /// All pages in input order.
    #[must_use]
    pub fn all(&self) -> PageCollection {
        PageCollection::new(self.pages.iter().cloned())
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the index holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages in default listing order.
    pub fn regular_pages(&self) -> &PageCollection {
        self.regular_pages.get_or_init(|| {
            let mut pages = self.pages.clone();
            pages.sort_by(|a, b| listing_order(a, b));
            tracing::debug!(pages = pages.len(), "Ordered regular pages");
            PageCollection::new(pages)
        })
    }

    /// Root of the section tree.
    pub fn tree(&self) -> &Section {
        self.tree.get_or_init(|| {
            let tree = build_tree(self.regular_pages());
            tracing::debug!(sections = tree.flatten().len(), "Built section tree");
            tree
        })
    }

    /// Top-level sections ordered by `(weight, key)`.
    ///
    /// Unlike the tree's own child order, a section without an index page
    /// weighs as its lightest page anywhere below it, even when a nested
    /// index page sets the weight of an inner section.
    pub fn sections(&self) -> &[Section] {
        self.sections.get_or_init(|| {
            let mut weighted: Vec<(i64, Section)> = self
                .tree()
                .children()
                .iter()
                .map(|section| (subtree_weight(section), section.clone()))
                .collect();
            weighted.sort_by(|(wa, a), (wb, b)| wa.cmp(wb).then_with(|| a.key().cmp(b.key())));
            weighted.into_iter().map(|(_, section)| section).collect()
        })
    }

    /// Top-level section by key.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.tree().child(name.trim().trim_matches('/'))
    }

    /// Index page of a top-level section.
    #[must_use]
    pub fn find_section_index(&self, name: &str) -> Option<&Arc<ContentPage>> {
        self.section(name).and_then(Section::index_page)
    }

    /// Display label of a top-level section.
    ///
    /// Unknown sections get the humanized key; the root gets `"Root"`.
    #[must_use]
    pub fn section_label(&self, name: &str) -> String {
        let key = name.trim().trim_matches('/');
        if key.is_empty() {
            return ROOT_LABEL.to_owned();
        }
        self.section(key)
            .map_or_else(|| humanize(key), |section| section.label().to_owned())
    }

    /// Regular pages whose top-level section is `name`, in listing order.
    ///
    /// `""` selects the pages that live at the root.
    #[must_use]
    pub fn section_pages(&self, name: &str) -> PageCollection {
        let groups = self.section_pages.get_or_init(|| {
            let mut groups: HashMap<String, Vec<Arc<ContentPage>>> = HashMap::new();
            for page in self.regular_pages() {
                groups
                    .entry(page.top_level_section())
                    .or_default()
                    .push(Arc::clone(page));
            }
            groups
                .into_iter()
                .map(|(key, pages)| (key, PageCollection::new(pages)))
                .collect()
        });

        groups
            .get(name.trim().trim_matches('/'))
            .cloned()
            .unwrap_or_default()
    }

    /// Pages that belong to no section.
    #[must_use]
    pub fn root_pages(&self) -> PageCollection {
        self.section_pages("")
    }

    /// Taxonomy built from the regular pages, cached per name.
    pub fn taxonomy(&self, name: &str) -> Arc<TaxonomyCollection> {
        if let Some(cached) = self
            .taxonomies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(cached);
        }

        let mut cache = self
            .taxonomies
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let taxonomy = cache.entry(name.to_owned()).or_insert_with(|| {
            let taxonomy = TaxonomyCollection::build(name, self.regular_pages());
            tracing::debug!(taxonomy = name, terms = taxonomy.len(), "Built taxonomy");
            Arc::new(taxonomy)
        });
        Arc::clone(taxonomy)
    }

    /// Several taxonomies at once, in the order requested.
    pub fn taxonomies<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Vec<Arc<TaxonomyCollection>> {
        names.into_iter().map(|name| self.taxonomy(name)).collect()
    }

    /// Page with the given slug. Blank slugs select the home page.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Arc<ContentPage>> {
        let wanted = normalize_slug(slug);
        self.pages
            .iter()
            .find(|page| normalize_slug(page.slug()) == wanted)
    }

    /// Page served at the given URL path.
    #[must_use]
    pub fn find_by_url_path(&self, url_path: &str) -> Option<&Arc<ContentPage>> {
        let wanted = normalize_url_path(url_path);
        self.pages
            .iter()
            .find(|page| normalize_url_path(page.url_path()) == wanted)
    }

    /// Previous page within the page's top-level section.
    #[must_use]
    pub fn previous_in_section(&self, page: &ContentPage) -> Option<Arc<ContentPage>> {
        self.previous_in_section_where(page, |_| true)
    }

    /// Next page within the page's top-level section.
    #[must_use]
    pub fn next_in_section(&self, page: &ContentPage) -> Option<Arc<ContentPage>> {
        self.next_in_section_where(page, |_| true)
    }

    /// Previous page within the section, skipping pages rejected by
    /// `predicate`.
    pub fn previous_in_section_where(
        &self,
        page: &ContentPage,
        predicate: impl Fn(&ContentPage) -> bool,
    ) -> Option<Arc<ContentPage>> {
        let pages = self.section_pages(&page.top_level_section());
        step(&pages, page, Direction::Backward, predicate)
    }

    /// Next page within the section, skipping pages rejected by `predicate`.
    pub fn next_in_section_where(
        &self,
        page: &ContentPage,
        predicate: impl Fn(&ContentPage) -> bool,
    ) -> Option<Arc<ContentPage>> {
        let pages = self.section_pages(&page.top_level_section());
        step(&pages, page, Direction::Forward, predicate)
    }

    /// Previous page in listing order, across sections.
    #[must_use]
    pub fn previous(&self, page: &ContentPage) -> Option<Arc<ContentPage>> {
        self.previous_where(page, |_| true)
    }

    /// Next page in listing order, across sections.
    #[must_use]
    pub fn next(&self, page: &ContentPage) -> Option<Arc<ContentPage>> {
        self.next_where(page, |_| true)
    }

    /// Previous page in listing order, skipping pages rejected by
    /// `predicate`.
    pub fn previous_where(
        &self,
        page: &ContentPage,
        predicate: impl Fn(&ContentPage) -> bool,
    ) -> Option<Arc<ContentPage>> {
        step(self.regular_pages(), page, Direction::Backward, predicate)
    }

    /// Next page in listing order, skipping pages rejected by `predicate`.
    pub fn next_where(
        &self,
        page: &ContentPage,
        predicate: impl Fn(&ContentPage) -> bool,
    ) -> Option<Arc<ContentPage>> {
        step(self.regular_pages(), page, Direction::Forward, predicate)
    }

    /// Ancestor sections of a page, outermost first.
    ///
    /// The root is left out, and so is the page's own section when the page
    /// is that section's index page.
    #[must_use]
    pub fn breadcrumbs(&self, page: &ContentPage) -> Vec<Breadcrumb> {
        let section_path = page.section_path();
        if section_path.is_empty() {
            return Vec::new();
        }

        let mut crumbs = Vec::new();
        let mut current = self.tree();
        for segment in section_path.split('/') {
            let Some(child) = current.child(segment) else {
                break;
            };
            crumbs.push(Breadcrumb {
                label: child.label().to_owned(),
                path: child.path().to_owned(),
                url: child.index_page().map(|index| index.url_path().to_owned()),
            });
            current = child;
        }

        let own_index = current.path() == section_path
            && current
                .index_page()
                .is_some_and(|index| index.relative_path() == page.relative_path());
        if own_index {
            crumbs.pop();
        }
        crumbs
    }

    /// Paginate a collection with shared settings.
    #[must_use]
    pub fn paginate(
        &self,
        collection: &PageCollection,
        page_number: usize,
        base_path: &str,
        settings: &PagerSettings,
    ) -> Pager {
        Pager::with_settings(collection.clone(), page_number, base_path, settings)
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

fn step(
    pages: &PageCollection,
    page: &ContentPage,
    direction: Direction,
    predicate: impl Fn(&ContentPage) -> bool,
) -> Option<Arc<ContentPage>> {
    let position = pages.position_of_slug(page.slug())?;
    let pages = pages.as_slice();

    let found = match direction {
        Direction::Forward => pages[position + 1..].iter().find(|p| predicate(p)),
        Direction::Backward => pages[..position].iter().rev().find(|p| predicate(p)),
    };
    found.cloned()
}

fn subtree_weight(section: &Section) -> i64 {
    section.index_page().map_or_else(
        || {
            section
                .all_pages()
                .iter()
                .map(|page| page.weight())
                .min()
                .unwrap_or(MAX_WEIGHT)
        },
        |index| index.weight(),
    )
}

fn listing_order(a: &ContentPage, b: &ContentPage) -> Ordering {
    a.weight()
        .cmp(&b.weight())
        .then_with(|| b.date_timestamp().cmp(&a.date_timestamp()))
        .then_with(|| a.title().to_lowercase().cmp(&b.title().to_lowercase()))
        .then_with(|| a.relative_path().cmp(b.relative_path()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(SiteIndex: Send, Sync);

    fn weighted(path: &str, weight: i64) -> ContentPage {
        ContentPage::builder(path).meta("weight", json!(weight)).build()
    }

    fn docs_site() -> SiteIndex {
        SiteIndex::new(vec![
            weighted("reference/commands.md", 100),
            weighted("getting-started/quick-start.md", 30),
            weighted("intro.md", 0),
            weighted("content/routing.md", 45),
            weighted("getting-started/install.md", 20),
        ])
    }

    fn titles(pages: &PageCollection) -> Vec<String> {
        pages.iter().map(|p| p.title().to_owned()).collect()
    }

    #[test]
    fn test_regular_pages_ordered_by_weight() {
        let site = docs_site();

        assert_eq!(
            titles(site.regular_pages()),
            vec!["Intro", "Install", "Quick Start", "Routing", "Commands"]
        );
    }

    #[test]
    fn test_regular_pages_memoized() {
        let site = docs_site();

        let first = site.regular_pages() as *const PageCollection;
        let second = site.regular_pages() as *const PageCollection;

        assert_eq!(first, second);
    }

    #[test]
    fn test_regular_pages_tie_breaks() {
        let site = SiteIndex::new(vec![
            ContentPage::builder("blog/z.dj")
                .title("Same")
                .meta("weight", json!(1))
                .meta("date", json!("2026-01-01"))
                .build(),
            ContentPage::builder("blog/a.dj")
                .title("Same")
                .meta("weight", json!(1))
                .meta("date", json!("2026-01-01"))
                .build(),
            ContentPage::builder("blog/newer.dj")
                .title("Zeta")
                .meta("weight", json!(1))
                .meta("date", json!("2026-02-01"))
                .build(),
            ContentPage::builder("blog/alpha.dj")
                .title("alpha")
                .meta("weight", json!(1))
                .meta("date", json!("2026-01-01"))
                .build(),
            ContentPage::builder("blog/unweighted.dj").title("Aaa").build(),
        ]);

        let paths: Vec<&str> = site
            .regular_pages()
            .iter()
            .map(|p| p.relative_path())
            .collect();
        assert_eq!(
            paths,
            vec![
                "blog/newer.dj",
                "blog/alpha.dj",
                "blog/a.dj",
                "blog/z.dj",
                "blog/unweighted.dj",
            ]
        );
    }

    #[test]
    fn test_defensive_copy() {
        let mut pages = vec![weighted("a.md", 1)];
        let site = SiteIndex::new(pages.clone());

        pages.push(weighted("b.md", 2));

        assert_eq!(site.len(), 1);
        assert!(site.find_by_slug("b").is_none());
    }

    #[test]
    fn test_global_navigation_crosses_sections() {
        let site = docs_site();
        let intro = site.find_by_slug("intro").cloned();
        let mut visited = Vec::new();

        let mut current = intro.and_then(|page| site.next(&page));
        while let Some(page) = current {
            visited.push(page.title().to_owned());
            current = site.next(&page);
        }

        assert_eq!(visited, vec!["Install", "Quick Start", "Routing", "Commands"]);
    }

    #[test]
    fn test_global_previous_at_boundary() {
        let site = docs_site();
        let intro = site.find_by_slug("intro").cloned();

        assert!(intro.is_some_and(|page| site.previous(&page).is_none()));
    }

    #[test]
    fn test_navigation_skips_rejected_pages() {
        let site = docs_site();
        let Some(intro) = site.find_by_slug("intro").cloned() else {
            panic!("intro page missing");
        };

        let next = site.next_where(&intro, |p| p.weight() > 25);
        assert_eq!(next.map(|p| p.title().to_owned()), Some("Quick Start".to_owned()));

        let none = site.next_where(&intro, |_| false);
        assert!(none.is_none());
    }

    #[test]
    fn test_previous_skips_rejected_pages() {
        let site = docs_site();
        let Some(commands) = site.find_by_slug("reference/commands").cloned() else {
            panic!("commands page missing");
        };

        let previous = site.previous_where(&commands, |p| p.weight() < 25);
        assert_eq!(previous.map(|p| p.title().to_owned()), Some("Install".to_owned()));

        assert!(site.previous_where(&commands, |_| false).is_none());
    }

    #[test]
    fn test_in_section_navigation_skips_within_section_only() {
        let site = SiteIndex::new(vec![
            weighted("guide/a.md", 1),
            weighted("guide/b.md", 2),
            weighted("guide/c.md", 3),
            weighted("other/x.md", 4),
        ]);
        let find = |slug: &str| {
            site.find_by_slug(slug)
                .cloned()
                .unwrap_or_else(|| panic!("{slug} missing"))
        };
        let (a, b, c) = (find("guide/a"), find("guide/b"), find("guide/c"));
        let not_b = |p: &ContentPage| p.slug() != "guide/b";

        let next = site.next_in_section_where(&a, not_b);
        assert_eq!(next.map(|p| p.slug().to_owned()), Some("guide/c".to_owned()));

        let previous = site.previous_in_section_where(&c, not_b);
        assert_eq!(previous.map(|p| p.slug().to_owned()), Some("guide/a".to_owned()));

        // Only `other/x` passes, and it lies outside the section.
        assert!(site.next_in_section_where(&b, |p| p.weight() > 3).is_none());
        assert!(site.previous_in_section_where(&b, |p| p.weight() > 3).is_none());
        assert_eq!(
            site.next_where(&b, |p| p.weight() > 3).map(|p| p.slug().to_owned()),
            Some("other/x".to_owned())
        );
    }

    #[test]
    fn test_navigation_within_section() {
        let site = docs_site();
        let Some(install) = site.find_by_slug("getting-started/install").cloned() else {
            panic!("install page missing");
        };

        let next = site.next_in_section(&install);
        assert_eq!(next.as_ref().map(|p| p.title()), Some("Quick Start"));
        assert!(site.previous_in_section(&install).is_none());
        assert!(next.is_some_and(|quick| site.next_in_section(&quick).is_none()));
    }

    #[test]
    fn test_navigation_for_unknown_page() {
        let site = docs_site();
        let stranger = weighted("elsewhere/page.md", 1);

        assert!(site.next(&stranger).is_none());
        assert!(site.previous_in_section(&stranger).is_none());
    }

    #[test]
    fn test_find_by_slug() {
        let site = SiteIndex::new(vec![
            ContentPage::builder("index.md").build(),
            ContentPage::builder("guide/setup.md").build(),
        ]);

        assert_eq!(site.find_by_slug("/guide/setup/").map(|p| p.relative_path()), Some("guide/setup.md"));
        assert_eq!(site.find_by_slug("").map(|p| p.relative_path()), Some("index.md"));
        assert_eq!(site.find_by_slug("index").map(|p| p.relative_path()), Some("index.md"));
        assert!(site.find_by_slug("missing").is_none());
    }

    #[test]
    fn test_find_by_url_path() {
        let site = SiteIndex::new(vec![
            ContentPage::builder("index.md").build(),
            ContentPage::builder("guide/setup.md").build(),
        ]);

        assert_eq!(site.find_by_url_path("/guide/setup").map(|p| p.slug()), Some("guide/setup"));
        assert_eq!(site.find_by_url_path("guide/setup/").map(|p| p.slug()), Some("guide/setup"));
        assert_eq!(site.find_by_url_path("/index").map(|p| p.relative_path()), Some("index.md"));
        assert_eq!(site.find_by_url_path("/").map(|p| p.relative_path()), Some("index.md"));
        assert!(site.find_by_url_path("/nope/").is_none());
    }

    #[test]
    fn test_lookup_round_trip() {
        let site = docs_site();

        for page in site.all().iter() {
            assert_eq!(site.find_by_slug(page.slug()), Some(page));
            assert_eq!(site.find_by_url_path(page.url_path()), Some(page));
        }
    }

    #[test]
    fn test_sections_ordered_by_weight() {
        let site = docs_site();

        let keys: Vec<&str> = site.sections().iter().map(Section::key).collect();
        assert_eq!(keys, vec!["getting-started", "content", "reference"]);
    }

    #[test]
    fn test_index_page_weight_reorders_sections() {
        let mut pages = vec![
            weighted("reference/commands.md", 100),
            weighted("getting-started/install.md", 20),
        ];
        pages.push(weighted("reference/index.md", 5));

        let site = SiteIndex::new(pages);

        let keys: Vec<&str> = site.sections().iter().map(Section::key).collect();
        assert_eq!(keys, vec!["reference", "getting-started"]);
        assert_eq!(site.section("reference").map(Section::weight), Some(5));
    }

    #[test]
    fn test_sections_weigh_by_subtree_below_nested_index() {
        let site = SiteIndex::new(vec![
            weighted("docs/a/index.md", 50),
            weighted("docs/a/one.md", 5),
            weighted("blog/x.md", 10),
        ]);

        let keys: Vec<&str> = site.sections().iter().map(Section::key).collect();
        assert_eq!(keys, vec!["docs", "blog"]);
    }

    #[test]
    fn test_sections_prefer_top_level_index_weight() {
        let site = SiteIndex::new(vec![
            weighted("docs/index.md", 20),
            weighted("docs/a/one.md", 1),
            weighted("blog/x.md", 10),
        ]);

        let keys: Vec<&str> = site.sections().iter().map(Section::key).collect();
        assert_eq!(keys, vec!["blog", "docs"]);
    }

    #[test]
    fn test_sections_memoized() {
        let site = docs_site();

        let first = site.sections().as_ptr();
        let second = site.sections().as_ptr();

        assert_eq!(first, second);
    }

    #[test]
    fn test_section_lookup_and_labels() {
        let site = SiteIndex::new(vec![
            ContentPage::builder("guide/index.md").title("User Guide").build(),
            ContentPage::builder("guide/setup.md").build(),
            ContentPage::builder("api-reference/calls.md").build(),
        ]);

        assert_eq!(site.section_label("guide"), "User Guide");
        assert_eq!(site.section_label("api-reference"), "Api Reference");
        assert_eq!(site.section_label("missing-part"), "Missing Part");
        assert_eq!(site.section_label(""), "Root");
        assert_eq!(
            site.find_section_index("guide").map(|p| p.relative_path()),
            Some("guide/index.md")
        );
        assert!(site.find_section_index("api-reference").is_none());
        assert!(site.section("missing").is_none());
    }

    #[test]
    fn test_root_pages() {
        let site = SiteIndex::new(vec![
            ContentPage::builder("about.md").build(),
            ContentPage::builder("moved.md").meta("section", json!("guide")).build(),
            ContentPage::builder("guide/setup.md").build(),
        ]);

        assert_eq!(titles(&site.root_pages()), vec!["About"]);
        assert_eq!(titles(&site.section_pages("guide")), vec!["Moved", "Setup"]);
        assert!(site.section_pages("missing").is_empty());
    }

    #[test]
    fn test_taxonomy_cached() {
        let site = SiteIndex::new(vec![
            ContentPage::builder("a.md").taxonomy("tags", ["php", "cake"]).build(),
            ContentPage::builder("b.md").taxonomy("tags", ["php"]).build(),
            ContentPage::builder("c.md").taxonomy("tags", ["docs"]).build(),
        ]);

        let tags = site.taxonomy("tags");
        assert_eq!(tags.term("php").count(), 2);
        assert!(tags.has_term("PHP"));
        assert!(Arc::ptr_eq(&tags, &site.taxonomy("tags")));

        let all = site.taxonomies(["tags", "categories"]);
        assert_eq!(all.len(), 2);
        assert!(all[1].is_empty());
    }

    #[test]
    fn test_breadcrumbs() {
        let site = SiteIndex::new(vec![
            ContentPage::builder("guide/index.md").title("Guide").build(),
            ContentPage::builder("guide/setup/index.md").title("Setup").build(),
            ContentPage::builder("guide/setup/linux.md").build(),
            ContentPage::builder("about.md").build(),
        ]);

        let Some(linux) = site.find_by_slug("guide/setup/linux").cloned() else {
            panic!("linux page missing");
        };
        assert_eq!(
            site.breadcrumbs(&linux),
            vec![
                Breadcrumb {
                    label: "Guide".to_owned(),
                    path: "guide".to_owned(),
                    url: Some("/guide/".to_owned()),
                },
                Breadcrumb {
                    label: "Setup".to_owned(),
                    path: "guide/setup".to_owned(),
                    url: Some("/guide/setup/".to_owned()),
                },
            ]
        );

        let Some(setup) = site.find_by_slug("guide/setup").cloned() else {
            panic!("setup index missing");
        };
        let labels: Vec<String> = site.breadcrumbs(&setup).into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Guide"]);

        let Some(about) = site.find_by_slug("about").cloned() else {
            panic!("about page missing");
        };
        assert!(site.breadcrumbs(&about).is_empty());
    }

    #[test]
    fn test_paginate() {
        let site = docs_site();

        let pager = site.paginate(site.regular_pages(), 2, "/docs/", &PagerSettings {
            page_size: 2,
            path_segment: "page".to_owned(),
        });

        assert_eq!(pager.total_pages(), 3);
        assert_eq!(titles(&pager.pages()), vec!["Quick Start", "Routing"]);
        assert_eq!(pager.url(), "/docs/page/2/");
    }

    #[test]
    fn test_empty_index() {
        let site = SiteIndex::new(Vec::new());

        assert!(site.is_empty());
        assert!(site.regular_pages().is_empty());
        assert!(site.sections().is_empty());
        assert!(site.tree().is_root());
        assert!(site.taxonomy("tags").is_empty());
    }
}
