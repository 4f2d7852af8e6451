//! Pagination over page collections.
//!
//! A [`Pager`] is a view: it keeps the source collection and the requested
//! page number and recomputes everything else on demand. Page 1 lives at
//! the bare base path; page `n` lives at `<base>/<segment>/<n>/`.
//!
//! ```
//! use quire_site::{PageCollection, Pager};
//!
//! let pager = Pager::new(PageCollection::default(), 10, 1, "/blog/", "page");
//! assert_eq!(pager.url(), "/blog/");
//! assert_eq!(pager.total_pages(), 1);
//! ```

use crate::collection::PageCollection;
use crate::normalize::normalize_base_path;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default URL segment before the page number.
pub const DEFAULT_PATH_SEGMENT: &str = "page";

/// Pagination settings shared by every pager of a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagerSettings {
    /// Pages per pager (clamped to at least 1).
    pub page_size: usize,
    /// URL segment before the page number (may be empty).
    pub path_segment: String,
}

impl Default for PagerSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            path_segment: DEFAULT_PATH_SEGMENT.to_owned(),
        }
    }
}

/// One page of a paginated collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Pager {
    source: PageCollection,
    page_size: usize,
    requested: usize,
    base_path: String,
    path_segment: String,
}

impl Pager {
    /// Create a pager. `page_size` and `page_number` are clamped to at
    /// least 1; a page number past the end is clamped when read.
    #[must_use]
    pub fn new(
        source: PageCollection,
        page_size: usize,
        page_number: usize,
        base_path: &str,
        path_segment: &str,
    ) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            requested: page_number.max(1),
            base_path: normalize_base_path(base_path),
            path_segment: path_segment.trim().trim_matches('/').to_owned(),
        }
    }

    /// Create a pager from shared settings.
    #[must_use]
    pub fn with_settings(
        source: PageCollection,
        page_number: usize,
        base_path: &str,
        settings: &PagerSettings,
    ) -> Self {
        Self::new(
            source,
            settings.page_size,
            page_number,
            base_path,
            &settings.path_segment,
        )
    }

    fn at(&self, page_number: usize) -> Self {
        Self {
            source: self.source.clone(),
            page_size: self.page_size,
            requested: page_number.max(1),
            base_path: self.base_path.clone(),
            path_segment: self.path_segment.clone(),
        }
    }

    /// Pages per pager.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of elements in the source collection.
    #[must_use]
    pub fn total_elements(&self) -> usize {
        self.source.count()
    }

    /// Number of pagers (at least 1, even for an empty source).
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_elements().div_ceil(self.page_size).max(1)
    }

    /// Effective page number: the requested one, clamped to the last page.
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.requested.min(self.total_pages())
    }

    /// Elements of the effective page.
    #[must_use]
    pub fn pages(&self) -> PageCollection {
        let offset = (self.page_number() - 1) * self.page_size;
        self.source.slice(offset, Some(self.page_size))
    }

    /// One pager per page number.
    #[must_use]
    pub fn pagers(&self) -> Vec<Pager> {
        (1..=self.total_pages()).map(|n| self.at(n)).collect()
    }

    /// Pager for page 1.
    #[must_use]
    pub fn first(&self) -> Pager {
        self.at(1)
    }

    /// Pager for the last page.
    #[must_use]
    pub fn last(&self) -> Pager {
        self.at(self.total_pages())
    }

    /// Previous pager, `None` on the first page.
    #[must_use]
    pub fn prev(&self) -> Option<Pager> {
        self.has_prev().then(|| self.at(self.page_number() - 1))
    }

    /// Next pager, `None` on the last page.
    #[must_use]
    pub fn next(&self) -> Option<Pager> {
        self.has_next().then(|| self.at(self.page_number() + 1))
    }

    /// Whether a previous page exists.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page_number() > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page_number() < self.total_pages()
    }

    /// URL of the effective page.
    #[must_use]
    pub fn url(&self) -> String {
        self.url_for(self.page_number())
    }

    /// URL of the previous page.
    #[must_use]
    pub fn prev_url(&self) -> Option<String> {
        self.has_prev()
            .then(|| self.url_for(self.page_number() - 1))
    }

    /// URL of the next page.
    #[must_use]
    pub fn next_url(&self) -> Option<String> {
        self.has_next()
            .then(|| self.url_for(self.page_number() + 1))
    }

    /// URL of an arbitrary page number.
    #[must_use]
    pub fn url_for(&self, page_number: usize) -> String {
        if page_number <= 1 {
            self.base_path.clone()
        } else if self.path_segment.is_empty() {
            format!("{}{page_number}/", self.base_path)
        } else {
            format!("{}{}/{page_number}/", self.base_path, self.path_segment)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::page::ContentPage;

    fn collection(n: usize) -> PageCollection {
        PageCollection::from_pages((1..=n).map(|i| ContentPage::builder(format!("post-{i}.md")).build()))
    }

    fn slugs(pages: &PageCollection) -> Vec<String> {
        pages.iter().map(|p| p.slug().to_owned()).collect()
    }

    #[test]
    fn test_empty_source_has_one_page() {
        let pager = Pager::new(PageCollection::default(), 10, 1, "/blog/", "page");

        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.page_number(), 1);
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
        assert!(pager.pages().is_empty());
    }

    #[test]
    fn test_url_scheme() {
        let pager = Pager::new(collection(25), 10, 1, "/blog/", "page");

        assert_eq!(pager.url(), "/blog/");
        assert_eq!(pager.url_for(2), "/blog/page/2/");
        assert_eq!(pager.next_url().as_deref(), Some("/blog/page/2/"));
        assert_eq!(pager.prev_url(), None);
    }

    #[test]
    fn test_url_without_segment() {
        let pager = Pager::new(collection(25), 10, 3, "blog", "/");

        assert_eq!(pager.url(), "/blog/3/");
        assert_eq!(pager.prev_url().as_deref(), Some("/blog/2/"));
    }

    #[test]
    fn test_base_path_normalized() {
        let pager = Pager::new(collection(1), 10, 1, "//news//archive", "/p/");

        assert_eq!(pager.url(), "/news/archive/");
        assert_eq!(pager.url_for(4), "/news/archive/p/4/");
    }

    #[test]
    fn test_pages_slice() {
        let pager = Pager::new(collection(25), 10, 3, "/", "page");

        assert_eq!(pager.total_pages(), 3);
        assert_eq!(slugs(&pager.pages()), vec!["post-21", "post-22", "post-23", "post-24", "post-25"]);
    }

    #[test]
    fn test_page_number_clamped_to_total() {
        let pager = Pager::new(collection(5), 2, 99, "/", "page");

        assert_eq!(pager.page_number(), 3);
        assert_eq!(slugs(&pager.pages()), vec!["post-5"]);
        assert!(!pager.has_next());
    }

    #[test]
    fn test_zero_values_clamped() {
        let pager = Pager::new(collection(3), 0, 0, "/", "page");

        assert_eq!(pager.page_size(), 1);
        assert_eq!(pager.page_number(), 1);
        assert_eq!(pager.total_pages(), 3);
    }

    #[test]
    fn test_navigation_between_pagers() {
        let pager = Pager::new(collection(25), 10, 2, "/blog/", "page");

        assert_eq!(pager.prev().map(|p| p.page_number()), Some(1));
        assert_eq!(pager.next().map(|p| p.page_number()), Some(3));
        assert_eq!(pager.first().page_number(), 1);
        assert_eq!(pager.last().page_number(), 3);
        assert!(pager.last().next().is_none());
        assert!(pager.first().prev().is_none());
    }

    #[test]
    fn test_pagers_lists_every_page() {
        let pager = Pager::new(collection(25), 10, 1, "/blog/", "page");

        let urls: Vec<String> = pager.pagers().iter().map(Pager::url).collect();
        assert_eq!(urls, vec!["/blog/", "/blog/page/2/", "/blog/page/3/"]);
    }

    #[test]
    fn test_with_settings() {
        let settings = PagerSettings {
            page_size: 5,
            path_segment: "p".to_owned(),
        };

        let pager = Pager::with_settings(collection(12), 2, "/news/", &settings);

        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.url(), "/news/p/2/");
    }
}
