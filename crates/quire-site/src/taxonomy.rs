//! Term-to-pages mapping for one taxonomy.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::collection::PageCollection;
use crate::page::ContentPage;

/// Normalize a term for lookup: trimmed and lowercased.
#[must_use]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
struct Term {
    label: String,
    pages: PageCollection,
}

/// Pages grouped by term for a single taxonomy (e.g. `"tags"`).
///
/// Terms are matched case-insensitively and kept in sorted order. The
/// first spelling seen for a term is kept as its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyCollection {
    name: String,
    terms: BTreeMap<String, Term>,
}

impl TaxonomyCollection {
    /// Build a taxonomy by scanning pages in order.
    ///
    /// Blank terms are ignored; a page listing the same term twice appears
    /// once under it.
    pub fn build<'a>(name: &str, pages: impl IntoIterator<Item = &'a Arc<ContentPage>>) -> Self {
        let mut buckets: BTreeMap<String, (String, Vec<Arc<ContentPage>>)> = BTreeMap::new();

        for page in pages {
            for term in page.terms(name) {
                let key = normalize_term(term);
                if key.is_empty() {
                    continue;
                }
                let (_, bucket) = buckets
                    .entry(key)
                    .or_insert_with(|| (term.trim().to_owned(), Vec::new()));
                if !bucket.iter().any(|existing| Arc::ptr_eq(existing, page)) {
                    bucket.push(Arc::clone(page));
                }
            }
        }

        let terms = buckets
            .into_iter()
            .map(|(key, (label, pages))| {
                (
                    key,
                    Term {
                        label,
                        pages: PageCollection::new(pages),
                    },
                )
            })
            .collect();

        Self {
            name: name.to_owned(),
            terms,
        }
    }

    /// Taxonomy name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pages carrying a term (empty if the term is unknown).
    #[must_use]
    pub fn term(&self, term: &str) -> PageCollection {
        self.terms
            .get(&normalize_term(term))
            .map(|t| t.pages.clone())
            .unwrap_or_default()
    }

    /// Whether any page carries the term.
    #[must_use]
    pub fn has_term(&self, term: &str) -> bool {
        self.terms.contains_key(&normalize_term(term))
    }

    /// First-seen spelling of a term.
    #[must_use]
    pub fn label(&self, term: &str) -> Option<&str> {
        self.terms
            .get(&normalize_term(term))
            .map(|t| t.label.as_str())
    }

    /// Normalized term keys in sorted order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// `(term, pages)` pairs in sorted term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageCollection)> {
        self.terms
            .iter()
            .map(|(key, term)| (key.as_str(), &term.pages))
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no page carries any term.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
