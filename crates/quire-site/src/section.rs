//! Hierarchical sections built from a flat page list.
//!
//! # Architecture
//!
//! [`SectionTreeBuilder`] places every page at its section path (the
//! `meta.section` override or the page's directory), creating placeholder
//! nodes for all ancestors. [`SectionTreeBuilder::build`] then links nodes by
//! path structure alone and constructs immutable [`Section`]s recursively:
//!
//! - children are ordered by `(weight, path)`
//! - a section's weight is its index page's weight if it has one, otherwise
//!   the smallest weight among its direct pages and child sections
//! - a section's label is its index page's title, otherwise the humanized
//!   last path segment (`"Root"` for the root)

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::collection::PageCollection;
use crate::normalize::{humanize, normalize_section_path};
use crate::page::{ContentPage, MAX_WEIGHT};

/// Label of the root section.
pub const ROOT_LABEL: &str = "Root";

/// One node of the section tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    path: String,
    label: String,
    weight: i64,
    index_page: Option<Arc<ContentPage>>,
    pages: PageCollection,
    children: Vec<Section>,
}

impl Section {
    /// Section path without surrounding slashes (`""` for the root).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment (`""` for the root).
    #[must_use]
    pub fn key(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolved ordering weight.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// The section's `index.<ext>` page, if any.
    #[must_use]
    pub fn index_page(&self) -> Option<&Arc<ContentPage>> {
        self.index_page.as_ref()
    }

    /// Pages addressed directly to this section (index page included).
    #[must_use]
    pub fn pages(&self) -> &PageCollection {
        &self.pages
    }

    /// Child sections ordered by `(weight, path)`.
    #[must_use]
    pub fn children(&self) -> &[Section] {
        &self.children
    }

    /// Whether this is the root section.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the section has child sections.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Direct child by key.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Section> {
        self.children.iter().find(|child| child.key() == key)
    }

    /// Descendant (or self) by path relative to the root.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Section> {
        let path = normalize_section_path(path);
        if path == self.path {
            return Some(self);
        }

        let relative = if self.is_root() {
            path.as_str()
        } else {
            path.strip_prefix(self.path.as_str())?.strip_prefix('/')?
        };

        let mut current = self;
        for segment in relative.split('/') {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// All sections of the subtree in pre-order, starting with `self`.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Section> {
        let mut sections = vec![self];
        for child in &self.children {
            sections.extend(child.flatten());
        }
        sections
    }

    /// Pages of the whole subtree: this section's pages, then each child's
    /// subtree in child order.
    #[must_use]
    pub fn all_pages(&self) -> PageCollection {
        self.flatten()
            .into_iter()
            .flat_map(|section| section.pages.iter().cloned())
            .collect()
    }
}

#[derive(Default)]
struct Node {
    pages: Vec<Arc<ContentPage>>,
    index_page: Option<Arc<ContentPage>>,
}

/// Builder for the [`Section`] tree.
pub struct SectionTreeBuilder {
    nodes: BTreeMap<String, Node>,
}

impl Default for SectionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionTreeBuilder {
    /// Create a builder holding only the root section.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(String::new(), Node::default());
        Self { nodes }
    }

    /// Place a page at its section path.
    ///
    /// Ancestor sections are created as needed. A page named `index.<ext>`
    /// becomes the section's index page; later index pages for the same
    /// section stay regular pages.
    pub fn add_page(&mut self, page: Arc<ContentPage>) {
        let path = page.section_path();
        self.ensure_ancestors(&path);

        let node = self.nodes.entry(path.clone()).or_default();
        if page.is_index() {
            if let Some(existing) = &node.index_page {
                tracing::debug!(
                    section = %path,
                    kept = %existing.relative_path(),
                    ignored = %page.relative_path(),
                    "Section already has an index page"
                );
            } else {
                node.index_page = Some(Arc::clone(&page));
            }
        }
        node.pages.push(page);
    }

    fn ensure_ancestors(&mut self, path: &str) {
        let mut current = path;
        while let Some((parent, _)) = current.rsplit_once('/') {
            self.nodes.entry(parent.to_owned()).or_default();
            current = parent;
        }
    }

    /// Build the tree and return its root.
    #[must_use]
    pub fn build(mut self) -> Section {
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for path in self.nodes.keys().filter(|path| !path.is_empty()) {
            let parent = path.rsplit_once('/').map_or("", |(parent, _)| parent);
            children
                .entry(parent.to_owned())
                .or_default()
                .push(path.clone());
        }

        build_section("", &mut self.nodes, &children)
    }
}

fn build_section(
    path: &str,
    nodes: &mut BTreeMap<String, Node>,
    children: &BTreeMap<String, Vec<String>>,
) -> Section {
    let mut child_sections: Vec<Section> = children
        .get(path)
        .into_iter()
        .flatten()
        .map(|child_path| build_section(child_path, nodes, children))
        .collect();
    child_sections.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.path.cmp(&b.path)));

    let node = nodes.remove(path).unwrap_or_default();

    let weight = match &node.index_page {
        Some(index) => index.weight(),
        None => node
            .pages
            .iter()
            .map(|page| page.weight())
            .chain(child_sections.iter().map(|child| child.weight))
            .min()
            .unwrap_or(MAX_WEIGHT),
    };

    let label = match &node.index_page {
        Some(index) if !index.title().trim().is_empty() => index.title().to_owned(),
        _ if path.is_empty() => ROOT_LABEL.to_owned(),
        _ => humanize(path.rsplit('/').next().unwrap_or_default()),
    };

    Section {
        path: path.to_owned(),
        label,
        weight,
        index_page: node.index_page,
        pages: PageCollection::new(node.pages),
        children: child_sections,
    }
}

/// Build a section tree from pages in the given order.
#[must_use]
pub fn build_tree<'a>(pages: impl IntoIterator<Item = &'a Arc<ContentPage>>) -> Section {
    let mut builder = SectionTreeBuilder::new();
    for page in pages {
        builder.add_page(Arc::clone(page));
    }
    builder.build()
}
