//! Site indexing and query engine for Quire.
//!
//! This crate provides:
//! - [`ContentPage`]: one discovered content file with parsed frontmatter
//! - [`PageCollection`]: immutable filter/sort/group algebra over pages
//! - [`Section`]: the directory-shaped section tree
//! - [`SiteIndex`]: memoized lookups, taxonomies and previous/next navigation
//! - [`Pager`]: pagination over any collection
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), quire_site::IndexError> {
//! use quire_site::{ContentPage, SiteIndex};
//!
//! let pages = vec![
//!     ContentPage::from_source("index.md", "# Home", &[])?,
//!     ContentPage::from_source("guide/setup.md", "---\nweight: 1\ntags: [intro]\n---\n# Setup", &["tags"])?,
//! ];
//! let site = SiteIndex::new(pages);
//!
//! assert_eq!(site.regular_pages().first().map(|p| p.title()), Some("Setup"));
//! assert_eq!(site.taxonomy("tags").term("intro").count(), 1);
//! assert!(site.section("guide").is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Field Values
//!
//! Query helpers work on [`serde_json::Value`]s resolved from pages:
//!
//! ```
//! use quire_site::{ContentPage, SortKey, loose_equals, resolve_value};
//! use serde_json::json;
//!
//! let page = ContentPage::builder("post.md").meta("draft", json!(true)).build();
//! let draft = resolve_value(&page, "meta.draft");
//!
//! assert!(loose_equals(&draft, &json!("true")));
//! assert!(SortKey::of(&json!("10")) < SortKey::of(&json!("1a")));
//! ```

mod collection;
mod error;
mod frontmatter;
mod navigation;
mod normalize;
mod page;
mod pager;
mod render;
mod section;
mod site_index;
mod taxonomy;
mod value;

pub use collection::{
    DEFAULT_DATE_KEY, Operator, PageCollection, PageGroups, SortDirection, UNKNOWN_DATE_GROUP,
};
pub use error::IndexError;
pub use frontmatter::Frontmatter;
pub use navigation::{DEFAULT_HIDE_KEY, NavigationFilter};
pub use normalize::{
    file_name, file_stem, humanize, is_index_file, join_path, normalize_base_path,
    normalize_section_path, normalize_slug, normalize_url_path, parent_dir,
};
pub use page::{ContentPage, ContentPageBuilder, MAX_WEIGHT};
pub use pager::{DEFAULT_PAGE_SIZE, DEFAULT_PATH_SEGMENT, Pager, PagerSettings};
pub use render::{MarkdownRenderer, MarkupRenderer, RenderOptions, RenderedPage, TocEntry};
pub use section::{ROOT_LABEL, Section, SectionTreeBuilder, build_tree};
pub use site_index::{Breadcrumb, SiteIndex};
pub use taxonomy::{TaxonomyCollection, normalize_term};
pub use value::{
    SortKey, as_integer, as_number, compare_values, format_timestamp, group_key, lookup_path,
    loose_equals, parse_date, resolve_value, stringify, timestamp, validate_date_format,
};
