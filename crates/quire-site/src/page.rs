//! Content page records.
//!
//! A [`ContentPage`] describes one discovered content file. Pages are built
//! once (by [`ContentPage::from_source`] or [`ContentPage::builder`]) and are
//! immutable afterwards; collections share them through `Arc`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::IndexError;
use crate::frontmatter::Frontmatter;
use crate::normalize::{
    file_stem, humanize, is_index_file, join_path, normalize_section_path, parent_dir,
};
use crate::value::{as_integer, stringify, timestamp};

/// Weight assigned to pages without a usable `weight` field, so they sort last.
pub const MAX_WEIGHT: i64 = i64::MAX;

/// One discovered content unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentPage {
    source_path: String,
    relative_path: String,
    slug: String,
    url_path: String,
    output_relative_path: String,
    title: String,
    source: String,
    draft: bool,
    meta: Map<String, Value>,
    taxonomies: BTreeMap<String, Vec<String>>,
    #[serde(rename = "type")]
    page_type: Option<String>,
}

impl ContentPage {
    /// Start building a page for a source-root-relative path.
    ///
    /// Slug, URL path and output path are derived from the relative path
    /// until overridden.
    #[must_use]
    pub fn builder(relative_path: impl Into<String>) -> ContentPageBuilder {
        ContentPageBuilder::new(relative_path.into())
    }

    /// Build a page from raw file content with YAML frontmatter.
    ///
    /// - `title`: frontmatter `title`, else the first `# ` heading, else
    ///   the humanized file name
    /// - `slug`: frontmatter `slug`, else derived from the relative path
    /// - `draft`, `type`: frontmatter fields of the same name
    /// - taxonomies: frontmatter keys named in `taxonomy_names`, as term lists
    ///
    /// Every frontmatter field is kept in `meta`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Frontmatter`] if the frontmatter is malformed.
    pub fn from_source(
        relative_path: &str,
        raw: &str,
        taxonomy_names: &[&str],
    ) -> Result<Self, IndexError> {
        let Frontmatter { fields, body } = Frontmatter::parse(raw)?;

        let mut builder = Self::builder(relative_path);

        if let Some(slug) = fields.get("slug").and_then(Value::as_str)
            && !slug.trim().is_empty()
        {
            builder = builder.slug(slug);
        }

        let title = fields
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .or_else(|| first_heading(&body))
            .unwrap_or_else(|| default_title(&builder.page.slug));

        builder = builder
            .title(title)
            .draft(fields.get("draft").and_then(Value::as_bool).unwrap_or(false));

        if let Some(page_type) = fields.get("type").and_then(Value::as_str) {
            builder = builder.page_type(page_type);
        }

        for name in taxonomy_names {
            let terms = match fields.get(*name) {
                Some(Value::Array(items)) => items.iter().map(stringify).collect(),
                Some(Value::String(term)) => vec![term.clone()],
                _ => continue,
            };
            builder = builder.taxonomy(*name, terms);
        }

        Ok(builder.metas(fields).source(body).build())
    }

    /// Filesystem location of the source file.
    #[must_use]
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Source-root-relative path with forward slashes.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Canonical identifier (no surrounding slashes; `""` is the root).
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Public URL path (always starts with `/`).
    #[must_use]
    pub fn url_path(&self) -> &str {
        &self.url_path
    }

    /// Relative emission path of the rendered file.
    #[must_use]
    pub fn output_relative_path(&self) -> &str {
        &self.output_relative_path
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw, unrendered body.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the page is a draft.
    #[must_use]
    pub fn draft(&self) -> bool {
        self.draft
    }

    /// Frontmatter fields.
    #[must_use]
    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// Taxonomy terms keyed by taxonomy name.
    #[must_use]
    pub fn taxonomies(&self) -> &BTreeMap<String, Vec<String>> {
        &self.taxonomies
    }

    /// Terms for one taxonomy (empty if the page has none).
    #[must_use]
    pub fn terms(&self, taxonomy: &str) -> &[String] {
        self.taxonomies
            .get(taxonomy)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolved content type: the explicit type, else a non-blank `meta.type`.
    #[must_use]
    pub fn page_type(&self) -> Option<&str> {
        self.page_type.as_deref().or_else(|| {
            self.meta
                .get("type")
                .and_then(Value::as_str)
                .filter(|t| !t.trim().is_empty())
        })
    }

    /// Ordering weight from `meta.weight`, or [`MAX_WEIGHT`] when absent.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.meta
            .get("weight")
            .and_then(as_integer)
            .unwrap_or(MAX_WEIGHT)
    }

    /// Timestamp of `meta.date`, or `0` when absent or unparseable.
    #[must_use]
    pub fn date_timestamp(&self) -> i64 {
        self.meta.get("date").and_then(timestamp).unwrap_or(0)
    }

    /// Section path: a non-blank `meta.section` override, else the
    /// directory of the relative path (`""` for top-level files).
    #[must_use]
    pub fn section_path(&self) -> String {
        match self.meta.get("section").and_then(Value::as_str) {
            Some(section) if !section.trim().is_empty() => normalize_section_path(section),
            _ => normalize_section_path(parent_dir(&self.relative_path)),
        }
    }

    /// First segment of [`section_path`](Self::section_path) (`""` for root pages).
    #[must_use]
    pub fn top_level_section(&self) -> String {
        let path = self.section_path();
        path.split('/').next().unwrap_or_default().to_owned()
    }

    /// Whether the source file is a directory index (`index.<ext>`).
    #[must_use]
    pub fn is_index(&self) -> bool {
        is_index_file(&self.relative_path)
    }

    /// Look up a direct attribute by name. Accepts snake_case and camelCase.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "source_path" | "sourcePath" => Value::from(self.source_path.as_str()),
            "relative_path" | "relativePath" => Value::from(self.relative_path.as_str()),
            "slug" => Value::from(self.slug.as_str()),
            "url_path" | "urlPath" => Value::from(self.url_path.as_str()),
            "output_relative_path" | "outputRelativePath" => {
                Value::from(self.output_relative_path.as_str())
            }
            "title" => Value::from(self.title.as_str()),
            "source" => Value::from(self.source.as_str()),
            "draft" => Value::Bool(self.draft),
            "meta" => Value::Object(self.meta.clone()),
            "taxonomies" => self.taxonomies_value(),
            "type" => self.page_type().map_or(Value::Null, Value::from),
            _ => return None,
        };
        Some(value)
    }

    /// Taxonomies as a JSON object of string lists.
    #[must_use]
    pub fn taxonomies_value(&self) -> Value {
        Value::Object(
            self.taxonomies
                .iter()
                .map(|(name, terms)| (name.clone(), Value::from(terms.clone())))
                .collect(),
        )
    }

    /// Structural projection of the page used for generic dotted lookups.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Builder for [`ContentPage`].
#[derive(Debug)]
pub struct ContentPageBuilder {
    page: ContentPage,
}

impl ContentPageBuilder {
    fn new(relative_path: String) -> Self {
        let relative_path = relative_path.replace('\\', "/");
        let slug = derive_slug(&relative_path);
        let page = ContentPage {
            source_path: relative_path.clone(),
            title: default_title(&slug),
            url_path: url_path_for(&slug),
            output_relative_path: output_path_for(&slug),
            relative_path,
            slug,
            source: String::new(),
            draft: false,
            meta: Map::new(),
            taxonomies: BTreeMap::new(),
            page_type: None,
        };
        Self { page }
    }

    /// Set the filesystem source path.
    #[must_use]
    pub fn source_path(mut self, source_path: impl Into<String>) -> Self {
        self.page.source_path = source_path.into();
        self
    }

    /// Override the slug. URL and output paths follow the new slug.
    #[must_use]
    pub fn slug(mut self, slug: &str) -> Self {
        let slug = slug.trim().trim_matches('/').to_owned();
        self.page.url_path = url_path_for(&slug);
        self.page.output_relative_path = output_path_for(&slug);
        self.page.slug = slug;
        self
    }

    /// Override the public URL path.
    #[must_use]
    pub fn url_path(mut self, url_path: &str) -> Self {
        let trimmed = url_path.trim();
        self.page.url_path = if trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Override the output path.
    #[must_use]
    pub fn output_relative_path(mut self, path: impl Into<String>) -> Self {
        self.page.output_relative_path = path.into();
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.page.title = title.into();
        self
    }

    /// Set the raw body.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.page.source = source.into();
        self
    }

    /// Mark the page as a draft.
    #[must_use]
    pub fn draft(mut self, draft: bool) -> Self {
        self.page.draft = draft;
        self
    }

    /// Set one frontmatter field.
    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.page.meta.insert(key.into(), value);
        self
    }

    /// Merge a map of frontmatter fields.
    #[must_use]
    pub fn metas(mut self, fields: Map<String, Value>) -> Self {
        self.page.meta.extend(fields);
        self
    }

    /// Set the terms of one taxonomy.
    #[must_use]
    pub fn taxonomy<I, S>(mut self, name: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.page
            .taxonomies
            .insert(name.into(), terms.into_iter().map(Into::into).collect());
        self
    }

    /// Set the explicit content type.
    #[must_use]
    pub fn page_type(mut self, page_type: impl Into<String>) -> Self {
        self.page.page_type = Some(page_type.into());
        self
    }

    /// Finish the page.
    #[must_use]
    pub fn build(self) -> ContentPage {
        self.page
    }
}

/// Derive a slug from a relative path: `docs/guide.md` becomes `docs/guide`,
/// `docs/index.md` becomes `docs`, and the root index becomes `""`.
fn derive_slug(relative_path: &str) -> String {
    let dir = parent_dir(relative_path);
    if is_index_file(relative_path) {
        join_path(&[dir])
    } else {
        join_path(&[dir, file_stem(relative_path)])
    }
}

fn url_path_for(slug: &str) -> String {
    if slug.is_empty() {
        "/".to_owned()
    } else {
        format!("/{slug}/")
    }
}

fn output_path_for(slug: &str) -> String {
    if slug.is_empty() {
        "index.html".to_owned()
    } else {
        format!("{slug}/index.html")
    }
}

fn default_title(slug: &str) -> String {
    match slug.rsplit('/').next() {
        Some(last) if !last.is_empty() => humanize(last),
        _ => "Home".to_owned(),
    }
}

/// First ATX level-1 heading of a body, if any.
fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().trim_end_matches('#').trim().to_owned())
        .filter(|heading| !heading.is_empty())
}
