//! Markup rendering interface.
//!
//! The index never renders anything itself. Build drivers plug a
//! [`MarkupRenderer`] in and feed it page bodies through
//! [`ContentPage::render_with`]. [`MarkdownRenderer`] is the stock
//! implementation on top of `pulldown-cmark`: it assigns unique ids to
//! headings, collects a table of contents, and can pull the first H1 out as
//! the page title.
//!
//! ```
//! use quire_site::{MarkdownRenderer, MarkupRenderer, RenderOptions};
//!
//! let page = MarkdownRenderer.render("# Hello\n\n## Usage", &RenderOptions::default());
//! assert_eq!(page.title.as_deref(), Some("Hello"));
//! assert_eq!(page.toc[0].id, "usage");
//! ```

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::page::ContentPage;

/// Per-page rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Report the first H1 as [`RenderedPage::title`] and keep it out of the
    /// table of contents.
    pub extract_title: bool,
    /// Enable tables, strikethrough, task lists and alerts.
    pub gfm: bool,
    /// Deepest heading level listed in the table of contents.
    pub toc_depth: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            extract_title: true,
            gfm: true,
            toc_depth: 3,
        }
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text without markup.
    pub title: String,
    /// Anchor id assigned to the heading.
    pub id: String,
}

/// Output of a renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedPage {
    /// Rendered HTML.
    pub html: String,
    /// First H1 text, when title extraction is enabled.
    pub title: Option<String>,
    /// Headings in document order.
    pub toc: Vec<TocEntry>,
}

/// Turns page source into HTML.
pub trait MarkupRenderer: Send + Sync {
    /// Render `source` with the given options.
    fn render(&self, source: &str, options: &RenderOptions) -> RenderedPage;
}

impl ContentPage {
    /// Render this page's body.
    pub fn render_with<R: MarkupRenderer + ?Sized>(
        &self,
        renderer: &R,
        options: &RenderOptions,
    ) -> RenderedPage {
        renderer.render(self.source(), options)
    }
}

/// CommonMark renderer backed by `pulldown-cmark`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownRenderer;

struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
    text: String,
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, source: &str, options: &RenderOptions) -> RenderedPage {
        let parser = Parser::new_ext(source, parser_options(options.gfm));

        let mut events = Vec::new();
        let mut pending: Option<PendingHeading<'_>> = None;
        let mut ids = HeadingIds::default();
        let mut title = None;
        let mut toc = Vec::new();

        for event in parser {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    pending = Some(PendingHeading {
                        level,
                        id,
                        classes,
                        attrs,
                        inner: Vec::new(),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(level)) => {
                    let Some(heading) = pending.take() else {
                        continue;
                    };
                    let text = heading.text.trim().to_owned();
                    let depth = heading_level_to_num(level);
                    let id = ids.assign(
                        heading
                            .id
                            .map_or_else(|| slugify(&text), |id| id.to_string()),
                    );

                    if options.extract_title && depth == 1 && title.is_none() {
                        title = Some(text);
                    } else if depth <= options.toc_depth {
                        toc.push(TocEntry {
                            level: depth,
                            title: text,
                            id: id.clone(),
                        });
                    }

                    events.push(Event::Start(Tag::Heading {
                        level: heading.level,
                        id: Some(id.into()),
                        classes: heading.classes,
                        attrs: heading.attrs,
                    }));
                    events.extend(heading.inner);
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                other => match pending.as_mut() {
                    Some(heading) => {
                        if let Event::Text(text) | Event::Code(text) = &other {
                            heading.text.push_str(text);
                        }
                        heading.inner.push(other);
                    }
                    None => events.push(other),
                },
            }
        }

        let mut html = String::with_capacity(source.len() + source.len() / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderedPage { html, title, toc }
    }
}

fn parser_options(gfm: bool) -> Options {
    let base = Options::ENABLE_HEADING_ATTRIBUTES;
    if gfm {
        base | Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    } else {
        base
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Turn heading text into an anchor id: lowercase alphanumerics joined by
/// single dashes.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug.to_owned()
    }
}

/// Hands out unique ids: repeats get `-1`, `-2`, ...
#[derive(Default)]
struct HeadingIds {
    seen: HashMap<String, usize>,
}

impl HeadingIds {
    fn assign(&mut self, base: String) -> String {
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}
