//! Immutable page collections with a query algebra.
//!
//! Every operation on [`PageCollection`] returns a new collection; the
//! receiver is never modified. Pages are shared via `Arc`, so derived
//! collections are cheap.
//!
//! # Example
//!
//! ```
//! use quire_site::{ContentPage, PageCollection, SortDirection};
//! use serde_json::json;
//!
//! let pages = PageCollection::from_pages([
//!     ContentPage::builder("blog/b.md").meta("weight", json!(2)).build(),
//!     ContentPage::builder("blog/a.md").meta("weight", json!(1)).build(),
//! ]);
//!
//! let sorted = pages.by("meta.weight", SortDirection::Asc);
//! assert_eq!(sorted.first().map(|p| p.slug()), Some("blog/a"));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::IndexError;
use crate::page::ContentPage;
use crate::value::{
    SortKey, compare_values, format_timestamp, group_key, loose_equals, resolve_value, stringify,
    timestamp, validate_date_format,
};

/// Date key used by [`PageCollection::by_date`] and
/// [`PageCollection::group_by_date`] when none is given.
pub const DEFAULT_DATE_KEY: &str = "meta.date";

/// Group key for pages whose date is missing or unparseable.
pub const UNKNOWN_DATE_GROUP: &str = "unknown";

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison result.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(IndexError::InvalidArgument(format!(
                "sort direction must be \"asc\" or \"desc\", got {other:?}"
            ))),
        }
    }
}

/// Comparison operator for [`PageCollection::where_op`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    /// Loosely equal.
    Eq,
    /// Not loosely equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Member of a list, or substring of a string.
    In,
    /// Negation of [`Operator::In`].
    NotIn,
    /// Two lists share at least one element.
    Intersect,
    /// Regular expression match.
    Like,
}

impl FromStr for Operator {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        match normalized.as_str() {
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "gt" => Ok(Self::Gt),
            "ge" => Ok(Self::Ge),
            "lt" => Ok(Self::Lt),
            "le" => Ok(Self::Le),
            "in" => Ok(Self::In),
            "not in" => Ok(Self::NotIn),
            "intersect" => Ok(Self::Intersect),
            "like" => Ok(Self::Like),
            _ => Err(IndexError::InvalidArgument(format!("unknown operator: {s:?}"))),
        }
    }
}

impl Operator {
    /// Evaluate the operator. [`Operator::Like`] is handled separately
    /// because its pattern is compiled once per query.
    fn evaluate(self, actual: &Value, expected: &Value) -> bool {
        match self {
            Self::Eq => loose_equals(actual, expected),
            Self::Ne => !loose_equals(actual, expected),
            Self::Gt => ordered(actual, expected, Ordering::is_gt),
            Self::Ge => ordered(actual, expected, Ordering::is_ge),
            Self::Lt => ordered(actual, expected, Ordering::is_lt),
            Self::Le => ordered(actual, expected, Ordering::is_le),
            Self::In => contains(actual, expected),
            Self::NotIn => !contains(actual, expected),
            Self::Intersect => intersects(actual, expected),
            Self::Like => false,
        }
    }
}

fn ordered(actual: &Value, expected: &Value, test: fn(Ordering) -> bool) -> bool {
    !actual.is_null() && test(compare_values(actual, expected))
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (_, Value::Array(items)) => items.iter().any(|item| loose_equals(actual, item)),
        (Value::String(needle), Value::String(haystack)) => haystack.contains(needle.as_str()),
        (Value::Array(items), scalar) if !scalar.is_null() => {
            items.iter().any(|item| loose_equals(item, scalar))
        }
        _ => false,
    }
}

fn intersects(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Array(left), Value::Array(right)) => left
            .iter()
            .any(|a| right.iter().any(|b| loose_equals(a, b))),
        _ => false,
    }
}

/// Compile a `like` pattern.
///
/// A pattern wrapped in delimiters with optional trailing flags
/// (`/^intro/i`, `#docs#`, `{a|b}`) is unwrapped; anything else is used as
/// a bare expression. Returns `None` if the expression does not compile.
fn compile_like(pattern: &str) -> Option<Regex> {
    let (body, flags) = split_delimited(pattern).unwrap_or((pattern, ""));

    let mut inline = String::new();
    for flag in flags.chars() {
        match flag {
            'i' | 'm' | 's' | 'x' | 'U' => inline.push(flag),
            _ => {}
        }
    }

    let expression = if inline.is_empty() {
        body.to_owned()
    } else {
        format!("(?{inline}){body}")
    };

    match Regex::new(&expression) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::debug!(pattern = %pattern, error = %e, "Invalid like pattern, matching nothing");
            None
        }
    }
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let open = pattern.chars().next()?;
    if open.is_alphanumeric() || open.is_whitespace() || open == '\\' {
        return None;
    }
    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    };

    let inner_start = open.len_utf8();
    let end = pattern.rfind(close).filter(|&end| end >= inner_start)?;
    let flags = &pattern[end + close.len_utf8()..];
    if !flags.chars().all(|c| "imsxuUD".contains(c)) {
        return None;
    }
    Some((&pattern[inner_start..end], flags))
}

/// Ordered, immutable sequence of pages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageCollection {
    pages: Vec<Arc<ContentPage>>,
}

impl PageCollection {
    /// Create a collection from shared pages, preserving order.
    pub fn new(pages: impl IntoIterator<Item = Arc<ContentPage>>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
        }
    }

    /// Create a collection from owned pages.
    pub fn from_pages(pages: impl IntoIterator<Item = ContentPage>) -> Self {
        Self::new(pages.into_iter().map(Arc::new))
    }

    /// Keep pages matching a predicate, preserving order.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&ContentPage) -> bool) -> Self {
        Self::new(self.pages.iter().filter(|p| predicate(p)).cloned())
    }

    /// Stable sort by a resolved field value (see [`SortKey`]).
    #[must_use]
    pub fn by(&self, key: &str, direction: SortDirection) -> Self {
        let mut decorated: Vec<(SortKey, Arc<ContentPage>)> = self
            .pages
            .iter()
            .map(|page| (SortKey::of(&resolve_value(page, key)), Arc::clone(page)))
            .collect();
        decorated.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
        Self::new(decorated.into_iter().map(|(_, page)| page))
    }

    /// Stable sort by the timestamp of a date field. Missing or
    /// unparseable dates count as the epoch.
    #[must_use]
    pub fn by_date(&self, direction: SortDirection, date_key: &str) -> Self {
        let mut decorated: Vec<(i64, Arc<ContentPage>)> = self
            .pages
            .iter()
            .map(|page| {
                let ts = timestamp(&resolve_value(page, date_key)).unwrap_or(0);
                (ts, Arc::clone(page))
            })
            .collect();
        decorated.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
        Self::new(decorated.into_iter().map(|(_, page)| page))
    }

    /// Sort by title.
    #[must_use]
    pub fn by_title(&self, direction: SortDirection) -> Self {
        self.by("title", direction)
    }

    /// Keep pages whose field loosely equals `value`.
    #[must_use]
    pub fn where_eq(&self, key: &str, value: impl Into<Value>) -> Self {
        let expected = value.into();
        self.filter(|page| loose_equals(&resolve_value(page, key), &expected))
    }

    /// Keep pages whose field satisfies `operator` against `value`.
    ///
    /// Operators: `eq`, `ne`, `gt`, `ge`, `lt`, `le`, `in`, `not in`,
    /// `intersect`, `like`. An unknown operator or an invalid `like`
    /// pattern matches nothing.
    #[must_use]
    pub fn where_op(&self, key: &str, operator: &str, value: impl Into<Value>) -> Self {
        let Ok(operator) = operator.parse::<Operator>() else {
            return Self::default();
        };
        self.where_operator(key, operator, &value.into())
    }

    /// Typed form of [`where_op`](Self::where_op).
    #[must_use]
    pub fn where_operator(&self, key: &str, operator: Operator, expected: &Value) -> Self {
        if operator == Operator::Like {
            let Some(regex) = compile_like(&stringify(expected)) else {
                return Self::default();
            };
            return self.filter(|page| regex.is_match(&stringify(&resolve_value(page, key))));
        }

        self.filter(|page| operator.evaluate(&resolve_value(page, key), expected))
    }

    /// Keep pages whose resolved type equals `page_type`, ignoring case.
    /// A blank type matches nothing.
    #[must_use]
    pub fn where_type(&self, page_type: &str) -> Self {
        let wanted = page_type.trim().to_lowercase();
        if wanted.is_empty() {
            return Self::default();
        }
        self.filter(|page| {
            page.page_type()
                .is_some_and(|t| t.trim().to_lowercase() == wanted)
        })
    }

    /// Group pages by the string form of a field.
    ///
    /// Without a direction, groups keep the order in which their key was
    /// first seen; `"asc"`/`"desc"` sort keys as byte strings.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidArgument`] for any other direction.
    pub fn group_by(&self, key: &str, direction: Option<&str>) -> Result<PageGroups, IndexError> {
        let direction = direction.map(str::parse::<SortDirection>).transpose()?;
        let groups = self.group_with(|page| group_key(&resolve_value(page, key)));
        Ok(groups.sorted(direction))
    }

    /// Group pages by a formatted date (`strftime` syntax, e.g. `"%Y-%m"`).
    ///
    /// Pages whose date is missing or unparseable land in the
    /// [`UNKNOWN_DATE_GROUP`] bucket, which sorts with the other keys as a
    /// plain string.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidArgument`] for an invalid direction or
    /// date format.
    pub fn group_by_date(
        &self,
        format: &str,
        direction: &str,
        date_key: &str,
    ) -> Result<PageGroups, IndexError> {
        let direction = direction.parse::<SortDirection>()?;
        validate_date_format(format)?;

        let groups = self.group_with(|page| {
            timestamp(&resolve_value(page, date_key))
                .and_then(|ts| format_timestamp(ts, format))
                .unwrap_or_else(|| UNKNOWN_DATE_GROUP.to_owned())
        });
        Ok(groups.sorted(Some(direction)))
    }

    fn group_with(&self, key_of: impl Fn(&ContentPage) -> String) -> PageGroups {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<Arc<ContentPage>>)> = Vec::new();

        for page in &self.pages {
            let key = key_of(page);
            let position = *positions.entry(key.clone()).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[position].1.push(Arc::clone(page));
        }

        PageGroups {
            groups: groups
                .into_iter()
                .map(|(key, pages)| (key, Self::new(pages)))
                .collect(),
        }
    }

    /// First `n` pages.
    #[must_use]
    pub fn take(&self, n: usize) -> Self {
        Self::new(self.pages.iter().take(n).cloned())
    }

    /// Pages from `offset`, at most `length` of them (all remaining if `None`).
    #[must_use]
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Self {
        let rest = self.pages.iter().skip(offset).cloned();
        match length {
            Some(length) => Self::new(rest.take(length)),
            None => Self::new(rest),
        }
    }

    /// Pages in reverse order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new(self.pages.iter().rev().cloned())
    }

    /// First page.
    #[must_use]
    pub fn first(&self) -> Option<&Arc<ContentPage>> {
        self.pages.first()
    }

    /// Last page.
    #[must_use]
    pub fn last(&self) -> Option<&Arc<ContentPage>> {
        self.pages.last()
    }

    /// Page at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<ContentPage>> {
        self.pages.get(index)
    }

    /// Number of pages.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over the pages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<ContentPage>> {
        self.pages.iter()
    }

    /// Pages as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Arc<ContentPage>] {
        &self.pages
    }

    /// Position of the page with the given slug.
    pub(crate) fn position_of_slug(&self, slug: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.slug() == slug)
    }
}

impl FromIterator<Arc<ContentPage>> for PageCollection {
    fn from_iter<T: IntoIterator<Item = Arc<ContentPage>>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a PageCollection {
    type Item = &'a Arc<ContentPage>;
    type IntoIter = std::slice::Iter<'a, Arc<ContentPage>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Ordered groups produced by [`PageCollection::group_by`] and
/// [`PageCollection::group_by_date`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageGroups {
    groups: Vec<(String, PageCollection)>,
}

impl PageGroups {
    fn sorted(mut self, direction: Option<SortDirection>) -> Self {
        if let Some(direction) = direction {
            self.groups
                .sort_by(|(a, _), (b, _)| direction.apply(a.as_bytes().cmp(b.as_bytes())));
        }
        self
    }

    /// Pages of one group.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PageCollection> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, pages)| pages)
    }

    /// Group keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    /// Groups in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageCollection)> {
        self.groups.iter().map(|(key, pages)| (key.as_str(), pages))
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl IntoIterator for PageGroups {
    type Item = (String, PageCollection);
    type IntoIter = std::vec::IntoIter<(String, PageCollection)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
