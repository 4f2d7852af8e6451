//! Dynamic field values: resolution, comparison and coercion.
//!
//! Page fields are exposed to queries as [`Value`]s (a JSON-like tagged
//! union). Keys are resolved with [`resolve_value`]:
//!
//! - `"title"`, `"slug"`, `"relative_path"`, ... - direct page attributes
//!   (camelCase spellings such as `"relativePath"` are accepted too)
//! - `"meta.<path>"` - a field inside the frontmatter map
//! - `"taxonomies.<name>"` - the term list of a taxonomy
//! - any other dotted key - a nested lookup into [`ContentPage::to_value`]
//!
//! Comparison follows [`compare_values`]: null last, numbers numerically,
//! date strings chronologically, and everything else as byte strings.
//! Sorting uses [`SortKey`], which ranks mixed kinds so the order is total.

use std::cmp::Ordering;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::IndexError;
use crate::page::ContentPage;

/// Date-time layouts tried after RFC 3339 and RFC 2822.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts, interpreted as midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y", "%B %d %Y"];

/// Resolve a (possibly dotted) key against a page.
///
/// Missing fields resolve to [`Value::Null`].
#[must_use]
pub fn resolve_value(page: &ContentPage, key: &str) -> Value {
    let key = key.trim();

    if let Some(rest) = key.strip_prefix("meta.") {
        return if rest.is_empty() {
            Value::Object(page.meta().clone())
        } else {
            lookup_in_map(page.meta(), rest)
        };
    }

    if let Some(rest) = key.strip_prefix("taxonomies.") {
        let taxonomies = page.taxonomies_value();
        return if rest.is_empty() {
            taxonomies
        } else {
            lookup_path(&taxonomies, rest)
        };
    }

    if key.contains('.') {
        return lookup_path(&page.to_value(), key);
    }

    page.field(key).unwrap_or(Value::Null)
}

fn lookup_in_map(map: &serde_json::Map<String, Value>, path: &str) -> Value {
    match path.split_once('.') {
        None => map.get(path).cloned().unwrap_or(Value::Null),
        Some((head, rest)) => map
            .get(head)
            .map_or(Value::Null, |value| lookup_path(value, rest)),
    }
}

/// Walk a dotted path through nested objects and arrays.
///
/// Array elements are addressed by decimal index (`"authors.0.name"`).
#[must_use]
pub fn lookup_path(value: &Value, path: &str) -> Value {
    let mut current = value;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Value::Null,
        }
    }
    current.clone()
}

/// Compare two values for sorting.
///
/// Equal values compare equal; `null` sorts after any non-null; values that
/// both look numeric compare numerically; values that both parse as dates
/// compare as timestamps; anything else compares as byte strings.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    match (a.is_null(), b.is_null()) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }

    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }

    if let (Value::String(x), Value::String(y)) = (a, b)
        && let (Some(tx), Some(ty)) = (parse_date(x), parse_date(y))
    {
        return tx.cmp(&ty);
    }

    stringify(a).cmp(&stringify(b))
}

/// Total ordering key for sorting by a field value.
///
/// [`compare_values`] is not transitive across mixed kinds (`"9" < "10"`
/// numerically but `"10" < "1a" < "9"` as text), so sorts rank values by
/// kind first: numbers, then dates, then text, then null.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Date(i64),
    Text(String),
    Null,
}

impl SortKey {
    /// Classify a value the way [`compare_values`] would read it.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        if value.is_null() {
            return Self::Null;
        }
        if let Some(n) = as_number(value) {
            // Folds -0.0 into 0.0 so `total_cmp` treats them as equal.
            return Self::Number(n + 0.0);
        }
        if let Value::String(s) = value
            && let Some(ts) = parse_date(s)
        {
            return Self::Date(ts);
        }
        Self::Text(stringify(value))
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
            Self::Null => 3,
        }
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Loose equality used by `where` clauses: numeric values compare by
/// magnitude (`"1" == 1`), booleans also match the strings `"true"` and
/// `"false"`, everything else compares by string form.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    if a.is_null() || b.is_null() {
        return false;
    }
    if let (Value::Bool(flag), Value::String(s)) | (Value::String(s), Value::Bool(flag)) = (a, b)
        && let Some(parsed) = parse_bool_word(s)
    {
        return parsed == *flag;
    }
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x == y;
    }
    stringify(a) == stringify(b)
}

fn parse_bool_word(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Numeric reading of a value: JSON numbers and numeric-looking strings.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Integer reading of a value, used for weights.
///
/// Floats are truncated; strings must parse as numbers.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| as_number(value).map(|f| f as i64))
        }
        _ => None,
    }
}

/// Stringify a value for string comparison and matching.
///
/// Booleans become `"1"`/`"0"`, lists are comma-joined, and null or
/// unsupported values (objects) become the empty string.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::Bool(true) => "1".to_owned(),
        Value::Bool(false) => "0".to_owned(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
    }
}

/// Stringify a value as a group key. Same as [`stringify`] except booleans
/// become `"true"`/`"false"`.
#[must_use]
pub fn group_key(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        other => stringify(other),
    }
}

/// Timestamp (seconds since the Unix epoch) of a date-like value.
///
/// Integers are taken as timestamps already; strings are parsed as
/// numbers first and then as dates. Returns `None` when nothing parses.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| parse_date(trimmed))
        }
        _ => None,
    }
}

/// Parse a date string into a UTC timestamp.
///
/// Offset-less values are taken as UTC.
#[must_use]
pub fn parse_date(input: &str) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.timestamp());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.and_utc().timestamp());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(input, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
    })
}

/// Validate a `strftime` format string.
///
/// # Errors
///
/// Returns [`IndexError::InvalidArgument`] if the format contains an
/// unknown specifier.
pub fn validate_date_format(format: &str) -> Result<(), IndexError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(IndexError::InvalidArgument(format!(
            "invalid date format: {format:?}"
        )));
    }
    Ok(())
}

/// Format a timestamp with a `strftime` format that already passed
/// [`validate_date_format`]. Out-of-range timestamps yield `None`.
#[must_use]
pub fn format_timestamp(timestamp: i64, format: &str) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format(format).to_string())
}
