//! Page visibility for previous/next navigation.

use serde_json::Value;

use crate::page::ContentPage;
use crate::value::stringify;

/// Default meta key that hides a page from navigation.
pub const DEFAULT_HIDE_KEY: &str = "navigation";

/// Decides which pages previous/next links may point at.
///
/// A page is hidden when its `meta.<hide_key>` is false (`false`, `0`,
/// `"false"`, `"no"` or `"off"`). Pages without the key stay visible.
///
/// ```
/// use quire_site::{ContentPage, NavigationFilter};
/// use serde_json::json;
///
/// let hidden = ContentPage::builder("draft.md").meta("navigation", json!(false)).build();
/// assert!(!NavigationFilter::default().is_visible(&hidden));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationFilter {
    /// Meta key checked on each page.
    pub hide_key: String,
}

impl Default for NavigationFilter {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_KEY)
    }
}

impl NavigationFilter {
    /// Create a filter checking `hide_key`.
    #[must_use]
    pub fn new(hide_key: impl Into<String>) -> Self {
        Self {
            hide_key: hide_key.into(),
        }
    }

    /// Whether `page` may appear in navigation.
    #[must_use]
    pub fn is_visible(&self, page: &ContentPage) -> bool {
        match page.meta().get(&self.hide_key) {
            None | Some(Value::Null) => true,
            Some(value) => !matches!(
                stringify(value).trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            ),
        }
    }
}
