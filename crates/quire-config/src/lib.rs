//! Configuration management for Quire.
//!
//! Parses `quire.toml` with serde and finds it by walking up from the
//! current directory. Every section is optional:
//!
//! ```toml
//! [content]
//! dir = "content"           # relative to the config file
//!
//! [pagination]
//! page_size = 10
//! path_segment = "page"
//!
//! [taxonomies]
//! names = ["tags", "categories"]
//!
//! [navigation]
//! hide_key = "navigation"
//!
//! [listing]
//! date_key = "meta.date"
//! ```
//!
//! Command-line style overrides are applied after loading via
//! [`Overrides`]. `content.dir` supports `${VAR}` and `${VAR:-default}`
//! environment references.

mod expand;

use std::path::{Path, PathBuf};

use quire_site::{
    DEFAULT_DATE_KEY, DEFAULT_HIDE_KEY, DEFAULT_PAGE_SIZE, DEFAULT_PATH_SEGMENT, IndexError,
    NavigationFilter, PageCollection, PageGroups, PagerSettings, SortDirection,
};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the content directory.
    pub content_dir: Option<PathBuf>,
    /// Override the page size.
    pub page_size: Option<usize>,
    /// Override the pagination path segment.
    pub path_segment: Option<String>,
    /// Override the taxonomy names.
    pub taxonomies: Option<Vec<String>>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content location as written in TOML.
    content: ContentConfigRaw,
    /// Pagination settings.
    pub pagination: PaginationConfig,
    /// Taxonomies collected from frontmatter.
    pub taxonomies: TaxonomiesConfig,
    /// Previous/next visibility.
    pub navigation: NavigationConfig,
    /// Listing defaults.
    pub listing: ListingConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    dir: Option<String>,
}

/// Resolved content configuration.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding content files.
    pub dir: PathBuf,
}

/// Pagination configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Pages per listing page.
    pub page_size: usize,
    /// URL segment before the page number.
    pub path_segment: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            path_segment: DEFAULT_PATH_SEGMENT.to_owned(),
        }
    }
}

/// Taxonomy configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TaxonomiesConfig {
    /// Frontmatter keys treated as taxonomies.
    pub names: Vec<String>,
}

impl Default for TaxonomiesConfig {
    fn default() -> Self {
        Self {
            names: vec!["tags".to_owned(), "categories".to_owned()],
        }
    }
}

/// Navigation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Meta key that hides a page from previous/next links when false.
    pub hide_key: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            hide_key: DEFAULT_HIDE_KEY.to_owned(),
        }
    }
}

/// Listing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Field used by date sorting and grouping.
    pub date_key: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            date_key: DEFAULT_DATE_KEY.to_owned(),
        }
    }
}

impl From<&PaginationConfig> for PagerSettings {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            page_size: config.page_size,
            path_segment: config.path_segment.clone(),
        }
    }
}

impl From<&NavigationConfig> for NavigationFilter {
    fn from(config: &NavigationConfig) -> Self {
        Self::new(config.hide_key.clone())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.dir`").
        field: String,
        /// Error message (e.g., "${`CONTENT_DIR`} not set").
        message: String,
    },
}

fn require_non_blank(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `quire.toml` in the current directory and its parents,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Taxonomy names as string slices, ready for page parsing.
    #[must_use]
    pub fn taxonomy_names(&self) -> Vec<&str> {
        self.taxonomies.names.iter().map(String::as_str).collect()
    }

    /// Pagination settings for [`quire_site::Pager`].
    #[must_use]
    pub fn pager_settings(&self) -> PagerSettings {
        PagerSettings::from(&self.pagination)
    }

    /// Navigation filter for previous/next helpers.
    #[must_use]
    pub fn navigation_filter(&self) -> NavigationFilter {
        NavigationFilter::from(&self.navigation)
    }

    /// Field that holds a page's date in listings.
    #[must_use]
    pub fn date_key(&self) -> &str {
        &self.listing.date_key
    }

    /// Sort pages by the configured date field.
    #[must_use]
    pub fn sort_by_date(&self, pages: &PageCollection, direction: SortDirection) -> PageCollection {
        pages.by_date(direction, self.date_key())
    }

    /// Group pages into date buckets (e.g. `"%Y"` for a yearly archive)
    /// using the configured date field.
    pub fn group_by_date(
        &self,
        pages: &PageCollection,
        format: &str,
        direction: &str,
    ) -> Result<PageGroups, IndexError> {
        pages.group_by_date(format, direction, self.date_key())
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.content_dir {
            self.content_resolved.dir.clone_from(dir);
        }
        if let Some(page_size) = overrides.page_size {
            self.pagination.page_size = page_size;
        }
        if let Some(segment) = &overrides.path_segment {
            self.pagination.path_segment = trim_segment(segment);
        }
        if let Some(names) = &overrides.taxonomies {
            self.taxonomies.names.clone_from(names);
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for the config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            pagination: PaginationConfig::default(),
            taxonomies: TaxonomiesConfig::default(),
            navigation: NavigationConfig::default(),
            listing: ListingConfig::default(),
            content_resolved: ContentConfig {
                dir: base.join("content"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.pagination.path_segment = trim_segment(&config.pagination.path_segment);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.page_size == 0 {
            return Err(ConfigError::Validation(
                "pagination.page_size must be greater than 0".to_owned(),
            ));
        }
        self.validate_taxonomies()?;
        require_non_blank(&self.navigation.hide_key, "navigation.hide_key")?;
        require_non_blank(&self.listing.date_key, "listing.date_key")?;
        Ok(())
    }

    fn validate_taxonomies(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<String> = Vec::with_capacity(self.taxonomies.names.len());
        for name in &self.taxonomies.names {
            require_non_blank(name, "taxonomies.names")?;
            let key = name.trim().to_lowercase();
            if seen.contains(&key) {
                return Err(ConfigError::Validation(format!(
                    "taxonomies.names contains duplicate entry: {name}"
                )));
            }
            seen.push(key);
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.dir {
            self.content.dir = Some(expand::expand_env(dir, "content.dir")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            dir: config_dir.join(self.content.dir.as_deref().unwrap_or("content")),
        };
    }
}

fn trim_segment(segment: &str) -> String {
    segment.trim().trim_matches('/').to_owned()
}
