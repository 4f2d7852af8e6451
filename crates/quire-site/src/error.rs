//! Error types for the site index.

/// Error returned by index operations that reject their arguments.
///
/// Data-quality problems (unparseable dates, bad `like` patterns, unknown
/// `where` operators) never produce an error; they degrade to empty or
/// zero-valued results instead. This type is reserved for programmer and
/// configuration mistakes.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// An argument outside the accepted set (sort direction, operator, date format).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Frontmatter block that is not valid YAML.
    #[error("Invalid frontmatter: {0}")]
    Frontmatter(String),
}
