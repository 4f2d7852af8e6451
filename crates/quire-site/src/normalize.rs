//! Slug, path and label normalization helpers.
//!
//! All functions are pure string transformations. Paths use forward slashes
//! regardless of platform.

/// Normalize a slug for lookup.
///
/// Surrounding slashes are trimmed and a blank slug folds to `"index"`, so
/// `""`, `"/"` and `"index"` all address the site root.
#[must_use]
pub fn normalize_slug(slug: &str) -> String {
    let trimmed = slug.trim().trim_matches('/');
    if trimmed.is_empty() {
        "index".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Canonicalize a public URL path.
///
/// The result always starts with `/`, has no trailing slash (except the root
/// itself), has duplicate slashes collapsed, and `/index` folds to `/`.
#[must_use]
pub fn normalize_url_path(path: &str) -> String {
    let joined = join_segments(path.trim().split('/'));
    if joined.is_empty() || joined == "index" {
        "/".to_owned()
    } else {
        format!("/{joined}")
    }
}

/// Normalize a section path: backslashes become slashes, empty segments are
/// dropped, and surrounding slashes are removed. The root section is `""`.
#[must_use]
pub fn normalize_section_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    join_segments(unified.split('/'))
}

/// Join path segments with `/`, skipping blank ones.
///
/// ```
/// use quire_site::join_path;
///
/// assert_eq!(join_path(&["docs", "", "/guide/"]), "docs/guide");
/// ```
#[must_use]
pub fn join_path(segments: &[&str]) -> String {
    join_segments(segments.iter().flat_map(|segment| segment.split('/')))
}

fn join_segments<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    segments
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Directory part of a relative path (`""` for top-level files).
#[must_use]
pub fn parent_dir(relative_path: &str) -> &str {
    relative_path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// File name part of a relative path.
#[must_use]
pub fn file_name(relative_path: &str) -> &str {
    relative_path
        .rsplit_once('/')
        .map_or(relative_path, |(_, name)| name)
}

/// File name without its last extension.
#[must_use]
pub fn file_stem(relative_path: &str) -> &str {
    let name = file_name(relative_path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Check whether a relative path names a directory index (`index.<ext>`,
/// case-insensitive).
#[must_use]
pub fn is_index_file(relative_path: &str) -> bool {
    let name = file_name(relative_path).to_ascii_lowercase();
    name.strip_prefix("index.")
        .is_some_and(|ext| !ext.is_empty() && !ext.contains('.'))
}

/// Turn a path segment into a display label.
///
/// Dashes and underscores become spaces and each word is capitalized:
/// `"getting-started"` becomes `"Getting Started"`.
#[must_use]
pub fn humanize(segment: &str) -> String {
    segment
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Normalize a pagination base path: leading and trailing `/`, duplicate
/// slashes collapsed. A blank base becomes `/`.
#[must_use]
pub fn normalize_base_path(path: &str) -> String {
    let joined = join_segments(path.trim().split('/'));
    if joined.is_empty() {
        "/".to_owned()
    } else {
        format!("/{joined}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug_trims_slashes() {
        assert_eq!(normalize_slug("/guide/setup/"), "guide/setup");
    }

    #[test]
    fn test_normalize_slug_blank_is_index() {
        assert_eq!(normalize_slug(""), "index");
        assert_eq!(normalize_slug("/"), "index");
        assert_eq!(normalize_slug("  "), "index");
    }

    #[test]
    fn test_normalize_url_path_adds_leading_slash() {
        assert_eq!(normalize_url_path("blog/post"), "/blog/post");
    }

    #[test]
    fn test_normalize_url_path_strips_trailing_slash() {
        assert_eq!(normalize_url_path("/blog/post/"), "/blog/post");
    }

    #[test]
    fn test_normalize_url_path_root_forms() {
        assert_eq!(normalize_url_path(""), "/");
        assert_eq!(normalize_url_path("/"), "/");
        assert_eq!(normalize_url_path("/index"), "/");
        assert_eq!(normalize_url_path("index/"), "/");
    }

    #[test]
    fn test_normalize_url_path_collapses_duplicate_slashes() {
        assert_eq!(normalize_url_path("//blog///post//"), "/blog/post");
    }

    #[test]
    fn test_normalize_section_path() {
        assert_eq!(normalize_section_path("/docs//guide/"), "docs/guide");
        assert_eq!(normalize_section_path("docs\\guide"), "docs/guide");
        assert_eq!(normalize_section_path("  "), "");
    }

    #[test]
    fn test_join_path_skips_blank_segments() {
        assert_eq!(join_path(&["", "a", "b/", "/c"]), "a/b/c");
        assert_eq!(join_path(&[]), "");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("blog/2026/post.md"), "blog/2026");
        assert_eq!(parent_dir("about.md"), "");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("blog/post.md"), "post");
        assert_eq!(file_stem("blog/archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem("README"), "README");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }

    #[test]
    fn test_is_index_file_case_insensitive() {
        assert!(is_index_file("docs/index.md"));
        assert!(is_index_file("docs/INDEX.dj"));
        assert!(is_index_file("index.md"));
        assert!(!is_index_file("docs/indexes.md"));
        assert!(!is_index_file("docs/index"));
        assert!(!is_index_file("docs/my-index.md"));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("getting-started"), "Getting Started");
        assert_eq!(humanize("api_reference"), "Api Reference");
        assert_eq!(humanize("faq"), "Faq");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("blog"), "/blog/");
        assert_eq!(normalize_base_path("//blog//posts"), "/blog/posts/");
        assert_eq!(normalize_base_path(""), "/");
        assert_eq!(normalize_base_path("/"), "/");
    }
}
