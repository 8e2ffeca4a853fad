/// Path utilities for validation, normalization and URL splitting
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;
use std::collections::BTreeMap;

pub mod url;
pub use url::{parse_query, parse_url, stringify_query, ParsedUrl};

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use search_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/search"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("search")); // Missing leading /
/// assert!(!is_valid_path("/search/")); // Trailing /
/// assert!(!is_valid_path("/search//page")); // Double //
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations).
/// Returns `Cow::Owned` when normalization needed (single allocation).
///
/// - Trailing slashes: `/path/` → `/path`
/// - Double slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
/// - Missing leading slash: `search` → `/search`
///
/// # Examples
///
/// ```
/// use search_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/search");
/// assert!(matches!(path, Cow::Borrowed("/search")));
///
/// assert_eq!(normalize_path("/search/"), "/search");
/// assert_eq!(normalize_path("search"), "/search");
/// assert_eq!(normalize_path("\\a\\\\b"), "/a/b");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Collapses repeated and back slashes but keeps a trailing slash
///
/// Used for strict routers where `/search/` and `/search` are different locations.
///
/// ```
/// use search_router::path::collapse_slashes;
///
/// assert_eq!(collapse_slashes("//search//"), "/search/");
/// assert_eq!(collapse_slashes("/search"), "/search");
/// ```
pub fn collapse_slashes(path: &str) -> Cow<'_, str> {
    if !path.contains("//") && !path.contains('\\') && path.starts_with('/') {
        return Cow::Borrowed(path);
    }

    let trailing = path.ends_with('/') || path.ends_with('\\');
    let collapsed = normalize_path(path);
    if trailing && collapsed != "/" {
        Cow::Owned(format!("{}/", collapsed))
    } else {
        Cow::Owned(collapsed.into_owned())
    }
}

/// Builds `path?query#hash` from its parts
pub fn join_full_path(path: &str, query: &BTreeMap<String, String>, hash: &str) -> String {
    let query = stringify_query(query);
    let mut full = String::with_capacity(path.len() + query.len() + hash.len() + 1);
    full.push_str(path);
    if !query.is_empty() {
        full.push('?');
        full.push_str(&query);
    }
    full.push_str(hash);
    full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/search"));
        assert!(is_valid_path("/users/123"));

        assert!(!is_valid_path(""));
        assert!(!is_valid_path("search"));
        assert!(!is_valid_path("/search/"));
        assert!(!is_valid_path("/search//page"));
        assert!(!is_valid_path("/search\\page"));
    }

    #[test]
    fn test_normalize_path_valid() {
        let path = normalize_path("/search");
        assert!(matches!(path, Cow::Borrowed("/search")));

        let path = normalize_path("/");
        assert!(matches!(path, Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_path_fixes_mistakes() {
        assert_eq!(normalize_path("/search/"), "/search");
        assert_eq!(normalize_path("/a//b///c"), "/a/b/c");
        assert_eq!(normalize_path("\\a\\b"), "/a/b");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_collapse_slashes_keeps_trailing() {
        assert_eq!(collapse_slashes("/a//b/"), "/a/b/");
        assert_eq!(collapse_slashes("//"), "/");
        assert_eq!(collapse_slashes("a"), "/a");
    }

    #[test]
    fn test_join_full_path() {
        let mut query = BTreeMap::new();
        assert_eq!(join_full_path("/search", &query, ""), "/search");

        query.insert("q".to_string(), "rust lang".to_string());
        assert_eq!(
            join_full_path("/search", &query, "#top"),
            "/search?q=rust%20lang#top"
        );
    }
}
