/// Splitting of navigation targets into path, query and hash

use std::borrow::Cow;
use std::collections::BTreeMap;

/// A navigation target split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUrl {
    /// Path part, always starting with `/`
    pub path: String,
    /// Decoded query parameters (last value wins for repeated keys)
    pub query: BTreeMap<String, String>,
    /// Hash including the leading `#`, or empty
    pub hash: String,
}

/// Splits `path?query#hash`
///
/// A relative or empty path is anchored at `/`.
///
/// ```
/// use search_router::path::parse_url;
///
/// let url = parse_url("/search?q=rust+lang#results");
/// assert_eq!(url.path, "/search");
/// assert_eq!(url.query.get("q").map(String::as_str), Some("rust lang"));
/// assert_eq!(url.hash, "#results");
/// ```
pub fn parse_url(location: &str) -> ParsedUrl {
    let (before_hash, hash) = match location.find('#') {
        Some(idx) => (&location[..idx], &location[idx..]),
        None => (location, ""),
    };

    let (path, query) = match before_hash.split_once('?') {
        Some((path, query)) => (path, parse_query(query)),
        None => (before_hash, BTreeMap::new()),
    };

    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    ParsedUrl {
        path,
        query,
        hash: hash.to_string(),
    }
}

/// Parses `a=1&b=two+words` into a map, decoding `+` and percent escapes
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Inverse of [`parse_query`]; keys are emitted in sorted order
pub fn stringify_query(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                urlencoding::encode(key).into_owned()
            } else {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-decodes a query component; malformed input is kept verbatim
pub(crate) fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Percent-decodes a path segment; `+` is literal in paths
pub(crate) fn decode_segment(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
