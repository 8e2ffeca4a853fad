/// Pattern parsing for route paths
///
/// Pure parsing of route path patterns (`/search`, `/users/:id`,
/// `/:pathMatch(.*)*`) into typed segments.

use crate::error::{Result, RouterError};

/// A dynamic segment of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamToken {
    /// Parameter name, e.g. `id` in `:id`
    pub name: String,
    /// Custom regular expression, e.g. `\d+` in `:id(\d+)`
    pub regexp: Option<String>,
    /// `?` or `*` modifier: the segment may be absent
    pub optional: bool,
    /// `+` or `*` modifier: the param spans one or more segments
    pub repeatable: bool,
}

/// Represents the two kinds of route pattern segments
///
/// # Examples
///
/// ```
/// use search_router::route::pattern::{classify_segment, PatternSegment};
///
/// let seg = classify_segment("/search", "search").unwrap();
/// assert!(matches!(seg, PatternSegment::Static(_)));
///
/// let seg = classify_segment("/:pathMatch(.*)*", ":pathMatch(.*)*").unwrap();
/// match seg {
///     PatternSegment::Param(token) => {
///         assert_eq!(token.name, "pathMatch");
///         assert_eq!(token.regexp.as_deref(), Some(".*"));
///         assert!(token.optional && token.repeatable);
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Literal text
    Static(String),
    /// `:name`, `:name?`, `:name+`, `:name*`, optionally with `(regexp)`
    Param(ParamToken),
}

/// Splits a pattern into raw segments
///
/// Slashes inside a custom regexp (`:id([^/]+)`) do not split. The root
/// pattern `/` has no segments.
///
/// # Errors
///
/// Empty patterns, patterns without a leading `/`, empty segments (`//` or a
/// trailing `/`) and unbalanced parentheses.
pub fn split_segments(pattern: &str) -> Result<Vec<&str>> {
    let body = pattern
        .strip_prefix('/')
        .ok_or_else(|| RouterError::invalid_pattern(pattern, "must start with `/`"))?;

    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0usize;

    for (idx, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| RouterError::invalid_pattern(pattern, "unbalanced `)`"))?;
            }
            '/' if depth == 0 => {
                segments.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(RouterError::invalid_pattern(pattern, "unbalanced `(`"));
    }
    segments.push(&body[start..]);

    if segments.iter().any(|s| s.is_empty()) {
        return Err(RouterError::invalid_pattern(pattern, "empty path segment"));
    }

    Ok(segments)
}

/// Classifies one raw segment (pure function)
///
/// # Parsing Rules
///
/// 1. **Param**: `:` + name (`[A-Za-z0-9_]+`), then an optional
///    parenthesised regexp, then at most one modifier `?`, `+` or `*`
/// 2. **Static**: any other text not containing `:`
///
/// A param must span the whole segment; `user-:id` is rejected.
pub fn classify_segment(pattern: &str, segment: &str) -> Result<PatternSegment> {
    let Some(rest) = segment.strip_prefix(':') else {
        if segment.contains(':') {
            return Err(RouterError::invalid_pattern(
                pattern,
                format!("param inside static segment `{}`", segment),
            ));
        }
        return Ok(PatternSegment::Static(segment.to_string()));
    };

    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return Err(RouterError::invalid_pattern(pattern, "empty param name"));
    }
    let name = &rest[..name_len];
    let mut rest = &rest[name_len..];

    let regexp = if rest.starts_with('(') {
        let close = closing_paren(rest)
            .ok_or_else(|| RouterError::invalid_pattern(pattern, "unbalanced `(`"))?;
        let inner = &rest[1..close];
        if inner.is_empty() {
            return Err(RouterError::invalid_pattern(
                pattern,
                format!("empty regexp for param `{}`", name),
            ));
        }
        rest = &rest[close + 1..];
        Some(inner.to_string())
    } else {
        None
    };

    let (optional, repeatable) = match rest {
        "" => (false, false),
        "?" => (true, false),
        "+" => (false, true),
        "*" => (true, true),
        other => {
            return Err(RouterError::invalid_pattern(
                pattern,
                format!("unexpected `{}` after param `{}`", other, name),
            ))
        }
    };

    Ok(PatternSegment::Param(ParamToken {
        name: name.to_string(),
        regexp,
        optional,
        repeatable,
    }))
}

/// Parses a full pattern into segments
pub fn parse_segments(pattern: &str) -> Result<Vec<PatternSegment>> {
    let segments = split_segments(pattern)?
        .into_iter()
        .map(|segment| classify_segment(pattern, segment))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = std::collections::HashSet::new();
    for segment in &segments {
        if let PatternSegment::Param(token) = segment {
            if !seen.insert(token.name.as_str()) {
                return Err(RouterError::invalid_pattern(
                    pattern,
                    format!("param `{}` appears twice", token.name),
                ));
            }
        }
    }

    Ok(segments)
}

/// Byte index of the `)` closing the `(` at index 0
fn closing_paren(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (idx, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
