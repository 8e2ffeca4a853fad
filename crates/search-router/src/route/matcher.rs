/// Compiled route patterns
///
/// Each pattern compiles to one anchored regular expression. Params are
/// captured through named groups (`p0`, `p1`, ...) keyed by segment index so
/// capturing groups inside a custom regexp do not shift them.

use regex::Regex;

use super::pattern::{parse_segments, ParamToken, PatternSegment};
use super::{ParamValue, Params};
use crate::error::{Result, RouterError};
use crate::path::url::decode_segment;

/// Default regexp for a param without a custom one: one path segment
const SEGMENT_RE: &str = "[^/]+?";

/// Matching options shared by every pattern of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternOptions {
    /// Case-sensitive matching of static segments
    pub sensitive: bool,
    /// Disallow a trailing slash on the matched path
    pub strict: bool,
}

/// A parsed and compiled route path pattern
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    segments: Vec<PatternSegment>,
    regex: Regex,
}

impl RoutePattern {
    /// Parses and compiles a pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use search_router::route::{ParamValue, PatternOptions, RoutePattern};
    ///
    /// let pattern = RoutePattern::parse("/users/:id(\\d+)", PatternOptions::default()).unwrap();
    /// let params = pattern.match_path("/users/42").unwrap();
    /// assert_eq!(params.get("id"), Some(&ParamValue::Single("42".to_string())));
    /// assert!(pattern.match_path("/users/abc").is_none());
    /// ```
    pub fn parse(source: &str, options: PatternOptions) -> Result<Self> {
        let segments = parse_segments(source)?;
        let regex = Regex::new(&compile(&segments, options))
            .map_err(|e| RouterError::invalid_pattern(source, e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            segments,
            regex,
        })
    }

    /// The pattern as written in the route record
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Names of all params in pattern order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params().map(|(_, token)| token.name.as_str())
    }

    /// Whether the pattern ends in a param able to swallow any remaining path
    ///
    /// ```
    /// use search_router::route::{PatternOptions, RoutePattern};
    ///
    /// let not_found = RoutePattern::parse("/:pathMatch(.*)*", PatternOptions::default()).unwrap();
    /// assert!(not_found.is_catch_all());
    ///
    /// let search = RoutePattern::parse("/search", PatternOptions::default()).unwrap();
    /// assert!(!search.is_catch_all());
    /// ```
    pub fn is_catch_all(&self) -> bool {
        matches!(
            self.segments.last(),
            Some(PatternSegment::Param(ParamToken { regexp: Some(re), .. })) if re == ".*"
        )
    }

    /// Matches a decoded-or-raw path, returning the extracted params
    ///
    /// Absent optional params are left out of the map. Repeatable params
    /// yield [`ParamValue::List`].
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;

        let params = self
            .params()
            .filter_map(|(idx, token)| {
                let raw = captures.name(&group_name(idx))?.as_str();
                let value = if token.repeatable {
                    ParamValue::List(
                        raw.split('/')
                            .filter(|s| !s.is_empty())
                            .map(|s| decode_segment(s).into_owned())
                            .collect(),
                    )
                } else {
                    ParamValue::Single(decode_segment(raw).into_owned())
                };
                Some((token.name.clone(), value))
            })
            .collect();

        Some(params)
    }

    /// Builds a path from params (inverse of [`match_path`](Self::match_path))
    ///
    /// Values are percent-encoded per segment. Returns the name of the first
    /// missing required param on failure.
    ///
    /// ```
    /// use search_router::route::{ParamValue, Params, PatternOptions, RoutePattern};
    ///
    /// let pattern = RoutePattern::parse("/:pathMatch(.*)*", PatternOptions::default()).unwrap();
    /// let mut params = Params::new();
    /// params.insert(
    ///     "pathMatch".to_string(),
    ///     ParamValue::List(vec!["a b".to_string(), "c".to_string()]),
    /// );
    /// assert_eq!(pattern.stringify(&params).unwrap(), "/a%20b/c");
    /// ```
    pub fn stringify(&self, params: &Params) -> std::result::Result<String, String> {
        let mut path = String::new();

        for segment in &self.segments {
            match segment {
                PatternSegment::Static(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                PatternSegment::Param(token) => {
                    let parts: Vec<&str> = match params.get(&token.name) {
                        Some(ParamValue::Single(value)) if !value.is_empty() => vec![value.as_str()],
                        Some(ParamValue::List(values)) => {
                            values.iter().map(String::as_str).filter(|v| !v.is_empty()).collect()
                        }
                        _ => Vec::new(),
                    };

                    if parts.is_empty() {
                        if token.optional {
                            continue;
                        }
                        return Err(token.name.clone());
                    }

                    for part in parts {
                        path.push('/');
                        path.push_str(&urlencoding::encode(part));
                    }
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    fn params(&self) -> impl Iterator<Item = (usize, &ParamToken)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(idx, segment)| match segment {
                PatternSegment::Param(token) => Some((idx, token)),
                PatternSegment::Static(_) => None,
            })
    }
}

fn group_name(idx: usize) -> String {
    format!("p{}", idx)
}

/// Translates segments into an anchored regular expression
fn compile(segments: &[PatternSegment], options: PatternOptions) -> String {
    let mut re = String::from(if options.sensitive { "^" } else { "(?i)^" });

    if segments.is_empty() {
        re.push('/');
    }

    for (idx, segment) in segments.iter().enumerate() {
        match segment {
            PatternSegment::Static(text) => {
                re.push('/');
                re.push_str(&regex::escape(text));
            }
            PatternSegment::Param(token) => {
                let inner = token.regexp.as_deref().unwrap_or(SEGMENT_RE);
                let group = if token.repeatable {
                    format!("(?P<{}>(?:{inner})(?:/(?:{inner}))*)", group_name(idx))
                } else {
                    format!("(?P<{}>{inner})", group_name(idx))
                };

                if token.optional {
                    re.push_str(&format!("(?:/{})?", group));
                } else {
                    re.push('/');
                    re.push_str(&group);
                }
            }
        }
    }

    if !options.strict && !segments.is_empty() {
        re.push_str("/?");
    }
    re.push('$');
    re
}
