//! Validation and sanitizing of the `?q=` search query

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use thiserror::Error;

// Characters removed from every query
static STRIPPED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>'";()]"#).unwrap());

// Script-like content, checked after stripping
static SCRIPT_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)<script>",
        r"(?i)javascript:",
        r"(?i)onerror=",
        r"(?i)alert\(",
        r"(?i)eval\b",
    ])
    .unwrap()
});

pub const MIN_QUERY_CHARS: usize = 2;
pub const MAX_QUERY_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Query parameter is required and cannot be empty.")]
    Empty,

    #[error("Query must be between 2 and 100 characters.")]
    Length,

    #[error("Invalid search query")]
    Rejected,
}

/// A query that passed validation, with markup characters removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validates a raw query
    ///
    /// Rules, in order:
    /// 1. Surrounding whitespace is trimmed; nothing left is [`QueryError::Empty`]
    /// 2. Between 2 and 100 characters, counted before sanitizing
    /// 3. `< > ' " ; ( )` are stripped
    /// 4. Script-like content left after stripping is [`QueryError::Rejected`]
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let query = raw.trim();
        if query.is_empty() {
            return Err(QueryError::Empty);
        }

        let chars = query.chars().count();
        if !(MIN_QUERY_CHARS..=MAX_QUERY_CHARS).contains(&chars) {
            return Err(QueryError::Length);
        }

        let sanitized = STRIPPED_CHARS.replace_all(query, "");
        if SCRIPT_PATTERNS.is_match(&sanitized) {
            tracing::warn!(query = %query, "rejected search query");
            return Err(QueryError::Rejected);
        }

        Ok(Self(sanitized.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
