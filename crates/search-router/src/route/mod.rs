/// Route module for path patterns
///
/// Contains the pattern tokenizer and the compiled matcher:
/// - `pattern` turns `/users/:id(\d+)?` into typed segments
/// - `matcher` compiles segments into one anchored regex and back into URLs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod matcher;
pub mod pattern;

pub use matcher::{PatternOptions, RoutePattern};
pub use pattern::{classify_segment, parse_segments, ParamToken, PatternSegment};

/// Value of one matched param
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single path segment (`:id`, `:id?`)
    Single(String),
    /// Segments of a repeatable param (`:rest+`, `:pathMatch(.*)*`)
    List(Vec<String>),
}

impl ParamValue {
    /// The value of a single-segment param
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::List(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Single(value) => f.write_str(value),
            ParamValue::List(values) => f.write_str(&values.join("/")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

/// Params extracted from a path, keyed by param name
pub type Params = BTreeMap<String, ParamValue>;
