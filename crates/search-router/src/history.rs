//! Navigation history
//!
//! The history owns the base URL and the stack of visited locations. The mode
//! only changes how locations are written into hrefs: `Web` produces clean
//! URLs below the base (`/app/search`), `Hash` keeps the app route in the
//! fragment (`#/search`), `Memory` behaves like `Web` but is never meant to
//! reach an address bar (tests, server-side rendering).

use serde::{Deserialize, Serialize};

/// Navigation strategy for representing routes in the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Real history entries with clean URLs
    #[default]
    Web,
    /// Hash-fragment fallback
    Hash,
    /// In-process only
    Memory,
}

impl std::str::FromStr for HistoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" | "html5" => Ok(HistoryMode::Web),
            "hash" => Ok(HistoryMode::Hash),
            "memory" => Ok(HistoryMode::Memory),
            other => Err(format!("unknown history mode `{}`", other)),
        }
    }
}

/// History stack plus base URL
#[derive(Debug, Clone)]
pub struct History {
    mode: HistoryMode,
    base: String,
    entries: Vec<String>,
    position: usize,
}

impl History {
    /// Creates a history for `mode` with the base supplied by the environment
    ///
    /// The base is not validated, only normalized:
    /// - a missing base means `/`
    /// - a leading `/` is added, a trailing `/` removed
    /// - hash mode appends `#` when the base has none
    pub fn new(mode: HistoryMode, base: Option<&str>) -> Self {
        let base = match mode {
            HistoryMode::Web | HistoryMode::Memory => normalize_base(base),
            HistoryMode::Hash => {
                let mut raw = base.filter(|b| !b.is_empty()).unwrap_or("/").to_string();
                if !raw.contains('#') {
                    raw.push('#');
                }
                normalize_base(Some(&raw))
            }
        };

        Self {
            mode,
            base,
            entries: Vec::new(),
            position: 0,
        }
    }

    /// Clean-URL history below `base`
    ///
    /// ```
    /// use search_router::History;
    ///
    /// let history = History::web(Some("/app/"));
    /// assert_eq!(history.base(), "/app");
    /// assert_eq!(history.create_href("/search"), "/app/search");
    /// ```
    pub fn web(base: Option<&str>) -> Self {
        Self::new(HistoryMode::Web, base)
    }

    /// Hash-fragment history
    ///
    /// ```
    /// use search_router::History;
    ///
    /// let history = History::hash(None);
    /// assert_eq!(history.create_href("/search"), "#/search");
    /// ```
    pub fn hash(base: Option<&str>) -> Self {
        Self::new(HistoryMode::Hash, base)
    }

    pub fn memory(base: Option<&str>) -> Self {
        Self::new(HistoryMode::Memory, base)
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Normalized base; empty for a root base in web mode
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Current location, `/` before the first navigation
    pub fn location(&self) -> &str {
        self.entries
            .get(self.position)
            .map(String::as_str)
            .unwrap_or("/")
    }

    /// Href for an app location (`path?query#hash`)
    pub fn create_href(&self, location: &str) -> String {
        let prefix = match self.mode {
            HistoryMode::Hash => self
                .base
                .find('#')
                .map(|idx| &self.base[idx..])
                .unwrap_or(&self.base),
            HistoryMode::Web | HistoryMode::Memory => &self.base,
        };
        format!("{}{}", prefix, location)
    }

    /// Inverse of [`create_href`](Self::create_href)
    ///
    /// Hrefs outside the base are returned unchanged.
    pub fn strip_base(&self, href: &str) -> String {
        match self.mode {
            HistoryMode::Hash => {
                let marker = self
                    .base
                    .find('#')
                    .map(|idx| &self.base[idx..])
                    .unwrap_or("#");
                match href.find(marker) {
                    Some(idx) => ensure_leading_slash(&href[idx + marker.len()..]),
                    None => "/".to_string(),
                }
            }
            HistoryMode::Web | HistoryMode::Memory => {
                // ASCII folding keeps byte offsets of href and base aligned
                let within_base = !self.base.is_empty()
                    && href
                        .get(..self.base.len())
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&self.base));
                if !within_base {
                    return href.to_string();
                }
                ensure_leading_slash(&href[self.base.len()..])
            }
        }
    }

    /// Adds an entry, dropping any forward entries
    pub fn push(&mut self, location: impl Into<String>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.position + 1);
        }
        self.entries.push(location.into());
        self.position = self.entries.len() - 1;
    }

    /// Replaces the current entry
    pub fn replace(&mut self, location: impl Into<String>) {
        match self.entries.get_mut(self.position) {
            Some(entry) => *entry = location.into(),
            None => self.push(location),
        }
    }

    /// Moves `delta` entries through the stack
    ///
    /// Returns the new location, or `None` (and stays put) when the target is
    /// out of range.
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        Some(self.location())
    }

    pub fn back(&mut self) -> Option<&str> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<&str> {
        self.go(1)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

fn normalize_base(base: Option<&str>) -> String {
    let base = base.filter(|b| !b.is_empty()).unwrap_or("/");
    let base = if base.starts_with('/') || base.starts_with('#') {
        base.to_string()
    } else {
        format!("/{}", base)
    };
    base.trim_end_matches('/').to_string()
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
