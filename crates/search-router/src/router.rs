//! The router: resolution, URL generation and navigation

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, RouterError};
use crate::history::{History, HistoryMode};
use crate::path::{collapse_slashes, join_full_path, normalize_path, parse_url};
use crate::route::{Params, PatternOptions};
use crate::table::{Route, RouteRecord, RouteTable};

/// A resolved navigation target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteLocation {
    /// Name of the matched route
    pub name: String,
    /// Normalized path
    pub path: String,
    pub params: Params,
    pub query: BTreeMap<String, String>,
    /// Hash including `#`, or empty
    pub hash: String,
    /// `path?query#hash`
    pub full_path: String,
    /// What goes into the address bar for the current history mode
    pub href: String,
    pub meta: BTreeMap<String, String>,
}

/// Everything needed to build a [`Router`]
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub history: History,
    pub routes: Vec<RouteRecord>,
    /// Case-sensitive matching (default: false)
    pub sensitive: bool,
    /// Trailing slash is significant (default: false)
    pub strict: bool,
}

impl RouterOptions {
    pub fn new(history: History, routes: Vec<RouteRecord>) -> Self {
        Self {
            history,
            routes,
            sensitive: false,
            strict: false,
        }
    }

    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Lifecycle of one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    /// Target known, nothing resolved yet
    Pending,
    /// A route matched; its component is being resolved
    Matched,
    /// The view rendered
    Rendered,
}

/// Outcome of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A route matched and its view rendered
    Rendered {
        location: RouteLocation,
        view_id: String,
        output: String,
    },
    /// No route matched; nothing rendered
    Unmatched { full_path: String },
}

impl Navigation {
    /// Last phase this navigation reached
    pub fn phase(&self) -> NavigationPhase {
        match self {
            Navigation::Rendered { .. } => NavigationPhase::Rendered,
            Navigation::Unmatched { .. } => NavigationPhase::Pending,
        }
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, Navigation::Unmatched { .. })
    }

    pub fn view_id(&self) -> Option<&str> {
        match self {
            Navigation::Rendered { view_id, .. } => Some(view_id),
            Navigation::Unmatched { .. } => None,
        }
    }

    pub fn location(&self) -> Option<&RouteLocation> {
        match self {
            Navigation::Rendered { location, .. } => Some(location),
            Navigation::Unmatched { .. } => None,
        }
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            Navigation::Rendered { output, .. } => Some(output),
            Navigation::Unmatched { .. } => None,
        }
    }
}

/// Client-side router over an immutable route table
///
/// Unknown paths resolve to nothing unless the table contains a catch-all
/// route; there is no implicit fallback.
#[derive(Debug)]
pub struct Router {
    table: Arc<RouteTable>,
    history: RwLock<History>,
}

impl Router {
    /// Validates the routes and builds the router
    pub fn new(options: RouterOptions) -> Result<Self> {
        let pattern_options = PatternOptions {
            sensitive: options.sensitive,
            strict: options.strict,
        };
        let table = RouteTable::with_options(options.routes, pattern_options)?;
        Ok(Self::from_table(Arc::new(table), options.history))
    }

    /// Wraps an already built table
    pub fn from_table(table: Arc<RouteTable>, history: History) -> Self {
        info!(
            routes = table.len(),
            mode = ?history.mode(),
            base = history.base(),
            catch_all = table.has_catch_all(),
            "router created"
        );
        Self {
            table,
            history: RwLock::new(history),
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn routes(&self) -> &[Route] {
        self.table.routes()
    }

    pub fn has_route(&self, name: &str) -> bool {
        self.table.get(name).is_some()
    }

    pub fn history_mode(&self) -> HistoryMode {
        self.read_history().mode()
    }

    /// Snapshot of the history stack
    pub fn history(&self) -> History {
        self.read_history().clone()
    }

    /// Current location (`/` before the first navigation)
    pub fn current_location(&self) -> String {
        self.read_history().location().to_string()
    }

    /// Route of the current location, if any matches
    pub fn current_route(&self) -> Option<RouteLocation> {
        let location = self.current_location();
        self.resolve(&location)
    }

    /// Resolves an app location (`/search?q=x#top`) against the table
    ///
    /// Returns `None` when no route matches.
    pub fn resolve(&self, location: &str) -> Option<RouteLocation> {
        let url = parse_url(location);
        let path = if self.table.options().strict {
            collapse_slashes(&url.path).into_owned()
        } else {
            normalize_path(&url.path).into_owned()
        };

        match self.table.match_path(&path) {
            Some((route, params)) => {
                debug!(path = %path, route = route.name(), "route matched");
                Some(self.location_for(route, path, params, url.query, url.hash))
            }
            None => {
                debug!(path = %path, "no route matched");
                None
            }
        }
    }

    /// Resolves an href as produced by the history (base and hash prefix included)
    pub fn resolve_href(&self, href: &str) -> Option<RouteLocation> {
        let location = self.read_history().strip_base(href);
        self.resolve(&location)
    }

    /// Builds the location of a named route
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownRoute`] or [`RouterError::MissingParam`].
    pub fn resolve_named(&self, name: &str, params: &Params) -> Result<RouteLocation> {
        let route = self
            .table
            .get(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;

        let path = route
            .pattern()
            .stringify(params)
            .map_err(|param| RouterError::MissingParam {
                route: name.to_string(),
                param,
            })?;

        let params = route
            .pattern()
            .param_names()
            .filter_map(|param| params.get_key_value(param))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(self.location_for(route, path, params, BTreeMap::new(), String::new()))
    }

    /// Href of a named route for the current history mode
    pub fn href_for(&self, name: &str, params: &Params) -> Result<String> {
        Ok(self.resolve_named(name, params)?.href)
    }

    /// Navigates to `location`, adding a history entry
    pub async fn push(&self, location: &str) -> Result<Navigation> {
        self.navigate(location, HistoryUpdate::Push).await
    }

    /// Navigates to `location`, replacing the current history entry
    pub async fn replace(&self, location: &str) -> Result<Navigation> {
        self.navigate(location, HistoryUpdate::Replace).await
    }

    /// Moves through history and renders the location reached
    ///
    /// Returns `None` when `delta` leaves the history stack.
    pub async fn go(&self, delta: isize) -> Result<Option<Navigation>> {
        let location = {
            let mut history = self.write_history();
            match history.go(delta) {
                Some(location) => location.to_string(),
                None => return Ok(None),
            }
        };
        self.navigate(&location, HistoryUpdate::None).await.map(Some)
    }

    pub async fn back(&self) -> Result<Option<Navigation>> {
        self.go(-1).await
    }

    pub async fn forward(&self) -> Result<Option<Navigation>> {
        self.go(1).await
    }

    async fn navigate(&self, location: &str, update: HistoryUpdate) -> Result<Navigation> {
        debug!(target_location = location, phase = ?NavigationPhase::Pending, "navigation started");

        let Some(resolved) = self.resolve(location) else {
            let full_path = {
                let url = parse_url(location);
                join_full_path(&url.path, &url.query, &url.hash)
            };
            warn!(location = %full_path, "navigation to unmatched location");
            self.record(update, &full_path);
            return Ok(Navigation::Unmatched { full_path });
        };

        debug!(route = %resolved.name, phase = ?NavigationPhase::Matched, "resolving component");
        let route = self
            .table
            .get(&resolved.name)
            .ok_or_else(|| RouterError::UnknownRoute(resolved.name.clone()))?;
        let view = route.component().resolve().await?;
        let output = view.render(&resolved);

        self.record(update, &resolved.full_path);
        debug!(
            route = %resolved.name,
            view = view.id(),
            phase = ?NavigationPhase::Rendered,
            "navigation finished"
        );

        Ok(Navigation::Rendered {
            view_id: view.id().to_string(),
            location: resolved,
            output,
        })
    }

    fn record(&self, update: HistoryUpdate, full_path: &str) {
        let mut history = self.write_history();
        match update {
            HistoryUpdate::Push => history.push(full_path),
            HistoryUpdate::Replace => history.replace(full_path),
            HistoryUpdate::None => {}
        }
    }

    fn location_for(
        &self,
        route: &Route,
        path: String,
        params: Params,
        query: BTreeMap<String, String>,
        hash: String,
    ) -> RouteLocation {
        let full_path = join_full_path(&path, &query, &hash);
        let href = self.read_history().create_href(&full_path);
        RouteLocation {
            name: route.name().to_string(),
            path,
            params,
            query,
            hash,
            full_path,
            href,
            meta: route.record().meta.clone(),
        }
    }

    fn read_history(&self) -> RwLockReadGuard<'_, History> {
        self.history.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_history(&self) -> RwLockWriteGuard<'_, History> {
        self.history.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Copy)]
enum HistoryUpdate {
    Push,
    Replace,
    None,
}
