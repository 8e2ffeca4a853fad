//! Route records and the ordered, validated route table

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::component::{ComponentRef, ComponentRegistry};
use crate::error::{Result, RouterError};
use crate::route::{Params, PatternOptions, RoutePattern};

/// A route as declared by the application
#[derive(Debug, Clone)]
pub struct RouteRecord {
    /// Path pattern, e.g. `/search` or `/:pathMatch(.*)*`
    pub path: String,
    /// Unique symbolic name, e.g. `Search`
    pub name: String,
    /// View rendered for this route
    pub component: ComponentRef,
    /// Arbitrary metadata (titles, etc.)
    pub meta: BTreeMap<String, String>,
}

impl RouteRecord {
    /// Creates a record
    ///
    /// ```
    /// use search_router::{RouteLocation, RouteRecord, View};
    ///
    /// struct SearchView;
    ///
    /// impl View for SearchView {
    ///     fn id(&self) -> &str { "SearchView" }
    ///     fn render(&self, _: &RouteLocation) -> String { String::new() }
    /// }
    ///
    /// let record = RouteRecord::new("/search", "Search", SearchView)
    ///     .with_meta("title", "Search");
    /// assert_eq!(record.meta.get("title").map(String::as_str), Some("Search"));
    /// ```
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        component: impl Into<ComponentRef>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component: component.into(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Serializable form of this record
    pub fn descriptor(&self) -> RouteDescriptor {
        RouteDescriptor {
            path: self.path.clone(),
            name: self.name.clone(),
            component: self.component.key().to_string(),
            lazy: self.component.is_lazy(),
            meta: self.meta.clone(),
        }
    }
}

/// Serializable route record; the component is referenced by registry key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    pub component: String,
    #[serde(default)]
    pub lazy: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

/// A record together with its compiled pattern
#[derive(Debug, Clone)]
pub struct Route {
    record: RouteRecord,
    pattern: RoutePattern,
}

impl Route {
    pub fn record(&self) -> &RouteRecord {
        &self.record
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn path(&self) -> &str {
        &self.record.path
    }

    pub fn component(&self) -> &ComponentRef {
        &self.record.component
    }
}

/// Ordered collection of routes consulted on navigation
///
/// Built once and immutable afterwards. Matching is first-match-wins in
/// declaration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    options: PatternOptions,
}

impl RouteTable {
    /// Builds a case-insensitive, non-strict table
    pub fn new(records: Vec<RouteRecord>) -> Result<Self> {
        Self::with_options(records, PatternOptions::default())
    }

    /// Validates and compiles the records
    ///
    /// # Errors
    ///
    /// - [`RouterError::DuplicateName`] when two records share a name
    /// - [`RouterError::DuplicatePath`] when two records share a path
    ///   (compared case-insensitively unless `options.sensitive`)
    /// - [`RouterError::InvalidPattern`] when a path does not parse
    pub fn with_options(records: Vec<RouteRecord>, options: PatternOptions) -> Result<Self> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();

        let routes = records
            .into_iter()
            .map(|record| {
                if !names.insert(record.name.clone()) {
                    return Err(RouterError::DuplicateName(record.name));
                }

                let path_key = if options.sensitive {
                    record.path.clone()
                } else {
                    record.path.to_lowercase()
                };
                if !paths.insert(path_key) {
                    return Err(RouterError::DuplicatePath(record.path));
                }

                let pattern = RoutePattern::parse(&record.path, options)?;
                Ok(Route { record, pattern })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(routes = routes.len(), "route table built");

        Ok(Self { routes, options })
    }

    /// Rebuilds a table from descriptors, looking components up by key
    pub fn from_descriptors(
        descriptors: Vec<RouteDescriptor>,
        registry: &ComponentRegistry,
        options: PatternOptions,
    ) -> Result<Self> {
        let records = descriptors
            .into_iter()
            .map(|descriptor| {
                Ok(RouteRecord {
                    component: registry.get(&descriptor.component)?,
                    path: descriptor.path,
                    name: descriptor.name,
                    meta: descriptor.meta,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::with_options(records, options)
    }

    /// Parses a JSON descriptor list and rebuilds the table
    pub fn from_json(json: &str, registry: &ComponentRegistry, options: PatternOptions) -> Result<Self> {
        let descriptors: Vec<RouteDescriptor> = serde_json::from_str(json)?;
        Self::from_descriptors(descriptors, registry, options)
    }

    /// Descriptor list in table order
    pub fn descriptors(&self) -> Vec<RouteDescriptor> {
        self.routes.iter().map(|route| route.record.descriptor()).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.descriptors())?)
    }

    pub fn options(&self) -> PatternOptions {
        self.options
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Looks a route up by name
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.record.name == name)
    }

    /// Whether any route catches every path
    pub fn has_catch_all(&self) -> bool {
        self.routes.iter().any(|route| route.pattern.is_catch_all())
    }

    /// First route matching `path`, with its params
    pub fn match_path(&self, path: &str) -> Option<(&Route, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.match_path(path).map(|params| (route, params)))
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
