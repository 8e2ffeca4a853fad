//! Page views of the search front-end

use std::sync::Arc;

use maud::{html, DOCTYPE};
use search_router::{LazyComponent, ParamValue, RouteLocation, View};

use crate::query::SearchQuery;

/// Landing page with the search box
pub struct HomeView {
    title: String,
    search_action: String,
}

impl HomeView {
    /// `search_action` is the href the search form submits to
    pub fn new(title: impl Into<String>, search_action: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            search_action: search_action.into(),
        }
    }
}

impl View for HomeView {
    fn id(&self) -> &str {
        "HomeView"
    }

    fn render(&self, _location: &RouteLocation) -> String {
        html! {
            (DOCTYPE)
            main.home {
                h1 { (self.title) }
                form action=(self.search_action) method="get" {
                    input type="search" name="q" placeholder="Search...";
                    button type="submit" { "Search" }
                }
            }
        }
        .into_string()
    }
}

/// Results page; the query comes from `?q=`
///
/// A missing `q` shows a hint. A present one goes through [`SearchQuery::parse`]
/// and either its error message or the sanitized query is shown.
pub struct SearchView;

impl View for SearchView {
    fn id(&self) -> &str {
        "SearchView"
    }

    fn render(&self, location: &RouteLocation) -> String {
        let raw = location.query.get("q").map(|q| q.trim());
        let parsed = raw.map(SearchQuery::parse);

        html! {
            (DOCTYPE)
            main.search {
                form method="get" {
                    input type="search" name="q" value=(raw.unwrap_or(""));
                    button type="submit" { "Search" }
                }
                @match parsed {
                    None => p.hint { "Type something to search." },
                    Some(Err(err)) => p.error role="alert" { (err.to_string()) },
                    Some(Ok(query)) => section.results data-query=(query.as_str()) {
                        h2 { "Results for \"" (query.as_str()) "\"" }
                    },
                }
            }
        }
        .into_string()
    }
}

/// Shown for unknown paths when the catch-all route is enabled
pub struct NotFoundView;

impl View for NotFoundView {
    fn id(&self) -> &str {
        "NotFoundView"
    }

    fn render(&self, location: &RouteLocation) -> String {
        let missing = match location.params.get("pathMatch") {
            Some(ParamValue::List(parts)) => format!("/{}", parts.join("/")),
            Some(ParamValue::Single(part)) => format!("/{}", part),
            None => location.path.clone(),
        };

        html! {
            (DOCTYPE)
            main.not-found {
                h1 { "Page not found" }
                p { "Nothing lives at " code { (missing) } "." }
            }
        }
        .into_string()
    }
}

/// The not-found view, loaded on first use
pub fn lazy_not_found() -> LazyComponent {
    LazyComponent::from_fn("NotFoundView", || async {
        tracing::debug!("loading not-found view");
        Ok(Arc::new(NotFoundView) as Arc<dyn View>)
    })
}
