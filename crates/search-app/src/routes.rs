//! The application's route table

use search_router::{ComponentRegistry, History, RouteRecord};

use crate::config::AppConfig;
use crate::views::{lazy_not_found, HomeView, SearchView};

pub const HOME: &str = "Home";
pub const SEARCH: &str = "Search";
pub const NOT_FOUND: &str = "NotFound";

/// Pattern of the catch-all route
pub const NOT_FOUND_PATH: &str = "/:pathMatch(.*)*";

/// Builds the ordered route list
///
/// `/` and `/search` are always present. The catch-all comes last and only
/// when `routing.not_found` is set; without it unknown paths match nothing.
pub fn build_routes(config: &AppConfig, history: &History) -> Vec<RouteRecord> {
    let mut routes = vec![
        RouteRecord::new(
            "/",
            HOME,
            HomeView::new(config.app.title.clone(), history.create_href("/search")),
        )
        .with_meta("title", config.app.title.clone()),
        RouteRecord::new("/search", SEARCH, SearchView).with_meta("title", "Search results"),
    ];

    if config.routing.not_found {
        routes.push(
            RouteRecord::new(NOT_FOUND_PATH, NOT_FOUND, lazy_not_found())
                .with_meta("title", "Not found"),
        );
    }

    routes
}

/// Every component the app can reference, for rebuilding a table from descriptors
pub fn component_registry(config: &AppConfig, history: &History) -> ComponentRegistry {
    ComponentRegistry::new()
        .with(HomeView::new(
            config.app.title.clone(),
            history.create_href("/search"),
        ))
        .with(SearchView)
        .with(lazy_not_found())
}
