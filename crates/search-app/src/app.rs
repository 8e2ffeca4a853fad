//! Application root: the one place the router is composed and mounted

use anyhow::{Context, Result};
use search_router::{Navigation, Router, RouterOptions};
use tracing::info;

use crate::config::AppConfig;
use crate::routes::build_routes;

/// The application shell
///
/// Owns its configuration and the router built from it; both live as long as
/// the app and are dropped with it.
pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    /// Builds the route table and router from an explicit configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let history = config.routing.history();
        let routes = build_routes(&config, &history);

        let options = RouterOptions::new(history, routes)
            .sensitive(config.routing.case_sensitive)
            .strict(config.routing.strict);
        let router = Router::new(options).context("Failed to build route table")?;

        info!(app = %config.app.name, routes = router.routes().len(), "app created");

        Ok(Self { config, router })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Initial navigation: renders `location` without adding a history entry
    pub async fn mount(&self, location: &str) -> Result<Navigation> {
        self.router
            .replace(location)
            .await
            .with_context(|| format!("Failed to mount at {}", location))
    }

    /// Navigates to `location`
    pub async fn navigate(&self, location: &str) -> Result<Navigation> {
        self.router
            .push(location)
            .await
            .with_context(|| format!("Failed to navigate to {}", location))
    }
}
