//! Search front-end application shell
//!
//! Declares the route table (`/` → Home, `/search` → Search, an optional
//! catch-all) and composes the router from an explicit [`AppConfig`].

pub mod app;
pub mod config;
pub mod query;
pub mod routes;
pub mod views;

pub use app::App;
pub use config::{AppConfig, RoutingConfig};
