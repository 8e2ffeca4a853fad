//! # Search Router
//!
//! Client-side routing for the search front-end:
//! - Static routes (`/search`)
//! - Dynamic params (`/users/:id`), optional (`:id?`) and repeatable (`:rest+`)
//! - Custom param regexps (`:id(\d+)`) and catch-alls (`/:pathMatch(.*)*`)
//! - Web, hash and in-memory history with a configurable base URL
//! - Eagerly or lazily resolved view components
//!
//! ## Matching
//!
//! The route table is ordered and the first matching route wins. Matching is
//! case-insensitive and tolerates a trailing slash unless the router is built
//! `sensitive` / `strict`. A path no route matches resolves to `None`; only an
//! explicit catch-all route turns unknown paths into a page.
//!
//! ## Path Normalization
//!
//! Incoming locations are cleaned before matching:
//! - Trailing slashes: `/search/` → `/search` (non-strict routers)
//! - Double slashes: `/a//b` → `/a/b`
//! - Backslashes: `\search` → `/search`
//!
//! ## Example
//!
//! ```
//! use search_router::{History, RouteLocation, RouteRecord, Router, RouterOptions, View};
//!
//! struct Page(&'static str);
//!
//! impl View for Page {
//!     fn id(&self) -> &str { self.0 }
//!     fn render(&self, location: &RouteLocation) -> String {
//!         format!("{} at {}", self.0, location.path)
//!     }
//! }
//!
//! let router = Router::new(RouterOptions::new(
//!     History::web(Some("/")),
//!     vec![
//!         RouteRecord::new("/", "Home", Page("HomeView")),
//!         RouteRecord::new("/search", "Search", Page("SearchView")),
//!     ],
//! ))
//! .unwrap();
//!
//! assert_eq!(router.resolve("/search").unwrap().name, "Search");
//! assert!(router.resolve("/unknown-path").is_none());
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod component;
mod error;
mod history;
pub mod path;
pub mod route;
mod router;
mod table;

// ============================================================================
// Public API
// ============================================================================

pub use component::{ComponentLoader, ComponentRef, ComponentRegistry, LazyComponent, View};
pub use error::{Result, RouterError};
pub use history::{History, HistoryMode};
pub use route::{ParamValue, Params, PatternOptions, RoutePattern};
pub use router::{Navigation, NavigationPhase, RouteLocation, Router, RouterOptions};
pub use table::{Route, RouteDescriptor, RouteRecord, RouteTable};
