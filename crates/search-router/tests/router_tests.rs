//! Integration tests for search-router
//!
//! Tests are organized by feature area and cover:
//! - Resolution of static, dynamic and catch-all routes
//! - Unmatched paths without a fallback
//! - Named routes and href generation per history mode
//! - Navigation with eager and lazy components
//! - History back/forward
//! - Descriptor serialization round-trip

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use search_router::*;

struct Page(&'static str);

impl View for Page {
    fn id(&self) -> &str {
        self.0
    }

    fn render(&self, location: &RouteLocation) -> String {
        format!("<{}>{}</{}>", self.0, location.full_path, self.0)
    }
}

fn app_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("/", "Home", Page("Home")),
        RouteRecord::new("/search", "Search", Page("Search")),
    ]
}

fn not_found_route(loads: Arc<AtomicUsize>) -> RouteRecord {
    let lazy = LazyComponent::from_fn("NotFoundView", move || {
        let loads = Arc::clone(&loads);
        async move {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Page("NotFound")) as Arc<dyn View>)
        }
    });
    RouteRecord::new("/:pathMatch(.*)*", "NotFound", lazy)
}

fn router(history: History) -> Router {
    Router::new(RouterOptions::new(history, app_routes())).unwrap()
}

// ============================================================================
// Resolution
// ============================================================================

#[rstest]
#[case("/", "Home")]
#[case("/search", "Search")]
#[case("/search/", "Search")]
#[case("/Search", "Search")]
#[case("//search", "Search")]
#[case("/search?q=rust", "Search")]
#[case("/search#results", "Search")]
fn test_resolve_known_paths(#[case] path: &str, #[case] expected: &str) {
    let router = router(History::memory(None));
    assert_eq!(router.resolve(path).unwrap().name, expected);
}

#[rstest]
#[case("/unknown-path")]
#[case("/search/more")]
#[case("/home")]
fn test_unmatched_paths_have_no_fallback(#[case] path: &str) {
    let router = router(History::memory(None));
    assert!(router.resolve(path).is_none());
}

#[test]
fn test_resolve_keeps_query_and_hash() {
    let router = router(History::web(Some("/")));
    let location = router.resolve("/search?q=rust+lang&page=2#top").unwrap();

    assert_eq!(location.path, "/search");
    assert_eq!(location.query.get("q").map(String::as_str), Some("rust lang"));
    assert_eq!(location.hash, "#top");
    assert_eq!(location.full_path, "/search?page=2&q=rust%20lang#top");
    assert_eq!(location.href, "/search?page=2&q=rust%20lang#top");
}

#[test]
fn test_strict_sensitive_router() {
    let router = Router::new(
        RouterOptions::new(History::memory(None), app_routes())
            .sensitive(true)
            .strict(true),
    )
    .unwrap();

    assert!(router.resolve("/search").is_some());
    assert!(router.resolve("/Search").is_none());
    assert!(router.resolve("/search/").is_none());
}

#[test]
fn test_catch_all_catches_unknown_paths() {
    let mut routes = app_routes();
    routes.push(not_found_route(Arc::new(AtomicUsize::new(0))));
    let router = Router::new(RouterOptions::new(History::memory(None), routes)).unwrap();

    assert_eq!(router.resolve("/search").unwrap().name, "Search");

    let location = router.resolve("/unknown/deep%20path").unwrap();
    assert_eq!(location.name, "NotFound");
    assert_eq!(
        location.params.get("pathMatch"),
        Some(&ParamValue::List(vec![
            "unknown".to_string(),
            "deep path".to_string()
        ]))
    );
}

#[test]
fn test_invalid_routes_rejected() {
    let mut routes = app_routes();
    routes.push(RouteRecord::new("/search", "Search2", Page("Search")));
    assert!(matches!(
        Router::new(RouterOptions::new(History::memory(None), routes)),
        Err(RouterError::DuplicatePath(_))
    ));
}

// ============================================================================
// Named routes & hrefs
// ============================================================================

#[test]
fn test_resolve_named() {
    let router = router(History::web(Some("/app/")));
    let location = router.resolve_named("Search", &Params::new()).unwrap();
    assert_eq!(location.path, "/search");
    assert_eq!(location.href, "/app/search");

    assert!(matches!(
        router.resolve_named("Missing", &Params::new()),
        Err(RouterError::UnknownRoute(_))
    ));
}

#[test]
fn test_resolve_named_with_params() {
    let routes = vec![RouteRecord::new("/users/:id(\\d+)", "User", Page("User"))];
    let router = Router::new(RouterOptions::new(History::memory(None), routes)).unwrap();

    let mut params = Params::new();
    assert!(matches!(
        router.resolve_named("User", &params),
        Err(RouterError::MissingParam { ref param, .. }) if param == "id"
    ));

    params.insert("id".to_string(), ParamValue::from("42"));
    params.insert("ignored".to_string(), ParamValue::from("x"));
    let location = router.resolve_named("User", &params).unwrap();
    assert_eq!(location.path, "/users/42");
    assert_eq!(location.params.len(), 1);
}

#[rstest]
#[case(History::web(None), "/search")]
#[case(History::web(Some("/app")), "/app/search")]
#[case(History::hash(None), "#/search")]
#[case(History::hash(Some("/app/")), "#/search")]
#[case(History::memory(Some("/")), "/search")]
fn test_href_per_history_mode(#[case] history: History, #[case] expected: &str) {
    let router = router(history);
    assert_eq!(router.href_for("Search", &Params::new()).unwrap(), expected);
}

#[test]
fn test_resolve_href_strips_base() {
    let web = router(History::web(Some("/app")));
    assert_eq!(web.resolve_href("/app/search").unwrap().name, "Search");

    let hash = router(History::hash(Some("/app/")));
    assert_eq!(hash.resolve_href("/app/#/search").unwrap().name, "Search");
    assert_eq!(hash.resolve_href("/app/").unwrap().name, "Home");
}

#[test]
fn test_resolve_href_outside_multibyte_base() {
    let web = router(History::web(Some("/k")));
    assert_eq!(web.resolve_href("/K/search").unwrap().name, "Search");
    assert!(web.resolve_href("/\u{212A}search").is_none());
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test]
async fn test_push_renders_view() {
    let router = router(History::memory(None));

    let navigation = router.push("/search?q=rust").await.unwrap();
    assert_eq!(navigation.view_id(), Some("Search"));
    assert_eq!(navigation.phase(), NavigationPhase::Rendered);
    assert_eq!(navigation.output(), Some("<Search>/search?q=rust</Search>"));
    assert_eq!(router.current_location(), "/search?q=rust");
    assert_eq!(router.current_route().unwrap().name, "Search");
}

#[tokio::test]
async fn test_push_unmatched_renders_nothing() {
    let router = router(History::memory(None));

    let navigation = router.push("/unknown-path").await.unwrap();
    assert!(navigation.is_unmatched());
    assert_eq!(navigation.view_id(), None);
    assert_eq!(router.current_location(), "/unknown-path");
    assert!(router.current_route().is_none());
}

#[tokio::test]
async fn test_lazy_not_found_loads_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let mut routes = app_routes();
    routes.push(not_found_route(Arc::clone(&loads)));
    let router = Router::new(RouterOptions::new(History::memory(None), routes)).unwrap();

    router.push("/").await.unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 0);

    let first = router.push("/nope").await.unwrap();
    let second = router.push("/still/nope").await.unwrap();
    assert_eq!(first.view_id(), Some("NotFound"));
    assert_eq!(second.view_id(), Some("NotFound"));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_lazy_load_keeps_history() {
    let failing = LazyComponent::from_fn("BrokenView", || async {
        Err(RouterError::ComponentLoad {
            key: "BrokenView".to_string(),
            reason: "chunk missing".to_string(),
        })
    });
    let mut routes = app_routes();
    routes.push(RouteRecord::new("/broken", "Broken", failing));
    let router = Router::new(RouterOptions::new(History::memory(None), routes)).unwrap();

    router.push("/search").await.unwrap();
    let err = router.push("/broken").await.err().unwrap();
    assert!(matches!(err, RouterError::ComponentLoad { .. }));
    assert_eq!(router.current_location(), "/search");
    assert_eq!(router.history().len(), 1);
}

#[tokio::test]
async fn test_back_and_forward() {
    let router = router(History::web(None));

    router.replace("/").await.unwrap();
    router.push("/search").await.unwrap();
    router.push("/search?q=rust").await.unwrap();

    let back = router.back().await.unwrap().unwrap();
    assert_eq!(back.location().unwrap().full_path, "/search");

    let back = router.back().await.unwrap().unwrap();
    assert_eq!(back.view_id(), Some("Home"));
    assert!(router.back().await.unwrap().is_none());

    let forward = router.forward().await.unwrap().unwrap();
    assert_eq!(forward.view_id(), Some("Search"));
    assert_eq!(router.history().len(), 3);
}

#[tokio::test]
async fn test_replace_does_not_grow_history() {
    let router = router(History::memory(None));
    router.push("/").await.unwrap();
    router.replace("/search").await.unwrap();

    assert_eq!(router.history().len(), 1);
    assert_eq!(router.current_location(), "/search");
}

// ============================================================================
// Serialization round-trip
// ============================================================================

#[test]
fn test_descriptor_round_trip() {
    let mut routes = app_routes();
    routes.push(not_found_route(Arc::new(AtomicUsize::new(0))).with_meta("title", "Not found"));
    let table = RouteTable::new(routes).unwrap();

    let json = table.to_json().unwrap();

    let mut registry = ComponentRegistry::new();
    for route in &table {
        registry.register(route.component().clone());
    }
    let rebuilt = RouteTable::from_json(&json, &registry, PatternOptions::default()).unwrap();

    assert_eq!(rebuilt.descriptors(), table.descriptors());

    let first = Router::from_table(Arc::new(table), History::memory(None));
    let rebuilt = Router::from_table(Arc::new(rebuilt), History::memory(None));
    for path in ["/", "/search", "/unknown-path", "/a/b/c"] {
        assert_eq!(
            first.resolve(path).map(|l| l.name),
            rebuilt.resolve(path).map(|l| l.name),
            "path {}",
            path
        );
    }
}

#[test]
fn test_descriptor_json_shape() {
    let table = RouteTable::new(app_routes()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"path": "/", "name": "Home", "component": "Home", "lazy": false},
            {"path": "/search", "name": "Search", "component": "Search", "lazy": false}
        ])
    );
}
