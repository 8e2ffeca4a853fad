//! View components and how route records resolve them
//!
//! A route record refers to its view through a [`ComponentRef`], which is
//! either eager (the view exists when the table is built) or lazy (an async
//! [`ComponentLoader`] produces the view on first navigation and the result is
//! cached for the life of the table).

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::{Result, RouterError};
use crate::RouteLocation;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A renderable page
pub trait View: Send + Sync {
    /// Stable identifier of the view, e.g. `Search`
    fn id(&self) -> &str;

    /// Renders the view for a resolved location
    fn render(&self, location: &RouteLocation) -> String;
}

/// Produces a view on demand
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn View>>;
}

struct FnLoader<F>(F);

#[async_trait]
impl<F> ComponentLoader for FnLoader<F>
where
    F: Fn() -> BoxFuture<'static, Result<Arc<dyn View>>> + Send + Sync,
{
    async fn load(&self) -> Result<Arc<dyn View>> {
        (self.0)().await
    }
}

/// A view resolved on first use
///
/// Clones share the cache, so a view loaded through one clone is ready in all
/// of them. A failed load leaves the cache empty and the next resolve retries.
#[derive(Clone)]
pub struct LazyComponent {
    key: String,
    loader: Arc<dyn ComponentLoader>,
    cell: Arc<OnceCell<Arc<dyn View>>>,
}

impl LazyComponent {
    pub fn new(key: impl Into<String>, loader: impl ComponentLoader + 'static) -> Self {
        Self {
            key: key.into(),
            loader: Arc::new(loader),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Wraps an async closure as a loader
    ///
    /// ```
    /// use std::sync::Arc;
    /// use search_router::{LazyComponent, RouteLocation, View};
    ///
    /// struct NotFound;
    ///
    /// impl View for NotFound {
    ///     fn id(&self) -> &str { "NotFound" }
    ///     fn render(&self, _: &RouteLocation) -> String { "not found".into() }
    /// }
    ///
    /// let lazy = LazyComponent::from_fn("NotFoundView", || async {
    ///     Ok(Arc::new(NotFound) as Arc<dyn View>)
    /// });
    /// assert!(!lazy.is_loaded());
    /// ```
    pub fn from_fn<F, Fut>(key: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn View>>> + Send + 'static,
    {
        let loader = FnLoader(move || {
            Box::pin(load()) as BoxFuture<'static, Result<Arc<dyn View>>>
        });
        Self::new(key, loader)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Loads the view, or returns the cached one
    pub async fn resolve(&self) -> Result<Arc<dyn View>> {
        let view = self
            .cell
            .get_or_try_init(|| async {
                tracing::debug!(component = %self.key, "loading lazy component");
                self.loader.load().await.map_err(|err| match err {
                    err @ RouterError::ComponentLoad { .. } => err,
                    other => RouterError::ComponentLoad {
                        key: self.key.clone(),
                        reason: other.to_string(),
                    },
                })
            })
            .await?;
        Ok(Arc::clone(view))
    }
}

/// How a route record refers to its view
#[derive(Clone)]
pub enum ComponentRef {
    /// Available immediately
    Eager(Arc<dyn View>),
    /// Resolved on first navigation
    Lazy(LazyComponent),
}

impl ComponentRef {
    pub fn eager(view: impl View + 'static) -> Self {
        ComponentRef::Eager(Arc::new(view))
    }

    /// Registry key: the view id for eager components, the loader key for lazy ones
    pub fn key(&self) -> &str {
        match self {
            ComponentRef::Eager(view) => view.id(),
            ComponentRef::Lazy(lazy) => lazy.key(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ComponentRef::Lazy(_))
    }

    pub async fn resolve(&self) -> Result<Arc<dyn View>> {
        match self {
            ComponentRef::Eager(view) => Ok(Arc::clone(view)),
            ComponentRef::Lazy(lazy) => lazy.resolve().await,
        }
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRef::Eager(view) => f.debug_tuple("Eager").field(&view.id()).finish(),
            ComponentRef::Lazy(lazy) => f
                .debug_struct("Lazy")
                .field("key", &lazy.key)
                .field("loaded", &lazy.is_loaded())
                .finish(),
        }
    }
}

impl<V: View + 'static> From<V> for ComponentRef {
    fn from(view: V) -> Self {
        ComponentRef::eager(view)
    }
}

impl From<LazyComponent> for ComponentRef {
    fn from(lazy: LazyComponent) -> Self {
        ComponentRef::Lazy(lazy)
    }
}

/// Component references by key, used to rebuild a table from descriptors
#[derive(Clone, Default, Debug)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentRef>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component under its own key
    pub fn register(&mut self, component: impl Into<ComponentRef>) -> &mut Self {
        let component = component.into();
        self.components.insert(component.key().to_string(), component);
        self
    }

    pub fn with(mut self, component: impl Into<ComponentRef>) -> Self {
        self.register(component);
        self
    }

    pub fn get(&self, key: &str) -> Result<ComponentRef> {
        self.components
            .get(key)
            .cloned()
            .ok_or_else(|| RouterError::UnknownComponent(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
