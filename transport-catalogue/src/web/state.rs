//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{RouteCache, ServerConfig};
use crate::catalogue::TransportCatalogue;
use crate::router::{RouterSettings, TransportRouter};

/// Shared application state.
///
/// The catalogue is frozen behind an `Arc`; handlers only read it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalogue: Arc<TransportCatalogue>,

    /// Present only when the server was started with routing settings
    pub router: Option<Arc<TransportRouter>>,

    /// Memoised route answers
    pub routes: Arc<RouteCache>,
}

impl AppState {
    /// Create a new app state, building the route graph if `settings` is given.
    pub fn new(
        catalogue: Arc<TransportCatalogue>,
        settings: Option<RouterSettings>,
        config: &ServerConfig,
    ) -> Self {
        let router = settings.map(|settings| Arc::new(TransportRouter::new(catalogue.clone(), settings)));
        Self {
            catalogue,
            router,
            routes: Arc::new(RouteCache::new(config)),
        }
    }
}
