//! Route answer caching and server configuration.
//!
//! Shortest-path queries are the only expensive lookups the server answers,
//! so their results are memoised per `(from, to)` pair. Misses are cached
//! too: an unreachable pair stays unreachable for the life of the catalogue.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::router::{RouteResult, TransportRouter};

/// Cache key for route answers: (origin stop, destination stop).
type RouteKey = (String, String);

/// Cached route answer; `None` records a miss.
type RouteEntry = Arc<Option<RouteResult>>;

/// Configuration for the HTTP server and its route cache.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,

    /// TTL for cached route answers.
    pub cache_ttl: Duration,

    /// Maximum number of cached route answers.
    pub cache_capacity: u64,
}

impl ServerConfig {
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cache_ttl: Duration::from_secs(60),
            cache_capacity: 1000,
        }
    }
}

/// Cache of route answers.
pub struct RouteCache {
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &ServerConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(config.cache_capacity)
            .build();

        Self { routes }
    }

    /// Answer a route query, computing it with `router` on a miss.
    pub async fn route(&self, router: &TransportRouter, from: &str, to: &str) -> RouteEntry {
        let key = (from.to_owned(), to.to_owned());
        if let Some(cached) = self.routes.get(&key).await {
            return cached;
        }

        let entry = Arc::new(router.calc_route(from, to));
        self.routes.insert(key, entry.clone()).await;
        debug!(from, to, cached = self.routes.entry_count(), "route cache miss");
        entry
    }

    /// Drop every cached answer.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

impl std::fmt::Debug for RouteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteCache")
            .field("entries", &self.routes.entry_count())
            .finish()
    }
}
