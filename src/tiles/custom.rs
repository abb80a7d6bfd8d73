//! Server-side resolution for `{custom:key}` template tokens.
//!
//! Some tile servers cannot be described by a template at all; for those
//! the URL is computed by the tile-cache backend and fetched per tile. The
//! call is synchronous and blocks the caller until the backend answers or
//! fails. There is no timeout here beyond what the HTTP client enforces.

use crate::core::config::CustomResolverConfig;
use crate::core::geo::TileCoord;
use crate::{MapError, Result};
use lru::LruCache;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared blocking HTTP client used when no per-resolver settings are given.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("tileregion/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Looks up the URL of one tile for a server-resolved layer.
///
/// `None` means the lookup failed or the server had no answer.
pub trait CustomResolver: Send + Sync {
    fn resolve(&self, key: &str, coord: TileCoord) -> Option<String>;
}

impl<F> CustomResolver for F
where
    F: Fn(&str, TileCoord) -> Option<String> + Send + Sync,
{
    fn resolve(&self, key: &str, coord: TileCoord) -> Option<String> {
        self(key, coord)
    }
}

/// Resolver for deployments without a backend: every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCustomResolver;

impl CustomResolver for NoCustomResolver {
    fn resolve(&self, _key: &str, _coord: TileCoord) -> Option<String> {
        None
    }
}

/// Asks the tile-cache backend at `GET <base>/tileurl/<key>/<z>/<x>,<y>`,
/// which answers with the URL as plain text.
pub struct HttpCustomResolver {
    base_url: String,
    client: Client,
}

impl HttpCustomResolver {
    pub fn new(config: &CustomResolverConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build().map_err(MapError::from)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Resolver using the shared default client.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: HTTP_CLIENT.clone(),
        }
    }

    pub fn lookup_url(&self, key: &str, coord: TileCoord) -> String {
        format!(
            "{}/tileurl/{}/{}/{},{}",
            self.base_url, key, coord.z, coord.x, coord.y
        )
    }

    fn fetch(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().map_err(MapError::from)?;
        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()).into());
        }
        Ok(resp.text().map_err(MapError::from)?)
    }
}

impl CustomResolver for HttpCustomResolver {
    fn resolve(&self, key: &str, coord: TileCoord) -> Option<String> {
        let url = self.lookup_url(key, coord);
        #[cfg(feature = "debug")]
        log::debug!("custom lookup {} for tile {}", key, coord);

        match self.fetch(&url) {
            Ok(body) => {
                let body = body.trim();
                if body.is_empty() {
                    log::warn!("custom lookup {} for tile {} returned nothing", key, coord);
                    None
                } else {
                    Some(body.to_string())
                }
            }
            Err(e) => {
                log::warn!("custom lookup {} for tile {} failed: {}", key, coord, e);
                None
            }
        }
    }
}

/// Memoizes successful lookups of an inner resolver in an LRU cache.
/// Failures are not cached, so the next request asks again.
pub struct CachedResolver<R> {
    inner: R,
    cache: Mutex<LruCache<(String, TileCoord), String>>,
}

impl<R: CustomResolver> CachedResolver<R> {
    pub fn new(inner: R, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl<R: CustomResolver> CustomResolver for CachedResolver<R> {
    fn resolve(&self, key: &str, coord: TileCoord) -> Option<String> {
        let cache_key = (key.to_string(), coord);
        if let Some(hit) = self.cache.lock().ok()?.get(&cache_key).cloned() {
            return Some(hit);
        }

        let value = self.inner.resolve(key, coord)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(cache_key, value.clone());
        }
        Some(value)
    }
}

/// Builds the resolver described by `config`: HTTP, memoized when a cache
/// size is set. `None` yields a resolver whose lookups always fail.
pub fn resolver_from_config(
    config: Option<&CustomResolverConfig>,
) -> Result<Arc<dyn CustomResolver>> {
    let Some(config) = config else {
        return Ok(Arc::new(NoCustomResolver));
    };

    let http = HttpCustomResolver::new(config)?;
    if config.cache_size == 0 {
        Ok(Arc::new(http))
    } else {
        Ok(Arc::new(CachedResolver::new(http, config.cache_size)))
    }
}
