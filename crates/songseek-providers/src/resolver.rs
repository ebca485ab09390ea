//! Resolution facade consumed by the request-routing layer.

use std::sync::Arc;

use serde_json::Value;
use songseek_core::{Error, PlayInfo, Result, SearchResponse};
use tracing::{info, instrument, Span};

use crate::{config::ResolverConfig, registry::ProviderRegistry};

/// Routes search and resolution requests to the registered backends.
///
/// Cheap to clone; every clone shares the same read-only registry.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<ProviderRegistry>,
}

impl Resolver {
    pub const fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Build a resolver over the standard registry.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(ProviderRegistry::from_config(config)?)))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Search one backend for `query`.
    ///
    /// Fails only when `query` is blank; upstream failures yield an empty
    /// result set.
    #[instrument(skip(self), fields(backend = tracing::field::Empty))]
    pub async fn search(&self, query: &str, provider: Option<&str>) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(Error::MissingInput("query"));
        }

        let backend = self.registry.lookup_or_default(provider);
        Span::current().record("backend", backend.name());

        let items = backend.search(query).await;
        info!(count = items.len(), "Search completed");
        Ok(SearchResponse::new(items))
    }

    /// Resolve a catalog identifier into a playable stream.
    ///
    /// `extra` is passed through untouched to the backend that produced the
    /// item. Resolution failures always propagate.
    #[instrument(skip(self, extra), fields(backend = tracing::field::Empty))]
    pub async fn resolve_play_info(
        &self,
        id: &str,
        provider: Option<&str>,
        extra: Option<&Value>,
    ) -> Result<PlayInfo> {
        if id.trim().is_empty() {
            return Err(Error::MissingInput("id"));
        }

        let backend = self.registry.lookup_or_default(provider);
        Span::current().record("backend", backend.name());

        backend.resolve(id, extra).await
    }
}
