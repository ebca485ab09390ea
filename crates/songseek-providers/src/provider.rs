//! The uniform contract every backend adapter implements.

use async_trait::async_trait;
use serde_json::Value;
use songseek_core::{CatalogItem, PlayInfo, Result};
use tracing::warn;

/// One upstream catalog service behind the uniform search/resolve contract.
///
/// Implementors hold no cross-request state; a single instance is shared by
/// every concurrent request through the [`ProviderRegistry`](crate::ProviderRegistry).
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Short backend name, also stamped on every [`CatalogItem`] produced.
    fn name(&self) -> &str;

    /// Query the upstream catalog, surfacing transport and payload failures.
    async fn fetch_catalog(&self, query: &str) -> Result<Vec<CatalogItem>>;

    /// Advisory search: never fails.
    ///
    /// Items without an identifier are dropped. Upstream failures are logged
    /// and degrade to an empty list.
    async fn search(&self, query: &str) -> Vec<CatalogItem> {
        match self.fetch_catalog(query).await {
            Ok(mut items) => {
                items.retain(CatalogItem::has_id);
                items
            }
            Err(e) => {
                warn!(provider = self.name(), query, error = %e, "Search failed");
                Vec::new()
            }
        }
    }

    /// Turn a catalog identifier into a fetchable media URL.
    ///
    /// `extra` is the bag this same backend attached to the item at search
    /// time, if any.
    async fn resolve(&self, id: &str, extra: Option<&Value>) -> Result<PlayInfo>;
}
