//! Bugu catalog adapter.
//!
//! Single-variant backend: one detail request yields at most one media URL.
//! The cover found at search time is carried to resolve through `extra`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use songseek_core::{normalize_duration, CatalogItem, Error, PlayInfo, Result};
use tracing::{error, info};

use crate::{client::UpstreamClient, de, profile::BackendProfile, provider::MusicProvider};

const SEARCH_PATH: &str = "/newapi/search.php";
const DETAIL_PATH: &str = "/newapi/geturl2.php";

#[derive(Debug, Default, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    data: Option<SearchData>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchData {
    #[serde(default, deserialize_with = "de::records")]
    list: Vec<RawSong>,
}

#[derive(Debug, Deserialize)]
struct RawSong {
    #[serde(default, deserialize_with = "de::text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    singer: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    album: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    picurl: Option<String>,
    #[serde(default)]
    duration: Value,
}

#[derive(Debug, Default, Deserialize)]
struct DetailEnvelope {
    #[serde(default)]
    data: Option<DetailData>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailData {
    #[serde(default, deserialize_with = "de::text")]
    url: Option<String>,
}

/// Data this adapter carries from search into resolve.
#[derive(Debug, Serialize)]
struct BuguExtra {
    #[serde(skip_serializing_if = "Option::is_none")]
    cover: Option<String>,
}

impl BuguExtra {
    fn cover_from(extra: Option<&Value>) -> Option<String> {
        extra
            .and_then(|v| v.get("cover"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

/// Adapter for the bugu catalog.
#[derive(Clone)]
pub struct BuguProvider {
    client: UpstreamClient,
}

impl BuguProvider {
    pub const NAME: &'static str = "bugu";

    /// Create an adapter with the default transport profile.
    pub fn new() -> Result<Self> {
        Self::with_profile(&BackendProfile::bugu())
    }

    pub fn with_profile(profile: &BackendProfile) -> Result<Self> {
        Ok(Self {
            client: UpstreamClient::new(profile)?,
        })
    }

    fn to_item(raw: RawSong) -> CatalogItem {
        let mut item = CatalogItem::new(raw.id.unwrap_or_default(), Self::NAME)
            .with_title(raw.title)
            .with_artist(raw.singer)
            .with_album(raw.album)
            .with_cover(raw.picurl)
            .with_duration(normalize_duration(&raw.duration));

        if item.cover.is_some() {
            let extra = BuguExtra {
                cover: item.cover.clone(),
            };
            if let Ok(extra) = serde_json::to_value(extra) {
                item = item.with_extra(extra);
            }
        }
        item
    }

    async fn fetch_play_info(&self, id: &str, extra: Option<&Value>) -> Result<PlayInfo> {
        let response: DetailEnvelope = self.client.get_json(DETAIL_PATH, &[("id", id)]).await?;

        let url = response
            .data
            .and_then(|d| d.url)
            .ok_or_else(|| Error::malformed(Self::NAME, "Response carries no url"))?;

        let info = PlayInfo::from_url(url.as_str())
            .ok_or_else(|| Error::malformed(Self::NAME, format!("Not an HTTP(S) url: {url}")))?;

        Ok(info.with_cover(BuguExtra::cover_from(extra)))
    }
}

#[async_trait]
impl MusicProvider for BuguProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch_catalog(&self, query: &str) -> Result<Vec<CatalogItem>> {
        let response: SearchEnvelope = self
            .client
            .get_json(SEARCH_PATH, &[("keyword", query)])
            .await?;

        Ok(response
            .data
            .map(|d| d.list)
            .unwrap_or_default()
            .into_iter()
            .map(Self::to_item)
            .filter(CatalogItem::has_id)
            .collect())
    }

    async fn resolve(&self, id: &str, extra: Option<&Value>) -> Result<PlayInfo> {
        let result = self.fetch_play_info(id, extra).await;
        match &result {
            Ok(info) => info!(provider = Self::NAME, id, url = %info.url, "Resolved play url"),
            Err(e) => error!(provider = Self::NAME, id, error = %e, "Failed to resolve play url"),
        }
        result
    }
}
