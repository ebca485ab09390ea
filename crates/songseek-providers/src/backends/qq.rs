//! QQ Music adapter, reached through the vkeys relay.
//!
//! Multi-variant backend: the relay answers one quality tier per request.
//! Tiers are probed one at a time in [`QUALITY_PRIORITY`] order and the walk
//! stops at the first tier whose body reports `code == 200` with a usable
//! URL. Later tiers are never requested once one succeeds.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use songseek_core::{non_blank, CatalogItem, Error, PlayInfo, Result};
use tracing::{debug, error, info};

use crate::{client::UpstreamClient, de, profile::BackendProfile, provider::MusicProvider};

const SEARCH_PATH: &str = "/v2/music/tencent/search/song";
const URL_PATH: &str = "/v2/music/tencent/geturl";

/// Body-level status the relay uses for a successful lookup.
const SUCCESS_CODE: i64 = 200;

/// Whether the body code is the success code, in integer or float form.
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
fn is_success_code(code: &Value) -> bool {
    code.as_i64() == Some(SUCCESS_CODE) || code.as_f64() == Some(SUCCESS_CODE as f64)
}

/// Quality tiers in the order they are probed.
pub const QUALITY_PRIORITY: [u8; 11] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

#[derive(Debug, Default, Deserialize)]
struct SearchEnvelope {
    #[serde(default, deserialize_with = "de::records")]
    data: Vec<RawSong>,
}

#[derive(Debug, Deserialize)]
struct RawSong {
    #[serde(default, deserialize_with = "de::text")]
    mid: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    song: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    singer: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    album: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    cover: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UrlEnvelope {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    data: Option<UrlData>,
}

#[derive(Debug, Default, Deserialize)]
struct UrlData {
    #[serde(default, deserialize_with = "de::text")]
    url: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    quality: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    kbps: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    cover: Option<String>,
}

impl UrlEnvelope {
    /// Play info for this tier, or the reason it was rejected.
    fn into_play_info(self) -> std::result::Result<PlayInfo, String> {
        if !is_success_code(&self.code) {
            return Err(format!("status code {}", self.code));
        }
        let data = self.data.ok_or_else(|| "no data".to_string())?;
        let url = data.url.ok_or_else(|| "no url".to_string())?;
        let info = PlayInfo::from_url(url.as_str())
            .ok_or_else(|| format!("not an HTTP(S) url: {url}"))?;
        Ok(info
            .with_bitrate(non_blank(data.kbps).or_else(|| non_blank(data.quality)))
            .with_cover(data.cover))
    }
}

/// Adapter for QQ Music.
#[derive(Clone)]
pub struct QqProvider {
    client: UpstreamClient,
}

impl QqProvider {
    pub const NAME: &'static str = "qq";

    /// Create an adapter with the default transport profile.
    pub fn new() -> Result<Self> {
        Self::with_profile(&BackendProfile::qq())
    }

    pub fn with_profile(profile: &BackendProfile) -> Result<Self> {
        Ok(Self {
            client: UpstreamClient::new(profile)?,
        })
    }

    fn to_item(raw: RawSong) -> CatalogItem {
        CatalogItem::new(raw.mid.unwrap_or_default(), Self::NAME)
            .with_title(raw.song)
            .with_artist(raw.singer)
            .with_album(raw.album)
            .with_cover(raw.cover)
    }

    /// Request a single quality tier.
    async fn probe(&self, id: &str, quality: u8) -> Result<UrlEnvelope> {
        let quality = quality.to_string();
        self.client
            .get_json(URL_PATH, &[("mid", id), ("quality", quality.as_str())])
            .await
    }
}

#[async_trait]
impl MusicProvider for QqProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch_catalog(&self, query: &str) -> Result<Vec<CatalogItem>> {
        let response: SearchEnvelope = self.client.get_json(SEARCH_PATH, &[("word", query)]).await?;

        Ok(response
            .data
            .into_iter()
            .map(Self::to_item)
            .filter(CatalogItem::has_id)
            .collect())
    }

    async fn resolve(&self, id: &str, _extra: Option<&Value>) -> Result<PlayInfo> {
        for quality in QUALITY_PRIORITY {
            match self.probe(id, quality).await {
                Ok(envelope) => match envelope.into_play_info() {
                    Ok(info) => {
                        info!(
                            provider = Self::NAME,
                            id,
                            quality,
                            url = %info.url,
                            "Resolved play url"
                        );
                        return Ok(info);
                    }
                    Err(reason) => {
                        debug!(
                            provider = Self::NAME,
                            id,
                            quality,
                            %reason,
                            "Quality tier rejected"
                        );
                    }
                },
                Err(e) => {
                    error!(
                        provider = Self::NAME,
                        id,
                        quality,
                        error = %e,
                        "Quality tier request failed"
                    );
                    return Err(e);
                }
            }
        }

        let err = Error::NoPlayableVariant {
            provider: Self::NAME.to_string(),
            id: id.to_string(),
            attempts: QUALITY_PRIORITY.len(),
        };
        error!(provider = Self::NAME, id, error = %err, "Failed to resolve play url");
        Err(err)
    }
}
