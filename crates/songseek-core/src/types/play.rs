//! Play info type binding a catalog item to one concrete media stream.

use serde::{Deserialize, Serialize};
use url::Url;

/// Container extension assumed when the URL path carries none.
pub const DEFAULT_MEDIA_TYPE: &str = "mp3";

/// A resolved, directly fetchable media stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayInfo {
    /// Absolute HTTP(S) URL to the media bytes.
    pub url: String,
    /// Container extension inferred from the URL path.
    #[serde(rename = "type")]
    pub media_type: String,
    /// Backend-reported bitrate or quality label ("320", "flac", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
    /// Cover image URL (if known).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl PlayInfo {
    /// Build play info for `url`, or `None` if it is not an absolute HTTP(S) URL.
    pub fn from_url(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if !is_playable_url(&url) {
            return None;
        }
        let media_type = media_type_from_url(&url);
        Some(Self {
            url,
            media_type,
            bitrate: None,
            cover: None,
        })
    }

    #[must_use]
    pub fn with_bitrate(mut self, bitrate: Option<String>) -> Self {
        self.bitrate = bitrate.filter(|b| !b.is_empty());
        self
    }

    #[must_use]
    pub fn with_cover(mut self, cover: Option<String>) -> Self {
        self.cover = cover.filter(|c| !c.is_empty());
        self
    }
}

/// Whether `url` is an absolute URL with an `http` or `https` scheme and a host.
pub fn is_playable_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

/// Infer the media container extension from the last path segment of `url`.
///
/// Query string and fragment are ignored. Falls back to [`DEFAULT_MEDIA_TYPE`].
pub fn media_type_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_owned))
        })
        .and_then(|segment| {
            segment
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
        })
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string())
}
