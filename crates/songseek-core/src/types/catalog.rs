//! Catalog item type representing one normalized search hit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder title used when a backend omits the song name.
pub const UNKNOWN_TITLE: &str = "未知歌曲";

/// Placeholder artist used when a backend omits the singer.
pub const UNKNOWN_ARTIST: &str = "未知歌手";

/// A single search hit, normalized across backends.
///
/// `id` is only meaningful together with `provider`: identifiers are not
/// unique across backends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Backend-specific identifier.
    pub id: String,
    /// Track title.
    pub title: String,
    /// Artist display string.
    pub artist: String,
    /// Album name (if known).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Cover image URL (if known).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Canonical `HH:MM:SS` duration (if known).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Name of the backend that produced this item.
    pub provider: String,
    /// Opaque data the owning backend carries into its own resolve call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl CatalogItem {
    /// Create an item with placeholder title and artist.
    pub fn new(id: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: UNKNOWN_TITLE.to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: None,
            cover: None,
            duration: None,
            provider: provider.into(),
            extra: None,
        }
    }

    /// Set the title, keeping the placeholder when the value is blank.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        if let Some(title) = non_blank(title) {
            self.title = title;
        }
        self
    }

    /// Set the artist, keeping the placeholder when the value is blank.
    #[must_use]
    pub fn with_artist(mut self, artist: Option<String>) -> Self {
        if let Some(artist) = non_blank(artist) {
            self.artist = artist;
        }
        self
    }

    #[must_use]
    pub fn with_album(mut self, album: Option<String>) -> Self {
        self.album = non_blank(album);
        self
    }

    #[must_use]
    pub fn with_cover(mut self, cover: Option<String>) -> Self {
        self.cover = non_blank(cover);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Option<String>) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Whether this item carries a usable identifier.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Search result set as exposed to the request-routing layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub items: Vec<CatalogItem>,
}

impl SearchResponse {
    pub const fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Treat empty strings from upstream payloads as missing.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
