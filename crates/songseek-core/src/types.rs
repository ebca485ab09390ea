//! Core domain types for songseek.

pub mod catalog;
pub mod duration;
pub mod play;

pub use catalog::{non_blank, CatalogItem, SearchResponse, UNKNOWN_ARTIST, UNKNOWN_TITLE};
pub use duration::{normalize_duration, normalize_duration_str};
pub use play::{is_playable_url, media_type_from_url, PlayInfo, DEFAULT_MEDIA_TYPE};
