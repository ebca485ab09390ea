//! # songseek-providers
//!
//! Backend adapters for third-party music catalogs, the provider registry
//! that selects between them, and the [`Resolver`] facade exposing the
//! uniform `search` / `resolve_play_info` contract.
//!
//! ```no_run
//! # async fn demo() -> songseek_core::Result<()> {
//! use songseek_providers::{Resolver, ResolverConfig};
//!
//! let resolver = Resolver::from_config(&ResolverConfig::load(None)?)?;
//! let results = resolver.search("晴天", Some("qq")).await?;
//! if let Some(item) = results.items.first() {
//!     let play = resolver
//!         .resolve_play_info(&item.id, Some(&item.provider), item.extra.as_ref())
//!         .await?;
//!     println!("{} -> {}", item.title, play.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod client;
pub mod config;
mod de;
pub mod profile;
pub mod provider;
pub mod registry;
pub mod resolver;

pub use backends::{BuguProvider, QqProvider};
pub use client::UpstreamClient;
pub use config::{BackendOverrides, ResolverConfig};
pub use profile::BackendProfile;
pub use provider::MusicProvider;
pub use registry::{ProviderRegistry, RegistryBuilder};
pub use resolver::Resolver;
