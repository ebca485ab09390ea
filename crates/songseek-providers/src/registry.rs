//! Provider registry.
//!
//! Built once at process start and shared read-only afterwards. Lookups
//! never fail: an unknown name resolves to the default backend.

use std::sync::Arc;

use songseek_core::{Error, Result};
use tracing::{debug, warn};

use crate::{
    backends::{BuguProvider, QqProvider},
    config::ResolverConfig,
    profile::BackendProfile,
    provider::MusicProvider,
};

/// Immutable name → adapter mapping with a designated default.
pub struct ProviderRegistry {
    /// Adapters in registration order.
    providers: Vec<Arc<dyn MusicProvider>>,
    /// Index of the default adapter in `providers`.
    default_index: usize,
}

impl ProviderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build the standard registry (`bugu`, `qq`) with configured overrides.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        let bugu = BuguProvider::with_profile(&config.apply(BackendProfile::bugu())?)?;
        let qq = QqProvider::with_profile(&config.apply(BackendProfile::qq())?)?;

        let registry = Self::builder()
            .register(bugu)
            .register(qq)
            .build(&config.default_provider)?;

        for name in config.providers.keys() {
            if !registry.contains(name) {
                warn!("Ignoring configuration for unknown provider {name}");
            }
        }

        Ok(registry)
    }

    /// The adapter registered under `name`, or the default adapter.
    pub fn lookup(&self, name: &str) -> &dyn MusicProvider {
        match self.providers.iter().find(|p| p.name() == name) {
            Some(provider) => provider.as_ref(),
            None => {
                debug!(
                    requested = name,
                    fallback = self.default_provider().name(),
                    "Unknown provider, using default"
                );
                self.default_provider()
            }
        }
    }

    /// Like [`lookup`](Self::lookup), treating `None` as the default.
    pub fn lookup_or_default(&self, name: Option<&str>) -> &dyn MusicProvider {
        name.map_or_else(|| self.default_provider(), |name| self.lookup(name))
    }

    pub fn default_provider(&self) -> &dyn MusicProvider {
        self.providers[self.default_index].as_ref()
    }

    /// Every registered adapter, in registration order.
    pub fn list_all(&self) -> &[Arc<dyn MusicProvider>] {
        &self.providers
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.iter().any(|p| p.name() == name)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .field("default", &self.default_provider().name())
            .finish()
    }
}

/// Collects adapters before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    providers: Vec<Arc<dyn MusicProvider>>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn register(self, provider: impl MusicProvider + 'static) -> Self {
        self.register_arc(Arc::new(provider))
    }

    #[must_use]
    pub fn register_arc(mut self, provider: Arc<dyn MusicProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Freeze the registry with `default` as the fallback backend.
    ///
    /// Fails if nothing is registered, a name is registered twice, or
    /// `default` is not registered.
    pub fn build(self, default: &str) -> Result<ProviderRegistry> {
        if self.providers.is_empty() {
            return Err(Error::Config("No providers registered".to_string()));
        }

        for (i, provider) in self.providers.iter().enumerate() {
            if self.providers[..i].iter().any(|p| p.name() == provider.name()) {
                return Err(Error::Config(format!(
                    "Provider {} registered twice",
                    provider.name()
                )));
            }
        }

        let default_index = self
            .providers
            .iter()
            .position(|p| p.name() == default)
            .ok_or_else(|| Error::Config(format!("Default provider {default} is not registered")))?;

        Ok(ProviderRegistry {
            providers: self.providers,
            default_index,
        })
    }
}
