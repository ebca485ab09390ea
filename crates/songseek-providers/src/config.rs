//! Resolver configuration.
//!
//! Configuration is a small JSON document. Every field is optional:
//!
//! ```json
//! {
//!   "default_provider": "qq",
//!   "providers": {
//!     "bugu": { "base_url": "https://a.buguyy.top", "timeout_secs": 20 },
//!     "qq": { "timeout_secs": 10 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use songseek_core::{Error, Result};
use tracing::{debug, info};
use url::Url;

use crate::profile::BackendProfile;

/// Environment variable overriding [`ResolverConfig::default_provider`].
pub const PROVIDER_ENV: &str = "SONGSEEK_PROVIDER";

/// Backend used when a request names no provider, or an unknown one.
pub const DEFAULT_PROVIDER: &str = "qq";

const CONFIG_FILE: &str = "config.json";

/// Top-level resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Name of the fallback backend.
    pub default_provider: String,
    /// Per-backend transport overrides, keyed by backend name.
    pub providers: BTreeMap<String, BackendOverrides>,
}

/// Transport overrides for one backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendOverrides {
    /// Replacement upstream base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Replacement request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER.to_string(),
            providers: BTreeMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load configuration for the running process.
    ///
    /// An explicit `path` must exist. Without one, `config.json` in the
    /// platform config directory is used when present, otherwise defaults.
    /// [`PROVIDER_ENV`] is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_path(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_path(&path)?,
                None => Self::default(),
            },
        };
        Ok(config.with_provider_override(std::env::var(PROVIDER_ENV).ok()))
    }

    /// Platform location of the default configuration file.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "songseek").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Replace the default provider when `name` is set and non-blank.
    pub fn with_provider_override(mut self, name: Option<String>) -> Self {
        if let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            info!("Default provider overridden to {name}");
            self.default_provider = name;
        }
        self
    }

    /// Apply this configuration's overrides for `profile.name` to `profile`.
    pub fn apply(&self, profile: BackendProfile) -> Result<BackendProfile> {
        let Some(overrides) = self.providers.get(profile.name) else {
            return Ok(profile);
        };

        let mut profile = profile;
        if let Some(base_url) = &overrides.base_url {
            let parsed = Url::parse(base_url).map_err(|e| {
                Error::Config(format!("Invalid base_url for {}: {e}", profile.name))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "base_url for {} must be http or https",
                    profile.name
                )));
            }
            profile = profile.with_base_url(base_url.as_str());
        }
        if let Some(secs) = overrides.timeout_secs {
            if secs == 0 {
                return Err(Error::Config(format!(
                    "timeout_secs for {} must be positive",
                    profile.name
                )));
            }
            profile = profile.with_timeout(Duration::from_secs(secs));
        }
        Ok(profile)
    }
}
