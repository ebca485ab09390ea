//! Command definitions and handlers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use songseek_providers::{Resolver, ResolverConfig};
use tracing::debug;

/// Find playable audio for a song title across music catalogs.
#[derive(Debug, Parser)]
#[command(name = "songseek", version, about)]
pub struct Cli {
    /// Path to a JSON configuration file.
    #[arg(long, global = true, env = "SONGSEEK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search one backend for a song title.
    Search {
        query: String,
        /// Backend name; unknown names fall back to the default backend.
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Resolve a catalog id into a direct media URL.
    Url {
        id: String,
        #[arg(short, long)]
        provider: Option<String>,
        /// The `extra` object returned with the search hit, as JSON.
        #[arg(long, value_parser = parse_extra)]
        extra: Option<Value>,
    },
    /// List registered backends.
    Providers,
}

impl Cli {
    pub async fn run(self) -> Result<Value> {
        let config = ResolverConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        debug!(?config, "Configuration loaded");
        let resolver = Resolver::from_config(&config)?;
        self.command.run(&resolver).await
    }
}

impl Command {
    pub async fn run(self, resolver: &Resolver) -> Result<Value> {
        match self {
            Self::Search { query, provider } => {
                let response = resolver.search(&query, provider.as_deref()).await?;
                to_json(&response)
            }
            Self::Url {
                id,
                provider,
                extra,
            } => {
                let info = resolver
                    .resolve_play_info(&id, provider.as_deref(), extra.as_ref())
                    .await
                    .with_context(|| format!("Failed to resolve play url for {id}"))?;
                to_json(&info)
            }
            Self::Providers => {
                let registry = resolver.registry();
                let default = registry.default_provider().name();
                let providers: Vec<Value> = registry
                    .names()
                    .into_iter()
                    .map(|name| json!({"name": name, "default": name == default}))
                    .collect();
                Ok(json!({ "providers": providers }))
            }
        }
    }
}

fn to_json(value: &impl Serialize) -> Result<Value> {
    serde_json::to_value(value).context("Failed to serialize output")
}

fn parse_extra(raw: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("extra must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}
