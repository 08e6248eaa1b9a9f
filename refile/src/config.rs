//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The file path defaults to `config.yaml` but can be set via the
//! `-f` flag or the `REFILE_CONFIG` environment variable. Variables prefixed
//! with `REFILE_` override YAML values; use double underscores for nested
//! fields (e.g. `REFILE_FIXTURES__FILES`).

use crate::storage::{Entity, FileRecord};
use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Simple CLI args - just for specifying the config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "REFILE_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Base URL the host page reaches this service under. Used when building
    /// replace-control hrefs. Defaults to `http://{host}:{port}/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<Url>,
    /// Records preloaded into the in-memory storage backend at startup.
    pub fixtures: Fixtures,
}

/// Seed data for the in-memory storage backend, standing in for the host
/// framework's entity storage when running standalone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fixtures {
    pub files: Vec<FileRecord>,
    pub entities: Vec<Entity>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            public_url: None,
            fixtures: Fixtures::default(),
        }
    }
}

impl Config {
    /// Load configuration from the YAML file and `REFILE_`-prefixed
    /// environment variables (later sources override earlier ones).
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let config: Config = Figment::new()
            .merge(figment::providers::Serialized::defaults(Config::default()))
            .merge(Yaml::file(&args.config))
            // REFILE_CONFIG belongs to Args, not to the config structure
            .merge(Env::prefixed("REFILE_").ignore(&["config"]).split("__"))
            .extract()?;

        config.resolve_public_url()?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The base URL for replace-control hrefs, validated to be usable as a
    /// URL base.
    pub fn resolve_public_url(&self) -> anyhow::Result<Url> {
        let url = match &self.public_url {
            Some(url) => url.clone(),
            None => Url::parse(&format!("http://{}:{}/", self.host, self.port))?,
        };
        if url.cannot_be_a_base() {
            anyhow::bail!("public_url '{url}' cannot be used as a base URL");
        }
        Ok(url)
    }
}
