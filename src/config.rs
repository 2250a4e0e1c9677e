//! Process configuration.
//!
//! Values are layered: built-in defaults first, then environment variables
//! prefixed with `SCOPE_PROBE_` (for example `SCOPE_PROBE_PORT=8080`). The
//! configuration is read once at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::{CounterSource, IdentifierSource, RandomSource, UuidSource};
use crate::Lifetime;

/// Configuration failures; all of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
    #[error("consumer_lifetime = {0} would capture the request-scoped operation; use transient or scoped")]
    CapturedScope(Lifetime),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Figment(Box::new(err))
    }
}

/// Which generator backs operation ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSourceKind {
    #[default]
    Random,
    Uuid,
    Counter,
}

impl IdSourceKind {
    pub fn build(&self) -> Arc<dyn IdentifierSource> {
        match self {
            IdSourceKind::Random => Arc::new(RandomSource),
            IdSourceKind::Uuid => Arc::new(UuidSource),
            IdSourceKind::Counter => Arc::new(CounterSource::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub id_source: IdSourceKind,
    /// Lifetime of both consumers
    pub consumer_lifetime: Lifetime,
    /// Resolve singletons before serving the first request
    pub eager_singletons: bool,
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    pub log: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            id_source: IdSourceKind::Random,
            consumer_lifetime: Lifetime::Transient,
            eager_singletons: true,
            log: "info,scope_probe=debug".to_string(),
        }
    }
}

impl ServerConfig {
    pub const ENV_PREFIX: &'static str = "SCOPE_PROBE_";

    /// The layered provider, exposed so callers can merge extra sources.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(ServerConfig::default())).merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Loads and validates the configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: ServerConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consumer_lifetime == Lifetime::Singleton {
            return Err(ConfigError::CapturedScope(self.consumer_lifetime));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
