//! Server configuration.
//!
//! Read from an optional TOML file, overridden by `VATCAL_*` environment
//! variables (e.g. `VATCAL_PORT=8080`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use vatcal_core::Region;
use vatcal_core::constants::{DEFAULT_UPSTREAM_URL, UPSTREAM_TIMEOUT};

const DEFAULT_PORT: u16 = 3000;

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    UPSTREAM_TIMEOUT.as_secs()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base of the VATSIM API; region feed paths are appended to it
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Region served when a request names none or an unknown one
    #[serde(default)]
    pub default_region: Region,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// `$VATCAL_CONFIG`, else `~/.config/vatcal/server.toml`.
    pub fn config_path() -> Option<PathBuf> {
        std::env::var_os("VATCAL_CONFIG")
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("vatcal").join("server.toml")))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix("VATCAL").try_parsing(true))
            .build()
            .context("Failed to read server configuration")?
            .try_deserialize()
            .context("Invalid server configuration")
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
