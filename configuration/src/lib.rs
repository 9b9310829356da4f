use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "./stub_resolver.toml";

const DEFAULT_ADDRESS: &str = "10.0.0.1";
const DEFAULT_PORT: i64 = 53;
const DEFAULT_TIMEOUT_MS: i64 = 5000;

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub address: Option<IpAddr>,
    pub port: Option<u16>,
}

/// Loads the configuration from `config_path` (a missing file is fine),
/// on top of the built-in defaults and below `overrides`.
pub fn get_config(config_path: &Path, overrides: &Overrides) -> Result<ResolverConfiguration, ConfigError> {
    let f = File::from(config_path).required(false);
    build(defaults()?.add_source(f), overrides)
}

/// Like [`get_config`] but reads TOML from a string.
pub fn get_config_from_str(toml: &str, overrides: &Overrides) -> Result<ResolverConfiguration, ConfigError> {
    let f = File::from_str(toml, FileFormat::Toml);
    build(defaults()?.add_source(f), overrides)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("dns.address", DEFAULT_ADDRESS)?
        .set_default("dns.port", DEFAULT_PORT)?
        .set_default("dns.timeout_ms", DEFAULT_TIMEOUT_MS)
}

fn build(builder: ConfigBuilder<DefaultState>, overrides: &Overrides) -> Result<ResolverConfiguration, ConfigError> {
    let config = builder
        .set_override_option("dns.address", overrides.address.map(|a| a.to_string()))?
        .set_override_option("dns.port", overrides.port.map(i64::from))?
        .build()?;
    config.try_deserialize::<ResolverConfiguration>()
}

#[derive(Debug, Deserialize)]
pub struct ResolverConfiguration {
    pub dns: DnsConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct DnsConfiguration {
    address: IpAddr,
    port: u16,
    timeout_ms: u64,
}

impl DnsConfiguration {
    pub fn server_address(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// `None` when `timeout_ms` is 0: wait for a response forever.
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}
