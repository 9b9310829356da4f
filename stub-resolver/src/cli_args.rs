use std::net::IpAddr;
use std::path::PathBuf;

use argh::FromArgs;
use configuration::{Overrides, DEFAULT_CONFIG_PATH};

fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

#[derive(Debug, FromArgs)]
/// Interactive DNS client: asks one server for A, MX, TXT or AAAA records.
pub struct CliArgs {
    #[argh(
        option,
        short = 'c',
        description = "config file path, default: './stub_resolver.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,

    #[argh(option, short = 'a', description = "DNS server address, default: 10.0.0.1")]
    pub address: Option<IpAddr>,

    #[argh(option, short = 'p', description = "DNS server port, default: 53")]
    pub port: Option<u16>,
}

impl CliArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            address: self.address,
            port: self.port,
        }
    }
}
