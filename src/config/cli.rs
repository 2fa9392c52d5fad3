use crate::config::toml_config::EndpointsConfig;
use crate::domain::{Address, MAX_PORT};
use crate::utils::error::{NetAddrError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "netaddr")]
#[command(about = "Parse, normalize and print host[:port] addresses")]
pub struct CliConfig {
    /// Address to parse, e.g. `mail` or `mail:25`
    #[arg(required_unless_present = "endpoint")]
    pub address: Option<String>,

    #[arg(long, help = "Port to use when the address has none")]
    pub default_port: Option<u16>,

    #[arg(long, requires = "endpoint", help = "TOML file with named endpoints")]
    pub config: Option<PathBuf>,

    #[arg(long, requires = "config", conflicts_with = "address")]
    pub endpoint: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// JSON shape printed by `--format json`.
#[derive(Debug, Serialize)]
struct AddressReport<'a> {
    address: &'a Address,
    host: &'a str,
    port: u16,
}

impl CliConfig {
    /// Reads the address from the argument or the named endpoint, then applies `--default-port`.
    pub fn resolve(&self) -> Result<Address> {
        let address = match (&self.address, &self.config, &self.endpoint) {
            (Some(raw), _, _) => Address::parse(raw)?,
            (None, Some(path), Some(name)) => {
                let endpoints = EndpointsConfig::from_file(path)?;
                endpoints.validate()?;
                endpoints.resolve(name).ok_or_else(|| NetAddrError::ConfigError {
                    message: format!("endpoint {:?} not found in {}", name, path.display()),
                })?
            }
            _ => {
                return Err(NetAddrError::ConfigError {
                    message: "either an address or --config with --endpoint is required"
                        .to_string(),
                })
            }
        };

        Ok(match self.default_port {
            Some(port) => address.with_default_port(port),
            None => address,
        })
    }

    pub fn render(&self, address: &Address) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(address.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(&AddressReport {
                address,
                host: address.host(),
                port: address.port(),
            })?),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(port) = self.default_port {
            validate_range("default_port", port, 1, MAX_PORT)?;
        }
        if let Some(name) = &self.endpoint {
            validate_non_empty_string("endpoint", name)?;
        }
        Ok(())
    }
}
