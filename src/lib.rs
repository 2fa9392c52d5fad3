pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::EndpointsConfig;
pub use domain::{Address, MAX_PORT};
pub use utils::error::{AddressError, NetAddrError, PortError, Result};
