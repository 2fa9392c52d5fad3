use std::num::ParseIntError;
use thiserror::Error;

/// Why the port segment of an address was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("not a base-10 integer: {0}")]
    NotANumber(#[from] ParseIntError),

    #[error("{value} is outside of 0..={max}")]
    OutOfRange { value: i64, max: u16 },
}

/// Errors produced while parsing an [`Address`](crate::Address).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address host in {raw:?}")]
    EmptyHost { raw: String },

    #[error("invalid port {port:?} in address {raw:?}: {reason}")]
    InvalidPort {
        raw: String,
        port: String,
        #[source]
        reason: PortError,
    },
}

#[derive(Error, Debug)]
pub enum NetAddrError {
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl NetAddrError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            NetAddrError::Address(AddressError::EmptyHost { raw }) => {
                format!("Address {:?} has no host", raw)
            }
            NetAddrError::Address(AddressError::InvalidPort { raw, port, .. }) => {
                format!("Address {:?} has an invalid port {:?}", raw, port)
            }
            NetAddrError::SerializationError(_) => "Could not encode or decode the address".to_string(),
            NetAddrError::TomlError(_) | NetAddrError::ConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            NetAddrError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            NetAddrError::IoError(e) => format!("File access failed: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, NetAddrError>;
