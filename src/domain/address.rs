use std::fmt::{Display, Formatter, Result as FResult};
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::utils::error::{AddressError, PortError, Result};

/// Largest port the parser accepts. Ports are read with a signed 16-bit width.
pub const MAX_PORT: u16 = i16::MAX as u16;

/// A network host with an optional port.
///
/// A port of `0` means "no port given". The host is opaque text: it is only
/// checked for being non-empty, and only when it comes through [`Address::parse`].
/// Hosts that contain colons themselves (IPv6 literals) are not supported, since
/// the port is always taken from after the last colon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Address {
    host: String,
    port: u16,
}

impl Address {
    /// Builds an address from its parts without any validation.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }

    /// Parses `host` or `host:port`, trimming whitespace around both parts.
    pub fn parse(value: &str) -> std::result::Result<Self, AddressError> {
        let (host, port_text) = match value.rfind(':') {
            Some(pos) => (value[..pos].trim(), value[pos + 1..].trim()),
            None => (value.trim(), "0"),
        };

        if host.is_empty() {
            tracing::debug!(input = value, "rejected address with empty host");
            return Err(AddressError::EmptyHost { raw: value.to_string() });
        }

        let port = parse_port(port_text).map_err(|reason| {
            tracing::debug!(input = value, port = port_text, "rejected address with invalid port");
            AddressError::InvalidPort {
                raw: value.to_string(),
                port: port_text.to_string(),
                reason,
            }
        })?;

        Ok(Self::new(host, port))
    }

    /// Parses a value that is known to be valid, such as a literal in code.
    ///
    /// # Panics
    /// Panics with the input and the parse failure if `value` is not a valid address.
    #[track_caller]
    pub fn must_parse(value: &str) -> Self {
        match Self::parse(value) {
            Ok(address) => address,
            Err(err) => {
                tracing::error!(input = value, error = %err, "failed to parse address");
                panic!("failed to parse address [{}]: {}", value, err)
            }
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn has_port(&self) -> bool {
        self.port != 0
    }

    /// Returns a copy that uses `port` if this address has no port of its own.
    pub fn with_default_port(&self, port: u16) -> Self {
        if self.has_port() {
            return self.clone();
        }
        Self::new(self.host.clone(), port)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn parse_port(text: &str) -> std::result::Result<u16, PortError> {
    let value: i64 = text.parse()?;
    if !(0..=i64::from(MAX_PORT)).contains(&value) {
        return Err(PortError::OutOfRange { value, max: MAX_PORT });
    }
    // Range checked above.
    Ok(value as u16)
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if self.port == 0 {
            write!(f, "{}", self.host)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    #[inline]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    #[inline]
    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    #[inline]
    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// De/Serialization
impl Serialize for Address {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    #[inline]
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Defines the visitor for the Address
        struct AddressVisitor;
        impl Visitor<'_> for AddressVisitor {
            type Value = Address;

            #[inline]
            fn expecting(&self, f: &mut Formatter<'_>) -> FResult {
                write!(f, "an address string like \"host\" or \"host:port\"")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Address::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(AddressVisitor)
    }
}
