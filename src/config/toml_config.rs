use crate::domain::{Address, MAX_PORT};
use crate::utils::error::{NetAddrError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A file of named endpoints, e.g.
///
/// ```toml
/// [defaults]
/// port = 25
///
/// [endpoints]
/// mail = "mail"
/// web = "127.0.0.1:8080"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub endpoints: BTreeMap<String, Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub port: Option<u16>,
}

impl EndpointsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading endpoints from {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: Self = toml::from_str(&processed_content)?;
        tracing::debug!("Parsed {} endpoint(s)", config.endpoints.len());
        Ok(config)
    }

    /// 替換環境變數 (例如 ${MAIL_HOST})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| NetAddrError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| NetAddrError::ConfigError {
            message: format!("TOML serialization error: {}", e),
        })
    }

    pub fn default_port(&self) -> Option<u16> {
        self.defaults.port
    }

    /// Looks up an endpoint by name, filling in the default port if one is configured.
    pub fn resolve(&self, name: &str) -> Option<Address> {
        self.endpoints.get(name).map(|address| self.apply_default(address))
    }

    /// Every endpoint with the default port applied.
    pub fn resolved(&self) -> BTreeMap<String, Address> {
        self.endpoints
            .iter()
            .map(|(name, address)| (name.clone(), self.apply_default(address)))
            .collect()
    }

    fn apply_default(&self, address: &Address) -> Address {
        match self.defaults.port {
            Some(port) => address.with_default_port(port),
            None => address.clone(),
        }
    }
}

impl Validate for EndpointsConfig {
    fn validate(&self) -> Result<()> {
        if self.endpoints.is_empty() {
            return Err(NetAddrError::ConfigError {
                message: "no endpoints defined".to_string(),
            });
        }

        for name in self.endpoints.keys() {
            validate_non_empty_string("endpoints", name)?;
        }

        if let Some(port) = self.defaults.port {
            validate_range("defaults.port", port, 1, MAX_PORT)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[defaults]
port = 25

[endpoints]
mail = "mail"
web = "127.0.0.1:8080"
"#;

    #[test]
    fn test_parse_endpoints_config() {
        let config = EndpointsConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.default_port(), Some(25));
        assert_eq!(config.endpoints["mail"], Address::new("mail", 0));
        assert_eq!(config.endpoints["web"], Address::new("127.0.0.1", 8080));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_applies_default_port() {
        let config = EndpointsConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.resolve("mail"), Some(Address::new("mail", 25)));
        assert_eq!(config.resolve("web"), Some(Address::new("127.0.0.1", 8080)));
        assert_eq!(config.resolve("missing"), None);

        let resolved = config.resolved();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["mail"].to_string(), "mail:25");
    }

    #[test]
    fn test_resolve_without_defaults() {
        let config = EndpointsConfig::from_toml_str("[endpoints]\nmail = \"mail\"\n").unwrap();
        assert_eq!(config.resolve("mail"), Some(Address::new("mail", 0)));
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let result = EndpointsConfig::from_toml_str("[endpoints]\nmail = \":25\"\n");
        assert!(matches!(result, Err(NetAddrError::TomlError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let empty = EndpointsConfig::default();
        assert!(empty.validate().is_err());

        let zero_default =
            EndpointsConfig::from_toml_str("[defaults]\nport = 0\n[endpoints]\nmail = \"mail\"\n")
                .unwrap();
        assert!(matches!(
            zero_default.validate(),
            Err(NetAddrError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("NETADDR_TEST_MAIL_HOST", "smtp.example.com");
        let config = EndpointsConfig::from_toml_str(
            "[endpoints]\nmail = \"${NETADDR_TEST_MAIL_HOST}:587\"\n",
        )
        .unwrap();
        assert_eq!(config.endpoints["mail"], Address::new("smtp.example.com", 587));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = EndpointsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.endpoints.len(), 2);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EndpointsConfig::from_toml_str(SAMPLE).unwrap();
        let text = config.to_toml_string().unwrap();
        let reparsed = EndpointsConfig::from_toml_str(&text).unwrap();
        assert_eq!(reparsed.endpoints, config.endpoints);
        assert_eq!(reparsed.default_port(), Some(25));
    }
}
