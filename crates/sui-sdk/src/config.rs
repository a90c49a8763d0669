//! Client configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::SdkError;

/// Public Sui networks and a local node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Mainnet
    Mainnet,
    /// Testnet
    Testnet,
    /// Devnet
    Devnet,
    /// Local node
    Localnet,
}

impl Network {
    /// Fullnode JSON-RPC URL
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
            Network::Devnet => "https://fullnode.devnet.sui.io:443",
            Network::Localnet => "http://127.0.0.1:9000",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        })
    }
}

impl FromStr for Network {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "localnet" | "local" => Ok(Network::Localnet),
            other => Err(SdkError::Config(format!("unknown network: {}", other))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `sui_sdk=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of text
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// SDK client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Per-request HTTP timeout
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// How long `wait_for_transaction` waits by default
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
    /// Delay between polls in `wait_for_transaction`
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Reject transactions without commands
    #[serde(default)]
    pub strict_build: bool,
    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

fn default_rpc_url() -> String {
    Network::Localnet.rpc_url().to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_wait_timeout_ms() -> u64 {
    60_000
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            request_timeout_ms: default_request_timeout_ms(),
            wait_timeout_ms: default_wait_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            strict_build: false,
            log: LogConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults pointed at `network`
    pub fn for_network(network: Network) -> Self {
        Self {
            rpc_url: network.rpc_url().to_string(),
            ..Self::default()
        }
    }

    /// Parse TOML
    pub fn from_toml_str(s: &str) -> Result<Self, SdkError> {
        toml::from_str(s).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Load a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, SdkError> {
        toml::to_string_pretty(self).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Default wait deadline
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// Default poll interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.rpc_url, "http://127.0.0.1:9000");
        assert_eq!(config.wait_timeout(), Duration::from_secs(60));
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert!(!config.strict_build);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_config_for_network() {
        let config = ClientConfig::for_network(Network::Testnet);
        assert_eq!(config.rpc_url, "https://fullnode.testnet.sui.io:443");
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("moonnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            rpc_url = "https://fullnode.devnet.sui.io:443"
            poll_interval_ms = 250

            [log]
            level = "sui_sdk=debug"
            json = true
        "#;
        let config = ClientConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.rpc_url, "https://fullnode.devnet.sui.io:443");
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(config.log.json);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = ClientConfig::for_network(Network::Mainnet);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("rpc_url"));
        assert_eq!(ClientConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_config_bad_toml() {
        assert!(matches!(
            ClientConfig::from_toml_str("rpc_url = 5"),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn test_config_load_file() {
        let path = std::env::temp_dir().join(format!("sui-sdk-config-{}.toml", std::process::id()));
        std::fs::write(&path, "wait_timeout_ms = 5000\n").unwrap();
        let config = ClientConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.wait_timeout(), Duration::from_secs(5));

        assert!(ClientConfig::load(&path).is_err());
    }
}
