//! Network configuration
//!
//! Monad testnet settings used when rendering explorer links and Sourcify
//! metadata. Loaded from a `ricknad.toml` file when present; a missing file
//! falls back to the built-in testnet defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Native currency of the configured network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Target network description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub name: String,
    pub rpc_url: String,
    pub block_explorer_url: String,
    pub faucet: String,
    pub currency: CurrencyConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: "1284".to_string(),
            name: "Monad Testnet".to_string(),
            rpc_url: "https://testnet-rpc.monad.xyz".to_string(),
            block_explorer_url: "https://testnet.monadexplorer.com".to_string(),
            faucet: "https://testnet.monad.xyz/".to_string(),
            currency: CurrencyConfig {
                name: "Monad".to_string(),
                symbol: "MONAD".to_string(),
                decimals: 18,
            },
        }
    }
}

impl NetworkConfig {
    /// Loads the configuration from a TOML file, or returns the Monad
    /// testnet defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// Explorer URL for a contract address.
    pub fn explorer_address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.block_explorer_url, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_monad_testnet() {
        let config = NetworkConfig::default();
        assert_eq!(config.chain_id, "1284");
        assert_eq!(config.currency.symbol, "MONAD");
        assert_eq!(
            config.explorer_address_url("0xabc"),
            "https://testnet.monadexplorer.com/address/0xabc"
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = NetworkConfig::load("/nonexistent/ricknad.toml").unwrap();
        assert_eq!(config, NetworkConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ricknad.toml");
        std::fs::write(&path, "rpc_url = \"http://localhost:8545\"\n").unwrap();

        let config = NetworkConfig::load(&path).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.name, "Monad Testnet");
    }
}
