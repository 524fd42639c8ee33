//! Persistent batch configuration
//!
//! Stored as JSON, by default under `<config dir>/smart-send/config.json`.
//! Every field is optional in the file; missing fields take their defaults.

use crate::error::{Error, Result};
use crate::gas::{DEFAULT_NATIVE_GAS_PER_ITEM, DEFAULT_TOKEN_GAS_PER_ITEM};
use crate::smart_send::DEFAULT_CHUNK_LIMIT;
use crate::types::{Network, NetworkConfig, TransferKind, DEFAULT_MIN_GAS_PRICE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by every batch built from the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchConfig {
    pub network: Network,
    /// Overrides the network's chain id (local test networks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub chunk_limit: usize,
    pub native_gas_per_item: u64,
    pub token_gas_per_item: u64,
    pub gas_price: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            network: Network::default(),
            chain_id: None,
            contract_address: None,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            native_gas_per_item: DEFAULT_NATIVE_GAS_PER_ITEM,
            token_gas_per_item: DEFAULT_TOKEN_GAS_PER_ITEM,
            gas_price: DEFAULT_MIN_GAS_PRICE,
        }
    }
}

impl BatchConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| {
                Error::Configuration("Cannot determine config directory".to_string())
            })?
            .join("smart-send")
            .join("config.json"))
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: BatchConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded batch config");
        Ok(config)
    }

    /// Load `path` (or the default path); a missing file yields the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            debug!(path = %path.display(), "no batch config, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_limit == 0 {
            return Err(Error::Configuration(
                "chunkLimit must be positive".to_string(),
            ));
        }
        if let Some(ref address) = self.contract_address {
            crate::address::parse_address(address)?;
        }
        Ok(())
    }

    pub fn network_config(&self) -> NetworkConfig {
        let mut config = NetworkConfig::for_network(self.network);
        if let Some(ref chain_id) = self.chain_id {
            config.chain_id = chain_id.clone();
        }
        config.min_gas_price = self.gas_price;
        config
    }

    /// Configured per-transfer gas for `kind`
    pub fn gas_per_item(&self, kind: TransferKind) -> u64 {
        match kind {
            TransferKind::Native => self.native_gas_per_item,
            _ => self.token_gas_per_item,
        }
    }
}
