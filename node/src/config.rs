//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use stakeset_types::{AccountKey, Duty, PublicKey, ValidatorParams};

use crate::NodeError;

/// Where validator state is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// In-memory; state is lost on exit.
    Memory,
    /// LMDB environment under `data_dir`.
    Lmdb,
}

/// Configuration for a stakeset node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Data directory for the LMDB backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_store")]
    pub store: StoreBackend,

    /// LMDB map size in bytes.
    #[serde(default = "default_lmdb_map_size")]
    pub lmdb_map_size: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Validator parameters. Missing fields take their defaults.
    #[serde(default)]
    pub params: ValidatorParams,

    #[serde(default)]
    pub genesis: GenesisConfig,
}

/// Initial state of the in-process staking ledger and validator set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Validator inflation paid per inflation tick, in LINO.
    #[serde(default)]
    pub hourly_inflation_lino: i64,

    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,

    /// Validators registered when the store is first initialised.
    #[serde(default)]
    pub validators: Vec<GenesisValidator>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub username: AccountKey,
    pub stake_lino: i64,
    #[serde(default)]
    pub duty: Duty,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisValidator {
    pub username: AccountKey,
    pub pub_key: PublicKey,
    #[serde(default)]
    pub link: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./stakeset_data")
}

fn default_store() -> StoreBackend {
    StoreBackend::Memory
}

fn default_lmdb_map_size() -> usize {
    256 * 1024 * 1024
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: default_store(),
            lmdb_map_size: default_lmdb_map_size(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: ValidatorParams::default(),
            genesis: GenesisConfig::default(),
        }
    }
}
