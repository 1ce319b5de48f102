//! # Runtime Configuration
//!
//! Resolution order: defaults, then an optional TOML file, then environment
//! overrides.
//!
//! ```toml
//! treasury_funding = "1000"
//! event_channel_capacity = 256
//!
//! [genesis]
//! principals = [
//!     "0x0000000000000000000000000000000000000001",
//!     "0x0000000000000000000000000000000000000002",
//! ]
//! threshold = 2
//!
//! [wallet]
//! auto_execute_on_approve = true
//! ```
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `QV_CONFIG` | path of the TOML file |
//! | `QV_PRINCIPALS` | `genesis.principals`, comma-separated hex |
//! | `QV_THRESHOLD` | `genesis.threshold` |
//! | `QV_TREASURY_FUNDING` | `treasury_funding`, decimal |
//! | `QV_AUTO_EXECUTE` | `wallet.auto_execute_on_approve` |

use qv_multisig::{GenesisConfig, WalletConfig};
use serde::{Deserialize, Serialize};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::entities::{Address, Amount};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const ENV_CONFIG: &str = "QV_CONFIG";
pub const ENV_PRINCIPALS: &str = "QV_PRINCIPALS";
pub const ENV_THRESHOLD: &str = "QV_THRESHOLD";
pub const ENV_TREASURY_FUNDING: &str = "QV_TREASURY_FUNDING";
pub const ENV_AUTO_EXECUTE: &str = "QV_AUTO_EXECUTE";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for {variable}: {reason}")]
    InvalidEnv { variable: &'static str, reason: String },
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Principal set and quorum threshold.
    pub genesis: GenesisConfig,
    /// Wallet behaviour.
    pub wallet: WalletConfig,
    /// Initial treasury balance of the in-memory ledger.
    #[serde(with = "decimal_amount")]
    pub treasury_funding: Amount,
    /// Buffered events per bus subscriber.
    pub event_channel_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            genesis: GenesisConfig::default(),
            wallet: WalletConfig::default(),
            treasury_funding: Amount::zero(),
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `QV_*` overrides.
    ///
    /// `lookup` resolves a variable name; pass `|k| std::env::var(k).ok()` for
    /// the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(list) = lookup(ENV_PRINCIPALS) {
            self.genesis.principals = parse_principals(&list)?;
            info!(count = self.genesis.principals.len(), "Loaded principals from environment");
        }

        if let Some(raw) = lookup(ENV_THRESHOLD) {
            self.genesis.threshold = raw.trim().parse().map_err(|e| ConfigError::InvalidEnv {
                variable: ENV_THRESHOLD,
                reason: format!("{e}"),
            })?;
        }

        if let Some(raw) = lookup(ENV_TREASURY_FUNDING) {
            self.treasury_funding =
                Amount::from_dec_str(raw.trim()).map_err(|e| ConfigError::InvalidEnv {
                    variable: ENV_TREASURY_FUNDING,
                    reason: format!("{e:?}"),
                })?;
        }

        if let Some(raw) = lookup(ENV_AUTO_EXECUTE) {
            self.wallet.auto_execute_on_approve = parse_flag(&raw).ok_or_else(|| {
                ConfigError::InvalidEnv {
                    variable: ENV_AUTO_EXECUTE,
                    reason: format!("expected true/false, got {raw:?}"),
                }
            })?;
        }

        Ok(())
    }

    /// Resolve the full configuration from `lookup`.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => {
                info!(path = %path, "Loading configuration file");
                Self::load(path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }
}

fn parse_principals(list: &str) -> Result<Vec<Address>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Address>().map_err(|e| ConfigError::InvalidEnv {
                variable: ENV_PRINCIPALS,
                reason: format!("{s}: {e}"),
            })
        })
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Amounts are written as decimal strings; U256 does not fit a TOML integer.
mod decimal_amount {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use shared_types::entities::Amount;

    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Amount::from_dec_str(&raw).map_err(|e| de::Error::custom(format!("{e:?}")))
    }
}
