//! Configuration for the multisig wallet

use crate::domain::errors::WalletResult;
use crate::domain::registry::PrincipalRegistry;
use serde::{Deserialize, Serialize};
use shared_types::entities::Address;

/// Wallet behaviour switches
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Evaluate quorum and execute inside every successful `approve`.
    /// The explicit `try_execute` trigger is available either way.
    pub auto_execute_on_approve: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            auto_execute_on_approve: true,
        }
    }
}

/// Construction input for the principal registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    /// Principals in the order `principal_at` reports them.
    pub principals: Vec<Address>,
    /// Distinct approvals required to execute.
    pub threshold: usize,
}

impl GenesisConfig {
    pub fn new(principals: Vec<Address>, threshold: usize) -> Self {
        Self {
            principals,
            threshold,
        }
    }

    /// Validate and build the registry.
    ///
    /// # Errors
    /// * `DuplicatePrincipal`, `InvalidQuorum`
    pub fn build_registry(&self) -> WalletResult<PrincipalRegistry> {
        PrincipalRegistry::new(self.principals.clone(), self.threshold)
    }
}
