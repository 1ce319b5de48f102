//! # Vault Container
//!
//! Wires the wallet to its collaborators:
//!
//! ```text
//! MultisigService ──transfer──→ InMemoryLedger (treasury)
//!        │
//!        └──publish──→ InMemoryEventBus ──→ subscribers
//! ```

use std::sync::Arc;

use qv_multisig::{InMemoryLedger, MultisigService, WalletResult};
use shared_bus::InMemoryEventBus;
use tracing::info;

use crate::config::RuntimeConfig;

/// Concrete wallet type used by the runtime.
pub type VaultService = MultisigService<InMemoryLedger, InMemoryEventBus>;

/// Holds the wallet and the infrastructure it was built with.
pub struct VaultContainer {
    /// The wallet itself.
    pub wallet: Arc<VaultService>,

    /// Treasury the wallet pays out from.
    pub ledger: Arc<InMemoryLedger>,

    /// Event bus the wallet reports to.
    pub event_bus: Arc<InMemoryEventBus>,

    /// Configuration (immutable after initialization).
    pub config: RuntimeConfig,
}

impl VaultContainer {
    /// Build the container.
    ///
    /// # Errors
    /// * `DuplicatePrincipal`, `InvalidQuorum` from the genesis configuration
    pub fn new(config: RuntimeConfig) -> WalletResult<Self> {
        let event_bus = Arc::new(InMemoryEventBus::with_capacity(
            config.event_channel_capacity,
        ));

        let ledger = Arc::new(InMemoryLedger::new());
        if !config.treasury_funding.is_zero() {
            ledger.deposit(config.treasury_funding);
        }

        let wallet = Arc::new(MultisigService::from_genesis(
            &config.genesis,
            config.wallet.clone(),
            Arc::clone(&ledger),
            Arc::clone(&event_bus),
        )?);

        info!(
            treasury = %ledger.treasury_balance(),
            event_capacity = event_bus.capacity(),
            "Vault container ready"
        );

        Ok(Self {
            wallet,
            ledger,
            event_bus,
            config,
        })
    }
}
