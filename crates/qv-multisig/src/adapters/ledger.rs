//! In-memory value transfer ledger
//!
//! Holds the wallet treasury and the balances of every recipient paid so far.
//! Used by the runtime host and by tests that need real fund movement.

use crate::domain::errors::TransferError;
use crate::domain::value_objects::ProposalId;
use crate::ports::outbound::{CorrelationId, TransferReceipt, TransferRequest, ValueTransferLedger};
use parking_lot::Mutex;
use serde::Serialize;
use shared_types::entities::{Address, Amount};
use std::collections::HashMap;
use tracing::{debug, info};

/// A completed transfer out of the treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub correlation_id: CorrelationId,
    pub proposal_id: ProposalId,
    pub recipient: Address,
    pub amount: Amount,
}

#[derive(Debug, Default)]
struct LedgerState {
    treasury: Amount,
    balances: HashMap<Address, Amount>,
    history: Vec<TransferRecord>,
    /// Set while the ledger refuses every transfer.
    halted: Option<String>,
}

/// In-memory implementation of `ValueTransferLedger`
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Empty treasury.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treasury pre-funded with `balance`.
    pub fn with_balance(balance: Amount) -> Self {
        let ledger = Self::new();
        ledger.state.lock().treasury = balance;
        ledger
    }

    /// Fund the treasury. Returns the new balance, saturating at `U256::MAX`.
    pub fn deposit(&self, amount: Amount) -> Amount {
        let mut state = self.state.lock();
        state.treasury = state.treasury.saturating_add(amount);
        debug!(amount = %amount, treasury = %state.treasury, "Treasury funded");
        state.treasury
    }

    pub fn treasury_balance(&self) -> Amount {
        self.state.lock().treasury
    }

    /// Total received by `address` through executed transfers.
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.state
            .lock()
            .balances
            .get(address)
            .copied()
            .unwrap_or_default()
    }

    /// Completed transfers, oldest first.
    pub fn history(&self) -> Vec<TransferRecord> {
        self.state.lock().history.clone()
    }

    pub fn transfer_count(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Refuse every transfer with `reason` until `resume` is called.
    pub fn halt(&self, reason: impl Into<String>) {
        self.state.lock().halted = Some(reason.into());
    }

    pub fn resume(&self) {
        self.state.lock().halted = None;
    }
}

impl ValueTransferLedger for InMemoryLedger {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        let mut state = self.state.lock();

        if let Some(reason) = &state.halted {
            return Err(TransferError::Rejected {
                reason: reason.clone(),
            });
        }

        if request.amount > state.treasury {
            return Err(TransferError::InsufficientFunds {
                available: state.treasury,
                requested: request.amount,
            });
        }

        state.treasury -= request.amount;
        let credited = state.balances.entry(request.recipient).or_default();
        *credited = credited.saturating_add(request.amount);
        state.history.push(TransferRecord {
            correlation_id: request.correlation_id,
            proposal_id: request.proposal_id,
            recipient: request.recipient,
            amount: request.amount,
        });

        info!(
            correlation_id = %request.correlation_id,
            recipient = %request.recipient,
            amount = %request.amount,
            treasury = %state.treasury,
            "Transfer settled"
        );

        Ok(TransferReceipt {
            correlation_id: request.correlation_id,
        })
    }
}
