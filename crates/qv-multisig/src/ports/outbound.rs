//! Outbound Ports (Driven Ports / SPI)
//!
//! The wallet depends on one external collaborator: a ledger that moves value
//! out of the wallet's treasury.

use crate::domain::errors::TransferError;
use crate::domain::value_objects::ProposalId;
use shared_types::entities::{Address, Amount};
use uuid::Uuid;

/// Correlation ID for tracking a transfer across the ledger boundary
pub type CorrelationId = Uuid;

/// Transfer the execution engine asks the ledger to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub correlation_id: CorrelationId,
    pub proposal_id: ProposalId,
    pub recipient: Address,
    pub amount: Amount,
}

impl TransferRequest {
    /// Build a request with a fresh correlation id.
    pub fn new(proposal_id: ProposalId, recipient: Address, amount: Amount) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            proposal_id,
            recipient,
            amount,
        }
    }
}

/// Acknowledgement of a completed transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    pub correlation_id: CorrelationId,
}

/// Value transfer ledger
///
/// Must return a definitive answer before the wallet commits the execution:
/// `Ok` means the funds moved, `Err` means nothing moved.
///
/// Called while the wallet holds its write lock. Implementations must not
/// call back into the wallet.
pub trait ValueTransferLedger: Send + Sync {
    /// Move `request.amount` from the wallet treasury to `request.recipient`.
    fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, TransferError>;
}
