//! Execution engine
//!
//! Turns a quorum decision into exactly one ledger transfer. The caller must
//! hold the wallet's write lock for the whole call: the check, the transfer
//! and the state flip form one critical section.

use crate::domain::entities::Proposal;
use crate::domain::errors::{WalletError, WalletResult};
use crate::domain::quorum::{evaluate, QuorumCheck};
use crate::domain::value_objects::ExecutionOutcome;
use crate::ports::outbound::{TransferRequest, ValueTransferLedger};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ExecutionEngine<L: ValueTransferLedger> {
    ledger: Arc<L>,
}

impl<L: ValueTransferLedger> ExecutionEngine<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Execute `proposal` if it has quorum and has not executed yet.
    ///
    /// The proposal is marked executed only after the ledger confirms the
    /// transfer. On ledger failure it is left untouched so a later attempt
    /// can retry.
    pub fn try_execute(
        &self,
        proposal: &mut Proposal,
        threshold: usize,
    ) -> WalletResult<ExecutionOutcome> {
        let approvals = match evaluate(proposal, threshold) {
            QuorumCheck::Executed => {
                debug!(proposal_id = %proposal.id, "Already executed, nothing to do");
                return Ok(ExecutionOutcome::AlreadyExecuted);
            }
            QuorumCheck::Pending {
                approvals,
                threshold,
            } => {
                debug!(
                    proposal_id = %proposal.id,
                    approvals,
                    threshold,
                    "Quorum not met"
                );
                return Ok(ExecutionOutcome::QuorumNotMet {
                    approvals,
                    threshold,
                });
            }
            QuorumCheck::Ready { approvals } => approvals,
        };

        let request = TransferRequest::new(proposal.id, proposal.recipient, proposal.amount);

        match self.ledger.transfer(&request) {
            Ok(receipt) => {
                proposal.mark_executed(receipt.correlation_id);
                info!(
                    proposal_id = %proposal.id,
                    recipient = %proposal.recipient,
                    amount = %proposal.amount,
                    approvals,
                    correlation_id = %receipt.correlation_id,
                    "Proposal executed"
                );
                Ok(ExecutionOutcome::Executed {
                    correlation_id: receipt.correlation_id,
                })
            }
            Err(reason) => {
                warn!(
                    proposal_id = %proposal.id,
                    error = %reason,
                    "Ledger rejected transfer, proposal stays pending"
                );
                Err(WalletError::TransferFailed {
                    id: proposal.id,
                    reason,
                })
            }
        }
    }
}
