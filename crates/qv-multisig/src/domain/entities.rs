//! Domain entities for the multisig wallet

use super::approvals::ApprovalSet;
use super::errors::{WalletError, WalletResult};
use super::value_objects::{ProposalId, ProposalStatus};
use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, Amount};
use uuid::Uuid;

/// A request to transfer value, with its approvals and execution state.
///
/// Owned exclusively by the [`ProposalStore`](super::store::ProposalStore).
/// Approvals may change only while the proposal is pending; once executed
/// the record is frozen.
#[derive(Clone, Debug)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: Address,
    pub recipient: Address,
    pub amount: Amount,
    pub description: String,
    approvals: ApprovalSet,
    executed: bool,
    /// Approval count observed when the transfer was committed
    approvals_at_execution: Option<usize>,
    /// Ledger correlation id of the transfer
    execution_id: Option<Uuid>,
}

impl Proposal {
    pub(crate) fn new(
        id: ProposalId,
        proposer: Address,
        recipient: Address,
        amount: Amount,
        description: String,
    ) -> Self {
        Self {
            id,
            proposer,
            recipient,
            amount,
            description,
            approvals: ApprovalSet::new(),
            executed: false,
            approvals_at_execution: None,
            execution_id: None,
        }
    }

    pub fn approvals(&self) -> &ApprovalSet {
        &self.approvals
    }

    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }

    pub fn status(&self) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else {
            ProposalStatus::Pending
        }
    }

    pub fn approvals_at_execution(&self) -> Option<usize> {
        self.approvals_at_execution
    }

    pub fn execution_id(&self) -> Option<Uuid> {
        self.execution_id
    }

    /// Add `principal` to the approvals. Returns `false` on re-approval.
    ///
    /// Registry membership is checked by the caller.
    pub(crate) fn record_approval(&mut self, principal: Address) -> WalletResult<bool> {
        self.ensure_pending()?;
        Ok(self.approvals.record(principal))
    }

    /// Remove `principal` from the approvals. Returns `false` if absent.
    pub(crate) fn withdraw_approval(&mut self, principal: &Address) -> WalletResult<bool> {
        self.ensure_pending()?;
        Ok(self.approvals.withdraw(principal))
    }

    /// Undo an approval recorded earlier in the same call.
    pub(crate) fn rollback_approval(&mut self, principal: &Address) {
        debug_assert!(!self.executed, "rollback after execution");
        self.approvals.withdraw(principal);
    }

    /// Freeze the proposal after the ledger accepted the transfer.
    pub(crate) fn mark_executed(&mut self, correlation_id: Uuid) {
        debug_assert!(!self.executed, "proposal executed twice");
        self.executed = true;
        self.approvals_at_execution = Some(self.approvals.len());
        self.execution_id = Some(correlation_id);
    }

    fn ensure_pending(&self) -> WalletResult<()> {
        if self.executed {
            Err(WalletError::AlreadyExecuted { id: self.id })
        } else {
            Ok(())
        }
    }

    /// Read-only projection for callers outside the wallet.
    pub fn view(&self) -> ProposalView {
        ProposalView {
            id: self.id,
            proposer: self.proposer,
            recipient: self.recipient,
            amount: self.amount,
            description: self.description.clone(),
            approvers: self.approvals.to_vec(),
            approval_count: self.approvals.len(),
            executed: self.executed,
            approvals_at_execution: self.approvals_at_execution,
        }
    }
}

/// Snapshot of a proposal returned by `get_proposal`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalView {
    pub id: ProposalId,
    pub proposer: Address,
    pub recipient: Address,
    pub amount: Amount,
    pub description: String,
    pub approvers: Vec<Address>,
    pub approval_count: usize,
    pub executed: bool,
    pub approvals_at_execution: Option<usize>,
}
