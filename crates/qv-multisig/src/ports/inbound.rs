//! Inbound Ports (Driving Ports / API)
//!
//! Every mutating call takes the caller's identity explicitly. Authentication
//! is the host's job; the wallet only checks registry membership.

use crate::domain::entities::ProposalView;
use crate::domain::errors::WalletResult;
use crate::domain::value_objects::{ApprovalOutcome, ExecutionOutcome, ProposalId};
use shared_types::entities::{Address, Amount};

/// Primary multisig wallet API
///
/// All operations are synchronous and serialized with respect to each other.
/// A call that returns `Err` changed nothing.
pub trait MultisigApi: Send + Sync {
    /// Submit a transfer proposal.
    ///
    /// # Errors
    /// * `Unauthorized` - `proposer` is not a principal
    /// * `InvalidRecipient` - `recipient` is the null address
    fn propose(
        &self,
        proposer: Address,
        recipient: Address,
        amount: Amount,
        description: String,
    ) -> WalletResult<ProposalId>;

    /// Approve a proposal, then evaluate it for execution if the on-approve
    /// trigger is enabled.
    ///
    /// Re-approving is accepted and does not double count.
    ///
    /// # Errors
    /// * `Unauthorized`, `NotFound`, `AlreadyExecuted`
    /// * `TransferFailed` - quorum was reached but the ledger refused; the
    ///   approval recorded by this call is rolled back
    fn approve(&self, principal: Address, id: ProposalId) -> WalletResult<ApprovalOutcome>;

    /// Withdraw the caller's own approval. Returns `false` if there was none.
    ///
    /// # Errors
    /// * `Unauthorized`, `NotFound`, `AlreadyExecuted`
    fn revoke(&self, principal: Address, id: ProposalId) -> WalletResult<bool>;

    /// Withdraw `principal`'s approval on behalf of `caller`.
    ///
    /// Only a principal may revoke its own approval, so this fails with
    /// `Unauthorized` unless `caller == principal`.
    fn revoke_on_behalf(
        &self,
        caller: Address,
        principal: Address,
        id: ProposalId,
    ) -> WalletResult<bool>;

    /// Explicit execution trigger.
    ///
    /// Quorum not met and already executed are reported as outcomes, not
    /// errors.
    ///
    /// # Errors
    /// * `Unauthorized`, `NotFound`
    /// * `TransferFailed` - the proposal stays pending and may be retried
    fn try_execute(&self, caller: Address, id: ProposalId) -> WalletResult<ExecutionOutcome>;

    /// Read-only projection of a proposal.
    fn get_proposal(&self, id: ProposalId) -> WalletResult<ProposalView>;

    /// Current approval count.
    fn approval_count(&self, id: ProposalId) -> WalletResult<usize>;

    /// Whether `principal` currently approves proposal `id`.
    fn has_approved(&self, id: ProposalId, principal: &Address) -> WalletResult<bool>;

    fn is_executed(&self, id: ProposalId) -> WalletResult<bool>;

    /// Number of proposals ever created.
    fn proposal_count(&self) -> usize;

    fn is_principal(&self, identity: &Address) -> bool;

    fn principal_count(&self) -> usize;

    /// # Errors
    /// * `OutOfRange` - `index >= principal_count()`
    fn principal_at(&self, index: usize) -> WalletResult<Address>;

    /// Principals in construction order.
    fn principals(&self) -> Vec<Address>;

    fn threshold(&self) -> usize;
}
