//! Proposal store
//!
//! Append-only record of every proposal, keyed by a monotonically increasing
//! identifier. Proposals are never deleted and ids are never reused.

use super::entities::Proposal;
use super::errors::{WalletError, WalletResult};
use super::registry::PrincipalRegistry;
use super::value_objects::ProposalId;
use shared_types::entities::{Address, Amount};
use std::collections::BTreeMap;

/// Every proposal ever created.
#[derive(Debug, Default)]
pub struct ProposalStore {
    proposals: BTreeMap<ProposalId, Proposal>,
    next_id: ProposalId,
}

impl ProposalStore {
    /// Create an empty store; the first id handed out is `ProposalId::FIRST`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a proposal and return its id.
    ///
    /// # Errors
    /// * `Unauthorized` - `proposer` is not in `registry`
    /// * `InvalidRecipient` - `recipient` is the null address
    pub fn propose(
        &mut self,
        registry: &PrincipalRegistry,
        proposer: Address,
        recipient: Address,
        amount: Amount,
        description: String,
    ) -> WalletResult<ProposalId> {
        registry.ensure_principal(&proposer)?;
        if recipient.is_zero() {
            return Err(WalletError::InvalidRecipient);
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.proposals
            .insert(id, Proposal::new(id, proposer, recipient, amount, description));

        Ok(id)
    }

    pub fn get(&self, id: ProposalId) -> WalletResult<&Proposal> {
        self.proposals.get(&id).ok_or(WalletError::NotFound { id })
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> WalletResult<&mut Proposal> {
        self.proposals
            .get_mut(&id)
            .ok_or(WalletError::NotFound { id })
    }

    /// The id the next proposal will receive.
    pub fn next_id(&self) -> ProposalId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Proposals in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}
