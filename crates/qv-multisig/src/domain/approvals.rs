//! Approval ledger
//!
//! Per-proposal set of principals that currently approve it. Set semantics:
//! a principal is counted at most once no matter how often it approves.

use serde::{Deserialize, Serialize};
use shared_types::entities::Address;
use std::collections::BTreeSet;

/// Approvals recorded for one proposal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalSet {
    approvers: BTreeSet<Address>,
}

impl ApprovalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an approval. Returns `false` if it was already present.
    pub fn record(&mut self, principal: Address) -> bool {
        self.approvers.insert(principal)
    }

    /// Remove an approval. Returns `false` if there was none.
    pub fn withdraw(&mut self, principal: &Address) -> bool {
        self.approvers.remove(principal)
    }

    pub fn contains(&self, principal: &Address) -> bool {
        self.approvers.contains(principal)
    }

    /// Number of distinct approvers
    pub fn len(&self) -> usize {
        self.approvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approvers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.approvers.iter()
    }

    /// Approvers in ascending address order.
    pub fn to_vec(&self) -> Vec<Address> {
        self.approvers.iter().copied().collect()
    }
}
