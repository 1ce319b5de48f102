//! Domain invariants for the multisig wallet
//!
//! Checked with `debug_assert!` after every mutation and by the property
//! tests.

use super::entities::Proposal;
use super::registry::PrincipalRegistry;
use super::store::ProposalStore;
use super::value_objects::ProposalId;

/// INVARIANT-1: Registered Approvers
/// Every approver of a proposal is a registered principal.
pub fn invariant_approvals_registered(proposal: &Proposal, registry: &PrincipalRegistry) -> bool {
    proposal
        .approvals()
        .iter()
        .all(|principal| registry.is_principal(principal))
}

/// INVARIANT-2: Execution Needs Quorum
/// An executed proposal had at least `threshold` approvals when it executed.
/// Later approval counts are irrelevant (the set is frozen anyway).
pub fn invariant_executed_had_quorum(proposal: &Proposal, threshold: usize) -> bool {
    if !proposal.is_executed() {
        return proposal.approvals_at_execution().is_none();
    }

    proposal
        .approvals_at_execution()
        .is_some_and(|count| count >= threshold)
}

/// INVARIANT-3: Sequential Ids
/// Ids run 0, 1, 2, ... in creation order and the next id follows the last.
pub fn invariant_ids_sequential(store: &ProposalStore) -> bool {
    let mut expected = ProposalId::FIRST;
    for proposal in store.iter() {
        if proposal.id != expected {
            return false;
        }
        expected = expected.next();
    }
    store.next_id() == expected
}

/// All invariants over the whole store.
pub fn check_all(store: &ProposalStore, registry: &PrincipalRegistry) -> bool {
    invariant_ids_sequential(store)
        && store.iter().all(|proposal| {
            invariant_approvals_registered(proposal, registry)
                && invariant_executed_had_quorum(proposal, registry.threshold())
        })
}
