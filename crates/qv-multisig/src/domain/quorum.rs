//! Quorum evaluation
//!
//! Pure decision step of the execution engine. The approval count is read
//! from the proposal at the instant of the call, never cached.

use super::entities::Proposal;

/// What the execution engine should do with a proposal right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuorumCheck {
    /// Quorum met and not yet executed: transfer.
    Ready { approvals: usize },
    /// Not enough approvals.
    Pending { approvals: usize, threshold: usize },
    /// Already executed: never transfer again.
    Executed,
}

/// Evaluate `proposal` against `threshold`.
pub fn evaluate(proposal: &Proposal, threshold: usize) -> QuorumCheck {
    if proposal.is_executed() {
        return QuorumCheck::Executed;
    }

    let approvals = proposal.approval_count();
    if approvals >= threshold {
        QuorumCheck::Ready { approvals }
    } else {
        QuorumCheck::Pending {
            approvals,
            threshold,
        }
    }
}
