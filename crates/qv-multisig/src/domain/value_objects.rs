//! Value objects for the wallet domain

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a proposal.
///
/// Assigned by the proposal store in creation order, starting at zero and
/// never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub u64);

impl ProposalId {
    /// The first identifier handed out by a fresh store.
    pub const FIRST: ProposalId = ProposalId(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for ProposalId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a proposal.
///
/// ```text
/// Pending ──(approve / revoke)*──→ [quorum + transfer ok] ──→ Executed
/// ```
///
/// The transfer itself runs inside the wallet's critical section, so the
/// intermediate "executing" step is never observable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting approvals and revocations.
    Pending,
    /// Transfer performed. Terminal.
    Executed,
}

/// Result of an execution attempt.
///
/// Only `Executed` moved funds. The other two variants are the non-error
/// "nothing to do" conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    /// Quorum was met and the ledger accepted the transfer.
    Executed {
        /// Correlation id of the ledger transfer.
        correlation_id: Uuid,
    },
    /// Not enough approvals at the instant of the check.
    QuorumNotMet { approvals: usize, threshold: usize },
    /// The proposal had already been executed; nothing was transferred.
    AlreadyExecuted,
}

impl ExecutionOutcome {
    /// Whether this attempt performed the transfer.
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }
}

/// Result of a successful `approve` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    /// Approval count after the call.
    pub approvals: usize,
    /// False when the principal had already approved (re-approval is a no-op).
    pub newly_recorded: bool,
    /// Result of the on-approve execution trigger, if enabled.
    pub execution: Option<ExecutionOutcome>,
}

impl ApprovalOutcome {
    /// Whether this approval caused the proposal to execute.
    pub fn executed(&self) -> bool {
        self.execution.is_some_and(|e| e.is_executed())
    }
}
