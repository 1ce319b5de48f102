//! # Wallet Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Events are published only after the state change they describe has
//! committed. A failed call never produces an event.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, Amount};
use uuid::Uuid;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEvent {
    // =========================================================================
    // PROPOSAL STORE
    // =========================================================================
    /// A principal created a new transfer proposal.
    ProposalCreated {
        /// Identifier assigned by the proposal store.
        proposal_id: u64,
        /// The principal that submitted the proposal.
        proposer: Address,
        /// Destination of the transfer.
        recipient: Address,
        /// Value to transfer.
        amount: Amount,
        /// Free-form metadata.
        description: String,
    },

    // =========================================================================
    // APPROVAL LEDGER
    // =========================================================================
    /// A principal's approval was recorded for the first time.
    ProposalApproved {
        proposal_id: u64,
        principal: Address,
        /// Approval count after the change.
        approvals: usize,
    },

    /// A principal withdrew a previously recorded approval.
    ApprovalRevoked {
        proposal_id: u64,
        principal: Address,
        /// Approval count after the change.
        approvals: usize,
    },

    // =========================================================================
    // EXECUTION ENGINE
    // =========================================================================
    /// Quorum was reached and the transfer was accepted by the ledger.
    ProposalExecuted {
        proposal_id: u64,
        recipient: Address,
        amount: Amount,
        /// Correlation id of the ledger transfer.
        correlation_id: Uuid,
    },
}

impl WalletEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ProposalCreated { .. } => EventTopic::Proposals,
            Self::ProposalApproved { .. } | Self::ApprovalRevoked { .. } => EventTopic::Approvals,
            Self::ProposalExecuted { .. } => EventTopic::Execution,
        }
    }

    /// Get the proposal this event refers to.
    #[must_use]
    pub fn proposal_id(&self) -> u64 {
        match self {
            Self::ProposalCreated { proposal_id, .. }
            | Self::ProposalApproved { proposal_id, .. }
            | Self::ApprovalRevoked { proposal_id, .. }
            | Self::ProposalExecuted { proposal_id, .. } => *proposal_id,
        }
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Proposal creation.
    Proposals,
    /// Approve / revoke activity.
    Approvals,
    /// Transfers performed by the execution engine.
    Execution,
    /// All events (wildcard).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include (empty = all topics).
    pub topics: Vec<EventTopic>,
    /// Proposals to include (empty = all proposals).
    pub proposal_ids: Vec<u64>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self {
            topics: vec![EventTopic::All],
            proposal_ids: Vec::new(),
        }
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            proposal_ids: Vec::new(),
        }
    }

    /// Create a filter that follows a single proposal.
    #[must_use]
    pub fn proposal(proposal_id: u64) -> Self {
        Self {
            topics: Vec::new(),
            proposal_ids: vec![proposal_id],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &WalletEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let proposal_match =
            self.proposal_ids.is_empty() || self.proposal_ids.contains(&event.proposal_id());

        topic_match && proposal_match
    }
}
