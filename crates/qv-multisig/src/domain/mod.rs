//! Domain module for the multisig wallet
//!
//! ## Core Modules
//! - registry: fixed principal set and quorum threshold
//! - store: append-only proposal records
//! - approvals: per-proposal approval set
//! - quorum: pure execution decision
//! - invariants: checks over the whole state

pub mod approvals;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod quorum;
pub mod registry;
pub mod store;
pub mod value_objects;

pub use approvals::ApprovalSet;
pub use entities::{Proposal, ProposalView};
pub use errors::{TransferError, WalletError, WalletResult};
pub use quorum::{evaluate, QuorumCheck};
pub use registry::PrincipalRegistry;
pub use store::ProposalStore;
pub use value_objects::{ApprovalOutcome, ExecutionOutcome, ProposalId, ProposalStatus};
