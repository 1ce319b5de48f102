//! # QV-Multisig: Quorum Transfer Authorization
//!
//! A fixed set of principals jointly controls a treasury. Any principal may
//! propose a transfer; the transfer executes exactly once, after at least
//! `threshold` distinct principals approve it.
//!
//! ```text
//! propose ──→ [Pending] ──approve/revoke──→ [Pending]
//!                 │
//!                 └── approvals >= threshold ──→ ledger.transfer ──→ [Executed]
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: Principal registry, proposal store, approval sets, quorum rule, invariants
//! - **Ports**: Inbound (`MultisigApi`) and Outbound (`ValueTransferLedger`)
//! - **Application**: `MultisigService` and the execution engine
//! - **Adapters**: In-memory treasury ledger
//!
//! ## Concurrency
//!
//! Mutating calls are serialized by a single write lock held across the
//! quorum check, the ledger transfer and the executed flag, so concurrent
//! approvals can never pay a proposal out twice.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryLedger, TransferRecord};
pub use application::{ExecutionEngine, MultisigService};
pub use config::{GenesisConfig, WalletConfig};
pub use domain::entities::{Proposal, ProposalView};
pub use domain::errors::{TransferError, WalletError, WalletResult};
pub use domain::registry::PrincipalRegistry;
pub use domain::value_objects::{ApprovalOutcome, ExecutionOutcome, ProposalId, ProposalStatus};
pub use ports::inbound::MultisigApi;
pub use ports::outbound::{CorrelationId, TransferReceipt, TransferRequest, ValueTransferLedger};
