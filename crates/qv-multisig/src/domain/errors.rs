//! Error types for the multisig wallet

use super::value_objects::ProposalId;
use shared_types::entities::{Address, Amount};
use thiserror::Error;

/// All errors a wallet operation can report.
///
/// A call that returns one of these made no state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Caller is not allowed to perform the operation
    #[error("Unauthorized caller: {caller}")]
    Unauthorized { caller: Address },

    /// Unknown proposal id
    #[error("Proposal not found: {id}")]
    NotFound { id: ProposalId },

    /// Recipient is the null address
    #[error("Invalid recipient: the null address cannot receive transfers")]
    InvalidRecipient,

    /// Threshold outside 1..=principal count
    #[error("Invalid quorum: threshold {threshold} must be between 1 and {principals}")]
    InvalidQuorum { threshold: usize, principals: usize },

    /// Principal listed more than once at construction
    #[error("Duplicate principal: {principal}")]
    DuplicatePrincipal { principal: Address },

    /// Proposal is frozen after execution
    #[error("Proposal {id} already executed")]
    AlreadyExecuted { id: ProposalId },

    /// Principal index past the end of the registry
    #[error("Principal index {index} out of range (count {count})")]
    OutOfRange { index: usize, count: usize },

    /// Ledger refused the transfer; the proposal stays pending
    #[error("Transfer for proposal {id} failed: {reason}")]
    TransferFailed { id: ProposalId, reason: TransferError },
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

/// Failure reported by the value transfer ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: Amount, requested: Amount },

    #[error("rejected by ledger: {reason}")]
    Rejected { reason: String },
}
