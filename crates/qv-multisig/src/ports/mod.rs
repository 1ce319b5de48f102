//! Ports module for the multisig wallet

pub mod inbound;
pub mod outbound;

pub use inbound::MultisigApi;
pub use outbound::{CorrelationId, TransferReceipt, TransferRequest, ValueTransferLedger};
