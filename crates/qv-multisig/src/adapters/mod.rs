//! # Adapters Module
//!
//! - `ledger`: in-memory treasury implementing `ValueTransferLedger`

pub mod ledger;

pub use ledger::{InMemoryLedger, TransferRecord};
