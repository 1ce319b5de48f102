//! Application layer for the multisig wallet

pub mod executor;
pub mod service;

#[cfg(test)]
mod proptests;

pub use executor::ExecutionEngine;
pub use service::MultisigService;
