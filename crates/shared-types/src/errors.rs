//! # Error Types
//!
//! Parse errors for the shared primitives.

use thiserror::Error;

/// Errors produced while parsing an [`Address`](crate::Address) from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input is not valid hexadecimal.
    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),

    /// The decoded input has the wrong number of bytes.
    #[error("Invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
