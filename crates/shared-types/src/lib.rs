//! # Shared Types Crate
//!
//! Primitives used across the Quorum-Vault workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: principals, recipients and amounts are typed
//!   here once and reused by every crate.
//! - **Null Is Explicit**: the all-zero [`Address`] is the null identity and is
//!   never a valid transfer destination.
//! - **Non-Negative Value**: [`Amount`] is an unsigned 256-bit integer, so a
//!   negative transfer cannot be expressed.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
