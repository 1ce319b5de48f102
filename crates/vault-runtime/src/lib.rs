//! # Vault Runtime Library
//!
//! Exposes the runtime's modules for testing. The entry point is the
//! `main.rs` binary.
//!
//! - `config/` - defaults, TOML file and `QV_*` environment overrides
//! - `container/` - wallet, ledger and bus wiring
//! - `commands/` - script parsing and replay
//! - `observer/` - logs bus events as they arrive

pub mod commands;
pub mod config;
pub mod container;
pub mod observer;

pub use commands::{replay, Command, CommandError, LineReport};
pub use config::{ConfigError, RuntimeConfig};
pub use container::{VaultContainer, VaultService};
pub use observer::EventLogger;
