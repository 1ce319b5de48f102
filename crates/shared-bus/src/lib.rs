//! # Shared Bus - Event Bus for Wallet Observability
//!
//! Carries the records the wallet emits when its state changes: proposal
//! creation, approvals, revocations and executions.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Wallet core  │                    │  Observer    │
//! │              │    publish()       │ (runtime,    │
//! │              │ ──────┐            │  tooling)    │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Publishing is synchronous and never blocks, so the wallet can publish from
//! inside its critical section and keep event order identical to commit order.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, WalletEvent};
pub use publisher::{EventPublisher, InMemoryEventBus, RecordingPublisher};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
