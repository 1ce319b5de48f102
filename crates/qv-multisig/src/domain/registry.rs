//! Principal registry
//!
//! The fixed, ordered set of identities allowed to propose, approve, revoke
//! and trigger execution, together with the quorum threshold. Both are set
//! once at construction and never change.

use super::errors::{WalletError, WalletResult};
use shared_types::entities::Address;
use std::collections::HashMap;

/// Registry of authorized principals and the quorum threshold.
///
/// Membership lookups go through a hash index; insertion order is kept for
/// `principal_at`.
#[derive(Clone, Debug)]
pub struct PrincipalRegistry {
    principals: Vec<Address>,
    index: HashMap<Address, usize>,
    threshold: usize,
}

impl PrincipalRegistry {
    /// Build a registry.
    ///
    /// # Errors
    /// * `DuplicatePrincipal` - an identity appears more than once
    /// * `InvalidQuorum` - `threshold` is zero or exceeds the principal count
    ///   (an empty list always fails here)
    pub fn new(principals: Vec<Address>, threshold: usize) -> WalletResult<Self> {
        let mut index = HashMap::with_capacity(principals.len());
        for (position, principal) in principals.iter().enumerate() {
            if index.insert(*principal, position).is_some() {
                return Err(WalletError::DuplicatePrincipal {
                    principal: *principal,
                });
            }
        }

        if threshold == 0 || threshold > principals.len() {
            return Err(WalletError::InvalidQuorum {
                threshold,
                principals: principals.len(),
            });
        }

        Ok(Self {
            principals,
            index,
            threshold,
        })
    }

    /// Check registry membership
    pub fn is_principal(&self, identity: &Address) -> bool {
        self.index.contains_key(identity)
    }

    /// Fail with `Unauthorized` unless `identity` is registered.
    pub fn ensure_principal(&self, identity: &Address) -> WalletResult<()> {
        if self.is_principal(identity) {
            Ok(())
        } else {
            Err(WalletError::Unauthorized { caller: *identity })
        }
    }

    pub fn principal_count(&self) -> usize {
        self.principals.len()
    }

    /// Principal at `index`, in construction order.
    pub fn principal_at(&self, index: usize) -> WalletResult<Address> {
        self.principals
            .get(index)
            .copied()
            .ok_or(WalletError::OutOfRange {
                index,
                count: self.principals.len(),
            })
    }

    /// Position of a principal in construction order.
    pub fn index_of(&self, identity: &Address) -> Option<usize> {
        self.index.get(identity).copied()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// All principals in construction order.
    pub fn principals(&self) -> &[Address] {
        &self.principals
    }

    /// Whether `approvals` distinct approvals satisfy the threshold.
    pub fn is_quorum(&self, approvals: usize) -> bool {
        approvals >= self.threshold
    }
}
