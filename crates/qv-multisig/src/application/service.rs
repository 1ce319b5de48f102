//! Multisig Wallet Service
//!
//! Main service implementing `MultisigApi`.
//!
//! One write lock covers the proposal store. Every mutating call holds it
//! from its first check until its last state change, so the
//! check → transfer → mark sequence of an execution cannot interleave with
//! another approval, revocation or execution.

use crate::application::executor::ExecutionEngine;
use crate::config::{GenesisConfig, WalletConfig};
use crate::domain::entities::{Proposal, ProposalView};
use crate::domain::errors::{WalletError, WalletResult};
use crate::domain::invariants;
use crate::domain::registry::PrincipalRegistry;
use crate::domain::store::ProposalStore;
use crate::domain::value_objects::{ApprovalOutcome, ExecutionOutcome, ProposalId};
use crate::ports::inbound::MultisigApi;
use crate::ports::outbound::ValueTransferLedger;
use parking_lot::RwLock;
use shared_bus::{EventPublisher, WalletEvent};
use shared_types::entities::{Address, Amount};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mutable wallet state guarded by the service lock.
#[derive(Debug, Default)]
struct WalletState {
    store: ProposalStore,
}

/// Multisig Wallet Service
///
/// Generic over the ledger it pays out through and the bus it reports to.
pub struct MultisigService<L: ValueTransferLedger, P: EventPublisher> {
    config: WalletConfig,
    /// Immutable after construction, read without the lock.
    registry: PrincipalRegistry,
    state: RwLock<WalletState>,
    engine: ExecutionEngine<L>,
    publisher: Arc<P>,
}

impl<L: ValueTransferLedger, P: EventPublisher> MultisigService<L, P> {
    /// Create a service around an already validated registry.
    pub fn new(
        registry: PrincipalRegistry,
        config: WalletConfig,
        ledger: Arc<L>,
        publisher: Arc<P>,
    ) -> Self {
        info!(
            principals = registry.principal_count(),
            threshold = registry.threshold(),
            auto_execute = config.auto_execute_on_approve,
            "Multisig wallet initialized"
        );

        Self {
            config,
            registry,
            state: RwLock::new(WalletState::default()),
            engine: ExecutionEngine::new(ledger),
            publisher,
        }
    }

    /// Validate `genesis` and create the service.
    ///
    /// # Errors
    /// * `DuplicatePrincipal`, `InvalidQuorum`
    pub fn from_genesis(
        genesis: &GenesisConfig,
        config: WalletConfig,
        ledger: Arc<L>,
        publisher: Arc<P>,
    ) -> WalletResult<Self> {
        let registry = genesis.build_registry()?;
        Ok(Self::new(registry, config, ledger, publisher))
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn registry(&self) -> &PrincipalRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &Arc<L> {
        self.engine.ledger()
    }

    pub fn publisher(&self) -> &Arc<P> {
        &self.publisher
    }

    /// Run every domain invariant over the current state.
    pub fn check_invariants(&self) -> bool {
        invariants::check_all(&self.state.read().store, &self.registry)
    }

    fn authorize(&self, caller: &Address, operation: &'static str) -> WalletResult<()> {
        self.registry.ensure_principal(caller).inspect_err(|_| {
            warn!(caller = %caller, operation, "Rejected call from non-principal");
        })
    }

    fn publish_executed(&self, proposal: &Proposal, outcome: &ExecutionOutcome) {
        if let ExecutionOutcome::Executed { correlation_id } = outcome {
            self.publisher.publish(WalletEvent::ProposalExecuted {
                proposal_id: proposal.id.value(),
                recipient: proposal.recipient,
                amount: proposal.amount,
                correlation_id: *correlation_id,
            });
        }
    }

    fn read_proposal<T>(
        &self,
        id: ProposalId,
        f: impl FnOnce(&Proposal) -> T,
    ) -> WalletResult<T> {
        let state = self.state.read();
        state.store.get(id).map(f)
    }

    fn withdraw(&self, principal: Address, id: ProposalId) -> WalletResult<bool> {
        let mut state = self.state.write();
        let proposal = state.store.get_mut(id)?;

        let removed = proposal.withdraw_approval(&principal)?;
        let approvals = proposal.approval_count();

        if removed {
            debug!(proposal_id = %id, principal = %principal, approvals, "Approval revoked");
            self.publisher.publish(WalletEvent::ApprovalRevoked {
                proposal_id: id.value(),
                principal,
                approvals,
            });
        } else {
            debug!(proposal_id = %id, principal = %principal, "Nothing to revoke");
        }

        debug_assert!(invariants::check_all(&state.store, &self.registry));
        Ok(removed)
    }
}

impl<L: ValueTransferLedger, P: EventPublisher> MultisigApi for MultisigService<L, P> {
    fn propose(
        &self,
        proposer: Address,
        recipient: Address,
        amount: Amount,
        description: String,
    ) -> WalletResult<ProposalId> {
        self.authorize(&proposer, "propose")?;

        let mut state = self.state.write();
        let id = state.store.propose(
            &self.registry,
            proposer,
            recipient,
            amount,
            description.clone(),
        )?;

        info!(
            proposal_id = %id,
            proposer = %proposer,
            recipient = %recipient,
            amount = %amount,
            "Proposal created"
        );

        self.publisher.publish(WalletEvent::ProposalCreated {
            proposal_id: id.value(),
            proposer,
            recipient,
            amount,
            description,
        });

        debug_assert!(invariants::check_all(&state.store, &self.registry));
        Ok(id)
    }

    fn approve(&self, principal: Address, id: ProposalId) -> WalletResult<ApprovalOutcome> {
        self.authorize(&principal, "approve")?;

        let threshold = self.registry.threshold();
        let mut state = self.state.write();
        let proposal = state.store.get_mut(id)?;

        let newly_recorded = proposal.record_approval(principal)?;
        let approvals = proposal.approval_count();
        debug!(
            proposal_id = %id,
            principal = %principal,
            approvals,
            threshold,
            newly_recorded,
            "Approval recorded"
        );

        let execution = if self.config.auto_execute_on_approve {
            match self.engine.try_execute(proposal, threshold) {
                Ok(outcome) => Some(outcome),
                Err(err) => {
                    if newly_recorded {
                        proposal.rollback_approval(&principal);
                    }
                    return Err(err);
                }
            }
        } else {
            None
        };

        if newly_recorded {
            self.publisher.publish(WalletEvent::ProposalApproved {
                proposal_id: id.value(),
                principal,
                approvals,
            });
        }
        if let Some(outcome) = &execution {
            self.publish_executed(proposal, outcome);
        }

        debug_assert!(invariants::check_all(&state.store, &self.registry));
        Ok(ApprovalOutcome {
            approvals,
            newly_recorded,
            execution,
        })
    }

    fn revoke(&self, principal: Address, id: ProposalId) -> WalletResult<bool> {
        self.authorize(&principal, "revoke")?;
        self.withdraw(principal, id)
    }

    fn revoke_on_behalf(
        &self,
        caller: Address,
        principal: Address,
        id: ProposalId,
    ) -> WalletResult<bool> {
        self.authorize(&caller, "revoke")?;
        if caller != principal {
            warn!(
                caller = %caller,
                principal = %principal,
                proposal_id = %id,
                "Only a principal may revoke its own approval"
            );
            return Err(WalletError::Unauthorized { caller });
        }
        self.withdraw(principal, id)
    }

    fn try_execute(&self, caller: Address, id: ProposalId) -> WalletResult<ExecutionOutcome> {
        self.authorize(&caller, "execute")?;

        let threshold = self.registry.threshold();
        let mut state = self.state.write();
        let proposal = state.store.get_mut(id)?;

        let outcome = self.engine.try_execute(proposal, threshold)?;
        self.publish_executed(proposal, &outcome);

        debug_assert!(invariants::check_all(&state.store, &self.registry));
        Ok(outcome)
    }

    fn get_proposal(&self, id: ProposalId) -> WalletResult<ProposalView> {
        self.read_proposal(id, Proposal::view)
    }

    fn approval_count(&self, id: ProposalId) -> WalletResult<usize> {
        self.read_proposal(id, Proposal::approval_count)
    }

    fn has_approved(&self, id: ProposalId, principal: &Address) -> WalletResult<bool> {
        self.read_proposal(id, |p| p.approvals().contains(principal))
    }

    fn is_executed(&self, id: ProposalId) -> WalletResult<bool> {
        self.read_proposal(id, Proposal::is_executed)
    }

    fn proposal_count(&self) -> usize {
        self.state.read().store.len()
    }

    fn is_principal(&self, identity: &Address) -> bool {
        self.registry.is_principal(identity)
    }

    fn principal_count(&self) -> usize {
        self.registry.principal_count()
    }

    fn principal_at(&self, index: usize) -> WalletResult<Address> {
        self.registry.principal_at(index)
    }

    fn principals(&self) -> Vec<Address> {
        self.registry.principals().to_vec()
    }

    fn threshold(&self) -> usize {
        self.registry.threshold()
    }
}
