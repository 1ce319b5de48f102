//! Property-based tests for the wallet service
//!
//! Random sequences of propose / approve / revoke / execute calls from
//! principals and outsiders. After every step:
//! - all domain invariants hold
//! - no proposal has been paid out more than once
//! - a failed call left the observable state untouched

use super::service::MultisigService;
use crate::adapters::ledger::InMemoryLedger;
use crate::config::{GenesisConfig, WalletConfig};
use crate::domain::value_objects::ProposalId;
use crate::ports::inbound::MultisigApi;
use proptest::prelude::*;
use shared_bus::RecordingPublisher;
use shared_types::entities::{Address, Amount};
use std::collections::HashMap;
use std::sync::Arc;

const PRINCIPALS: u64 = 4;

#[derive(Clone, Debug)]
enum Op {
    Propose { caller: u64, amount: u64 },
    Approve { caller: u64, id: u64 },
    Revoke { caller: u64, id: u64 },
    Execute { caller: u64, id: u64 },
    Deposit { amount: u64 },
}

// Callers 1..=PRINCIPALS are registered, PRINCIPALS + 1 is an outsider
fn op_strategy() -> impl Strategy<Value = Op> {
    let caller = 1u64..=PRINCIPALS + 1;
    prop_oneof![
        (caller.clone(), 0u64..40).prop_map(|(caller, amount)| Op::Propose { caller, amount }),
        (caller.clone(), 0u64..6).prop_map(|(caller, id)| Op::Approve { caller, id }),
        (caller.clone(), 0u64..6).prop_map(|(caller, id)| Op::Revoke { caller, id }),
        (caller, 0u64..6).prop_map(|(caller, id)| Op::Execute { caller, id }),
        (0u64..60).prop_map(|amount| Op::Deposit { amount }),
    ]
}

fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

type Snapshot = Vec<(usize, bool)>;

fn snapshot(service: &MultisigService<InMemoryLedger, RecordingPublisher>) -> Snapshot {
    (0..service.proposal_count() as u64)
        .filter_map(|id| service.get_proposal(ProposalId(id)).ok())
        .map(|view| (view.approval_count, view.executed))
        .collect()
}

proptest! {
    #[test]
    fn prop_random_operations_preserve_invariants(
        threshold in 1usize..=PRINCIPALS as usize,
        auto_execute in any::<bool>(),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let genesis = GenesisConfig::new((1..=PRINCIPALS).map(addr).collect(), threshold);
        let service = MultisigService::from_genesis(
            &genesis,
            WalletConfig { auto_execute_on_approve: auto_execute },
            Arc::new(InMemoryLedger::with_balance(Amount::from(50u64))),
            Arc::new(RecordingPublisher::new()),
        ).unwrap();

        for op in ops {
            let before = snapshot(&service);
            let events_before = service.publisher().events().len();

            let failed = match op {
                Op::Propose { caller, amount } => service
                    .propose(addr(caller), addr(0xFF), Amount::from(amount), String::new())
                    .is_err(),
                Op::Approve { caller, id } => service.approve(addr(caller), ProposalId(id)).is_err(),
                Op::Revoke { caller, id } => service.revoke(addr(caller), ProposalId(id)).is_err(),
                Op::Execute { caller, id } => service.try_execute(addr(caller), ProposalId(id)).is_err(),
                Op::Deposit { amount } => {
                    service.ledger().deposit(Amount::from(amount));
                    false
                }
            };

            if failed {
                prop_assert_eq!(&snapshot(&service), &before);
                prop_assert_eq!(service.publisher().events().len(), events_before);
            }

            prop_assert!(service.check_invariants());

            let mut payouts: HashMap<ProposalId, usize> = HashMap::new();
            for record in service.ledger().history() {
                *payouts.entry(record.proposal_id).or_default() += 1;
            }
            prop_assert!(payouts.values().all(|count| *count == 1));
            for id in payouts.keys() {
                prop_assert!(service.is_executed(*id).unwrap());
            }
        }

        let executed = snapshot(&service).iter().filter(|(_, executed)| *executed).count();
        prop_assert_eq!(executed, service.ledger().transfer_count());
    }
}
