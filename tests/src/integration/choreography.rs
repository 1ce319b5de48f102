//! # Event Choreography
//!
//! What an observer on the shared bus sees while the wallet works:
//!
//! ```text
//! propose ──→ ProposalCreated   (Proposals)
//! approve ──→ ProposalApproved  (Approvals)
//! revoke  ──→ ApprovalRevoked   (Approvals)
//! quorum  ──→ ProposalExecuted  (Execution)
//! ```
//!
//! Events arrive in commit order, and failed calls publish nothing.

#[cfg(test)]
mod tests {
    use super::super::{principal, recipient, wallet};
    use futures::StreamExt;
    use qv_multisig::{ExecutionOutcome, MultisigApi, WalletConfig};
    use shared_bus::{EventFilter, EventPublisher, EventTopic, WalletEvent};
    use shared_types::entities::Amount;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_full_lifecycle_event_order() {
        let wallet = wallet(3, 2, 1_000, WalletConfig::default());
        let mut sub = wallet.publisher().subscribe(EventFilter::all());

        let id = wallet
            .propose(principal(1), recipient(1), Amount::from(100u64), "rent".into())
            .unwrap();
        wallet.approve(principal(1), id).unwrap();
        wallet.revoke(principal(1), id).unwrap();
        wallet.approve(principal(2), id).unwrap();
        let outcome = wallet.approve(principal(3), id).unwrap();

        let Some(ExecutionOutcome::Executed { correlation_id }) = outcome.execution else {
            panic!("expected execution, got {outcome:?}");
        };

        let events = sub.drain();
        assert_eq!(events.len(), 6);
        assert!(matches!(
            &events[0],
            WalletEvent::ProposalCreated { description, .. } if description == "rent"
        ));
        assert!(matches!(events[1], WalletEvent::ProposalApproved { approvals: 1, .. }));
        assert!(matches!(events[2], WalletEvent::ApprovalRevoked { approvals: 0, .. }));
        assert!(matches!(events[3], WalletEvent::ProposalApproved { approvals: 1, .. }));
        assert!(matches!(events[4], WalletEvent::ProposalApproved { approvals: 2, .. }));
        assert_eq!(
            events[5],
            WalletEvent::ProposalExecuted {
                proposal_id: 0,
                recipient: recipient(1),
                amount: Amount::from(100u64),
                correlation_id,
            }
        );

        // The ledger recorded the same correlation id
        assert_eq!(wallet.ledger().history()[0].correlation_id, correlation_id);
    }

    #[tokio::test]
    async fn test_execution_topic_subscriber() {
        let wallet = wallet(2, 1, 1_000, WalletConfig::default());
        let mut executions = wallet
            .publisher()
            .subscribe(EventFilter::topics(vec![EventTopic::Execution]));

        for n in 0..3 {
            let id = wallet
                .propose(principal(1), recipient(n), Amount::from(10u64), String::new())
                .unwrap();
            wallet.approve(principal(2), id).unwrap();
        }

        for expected in 0..3u64 {
            let event = timeout(Duration::from_secs(1), executions.recv())
                .await
                .expect("timed out waiting for execution")
                .expect("bus closed");
            assert_eq!(event.topic(), EventTopic::Execution);
            assert_eq!(event.proposal_id(), expected);
        }
        assert!(executions.try_recv().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_proposal_filter_stream() {
        let wallet = wallet(3, 2, 1_000, WalletConfig::default());
        let mut stream = wallet.publisher().event_stream(EventFilter::proposal(1));

        let first = wallet
            .propose(principal(1), recipient(1), Amount::one(), String::new())
            .unwrap();
        let second = wallet
            .propose(principal(2), recipient(2), Amount::one(), String::new())
            .unwrap();
        wallet.approve(principal(1), first).unwrap();
        wallet.approve(principal(3), second).unwrap();

        let created = timeout(Duration::from_secs(1), stream.next()).await.unwrap();
        assert!(matches!(
            created,
            Some(WalletEvent::ProposalCreated { proposal_id: 1, .. })
        ));
        let approved = timeout(Duration::from_secs(1), stream.next()).await.unwrap();
        assert!(matches!(
            approved,
            Some(WalletEvent::ProposalApproved {
                proposal_id: 1,
                approvals: 1,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_failed_calls_publish_nothing() {
        let wallet = wallet(3, 2, 5, WalletConfig::default());
        let id = wallet
            .propose(principal(1), recipient(1), Amount::from(50u64), String::new())
            .unwrap();
        wallet.approve(principal(1), id).unwrap();

        let mut sub = wallet.publisher().subscribe(EventFilter::all());
        let published_before = wallet.publisher().events_published();

        // Unauthorized, unknown id, ledger refusal, revoking someone else
        assert!(wallet.approve(recipient(7), id).is_err());
        assert!(wallet.approve(principal(2), id.next()).is_err());
        assert!(wallet.approve(principal(2), id).is_err());
        assert!(wallet
            .revoke_on_behalf(principal(3), principal(1), id)
            .is_err());

        assert!(sub.drain().is_empty());
        assert_eq!(wallet.publisher().events_published(), published_before);
    }

    #[tokio::test]
    async fn test_reapproval_and_empty_revoke_are_silent() {
        let wallet = wallet(3, 3, 1_000, WalletConfig::default());
        let id = wallet
            .propose(principal(1), recipient(1), Amount::one(), String::new())
            .unwrap();
        wallet.approve(principal(1), id).unwrap();

        let mut sub = wallet.publisher().subscribe(EventFilter::all());
        wallet.approve(principal(1), id).unwrap();
        wallet.revoke(principal(2), id).unwrap();

        assert!(sub.drain().is_empty());
    }
}
