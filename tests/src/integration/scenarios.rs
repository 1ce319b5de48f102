//! # Wallet Scenarios
//!
//! End-to-end behaviour of one wallet wired to the in-memory treasury and the
//! event bus: three principals, quorum of two, treasury funded up front.

#[cfg(test)]
mod tests {
    use super::super::{principal, recipient, wallet, Wallet};
    use qv_multisig::{
        ExecutionOutcome, MultisigApi, ProposalId, TransferError, WalletConfig, WalletError,
    };
    use shared_types::entities::Amount;

    const TREASURY: u64 = 10_000;

    fn three_of_two() -> Wallet {
        wallet(3, 2, TREASURY, WalletConfig::default())
    }

    fn propose(wallet: &Wallet, amount: u64) -> ProposalId {
        wallet
            .propose(
                principal(1),
                recipient(1),
                Amount::from(amount),
                "Payment for services".to_string(),
            )
            .unwrap()
    }

    // =========================================================================
    // REGISTRY
    // =========================================================================

    #[test]
    fn test_initialized_with_principals_and_quorum() {
        let wallet = three_of_two();

        assert_eq!(wallet.principal_count(), 3);
        assert_eq!(wallet.threshold(), 2);
        for index in 0..3 {
            assert_eq!(
                wallet.principal_at(index).unwrap(),
                principal(index as u64 + 1)
            );
        }
    }

    // =========================================================================
    // PROPOSALS
    // =========================================================================

    #[test]
    fn test_new_proposal_is_pending_with_no_approvals() {
        let wallet = three_of_two();
        let id = propose(&wallet, 1_000);

        let view = wallet.get_proposal(id).unwrap();
        assert_eq!(view.id, ProposalId(0));
        assert_eq!(view.proposer, principal(1));
        assert_eq!(view.recipient, recipient(1));
        assert_eq!(view.amount, Amount::from(1_000u64));
        assert_eq!(view.description, "Payment for services");
        assert!(!view.executed);
        assert_eq!(view.approval_count, 0);
    }

    #[test]
    fn test_ids_increase_from_zero() {
        let wallet = three_of_two();
        let ids: Vec<_> = (0..4).map(|_| propose(&wallet, 1)).collect();

        assert_eq!(
            ids,
            vec![ProposalId(0), ProposalId(1), ProposalId(2), ProposalId(3)]
        );
        assert_eq!(wallet.proposal_count(), 4);
    }

    // =========================================================================
    // SCENARIO A: quorum reached on the second approval
    // =========================================================================

    #[test]
    fn test_scenario_a_transfer_on_quorum() {
        let wallet = three_of_two();
        let id = propose(&wallet, 1_000);

        let first = wallet.approve(principal(1), id).unwrap();
        assert_eq!(first.approvals, 1);
        assert!(!wallet.is_executed(id).unwrap());
        assert_eq!(wallet.ledger().balance_of(&recipient(1)), Amount::zero());

        let second = wallet.approve(principal(2), id).unwrap();
        assert_eq!(second.approvals, 2);
        assert!(second.executed());

        assert!(wallet.is_executed(id).unwrap());
        assert_eq!(
            wallet.ledger().balance_of(&recipient(1)),
            Amount::from(1_000u64)
        );
        assert_eq!(
            wallet.ledger().treasury_balance(),
            Amount::from(TREASURY - 1_000)
        );
    }

    // =========================================================================
    // SCENARIO B: nobody revokes another principal's approval
    // =========================================================================

    #[test]
    fn test_scenario_b_revocation_is_personal() {
        let wallet = three_of_two();
        let id = propose(&wallet, 1_000);
        wallet.approve(principal(1), id).unwrap();

        assert_eq!(
            wallet.revoke_on_behalf(principal(2), principal(1), id),
            Err(WalletError::Unauthorized {
                caller: principal(2)
            })
        );
        assert_eq!(wallet.get_proposal(id).unwrap().approvers, vec![principal(1)]);

        // The owner of the approval can still withdraw it
        assert!(wallet.revoke(principal(1), id).unwrap());
        assert_eq!(wallet.approval_count(id).unwrap(), 0);
    }

    // =========================================================================
    // SCENARIO C: executed proposals are frozen
    // =========================================================================

    #[test]
    fn test_scenario_c_no_approval_after_execution() {
        let wallet = three_of_two();
        let id = propose(&wallet, 1_000);
        wallet.approve(principal(1), id).unwrap();
        wallet.approve(principal(2), id).unwrap();

        assert_eq!(
            wallet.approve(principal(3), id),
            Err(WalletError::AlreadyExecuted { id })
        );
        assert_eq!(
            wallet.try_execute(principal(3), id).unwrap(),
            ExecutionOutcome::AlreadyExecuted
        );
        assert_eq!(wallet.ledger().transfer_count(), 1);
    }

    // =========================================================================
    // SCENARIO D: explicit trigger below quorum
    // =========================================================================

    #[test]
    fn test_scenario_d_explicit_trigger_is_noop() {
        let wallet = wallet(2, 2, TREASURY, WalletConfig::default());
        let id = propose(&wallet, 1_000);
        wallet.approve(principal(1), id).unwrap();

        assert!(matches!(
            wallet.try_execute(principal(1), id).unwrap(),
            ExecutionOutcome::QuorumNotMet {
                approvals: 1,
                threshold: 2
            }
        ));
        assert!(!wallet.is_executed(id).unwrap());
        assert_eq!(wallet.ledger().transfer_count(), 0);
    }

    // =========================================================================
    // REVOCATION
    // =========================================================================

    #[test]
    fn test_revoke_lowers_count_and_delays_execution() {
        let wallet = three_of_two();
        let id = propose(&wallet, 1_000);

        wallet.approve(principal(1), id).unwrap();
        wallet.revoke(principal(1), id).unwrap();
        let outcome = wallet.approve(principal(2), id).unwrap();

        assert_eq!(outcome.approvals, 1);
        assert!(!outcome.executed());

        wallet.approve(principal(3), id).unwrap();
        assert!(wallet.is_executed(id).unwrap());
        let view = wallet.get_proposal(id).unwrap();
        assert_eq!(view.approvers, vec![principal(2), principal(3)]);
    }

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================

    #[test]
    fn test_outsider_is_rejected_everywhere() {
        let wallet = three_of_two();
        let id = propose(&wallet, 1_000);
        let outsider = recipient(9);

        let unauthorized = Err(WalletError::Unauthorized { caller: outsider });
        assert_eq!(
            wallet
                .propose(outsider, recipient(1), Amount::one(), String::new())
                .map(|_| ()),
            unauthorized
        );
        assert_eq!(wallet.approve(outsider, id).map(|_| ()), unauthorized);
        assert_eq!(wallet.revoke(outsider, id).map(|_| ()), unauthorized);
        assert_eq!(wallet.try_execute(outsider, id).map(|_| ()), unauthorized);

        assert_eq!(wallet.proposal_count(), 1);
        assert_eq!(wallet.approval_count(id).unwrap(), 0);
    }

    // =========================================================================
    // TREASURY
    // =========================================================================

    #[test]
    fn test_underfunded_treasury_defers_execution() {
        let wallet = three_of_two();
        let id = propose(&wallet, TREASURY + 1);
        wallet.approve(principal(1), id).unwrap();

        let err = wallet.approve(principal(2), id).unwrap_err();
        assert_eq!(
            err,
            WalletError::TransferFailed {
                id,
                reason: TransferError::InsufficientFunds {
                    available: Amount::from(TREASURY),
                    requested: Amount::from(TREASURY + 1),
                },
            }
        );
        assert_eq!(wallet.approval_count(id).unwrap(), 1);

        wallet.ledger().deposit(Amount::one());
        wallet.approve(principal(2), id).unwrap();

        assert!(wallet.is_executed(id).unwrap());
        assert_eq!(wallet.ledger().treasury_balance(), Amount::zero());
    }

    #[test]
    fn test_manual_execution_mode() {
        let wallet = wallet(
            3,
            2,
            TREASURY,
            WalletConfig {
                auto_execute_on_approve: false,
            },
        );
        let id = propose(&wallet, 500);
        wallet.approve(principal(1), id).unwrap();
        wallet.approve(principal(2), id).unwrap();
        wallet.approve(principal(3), id).unwrap();
        assert!(!wallet.is_executed(id).unwrap());

        let outcome = wallet.try_execute(principal(3), id).unwrap();
        assert!(outcome.is_executed());
        assert_eq!(wallet.get_proposal(id).unwrap().approvals_at_execution, Some(3));
        assert_eq!(wallet.ledger().balance_of(&recipient(1)), Amount::from(500u64));
    }
}
