//! # Runtime Flow
//!
//! Configuration file → container → script replay → bus, the way the
//! `vault-runtime` binary runs them.

#[cfg(test)]
mod tests {
    use super::super::{principal, recipient};
    use qv_multisig::{MultisigApi, ProposalId, WalletError};
    use shared_types::entities::Amount;
    use std::collections::HashMap;
    use tokio::sync::watch;
    use vault_runtime::{replay, CommandError, EventLogger, RuntimeConfig, VaultContainer};

    const CONFIG: &str = r#"
        treasury_funding = "10000"
        event_channel_capacity = 64

        [genesis]
        principals = [
            "0x0000000000000000000000000000000000000001",
            "0x0000000000000000000000000000000000000002",
            "0x0000000000000000000000000000000000000003",
        ]
        threshold = 2
    "#;

    fn container() -> VaultContainer {
        VaultContainer::new(RuntimeConfig::parse(CONFIG).unwrap()).unwrap()
    }

    #[test]
    fn test_config_builds_wallet() {
        let container = container();

        assert_eq!(container.wallet.principal_count(), 3);
        assert_eq!(container.wallet.threshold(), 2);
        assert_eq!(container.ledger.treasury_balance(), Amount::from(10_000u64));
        assert_eq!(container.event_bus.capacity(), 64);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = RuntimeConfig::parse(CONFIG).unwrap();
        let env: HashMap<&str, &str> = [("QV_THRESHOLD", "3"), ("QV_AUTO_EXECUTE", "false")]
            .into_iter()
            .collect();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        let container = VaultContainer::new(config).unwrap();
        assert_eq!(container.wallet.threshold(), 3);
        assert!(!container.wallet.config().auto_execute_on_approve);
    }

    #[test]
    fn test_threshold_above_principals_rejected() {
        let mut config = RuntimeConfig::parse(CONFIG).unwrap();
        config.genesis.threshold = 4;

        assert!(matches!(
            VaultContainer::new(config),
            Err(WalletError::InvalidQuorum {
                threshold: 4,
                principals: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_script_replay_is_logged_on_bus() {
        let container = container();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let logger = tokio::spawn(EventLogger::new(&container.event_bus).run(shutdown_rx));

        let p1 = principal(1);
        let p2 = principal(2);
        let p3 = principal(3);
        let to = recipient(1);
        let script = format!(
            "# pay the contractor\n\
             propose {p1} {to} 2500 Payment for services\n\
             approve {p1} 0\n\
             revoke {p2} 0\n\
             approve {p3} 0\n\
             approve {p2} 0\n\
             show 0\n\
             \n\
             principals\n"
        );

        let reports = replay(&container, &script);
        assert_eq!(reports.len(), 7);
        assert!(matches!(
            reports[4].result,
            Err(CommandError::Wallet(WalletError::AlreadyExecuted { .. }))
        ));
        assert_eq!(reports.iter().filter(|r| r.is_ok()).count(), 6);

        assert!(container.wallet.is_executed(ProposalId(0)).unwrap());
        assert_eq!(container.ledger.balance_of(&to), Amount::from(2_500u64));

        shutdown_tx.send(true).unwrap();
        // Created, approved by p1, approved by p3, executed
        assert_eq!(logger.await.unwrap(), 4);
    }
}
