//! # Quorum-Vault Runtime
//!
//! Hosts one multisig wallet and replays a command script against it.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults → `QV_CONFIG` file → `QV_*` overrides)
//! 3. Build the container (bus, funded ledger, wallet)
//! 4. Start the event logger
//! 5. Replay the script from `QV_SCRIPT`, or stdin when unset
//! 6. Flush the event logger and exit

use std::io::Read;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vault_runtime::{replay, EventLogger, RuntimeConfig, VaultContainer};

const ENV_SCRIPT: &str = "QV_SCRIPT";

fn read_script() -> Result<String> {
    match std::env::var(ENV_SCRIPT) {
        Ok(path) => {
            info!(path = %path, "Reading command script");
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))
        }
        Err(_) => {
            info!("Reading command script from stdin");
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read stdin")?;
            Ok(script)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Quorum-Vault Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = RuntimeConfig::resolve(|key| std::env::var(key).ok())
        .context("Failed to load configuration")?;
    let container = VaultContainer::new(config).context("Invalid wallet genesis")?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let logger = tokio::spawn(EventLogger::new(&container.event_bus).run(shutdown_rx));

    let script = tokio::task::spawn_blocking(read_script)
        .await
        .context("Script reader panicked")??;

    let container = std::sync::Arc::new(container);
    let replay_container = std::sync::Arc::clone(&container);
    let reports = tokio::task::spawn_blocking(move || replay(&replay_container, &script))
        .await
        .context("Replay panicked")?;

    let mut failed = 0usize;
    for report in &reports {
        match &report.result {
            Ok(message) => println!("{:>4}  ok     {message}", report.line),
            Err(err) => {
                failed += 1;
                println!("{:>4}  error  {err}", report.line);
            }
        }
    }

    if shutdown_tx.send(true).is_err() {
        warn!("Event logger already stopped");
    }
    let logged = logger.await.context("Event logger panicked")?;

    info!(
        commands = reports.len(),
        failed,
        events = logged,
        treasury = %container.ledger.treasury_balance(),
        "Replay complete"
    );

    Ok(())
}
