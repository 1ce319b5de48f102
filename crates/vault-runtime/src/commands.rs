//! # Command Replay
//!
//! Line-oriented scripts driving the wallet:
//!
//! ```text
//! # comment
//! propose <caller> <recipient> <amount> <description...>
//! approve <caller> <id>
//! revoke  <caller> <id>
//! execute <caller> <id>
//! show    <id>
//! principals
//! deposit <amount>
//! balance
//! ```
//!
//! Addresses are hex, amounts decimal. A failing line is reported and the
//! replay moves on to the next one.

use qv_multisig::{ExecutionOutcome, MultisigApi, ProposalId, WalletError};
use shared_types::entities::{Address, Amount};
use thiserror::Error;
use tracing::{info, warn};

use crate::container::VaultContainer;

/// Errors from parsing or running a single command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid {what} {value:?}: {reason}")]
    InvalidArgument {
        what: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Propose {
        caller: Address,
        recipient: Address,
        amount: Amount,
        description: String,
    },
    Approve { caller: Address, id: ProposalId },
    Revoke { caller: Address, id: ProposalId },
    Execute { caller: Address, id: ProposalId },
    Show { id: ProposalId },
    Principals,
    Deposit { amount: Amount },
    Balance,
}

const USAGE_PROPOSE: &str = "propose <caller> <recipient> <amount> <description...>";
const USAGE_APPROVE: &str = "approve <caller> <id>";
const USAGE_REVOKE: &str = "revoke <caller> <id>";
const USAGE_EXECUTE: &str = "execute <caller> <id>";
const USAGE_SHOW: &str = "show <id>";
const USAGE_DEPOSIT: &str = "deposit <amount>";

fn parse_address(what: &'static str, raw: &str) -> Result<Address, CommandError> {
    raw.parse().map_err(|e: shared_types::AddressError| CommandError::InvalidArgument {
        what,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_amount(raw: &str) -> Result<Amount, CommandError> {
    Amount::from_dec_str(raw).map_err(|e| CommandError::InvalidArgument {
        what: "amount",
        value: raw.to_string(),
        reason: format!("{e:?}"),
    })
}

fn parse_id(raw: &str) -> Result<ProposalId, CommandError> {
    raw.parse::<u64>()
        .map(ProposalId)
        .map_err(|e| CommandError::InvalidArgument {
            what: "proposal id",
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

fn caller_and_id(
    args: &[&str],
    usage: &'static str,
) -> Result<(Address, ProposalId), CommandError> {
    match args {
        [caller, id] => Ok((parse_address("caller", caller)?, parse_id(id)?)),
        _ => Err(CommandError::Usage(usage)),
    }
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "propose" => {
                if args.len() < 3 {
                    return Err(CommandError::Usage(USAGE_PROPOSE));
                }
                Self::Propose {
                    caller: parse_address("caller", args[0])?,
                    recipient: parse_address("recipient", args[1])?,
                    amount: parse_amount(args[2])?,
                    description: args[3..].join(" "),
                }
            }
            "approve" => {
                let (caller, id) = caller_and_id(&args, USAGE_APPROVE)?;
                Self::Approve { caller, id }
            }
            "revoke" => {
                let (caller, id) = caller_and_id(&args, USAGE_REVOKE)?;
                Self::Revoke { caller, id }
            }
            "execute" => {
                let (caller, id) = caller_and_id(&args, USAGE_EXECUTE)?;
                Self::Execute { caller, id }
            }
            "show" => match args.as_slice() {
                [id] => Self::Show { id: parse_id(id)? },
                _ => return Err(CommandError::Usage(USAGE_SHOW)),
            },
            "principals" => Self::Principals,
            "deposit" => match args.as_slice() {
                [amount] => Self::Deposit {
                    amount: parse_amount(amount)?,
                },
                _ => return Err(CommandError::Usage(USAGE_DEPOSIT)),
            },
            "balance" => Self::Balance,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Run the command against the container and describe the result.
    pub fn run(&self, container: &VaultContainer) -> Result<String, CommandError> {
        let wallet = &container.wallet;

        let message = match self {
            Self::Propose {
                caller,
                recipient,
                amount,
                description,
            } => {
                let id = wallet.propose(*caller, *recipient, *amount, description.clone())?;
                format!("proposal {id} created")
            }
            Self::Approve { caller, id } => {
                let outcome = wallet.approve(*caller, *id)?;
                let mut message = format!(
                    "proposal {id}: {}/{} approvals",
                    outcome.approvals,
                    wallet.threshold()
                );
                if !outcome.newly_recorded {
                    message.push_str(" (already approved)");
                }
                if let Some(ExecutionOutcome::Executed { correlation_id }) = outcome.execution {
                    message.push_str(&format!(", executed (transfer {correlation_id})"));
                }
                message
            }
            Self::Revoke { caller, id } => {
                if wallet.revoke(*caller, *id)? {
                    format!("proposal {id}: approval revoked")
                } else {
                    format!("proposal {id}: no approval to revoke")
                }
            }
            Self::Execute { caller, id } => match wallet.try_execute(*caller, *id)? {
                ExecutionOutcome::Executed { correlation_id } => {
                    format!("proposal {id}: executed (transfer {correlation_id})")
                }
                ExecutionOutcome::QuorumNotMet {
                    approvals,
                    threshold,
                } => format!("proposal {id}: quorum not met ({approvals}/{threshold})"),
                ExecutionOutcome::AlreadyExecuted => {
                    format!("proposal {id}: already executed")
                }
            },
            Self::Show { id } => {
                let view = wallet.get_proposal(*id)?;
                serde_json::to_string(&view).map_err(|e| CommandError::InvalidArgument {
                    what: "proposal view",
                    value: id.to_string(),
                    reason: e.to_string(),
                })?
            }
            Self::Principals => {
                let list: Vec<String> = wallet.principals().iter().map(Address::to_string).collect();
                format!(
                    "threshold {} of {}: {}",
                    wallet.threshold(),
                    wallet.principal_count(),
                    list.join(", ")
                )
            }
            Self::Deposit { amount } => {
                let balance = container.ledger.deposit(*amount);
                format!("treasury balance {balance}")
            }
            Self::Balance => format!("treasury balance {}", container.ledger.treasury_balance()),
        };

        Ok(message)
    }
}

/// Outcome of one script line.
#[derive(Debug)]
pub struct LineReport {
    pub line: usize,
    pub text: String,
    pub result: Result<String, CommandError>,
}

impl LineReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every command in `script`. Never stops early.
pub fn replay(container: &VaultContainer, script: &str) -> Vec<LineReport> {
    let mut reports = Vec::new();

    for (index, text) in script.lines().enumerate() {
        let line = index + 1;
        let result = match Command::parse(text) {
            Ok(None) => continue,
            Ok(Some(command)) => command.run(container),
            Err(err) => Err(err),
        };

        match &result {
            Ok(message) => info!(line, command = text.trim(), "{message}"),
            Err(err) => warn!(line, command = text.trim(), error = %err, "Command failed"),
        }

        reports.push(LineReport {
            line,
            text: text.trim().to_string(),
            result,
        });
    }

    reports
}
