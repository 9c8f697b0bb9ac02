use meridian_ledger::LedgerError;
use meridian_staking::VaultError;
use meridian_types::{Address, Amount};
use thiserror::Error;

/// Errors that can occur while processing migration claims.
///
/// Claim gates are reported in a fixed order; see
/// [`MigrationGateway::claim_new_token`](crate::gateway::MigrationGateway::claim_new_token).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error("account {account} is not the gateway owner")]
    AccessDenied { account: Address },

    #[error("claim window is closed")]
    ClaimWindowClosed,

    #[error("account {account} is not whitelisted")]
    NotWhitelisted { account: Address },

    #[error("account {account} has already claimed")]
    AlreadyClaimed { account: Address },

    #[error("claim of {requested} exceeds the per-claim maximum {max}")]
    AmountExceedsMaximum { requested: Amount, max: Amount },

    #[error("claim of {requested} exceeds the remaining migration budget {remaining}")]
    SupplyCeilingExceeded { requested: Amount, remaining: Amount },

    #[error("claim window already closed")]
    WindowAlreadyClosed,

    #[error("no remaining tokens to mint")]
    NoRemainingTokensToMint,

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type MigrationResult<T> = Result<T, MigrationError>;
