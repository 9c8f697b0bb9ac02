use crate::roles::Role;
use meridian_types::{Address, Amount};
use thiserror::Error;

/// Errors that can occur while applying token ledger operations.
///
/// A returned error always means the ledger was left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account {account} is missing the {required} role")]
    AccessDenied { account: Address, required: Role },

    #[error("transfers are paused")]
    Paused,

    #[error("sender account {account} is blacklisted")]
    SenderBlacklisted { account: Address },

    #[error("recipient account {account} is blacklisted")]
    RecipientBlacklisted { account: Address },

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("minting to a total supply of {would_issue} exceeds hard cap {cap}")]
    SupplyCeilingExceeded { cap: Amount, would_issue: Amount },

    #[error("arithmetic overflow while {0}")]
    ArithmeticOverflow(&'static str),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
