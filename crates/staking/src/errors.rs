use meridian_ledger::LedgerError;
use meridian_types::Amount;
use thiserror::Error;

/// Errors that can occur while staking or withdrawing.
///
/// Token movement failures bubble up unchanged from the ledger; the vault
/// adds only the receipt-side failure modes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("insufficient receipt balance: have {have}, need {need}")]
    InsufficientReceiptBalance { have: Amount, need: Amount },

    #[error("arithmetic overflow while {0}")]
    ArithmeticOverflow(&'static str),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type VaultResult<T> = Result<T, VaultError>;
