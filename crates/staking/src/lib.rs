//! Meridian Staking Vault
//!
//! Implements deposit staking of MRD with:
//! - A vault-held ledger account funded through the allowance mechanism
//! - Non-transferable receipt balances credited 1:1 with deposits
//! - Atomic mint-and-stake for the migration path

pub mod errors;
pub mod receipt;
pub mod vault;

pub use errors::*;
pub use receipt::*;
pub use vault::*;
