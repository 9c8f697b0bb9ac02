//! Meridian Protocol Core
//!
//! Single entry point over the deployed components:
//! - `Protocol::deploy` performs the account derivation and role wiring
//! - Every ledger, staking and migration operation is exposed with explicit
//!   caller identity and runs under one lock

pub mod protocol;

pub use protocol::Protocol;

// Re-export the component surface so callers need only this crate.
pub use meridian_ledger::{LedgerError, LedgerParams, Role};
pub use meridian_migration::{ClaimRecord, GatewayParams, MigrationError};
pub use meridian_staking::VaultError;
pub use meridian_types::{format_mrd, mrd, Address, Amount, UNITS_PER_MRD};
