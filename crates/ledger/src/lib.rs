//! Meridian Token Ledger
//!
//! Implements the capped-supply MRD balance ledger with:
//! - Role-gated minting against a hard supply cap
//! - A pausable transfer path with sender and recipient blacklists
//! - Allowance-based delegated transfers

pub mod errors;
pub mod ledger;
pub mod params;
pub mod roles;

pub use errors::*;
pub use ledger::*;
pub use params::*;
pub use roles::*;
