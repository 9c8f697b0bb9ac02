//! Meridian Migration Gateway
//!
//! Implements the legacy-token migration with:
//! - An owner-maintained claim whitelist
//! - One-shot claims minted atomically into the staking vault
//! - A bounded migration budget and a one-way closing sweep

pub mod errors;
pub mod gateway;
pub mod params;

pub use errors::*;
pub use gateway::*;
pub use params::*;
