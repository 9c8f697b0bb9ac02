//! Gateway parameters fixed at construction time.

use meridian_types::{mrd, Amount};
use serde::{Deserialize, Serialize};

/// Immutable migration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayParams {
    /// Largest amount a single claim may request, in ledger units
    pub max_claim_amount: Amount,
    /// Total budget the gateway may ever mint, claims and final sweep
    /// combined, in ledger units
    pub migration_allowance: Amount,
}

impl Default for GatewayParams {
    fn default() -> Self {
        Self {
            max_claim_amount: mrd(1_000_000),
            // 100 million MRD reserved for the migration
            migration_allowance: mrd(100_000_000),
        }
    }
}
