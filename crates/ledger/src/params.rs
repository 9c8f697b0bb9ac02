//! Ledger parameters fixed at construction time.

use meridian_types::{mrd, Amount};
use serde::{Deserialize, Serialize};

/// Immutable token configuration. There is no post-construction setter; a
/// different cap means a different ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Human readable token name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Display decimals; balances are stored in ledger units regardless
    pub decimals: u8,
    /// Hard cap on total supply, in ledger units
    pub max_supply: Amount,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            name: "Meridian".to_string(),
            symbol: "MRD".to_string(),
            decimals: 18,
            // 2 billion MRD cap
            max_supply: mrd(2_000_000_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_cap_two_billion() {
        let params = LedgerParams::default();
        assert_eq!(params.symbol, "MRD");
        assert_eq!(params.decimals, 18);
        assert_eq!(params.max_supply, mrd(2_000_000_000));
    }
}
