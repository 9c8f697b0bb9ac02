//! Ledger amount arithmetic.
//!
//! Balances, allowances and supply counters are fixed-point integers with 18
//! implied fractional decimal digits. 1 MRD = 10^18 ledger units.

/// Amounts are stored as plain `u128` ledger units. All state transitions use
/// checked arithmetic, so an overflowing operation fails cleanly instead of
/// wrapping.
pub type Amount = u128;

/// Number of implied fractional decimal digits.
pub const MRD_DECIMALS: u32 = 18;

/// Conversion factor: 1 MRD = 10^18 ledger units.
pub const UNITS_PER_MRD: Amount = 10u128.pow(MRD_DECIMALS);

/// Convert a whole-token amount into ledger units.
pub const fn mrd(whole: u64) -> Amount {
    whole as Amount * UNITS_PER_MRD
}

/// Render an amount of ledger units as a human readable MRD string.
pub fn format_mrd(units: Amount) -> String {
    let whole = units / UNITS_PER_MRD;
    let fractional = units % UNITS_PER_MRD;

    if fractional == 0 {
        format!("{whole} MRD")
    } else {
        let digits = format!("{fractional:018}");
        format!("{whole}.{} MRD", digits.trim_end_matches('0'))
    }
}
