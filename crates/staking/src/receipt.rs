//! Receipt Ledger Module
//!
//! Tracks the non-transferable receipt balances that mirror each holder's
//! vault deposit. Receipts are credited 1:1 on stake and burned on withdraw;
//! there is deliberately no transfer operation, so a position can only be
//! unwound by its holder.

use crate::errors::{VaultError, VaultResult};
use meridian_types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-holder receipt balances plus the running total of receipts in
/// circulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLedger {
    balances: HashMap<Address, Amount>,
    total_issued: Amount,
}

/// A validated receipt credit that has not been applied yet. Produced by
/// [`ReceiptLedger::stage_credit`] so callers can interleave the fallible
/// token-side move between validation and commit.
#[derive(Debug, Clone, Copy)]
pub struct StagedCredit {
    account: Address,
    new_balance: Amount,
    new_total: Amount,
}

impl ReceiptLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_issued(&self) -> Amount {
        self.total_issued
    }

    /// Validate a credit of `amount` receipts to `account` without touching
    /// state. Committing the returned value cannot fail.
    pub fn stage_credit(&self, account: Address, amount: Amount) -> VaultResult<StagedCredit> {
        let new_balance = self
            .balance_of(&account)
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow("crediting receipt balance"))?;
        let new_total = self
            .total_issued
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow("growing receipt supply"))?;

        Ok(StagedCredit {
            account,
            new_balance,
            new_total,
        })
    }

    /// Apply a credit staged earlier against this same ledger state.
    pub fn commit_credit(&mut self, staged: StagedCredit) {
        self.balances.insert(staged.account, staged.new_balance);
        self.total_issued = staged.new_total;
    }

    /// Destroy `amount` of `account`'s receipts.
    pub fn burn(&mut self, account: Address, amount: Amount) -> VaultResult<()> {
        let have = self.balance_of(&account);
        if have < amount {
            return Err(VaultError::InsufficientReceiptBalance { have, need: amount });
        }
        self.balances.insert(account, have - amount);
        // Receipt balances always sum to total_issued, so this cannot underflow.
        self.total_issued -= amount;
        Ok(())
    }
}
