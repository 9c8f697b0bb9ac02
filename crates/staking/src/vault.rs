//! Staking Vault Module
//!
//! Moves MRD between holders and the vault's own ledger account, issuing
//! receipts 1:1 for every unit held. Every entry point validates before the
//! first write, so the token move and the receipt update land together or
//! not at all.

use crate::errors::{VaultError, VaultResult};
use crate::receipt::ReceiptLedger;
use meridian_ledger::{LedgerError, TokenLedger};
use meridian_types::{Address, Amount};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Staking vault backed by a dedicated ledger account.
///
/// The vault spends holder balances through the regular allowance mechanism:
/// a holder must `approve` the vault account before staking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingVault {
    account: Address,
    receipts: ReceiptLedger,
}

impl StakingVault {
    pub fn new(account: Address) -> Self {
        info!(target: "staking", "Vault created at {}", account);
        Self {
            account,
            receipts: ReceiptLedger::new(),
        }
    }

    /// Ledger account in which all staked tokens are held.
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn receipt_balance_of(&self, holder: &Address) -> Amount {
        self.receipts.balance_of(holder)
    }

    /// Total receipts in circulation, equal to the vault's token holding as
    /// long as every deposit came through [`stake`](Self::stake) or
    /// [`deposit_minted`](Self::deposit_minted).
    pub fn total_staked(&self) -> Amount {
        self.receipts.total_issued()
    }

    /// Move `amount` from the holder's balance into the vault and credit the
    /// holder the same amount of receipts.
    ///
    /// The holder's balance is checked before the allowance, so an unfunded
    /// stake reports `InsufficientBalance` even when no approval exists.
    pub fn stake(
        &mut self,
        ledger: &mut TokenLedger,
        holder: Address,
        amount: Amount,
    ) -> VaultResult<()> {
        let have = ledger.balance_of(&holder);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount }.into());
        }

        let staged = self.receipts.stage_credit(holder, amount)?;
        ledger.transfer_from(self.account, holder, self.account, amount)?;
        self.receipts.commit_credit(staged);

        debug!(
            target: "staking",
            "Staked: holder={}, amount={}, total_staked={}",
            holder,
            amount,
            self.receipts.total_issued()
        );
        Ok(())
    }

    /// Burn `amount` of the holder's receipts and return the same amount of
    /// tokens from the vault to the holder.
    pub fn withdraw(
        &mut self,
        ledger: &mut TokenLedger,
        holder: Address,
        amount: Amount,
    ) -> VaultResult<()> {
        let have = self.receipts.balance_of(&holder);
        if have < amount {
            return Err(VaultError::InsufficientReceiptBalance { have, need: amount });
        }

        ledger.transfer(self.account, holder, amount)?;
        self.receipts.burn(holder, amount)?;

        debug!(
            target: "staking",
            "Withdrawn: holder={}, amount={}, total_staked={}",
            holder,
            amount,
            self.receipts.total_issued()
        );
        Ok(())
    }

    /// Mint `amount` straight into the vault's account and credit `holder`
    /// with matching receipts. Used by the migration path, where claimed
    /// tokens start their life already staked.
    pub fn deposit_minted(
        &mut self,
        ledger: &mut TokenLedger,
        minter: Address,
        holder: Address,
        amount: Amount,
    ) -> VaultResult<()> {
        let staged = self.receipts.stage_credit(holder, amount)?;
        ledger.mint(minter, self.account, amount)?;
        self.receipts.commit_credit(staged);

        debug!(
            target: "staking",
            "Minted deposit: holder={}, amount={}, total_staked={}",
            holder,
            amount,
            self.receipts.total_issued()
        );
        Ok(())
    }

    /// Audit check: the vault's token holding must cover every receipt in
    /// circulation. Donations sent directly to the vault account can push
    /// the holding above the receipt total but never below it.
    pub fn is_fully_backed(&self, ledger: &TokenLedger) -> bool {
        ledger.balance_of(&self.account) >= self.receipts.total_issued()
    }
}
