//! Migration Gateway Module
//!
//! Lets whitelisted holders of the legacy token claim new MRD exactly once.
//! Claimed tokens are minted straight into the staking vault rather than the
//! claimant's spendable balance. When the migration ends, the owner sweeps
//! whatever budget is left and the window closes for good.

use crate::errors::{MigrationError, MigrationResult};
use crate::params::GatewayParams;
use meridian_ledger::TokenLedger;
use meridian_staking::StakingVault;
use meridian_types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Record of a processed claim, kept for audit queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Amount minted and staked for the claimant, in ledger units
    pub amount: Amount,
    /// Lock duration the claimant requested, carried as metadata for the
    /// staking layer
    pub lock_duration_secs: u64,
}

/// One-shot migration gateway backed by its own minting account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationGateway {
    owner: Address,
    /// Ledger account the gateway mints through; must hold the Minter role
    account: Address,
    params: GatewayParams,
    whitelisted: HashSet<Address>,
    claims: HashMap<Address, ClaimRecord>,
    claim_window_open: bool,
    remaining_budget: Amount,
}

impl MigrationGateway {
    pub fn new(owner: Address, account: Address, params: GatewayParams) -> Self {
        let remaining_budget = params.migration_allowance;
        info!(
            target: "migration",
            "Gateway created: owner={}, allowance={}, max_claim={}",
            owner,
            params.migration_allowance,
            params.max_claim_amount
        );

        Self {
            owner,
            account,
            params,
            whitelisted: HashSet::new(),
            claims: HashMap::new(),
            claim_window_open: true,
            remaining_budget,
        }
    }

    // ---- queries ------------------------------------------------------

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn params(&self) -> &GatewayParams {
        &self.params
    }

    pub fn is_whitelisted(&self, account: &Address) -> bool {
        self.whitelisted.contains(account)
    }

    pub fn has_claimed(&self, account: &Address) -> bool {
        self.claims.contains_key(account)
    }

    pub fn claim_record(&self, account: &Address) -> Option<&ClaimRecord> {
        self.claims.get(account)
    }

    pub fn claim_window_open(&self) -> bool {
        self.claim_window_open
    }

    /// Budget still mintable through claims or the final sweep.
    pub fn remaining_budget(&self) -> Amount {
        self.remaining_budget
    }

    // ---- owner operations ----------------------------------------------

    /// Add accounts to the whitelist. Re-adding an account is a no-op;
    /// there is no removal, matching the one-way nature of the migration.
    pub fn whitelist_addresses(
        &mut self,
        caller: Address,
        accounts: &[Address],
    ) -> MigrationResult<()> {
        self.require_owner(&caller)?;
        for account in accounts {
            self.whitelisted.insert(*account);
        }
        info!(target: "migration", "Whitelisted {} account(s)", accounts.len());
        Ok(())
    }

    /// Sweep the unclaimed budget to the owner and close the window.
    ///
    /// A gateway whose budget is already zero has nothing to sweep; the
    /// call fails and the window stays open. Once the sweep succeeds the
    /// window is closed permanently and later calls fail regardless of
    /// budget.
    pub fn close_claim_window(
        &mut self,
        ledger: &mut TokenLedger,
        caller: Address,
    ) -> MigrationResult<Amount> {
        self.require_owner(&caller)?;
        if !self.claim_window_open {
            return Err(MigrationError::WindowAlreadyClosed);
        }
        if self.remaining_budget == 0 {
            return Err(MigrationError::NoRemainingTokensToMint);
        }

        let swept = self.remaining_budget;
        ledger.mint(self.account, self.owner, swept)?;
        self.remaining_budget = 0;
        self.claim_window_open = false;

        info!(
            target: "migration",
            "Claim window closed: swept {} to owner {}",
            swept,
            self.owner
        );
        Ok(swept)
    }

    /// Mint whatever budget remains to the owner, ending the migration.
    /// Alias for [`close_claim_window`](Self::close_claim_window).
    pub fn mint_remaining_tokens(
        &mut self,
        ledger: &mut TokenLedger,
        caller: Address,
    ) -> MigrationResult<Amount> {
        self.close_claim_window(ledger, caller)
    }

    // ---- claims ---------------------------------------------------------

    /// Process a one-shot migration claim for `caller`.
    ///
    /// Gates are checked in a fixed order before anything is minted:
    /// window open, whitelist membership, no prior claim, per-claim
    /// maximum, remaining budget. The mint and the receipt credit land
    /// atomically through the vault; only then is the claim recorded and
    /// the budget reduced.
    pub fn claim_new_token(
        &mut self,
        ledger: &mut TokenLedger,
        vault: &mut StakingVault,
        caller: Address,
        lock_duration_secs: u64,
        amount: Amount,
    ) -> MigrationResult<()> {
        if !self.claim_window_open {
            return Err(MigrationError::ClaimWindowClosed);
        }
        if !self.whitelisted.contains(&caller) {
            return Err(MigrationError::NotWhitelisted { account: caller });
        }
        if self.claims.contains_key(&caller) {
            return Err(MigrationError::AlreadyClaimed { account: caller });
        }
        if amount > self.params.max_claim_amount {
            return Err(MigrationError::AmountExceedsMaximum {
                requested: amount,
                max: self.params.max_claim_amount,
            });
        }
        let new_budget = self.remaining_budget.checked_sub(amount).ok_or(
            MigrationError::SupplyCeilingExceeded {
                requested: amount,
                remaining: self.remaining_budget,
            },
        )?;

        vault.deposit_minted(ledger, self.account, caller, amount)?;

        self.remaining_budget = new_budget;
        self.claims.insert(
            caller,
            ClaimRecord {
                amount,
                lock_duration_secs,
            },
        );

        info!(
            target: "migration",
            "Claim processed: account={}, amount={}, lock={}s, budget_left={}",
            caller,
            amount,
            lock_duration_secs,
            new_budget
        );
        Ok(())
    }

    fn require_owner(&self, caller: &Address) -> MigrationResult<()> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(MigrationError::AccessDenied { account: *caller })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(seed: u8) -> Address {
        Address::new([seed; 32])
    }

    fn gateway() -> MigrationGateway {
        MigrationGateway::new(
            account(0xDE),
            Address::derive("test/gateway"),
            GatewayParams::default(),
        )
    }

    #[test]
    fn new_gateway_opens_with_full_budget() {
        let gateway = gateway();
        assert!(gateway.claim_window_open());
        assert_eq!(
            gateway.remaining_budget(),
            GatewayParams::default().migration_allowance
        );
        assert!(!gateway.has_claimed(&account(1)));
    }

    #[test]
    fn whitelisting_requires_owner() {
        let mut gateway = gateway();
        let outsider = account(9);

        let err = gateway
            .whitelist_addresses(outsider, &[account(1)])
            .unwrap_err();
        assert_eq!(err, MigrationError::AccessDenied { account: outsider });
        assert!(!gateway.is_whitelisted(&account(1)));
    }

    #[test]
    fn whitelisting_is_idempotent() {
        let mut gateway = gateway();
        let owner = gateway.owner();

        gateway
            .whitelist_addresses(owner, &[account(1), account(2)])
            .unwrap();
        gateway.whitelist_addresses(owner, &[account(1)]).unwrap();

        assert!(gateway.is_whitelisted(&account(1)));
        assert!(gateway.is_whitelisted(&account(2)));
        assert!(!gateway.is_whitelisted(&account(3)));
    }

    #[test]
    fn serde_roundtrip_preserves_gateway_state() {
        let mut gateway = gateway();
        let owner = gateway.owner();
        gateway
            .whitelist_addresses(owner, &[account(1), account(2)])
            .unwrap();

        let json = serde_json::to_string(&gateway).unwrap();
        let restored: MigrationGateway = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, gateway);
        assert!(restored.is_whitelisted(&account(1)));
        assert!(restored.claim_window_open());
        assert_eq!(restored.remaining_budget(), gateway.remaining_budget());
    }
}
