//! Token Ledger Module
//!
//! Single source of truth for balances, allowances, supply and transfer
//! policy. Operations validate every precondition before the first write, so
//! a returned error always leaves the ledger exactly as it was.

use crate::errors::{LedgerError, LedgerResult};
use crate::params::LedgerParams;
use crate::roles::{Role, RoleSet};
use meridian_types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Capped-supply fungible token ledger.
///
/// Access control, pause state and the blacklist all live here; the staking
/// and migration layers drive this ledger through the same public operations
/// external callers use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLedger {
    params: LedgerParams,
    balances: HashMap<Address, Amount>,
    /// owner → spender → amount still spendable via `transfer_from`
    allowances: HashMap<Address, HashMap<Address, Amount>>,
    roles: RoleSet,
    total_supply: Amount,
    paused: bool,
}

impl TokenLedger {
    /// Create an empty ledger. The deployer starts with the Admin, Minter
    /// and Pauser roles; all supply is minted later.
    pub fn new(params: LedgerParams, deployer: Address) -> Self {
        let mut roles = RoleSet::new();
        roles.grant(Role::Admin, deployer);
        roles.grant(Role::Minter, deployer);
        roles.grant(Role::Pauser, deployer);

        info!(
            target: "ledger",
            "Ledger created: symbol={}, max_supply={}, deployer={}",
            params.symbol,
            params.max_supply,
            deployer
        );

        Self {
            params,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            roles,
            total_supply: 0,
            paused: false,
        }
    }

    // ---- queries ------------------------------------------------------

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn max_supply(&self) -> Amount {
        self.params.max_supply
    }

    /// Supply still mintable before the hard cap is reached.
    pub fn remaining_supply(&self) -> Amount {
        self.params.max_supply.saturating_sub(self.total_supply)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.roles.has(Role::Blacklisted, account)
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.roles.has(role, account)
    }

    // ---- supply -------------------------------------------------------

    /// Mint `amount` new units to `to`. Caller must hold the Minter role;
    /// the mint is subject to the pause switch and the recipient blacklist
    /// like any other credit.
    pub fn mint(&mut self, caller: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        self.require_role(Role::Minter, &caller)?;
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if self.is_blacklisted(&to) {
            return Err(LedgerError::RecipientBlacklisted { account: to });
        }

        let would_issue = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow("growing total supply"))?;
        if would_issue > self.params.max_supply {
            return Err(LedgerError::SupplyCeilingExceeded {
                cap: self.params.max_supply,
                would_issue,
            });
        }
        let credited = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow("crediting minted balance"))?;

        self.balances.insert(to, credited);
        self.total_supply = would_issue;

        info!(
            target: "ledger",
            "Minted {} to {} (total supply now {})",
            amount,
            to,
            self.total_supply
        );
        Ok(())
    }

    // ---- transfers ----------------------------------------------------

    /// Move `amount` from the caller's balance to `to`.
    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        self.ensure_transfer_path(&caller, &to)?;
        self.apply_move(caller, to, amount)
    }

    /// Authorise `spender` to move up to `amount` of the caller's balance.
    /// Overwrites any previous allowance for that spender.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> LedgerResult<()> {
        self.allowances
            .entry(caller)
            .or_default()
            .insert(spender, amount);

        debug!(
            target: "ledger",
            "Approved: owner={}, spender={}, amount={}",
            caller,
            spender,
            amount
        );
        Ok(())
    }

    /// Move `amount` from `from` to `to` on the strength of an allowance
    /// previously granted to the caller. The spent allowance is deducted
    /// only once the move has succeeded.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.ensure_transfer_path(&from, &to)?;

        let allowed = self.allowance(&from, &caller);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: allowed,
                need: amount,
            });
        }

        self.apply_move(from, to, amount)?;

        if let Some(entry) = self
            .allowances
            .get_mut(&from)
            .and_then(|spenders| spenders.get_mut(&caller))
        {
            *entry = allowed - amount;
        }
        Ok(())
    }

    // ---- pause switch -------------------------------------------------

    /// Halt the transfer path. Pausing an already paused ledger is a no-op.
    pub fn pause(&mut self, caller: Address) -> LedgerResult<()> {
        self.require_role(Role::Pauser, &caller)?;
        if !self.paused {
            self.paused = true;
            warn!(target: "ledger", "Transfers paused by {}", caller);
        }
        Ok(())
    }

    /// Reopen the transfer path. Unpausing a running ledger is a no-op.
    pub fn unpause(&mut self, caller: Address) -> LedgerResult<()> {
        self.require_role(Role::Pauser, &caller)?;
        if self.paused {
            self.paused = false;
            info!(target: "ledger", "Transfers unpaused by {}", caller);
        }
        Ok(())
    }

    // ---- roles and blacklist ------------------------------------------

    pub fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> LedgerResult<()> {
        self.require_role(Role::Admin, &caller)?;
        self.roles.grant(role, account);
        info!(target: "ledger", "Role {} granted to {}", role, account);
        Ok(())
    }

    pub fn revoke_role(&mut self, caller: Address, role: Role, account: Address) -> LedgerResult<()> {
        self.require_role(Role::Admin, &caller)?;
        self.roles.revoke(role, &account);
        info!(target: "ledger", "Role {} revoked from {}", role, account);
        Ok(())
    }

    /// Bar `account` from the transfer path. Existing balance is frozen in
    /// place until the account is unblacklisted.
    pub fn blacklist(&mut self, caller: Address, account: Address) -> LedgerResult<()> {
        self.grant_role(caller, Role::Blacklisted, account)
    }

    pub fn unblacklist(&mut self, caller: Address, account: Address) -> LedgerResult<()> {
        self.revoke_role(caller, Role::Blacklisted, account)
    }

    // ---- internals ----------------------------------------------------

    fn require_role(&self, role: Role, account: &Address) -> LedgerResult<()> {
        if self.roles.has(role, account) {
            Ok(())
        } else {
            Err(LedgerError::AccessDenied {
                account: *account,
                required: role,
            })
        }
    }

    /// Policy gates shared by both transfer entry points, checked in a fixed
    /// order: pause switch, sender blacklist, recipient blacklist.
    fn ensure_transfer_path(&self, from: &Address, to: &Address) -> LedgerResult<()> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if self.is_blacklisted(from) {
            return Err(LedgerError::SenderBlacklisted { account: *from });
        }
        if self.is_blacklisted(to) {
            return Err(LedgerError::RecipientBlacklisted { account: *to });
        }
        Ok(())
    }

    /// Balance-move primitive behind every transfer. The credit is staged
    /// against the post-debit view so a self-transfer nets out to a no-op.
    fn apply_move(&mut self, from: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }
        let debited = from_balance - amount;

        let to_balance = if from == to { debited } else { self.balance_of(&to) };
        let credited = to_balance
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow("crediting recipient balance"))?;

        self.balances.insert(from, debited);
        self.balances.insert(to, credited);

        debug!(
            target: "ledger",
            "Transfer: from={}, to={}, amount={}",
            from,
            to,
            amount
        );
        Ok(())
    }
}
