//! Protocol facade
//!
//! Owns the deployed ledger, vault and gateway behind one lock and applies
//! every operation one at a time, which is the concurrency model of the
//! whole core: callers across threads share the facade, not the components.

use meridian_ledger::{LedgerError, LedgerParams, Role, TokenLedger};
use meridian_migration::{ClaimRecord, GatewayParams, MigrationError, MigrationGateway};
use meridian_staking::{StakingVault, VaultError};
use meridian_types::{Address, Amount};
use parking_lot::Mutex;
use tracing::info;

/// Stable label for the vault's ledger account.
const VAULT_ACCOUNT_LABEL: &str = "meridian/staking-vault";
/// Stable label for the gateway's minting account.
const GATEWAY_ACCOUNT_LABEL: &str = "meridian/migration-gateway";

struct CoreState {
    ledger: TokenLedger,
    vault: StakingVault,
    gateway: MigrationGateway,
}

/// A deployed Meridian core: one ledger, one staking vault, one migration
/// gateway.
pub struct Protocol {
    state: Mutex<CoreState>,
}

impl Protocol {
    /// Deploy the protocol components and wire them together: the vault and
    /// gateway receive derived well-known accounts, the deployer keeps the
    /// bootstrap roles and owns the gateway, and the gateway account is
    /// granted Minter so claims and the closing sweep can mint.
    pub fn deploy(
        deployer: Address,
        ledger_params: LedgerParams,
        gateway_params: GatewayParams,
    ) -> Result<Self, LedgerError> {
        let vault_account = Address::derive(VAULT_ACCOUNT_LABEL);
        let gateway_account = Address::derive(GATEWAY_ACCOUNT_LABEL);

        let mut ledger = TokenLedger::new(ledger_params, deployer);
        ledger.grant_role(deployer, Role::Minter, gateway_account)?;

        let vault = StakingVault::new(vault_account);
        let gateway = MigrationGateway::new(deployer, gateway_account, gateway_params);

        info!(
            target: "protocol",
            "Deployed: deployer={}, vault={}, gateway={}",
            deployer,
            vault_account,
            gateway_account
        );

        Ok(Self {
            state: Mutex::new(CoreState {
                ledger,
                vault,
                gateway,
            }),
        })
    }

    // ---- ledger operations ---------------------------------------------

    pub fn mint(&self, caller: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        self.state.lock().ledger.mint(caller, to, amount)
    }

    pub fn transfer(&self, caller: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        self.state.lock().ledger.transfer(caller, to, amount)
    }

    pub fn approve(
        &self,
        caller: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.state.lock().ledger.approve(caller, spender, amount)
    }

    pub fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.state.lock().ledger.transfer_from(caller, from, to, amount)
    }

    pub fn pause(&self, caller: Address) -> Result<(), LedgerError> {
        self.state.lock().ledger.pause(caller)
    }

    pub fn unpause(&self, caller: Address) -> Result<(), LedgerError> {
        self.state.lock().ledger.unpause(caller)
    }

    pub fn blacklist(&self, caller: Address, account: Address) -> Result<(), LedgerError> {
        self.state.lock().ledger.blacklist(caller, account)
    }

    pub fn unblacklist(&self, caller: Address, account: Address) -> Result<(), LedgerError> {
        self.state.lock().ledger.unblacklist(caller, account)
    }

    pub fn grant_role(
        &self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), LedgerError> {
        self.state.lock().ledger.grant_role(caller, role, account)
    }

    pub fn revoke_role(
        &self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), LedgerError> {
        self.state.lock().ledger.revoke_role(caller, role, account)
    }

    // ---- ledger queries --------------------------------------------------

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.state.lock().ledger.balance_of(account)
    }

    pub fn total_supply(&self) -> Amount {
        self.state.lock().ledger.total_supply()
    }

    pub fn max_supply(&self) -> Amount {
        self.state.lock().ledger.max_supply()
    }

    pub fn remaining_supply(&self) -> Amount {
        self.state.lock().ledger.remaining_supply()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.state.lock().ledger.allowance(owner, spender)
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().ledger.is_paused()
    }

    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.state.lock().ledger.is_blacklisted(account)
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.lock().ledger.has_role(role, account)
    }

    // ---- staking operations ----------------------------------------------

    /// Stake from the caller's own balance. Requires a prior `approve` of
    /// the vault account for at least `amount`.
    pub fn stake(&self, caller: Address, amount: Amount) -> Result<(), VaultError> {
        let mut state = self.state.lock();
        let CoreState { ledger, vault, .. } = &mut *state;
        vault.stake(ledger, caller, amount)
    }

    pub fn withdraw(&self, caller: Address, amount: Amount) -> Result<(), VaultError> {
        let mut state = self.state.lock();
        let CoreState { ledger, vault, .. } = &mut *state;
        vault.withdraw(ledger, caller, amount)
    }

    pub fn vault_account(&self) -> Address {
        self.state.lock().vault.account()
    }

    pub fn receipt_balance_of(&self, holder: &Address) -> Amount {
        self.state.lock().vault.receipt_balance_of(holder)
    }

    pub fn total_staked(&self) -> Amount {
        self.state.lock().vault.total_staked()
    }

    /// Audit check across components: the vault's token holding covers all
    /// receipts in circulation.
    pub fn vault_is_fully_backed(&self) -> bool {
        let state = self.state.lock();
        state.vault.is_fully_backed(&state.ledger)
    }

    // ---- migration operations --------------------------------------------

    pub fn whitelist_addresses(
        &self,
        caller: Address,
        accounts: &[Address],
    ) -> Result<(), MigrationError> {
        self.state.lock().gateway.whitelist_addresses(caller, accounts)
    }

    /// One-shot migration claim for the caller; the claimed amount is minted
    /// directly into the vault and credited as receipts.
    pub fn claim_new_token(
        &self,
        caller: Address,
        lock_duration_secs: u64,
        amount: Amount,
    ) -> Result<(), MigrationError> {
        let mut state = self.state.lock();
        let CoreState {
            ledger,
            vault,
            gateway,
        } = &mut *state;
        gateway.claim_new_token(ledger, vault, caller, lock_duration_secs, amount)
    }

    /// Sweep the unclaimed migration budget to the owner and close the
    /// window. Returns the swept amount.
    pub fn mint_remaining_tokens(&self, caller: Address) -> Result<Amount, MigrationError> {
        let mut state = self.state.lock();
        let CoreState { ledger, gateway, .. } = &mut *state;
        gateway.mint_remaining_tokens(ledger, caller)
    }

    // ---- migration queries -------------------------------------------------

    pub fn gateway_account(&self) -> Address {
        self.state.lock().gateway.account()
    }

    pub fn gateway_owner(&self) -> Address {
        self.state.lock().gateway.owner()
    }

    pub fn is_whitelisted(&self, account: &Address) -> bool {
        self.state.lock().gateway.is_whitelisted(account)
    }

    pub fn has_claimed(&self, account: &Address) -> bool {
        self.state.lock().gateway.has_claimed(account)
    }

    pub fn claim_record(&self, account: &Address) -> Option<ClaimRecord> {
        self.state.lock().gateway.claim_record(account).cloned()
    }

    pub fn claim_window_open(&self) -> bool {
        self.state.lock().gateway.claim_window_open()
    }

    pub fn remaining_migration_budget(&self) -> Amount {
        self.state.lock().gateway.remaining_budget()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_types::mrd;

    fn deployer() -> Address {
        Address::new([0xDE; 32])
    }

    fn deployed() -> Protocol {
        Protocol::deploy(
            deployer(),
            LedgerParams::default(),
            GatewayParams::default(),
        )
        .expect("deploy")
    }

    #[test]
    fn deploy_wires_gateway_as_minter() {
        let protocol = deployed();

        assert!(protocol.has_role(Role::Minter, &protocol.gateway_account()));
        assert!(protocol.has_role(Role::Admin, &deployer()));
        assert_eq!(protocol.gateway_owner(), deployer());
        assert_eq!(protocol.total_supply(), 0);
        assert!(protocol.claim_window_open());
    }

    #[test]
    fn derived_accounts_are_stable() {
        let a = deployed();
        let b = deployed();
        assert_eq!(a.vault_account(), b.vault_account());
        assert_eq!(a.gateway_account(), b.gateway_account());
        assert_ne!(a.vault_account(), a.gateway_account());
    }

    #[test]
    fn facade_round_trips_a_simple_flow() {
        let protocol = deployed();
        let holder = Address::new([1; 32]);

        protocol.mint(deployer(), holder, mrd(100)).unwrap();
        protocol.approve(holder, protocol.vault_account(), mrd(100)).unwrap();
        protocol.stake(holder, mrd(60)).unwrap();

        assert_eq!(protocol.balance_of(&holder), mrd(40));
        assert_eq!(protocol.receipt_balance_of(&holder), mrd(60));
        assert!(protocol.vault_is_fully_backed());

        protocol.withdraw(holder, mrd(60)).unwrap();
        assert_eq!(protocol.balance_of(&holder), mrd(100));
        assert_eq!(protocol.total_staked(), 0);
    }
}
