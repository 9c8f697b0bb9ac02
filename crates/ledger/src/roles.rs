//! Role-based access control for ledger operations.
//!
//! Roles are plain tags attached to accounts. Gated operations check the
//! caller's tag before touching any state; blacklisting reuses the same
//! mechanism with the [`Role::Blacklisted`] tag checked on the transfer path.

use meridian_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Role tags recognised by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May grant and revoke roles, including blacklist entries.
    Admin,
    /// May mint new supply.
    Minter,
    /// May pause and unpause the transfer path.
    Pauser,
    /// Barred from sending or receiving transfers.
    Blacklisted,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Minter => "minter",
            Role::Pauser => "pauser",
            Role::Blacklisted => "blacklisted",
        };
        f.write_str(name)
    }
}

/// Membership map from role tag to the set of accounts holding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    members: HashMap<Role, HashSet<Address>>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `role` to `account`. Granting an already held role is a no-op.
    pub fn grant(&mut self, role: Role, account: Address) {
        self.members.entry(role).or_default().insert(account);
    }

    /// Detach `role` from `account`. Revoking an absent role is a no-op.
    pub fn revoke(&mut self, role: Role, account: &Address) {
        if let Some(holders) = self.members.get_mut(&role) {
            holders.remove(account);
        }
    }

    pub fn has(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|holders| holders.contains(account))
    }

    /// Number of accounts currently holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.members.get(&role).map_or(0, HashSet::len)
    }
}
