//! Meridian Protocol Lifecycle Demo
//!
//! Walks through a complete deployment: minting circulating supply,
//! whitelisted migration claims landing pre-staked in the vault, voluntary
//! staking, the pause switch, and the closing sweep.

use meridian_protocol::{
    format_mrd, mrd, Address, GatewayParams, LedgerParams, Protocol, Role,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();

    println!("🚀 Meridian Protocol Lifecycle Demo");
    println!("===================================\n");

    // 1. Deploy the core with default parameters
    let deployer = Address::derive("demo/deployer");
    let gateway_params = GatewayParams {
        max_claim_amount: mrd(1_000),
        migration_allowance: mrd(10_000),
    };
    let protocol = Protocol::deploy(deployer, LedgerParams::default(), gateway_params)?;

    println!("📊 Deployment:");
    println!("  • Deployer: {}", deployer);
    println!("  • Vault account: {}", protocol.vault_account());
    println!("  • Gateway account: {}", protocol.gateway_account());
    println!(
        "  • Gateway holds Minter: {}",
        protocol.has_role(Role::Minter, &protocol.gateway_account())
    );
    println!("  • Max supply: {}", format_mrd(protocol.max_supply()));
    println!();

    // 2. Mint circulating supply to an ordinary holder
    let alice = Address::derive("demo/alice");
    let bob = Address::derive("demo/bob");
    protocol.mint(deployer, alice, mrd(5_000))?;
    println!("💰 Minted {} to alice", format_mrd(protocol.balance_of(&alice)));
    println!("  • Total supply: {}", format_mrd(protocol.total_supply()));
    println!();

    // 3. Whitelist migration claimants and process claims
    protocol.whitelist_addresses(deployer, &[alice, bob])?;
    println!("📋 Whitelisted alice and bob for migration");

    protocol.claim_new_token(alice, 60, mrd(1_000))?;
    protocol.claim_new_token(bob, 90, mrd(750))?;
    println!("  • alice claimed {} (lock hint 60s)", format_mrd(mrd(1_000)));
    println!("  • bob claimed {} (lock hint 90s)", format_mrd(mrd(750)));
    println!(
        "  • Remaining migration budget: {}",
        format_mrd(protocol.remaining_migration_budget())
    );

    // Claims land staked, not spendable
    println!(
        "  • bob's spendable balance: {}",
        format_mrd(protocol.balance_of(&bob))
    );
    println!(
        "  • bob's receipt balance: {}",
        format_mrd(protocol.receipt_balance_of(&bob))
    );

    // A second claim from the same account is refused
    match protocol.claim_new_token(alice, 60, mrd(10)) {
        Err(err) => println!("  • alice claiming again: rejected ({err})"),
        Ok(()) => unreachable!("one claim per account"),
    }
    println!();

    // 4. Voluntary staking through the allowance path
    protocol.approve(alice, protocol.vault_account(), mrd(2_000))?;
    protocol.stake(alice, mrd(2_000))?;
    println!("🏦 alice staked {}", format_mrd(mrd(2_000)));
    println!(
        "  • alice receipts: {}",
        format_mrd(protocol.receipt_balance_of(&alice))
    );
    println!("  • Total staked: {}", format_mrd(protocol.total_staked()));
    println!(
        "  • Vault fully backed: {}",
        protocol.vault_is_fully_backed()
    );

    protocol.withdraw(alice, mrd(500))?;
    println!("  • alice withdrew {}", format_mrd(mrd(500)));
    println!(
        "  • alice spendable balance: {}",
        format_mrd(protocol.balance_of(&alice))
    );
    println!();

    // 5. The pause switch freezes every movement
    protocol.pause(deployer)?;
    match protocol.transfer(alice, bob, mrd(1)) {
        Err(err) => println!("⏸️  Transfer while paused: rejected ({err})"),
        Ok(()) => unreachable!("paused ledger must refuse transfers"),
    }
    protocol.unpause(deployer)?;
    protocol.transfer(alice, bob, mrd(100))?;
    println!("  • After unpause, alice paid bob {}", format_mrd(mrd(100)));
    println!();

    // 6. Close the migration: sweep the unclaimed budget to the owner
    let swept = protocol.mint_remaining_tokens(deployer)?;
    println!("🧹 Claim window closed, swept {} to the owner", format_mrd(swept));
    match protocol.claim_new_token(bob, 60, mrd(1)) {
        Err(err) => println!("  • Late claim: rejected ({err})"),
        Ok(()) => unreachable!("window is closed"),
    }
    println!();

    println!("✅ Final accounting:");
    println!("  • Total supply: {}", format_mrd(protocol.total_supply()));
    println!("  • Total staked: {}", format_mrd(protocol.total_staked()));
    println!(
        "  • Remaining mintable supply: {}",
        format_mrd(protocol.remaining_supply())
    );

    Ok(())
}
