// crates/souk-cli/src/commands/init.rs
//
// `souk init` — provision the storefront engine into a fresh state file:
// construct the reward-token ledger, construct the marketplace bound to
// it, and authorize the marketplace address as minter.

use clap::Args;

use souk_core::identity::Address;
use souk_engine::{Storefront, TokenConfig, MARKET_ADDRESS, TOKEN_ADDRESS};

use crate::state;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Administrator address: ledger admin and marketplace owner.
    #[arg(long)]
    admin: String,

    /// Reward-token name.
    #[arg(long, default_value = "Reward Token")]
    name: String,

    /// Reward-token symbol.
    #[arg(long, default_value = "RT")]
    symbol: String,

    /// Reward-token decimals.
    #[arg(long, default_value_t = 18)]
    decimals: u8,

    /// Initial supply in whole tokens, credited to the administrator.
    #[arg(long, default_value_t = 1_000_000_000)]
    supply: u64,
}

pub fn run(state_path: &str, args: &InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let admin = Address::from_hex(&args.admin)?;
    let front = Storefront::provision(
        admin,
        TokenConfig {
            name: args.name.clone(),
            symbol: args.symbol.clone(),
            decimals: args.decimals,
            initial_supply: args.supply,
        },
    )?;
    state::save(state_path, &front)?;

    println!("Storefront provisioned");
    println!("  Token:       {} ({}) at {}", args.name, args.symbol, TOKEN_ADDRESS);
    println!("  Marketplace: {}", MARKET_ADDRESS);
    println!("  Owner/Admin: {}", admin);
    println!("  Supply:      {} {}", args.supply, args.symbol);
    println!("  State file:  {}", state_path);

    Ok(())
}
