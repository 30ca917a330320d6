// crates/souk-cli/src/commands/admin.rs
//
// `souk pause | transfer-ownership` — owner controls.

use clap::Args;

use souk_core::identity::Address;

use crate::state;

#[derive(Debug, Args)]
pub struct PauseArgs {
    /// Caller address; must be the marketplace owner.
    #[arg(long)]
    caller: String,
}

#[derive(Debug, Args)]
pub struct TransferOwnershipArgs {
    /// Caller address; must be the current owner.
    #[arg(long)]
    caller: String,

    /// Address of the new owner.
    #[arg(long)]
    new_owner: String,
}

pub fn run_pause(state_path: &str, args: &PauseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut front = state::load(state_path)?;
    let caller = Address::from_hex(&args.caller)?;
    front.toggle_contract_paused(&caller)?;
    state::save(state_path, &front)?;
    if front.market().is_paused() {
        println!("Marketplace paused: new listings are rejected.");
    } else {
        println!("Marketplace unpaused.");
    }
    Ok(())
}

pub fn run_transfer_ownership(
    state_path: &str,
    args: &TransferOwnershipArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut front = state::load(state_path)?;
    let caller = Address::from_hex(&args.caller)?;
    let new_owner = Address::from_hex(&args.new_owner)?;
    front.transfer_ownership(&caller, new_owner)?;
    state::save(state_path, &front)?;
    println!("Marketplace owner is now {}", new_owner);
    Ok(())
}
