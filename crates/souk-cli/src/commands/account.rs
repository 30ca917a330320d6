// crates/souk-cli/src/commands/account.rs
//
// `souk deposit | balance | history` — cash funding and read-only
// account queries. Balances render in display units; history replays
// the ProductSold log for the buyer.

use clap::Args;
use tabled::Tabled;

use souk_core::amount::{format_units, parse_units};
use souk_core::identity::Address;
use souk_engine::purchase_history;

use crate::output::format_table;
use crate::state;

#[derive(Debug, Args)]
pub struct DepositArgs {
    /// Account to credit.
    #[arg(long)]
    to: String,

    /// Amount in display units.
    #[arg(long)]
    amount: String,
}

#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Account to inspect.
    #[arg(long)]
    address: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Buyer address.
    #[arg(long)]
    buyer: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Product")]
    product_id: u64,
    #[tabled(rename = "Units bought")]
    units: u64,
}

pub fn run_deposit(state_path: &str, args: &DepositArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut front = state::load(state_path)?;
    let to = Address::from_hex(&args.to)?;
    let amount = parse_units(&args.amount, front.ledger().decimals())?;
    front.deposit_cash(&to, amount)?;
    state::save(state_path, &front)?;
    println!(
        "Deposited {} to {}",
        format_units(amount, front.ledger().decimals()),
        to
    );
    Ok(())
}

pub fn run_balance(state_path: &str, args: &BalanceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let front = state::load(state_path)?;
    let address = Address::from_hex(&args.address)?;
    let decimals = front.ledger().decimals();
    println!("Balances for {}", address);
    println!(
        "  Cash:   {}",
        format_units(front.cash_balance_of(&address), decimals)
    );
    println!(
        "  Reward: {} {}",
        format_units(front.reward_balance_of(&address), decimals),
        front.ledger().symbol()
    );
    Ok(())
}

pub fn run_history(state_path: &str, args: &HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let front = state::load(state_path)?;
    let buyer = Address::from_hex(&args.buyer)?;
    let rows: Vec<HistoryRow> = purchase_history(&front, &buyer)
        .into_iter()
        .map(|entry| HistoryRow {
            product_id: entry.product_id,
            units: entry.units,
        })
        .collect();
    if rows.is_empty() {
        println!("No purchases for {}.", buyer);
    } else {
        println!("{}", format_table(&rows));
    }
    Ok(())
}
