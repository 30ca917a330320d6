// crates/souk-cli/src/commands/buy.rs
//
// `souk buy` — purchase units of a product.
//
// The payment defaults to the exact price * amount the settlement
// requires; an explicit --pay lets an operator reproduce the
// incorrect-payment rejection.

use clap::Args;

use souk_core::amount::{format_units, parse_units, Units};
use souk_core::error::SoukError;
use souk_core::identity::Address;
use souk_engine::FEE_DIVISOR;

use crate::state;

#[derive(Debug, Args)]
pub struct BuyArgs {
    /// Buyer address; the payment is drawn from this cash account.
    #[arg(long)]
    buyer: String,

    /// Product id.
    #[arg(long)]
    product: u64,

    /// Units to purchase.
    #[arg(long)]
    amount: u64,

    /// Payment in display units; defaults to the exact price * amount.
    #[arg(long)]
    pay: Option<String>,
}

pub fn run(state_path: &str, args: &BuyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut front = state::load(state_path)?;
    let buyer = Address::from_hex(&args.buyer)?;
    let decimals = front.ledger().decimals();

    let paid: Units = match &args.pay {
        Some(s) => parse_units(s, decimals)?,
        None => {
            let product = front
                .market()
                .get_product(args.product)
                .ok_or(SoukError::NotFound(args.product))?;
            product
                .price
                .checked_mul(args.amount as Units)
                .ok_or(SoukError::Overflow)?
        }
    };

    front.buy(&buyer, args.product, args.amount, paid)?;
    state::save(state_path, &front)?;

    let fee = paid / FEE_DIVISOR;
    println!(
        "Bought {} unit(s) of product #{} for {}",
        args.amount,
        args.product,
        format_units(paid, decimals)
    );
    println!("  Seller share: {}", format_units(paid - fee, decimals));
    println!("  Owner fee:    {}", format_units(fee, decimals));
    println!(
        "  Reward balance ({}): {}",
        front.ledger().symbol(),
        format_units(front.reward_balance_of(&buyer), decimals)
    );

    Ok(())
}
