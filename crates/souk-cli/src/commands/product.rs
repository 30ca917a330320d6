// crates/souk-cli/src/commands/product.rs
//
// `souk product {add, list}` — catalog management.
//
// `add` mirrors the original listing script: price is given in display
// units of the settlement currency and converted to base units against
// the ledger's decimals. `list` reconstructs the catalog by replaying
// the event log.

use clap::Subcommand;
use tabled::Tabled;

use souk_core::amount::{format_units, parse_units};
use souk_core::identity::Address;
use souk_engine::catalog;

use crate::output::{format_json, format_table};
use crate::state;

/// Product subcommands.
#[derive(Debug, Subcommand)]
pub enum ProductCmd {
    /// List a product for sale.
    Add {
        /// Seller address.
        #[arg(long)]
        seller: String,
        /// Price per unit, in display units (e.g. "0.1").
        #[arg(long)]
        price: String,
        /// Units available.
        #[arg(long)]
        quantity: u64,
        /// Whole reward tokens minted per unit purchased.
        #[arg(long, default_value_t = 0)]
        reward: u64,
    },
    /// Show the catalog reconstructed from the event log.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Remaining")]
    remaining: u64,
    #[tabled(rename = "Listed")]
    listed: u64,
    #[tabled(rename = "Reward/Unit")]
    reward: u64,
    #[tabled(rename = "Seller")]
    seller: String,
}

pub fn run(state_path: &str, cmd: &ProductCmd) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ProductCmd::Add {
            seller,
            price,
            quantity,
            reward,
        } => {
            let mut front = state::load(state_path)?;
            let seller = Address::from_hex(seller)?;
            let price_units = parse_units(price, front.ledger().decimals())?;
            let product_id = front.new_product(&seller, price_units, *quantity, *reward)?;
            state::save(state_path, &front)?;
            println!("Product #{} added", product_id);
        }
        ProductCmd::List { json } => {
            let front = state::load(state_path)?;
            let decimals = front.ledger().decimals();
            if *json {
                println!("{}", format_json(&catalog(&front)));
                return Ok(());
            }
            let rows: Vec<CatalogRow> = catalog(&front)
                .into_iter()
                .map(|entry| CatalogRow {
                    id: entry.product_id,
                    price: format_units(entry.price, decimals),
                    remaining: entry.remaining,
                    listed: entry.listed_quantity,
                    reward: entry.reward_per_unit,
                    seller: entry.seller.to_string(),
                })
                .collect();
            if rows.is_empty() {
                println!("No products listed.");
            } else {
                println!("{}", format_table(&rows));
            }
        }
    }

    Ok(())
}
