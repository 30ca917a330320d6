// crates/souk-cli/src/main.rs
//
// CLI entrypoint for operating a Souk storefront.
//
// Provides subcommands for provisioning the engine, listing and buying
// products, funding cash accounts, and inspecting balances and purchase
// history. Engine state persists in a JSON file between invocations.

mod commands;
mod output;
mod state;

use clap::{Parser, Subcommand};
use commands::account::{BalanceArgs, DepositArgs, HistoryArgs};
use commands::admin::{PauseArgs, TransferOwnershipArgs};
use commands::buy::BuyArgs;
use commands::init::InitArgs;
use commands::product::ProductCmd;

/// Souk storefront CLI — provision and operate the settlement engine.
#[derive(Parser, Debug)]
#[command(
    name = "souk",
    version = "0.1.0",
    about = "Souk storefront CLI — marketplace, reward-token ledger, and purchase settlement"
)]
struct Cli {
    /// Path to the engine state file.
    #[arg(long, global = true, default_value = "souk-state.json")]
    state: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Provision the storefront: ledger, marketplace, and minter grant.
    Init(InitArgs),

    /// Product management: add, list.
    #[command(subcommand)]
    Product(ProductCmd),

    /// Purchase a product with exact payment.
    Buy(BuyArgs),

    /// Credit spendable settlement cash to an account.
    Deposit(DepositArgs),

    /// Show cash and reward balances for an address.
    Balance(BalanceArgs),

    /// Show a buyer's purchase history.
    History(HistoryArgs),

    /// Toggle the emergency pause (owner only).
    Pause(PauseArgs),

    /// Transfer marketplace ownership (owner only).
    TransferOwnership(TransferOwnershipArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init(args) => commands::init::run(&cli.state, args)?,
        Commands::Product(cmd) => commands::product::run(&cli.state, cmd)?,
        Commands::Buy(args) => commands::buy::run(&cli.state, args)?,
        Commands::Deposit(args) => commands::account::run_deposit(&cli.state, args)?,
        Commands::Balance(args) => commands::account::run_balance(&cli.state, args)?,
        Commands::History(args) => commands::account::run_history(&cli.state, args)?,
        Commands::Pause(args) => commands::admin::run_pause(&cli.state, args)?,
        Commands::TransferOwnership(args) => {
            commands::admin::run_transfer_ownership(&cli.state, args)?
        }
    }

    Ok(())
}
