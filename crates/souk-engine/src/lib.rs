// crates/souk-engine/src/lib.rs
//
// souk-engine: the settlement core of the Souk storefront.
//
// Two cooperating components evaluated synchronously and deterministically:
//   - RewardLedger: a fungible-balance ledger with a minter allow-list.
//   - Marketplace: product catalog, sale history, owner/pause access
//     control, and the atomic three-way purchase settlement (inventory
//     decrement, fund split, reward mint).
//
// The `Storefront` facade owns the pair (plus the cash book modeling the
// settlement currency) and serializes every operation through `&mut self`.

pub mod funds;
pub mod ledger;
pub mod market;
pub mod storefront;
pub mod views;

// Re-export key types for ergonomic access from downstream crates.
pub use funds::{CashBook, FundSink};
pub use ledger::RewardLedger;
pub use market::{Marketplace, Product, FEE_DIVISOR};
pub use storefront::{Storefront, TokenConfig, MARKET_ADDRESS, TOKEN_ADDRESS};
pub use views::{catalog, purchase_history, reward_balance_display, CatalogEntry, HistoryEntry};
