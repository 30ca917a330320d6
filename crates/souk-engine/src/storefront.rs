// crates/souk-engine/src/storefront.rs
//
// Storefront: single owner of the (Marketplace, RewardLedger, CashBook)
// triple.
//
// Every operation routes through `&mut self`, so the borrow checker
// enforces the one-writer model the settlement core requires: an
// operation — including the nested mint inside a purchase — runs to
// completion before any other can observe state. Embedding the engine in
// a concurrent service means wrapping the whole Storefront in one lock.

use serde::{Deserialize, Serialize};
use tracing::info;

use souk_core::amount::Units;
use souk_core::error::{Result, SoukError};
use souk_core::identity::Address;

use crate::funds::{CashBook, FundSink};
use crate::ledger::RewardLedger;
use crate::market::Marketplace;

/// Engine-reserved address the marketplace is known by in the ledger's
/// minter set. Spells "souk/marketplace" in the address bytes.
pub const MARKET_ADDRESS: Address = Address::new(*b"souk/marketplace\0\0\0\0");

/// Engine-reserved address of the reward-token ledger, held by the
/// marketplace as its opaque ledger handle.
pub const TOKEN_ADDRESS: Address = Address::new(*b"souk/reward-token\0\0\0");

/// Reward-token construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Initial supply in whole tokens, credited to the administrator.
    pub initial_supply: u64,
}

/// The assembled storefront engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storefront {
    market: Marketplace,
    ledger: RewardLedger,
    cash: CashBook,
}

impl Storefront {
    /// Provision the engine the way the original deployment script does:
    /// construct the ledger, construct the marketplace bound to it, then
    /// authorize the marketplace address as a minter. `admin` becomes both
    /// the ledger administrator and the marketplace owner.
    pub fn provision(admin: Address, token: TokenConfig) -> Result<Self> {
        let mut ledger = RewardLedger::new(
            admin,
            token.name,
            token.symbol,
            token.decimals,
            token.initial_supply,
        )?;
        let market = Marketplace::new(MARKET_ADDRESS, admin, TOKEN_ADDRESS);
        ledger.add_minter(&admin, MARKET_ADDRESS)?;
        info!(admin = %admin, market = %MARKET_ADDRESS, "storefront provisioned");
        Ok(Self {
            market,
            ledger,
            cash: CashBook::new(),
        })
    }

    /// List a product. See [`Marketplace::new_product`].
    pub fn new_product(
        &mut self,
        caller: &Address,
        price: Units,
        quantity: u64,
        reward_per_unit: u64,
    ) -> Result<u64> {
        self.market
            .new_product(caller, price, quantity, reward_per_unit)
    }

    /// Purchase with the payment drawn from the buyer's cash account.
    ///
    /// The buyer is debited `paid_value` up front (the facade's analogue
    /// of attaching value to the call) and refunded in full if settlement
    /// fails for any reason.
    pub fn buy(
        &mut self,
        caller: &Address,
        product_id: u64,
        amount: u64,
        paid_value: Units,
    ) -> Result<()> {
        self.cash.debit(caller, paid_value)?;
        let result = self.market.buy_product(
            caller,
            product_id,
            amount,
            paid_value,
            &mut self.ledger,
            &mut self.cash,
        );
        if let Err(err) = result {
            // Refund cannot overflow: the amount was just debited from
            // this same account.
            if self.cash.credit(caller, paid_value).is_err() {
                return Err(SoukError::TransferFailed(format!(
                    "refund of {} to {} failed after: {}",
                    paid_value, caller, err
                )));
            }
            return Err(err);
        }
        Ok(())
    }

    /// Transfer reward tokens between holders.
    pub fn transfer_rewards(&mut self, caller: &Address, to: &Address, amount: Units) -> Result<()> {
        self.ledger.transfer(caller, to, amount)
    }

    /// Grow the minter set. Ledger administrator only.
    pub fn add_minter(&mut self, caller: &Address, minter: Address) -> Result<()> {
        self.ledger.add_minter(caller, minter)
    }

    /// Credit spendable settlement cash to an account (provisioning).
    pub fn deposit_cash(&mut self, to: &Address, amount: Units) -> Result<()> {
        self.cash.deposit(to, amount)
    }

    pub fn toggle_contract_paused(&mut self, caller: &Address) -> Result<()> {
        self.market.toggle_contract_paused(caller)
    }

    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<()> {
        self.market.transfer_ownership(caller, new_owner)
    }

    pub fn reward_balance_of(&self, addr: &Address) -> Units {
        self.ledger.balance_of(addr)
    }

    pub fn cash_balance_of(&self, addr: &Address) -> Units {
        self.cash.balance_of(addr)
    }

    pub fn market(&self) -> &Marketplace {
        &self.market
    }

    pub fn ledger(&self) -> &RewardLedger {
        &self.ledger
    }

    pub fn cash(&self) -> &CashBook {
        &self.cash
    }
}
