// crates/souk-engine/src/market.rs
//
// Marketplace: product catalog, sale history, owner/pause access control,
// and the purchase settlement operation.
//
// Settlement follows checks-effects-interactions: all owned state (stock,
// sale ledger, reward mint) is committed before any outbound fund movement
// is attempted, and a failed transfer rolls the commit phase back in full.
// The operation is all-or-nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use souk_core::amount::{scale_factor, Units};
use souk_core::error::{Result, SoukError};
use souk_core::event::{EventLog, MarketEvent};
use souk_core::identity::Address;

use crate::funds::FundSink;
use crate::ledger::RewardLedger;

/// Marketplace fee divisor: 1/10th (10%) of every payment goes to the
/// owner, floor division. The remainder of the split stays with the
/// seller, so `fee + seller_share == paid_value` exactly.
pub const FEE_DIVISOR: Units = 10;

/// A listed product.
///
/// `quantity` only ever decreases; a product at 0 remains visible in the
/// catalog (sold out) but is unpurchasable. `seller` is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Cost per unit, in base units of the settlement currency.
    pub price: Units,
    /// Remaining units available.
    pub quantity: u64,
    /// Reward tokens minted per unit purchased, in whole tokens.
    pub reward_per_unit: u64,
    /// Identity of the creator.
    pub seller: Address,
}

/// The marketplace component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marketplace {
    /// Address under which this marketplace is known to the reward
    /// ledger's minter set.
    address: Address,
    owner: Address,
    paused: bool,
    /// Next id to assign; starts at 1, increments by 1, never reused.
    next_product_id: u64,
    products: BTreeMap<u64, Product>,
    /// Cumulative units purchased, keyed by buyer then product id.
    sales: BTreeMap<Address, BTreeMap<u64, u64>>,
    events: EventLog,
    /// Opaque handle to the ledger this marketplace is authorized against.
    ledger_address: Address,
}

impl Marketplace {
    /// Create a marketplace bound to the ledger at `ledger_address`.
    /// The constructing identity becomes the owner; the pause flag starts
    /// cleared.
    pub fn new(address: Address, owner: Address, ledger_address: Address) -> Self {
        Self {
            address,
            owner,
            paused: false,
            next_product_id: 1,
            products: BTreeMap::new(),
            sales: BTreeMap::new(),
            events: EventLog::new(),
            ledger_address,
        }
    }

    /// List a product, returning its assigned id.
    ///
    /// Zero-price and zero-quantity listings are legal; they are simply
    /// free or unpurchasable.
    ///
    /// # Errors
    /// Returns `Paused` while the marketplace is paused.
    pub fn new_product(
        &mut self,
        caller: &Address,
        price: Units,
        quantity: u64,
        reward_per_unit: u64,
    ) -> Result<u64> {
        if self.paused {
            return Err(SoukError::Paused);
        }
        let product_id = self.next_product_id;
        self.products.insert(
            product_id,
            Product {
                price,
                quantity,
                reward_per_unit,
                seller: *caller,
            },
        );
        self.next_product_id += 1;
        self.events
            .append(MarketEvent::ProductAdded { product_id, quantity });
        info!(product_id, quantity, seller = %caller, "product listed");
        Ok(product_id)
    }

    /// Purchase `amount` units of a product with an attached payment of
    /// `paid_value` base units.
    ///
    /// On success the stock is decremented, the cumulative sale record for
    /// `(caller, product_id)` grows by `amount`, `reward_per_unit * amount`
    /// whole reward tokens are minted to the caller, and `paid_value` is
    /// split 90/10 between seller and owner through `funds`.
    ///
    /// Purchasing is deliberately not gated by the pause flag; pause only
    /// stops new listings.
    ///
    /// # Errors
    /// - `NotFound` for an unknown product id.
    /// - `InsufficientQuantity` if `amount` exceeds the remaining stock.
    /// - `IncorrectPayment` unless `paid_value == price * amount` exactly.
    /// - `Unauthorized` if this marketplace is not in the ledger's minter set.
    /// - `TransferFailed` if either outbound credit fails; all effects,
    ///   including the mint, are rolled back.
    pub fn buy_product(
        &mut self,
        caller: &Address,
        product_id: u64,
        amount: u64,
        paid_value: Units,
        ledger: &mut RewardLedger,
        funds: &mut dyn FundSink,
    ) -> Result<()> {
        // Checks.
        let product = self
            .products
            .get(&product_id)
            .ok_or(SoukError::NotFound(product_id))?;
        if amount > product.quantity {
            return Err(SoukError::InsufficientQuantity {
                requested: amount,
                available: product.quantity,
            });
        }
        let expected = product
            .price
            .checked_mul(amount as Units)
            .ok_or(SoukError::Overflow)?;
        if paid_value != expected {
            return Err(SoukError::IncorrectPayment {
                expected,
                paid: paid_value,
            });
        }
        let seller = product.seller;
        let reward = (product.reward_per_unit as Units)
            .checked_mul(amount as Units)
            .and_then(|r| r.checked_mul(scale_factor(ledger.decimals())))
            .ok_or(SoukError::Overflow)?;

        // Effects: commit owned state before any outbound movement.
        if let Some(product) = self.products.get_mut(&product_id) {
            product.quantity -= amount;
        }
        *self
            .sales
            .entry(*caller)
            .or_default()
            .entry(product_id)
            .or_insert(0) += amount;
        if let Err(err) = ledger.mint(&self.address, caller, reward) {
            self.rollback_settlement(caller, product_id, amount, 0, ledger);
            return Err(err);
        }

        // Interactions: split the payment between seller and owner.
        let fee = paid_value / FEE_DIVISOR;
        let seller_share = paid_value - fee;
        if let Err(err) = funds.credit(&seller, seller_share) {
            self.rollback_settlement(caller, product_id, amount, reward, ledger);
            return Err(SoukError::TransferFailed(err.to_string()));
        }
        if let Err(err) = funds.credit(&self.owner, fee) {
            if funds.debit(&seller, seller_share).is_err() {
                warn!(seller = %seller, seller_share, "could not reclaim seller share");
            }
            self.rollback_settlement(caller, product_id, amount, reward, ledger);
            return Err(SoukError::TransferFailed(err.to_string()));
        }

        self.events.append(MarketEvent::ProductSold {
            product_id,
            buyer: *caller,
            amount,
        });
        info!(
            product_id,
            buyer = %caller,
            amount,
            seller_share = %seller_share,
            fee = %fee,
            "purchase settled"
        );
        Ok(())
    }

    /// Undo the commit phase of a failed purchase: restore the stock,
    /// back out the sale record, and reverse the reward mint.
    fn rollback_settlement(
        &mut self,
        buyer: &Address,
        product_id: u64,
        amount: u64,
        reward: Units,
        ledger: &mut RewardLedger,
    ) {
        if let Some(product) = self.products.get_mut(&product_id) {
            product.quantity += amount;
        }
        if let Some(per_product) = self.sales.get_mut(buyer) {
            if let Some(units) = per_product.get_mut(&product_id) {
                *units -= amount;
            }
        }
        if reward > 0 {
            ledger.rollback_mint(buyer, reward);
        }
        warn!(product_id, buyer = %buyer, amount, "settlement rolled back");
    }

    /// Flip the paused flag. Owner only.
    pub fn toggle_contract_paused(&mut self, caller: &Address) -> Result<()> {
        if *caller != self.owner {
            return Err(SoukError::Unauthorized(format!(
                "{} is not the marketplace owner",
                caller
            )));
        }
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        Ok(())
    }

    /// Hand the marketplace to a new owner, effective immediately.
    /// Owner only.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<()> {
        if *caller != self.owner {
            return Err(SoukError::Unauthorized(format!(
                "{} is not the marketplace owner",
                caller
            )));
        }
        self.owner = new_owner;
        info!(owner = %new_owner, "ownership transferred");
        Ok(())
    }

    /// Look up a product. `None` for ids that were never assigned.
    pub fn get_product(&self, product_id: u64) -> Option<&Product> {
        self.products.get(&product_id)
    }

    /// Cumulative units `buyer` has purchased of `product_id`; 0 when the
    /// pair has no sale record.
    pub fn sales_by_user(&self, buyer: &Address, product_id: u64) -> u64 {
        self.sales
            .get(buyer)
            .and_then(|per_product| per_product.get(&product_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn ledger_address(&self) -> &Address {
        &self.ledger_address
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// The append-only event history.
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}
