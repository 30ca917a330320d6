// crates/souk-engine/src/views.rs
//
// Derived views the presentation layer consumes.
//
// Both are reconstructed the way the storefront client does it: replay
// the append-only event log, then resolve each hit with a point lookup —
// never by reaching into the component state directly.

use serde::Serialize;

use souk_core::amount::{format_units, Units};
use souk_core::event::MarketEvent;
use souk_core::identity::Address;

use crate::storefront::Storefront;

/// One row of the reconstructed catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub product_id: u64,
    /// Quantity announced at listing time.
    pub listed_quantity: u64,
    /// Current per-unit price, base units.
    pub price: Units,
    /// Units still available.
    pub remaining: u64,
    pub reward_per_unit: u64,
    pub seller: Address,
}

/// One row of a buyer's purchase history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub product_id: u64,
    /// Cumulative units this buyer has purchased of the product.
    pub units: u64,
}

/// Reconstruct the catalog: every `ProductAdded` since inception,
/// resolved to the product's current state.
pub fn catalog(front: &Storefront) -> Vec<CatalogEntry> {
    front
        .market()
        .events()
        .products_added()
        .filter_map(|record| match record.event {
            MarketEvent::ProductAdded {
                product_id,
                quantity,
            } => front.market().get_product(product_id).map(|product| CatalogEntry {
                product_id,
                listed_quantity: quantity,
                price: product.price,
                remaining: product.quantity,
                reward_per_unit: product.reward_per_unit,
                seller: product.seller,
            }),
            _ => None,
        })
        .collect()
}

/// Reconstruct a buyer's purchase history: `ProductSold` events filtered
/// by buyer, deduplicated by product id, resolved via the cumulative
/// sales record.
pub fn purchase_history(front: &Storefront, buyer: &Address) -> Vec<HistoryEntry> {
    let mut seen = Vec::new();
    for record in front.market().events().sold_by(buyer) {
        if let MarketEvent::ProductSold { product_id, .. } = record.event {
            if !seen.contains(&product_id) {
                seen.push(product_id);
            }
        }
    }
    seen.into_iter()
        .map(|product_id| HistoryEntry {
            product_id,
            units: front.market().sales_by_user(buyer, product_id),
        })
        .collect()
}

/// A holder's reward balance rendered in the ledger's display unit.
pub fn reward_balance_display(front: &Storefront, addr: &Address) -> String {
    format_units(front.reward_balance_of(addr), front.ledger().decimals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storefront::TokenConfig;
    use souk_core::amount::scale_factor;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    fn front_with_sales() -> Storefront {
        let mut front = Storefront::provision(
            addr(1),
            TokenConfig {
                name: "Reward Token".into(),
                symbol: "RT".into(),
                decimals: 18,
                initial_supply: 1_000_000_000,
            },
        )
        .unwrap();
        let price = scale_factor(18) / 10;
        front.new_product(&addr(2), price, 1000, 1).unwrap();
        front.new_product(&addr(2), price * 2, 50, 0).unwrap();
        front.deposit_cash(&addr(3), price * 100).unwrap();
        front.buy(&addr(3), 1, 10, price * 10).unwrap();
        front.buy(&addr(3), 1, 5, price * 5).unwrap();
        front.buy(&addr(3), 2, 2, price * 4).unwrap();
        front
    }

    #[test]
    fn test_catalog_resolves_current_state() {
        let front = front_with_sales();
        let entries = catalog(&front);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].product_id, 1);
        assert_eq!(entries[0].listed_quantity, 1000);
        assert_eq!(entries[0].remaining, 985);
        assert_eq!(entries[1].product_id, 2);
        assert_eq!(entries[1].remaining, 48);
    }

    #[test]
    fn test_history_dedupes_by_product() {
        let front = front_with_sales();
        let history = purchase_history(&front, &addr(3));
        // three purchases, two distinct products
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].product_id, 1);
        assert_eq!(history[0].units, 15);
        assert_eq!(history[1].product_id, 2);
        assert_eq!(history[1].units, 2);
    }

    #[test]
    fn test_history_empty_for_stranger() {
        let front = front_with_sales();
        assert!(purchase_history(&front, &addr(9)).is_empty());
    }

    #[test]
    fn test_reward_balance_display_units() {
        let front = front_with_sales();
        // 15 units of product 1 at 1 reward/unit, product 2 pays none
        assert_eq!(reward_balance_display(&front, &addr(3)), "15");
    }
}
