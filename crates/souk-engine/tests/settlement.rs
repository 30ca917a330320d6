// crates/souk-engine/tests/settlement.rs
//
// End-to-end settlement scenarios against the assembled Storefront:
// provisioning, access control, pause gating, exact payment, the 90/10
// fund split, reward minting, and supply conservation.

use souk_core::amount::{format_units, parse_units, scale_factor, Units};
use souk_core::error::SoukError;
use souk_core::identity::Address;
use souk_engine::{Storefront, TokenConfig, MARKET_ADDRESS};

const NAME: &str = "Reward Token";
const SYMBOL: &str = "RT";
const DECIMALS: u8 = 18;
const SUPPLY: u64 = 1_000_000_000;

fn owner() -> Address {
    Address::new([0x01; 20])
}

fn seller() -> Address {
    Address::new([0x02; 20])
}

fn buyer() -> Address {
    Address::new([0x03; 20])
}

fn deploy() -> Storefront {
    Storefront::provision(
        owner(),
        TokenConfig {
            name: NAME.into(),
            symbol: SYMBOL.into(),
            decimals: DECIMALS,
            initial_supply: SUPPLY,
        },
    )
    .unwrap()
}

/// "0.1" in base units.
fn unit_price() -> Units {
    parse_units("0.1", DECIMALS).unwrap()
}

#[test]
fn deployment_metadata_and_creator_balance() {
    let front = deploy();
    let ledger = front.ledger();
    assert_eq!(ledger.name(), NAME);
    assert_eq!(ledger.symbol(), SYMBOL);
    assert_eq!(ledger.decimals(), DECIMALS);

    let expected_supply = SUPPLY as Units * scale_factor(DECIMALS);
    assert_eq!(ledger.total_supply(), expected_supply);
    // the creator holds the entire supply; strangers hold nothing
    assert_eq!(ledger.balance_of(&owner()), expected_supply);
    assert_eq!(ledger.balance_of(&buyer()), 0);
}

#[test]
fn token_transfer_updates_balances() {
    let mut front = deploy();
    front
        .transfer_rewards(&owner(), &buyer(), 1_000_000_000_000)
        .unwrap();
    assert_eq!(front.reward_balance_of(&buyer()), 1_000_000_000_000);
}

#[test]
fn only_owner_controls_pause_and_ownership() {
    let mut front = deploy();
    let random = Address::new([0x09; 20]);
    let new_owner = Address::new([0x0A; 20]);

    assert!(matches!(
        front.toggle_contract_paused(&random),
        Err(SoukError::Unauthorized(_))
    ));
    front.toggle_contract_paused(&owner()).unwrap();
    assert!(front.market().is_paused());

    assert!(matches!(
        front.transfer_ownership(&random, new_owner),
        Err(SoukError::Unauthorized(_))
    ));
    front.transfer_ownership(&owner(), new_owner).unwrap();
    assert_eq!(*front.market().owner(), new_owner);
}

#[test]
fn pause_blocks_listing_but_not_purchasing() {
    let mut front = deploy();
    front
        .new_product(&seller(), unit_price(), 1000, 1)
        .unwrap();
    front.toggle_contract_paused(&owner()).unwrap();

    assert_eq!(
        front.new_product(&seller(), unit_price(), 1000, 1),
        Err(SoukError::Paused)
    );

    front.deposit_cash(&buyer(), unit_price()).unwrap();
    front.buy(&buyer(), 1, 1, unit_price()).unwrap();
    assert_eq!(front.market().sales_by_user(&buyer(), 1), 1);
}

#[test]
fn purchase_requires_exact_payment() {
    let mut front = deploy();
    front
        .new_product(&seller(), unit_price(), 1000, 1)
        .unwrap();
    front.deposit_cash(&buyer(), unit_price() * 200).unwrap();

    // 100 units at 0.1 cost exactly 10; 0.5 is rejected
    let wrong = parse_units("0.5", DECIMALS).unwrap();
    assert!(matches!(
        front.buy(&buyer(), 1, 100, wrong),
        Err(SoukError::IncorrectPayment { .. })
    ));

    front.buy(&buyer(), 1, 100, unit_price() * 100).unwrap();
    assert_eq!(front.market().sales_by_user(&buyer(), 1), 100);
}

#[test]
fn settlement_splits_funds_and_mints_rewards() {
    let mut front = deploy();
    // price 0.1, quantity 1000, 1 reward token per unit
    front
        .new_product(&seller(), unit_price(), 1000, 1)
        .unwrap();

    let paid = parse_units("1", DECIMALS).unwrap(); // 10 units at 0.1
    front.deposit_cash(&buyer(), paid).unwrap();
    front.buy(&buyer(), 1, 10, paid).unwrap();

    // seller receives 0.9, owner receives the 0.1 fee
    assert_eq!(
        front.cash_balance_of(&seller()),
        parse_units("0.9", DECIMALS).unwrap()
    );
    assert_eq!(
        front.cash_balance_of(&owner()),
        parse_units("0.1", DECIMALS).unwrap()
    );
    // buyer receives 10 display units of reward tokens
    assert_eq!(
        format_units(front.reward_balance_of(&buyer()), DECIMALS),
        "10"
    );
    // inventory and sale ledger updated
    assert_eq!(front.market().get_product(1).unwrap().quantity, 990);
    assert_eq!(front.market().sales_by_user(&buyer(), 1), 10);
}

#[test]
fn insufficient_stock_rejects_and_preserves_state() {
    let mut front = deploy();
    front.new_product(&seller(), unit_price(), 1, 1).unwrap();
    front.deposit_cash(&buyer(), unit_price() * 5).unwrap();

    assert!(matches!(
        front.buy(&buyer(), 1, 5, unit_price() * 5),
        Err(SoukError::InsufficientQuantity { .. })
    ));
    assert_eq!(front.market().get_product(1).unwrap().quantity, 1);
    assert_eq!(front.cash_balance_of(&buyer()), unit_price() * 5);
}

#[test]
fn minting_is_gated_on_the_allow_list() {
    let mut front = deploy();
    // the provisioning sequence registered the marketplace, nobody else
    assert!(front.ledger().is_minter(&MARKET_ADDRESS));
    assert!(!front.ledger().is_minter(&owner()));

    // an extra minter can be granted by the administrator only
    let treasurer = Address::new([0x0B; 20]);
    assert!(matches!(
        front.add_minter(&seller(), treasurer),
        Err(SoukError::Unauthorized(_))
    ));
    front.add_minter(&owner(), treasurer).unwrap();
    assert!(front.ledger().is_minter(&treasurer));
}

#[test]
fn supply_conservation_across_mixed_operations() {
    let mut front = deploy();
    front
        .new_product(&seller(), unit_price(), 1000, 3)
        .unwrap();
    front
        .deposit_cash(&buyer(), unit_price() * 100)
        .unwrap();

    front.buy(&buyer(), 1, 7, unit_price() * 7).unwrap();
    front
        .transfer_rewards(&owner(), &seller(), 12345)
        .unwrap();
    front.buy(&buyer(), 1, 2, unit_price() * 2).unwrap();
    front
        .transfer_rewards(&buyer(), &seller(), scale_factor(DECIMALS))
        .unwrap();

    let ledger = front.ledger();
    let holders = [owner(), seller(), buyer()];
    let held: Units = holders.iter().map(|a| ledger.balance_of(a)).sum();
    // the three participants are the only holders in this scenario
    assert_eq!(held, ledger.total_supply());

    // 9 units at 3 rewards each = 27 display units minted in total
    let minted = ledger.total_supply() - SUPPLY as Units * scale_factor(DECIMALS);
    assert_eq!(minted, 27 * scale_factor(DECIMALS));
}

#[test]
fn repeated_reads_are_idempotent() {
    let mut front = deploy();
    front
        .new_product(&seller(), unit_price(), 10, 1)
        .unwrap();

    let first = front.market().get_product(1).cloned();
    let second = front.market().get_product(1).cloned();
    assert_eq!(first, second);
    assert_eq!(
        front.reward_balance_of(&owner()),
        front.reward_balance_of(&owner())
    );
}

#[test]
fn catalog_and_history_views_replay_the_log() {
    let mut front = deploy();
    front
        .new_product(&seller(), unit_price(), 1000, 1)
        .unwrap();
    front
        .new_product(&seller(), unit_price() * 3, 5, 0)
        .unwrap();
    front.deposit_cash(&buyer(), unit_price() * 50).unwrap();
    front.buy(&buyer(), 1, 4, unit_price() * 4).unwrap();
    front.buy(&buyer(), 1, 6, unit_price() * 6).unwrap();

    let entries = souk_engine::catalog(&front);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].remaining, 990);
    assert_eq!(entries[1].listed_quantity, 5);

    let history = souk_engine::purchase_history(&front, &buyer());
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].units, 10);
}
