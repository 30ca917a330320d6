// crates/souk-engine/src/ledger.rs
//
// RewardLedger: a fungible-balance ledger with a minter allow-list.
//
// Two distinct authorization predicates, never conflated:
//   - the administrator (the constructing identity) manages the minter set;
//   - minters may grow the supply via `mint`.
//
// Invariant at every observable point: total_supply == sum(balances),
// and no balance is ever negative (amounts are unsigned).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use souk_core::amount::{scale_factor, Units};
use souk_core::error::{Result, SoukError};
use souk_core::identity::Address;

/// A fungible reward-token ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardLedger {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: Units,
    balances: BTreeMap<Address, Units>,
    admin: Address,
    minters: BTreeSet<Address>,
}

impl RewardLedger {
    /// Create a ledger, crediting `initial_supply` whole tokens (scaled by
    /// `10^decimals`) entirely to `admin`. The minter set starts empty.
    ///
    /// # Errors
    /// Returns `SoukError::Overflow` if the scaled supply is unrepresentable.
    pub fn new(
        admin: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        initial_supply: u64,
    ) -> Result<Self> {
        if decimals > souk_core::amount::MAX_DECIMALS {
            return Err(SoukError::Overflow);
        }
        let supply = (initial_supply as Units)
            .checked_mul(scale_factor(decimals))
            .ok_or(SoukError::Overflow)?;

        let mut balances = BTreeMap::new();
        if supply > 0 {
            balances.insert(admin, supply);
        }

        let ledger = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: supply,
            balances,
            admin,
            minters: BTreeSet::new(),
        };
        info!(
            symbol = %ledger.symbol,
            supply = %ledger.total_supply,
            admin = %admin,
            "reward ledger created"
        );
        Ok(ledger)
    }

    /// Add an identity to the minter set. Administrator only; idempotent.
    pub fn add_minter(&mut self, caller: &Address, minter: Address) -> Result<()> {
        if *caller != self.admin {
            return Err(SoukError::Unauthorized(format!(
                "{} is not the ledger administrator",
                caller
            )));
        }
        if self.minters.insert(minter) {
            info!(minter = %minter, "minter authorized");
        }
        Ok(())
    }

    /// Mint `amount` base units to `to`. Minters only.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not in the minter set.
    /// - `Overflow` if the supply would exceed the representable range.
    pub fn mint(&mut self, caller: &Address, to: &Address, amount: Units) -> Result<()> {
        if !self.minters.contains(caller) {
            return Err(SoukError::Unauthorized(format!(
                "{} is not an authorized minter",
                caller
            )));
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(SoukError::Overflow)?;

        self.total_supply = new_supply;
        *self.balances.entry(*to).or_insert(0) += amount;
        debug!(to = %to, amount, supply = %self.total_supply, "minted");
        Ok(())
    }

    /// Reverse a mint performed earlier in the same settlement operation.
    ///
    /// Only callable from inside the engine crate, as part of rolling back
    /// a failed purchase; `to` is guaranteed to hold at least `amount`.
    pub(crate) fn rollback_mint(&mut self, to: &Address, amount: Units) {
        if let Some(balance) = self.balances.get_mut(to) {
            *balance = balance.saturating_sub(amount);
        }
        self.total_supply = self.total_supply.saturating_sub(amount);
    }

    /// Move `amount` base units from the caller to `to`.
    ///
    /// A self-transfer is a validated no-op. The total supply never changes.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the caller's balance is short.
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: Units) -> Result<()> {
        let from_balance = self.balance_of(caller);
        if from_balance < amount {
            return Err(SoukError::InsufficientBalance {
                requested: amount,
                available: from_balance,
            });
        }
        if to == caller {
            return Ok(());
        }
        self.balances.insert(*caller, from_balance - amount);
        *self.balances.entry(*to).or_insert(0) += amount;
        Ok(())
    }

    /// Balance of an identity, in base units. Unknown identities hold 0;
    /// the lookup never creates an entry.
    pub fn balance_of(&self, addr: &Address) -> Units {
        self.balances.get(addr).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Units {
        self.total_supply
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn admin(&self) -> &Address {
        &self.admin
    }

    pub fn is_minter(&self, addr: &Address) -> bool {
        self.minters.contains(addr)
    }

    /// Sum of all balances; equals `total_supply` at every observable point.
    #[cfg(test)]
    fn balance_sum(&self) -> Units {
        self.balances.values().sum()
    }
}
