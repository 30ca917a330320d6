// crates/souk-engine/src/funds.rs
//
// The settlement-currency fund model.
//
// On the original platform the native currency moves inside the chain
// runtime; the embeddable engine makes that movement explicit behind the
// `FundSink` trait so settlement can target any cash backend, and so the
// rollback path is testable with a sink that fails on demand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use souk_core::amount::Units;
use souk_core::error::{Result, SoukError};
use souk_core::identity::Address;

/// Destination for outbound fund movement during settlement.
pub trait FundSink {
    /// Credit `amount` base units to `to`.
    fn credit(&mut self, to: &Address, amount: Units) -> Result<()>;

    /// Debit `amount` base units from `from`.
    fn debit(&mut self, from: &Address, amount: Units) -> Result<()>;
}

/// In-memory cash accounts for the settlement currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashBook {
    accounts: BTreeMap<Address, Units>,
}

impl CashBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// External faucet: credit an account outside of settlement
    /// (provisioning buyers with spendable cash).
    pub fn deposit(&mut self, to: &Address, amount: Units) -> Result<()> {
        self.credit(to, amount)
    }

    /// Cash balance of an account; unknown accounts hold 0.
    pub fn balance_of(&self, addr: &Address) -> Units {
        self.accounts.get(addr).copied().unwrap_or(0)
    }
}

impl FundSink for CashBook {
    fn credit(&mut self, to: &Address, amount: Units) -> Result<()> {
        let entry = self.accounts.entry(*to).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| SoukError::TransferFailed(format!("credit to {} overflows", to)))?;
        Ok(())
    }

    fn debit(&mut self, from: &Address, amount: Units) -> Result<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(SoukError::InsufficientBalance {
                requested: amount,
                available: balance,
            });
        }
        self.accounts.insert(*from, balance - amount);
        Ok(())
    }
}
