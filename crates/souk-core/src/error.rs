// crates/souk-core/src/error.rs

use thiserror::Error;

use crate::amount::Units;

/// Engine-wide error taxonomy.
///
/// Every operation either fully applies or fails with one of these and
/// leaves no partial state change behind. There is no retry inside the
/// engine; retry, if any, is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoukError {
    /// Caller lacks the required role (owner, minter, or administrator).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Catalog mutation attempted while the marketplace is paused.
    #[error("marketplace is paused")]
    Paused,

    /// Unknown product id.
    #[error("product {0} not found")]
    NotFound(u64),

    /// Purchase exceeds the remaining stock.
    #[error("insufficient quantity: requested {requested}, available {available}")]
    InsufficientQuantity { requested: u64, available: u64 },

    /// Attached payment does not equal price * amount exactly.
    #[error("incorrect payment: expected {expected} base units, got {paid}")]
    IncorrectPayment { expected: Units, paid: Units },

    /// Transfer or debit exceeds the holder's balance.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Units, available: Units },

    /// Amount arithmetic would exceed the representable range.
    #[error("amount overflow")]
    Overflow,

    /// Outbound fund movement could not complete.
    #[error("fund transfer failed: {0}")]
    TransferFailed(String),

    /// Malformed address or amount string.
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, SoukError>;
