// crates/souk-core/src/lib.rs
//
// souk-core: Core types for the Souk settlement engine.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines account identities, integral amounts with display-unit
// conversion, the error taxonomy, and the append-only market event log.

pub mod amount;
pub mod error;
pub mod event;
pub mod identity;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use souk_core::Address;`

// Identity types
pub use identity::Address;

// Amount types and helpers
pub use amount::{format_units, parse_units, scale_factor, Units};

// Event types
pub use event::{EventLog, EventRecord, MarketEvent};

// Error type
pub use error::{Result, SoukError};
