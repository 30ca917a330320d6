// crates/souk-core/src/event.rs
//
// The market event log.
//
// `ProductAdded` and `ProductSold` form an append-only history that the
// external layer replays to reconstruct derived views (catalog listing,
// per-buyer purchase history). There is no subscriber registry: consumers
// pull the log and filter it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Address;

/// A marketplace notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A product was listed.
    ProductAdded { product_id: u64, quantity: u64 },
    /// A purchase settled.
    ProductSold {
        product_id: u64,
        buyer: Address,
        amount: u64,
    },
}

/// One entry in the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0, strictly increasing.
    pub seq: u64,
    /// Wall-clock time the event was appended.
    pub at: DateTime<Utc>,
    pub event: MarketEvent,
}

/// Append-only ordered log of market events.
///
/// Never truncated; records are only ever added at the tail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number.
    pub fn append(&mut self, event: MarketEvent) -> u64 {
        let seq = self.records.len() as u64;
        self.records.push(EventRecord {
            seq,
            at: Utc::now(),
            event,
        });
        seq
    }

    /// All records since inception, in order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replay only the `ProductAdded` events, in order.
    pub fn products_added(&self) -> impl Iterator<Item = &EventRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.event, MarketEvent::ProductAdded { .. }))
    }

    /// Replay only the `ProductSold` events for the given buyer, in order.
    pub fn sold_by<'a>(&'a self, buyer: &'a Address) -> impl Iterator<Item = &'a EventRecord> {
        self.records.iter().filter(move |r| {
            matches!(&r.event, MarketEvent::ProductSold { buyer: b, .. } if b == buyer)
        })
    }
}
