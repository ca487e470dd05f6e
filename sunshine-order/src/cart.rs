use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use sunshine_catalog::ticket::{TicketCatalog, MAX_TICKETS_PER_TYPE};

/// Selected tickets keyed by ticket type id.
///
/// Invariant: no entry holds zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<String, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the quantity of `ticket_id` by `delta`, clamped to `[0, max]`.
    /// Returns the resulting quantity; zero removes the entry.
    pub fn adjust(&mut self, ticket_id: &str, delta: i64, max: u32) -> u32 {
        let current = i64::from(self.quantity(ticket_id));
        let next = (current.saturating_add(delta)).clamp(0, i64::from(max)) as u32;

        if next == 0 {
            self.lines.remove(ticket_id);
        } else {
            self.lines.insert(ticket_id.to_string(), next);
        }
        next
    }

    /// Same as [`Cart::adjust`] with the standard per-type limit
    pub fn adjust_default(&mut self, ticket_id: &str, delta: i64) -> u32 {
        self.adjust(ticket_id, delta, MAX_TICKETS_PER_TYPE)
    }

    pub fn quantity(&self, ticket_id: &str) -> u32 {
        self.lines.get(ticket_id).copied().unwrap_or(0)
    }

    pub fn total_tickets(&self) -> u32 {
        self.lines.values().sum()
    }

    /// Σ price × quantity. Ids missing from the catalog contribute nothing.
    pub fn total_amount(&self, catalog: &TicketCatalog) -> i64 {
        self.lines
            .iter()
            .map(|(id, qty)| i64::from(catalog.price_of(id)) * i64::from(*qty))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &BTreeMap<String, u32> {
        &self.lines
    }
}
