use serde::{Deserialize, Serialize};

/// Maximum quantity of a single ticket type in one cart
pub const MAX_TICKETS_PER_TYPE: u32 = 10;

/// A ticket the park sells at the gate and online
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketType {
    pub id: String,
    pub name: String,
    /// Who the ticket is for, e.g. "Ages 3-12"
    pub description: String,
    /// Unit price in whole baht
    pub price: i32,
    pub features: Vec<String>,
}

/// Immutable table of ticket types, built once at startup
#[derive(Debug, Clone, Serialize)]
pub struct TicketCatalog {
    tickets: Vec<TicketType>,
}

impl TicketCatalog {
    pub fn new(tickets: Vec<TicketType>) -> Self {
        Self { tickets }
    }

    /// The four tickets sold at Sunshine Park
    pub fn standard() -> Self {
        let base = ["All rides and attractions", "Park map included", "Valid for one day"];
        let features = |extra: &[&str]| -> Vec<String> {
            base.iter().chain(extra.iter()).map(|f| f.to_string()).collect()
        };

        Self::new(vec![
            TicketType {
                id: "adult".to_string(),
                name: "Adult Ticket".to_string(),
                description: "Ages 13 and above".to_string(),
                price: 599,
                features: features(&[]),
            },
            TicketType {
                id: "child".to_string(),
                name: "Child Ticket".to_string(),
                description: "Ages 3-12".to_string(),
                price: 399,
                features: features(&[]),
            },
            TicketType {
                id: "senior".to_string(),
                name: "Senior Ticket".to_string(),
                description: "Ages 60 and above".to_string(),
                price: 449,
                features: features(&[]),
            },
            TicketType {
                id: "family".to_string(),
                name: "Family Pass".to_string(),
                description: "2 Adults + 2 Children".to_string(),
                price: 1699,
                features: features(&["Save 15%"]),
            },
        ])
    }

    pub fn get(&self, id: &str) -> Option<&TicketType> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Unit price for a ticket id. Unknown ids price at zero.
    pub fn price_of(&self, id: &str) -> i32 {
        self.get(id).map(|t| t.price).unwrap_or(0)
    }

    pub fn tickets(&self) -> &[TicketType] {
        &self.tickets
    }
}

impl Default for TicketCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_prices() {
        let catalog = TicketCatalog::standard();
        assert_eq!(catalog.tickets().len(), 4);
        assert_eq!(catalog.price_of("adult"), 599);
        assert_eq!(catalog.price_of("child"), 399);
        assert_eq!(catalog.price_of("senior"), 449);
        assert_eq!(catalog.price_of("family"), 1699);
    }

    #[test]
    fn test_unknown_ticket_prices_at_zero() {
        let catalog = TicketCatalog::standard();
        assert!(!catalog.contains("vip"));
        assert_eq!(catalog.price_of("vip"), 0);
    }

    #[test]
    fn test_family_pass_has_savings_feature() {
        let catalog = TicketCatalog::standard();
        let family = catalog.get("family").unwrap();
        assert_eq!(family.features.len(), 4);
        assert_eq!(family.features.last().unwrap(), "Save 15%");
    }
}
