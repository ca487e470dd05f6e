use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use sunshine_shared::pii::Masked;

/// Steps of the ticket purchase flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Select,
    Payment,
    Confirmation,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckoutStep::Select => "select",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmation => "confirmation",
        };
        f.write_str(s)
    }
}

/// Guest contact details collected on the selection step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Masked<String>,
    pub phone: Masked<String>,
}

impl ContactDetails {
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.phone.is_empty()
    }
}

/// Card form. Only presence is checked; no gateway is involved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentDetails {
    pub card_number: Masked<String>,
    pub card_name: Masked<String>,
    pub expiry: Masked<String>,
    pub cvv: Masked<String>,
}

impl PaymentDetails {
    pub fn is_complete(&self) -> bool {
        !self.card_number.is_empty()
            && !self.card_name.is_empty()
            && !self.expiry.is_empty()
            && !self.cvv.is_empty()
    }
}

/// The finalized purchase. Lives only as long as the checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub order_id: String,
    pub visit_date: NaiveDate,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub total_amount: i64,
    pub total_tickets: u32,
    pub tickets: BTreeMap<String, u32>,
    pub card_last_four: String,
    pub created_at: DateTime<Utc>,
}
