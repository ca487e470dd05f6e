use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Order;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 6;

/// Generate an order id: `SP{unix millis}{random base-36 suffix}`.
///
/// Uniqueness is probabilistic. Nothing downstream checks for collisions.
pub fn generate_order_id<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("SP{}{}", now.timestamp_millis(), suffix)
}

/// Long-form date as printed on receipts, e.g. "October 17th, 2026"
pub fn long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptBody<'a> {
    order_id: &'a str,
    date: String,
    tickets: &'a BTreeMap<String, u32>,
    total: i64,
    email: &'a str,
}

/// Downloadable order snapshot
#[derive(Debug, Clone)]
pub struct Receipt {
    pub file_name: String,
    pub body: String,
}

impl Receipt {
    pub const CONTENT_TYPE: &'static str = "application/json";

    pub fn for_order(order: &Order) -> Result<Self, serde_json::Error> {
        let body = ReceiptBody {
            order_id: &order.order_id,
            date: long_date(order.visit_date),
            tickets: &order.tickets,
            total: order.total_amount,
            email: order.email.expose(),
        };

        Ok(Self {
            file_name: format!("sunshine-park-ticket-{}.json", order.order_id),
            body: serde_json::to_string_pretty(&body)?,
        })
    }
}

/// Text encoded into the entrance QR code
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub order_id: String,
    pub date: String,
    /// Ticket count
    pub tickets: u32,
    pub amount: i64,
}

impl QrPayload {
    pub fn for_order(order: &Order) -> Self {
        Self {
            order_id: order.order_id.clone(),
            date: order.visit_date.format("%Y-%m-%d").to_string(),
            tickets: order.total_tickets,
            amount: order.total_amount,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sunshine_shared::pii::Masked;

    fn order() -> Order {
        let mut tickets = BTreeMap::new();
        tickets.insert("adult".to_string(), 2);
        tickets.insert("child".to_string(), 1);
        Order {
            order_id: "SP1700000000000ABC123".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
            email: Masked::from("guest@example.com"),
            phone: Masked::from("0812345678"),
            total_amount: 1597,
            total_tickets: 3,
            tickets,
            card_last_four: "4242".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_id_format() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_order_id(now, &mut rng);

        assert!(id.starts_with("SP1700000000123"));
        let suffix = &id["SP1700000000123".len()..];
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_long_date_ordinals() {
        let d = |day| long_date(NaiveDate::from_ymd_opt(2026, 10, day).unwrap());
        assert_eq!(d(1), "October 1st, 2026");
        assert_eq!(d(2), "October 2nd, 2026");
        assert_eq!(d(3), "October 3rd, 2026");
        assert_eq!(d(11), "October 11th, 2026");
        assert_eq!(d(13), "October 13th, 2026");
        assert_eq!(d(17), "October 17th, 2026");
        assert_eq!(d(22), "October 22nd, 2026");
        assert_eq!(d(31), "October 31st, 2026");
    }

    #[test]
    fn test_receipt_contents() {
        let receipt = Receipt::for_order(&order()).unwrap();
        assert_eq!(receipt.file_name, "sunshine-park-ticket-SP1700000000000ABC123.json");

        let value: serde_json::Value = serde_json::from_str(&receipt.body).unwrap();
        assert_eq!(value["orderId"], "SP1700000000000ABC123");
        assert_eq!(value["date"], "October 21st, 2026");
        assert_eq!(value["tickets"]["adult"], 2);
        assert_eq!(value["total"], 1597);
        assert_eq!(value["email"], "guest@example.com");
    }

    #[test]
    fn test_qr_payload() {
        let payload = QrPayload::for_order(&order());
        assert_eq!(
            payload.encode().unwrap(),
            r#"{"orderId":"SP1700000000000ABC123","date":"2026-10-21","tickets":3,"amount":1597}"#
        );
    }
}
