use serde::Serialize;

/// Marketing promotion shown on the promotions page. Display only, never
/// applied to a cart.
#[derive(Debug, Clone, Serialize)]
pub struct Promotion {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub discount: String,
    pub valid_until: String,
    pub terms: Vec<String>,
}

impl Promotion {
    fn new(id: u32, title: &str, description: &str, discount: &str, valid_until: &str, terms: [&str; 3]) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            discount: discount.to_string(),
            valid_until: valid_until.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn current() -> Vec<Promotion> {
        vec![
            Self::new(
                1,
                "Early Bird Special",
                "Book tickets 7 days in advance and save 20%",
                "20% OFF",
                "Valid through March 2025",
                ["Must book minimum 7 days in advance", "Non-refundable", "Valid weekdays only"],
            ),
            Self::new(
                2,
                "Birthday Celebration",
                "Free entry for birthday guests with valid ID",
                "FREE ENTRY",
                "Valid on your birthday + 3 days",
                ["Must present valid ID", "One free ticket per birthday", "Bring 3+ paying guests"],
            ),
            Self::new(
                3,
                "Weekend Family Pass",
                "Special weekend rates for families of 4+",
                "15% OFF",
                "Every weekend",
                ["Minimum 4 tickets", "Weekends only", "Cannot combine with other offers"],
            ),
            Self::new(
                4,
                "Student Discount",
                "Students save on weekday visits",
                "25% OFF",
                "Valid year-round",
                ["Valid student ID required", "Weekdays only", "Ages 13-25"],
            ),
            Self::new(
                5,
                "Senior Special",
                "Exclusive discounts for seniors 60+",
                "30% OFF",
                "Valid year-round",
                ["Ages 60 and above", "Valid ID required", "Any day of the week"],
            ),
            Self::new(
                6,
                "Season Pass",
                "Unlimited visits for 365 days",
                "BEST VALUE",
                "Valid for 1 year from purchase",
                ["Unlimited park entry", "Exclusive perks", "Payment plans available"],
            ),
        ]
    }
}
