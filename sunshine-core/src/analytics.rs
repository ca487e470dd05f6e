use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// One day of park figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyAnalytics {
    pub date: NaiveDate,
    pub total_visitors: i64,
    pub ticket_revenue: f64,
    pub merchandise_sales: f64,
    pub food_beverage_sales: f64,
    pub weather: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct AnalyticsSummary {
    pub total_visitors: i64,
    /// Ticket revenue only
    pub total_revenue: f64,
    /// Rounded to the nearest visitor; 0 when the window is empty
    pub avg_visitors: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisitorPoint {
    pub date: NaiveDate,
    pub label: String,
    pub visitors: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub label: String,
    pub tickets: f64,
    pub merchandise: f64,
    pub food_beverage: f64,
}

/// Everything the analytics page needs
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub since: NaiveDate,
    pub summary: AnalyticsSummary,
    pub visitors: Vec<VisitorPoint>,
    pub revenue: Vec<RevenuePoint>,
}

/// First day included in a window of `days` ending today.
/// `None` when the window reaches past the representable calendar.
pub fn window_start(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|window| today.checked_sub_signed(window))
}

pub fn summarize(records: &[DailyAnalytics]) -> AnalyticsSummary {
    let total_visitors: i64 = records.iter().map(|r| r.total_visitors).sum();
    let total_revenue: f64 = records.iter().map(|r| r.ticket_revenue).sum();
    let avg_visitors = if records.is_empty() {
        0
    } else {
        (total_visitors as f64 / records.len() as f64).round() as i64
    };

    AnalyticsSummary { total_visitors, total_revenue, avg_visitors }
}

fn chart_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn report(since: NaiveDate, records: &[DailyAnalytics]) -> AnalyticsReport {
    AnalyticsReport {
        since,
        summary: summarize(records),
        visitors: records
            .iter()
            .map(|r| VisitorPoint { date: r.date, label: chart_label(r.date), visitors: r.total_visitors })
            .collect(),
        revenue: records
            .iter()
            .map(|r| RevenuePoint {
                date: r.date,
                label: chart_label(r.date),
                tickets: r.ticket_revenue,
                merchandise: r.merchandise_sales,
                food_beverage: r.food_beverage_sales,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, visitors: i64, tickets: f64) -> DailyAnalytics {
        DailyAnalytics {
            date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
            total_visitors: visitors,
            ticket_revenue: tickets,
            merchandise_sales: 3000.0,
            food_beverage_sales: 8000.0,
            weather: None,
        }
    }

    #[test]
    fn test_summary_over_week() {
        let records = vec![
            day(1, 1200, 24000.0),
            day(2, 1500, 30000.0),
            day(3, 1800, 36000.0),
            day(4, 1400, 28000.0),
            day(5, 2000, 40000.0),
            day(6, 2200, 44000.0),
            day(7, 1900, 38000.0),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_visitors, 12000);
        assert_eq!(summary.total_revenue, 240000.0);
        // 12000 / 7 = 1714.28...
        assert_eq!(summary.avg_visitors, 1714);
    }

    #[test]
    fn test_average_rounds_half_up() {
        let summary = summarize(&[day(1, 1, 0.0), day(2, 2, 0.0)]);
        assert_eq!(summary.avg_visitors, 2);
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(summarize(&[]), AnalyticsSummary::default());
    }

    #[test]
    fn test_report_series() {
        let since = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let report = report(since, &[day(1, 1200, 24000.0), day(2, 1500, 30000.0)]);
        assert_eq!(report.visitors.len(), 2);
        assert_eq!(report.visitors[0].label, "Jan 1");
        assert_eq!(report.revenue[1].tickets, 30000.0);
        assert_eq!(report.revenue[1].food_beverage, 8000.0);
    }

    #[test]
    fn test_window_start() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(window_start(today, 30), NaiveDate::from_ymd_opt(2026, 9, 17));
    }

    #[test]
    fn test_window_start_out_of_range() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(window_start(today, 100_000_000_000), None);
        assert_eq!(window_start(today, i64::MAX), None);
    }
}
