use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Days shown on the schedule page, starting today
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

pub const POSITIONS: [&str; 7] = [
    "Ride Operator",
    "Guest Services",
    "Food & Beverage",
    "Ticket Sales",
    "Security",
    "Maintenance",
    "Manager",
];

pub const LOCATIONS: [&str; 6] = [
    "Main Entrance",
    "Rides Area",
    "Food Court",
    "Parking Lot",
    "Gift Shop",
    "Water Park",
];

/// `HH:MM` wire format for shift times
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s).map_err(serde::de::Error::custom)
    }
}

/// Accepts `HH:MM` and `HH:MM:SS` (Postgres `time` renders with seconds)
pub fn parse_time(s: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(s, hhmm::FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "scheduled",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ShiftStatus::Scheduled),
            "completed" => Ok(ShiftStatus::Completed),
            "cancelled" => Ok(ShiftStatus::Cancelled),
            other => Err(ScheduleError::UnknownStatus(other.to_string())),
        }
    }
}

/// A scheduled staff assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: Uuid,
    pub user_id: String,
    pub shift_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub shift_start: NaiveTime,
    #[serde(with = "hhmm")]
    pub shift_end: NaiveTime,
    pub position: String,
    pub location: String,
    pub status: ShiftStatus,
    pub notes: Option<String>,
}

/// Add-shift form. Every field but `notes` is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewShift {
    pub shift_date: Option<NaiveDate>,
    pub shift_start: Option<String>,
    pub shift_end: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ScheduleError> {
    value.filter(|v| !v.is_empty()).ok_or(ScheduleError::MissingField(field))
}

impl NewShift {
    /// Build a `scheduled` shift for `user_id`. No overlap checking.
    pub fn into_shift(self, user_id: &str, today: NaiveDate) -> Result<Shift, ScheduleError> {
        let shift_date = self.shift_date.ok_or(ScheduleError::MissingField("shift_date"))?;
        let shift_start = required(self.shift_start, "shift_start")?;
        let shift_end = required(self.shift_end, "shift_end")?;
        let position = required(self.position, "position")?;
        let location = required(self.location, "location")?;

        if shift_date < today {
            return Err(ScheduleError::PastDate(shift_date));
        }

        Ok(Shift {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            shift_date,
            shift_start: parse_time(&shift_start)?,
            shift_end: parse_time(&shift_end)?,
            position,
            location,
            status: ShiftStatus::Scheduled,
            notes: self.notes.filter(|n| !n.is_empty()),
        })
    }
}

/// Monday of the week containing `today`, moved by `offset` weeks.
/// Sunday counts as the last day of its week.
pub fn week_start(today: NaiveDate, offset: i64) -> Result<NaiveDate, ScheduleError> {
    let since_monday = i64::from(today.weekday().num_days_from_monday());
    let monday = today - Duration::days(since_monday);
    Duration::try_weeks(offset)
        .and_then(|shift| monday.checked_add_signed(shift))
        .ok_or(ScheduleError::WeekOutOfRange(offset))
}

pub fn week_days(today: NaiveDate, offset: i64) -> Result<[NaiveDate; 7], ScheduleError> {
    let start = week_start(today, offset)?;
    // Sunday of the last representable week may not exist
    start
        .checked_add_signed(Duration::days(6))
        .ok_or(ScheduleError::WeekOutOfRange(offset))?;
    Ok(std::array::from_fn(|i| start + Duration::days(i as i64)))
}

/// One cell of the weekly calendar
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Short weekday, e.g. "Mon"
    pub weekday: String,
    /// e.g. "Oct 17"
    pub label: String,
    pub is_today: bool,
    pub shifts: Vec<ShiftView>,
}

/// Shift as shown in a calendar cell
#[derive(Debug, Clone, Serialize)]
pub struct ShiftView {
    #[serde(flatten)]
    pub shift: Shift,
    /// e.g. "9:00 AM - 5:00 PM"
    pub time_range: String,
}

/// Place each shift on the day whose date matches exactly
pub fn week_calendar(shifts: &[Shift], days: [NaiveDate; 7], today: NaiveDate) -> Vec<CalendarDay> {
    days.into_iter()
        .map(|date| CalendarDay {
            date,
            weekday: date.format("%a").to_string(),
            label: date.format("%b %-d").to_string(),
            is_today: date == today,
            shifts: shifts
                .iter()
                .filter(|s| s.shift_date == date)
                .map(|s| ShiftView {
                    shift: s.clone(),
                    time_range: format!("{} - {}", format_time(s.shift_start), format_time(s.shift_end)),
                })
                .collect(),
        })
        .collect()
}

/// 12-hour clock, e.g. `13:30` → `1:30 PM`
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Shift date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("Unknown shift status: {0}")]
    UnknownStatus(String),

    #[error("Week offset {0} is out of range")]
    WeekOutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn shift_on(d: NaiveDate, start: u32) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            user_id: "staff-1".to_string(),
            shift_date: d,
            shift_start: time(start, 0),
            shift_end: time(start + 8, 0),
            position: "Ride Operator".to_string(),
            location: "Rides Area".to_string(),
            status: ShiftStatus::Scheduled,
            notes: None,
        }
    }

    #[test]
    fn test_week_starts_on_monday() {
        // 2026-10-17 is a Saturday
        assert_eq!(week_start(date(2026, 10, 17), 0).unwrap(), date(2026, 10, 12));
        // Monday maps to itself
        assert_eq!(week_start(date(2026, 10, 12), 0).unwrap(), date(2026, 10, 12));
        // Sunday belongs to the week that began six days earlier
        assert_eq!(week_start(date(2026, 10, 18), 0).unwrap(), date(2026, 10, 12));
    }

    #[test]
    fn test_week_offsets() {
        let today = date(2026, 10, 17);
        assert_eq!(week_start(today, 1).unwrap(), date(2026, 10, 19));
        assert_eq!(week_start(today, -1).unwrap(), date(2026, 10, 5));
        assert_eq!(week_start(today, -3).unwrap(), date(2026, 9, 21));
    }

    #[test]
    fn test_extreme_offsets_are_rejected() {
        let today = date(2026, 10, 17);
        assert!(matches!(week_start(today, 100_000_000), Err(ScheduleError::WeekOutOfRange(100_000_000))));
        assert!(matches!(week_days(today, -100_000_000), Err(ScheduleError::WeekOutOfRange(_))));
        assert!(week_start(today, i64::MAX).is_err());
        assert!(week_days(today, i64::MIN).is_err());
    }

    #[test]
    fn test_current_week_contains_today() {
        let mut today = date(2026, 10, 1);
        for _ in 0..14 {
            let days = week_days(today, 0).unwrap();
            assert_eq!(days[0].weekday(), Weekday::Mon);
            assert!(days[0] <= today);
            assert!(days.contains(&today));
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_calendar_buckets_by_exact_date() {
        let today = date(2026, 10, 14);
        let shifts = vec![
            shift_on(today, 9),
            shift_on(today, 10),
            shift_on(date(2026, 10, 15), 8),
            shift_on(date(2026, 10, 30), 9),
        ];

        let calendar = week_calendar(&shifts, week_days(today, 0).unwrap(), today);
        assert_eq!(calendar.len(), 7);

        let wednesday = &calendar[2];
        assert!(wednesday.is_today);
        assert_eq!(wednesday.weekday, "Wed");
        assert_eq!(wednesday.label, "Oct 14");
        assert_eq!(wednesday.shifts.len(), 2);
        assert_eq!(wednesday.shifts[0].time_range, "9:00 AM - 5:00 PM");

        assert_eq!(calendar[3].shifts.len(), 1);
        let total: usize = calendar.iter().map(|d| d.shifts.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(time(9, 0)), "9:00 AM");
        assert_eq!(format_time(time(13, 30)), "1:30 PM");
        assert_eq!(format_time(time(0, 15)), "12:15 AM");
        assert_eq!(format_time(time(12, 0)), "12:00 PM");
    }

    #[test]
    fn test_new_shift_validation() {
        let today = date(2026, 10, 17);
        let form = NewShift {
            shift_date: Some(today),
            shift_start: Some("09:00".to_string()),
            shift_end: Some("17:00".to_string()),
            position: Some("Security".to_string()),
            location: Some("Main Entrance".to_string()),
            notes: Some(String::new()),
        };

        let shift = form.clone().into_shift("staff-1", today).unwrap();
        assert_eq!(shift.status, ShiftStatus::Scheduled);
        assert_eq!(shift.shift_start, time(9, 0));
        assert!(shift.notes.is_none());

        let past = NewShift { shift_date: Some(date(2026, 10, 16)), ..form.clone() };
        assert!(matches!(past.into_shift("staff-1", today), Err(ScheduleError::PastDate(_))));

        let no_location = NewShift { location: None, ..form.clone() };
        assert!(matches!(no_location.into_shift("staff-1", today), Err(ScheduleError::MissingField("location"))));

        let bad_time = NewShift { shift_end: Some("5pm".to_string()), ..form };
        assert!(matches!(bad_time.into_shift("staff-1", today), Err(ScheduleError::InvalidTime(_))));
    }

    #[test]
    fn test_shift_serializes_hhmm() {
        let shift = shift_on(date(2026, 10, 17), 9);
        let value = serde_json::to_value(&shift).unwrap();
        assert_eq!(value["shift_start"], "09:00");
        assert_eq!(value["shift_date"], "2026-10-17");
        assert_eq!(value["status"], "scheduled");
    }
}
