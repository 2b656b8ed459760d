//! Day-granular date arithmetic for the booking calendar. Days travel
//! through the app as canonical `YYYY-MM-DD` keys, never as raw
//! date-time values, so equality and set membership are
//! timezone-proof. The keys also order lexicographically exactly as
//! they order chronologically.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// How far ahead a reservation may start or end.
pub const BOOKING_HORIZON_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("not a calendar date: {0}")]
    InvalidDay(String),
    #[error("end date must be after start date")]
    InvalidRange,
}

/// Formats a date into its local-calendar day key. No UTC conversion
/// happens here or anywhere else in the crate.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

pub fn parse_day(key: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(key, DAY_FORMAT).map_err(|_| DateError::InvalidDay(key.to_string()))
}

/// Whole days between two day keys. Subtraction happens on naive
/// calendar dates with a fixed implicit time-of-day, so a
/// daylight-saving shift inside the range can never skew the count.
pub fn day_count(start: &str, end: &str) -> Result<u32, DateError> {
    let start = parse_day(start)?;
    let end = parse_day(end)?;
    let days = end.signed_duration_since(start).num_days();
    if days <= 0 {
        return Err(DateError::InvalidRange);
    }
    Ok(days as u32)
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDay {
    /// Canonical day key for classification and click handling.
    pub day: String,
    /// 1-based day of month, for rendering the cell label.
    pub day_of_month: u32,
    pub in_current_month: bool,
}

/// Calendar grid for one month: Sunday-first, padded with the leading
/// and trailing out-of-month days so every rendered week is complete.
/// Deterministic for a given input; an invalid month yields an empty
/// grid.
pub fn month_grid(year: i32, month: u32) -> Vec<GridDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last = last_day_of_month(first);

    let lead = first.weekday().num_days_from_sunday() as i64;
    let trail = 6 - last.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead);
    let end = last + Duration::days(trail);

    let mut days = Vec::with_capacity(42);
    let mut cursor = start;
    while cursor <= end {
        days.push(GridDay {
            day: day_key(cursor),
            day_of_month: cursor.day(),
            in_current_month: cursor.year() == year && cursor.month() == month,
        });
        cursor += Duration::days(1);
    }
    days
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        .unwrap_or(first)
}

/// Inclusive booking window: from `today` to the horizon. Month-end
/// overflow clamps the way calendars do (Aug 31 + 6 months = Feb 28).
pub fn booking_window(today: NaiveDate) -> (String, String) {
    let max = today
        .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
        .unwrap_or(today);
    (day_key(today), day_key(max))
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_count_adjacent_days() {
        assert_eq!(day_count("2025-06-05", "2025-06-06").unwrap(), 1);
    }

    #[test]
    fn test_day_count_one_week() {
        assert_eq!(day_count("2025-06-05", "2025-06-12").unwrap(), 7);
    }

    #[test]
    fn test_day_count_across_month_boundary() {
        assert_eq!(day_count("2025-06-28", "2025-07-03").unwrap(), 5);
    }

    #[test]
    fn test_day_count_rejects_equal_and_reversed() {
        assert_eq!(
            day_count("2025-06-05", "2025-06-05").unwrap_err(),
            DateError::InvalidRange
        );
        assert_eq!(
            day_count("2025-06-12", "2025-06-05").unwrap_err(),
            DateError::InvalidRange
        );
    }

    #[test]
    fn test_day_count_rejects_garbage() {
        assert!(matches!(
            day_count("not-a-day", "2025-06-05").unwrap_err(),
            DateError::InvalidDay(_)
        ));
    }

    #[test]
    fn test_month_grid_full_weeks() {
        // June 2025 starts on a Sunday and ends on a Monday.
        let grid = month_grid(2025, 6);
        assert_eq!(grid.len() % 7, 0);
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].day, "2025-06-01");
        assert_eq!(grid.last().unwrap().day, "2025-07-05");
        assert_eq!(
            parse_day(&grid[0].day).unwrap().weekday(),
            chrono::Weekday::Sun
        );
    }

    #[test]
    fn test_month_grid_covers_month_exactly_once_in_order() {
        for (year, month, len) in [(2025i32, 6u32, 30u32), (2024, 2, 29), (2025, 2, 28)] {
            let in_month: Vec<u32> = month_grid(year, month)
                .into_iter()
                .filter(|cell| cell.in_current_month)
                .map(|cell| cell.day_of_month)
                .collect();
            let expected: Vec<u32> = (1..=len).collect();
            assert_eq!(in_month, expected, "{year}-{month}");
        }
    }

    #[test]
    fn test_month_grid_leading_padding() {
        // July 2025 starts on a Tuesday, so two leading cells.
        let grid = month_grid(2025, 7);
        assert!(!grid[0].in_current_month);
        assert!(!grid[1].in_current_month);
        assert_eq!(grid[0].day, "2025-06-29");
        assert!(grid[2].in_current_month);
        assert_eq!(grid[2].day, "2025-07-01");
    }

    #[test]
    fn test_month_grid_invalid_month_is_empty() {
        assert!(month_grid(2025, 13).is_empty());
        assert!(month_grid(2025, 0).is_empty());
    }

    #[test]
    fn test_booking_window_spans_six_months() {
        let today = parse_day("2025-06-05").unwrap();
        assert_eq!(
            booking_window(today),
            ("2025-06-05".to_string(), "2025-12-05".to_string())
        );
    }

    #[test]
    fn test_booking_window_clamps_month_end() {
        let today = parse_day("2025-08-31").unwrap();
        assert_eq!(booking_window(today).1, "2026-02-28");
    }

    #[test]
    fn test_month_navigation_wraps() {
        assert_eq!(next_month(2025, 12), (2026, 1));
        assert_eq!(next_month(2025, 6), (2025, 7));
        assert_eq!(prev_month(2025, 1), (2024, 12));
        assert_eq!(prev_month(2025, 6), (2025, 5));
    }
}
