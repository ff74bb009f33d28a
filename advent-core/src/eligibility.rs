//! Whether a door may be opened on a given date.
//!
//! Door `d` opens on `start_date + (d - 1)` days and stays openable after that.

use chrono::{Duration, NaiveDate};

/// Signed number of whole days from `start_date` to `today`.
pub fn days_between(start_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - start_date).num_days()
}

/// True when enough days have passed since `start_date` for `day` to open.
pub fn is_eligible(day: u8, start_date: NaiveDate, today: NaiveDate) -> bool {
    i64::from(day) - 1 <= days_between(start_date, today)
}

/// First date on which `day` becomes eligible.
pub fn opens_on(day: u8, start_date: NaiveDate) -> NaiveDate {
    start_date + Duration::days(i64::from(day.max(1)) - 1)
}
