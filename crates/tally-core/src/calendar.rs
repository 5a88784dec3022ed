//! Calendar month arithmetic
//!
//! Every month-scoped figure in Tally is derived from a single injected
//! `today`, so these helpers never look at a live clock.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// First day of the month containing `date`
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Calendar month containing `today`, shifted by `offset` months
///
/// `offset = 0` is the current month, `-1` the previous one. The end of the
/// range is the day before the first of the following month, so February,
/// 30-day and 31-day months all come out right.
pub fn month_range(today: NaiveDate, offset: i32) -> DateRange {
    let first = first_day_of_month(today);
    let shift = Months::new(offset.unsigned_abs());
    let start = if offset >= 0 {
        first.checked_add_months(shift)
    } else {
        first.checked_sub_months(shift)
    }
    .unwrap_or(first);

    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);

    DateRange::new(start, end)
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    month_range(date, 0).end.day()
}
