//! Counting working days
//!
//! Months are walked one calendar date at a time rather than in steps of
//! 24 hours, so that a day made 23 or 25 hours long by a daylight saving
//! transition is still counted exactly once.

use chrono::{Datelike, NaiveDate};

use crate::lib::weekday::{Weekday, WeekdaySet};

/// Number of days in `month` (1..=12) of the given year
///
/// Returns 0 for an invalid month.
pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn is_leap(year: i32) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

/// Whether `date` falls on one of the active weekdays
pub fn is_working_day(weekdays: WeekdaySet, date: NaiveDate) -> bool {
    weekdays.contains(Weekday::of(date))
}

/// Iterate over all dates of the month that contains `reference`
pub fn days_of_month(reference: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let month = reference.month();
    let first = reference.with_day(1);
    std::iter::successors(first, |d| d.succ_opt()).take_while(move |d| d.month() == month)
}

/// How many dates in the month of `reference` fall on an active weekday
///
/// `0` for an empty set, and the length of the month when all seven
/// days are active.
pub fn working_days_in_month(weekdays: WeekdaySet, reference: NaiveDate) -> u32 {
    if weekdays.is_empty() {
        return 0;
    }
    days_of_month(reference)
        .filter(|d| is_working_day(weekdays, *d))
        .count() as u32
}
