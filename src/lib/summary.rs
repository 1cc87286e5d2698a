//! Everything there is to know about one poll, gathered for display

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone};
use tracing::debug;

use crate::lib::{
    calendar,
    config::{Config, Currency},
    progress::{self, Phase, Progress},
    time::TimeOfDay,
    weekday::{Weekday, WeekdaySet},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// local wall-clock time of the poll
    at: NaiveDateTime,
    weekday: Weekday,
    weekdays: WeekdaySet,
    currency: Currency,
    monthly_wage: f64,
    working_days: u32,
    month_length: u32,
    daily_wage: f64,
    work_hours: f64,
    hourly_wage: f64,
    window: (TimeOfDay, TimeOfDay),
    progress: Progress,
}

impl Summary {
    /// Compute all derived values for `config` at `now`
    pub fn at<Tz: TimeZone>(config: &Config, now: &DateTime<Tz>) -> Self {
        let at = now.naive_local();
        let date = at.date();
        let summary = Self {
            at,
            weekday: Weekday::of(date),
            weekdays: config.weekdays,
            currency: config.currency,
            monthly_wage: config.monthly_wage,
            working_days: calendar::working_days_in_month(config.weekdays, date),
            month_length: calendar::month_length(date.year(), date.month()),
            daily_wage: progress::daily_wage(config, date),
            work_hours: progress::work_hours_per_day(config),
            hourly_wage: progress::hourly_wage(config, date),
            window: (config.start_time, config.off_duty_time),
            progress: progress::compute(config, now),
        };
        debug!(
            at = %summary.at,
            monthly_wage = summary.monthly_wage,
            working_days = summary.working_days,
            start = %config.start_time,
            off_duty = %config.off_duty_time,
            weekdays = %summary.weekdays,
            currency = %summary.currency,
            daily_wage = summary.daily_wage,
            progress = summary.progress.progress,
            earnings = summary.progress.earnings,
            "status update"
        );
        summary
    }

    pub fn at_time(&self) -> NaiveDateTime {
        self.at
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn monthly_wage(&self) -> f64 {
        self.monthly_wage
    }

    pub fn working_days(&self) -> u32 {
        self.working_days
    }

    pub fn month_length(&self) -> u32 {
        self.month_length
    }

    pub fn daily_wage(&self) -> f64 {
        self.daily_wage
    }

    pub fn work_hours(&self) -> f64 {
        self.work_hours
    }

    pub fn hourly_wage(&self) -> f64 {
        self.hourly_wage
    }

    pub fn window(&self) -> (TimeOfDay, TimeOfDay) {
        self.window
    }

    pub fn phase(&self) -> Phase {
        self.progress.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress.progress
    }

    pub fn earnings(&self) -> f64 {
        self.progress.earnings
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;

    #[test]
    fn gathers_derived_values() {
        let cfg = Config { currency: Currency::Eur, ..Config::default() };
        let now = Utc.with_ymd_and_hms(2025, 9, 3, 15, 30, 0).unwrap();
        let sum = Summary::at(&cfg, &now);
        assert_eq!(sum.weekday(), Weekday::Wed);
        assert_eq!(sum.working_days(), 22);
        assert_eq!(sum.month_length(), 30);
        assert_eq!(sum.currency(), Currency::Eur);
        assert_eq!(sum.window(), (TimeOfDay::new(10, 0), TimeOfDay::new(21, 0)));
        assert_eq!(sum.phase(), Phase::InWindow);
        assert!((sum.work_hours() - 11.0).abs() < 1e-9);
        assert!((sum.daily_wage() - 10000.0 / 22.0).abs() < 1e-9);
        assert!((sum.hourly_wage() - 10000.0 / 22.0 / 11.0).abs() < 1e-9);
        assert!((sum.progress() - 0.5).abs() < 1e-9);
        assert!((sum.earnings() - sum.daily_wage() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn agrees_with_compute() {
        let cfg = Config::default();
        let now = Utc.with_ymd_and_hms(2025, 9, 7, 12, 0, 0).unwrap();
        let sum = Summary::at(&cfg, &now);
        assert_eq!(sum.phase(), Phase::NonWorkingDay);
        assert_eq!(sum.progress(), progress::compute(&cfg, &now).progress);
        // derived rates do not depend on today being worked
        assert_eq!(sum.working_days(), 22);
        assert!(sum.daily_wage() > 0.0);
    }
}
