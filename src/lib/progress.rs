//! How far into today's work window we are, and how much that is worth
//!
//! All functions are pure: they read a `Config` and a timestamp and never
//! fail. Any ratio whose divisor can be zero is guarded and yields `0`
//! instead of an infinity or a NaN.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone};
use std::fmt;
use tracing::trace;

use crate::lib::{
    calendar,
    config::Config,
    time::TimeOfDay,
};

/// Position of a timestamp relative to the work window of its day
///
/// Advancing time moves `BeforeWindow -> InWindow -> AfterWindow` on a
/// working day; `NonWorkingDay` lasts until the date changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NonWorkingDay,
    BeforeWindow,
    InWindow,
    AfterWindow,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Phase::*;
        let text = match self {
            NonWorkingDay => "day off",
            BeforeWindow => "before work",
            InWindow => "working",
            AfterWindow => "after work",
        };
        write!(f, "{}", text)
    }
}

/// Result of a single computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub phase: Phase,
    /// elapsed fraction of the window, in `0.0 ..= 1.0`
    pub progress: f64,
    /// `progress * daily_wage`
    pub earnings: f64,
}

impl Progress {
    fn idle(phase: Phase) -> Self {
        Self { phase, progress: 0.0, earnings: 0.0 }
    }

    fn done(daily_wage: f64) -> Self {
        Self { phase: Phase::AfterWindow, progress: 1.0, earnings: daily_wage }
    }
}

/// Length of the work window in hours, negative if it ends before it starts
pub fn work_hours_per_day(config: &Config) -> f64 {
    (config.off_duty_time.minutes() - config.start_time.minutes()) as f64 / 60.0
}

pub fn is_working_day(config: &Config, date: NaiveDate) -> bool {
    calendar::is_working_day(config.weekdays, date)
}

/// Share of the monthly wage earned by one working day of the month of `date`
pub fn daily_wage(config: &Config, date: NaiveDate) -> f64 {
    let days = calendar::working_days_in_month(config.weekdays, date);
    if days > 0 {
        config.monthly_wage / days as f64
    } else {
        0.0
    }
}

pub fn hourly_wage(config: &Config, date: NaiveDate) -> f64 {
    let hours = work_hours_per_day(config);
    if hours > 0.0 {
        daily_wage(config, date) / hours
    } else {
        0.0
    }
}

/// Longest stretch of wall-clock time a daylight saving transition can skip
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Instant at which the clock shows `time` on the date of `now`
///
/// A time skipped by a daylight saving transition moves forward to the first
/// instant after the gap, and a repeated time resolves to its first
/// occurrence. Falls back to `now` itself only when `time` is out of range.
fn instant_at<Tz: TimeZone>(now: &DateTime<Tz>, time: TimeOfDay) -> DateTime<Tz> {
    let naive = match now.date_naive().and_hms_opt(time.hour, time.minute, 0) {
        Some(naive) => naive,
        None => return now.clone(),
    };
    let tz = now.timezone();
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(first, _) => first,
        LocalResult::None => {
            trace!(%naive, "clock time skipped by a transition");
            (1..=MAX_GAP_MINUTES)
                .find_map(|m| tz.from_local_datetime(&(naive + Duration::minutes(m))).earliest())
                .unwrap_or_else(|| now.clone())
        }
    }
}

/// Start and end instants of the work window on the date of `now`
pub fn window<Tz: TimeZone>(config: &Config, now: &DateTime<Tz>) -> (DateTime<Tz>, DateTime<Tz>) {
    (instant_at(now, config.start_time), instant_at(now, config.off_duty_time))
}

fn minutes_between<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>) -> f64 {
    to.clone().signed_duration_since(from.clone()).num_milliseconds() as f64 / 60_000.0
}

/// Progress and earnings at `now`
///
/// A window that ends no later than it starts has no inside: it counts as
/// completed from its start time onwards and as not started before.
pub fn compute<Tz: TimeZone>(config: &Config, now: &DateTime<Tz>) -> Progress {
    let today = now.date_naive();
    if !is_working_day(config, today) {
        trace!(%today, "not a working day");
        return Progress::idle(Phase::NonWorkingDay);
    }
    let (start, end) = window(config, now);
    let total = minutes_between(&start, &end);
    let res = if total <= 0.0 {
        if *now >= start {
            Progress::done(daily_wage(config, today))
        } else {
            Progress::idle(Phase::BeforeWindow)
        }
    } else if *now < start {
        Progress::idle(Phase::BeforeWindow)
    } else if *now > end {
        Progress::done(daily_wage(config, today))
    } else {
        let worked = minutes_between(&start, now);
        let progress = (worked / total).clamp(0.0, 1.0);
        Progress {
            phase: Phase::InWindow,
            progress,
            earnings: progress * daily_wage(config, today),
        }
    };
    trace!(
        phase = ?res.phase,
        total_minutes = total,
        progress = res.progress,
        earnings = res.earnings,
        "classified work window"
    );
    res
}
