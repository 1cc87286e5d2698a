//! Periodic recomputation
//!
//! The settings are read again before each tick, so that edits to the
//! configuration file show up at the next refresh without a restart.

use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::lib::{clock::Clock, config::Config, summary::Summary};

/// Refresh period when none is given
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

pub struct Poller<C> {
    clock: C,
    interval: Duration,
    /// stop after this many ticks, never if `None`
    ticks: Option<u64>,
}

impl<C> Poller<C>
where
    C: Clock,
{
    pub fn new(clock: C, interval: Duration) -> Self {
        Self { clock, interval, ticks: None }
    }

    pub fn with_ticks(self, ticks: Option<u64>) -> Self {
        Self { ticks, ..self }
    }

    /// Compute and render once per interval, starting immediately
    ///
    /// `reload` provides the settings for each tick; when it fails the
    /// settings of the previous tick are kept.
    pub fn run<L, R>(&self, mut config: Config, mut reload: L, mut render: R)
    where
        L: FnMut() -> Option<Config>,
        R: FnMut(&Summary),
    {
        let mut tick = 0;
        loop {
            match reload() {
                Some(fresh) => {
                    if fresh != config {
                        debug!(tick, "configuration changed");
                    }
                    config = fresh;
                }
                None => warn!(tick, "configuration could not be reloaded, keeping previous settings"),
            }
            render(&Summary::at(&config, &self.clock.now()));
            tick += 1;
            if self.ticks.map_or(false, |max| tick >= max) {
                break;
            }
            thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{clock::FixedClock, progress::Phase};
    use chrono::{TimeZone, Utc};

    fn poller(ticks: u64) -> Poller<FixedClock<Utc>> {
        let now = Utc.with_ymd_and_hms(2025, 9, 3, 15, 30, 0).unwrap();
        Poller::new(FixedClock(now), Duration::ZERO).with_ticks(Some(ticks))
    }

    #[test]
    fn stops_after_ticks() {
        let mut seen = Vec::new();
        poller(3).run(Config::default(), || Some(Config::default()), |s| seen.push(s.clone()));
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|s| s.phase() == Phase::InWindow));
    }

    #[test]
    fn picks_up_new_settings() {
        let mut calls = 0;
        let mut wages = Vec::new();
        poller(3).run(
            Config::default(),
            || {
                calls += 1;
                Some(Config { monthly_wage: 1000.0 * calls as f64, ..Config::default() })
            },
            |s| wages.push(s.monthly_wage()),
        );
        assert_eq!(wages, vec![1000.0, 2000.0, 3000.0]);
    }

    #[test]
    fn keeps_last_good_settings() {
        let mut calls = 0;
        let mut wages = Vec::new();
        poller(4).run(
            Config::default(),
            || {
                calls += 1;
                if calls == 2 {
                    Some(Config { monthly_wage: 500.0, ..Config::default() })
                } else {
                    None
                }
            },
            |s| wages.push(s.monthly_wage()),
        );
        assert_eq!(wages, vec![10000.0, 500.0, 500.0, 500.0]);
    }
}
