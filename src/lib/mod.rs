//! Domain of the wage indicator
//!
//! Calendar arithmetic, the earnings computation itself,
//! and reading the settings it depends on

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod parse;
pub mod progress;
pub mod summary;
pub mod time;
pub mod weekday;
