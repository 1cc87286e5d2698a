//! User-facing parameters of the computation
//!
//! A `Config` is a plain value: whoever owns the settings builds a new one
//! whenever they change and hands a copy to each computation.

use std::fmt;

use crate::lib::{
    time::TimeOfDay,
    weekday::WeekdaySet,
};

/// Snapshot of the settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// amount earned over a full calendar month, never negative
    pub monthly_wage: f64,
    pub start_time: TimeOfDay,
    pub off_duty_time: TimeOfDay,
    /// days of the week that are paid
    pub weekdays: WeekdaySet,
    /// only used for display
    pub currency: Currency,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(10000.0, "10:00", "21:00", WeekdaySet::workweek())
    }
}

impl Config {
    /// Build from textual times, parsed leniently
    ///
    /// A negative or non-finite wage is replaced with `0`.
    pub fn new(monthly_wage: f64, start: &str, off_duty: &str, weekdays: WeekdaySet) -> Self {
        Self {
            monthly_wage: sanitize_wage(monthly_wage),
            start_time: TimeOfDay::parse(start),
            off_duty_time: TimeOfDay::parse(off_duty),
            weekdays,
            currency: Currency::Usd,
        }
    }
}

/// Clamp a wage to the supported range
pub fn sanitize_wage(wage: f64) -> f64 {
    if wage.is_finite() && wage > 0.0 {
        wage
    } else {
        0.0
    }
}

/// Supported currencies, formatting only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cny,
    Krw,
    Inr,
    Sgd,
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cny,
        Currency::Krw,
        Currency::Inr,
        Currency::Sgd,
    ];

    /// Parse an ISO 4217 code (`"USD"`, `"eur"`, ...)
    pub fn from_code(code: &str) -> Option<Self> {
        use Currency::*;
        Some(match code.to_ascii_uppercase().as_str() {
            "USD" => Usd,
            "EUR" => Eur,
            "GBP" => Gbp,
            "JPY" => Jpy,
            "CNY" => Cny,
            "KRW" => Krw,
            "INR" => Inr,
            "SGD" => Sgd,
            _ => return None,
        })
    }

    pub fn code(self) -> &'static str {
        use Currency::*;
        match self {
            Usd => "USD",
            Eur => "EUR",
            Gbp => "GBP",
            Jpy => "JPY",
            Cny => "CNY",
            Krw => "KRW",
            Inr => "INR",
            Sgd => "SGD",
        }
    }

    pub fn symbol(self) -> &'static str {
        use Currency::*;
        match self {
            Usd | Sgd => "$",
            Eur => "€",
            Gbp => "£",
            Jpy | Cny => "¥",
            Krw => "₩",
            Inr => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
