//! Wall-clock times of day, as written in the configuration (`"HH:MM"`)
//!
//! Parsing is lenient: `TimeOfDay::parse` never fails, anything it cannot
//! make sense of becomes `0`. `TimeOfDay::parse_strict` is there for callers
//! who would rather be told.

use std::fmt;

/// Hour and minute of the day
///
/// Not validated: a leniently parsed `"25:90"` is kept as is, and it is up
/// to the user of the value to decide what such a time means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

/// Ways in which a time of day can be rejected by the strict parser
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeError {
    /// not of the form `H:MM`
    Malformed(String),
    /// hour or minute is not a number
    NotANumber(String),
    /// hour outside of 0..=23
    InvalidHour(u32),
    /// minute outside of 0..=59
    InvalidMinute(u32),
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Lenient parser for `"HH:MM"`
    ///
    /// Empty pieces around separators are dropped (`"10::30"` is `10:30`).
    /// With fewer than two pieces the result is midnight, otherwise each of
    /// the first two pieces that is not a number counts as `0` and the
    /// following pieces are ignored. Pieces are unsigned, so a leading minus
    /// sign makes the piece not a number: `"-1:30"` is `00:30`.
    pub fn parse(text: &str) -> Self {
        let pieces = text
            .split(':')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u32>().unwrap_or(0))
            .collect::<Vec<_>>();
        if pieces.len() >= 2 {
            Self::new(pieces[0], pieces[1])
        } else {
            Self::MIDNIGHT
        }
    }

    /// Parser that accepts only `H:MM` or `HH:MM` within a single day
    pub fn parse_strict(text: &str) -> Result<Self, TimeError> {
        let (hour, minute) = match text.split_once(':') {
            Some((h, m)) if !h.is_empty() && h.len() <= 2 && m.len() == 2 => (h, m),
            _ => return Err(TimeError::Malformed(text.to_string())),
        };
        let number = |s: &str| {
            if s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse::<u32>()
                    .map_err(|_| TimeError::NotANumber(s.to_string()))
            } else {
                Err(TimeError::NotANumber(s.to_string()))
            }
        };
        let (hour, minute) = (number(hour)?, number(minute)?);
        if hour > 23 {
            Err(TimeError::InvalidHour(hour))
        } else if minute > 59 {
            Err(TimeError::InvalidMinute(minute))
        } else {
            Ok(Self::new(hour, minute))
        }
    }

    /// Offset from midnight in minutes
    pub fn minutes(self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TimeError::*;
        match self {
            Malformed(s) => write!(f, "'{}' is not of the form HH:MM", s),
            NotANumber(s) => write!(f, "'{}' is not a number", s),
            InvalidHour(h) => write!(f, "{} is not a valid hour", h),
            InvalidMinute(m) => write!(f, "{} is not a valid minute", m),
        }
    }
}

impl TimeError {
    /// What message to show to help fix the time error
    pub fn fix_hint(&self) -> String {
        use TimeError::*;
        match self {
            Malformed(_) => "write times as two-digit minutes after a colon, e.g. \"09:30\"".to_string(),
            NotANumber(_) => "hours and minutes are written with digits only".to_string(),
            InvalidHour(_) => "hour should be in the range 0 ..= 23".to_string(),
            InvalidMinute(_) => "minute should be in the range 0 ..= 59".to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! lenient {
        ( $s:expr => $h:expr, $m:expr ) => {
            assert_eq!(TimeOfDay::parse($s), TimeOfDay::new($h, $m), "parsing {:?}", $s)
        };
    }

    #[test]
    fn well_formed() {
        lenient!("10:00" => 10, 0);
        lenient!("21:00" => 21, 0);
        lenient!("9:05" => 9, 5);
        lenient!("00:00" => 0, 0);
    }

    #[test]
    fn malformed_degrades_to_zero() {
        lenient!("abc" => 0, 0);
        lenient!("" => 0, 0);
        lenient!("10" => 0, 0);
        lenient!("10:" => 0, 0);
        lenient!(":30" => 0, 0);
        lenient!("ab:30" => 0, 30);
        lenient!("10:xy" => 10, 0);
        lenient!(" 9:30" => 0, 30);
        lenient!("-1:30" => 0, 30);
    }

    #[test]
    fn extra_pieces() {
        lenient!("10::30" => 10, 30);
        lenient!("10:30:45" => 10, 30);
        lenient!("25:90" => 25, 90);
    }

    #[test]
    fn strict() {
        assert_eq!(TimeOfDay::parse_strict("09:30"), Ok(TimeOfDay::new(9, 30)));
        assert_eq!(TimeOfDay::parse_strict("9:30"), Ok(TimeOfDay::new(9, 30)));
        assert_eq!(TimeOfDay::parse_strict("23:59"), Ok(TimeOfDay::new(23, 59)));
        assert_eq!(TimeOfDay::parse_strict("abc"), Err(TimeError::Malformed("abc".to_string())));
        assert_eq!(TimeOfDay::parse_strict("10:3"), Err(TimeError::Malformed("10:3".to_string())));
        assert_eq!(TimeOfDay::parse_strict("10:30:00"), Err(TimeError::Malformed("10:30:00".to_string())));
        assert_eq!(TimeOfDay::parse_strict("+9:30"), Err(TimeError::NotANumber("+9".to_string())));
        assert_eq!(TimeOfDay::parse_strict("24:00"), Err(TimeError::InvalidHour(24)));
        assert_eq!(TimeOfDay::parse_strict("12:60"), Err(TimeError::InvalidMinute(60)));
    }

    #[test]
    fn minutes_and_display() {
        assert_eq!(TimeOfDay::new(10, 0).minutes(), 600);
        assert_eq!(TimeOfDay::new(21, 15).minutes(), 1275);
        assert_eq!(format!("{}", TimeOfDay::new(9, 5)), "09:05");
        assert_eq!(format!("{}", TimeOfDay::parse("abc")), "00:00");
    }
}
