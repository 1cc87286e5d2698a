//! Monday-first weekday numbering and sets of active weekdays
//!
//! Calendars disagree on how to number the days of the week. Everything
//! in this crate uses Monday = 1 ..= Sunday = 7, and the only conversion
//! from the other convention (Sunday = 1 ..= Saturday = 7) is
//! `normalize_weekday`.

use chrono::{Datelike, NaiveDate};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

/// Weekday with Monday-first week convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum Weekday {
    Mon = 1,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Convert a Sunday-first weekday index (Sunday = 1 ..= Saturday = 7)
/// to the Monday-first one used by the rest of the crate.
///
/// Total over its input: values outside of 1..=7 are reduced modulo 7,
/// so that 0 and 7 both mean Saturday.
pub fn normalize_weekday(sunday_first: u32) -> Weekday {
    use Weekday::*;
    match sunday_first % 7 {
        1 => Sun,
        2 => Mon,
        3 => Tue,
        4 => Wed,
        5 => Thu,
        6 => Fri,
        0 => Sat,
        _ => unreachable!(),
    }
}

impl Weekday {
    /// All weekdays, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Get day of week of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        normalize_weekday(date.weekday().number_from_sunday())
    }

    /// Position in the week, `1` for Monday through `7` for Sunday
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Inverse of `number`
    pub fn from_number(n: u8) -> Option<Self> {
        Self::from_u8(n)
    }

    /// Read a weekday from its abbreviated or full english name,
    /// case-insensitive (`"mon"`, `"Tue"`, `"wednesday"`, ...)
    pub fn from_name(s: &str) -> Option<Self> {
        use Weekday::*;
        let s = s.to_ascii_lowercase();
        Some(match s.as_str() {
            "mon" | "monday" => Mon,
            "tue" | "tuesday" => Tue,
            "wed" | "wednesday" => Wed,
            "thu" | "thursday" => Thu,
            "fri" | "friday" => Fri,
            "sat" | "saturday" => Sat,
            "sun" | "sunday" => Sun,
            _ => return None,
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A subset of the seven weekdays
///
/// Stored as a bitmask where bit `n` is set iff the weekday numbered `n`
/// is in the set (bit 0 is always clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// No active day
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every day of the week
    #[cfg(test)]
    pub const fn all() -> Self {
        Self(0b1111_1110)
    }

    /// Monday through Friday
    pub const fn workweek() -> Self {
        Self(0b0011_1110)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.number()
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Add `day`, returns `false` if it was already present
    pub fn insert(&mut self, day: Weekday) -> bool {
        let fresh = !self.contains(day);
        self.0 |= Self::bit(day);
        fresh
    }

    #[cfg(test)]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in Monday-first order
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut sep = "";
        for day in self.iter() {
            write!(f, "{}{}", sep, day)?;
            sep = " ";
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Weekday::*, *};

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    macro_rules! day {
        ( $d:expr => $w:expr ) => {
            assert_eq!(Weekday::of($d), $w)
        };
    }

    #[test]
    fn normalization_is_a_bijection() {
        assert_eq!(normalize_weekday(1), Sun);
        assert_eq!(normalize_weekday(2), Mon);
        assert_eq!(normalize_weekday(3), Tue);
        assert_eq!(normalize_weekday(4), Wed);
        assert_eq!(normalize_weekday(5), Thu);
        assert_eq!(normalize_weekday(6), Fri);
        assert_eq!(normalize_weekday(7), Sat);
        let image = (1..=7).map(normalize_weekday).collect::<WeekdaySet>();
        assert_eq!(image, WeekdaySet::all());
    }

    #[test]
    fn normalization_is_total() {
        assert_eq!(normalize_weekday(0), Sat);
        assert_eq!(normalize_weekday(8), Sun);
        assert_eq!(normalize_weekday(u32::MAX), normalize_weekday(u32::MAX % 7));
    }

    #[test]
    fn weekday_references() {
        // accross a week
        day!(dt!(2000-1-1) => Sat);
        day!(dt!(2000-1-2) => Sun);
        day!(dt!(2000-1-3) => Mon);
        day!(dt!(2000-1-4) => Tue);
        day!(dt!(2000-1-5) => Wed);
        day!(dt!(2000-1-6) => Thu);
        day!(dt!(2000-1-7) => Fri);
        // accross months and years
        day!(dt!(2024-2-29) => Thu);
        day!(dt!(2025-9-1) => Mon);
        day!(dt!(2025-9-6) => Sat);
        day!(dt!(2025-9-7) => Sun);
        day!(dt!(2024-1-1) => Mon);
    }

    #[test]
    fn numbering() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.number() as usize, i + 1);
            assert_eq!(Weekday::from_number(day.number()), Some(*day));
        }
        assert_eq!(Weekday::from_number(0), None);
        assert_eq!(Weekday::from_number(8), None);
    }

    #[test]
    fn consecutive_dates() {
        let mut d = dt!(2020-1-1);
        for _ in 0..400 {
            let succ = d.succ_opt().unwrap();
            assert_eq!(Weekday::of(succ).number(), Weekday::of(d).number() % 7 + 1);
            d = succ;
        }
    }

    #[test]
    fn names() {
        assert_eq!(Weekday::from_name("Mon"), Some(Mon));
        assert_eq!(Weekday::from_name("sunday"), Some(Sun));
        assert_eq!(Weekday::from_name("THU"), Some(Thu));
        assert_eq!(Weekday::from_name("Mo"), None);
        assert_eq!(Weekday::from_name(""), None);
    }

    #[test]
    fn set_operations() {
        let mut set = WeekdaySet::empty();
        assert!(set.is_empty());
        assert!(set.insert(Wed));
        assert!(!set.insert(Wed));
        assert!(set.insert(Sun));
        assert_eq!(set.len(), 2);
        assert!(set.contains(Sun));
        assert!(!set.contains(Mon));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Wed, Sun]);
        assert_eq!(WeekdaySet::all().len(), 7);
        assert_eq!(WeekdaySet::workweek().iter().collect::<Vec<_>>(), vec![Mon, Tue, Wed, Thu, Fri]);
    }

    #[test]
    fn set_display() {
        assert_eq!(format!("{}", WeekdaySet::workweek()), "Mon Tue Wed Thu Fri");
        assert_eq!(format!("{}", WeekdaySet::empty()), "none");
        assert_eq!(format!("{}", [Sun, Sat].into_iter().collect::<WeekdaySet>()), "Sat Sun");
    }
}
