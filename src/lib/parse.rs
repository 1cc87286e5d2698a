//! Convert the contents of a configuration file into a `Config`

#![allow(clippy::upper_case_acronyms)]

use pest::Parser;
use pest_derive::*;
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use crate::lib::{
    config::{self, Config, Currency},
    error::{Error, Loc, Record},
    time::TimeOfDay,
    weekday::{Weekday, WeekdaySet},
};

#[derive(Parser)]
#[grammar = "wagebar.pest"]
struct ConfigParser;

/// How times of day are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// anything goes, unreadable parts become `0` (with a warning)
    Lenient,
    /// only well-formed times within a day are accepted
    Strict,
}

/// A single value of a field, with its location
struct Token<'i> {
    text: &'i str,
    loc: Loc<'i>,
}

/// Read the configuration in `contents`
///
/// Fields that are absent keep their default value. The returned
/// configuration is meaningful only if `errs` contains no fatal error
/// once this returns.
pub fn extract(path: &str, errs: &mut Record, contents: &str, strictness: Strictness) -> Config {
    match ConfigParser::parse(Rule::program, contents) {
        Ok(pairs) => validate(path, errs, pairs, strictness),
        Err(e) => {
            Error::new("Parsing failure")
                .with_error(e.with_path(path))
                .register(errs);
            Config::default()
        }
    }
}

// extract two-element inner
macro_rules! pair {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No 1st"));
        let snd = items.next().unwrap_or_else(|| panic!("No 2nd"));
        assert!(items.next().is_none());
        (fst, snd)
    }};
}

// set-once value
macro_rules! set_or_fail {
    ( $errs:expr, $var:expr, $val:expr, $name:expr, $loc:expr ) => {{
        if $var.is_some() {
            Error::new("Duplicate field definition")
                .with_span(&$loc, format!("attempt to override '{}'", $name))
                .with_text("Each field may only be defined once")
                .with_hint("remove one of the field definitions")
                .register($errs);
            continue;
        }
        $var = Some($val);
    }};
}

fn validate<'i>(path: &'i str, errs: &mut Record, pairs: Pairs<'i>, strictness: Strictness) -> Config {
    let mut wage: Option<f64> = None;
    let mut start: Option<TimeOfDay> = None;
    let mut off: Option<TimeOfDay> = None;
    let mut days: Option<WeekdaySet> = None;
    let mut currency: Option<Currency> = None;
    for pair in pairs {
        match pair.as_rule() {
            Rule::field => {
                let loc = (path, pair.as_span());
                let (name, values) = pair!(pair);
                assert_eq!(name.as_rule(), Rule::identifier);
                let tokens = read_values(path, values);
                match name.as_str() {
                    "wage" => {
                        let val = read_wage(errs, &loc, &tokens);
                        set_or_fail!(errs, wage, val, "wage", loc);
                    }
                    "start" => {
                        let val = read_time(errs, &loc, &tokens, strictness);
                        set_or_fail!(errs, start, val, "start", loc);
                    }
                    "off" => {
                        let val = read_time(errs, &loc, &tokens, strictness);
                        set_or_fail!(errs, off, val, "off", loc);
                    }
                    "days" => {
                        let val = read_days(errs, &tokens);
                        set_or_fail!(errs, days, val, "days", loc);
                    }
                    "currency" => {
                        let val = read_currency(errs, &loc, &tokens);
                        set_or_fail!(errs, currency, val, "currency", loc);
                    }
                    other => {
                        Error::new("Unknown field")
                            .nonfatal()
                            .with_span(&(path, name.as_span()), "ignored")
                            .with_text(format!("'{}' is not a setting", other))
                            .with_hint("fields are wage, start, off, days, currency")
                            .register(errs);
                    }
                }
            }
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    let deflt = Config::default();
    Config {
        monthly_wage: wage.unwrap_or(deflt.monthly_wage),
        start_time: start.unwrap_or(deflt.start_time),
        off_duty_time: off.unwrap_or(deflt.off_duty_time),
        weekdays: days.unwrap_or(deflt.weekdays),
        currency: currency.unwrap_or(deflt.currency),
    }
}

fn read_values<'i>(path: &'i str, values: Pair<'i>) -> Vec<Token<'i>> {
    assert_eq!(values.as_rule(), Rule::values);
    values
        .into_inner()
        .map(|item| {
            let loc = (path, item.as_span());
            let text = match item.as_rule() {
                Rule::word => item.as_str(),
                Rule::quoted => item
                    .into_inner()
                    .next()
                    .map(|s| s.as_str())
                    .unwrap_or(""),
                _ => unreachable!(),
            };
            Token { text, loc }
        })
        .collect()
}

/// The text of a field that takes exactly one value, `""` if it has none
///
/// Returns `None` after reporting when there are too many values.
fn single<'i>(errs: &mut Record, loc: &Loc, tokens: &[Token<'i>]) -> Option<&'i str> {
    match tokens {
        [] => Some(""),
        [tok] => Some(tok.text),
        [_, extra, ..] => {
            Error::new("Too many values")
                .with_span(loc, "in this field")
                .with_span(&extra.loc, "unexpected value")
                .with_text("This field takes a single value")
                .with_hint("quote values that contain spaces")
                .register(errs);
            None
        }
    }
}

fn read_wage(errs: &mut Record, loc: &Loc, tokens: &[Token]) -> f64 {
    let text = match single(errs, loc, tokens) {
        Some(text) => text,
        None => return 0.0,
    };
    match text.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => w,
        Ok(w) => {
            Error::new("Invalid wage")
                .nonfatal()
                .with_span(loc, "defined here")
                .with_text(format!("{} is not a valid monthly wage", w))
                .with_hint("the wage is counted as 0")
                .register(errs);
            config::sanitize_wage(w)
        }
        Err(_) => {
            Error::new("Invalid wage")
                .nonfatal()
                .with_span(loc, "defined here")
                .with_text(format!("'{}' is not a number", text))
                .with_hint("the wage is counted as 0")
                .register(errs);
            0.0
        }
    }
}

fn read_time(errs: &mut Record, loc: &Loc, tokens: &[Token], strictness: Strictness) -> TimeOfDay {
    let text = match single(errs, loc, tokens) {
        Some(text) => text,
        None => return TimeOfDay::MIDNIGHT,
    };
    let lenient = TimeOfDay::parse(text);
    match (TimeOfDay::parse_strict(text), strictness) {
        (Ok(time), _) => time,
        (Err(e), Strictness::Strict) => {
            Error::new("Invalid time")
                .with_span(loc, "defined here")
                .with_text(format!("{}", e))
                .with_hint(e.fix_hint())
                .register(errs);
            lenient
        }
        (Err(e), Strictness::Lenient) => {
            Error::new("Invalid time")
                .nonfatal()
                .with_span(loc, "defined here")
                .with_text(format!("{}", e))
                .with_text(format!("'{}' is read as {}", text, lenient))
                .with_hint(e.fix_hint())
                .register(errs);
            lenient
        }
    }
}

fn read_days(errs: &mut Record, tokens: &[Token]) -> WeekdaySet {
    let mut set = WeekdaySet::empty();
    for tok in tokens {
        let day = Weekday::from_name(tok.text).or_else(|| {
            tok.text
                .parse::<u8>()
                .ok()
                .and_then(Weekday::from_number)
        });
        match day {
            Some(day) => {
                if !set.insert(day) {
                    Error::new("Duplicate weekday")
                        .nonfatal()
                        .with_span(&tok.loc, format!("{} is already active", day))
                        .with_hint("remove the repeated day")
                        .register(errs);
                }
            }
            None => {
                Error::new("Unknown weekday")
                    .with_span(&tok.loc, "in field 'days'")
                    .with_text(format!("'{}' does not name a day of the week", tok.text))
                    .with_hint("use one of Mon, Tue, Wed, Thu, Fri, Sat, Sun or 1 ..= 7")
                    .register(errs);
            }
        }
    }
    set
}

fn read_currency(errs: &mut Record, loc: &Loc, tokens: &[Token]) -> Currency {
    let text = match single(errs, loc, tokens) {
        Some(text) => text,
        None => return Currency::Usd,
    };
    match Currency::from_code(text) {
        Some(cur) => cur,
        None => {
            let known = Currency::ALL
                .iter()
                .map(|c| c.code())
                .collect::<Vec<_>>()
                .join(", ");
            Error::new("Unknown currency")
                .nonfatal()
                .with_span(loc, "defined here")
                .with_text(format!("'{}' is not supported, amounts are shown in USD", text))
                .with_hint(format!("choose one of {}", known))
                .register(errs);
            Currency::Usd
        }
    }
}
