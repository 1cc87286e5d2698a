//! Diagnostics for the configuration file
//!
//! Source excerpts are rendered by `pest::error::Error::new_from_span`;
//! this module only aggregates reports and adds colors.
//!
//! # Example
//!
//! ```rust
//! Error::new("Unknown weekday")
//!     .with_span(&loc, "in field 'days'")
//!     .with_text("'Fry' does not name a day of the week")
//!     .with_hint("use one of Mon, Tue, Wed, Thu, Fri, Sat, Sun or 1 ..= 7")
//!     .register(errs);
//! ```
//!
//! ```txt
//! --> Error: Unknown weekday
//!  |     --> wagebar.cfg:4:24
//!  |      |
//!  |    4 | days = Mon Tue Wed Thu Fry
//!  |      |                        ^-^
//!  |      |
//!  |      = in field 'days'
//!  |  'Fry' does not name a day of the week
//!  |      ? hint: use one of Mon, Tue, Wed, Thu, Fri, Sat, Sun or 1 ..= 7
//! ```

use std::fmt;

use crate::lib::parse::Rule;

/// Location of an error: file name and span within that file
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single problem
///
/// All messages (`label` passed with `new`, arguments of `with_hint`
/// and `with_text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// determines the error label (warning/error) and the color (yellow/red)
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

#[derive(Debug)]
enum Item {
    /// excerpt of the file
    Block(pest::error::Error<Rule>),
    Text(String),
    /// how to fix
    Hint(String),
}

/// All problems found while loading one configuration
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// how many are errors, the rest are warnings
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    pub fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// Add a parsing error produced by the grammar
    pub fn with_error(mut self, err: pest::error::Error<Rule>) -> Self {
        self.items.push(Item::Block(err.renamed_rules(rule_rename)));
        self
    }

    /// Add an excerpt of the file and its associated message
    pub fn with_span<S>(mut self, loc: &Loc, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Block(
            pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError {
                    message: msg.to_string(),
                },
                loc.1.clone(),
            )
            .with_path(loc.0),
        ));
        self
    }

    pub fn with_text<S>(mut self, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    pub fn with_hint<S>(mut self, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Consume the error and add it to the record
    pub fn register(self, record: &mut Record) {
        record.register(self);
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any of the recorded errors are fatal
    pub fn is_fatal(&self) -> bool {
        self.fatal > 0
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn count_errors(&self) -> usize {
        self.fatal
    }

    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.fatal
    }

    /// Labels of all recorded problems, in order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|err| err.label())
    }

    fn register(&mut self, err: Error) {
        if err.is_fatal() {
            self.fatal += 1;
        }
        self.contents.push(err);
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => write_block(f, color, &format!("{}", err))?,
                Item::Text(txt) => writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?,
                Item::Hint(txt) => writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?,
            }
        }
        Ok(())
    }
}

/// Indent a pest excerpt under the margin of the report,
/// realigning its arrow with the line numbers
fn write_block(f: &mut fmt::Formatter<'_>, color: &str, block: &str) -> fmt::Result {
    let mut align = "   ".to_string();
    let mut align_found = false;
    for line in block.split('\n') {
        write!(f, " {}|{}  {}", color, if align_found { &align } else { "" }, BLUE)?;
        for c in line.chars() {
            match c {
                '-' if !align_found => {
                    align_found = true;
                    write!(f, "{}-", align)?;
                }
                ' ' if !align_found => {
                    align.pop();
                    write!(f, " ")?;
                }
                '|' => write!(f, "|{}", NONE)?,
                '=' => write!(f, "={}", NONE)?,
                '^' => write!(f, "{}^", color)?,
                _ => write!(f, "{}", c)?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal { self.count_errors() } else { self.count_warnings() };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 10;
        // only print errors with the maximum fatality
        for err in self.contents.iter().filter(|err| err.is_fatal() == fatal).take(trunc) {
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(f, "{}Fatal: {}{} error{} emitted{}", color, WHITE, count, plural, NONE)
        } else {
            writeln!(f, "{}Nonfatal: {}{} warning{} emitted{}", color, WHITE, count, plural, NONE)
        }
    }
}

/// Convert rule names to user-friendly information about their purpose
fn rule_rename(rule: &Rule) -> String {
    String::from(match rule {
        Rule::EOI => "end of file",
        Rule::identifier => "a field name composed of a..zA..Z0..9-_",
        Rule::string => "a string of non-'\"' characters",
        Rule::quoted => "a quoted value ('\"10:00\"')",
        Rule::word => "a value",
        Rule::values => "a sequence of whitespace-separated values",
        Rule::field => "a 'name = value' field",
        #[allow(unreachable_patterns)]
        _ => "a separator",
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts() {
        let mut errs = Record::new();
        assert!(errs.is_empty());
        Error::new("Unknown field").nonfatal().register(&mut errs);
        assert!(!errs.is_fatal());
        Error::new("Duplicate field definition").register(&mut errs);
        Error::new("Invalid wage").nonfatal().register(&mut errs);
        assert!(errs.is_fatal());
        assert_eq!(errs.count_errors(), 1);
        assert_eq!(errs.count_warnings(), 2);
        assert_eq!(
            errs.labels().collect::<Vec<_>>(),
            vec!["Unknown field", "Duplicate field definition", "Invalid wage"],
        );
    }

    #[test]
    fn only_most_severe_are_printed() {
        let mut errs = Record::new();
        Error::new("first warning").nonfatal().register(&mut errs);
        let printed = format!("{}", errs);
        assert!(printed.contains("first warning"));
        assert!(printed.contains("1 warning emitted"));
        Error::new("an error")
            .with_text("explanation")
            .with_hint("fix it")
            .register(&mut errs);
        let printed = format!("{}", errs);
        assert!(!printed.contains("first warning"));
        assert!(printed.contains("an error"));
        assert!(printed.contains("explanation"));
        assert!(printed.contains("? hint: "));
        assert!(printed.contains("1 error emitted"));
    }

    #[test]
    fn empty_record_prints_nothing() {
        assert_eq!(format!("{}", Record::new()), "");
    }
}
