//! Loading the configuration from disk

use std::io;
use tracing::{debug, info};

use crate::lib::{
    config::Config,
    error::{Error, Record},
    parse::{self, Strictness},
};

/// Whether the file has to be there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// a missing file is an error
    Required,
    /// a missing file means default settings
    Optional,
}

/// Read and validate the configuration file `filename`
///
/// `None` if any fatal error was recorded in `errs`.
pub fn read_config(
    filename: &str,
    presence: Presence,
    strictness: Strictness,
    errs: &mut Record,
) -> Option<Config> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound && presence == Presence::Optional => {
            info!(filename, "no configuration file, using defaults");
            return Some(Config::default());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Error::new("File not found")
                .with_text(format!("Configuration file is '{}'", filename))
                .with_hint("create the file or point to another one with --config")
                .register(errs);
            return None;
        }
        Err(e) => {
            Error::new("Unreadable file")
                .with_text(format!("Could not read '{}': {}", filename, e))
                .register(errs);
            return None;
        }
    };
    let config = parse::extract(filename, errs, &contents, strictness);
    debug!(
        filename,
        errors = errs.count_errors(),
        warnings = errs.count_warnings(),
        "configuration loaded"
    );
    if errs.is_fatal() {
        None
    } else {
        Some(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn reads_existing_file() {
        let file = file_with("wage = 3000\ncurrency = GBP\n");
        let path = file.path().to_str().unwrap();
        let mut errs = Record::new();
        let cfg = read_config(path, Presence::Required, Strictness::Lenient, &mut errs).unwrap();
        assert!(errs.is_empty());
        assert_eq!(cfg.monthly_wage, 3000.0);
        assert_eq!(cfg.currency.symbol(), "£");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.cfg");
        let path = path.to_str().unwrap();
        let mut errs = Record::new();
        let cfg = read_config(path, Presence::Optional, Strictness::Lenient, &mut errs);
        assert_eq!(cfg, Some(Config::default()));
        assert!(errs.is_empty());
        let cfg = read_config(path, Presence::Required, Strictness::Lenient, &mut errs);
        assert_eq!(cfg, None);
        assert_eq!(errs.labels().collect::<Vec<_>>(), vec!["File not found"]);
    }

    #[test]
    fn fatal_errors_reject_the_file() {
        let file = file_with("days = Someday\n");
        let path = file.path().to_str().unwrap();
        let mut errs = Record::new();
        assert_eq!(read_config(path, Presence::Required, Strictness::Lenient, &mut errs), None);
        assert!(errs.is_fatal());
    }

    #[test]
    fn warnings_do_not() {
        let file = file_with("start = 9h\n");
        let path = file.path().to_str().unwrap();
        let mut errs = Record::new();
        let cfg = read_config(path, Presence::Required, Strictness::Lenient, &mut errs);
        assert!(cfg.is_some());
        assert_eq!(errs.count_warnings(), 1);
        let mut errs = Record::new();
        let cfg = read_config(path, Presence::Required, Strictness::Strict, &mut errs);
        assert!(cfg.is_none());
    }
}
