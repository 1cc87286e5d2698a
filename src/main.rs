mod cli;
mod lib;
mod load;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use clap::{crate_version, value_t, App, Arg, ArgMatches};
use std::process;
use std::time::Duration;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use cli::{
    plot::Widget,
    status::StatusLine,
    table::Table,
    watch::{Poller, DEFAULT_INTERVAL},
};
use lib::{
    clock::{Clock, FixedClock, SystemClock},
    error::{Error, Record},
    parse::Strictness,
};
use load::Presence;

const DEFAULT_CONFIG: &str = "wagebar.cfg";

/// Everything the command line decides besides the settings themselves
struct Options<'a> {
    config: &'a str,
    presence: Presence,
    strictness: Strictness,
    details: bool,
    svg: Option<&'a str>,
    interval: Duration,
    ticks: Option<u64>,
}

fn main() {
    let matches = args();
    init_logging(matches.occurrences_of("verbose"));
    let options = Options::from(&matches);

    let mut errs = Record::new();
    let config = load::read_config(options.config, options.presence, options.strictness, &mut errs);
    if !errs.is_empty() {
        eprint!("{}", errs);
    }
    let config = match config {
        Some(config) => config,
        None => process::exit(1),
    };

    let ok = match matches.value_of("at") {
        Some(text) => match parse_instant(text) {
            Some(now) => run(FixedClock(now), &options, config),
            None => {
                let mut errs = Record::new();
                Error::new("Invalid time")
                    .with_text(format!("'{}' is not a local date and time", text))
                    .with_hint("use the form YYYY-MM-DD HH:MM or YYYY-MM-DD HH:MM:SS")
                    .register(&mut errs);
                eprint!("{}", errs);
                false
            }
        },
        None => run(SystemClock, &options, config),
    };
    if !ok {
        process::exit(1);
    }
}

fn args() -> ArgMatches<'static> {
    App::new("wagebar")
        .version(crate_version!())
        .about("Shows how much of today's wage is already earned")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("Settings file [default: wagebar.cfg, optional]"),
        )
        .arg(
            Arg::with_name("at")
                .long("at")
                .value_name("TIME")
                .takes_value(true)
                .help("Compute for a fixed local time 'YYYY-MM-DD HH:MM[:SS]' instead of now"),
        )
        .arg(
            Arg::with_name("details")
                .short("d")
                .long("details")
                .help("Print every derived value in a table"),
        )
        .arg(
            Arg::with_name("svg")
                .long("svg")
                .value_name("FILE")
                .takes_value(true)
                .help("Also draw the status-bar widget to an SVG file"),
        )
        .arg(
            Arg::with_name("watch")
                .short("w")
                .long("watch")
                .help("Keep refreshing, reloading the settings each time"),
        )
        .arg(
            Arg::with_name("interval")
                .short("i")
                .long("interval")
                .value_name("SECS")
                .takes_value(true)
                .help("Seconds between refreshes [default: 10]"),
        )
        .arg(
            Arg::with_name("ticks")
                .long("ticks")
                .value_name("N")
                .takes_value(true)
                .help("Stop after N refreshes (implies --watch)"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Reject malformed times in the settings instead of reading them as 0"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log what is being computed (-vv for more)"),
        )
        .get_matches()
}

impl<'a> Options<'a> {
    fn from(matches: &'a ArgMatches<'a>) -> Self {
        let (config, presence) = match matches.value_of("config") {
            Some(file) => (file, Presence::Required),
            None => (DEFAULT_CONFIG, Presence::Optional),
        };
        let interval = if matches.is_present("interval") {
            Duration::from_secs(value_t!(matches, "interval", u64).unwrap_or_else(|e| e.exit()))
        } else {
            DEFAULT_INTERVAL
        };
        let ticks = if matches.is_present("ticks") {
            Some(value_t!(matches, "ticks", u64).unwrap_or_else(|e| e.exit()))
        } else if matches.is_present("watch") {
            None
        } else {
            Some(1)
        };
        Self {
            config,
            presence,
            strictness: if matches.is_present("strict") {
                Strictness::Strict
            } else {
                Strictness::Lenient
            },
            details: matches.is_present("details"),
            svg: matches.value_of("svg"),
            interval,
            ticks,
        }
    }
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read a local wall-clock time, `None` if it is malformed or does not exist
fn parse_instant(text: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Poll and print, returns `false` if anything could not be rendered
fn run<C>(clock: C, options: &Options, config: lib::config::Config) -> bool
where
    C: Clock,
{
    let watching = options.ticks != Some(1);
    let mut ok = true;
    let reload = || {
        if !watching {
            return Some(config);
        }
        let mut errs = Record::new();
        let fresh = load::read_config(options.config, options.presence, options.strictness, &mut errs);
        if errs.is_fatal() {
            eprint!("{}", errs);
        } else if !errs.is_empty() {
            let labels = errs.labels().collect::<Vec<_>>();
            debug!(?labels, "configuration reloaded with warnings");
        }
        fresh
    };
    let render = |summary: &lib::summary::Summary| {
        let line = StatusLine::from(summary);
        println!("{}", line);
        if options.details {
            println!("{}", Table::from(summary).with_title("wagebar"));
        }
        if let Some(file) = options.svg {
            if let Err(e) = Widget::from(&line).render(file) {
                error!(file, "could not write widget: {}", e);
                let mut errs = Record::new();
                Error::new("Cannot write widget")
                    .with_text(format!("'{}': {}", file, e))
                    .with_hint("check that the directory exists and is writable")
                    .register(&mut errs);
                eprint!("{}", errs);
                ok = false;
            }
        }
    };
    if watching && options.interval.is_zero() {
        warn!("refreshing without delay");
    }
    Poller::new(clock, options.interval)
        .with_ticks(options.ticks)
        .run(config, reload, render);
    ok
}
