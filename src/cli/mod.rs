//! Presentation: everything that turns a `Summary` into something to look at

pub mod plot;
pub mod status;
pub mod table;
pub mod watch;
