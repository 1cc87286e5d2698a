//! One-line rendering of the current earnings, as shown in a status bar
//!
//! ```txt
//! [██████████░░░░░░░░░░] 50% $227
//! ```

use std::fmt;

use crate::lib::{config::Currency, summary::Summary};

/// Width in pixels of the graphical progress bar
pub const BAR_PIXELS: u32 = 60;
/// Width in cells of the terminal progress bar
pub const BAR_CELLS: usize = 20;

/// Whole percentage of the day elapsed, truncated: `0.999` is `"99%"`
pub fn percent_text(progress: f64) -> String {
    format!("{}%", (progress * 100.0) as i64)
}

/// Amount earned, with a `k` suffix from one thousand onwards
///
/// Below a thousand the amount is truncated to a whole number.
pub fn earnings_text(earnings: f64, currency: Currency) -> String {
    if earnings >= 1000.0 {
        format!("{}{:.1}k", currency.symbol(), earnings / 1000.0)
    } else {
        format!("{}{}", currency.symbol(), earnings as i64)
    }
}

/// How much of a bar `width` units long is filled
pub fn bar_fill(progress: f64, width: u32) -> u32 {
    (progress.clamp(0.0, 1.0) * width as f64) as u32
}

/// Progress bar followed by the percentage and earnings
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    progress: f64,
    text: String,
}

impl StatusLine {
    pub fn from(summary: &Summary) -> Self {
        Self::new(summary.progress(), summary.earnings(), summary.currency())
    }

    pub fn new(progress: f64, earnings: f64, currency: Currency) -> Self {
        Self {
            progress,
            text: format!("{} {}", percent_text(progress), earnings_text(earnings, currency)),
        }
    }

    /// Text part, without the bar
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Filled width of the graphical bar, in pixels
    pub fn bar_pixels(&self) -> u32 {
        bar_fill(self.progress, BAR_PIXELS)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = bar_fill(self.progress, BAR_CELLS as u32) as usize;
        write!(f, "[")?;
        for _ in 0..full {
            write!(f, "█")?;
        }
        for _ in full..BAR_CELLS {
            write!(f, "░")?;
        }
        write!(f, "] {}", self.text)
    }
}
