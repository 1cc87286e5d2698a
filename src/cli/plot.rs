//! Status-bar widget rendered as an SVG image
//!
//! Geometry, in pixels:
//!
//! ```txt
//!   8      60       8    text    8
//! |<->|<-------->|<->|<------>|<->|
//!     [#####     ]   50% $227
//! ```

use std::io;
use std::path::Path;

use svg::{
    node::element::{Rectangle, Text},
    Document,
};

use crate::cli::status::{StatusLine, BAR_PIXELS};

const HEIGHT: f64 = 22.0;
const PADDING: f64 = 8.0;
const BAR_HEIGHT: f64 = 8.0;
const FONT_SIZE: f64 = 13.0;
/// average advance of a character at `FONT_SIZE`
const CHAR_WIDTH: f64 = 7.5;

const TRACK_COLOR: &str = "gray";
const TRACK_OPACITY: f64 = 0.4;
const FILL_COLOR: &str = "#34c759";
const TEXT_COLOR: &str = "black";

pub struct Widget<'d> {
    line: &'d StatusLine,
}

impl<'d> Widget<'d> {
    pub fn from(line: &'d StatusLine) -> Self {
        Self { line }
    }

    fn text_width(&self) -> f64 {
        self.line.text().chars().count() as f64 * CHAR_WIDTH
    }

    /// Total width: padding, bar, gap, text, padding
    pub fn width(&self) -> f64 {
        PADDING + BAR_PIXELS as f64 + PADDING + self.text_width() + PADDING
    }

    pub fn document(&self) -> Document {
        let width = self.width();
        let track = Rectangle::new()
            .set("x", PADDING)
            .set("y", PADDING)
            .set("width", BAR_PIXELS as f64)
            .set("height", BAR_HEIGHT)
            .set("rx", BAR_HEIGHT / 2.0)
            .set("fill", TRACK_COLOR)
            .set("fill-opacity", TRACK_OPACITY);
        let fill = Rectangle::new()
            .set("x", PADDING)
            .set("y", PADDING)
            .set("width", self.line.bar_pixels() as f64)
            .set("height", BAR_HEIGHT)
            .set("rx", BAR_HEIGHT / 2.0)
            .set("fill", FILL_COLOR);
        let label = Text::new()
            .set("x", PADDING + BAR_PIXELS as f64 + PADDING)
            .set("y", HEIGHT / 2.0)
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", FONT_SIZE)
            .set("font-weight", "500")
            .set("fill", TEXT_COLOR)
            .add(svg::node::Text::new(self.line.text()));
        Document::new()
            .set("width", width)
            .set("height", HEIGHT)
            .set("viewBox", (0.0, 0.0, width, HEIGHT))
            .add(track)
            .add(fill)
            .add(label)
    }

    pub fn render<P>(&self, file: P) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        svg::save(file, &self.document())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::config::Currency;

    #[test]
    fn geometry() {
        let line = StatusLine::new(0.5, 227.27, Currency::Usd);
        let widget = Widget::from(&line);
        // "50% $227" is 8 characters
        assert_eq!(widget.width(), 8.0 + 60.0 + 8.0 + 8.0 * 7.5 + 8.0);
        let svg = widget.document().to_string();
        assert!(svg.contains("50% $227"));
        assert!(svg.contains("width=\"30\""));
        assert!(svg.contains("width=\"60\""));
        assert!(svg.contains(FILL_COLOR));
    }

    #[test]
    fn empty_bar() {
        let line = StatusLine::new(0.0, 0.0, Currency::Eur);
        let svg = Widget::from(&line).document().to_string();
        assert!(svg.contains("width=\"0\""));
        assert!(svg.contains("0% €0"));
    }

    #[test]
    fn written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.svg");
        let line = StatusLine::new(1.0, 1234.0, Currency::Usd);
        Widget::from(&line).render(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<svg"));
        assert!(contents.contains("100% $1.2k"));
    }
}
