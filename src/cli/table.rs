//! Box-drawn table of everything derived at one poll

use std::fmt;

use crate::lib::summary::Summary;

/// Two-column box-drawn table of every value derived at one poll
pub struct Table<'d> {
    data: &'d Summary,
    title: Option<String>,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    title: Option<BoxFmt>,
    labels: ColFmt,
    values: ColFmt,
}

impl<'d> Table<'d> {
    pub fn from(data: &'d Summary) -> Self {
        Self { data, title: None }
    }

    pub fn with_title<S>(self, title: S) -> Self
    where
        S: ToString,
    {
        Self { title: Some(title.to_string()), ..self }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let sum = self.data;
        let sym = sum.currency().symbol();
        let (start, off) = sum.window();
        vec![
            ("Time", format!("{} ({})", sum.at_time().format("%Y-%m-%d %H:%M:%S"), sum.weekday())),
            ("Status", format!("{}", sum.phase())),
            ("Monthly wage", format!("{}{:.2}", sym, sum.monthly_wage())),
            (
                "Working days",
                format!("{} of {} ({})", sum.working_days(), sum.month_length(), sum.weekdays()),
            ),
            ("Daily wage", format!("{}{:.2}", sym, sum.daily_wage())),
            ("Work window", format!("{} - {} ({:.2} h)", start, off, sum.work_hours())),
            ("Hourly wage", format!("{}{:.2}", sym, sum.hourly_wage())),
            ("Progress", format!("{:.1}%", sum.progress() * 100.0)),
            ("Today earnings", format!("{}{:.2}", sym, sum.earnings())),
        ]
    }

    fn to_formatter(&self) -> GridFmt {
        let mut grid = GridFmt {
            title: self.title.clone().map(BoxFmt::from),
            labels: ColFmt::new(),
            values: ColFmt::new(),
        };
        for (label, value) in self.rows() {
            grid.labels.push(BoxFmt::from(label.to_string()));
            grid.values.push(BoxFmt::from(value));
        }
        if let Some(title) = &grid.title {
            let missing = (title.width + 2).saturating_sub(grid.inner_width());
            grid.values.width += missing;
        }
        grid
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }

    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let pad = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", pad, self.text)
        } else {
            write!(f, " {}{} ", self.text, pad)
        }
    }
}

impl ColFmt {
    fn new() -> Self {
        Self { width: 0, boxes: Vec::new() }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize, right: bool) -> fmt::Result {
        self.boxes[idx].write(f, self.width, right)
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_formatter())
    }
}

impl GridFmt {
    /// Width between the outer borders
    fn inner_width(&self) -> usize {
        self.labels.width + self.values.width + 5
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border, with the title spanning both columns
        write!(f, "{}", ULCORNER)?;
        if let Some(title) = &self.title {
            let width = self.inner_width();
            write!(f, "{}", HLINE.repeat(width))?;
            writeln!(f, "{}", URCORNER)?;
            write!(f, "{}", VLINE)?;
            title.write(f, width - 2, false)?;
            writeln!(f, "{}", VLINE)?;
            write!(f, "{}", RTJOIN)?;
        }
        self.labels.hline(f)?;
        write!(f, "{}", LOJOIN)?;
        self.values.hline(f)?;
        writeln!(f, "{}", if self.title.is_some() { LTJOIN } else { URCORNER })?;
        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx, false)?;
            write!(f, "{}", VLINE)?;
            self.values.write_item(f, idx, true)?;
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        write!(f, "{}", DLCORNER)?;
        self.labels.hline(f)?;
        write!(f, "{}", HIJOIN)?;
        self.values.hline(f)?;
        writeln!(f, "{}", DRCORNER)
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
