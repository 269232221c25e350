//! Go reference layouts translated to chrono format strings

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Layout elements and their chrono equivalents. Longer elements that share a
/// prefix with shorter ones come first.
const ELEMENTS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("2006", "%Y"),
    ("-07:00:00", "%::z"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("Z0700", "%z"),
    ("-0700", "%z"),
    ("-07", "%#z"),
    (".000000000", "%.9f"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
    (".999999999", "%.f"),
    (".999999", "%.f"),
    (".999", "%.f"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("002", "%j"),
    ("_2", "%e"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

/// A timestamp layout, kept in both its Go form and the chrono format it
/// translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLayout {
    layout: String,
    format: String,
}

impl TimeLayout {
    pub fn new(layout: &str) -> Self {
        Self {
            layout: layout.to_string(),
            format: to_chrono_format(layout),
        }
    }

    /// The layout as configured
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// The equivalent chrono format string
    pub fn chrono_format(&self) -> &str {
        &self.format
    }

    /// Whether `value` parses under this layout as a zoned or naive date-time,
    /// a date, or a time of day.
    pub fn matches(&self, value: &str) -> bool {
        let fmt = self.format.as_str();
        DateTime::parse_from_str(value, fmt).is_ok()
            || NaiveDateTime::parse_from_str(value, fmt).is_ok()
            || NaiveDate::parse_from_str(value, fmt).is_ok()
            || NaiveTime::parse_from_str(value, fmt).is_ok()
    }
}

fn to_chrono_format(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'outer: while let Some(c) = rest.chars().next() {
        for (element, spec) in ELEMENTS {
            if let Some(tail) = rest.strip_prefix(element) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}
