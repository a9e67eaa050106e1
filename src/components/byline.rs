//! The "Made by" line under a card title.

use chrono::{DateTime, NaiveDateTime};
use maud::{html, Markup, Render};

/// Format a backend timestamp the way an en-US browser's `toLocaleString()`
/// does, e.g. `1/15/2024, 12:00:00 PM`.
///
/// Timestamps are shown in the offset they were sent with. Values that
/// don't parse are returned unchanged.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct Byline<'a> {
    pub author: &'a str,
    pub datetime: &'a str,
}

impl<'a> Byline<'a> {
    #[must_use]
    pub const fn new(author: &'a str, datetime: &'a str) -> Self {
        Self { author, datetime }
    }
}

impl Render for Byline<'_> {
    fn render(&self) -> Markup {
        html! {
            p class="align-middle flex-grow-1 card-byline" {
                "Made by " (self.author) ", " (format_timestamp(self.datetime))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_variants() {
        assert_eq!(format_timestamp("2024-01-15T12:00:00"), "1/15/2024, 12:00:00 PM");
        assert_eq!(format_timestamp("2024-01-15T09:05:03.123456"), "1/15/2024, 9:05:03 AM");
        assert_eq!(format_timestamp("2024-01-15 00:30:00"), "1/15/2024, 12:30:00 AM");
        assert_eq!(format_timestamp("2024-03-01T18:45:00+02:00"), "3/1/2024, 6:45:00 PM");
        assert_eq!(
            format_timestamp("Mon, 01 Jan 2024 12:00:00 GMT"),
            "1/1/2024, 12:00:00 PM"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_byline_escapes_author() {
        let html = Byline::new("<i>eve</i>", "2024-01-15T12:00:00").render().into_string();
        assert!(html.contains("Made by &lt;i&gt;eve&lt;/i&gt;, 1/15/2024, 12:00:00 PM"));
    }
}
