//! Host-supplied display date masks.
//!
//! Boards configure a `dateformat`-style mask (for example `d mmm yyyy` or
//! the named mask `isoDate`). Rendering happens in UTC.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::dates::parse_timestamp;

/// Mask used when a board does not configure one.
pub const DEFAULT_MASK: &str = "ddd mmm dd yyyy HH:MM:ss";

/// A display date mask as configured on the board.
///
/// # Examples
///
/// ```
/// use kanbn_task_editor::editor::domain::DisplayDateFormat;
///
/// let format = DisplayDateFormat::new("dddd, mmmm dS yyyy");
/// assert_eq!(
///     format.format("2024-03-01T09:05:00Z").as_deref(),
///     Some("Friday, March 1st 2024"),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayDateFormat(String);

impl DisplayDateFormat {
    /// Wraps a raw mask string.
    #[must_use]
    pub fn new(mask: impl Into<String>) -> Self {
        Self(mask.into())
    }

    /// Returns the raw mask.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no mask was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Formats a timestamp-like value, or `None` when it does not parse.
    #[must_use]
    pub fn format(&self, value: &str) -> Option<String> {
        parse_timestamp(value).map(|instant| self.format_instant(instant))
    }

    /// Formats an instant with this mask.
    #[must_use]
    pub fn format_instant(&self, instant: DateTime<Utc>) -> String {
        render(resolve_named_mask(&self.0), instant)
    }
}

fn resolve_named_mask(mask: &str) -> &str {
    match mask {
        "" | "default" => DEFAULT_MASK,
        "shortDate" => "m/d/yy",
        "mediumDate" => "mmm d, yyyy",
        "longDate" => "mmmm d, yyyy",
        "fullDate" => "dddd, mmmm d, yyyy",
        "shortTime" => "h:MM TT",
        "mediumTime" => "h:MM:ss TT",
        "longTime" => "h:MM:ss TT Z",
        "isoDate" => "yyyy-mm-dd",
        "isoTime" => "HH:MM:ss",
        "isoDateTime" => "yyyy-mm-dd'T'HH:MM:sso",
        other => other,
    }
}

const fn max_run(token: char) -> usize {
    match token {
        'd' | 'm' | 'y' => 4,
        'H' | 'h' | 'M' | 's' | 't' | 'T' => 2,
        _ => 1,
    }
}

const fn is_token(ch: char) -> bool {
    matches!(
        ch,
        'd' | 'm' | 'y' | 'H' | 'h' | 'M' | 's' | 't' | 'T' | 'l' | 'L' | 'Z' | 'o' | 'S'
    )
}

fn render(mask: &str, instant: DateTime<Utc>) -> String {
    let mut out = String::with_capacity(mask.len().saturating_mul(2));
    let mut chars = mask.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\'' || ch == '"' {
            for literal in chars.by_ref() {
                if literal == ch {
                    break;
                }
                out.push(literal);
            }
            continue;
        }

        if !is_token(ch) {
            out.push(ch);
            continue;
        }

        let mut run = 1;
        while chars.peek() == Some(&ch) && run < max_run(ch) {
            chars.next();
            run += 1;
        }
        push_token(&mut out, ch, run, instant);
    }

    out
}

fn push_token(out: &mut String, token: char, run: usize, instant: DateTime<Utc>) {
    let (is_pm, hour12) = instant.hour12();
    let rendered = match (token, run) {
        ('d', 1) => instant.day().to_string(),
        ('d', 2) => format!("{:02}", instant.day()),
        ('d', 3) => instant.format("%a").to_string(),
        ('d', _) => instant.format("%A").to_string(),
        ('m', 1) => instant.month().to_string(),
        ('m', 2) => format!("{:02}", instant.month()),
        ('m', 3) => instant.format("%b").to_string(),
        ('m', _) => instant.format("%B").to_string(),
        ('y', 4) => instant.format("%Y").to_string(),
        ('y', 3) => format!("{}y", instant.format("%y")),
        ('y', 2) => instant.format("%y").to_string(),
        ('H', 1) => instant.hour().to_string(),
        ('H', _) => format!("{:02}", instant.hour()),
        ('h', 1) => hour12.to_string(),
        ('h', _) => format!("{hour12:02}"),
        ('M', 1) => instant.minute().to_string(),
        ('M', _) => format!("{:02}", instant.minute()),
        ('s', 1) => instant.second().to_string(),
        ('s', _) => format!("{:02}", instant.second()),
        ('l', _) => instant.format("%3f").to_string(),
        ('L', _) => instant.format("%3f").to_string().chars().take(2).collect(),
        ('t', 1) => meridiem(is_pm, "a", "p"),
        ('t', _) => meridiem(is_pm, "am", "pm"),
        ('T', 1) => meridiem(is_pm, "A", "P"),
        ('T', _) => meridiem(is_pm, "AM", "PM"),
        ('Z', _) => "UTC".to_owned(),
        ('o', _) => "+0000".to_owned(),
        ('S', _) => ordinal_suffix(instant.day()).to_owned(),
        (other, _) => other.to_string(),
    };
    out.push_str(&rendered);
}

fn meridiem(is_pm: bool, am: &str, pm: &str) -> String {
    let text = if is_pm { pm } else { am };
    text.to_owned()
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}
