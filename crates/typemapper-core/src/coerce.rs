//! Loose value coercions used by the conversion table
//!
//! These helpers never fail. Text that cannot be read as a number yields NaN,
//! text that cannot be read as a date yields `None`, and every JSON value has
//! a string form and a truthiness.
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::OnceLock;

static FLOAT_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static EXPANDED_YEAR_REGEX: OnceLock<Regex> = OnceLock::new();
static DATE_ONLY_REGEX: OnceLock<Regex> = OnceLock::new();

/// Largest absolute time value, in milliseconds, a date may hold
const MAX_TIME_MILLIS: f64 = 8.64e15;

/// Offset-carrying layouts tried after RFC 3339
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

/// Stand-in year for expanded-year input; a leap year so Feb 29 survives
const PLACEHOLDER_YEAR: &str = "2000";

/// Zone-less layouts, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn float_prefix_regex() -> &'static Regex {
    FLOAT_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|\d+\.?\d*(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)")
            .expect("float prefix pattern is valid")
    })
}

fn expanded_year_regex() -> &'static Regex {
    EXPANDED_YEAR_REGEX.get_or_init(|| {
        Regex::new(r"^([+-]\d{6})(-.*)$").expect("expanded year pattern is valid")
    })
}

fn date_only_regex() -> &'static Regex {
    DATE_ONLY_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{4})(?:-(\d{2})(?:-(\d{2}))?)?$").expect("date pattern is valid")
    })
}

fn trim_leading(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// String form of a JSON value.
///
/// Numbers print in their shortest form, arrays join their elements with
/// commas (nulls print empty) and objects print as `[object Object]`.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map(f64_to_string).unwrap_or_else(|| n.to_string())
}

/// Shortest string form of a float, switching to exponent notation outside
/// `[1e-6, 1e21)`
pub fn f64_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}

/// Parse the leading integer of `input` in the given radix.
///
/// A radix of `None` or `0` means 10. Radix 16 also accepts a `0x` prefix.
/// Parsing stops at the first character that is not a digit of the radix, so
/// `"65.5"` yields 65. Returns NaN when no digit is found or the radix is
/// outside `2..=36`.
pub fn parse_int(input: &str, radix: Option<u32>) -> f64 {
    let mut rest = trim_leading(input);
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    let radix = match radix {
        None | Some(0) => 10,
        Some(r) => r,
    };
    if !(2..=36).contains(&radix) {
        return f64::NAN;
    }
    if radix == 16 {
        if let Some(stripped) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            rest = stripped;
        }
    }

    let mut result = 0.0_f64;
    let mut any_digit = false;
    for digit in rest.chars().map_while(|c| c.to_digit(radix)) {
        result = result * f64::from(radix) + f64::from(digit);
        any_digit = true;
    }
    if !any_digit {
        return f64::NAN;
    }
    if negative {
        -result
    } else {
        result
    }
}

/// Parse the longest leading decimal literal of `input`, or NaN if there is none
pub fn parse_float(input: &str) -> f64 {
    let trimmed = trim_leading(input);
    let Some(found) = float_prefix_regex().find(trimmed) else {
        return f64::NAN;
    };
    let literal = found.as_str();
    if literal.ends_with("Infinity") {
        return if literal.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    literal.parse::<f64>().unwrap_or(f64::NAN)
}

/// Truthiness of a JSON value: null, false, zero and the empty string are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Build a date from milliseconds since the epoch, truncating any fraction
pub fn date_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_TIME_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// Build a date from a JSON value.
///
/// Numbers are epoch milliseconds, null is the epoch, booleans are 0 or 1
/// milliseconds. Everything else goes through [`parse_date_str`] on its
/// string form.
pub fn to_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Null => date_from_millis(0.0),
        Value::Bool(b) => date_from_millis(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64().and_then(date_from_millis),
        Value::String(s) => parse_date_str(s),
        other => parse_date_str(&to_string(other)),
    }
}

/// Parse a date string.
///
/// Accepts RFC 3339, ISO 8601 date-times with or without seconds whose offset
/// is `Z` or has no colon (`+0100`), expanded `+YYYYYY` years, RFC 2822,
/// zone-less date-times (read as UTC) and `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
/// dates at midnight UTC, where a missing month or day is 1. The result has
/// millisecond resolution.
pub fn parse_date_str(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let date = match expanded_year_regex().captures(s) {
        Some(caps) => {
            // minus zero is not a year
            if &caps[1] == "-000000" {
                return None;
            }
            let year: i32 = caps[1].parse().ok()?;
            let placeholder = format!("{}{}", PLACEHOLDER_YEAR, &caps[2]);
            parse_date_layouts(&placeholder)?.with_year(year)?
        }
        None => parse_date_layouts(s)?,
    };
    date_from_millis(date.timestamp_millis() as f64)
}

fn parse_date_layouts(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date);
    }
    let zoned = s.strip_suffix(['Z', 'z']).map(|rest| format!("{}+0000", rest));
    let offset_input = zoned.as_deref().unwrap_or(s);
    for format in OFFSET_FORMATS {
        if let Ok(date) = DateTime::parse_from_str(offset_input, format) {
            return Some(date);
        }
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(s) {
        return Some(date);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().into());
        }
    }

    let caps = date_only_regex().captures(s)?;
    let part = |index: usize| caps.get(index).map_or(Some(1), |m| m.as_str().parse().ok());
    NaiveDate::from_ymd_opt(caps[1].parse().ok()?, part(2)?, part(3)?)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().into())
}
