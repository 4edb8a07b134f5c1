//! Parsing and formatting of es-AR locale amounts.
//!
//! The API sends amounts as strings such as `"1.234,56"`: `.` groups thousands
//! and `,` separates the decimals. Values are parsed into `f64` only for
//! display and aggregation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An amount as it arrives on the wire: usually locale text, sometimes a JSON number.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    pub fn value(&self) -> Option<f64> {
        match self {
            RawAmount::Number(n) => Some(*n),
            RawAmount::Text(s) => parse_locale_number(s),
        }
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Parse `"1.234,56"` into `1234.56`. Returns `None` for empty or malformed input.
pub fn parse_locale_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replace('.', "").replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Missing or malformed amounts count as zero when summing.
pub fn amount_or_zero(amount: Option<&RawAmount>) -> f64 {
    amount.and_then(RawAmount::value).unwrap_or(0.0)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Format a peso amount: `1234.56` becomes `"$ 1.234,56"`.
pub fn format_ars(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}$ {},{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Dollar amounts as shown on card statements: `12.5` becomes `"US$ 12,50"`.
pub fn format_usd(value: f64) -> String {
    let pesos = format_ars(value);
    pesos.replacen('$', "US$", 1)
}

/// Render a wire amount, using `"-"` when there is nothing to show.
pub fn format_raw_amount(amount: Option<&RawAmount>) -> String {
    match amount.and_then(RawAmount::value) {
        Some(value) => format_ars(value),
        None => "-".to_string(),
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value).replace('.', ",")
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    if let Ok(with_offset) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `dd/mm/yyyy, HH:MM`, or the input unchanged when it is not a timestamp.
pub fn format_datetime(input: &str) -> String {
    match parse_datetime(input) {
        Some(dt) => dt.format("%d/%m/%Y, %H:%M").to_string(),
        None => input.to_string(),
    }
}
