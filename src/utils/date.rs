use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::Write;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional CLI date; empty strings count as "not given".
pub fn parse_optional_date(s: Option<&String>) -> Result<Option<NaiveDate>, String> {
    match s.map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v).map(Some).ok_or_else(|| v.to_string()),
    }
}

/// Human date for the list view, e.g. "Jan 05, 2021".
/// A format chrono cannot render falls back to ISO.
pub fn format_date(d: Option<NaiveDate>, fmt: &str) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", d.format(fmt)) {
        Ok(()) => out,
        Err(_) => d.format("%Y-%m-%d").to_string(),
    }
}

/// Parse an RFC3339 timestamp stored in the database.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn to_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
