use crate::errors::{AppError, AppResult};
use crate::models::history::NewHistory;
use chrono::NaiveDate;

/// Column limit of the text fields (employer, position, client).
pub const MAX_FIELD_LEN: usize = 255;

/// A record input that passed validation, normalized for storage:
/// trimmed text, blank optionals as `None`, no end date when ongoing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidHistory {
    pub employer: String,
    pub position: String,
    pub client: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub till: bool,
    pub description: Option<String>,
}

fn required(field: &'static str, value: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::MissingField(field));
    }
    bounded(field, v)
}

fn bounded(field: &'static str, v: &str) -> AppResult<String> {
    let len = v.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(AppError::FieldTooLong {
            field,
            len,
            max: MAX_FIELD_LEN,
        });
    }
    Ok(v.to_string())
}

fn optional(field: &'static str, value: Option<&str>) -> AppResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => bounded(field, v).map(Some),
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Check a record input before any write. Nothing is stored on error.
pub fn validate(input: &NewHistory) -> AppResult<ValidHistory> {
    let employer = required("Employer", &input.employer)?;
    let position = required("Position", &input.position)?;
    let client = optional("Client", input.client.as_deref())?;
    let from = input.from.ok_or(AppError::MissingField("From date"))?;

    // Ongoing employment has no end date.
    let to = if input.till { None } else { input.to };

    if let Some(to) = to
        && to < from
    {
        return Err(AppError::InvalidDateRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    Ok(ValidHistory {
        employer,
        position,
        client,
        from,
        to,
        till: input.till,
        description: optional_text(input.description.as_deref()),
    })
}
