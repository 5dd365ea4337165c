use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One employment history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub id: i64,                     // ⇔ employment_history.id
    pub employer: String,            // ⇔ employment_history.employer (NOT NULL)
    pub position: String,            // ⇔ employment_history.position (NOT NULL)
    pub client: Option<String>,      // ⇔ employment_history.client
    pub from: NaiveDate,             // ⇔ employment_history.from_date (TEXT "YYYY-MM-DD")
    pub to: Option<NaiveDate>,       // ⇔ employment_history.to_date, ignored when till
    pub till: bool,                  // ⇔ employment_history.till (ongoing)
    pub description: Option<String>, // ⇔ employment_history.description
    pub created_at: String,          // ⇔ employment_history.created_at (ISO8601)
    pub updated_at: String,          // ⇔ employment_history.updated_at (ISO8601)
}

impl HistoryRecord {
    /// End date as stored, honoring the ongoing flag.
    pub fn end_date(&self) -> Option<NaiveDate> {
        if self.till { None } else { self.to }
    }

    /// Date used to rank a record "most recent first".
    /// Ongoing records are infinitely recent.
    pub fn effective_end(&self) -> NaiveDate {
        if self.till {
            return NaiveDate::MAX;
        }
        self.from.max(self.to.unwrap_or(self.from))
    }

    pub fn from_date_str(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    pub fn to_date_str(&self) -> String {
        self.end_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn status_label(&self) -> &'static str {
        if self.till { "current" } else { "past" }
    }
}

/// Input for a new record, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHistory {
    pub employer: String,
    pub position: String,
    pub client: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub till: bool,
    pub description: Option<String>,
}

/// Partial update. Outer `None` = leave unchanged,
/// `Some(None)` = clear an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryPatch {
    pub employer: Option<String>,
    pub position: Option<String>,
    pub client: Option<Option<String>>,
    pub from: Option<NaiveDate>,
    pub to: Option<Option<NaiveDate>>,
    pub till: Option<bool>,
    pub description: Option<Option<String>>,
}

impl HistoryPatch {
    pub fn is_empty(&self) -> bool {
        *self == HistoryPatch::default()
    }

    /// Apply the patch on top of an existing record, returning the merged input.
    pub fn merge_into(&self, current: &HistoryRecord) -> NewHistory {
        NewHistory {
            employer: self
                .employer
                .clone()
                .unwrap_or_else(|| current.employer.clone()),
            position: self
                .position
                .clone()
                .unwrap_or_else(|| current.position.clone()),
            client: self.client.clone().unwrap_or_else(|| current.client.clone()),
            from: Some(self.from.unwrap_or(current.from)),
            to: self.to.unwrap_or(current.to),
            till: self.till.unwrap_or(current.till),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
        }
    }
}

pub fn now_iso() -> String {
    Local::now().to_rfc3339()
}
