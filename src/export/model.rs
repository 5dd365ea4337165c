// src/export/model.rs

use crate::models::history::HistoryRecord;
use serde::Serialize;

/// Flat row written by every export format.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryExport {
    pub id: i64,
    pub employer: String,
    pub position: String,
    pub client: String,
    pub from: String,
    pub to: String,
    pub till: bool,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&HistoryRecord> for HistoryExport {
    fn from(r: &HistoryRecord) -> Self {
        Self {
            id: r.id,
            employer: r.employer.clone(),
            position: r.position.clone(),
            client: r.client.clone().unwrap_or_default(),
            from: r.from_date_str(),
            to: r.to_date_str(),
            till: r.till,
            description: r.description.clone().unwrap_or_default(),
            created_at: r.created_at.clone(),
            updated_at: r.updated_at.clone(),
        }
    }
}
