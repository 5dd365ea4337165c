use super::history::HistoryRecord;
use chrono::NaiveDate;
use serde::Serialize;

pub const NO_CLIENT: &str = "No Client";
pub const UNKNOWN_EMPLOYER: &str = "Unknown Employer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientGroup {
    pub client_name: String,
    pub records: Vec<HistoryRecord>,
}

impl ClientGroup {
    /// Most recent effective end among the group's records.
    pub fn latest_end(&self) -> Option<NaiveDate> {
        self.records.iter().map(HistoryRecord::effective_end).max()
    }

    pub fn is_no_client(&self) -> bool {
        self.client_name == NO_CLIENT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerGroup {
    pub employer_name: String,
    pub client_groups: Vec<ClientGroup>,
}

impl EmployerGroup {
    pub fn latest_end(&self) -> Option<NaiveDate> {
        self.client_groups
            .iter()
            .filter_map(ClientGroup::latest_end)
            .max()
    }

    pub fn total_records(&self) -> usize {
        self.client_groups.iter().map(|cg| cg.records.len()).sum()
    }
}
