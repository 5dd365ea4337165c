use crate::models::history::HistoryRecord;
use crate::models::status::StatusFilter;

/// List filters. Empty text filters are inactive; all active filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub employer: String,
    pub position: String,
    pub status: StatusFilter,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.employer.trim().is_empty()
            && self.position.trim().is_empty()
            && self.status == StatusFilter::All
    }

    pub fn matches(&self, r: &HistoryRecord) -> bool {
        contains_ci(&r.employer, &self.employer)
            && contains_ci(&r.position, &self.position)
            && self.status.matches(r.till)
    }
}

/// Case-insensitive substring match; a blank needle matches everything.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep the records matching every active filter, preserving input order.
pub fn apply(records: &[HistoryRecord], filters: &Filters) -> Vec<HistoryRecord> {
    records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect()
}
