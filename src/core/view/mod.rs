//! List view pipeline: filter → optional user sort → employer/client grouping.
//!
//! Everything here is pure; the only state is the caller-owned
//! [`ExpansionPrefs`], which [`build_view`] merges but never overwrites.

pub mod expansion;
pub mod filter;
pub mod group;
pub mod sort;

pub use expansion::ExpansionPrefs;
pub use filter::Filters;

use crate::models::groups::EmployerGroup;
use crate::models::history::HistoryRecord;
use crate::models::sort::SortState;

/// Reshape a flat record list into ordered employer groups.
pub fn transform(
    records: &[HistoryRecord],
    filters: &Filters,
    sort: &SortState,
) -> Vec<EmployerGroup> {
    let mut filtered = filter::apply(records, filters);
    sort::apply(&mut filtered, sort);
    group::group(filtered)
}

/// [`transform`] plus registration of newly-appearing employers in `prefs`.
pub fn build_view(
    records: &[HistoryRecord],
    filters: &Filters,
    sort: &SortState,
    prefs: &mut ExpansionPrefs,
) -> Vec<EmployerGroup> {
    let groups = transform(records, filters, sort);
    prefs.merge(&groups);
    groups
}
