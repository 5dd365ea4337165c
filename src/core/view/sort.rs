use crate::models::history::HistoryRecord;
use crate::models::sort::{SortDirection, SortField, SortState};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Sort key of the "to" column: ongoing ranks last in time,
/// a missing end date ranks first.
fn to_key(r: &HistoryRecord) -> Option<NaiveDate> {
    if r.till { Some(NaiveDate::MAX) } else { r.to }
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Ascending comparison of two records on a single field.
pub fn compare(a: &HistoryRecord, b: &HistoryRecord, field: SortField) -> Ordering {
    match field {
        SortField::Employer => cmp_ci(&a.employer, &b.employer),
        SortField::Position => cmp_ci(&a.position, &b.position),
        SortField::From => a.from.cmp(&b.from),
        SortField::To => to_key(a).cmp(&to_key(b)),
        SortField::Client => cmp_ci(
            a.client.as_deref().unwrap_or(""),
            b.client.as_deref().unwrap_or(""),
        ),
    }
}

/// Stable in-place sort; no-op when no field is selected.
pub fn apply(records: &mut [HistoryRecord], sort: &SortState) {
    let Some(field) = sort.field else {
        return;
    };

    records.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
