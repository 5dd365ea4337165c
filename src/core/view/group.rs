use crate::models::groups::{ClientGroup, EmployerGroup, NO_CLIENT, UNKNOWN_EMPLOYER};
use crate::models::history::HistoryRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

fn employer_name(r: &HistoryRecord) -> &str {
    if r.employer.trim().is_empty() {
        UNKNOWN_EMPLOYER
    } else {
        &r.employer
    }
}

fn client_name(r: &HistoryRecord) -> &str {
    match r.client.as_deref() {
        Some(c) if !c.trim().is_empty() => c,
        _ => NO_CLIENT,
    }
}

fn cmp_alpha(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Most recent first.
fn cmp_records(a: &HistoryRecord, b: &HistoryRecord) -> Ordering {
    b.effective_end().cmp(&a.effective_end())
}

/// Most recent first, then "No Client" last, then alphabetical.
fn cmp_clients(a: &ClientGroup, b: &ClientGroup) -> Ordering {
    b.latest_end()
        .cmp(&a.latest_end())
        .then_with(|| a.is_no_client().cmp(&b.is_no_client()))
        .then_with(|| cmp_alpha(&a.client_name, &b.client_name))
}

/// Most recent first, then alphabetical.
fn cmp_employers(a: &EmployerGroup, b: &EmployerGroup) -> Ordering {
    b.latest_end()
        .cmp(&a.latest_end())
        .then_with(|| cmp_alpha(&a.employer_name, &b.employer_name))
}

/// Partition records into employer → client groups.
///
/// Buckets are filled in a single pass in first-seen order; the final
/// order comes only from the explicit comparators, so the result does not
/// depend on map iteration. All sorts are stable: records with the same
/// effective end keep their incoming (possibly user-sorted) order.
pub fn group(records: Vec<HistoryRecord>) -> Vec<EmployerGroup> {
    let mut employers: Vec<EmployerGroup> = Vec::new();
    let mut employer_idx: HashMap<String, usize> = HashMap::new();
    let mut client_idx: Vec<HashMap<String, usize>> = Vec::new();

    for r in records {
        let employer = employer_name(&r).to_string();
        let client = client_name(&r).to_string();

        let ei = *employer_idx.entry(employer.clone()).or_insert_with(|| {
            employers.push(EmployerGroup {
                employer_name: employer,
                client_groups: Vec::new(),
            });
            client_idx.push(HashMap::new());
            employers.len() - 1
        });

        let eg = &mut employers[ei];
        let ci = *client_idx[ei].entry(client.clone()).or_insert_with(|| {
            eg.client_groups.push(ClientGroup {
                client_name: client,
                records: Vec::new(),
            });
            eg.client_groups.len() - 1
        });

        eg.client_groups[ci].records.push(r);
    }

    for eg in &mut employers {
        for cg in &mut eg.client_groups {
            cg.records.sort_by(cmp_records);
        }
        eg.client_groups.sort_by(cmp_clients);
    }
    employers.sort_by(cmp_employers);

    employers
}
