use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add, init_logged_in, init_with_data, rwh, stdout_of};

fn pos(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found in:\n{haystack}"))
}

#[test]
fn test_list_groups_by_employer_and_client() {
    let db_path = init_with_data("list_grouping");
    let out = stdout_of(&db_path, &["list"]);

    // one header per employer, Acme (ongoing) first
    assert_eq!(out.matches("▾").count(), 2);
    assert!(pos(&out, "Acme") < pos(&out, "Globex"));
    assert!(out.contains("(2 records)"));
    assert!(out.contains("(1 record)"));

    // Acme has no client, Globex worked for Initech
    assert!(pos(&out, "No Client") < pos(&out, "Initech"));

    // ongoing record before the closed one
    assert!(pos(&out, "Lead Engineer") < pos(&out, "Jan 01, 2021"));
    assert!(out.contains("Present"));
}

#[test]
fn test_list_orders_clients_by_latest_end() {
    let db_path = init_logged_in("list_client_order");
    add(
        &db_path,
        &[
            "--employer", "Acme", "--position", "Dev", "--client", "Zeta",
            "--from", "2019-01-01", "--to", "2019-06-30",
        ],
    );
    add(
        &db_path,
        &[
            "--employer", "Acme", "--position", "Dev", "--client", "Alpha",
            "--from", "2017-01-01", "--to", "2018-01-01",
        ],
    );
    add(
        &db_path,
        &[
            "--employer", "Acme", "--position", "Dev",
            "--from", "2016-01-01", "--to", "2019-06-30",
        ],
    );

    let out = stdout_of(&db_path, &["list"]);
    // Zeta ties with "No Client" on end date: No Client goes last
    assert!(pos(&out, "Zeta") < pos(&out, "No Client"));
    assert!(pos(&out, "No Client") < pos(&out, "Alpha"));
}

#[test]
fn test_list_filters() {
    let db_path = init_with_data("list_filters");

    let out = stdout_of(&db_path, &["list", "--employer", "glob"]);
    assert!(out.contains("Globex"));
    assert!(!out.contains("Acme"));

    let out = stdout_of(&db_path, &["list", "--status", "current"]);
    assert!(out.contains("Lead Engineer"));
    assert!(!out.contains("Globex"));
    assert!(out.contains("(1 record)"));

    let out = stdout_of(&db_path, &["list", "--status", "past", "--position", "engineer"]);
    assert!(out.contains("Acme"));
    assert!(!out.contains("Lead Engineer"));

    rwh()
        .args(["--db", &db_path, "list", "--employer", "nobody"])
        .assert()
        .success()
        .stdout(contains("No records match"));

    rwh()
        .args(["--db", &db_path, "list", "--status", "later"])
        .assert()
        .failure()
        .stderr(contains("Invalid status filter"));
}

#[test]
fn test_list_sort_is_persisted_and_toggles() {
    let db_path = init_with_data("list_sort_toggle");
    add(
        &db_path,
        &[
            "--employer", "Acme", "--position", "Architect",
            "--from", "2019-01-01", "--to", "2019-12-31",
        ],
    );

    let out = stdout_of(&db_path, &["list", "--sort-by", "position"]);
    assert!(out.contains("Sorted by position ▲"));

    // sort is remembered
    let out = stdout_of(&db_path, &["list"]);
    assert!(out.contains("Sorted by position ▲"));

    // same field again flips direction
    let out = stdout_of(&db_path, &["list", "--sort-by", "position"]);
    assert!(out.contains("Sorted by position ▼"));

    let out = stdout_of(&db_path, &["list", "--clear-sort"]);
    assert!(!out.contains("Sorted by"));

    rwh()
        .args(["--db", &db_path, "list", "--sort-by", "salary"])
        .assert()
        .failure()
        .stderr(contains("Invalid sort field"));
}

#[test]
fn test_list_collapse_survives_recompute() {
    let db_path = init_with_data("list_collapse");

    rwh()
        .args(["--db", &db_path, "list", "--toggle", "acme"])
        .assert()
        .success()
        .stdout(contains("Acme collapsed").and(contains("▸")));

    // a new employer appears: Acme stays collapsed, the newcomer is expanded
    add(
        &db_path,
        &[
            "--employer", "Initrode", "--position", "Dev",
            "--from", "2022-01-01", "--till",
        ],
    );
    let out = stdout_of(&db_path, &["list"]);
    assert_eq!(out.matches("▸").count(), 1);
    assert!(!out.contains("Lead Engineer"));
    assert!(out.contains("Consultant"));

    rwh()
        .args(["--db", &db_path, "list", "--toggle", "Acme"])
        .assert()
        .success()
        .stdout(contains("Acme expanded").and(contains("Lead Engineer")));

    rwh()
        .args(["--db", &db_path, "list", "--toggle", "Nobody"])
        .assert()
        .success()
        .stdout(contains("No employer named"));
}
