#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const USER: &str = "admin";
pub const PASSWORD: &str = "admin";
pub const PHONE: &str = "1234567890";

/// Binary with credentials pinned, whatever the local config says.
pub fn rwh() -> Command {
    let mut cmd = cargo_bin_cmd!("rworkhistory");
    cmd.env("LOGIN_USERNAME", USER)
        .env("LOGIN_PASSWORD", PASSWORD)
        .env("LOGIN_PHONE", PHONE);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworkhistory.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    rwh()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn login(db_path: &str) {
    rwh()
        .args([
            "--db",
            db_path,
            "login",
            "--user",
            USER,
            "--password",
            PASSWORD,
            "--phone",
            PHONE,
        ])
        .assert()
        .success();
}

/// Fresh DB with a logged-in session.
pub fn init_logged_in(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db(&db_path);
    login(&db_path);
    db_path
}

pub fn add(db_path: &str, extra: &[&str]) {
    let mut args = vec!["--db", db_path, "add"];
    args.extend_from_slice(extra);
    rwh().args(&args).assert().success();
}

/// Small dataset: two Acme records (one ongoing) and one Globex record for a client.
pub fn init_with_data(name: &str) -> String {
    let db_path = init_logged_in(name);
    add(
        &db_path,
        &[
            "--employer", "Acme", "--position", "Engineer",
            "--from", "2020-01-01", "--to", "2021-01-01",
        ],
    );
    add(
        &db_path,
        &[
            "--employer", "Acme", "--position", "Lead Engineer",
            "--from", "2021-02-01", "--till",
        ],
    );
    add(
        &db_path,
        &[
            "--employer", "Globex", "--position", "Consultant",
            "--client", "Initech", "--from", "2018-03-01", "--to", "2019-12-31",
        ],
    );
    db_path
}

/// Run a command and return its stdout.
pub fn stdout_of(db_path: &str, args: &[&str]) -> String {
    let mut full = vec!["--db", db_path];
    full.extend_from_slice(args);
    let out = rwh().args(&full).output().expect("run rworkhistory");
    assert!(out.status.success(), "command {:?} failed", args);
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// Move the stored activity time back by `minutes`.
pub fn age_session(db_path: &str, minutes: i64) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let past = (chrono::Utc::now() - chrono::Duration::minutes(minutes)).to_rfc3339();
    conn.execute(
        "UPDATE login_session SET last_activity = ?1 WHERE id = 1",
        [past],
    )
    .expect("age session");
}
