use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{PHONE, USER, age_session, init_db, init_logged_in, rwh, setup_test_db, stdout_of};

#[test]
fn test_record_commands_require_login() {
    let db_path = setup_test_db("session_requires_login");
    init_db(&db_path);

    rwh()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));

    rwh()
        .args([
            "--db", &db_path, "add", "--employer", "Acme", "--position", "Dev",
            "--from", "2020-01-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_login_rejects_wrong_credentials() {
    let db_path = setup_test_db("session_bad_credentials");
    init_db(&db_path);

    rwh()
        .args([
            "--db", &db_path, "login", "--user", USER, "--password", "wrong", "--phone", PHONE,
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid credentials"));

    rwh()
        .args(["--db", &db_path, "login", "--user", USER, "--password", "", "--phone", PHONE])
        .assert()
        .failure()
        .stderr(contains("Password is required"));

    rwh()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_login_logout_cycle() {
    let db_path = init_logged_in("session_cycle");

    rwh()
        .args(["--db", &db_path, "session", "--status"])
        .assert()
        .success()
        .stdout(contains("admin").and(contains("active")));

    rwh()
        .args(["--db", &db_path, "logout"])
        .assert()
        .success()
        .stdout(contains("Logged out admin"));

    rwh()
        .args(["--db", &db_path, "session"])
        .assert()
        .success()
        .stdout(contains("Not logged in"));

    rwh()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("login").and(contains("logout")));
}

#[test]
fn test_idle_session_expires() {
    let db_path = init_logged_in("session_expires");
    age_session(&db_path, 16);

    rwh()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("expired"));

    // the expiry logged the user out
    rwh()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_activity_inside_warning_window_keeps_session() {
    let db_path = init_logged_in("session_warning_window");
    age_session(&db_path, 14);

    rwh()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("will expire in 1 minute due").and(contains("timer was reset")));

    // the previous command counted as activity
    rwh().args(["--db", &db_path, "list"]).assert().success();
}

#[test]
fn test_stay_signed_in_survives_inactivity() {
    let db_path = init_logged_in("session_stay_signed_in");

    rwh()
        .args(["--db", &db_path, "session", "--stay-signed-in", "on"])
        .assert()
        .success()
        .stdout(contains("will not time out"));

    age_session(&db_path, 120);

    rwh()
        .args(["--db", &db_path, "session", "--status"])
        .assert()
        .success()
        .stdout(contains("stay signed in").and(contains("never")));

    rwh().args(["--db", &db_path, "list"]).assert().success();

    rwh()
        .args(["--db", &db_path, "session", "--stay-signed-in", "off"])
        .assert()
        .success();

    age_session(&db_path, 20);
    rwh()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("expired"));
}

#[test]
fn test_extend_with_stay_signed_in_reports_no_timeout() {
    let db_path = init_logged_in("session_extend_stay");

    rwh()
        .args(["--db", &db_path, "session", "--stay-signed-in", "on"])
        .assert()
        .success();

    rwh()
        .args(["--db", &db_path, "session", "--extend"])
        .assert()
        .success()
        .stdout(contains("never times out").and(contains("Session extended").not()));

    let log = stdout_of(&db_path, &["log", "--print"]);
    assert!(!log.contains("Session extended"), "unexpected extend audit:\n{log}");
}

#[test]
fn test_watch_logs_out_on_quit() {
    let db_path = init_logged_in("session_watch_quit");

    rwh()
        .args(["--db", &db_path, "session", "--watch"])
        .write_stdin("hello\ne\nq\n")
        .assert()
        .success()
        .stdout(contains("Logged out admin"));

    rwh()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_watch_ends_with_input() {
    let db_path = init_logged_in("session_watch_eof");

    rwh()
        .args(["--db", &db_path, "session", "--watch"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("Input closed"));

    rwh().args(["--db", &db_path, "list"]).assert().success();
}
