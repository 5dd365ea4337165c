use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250110_0001_create_employment_history",
        description: "Created employment_history table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employment_history (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employer    TEXT NOT NULL CHECK(length(employer) <= 255),
            position    TEXT NOT NULL CHECK(length(position) <= 255),
            client      TEXT CHECK(client IS NULL OR length(client) <= 255),
            from_date   TEXT NOT NULL,
            to_date     TEXT,
            till        INTEGER NOT NULL DEFAULT 0 CHECK(till IN (0, 1)),
            description TEXT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_from ON employment_history(from_date);
        CREATE INDEX IF NOT EXISTS idx_history_employer ON employment_history(employer);
        "#,
    },
    Migration {
        version: "20250110_0002_create_login_session",
        description: "Created login_session table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS login_session (
            id             INTEGER PRIMARY KEY CHECK(id = 1),
            username       TEXT NOT NULL,
            stay_signed_in INTEGER NOT NULL DEFAULT 0,
            logged_in_at   TEXT NOT NULL,
            last_activity  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250124_0003_create_view_state",
        description: "Created view_prefs and employer_view tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS view_prefs (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS employer_view (
            employer TEXT PRIMARY KEY,
            expanded INTEGER NOT NULL DEFAULT 1
        );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    run_migrations(conn, MIGRATIONS)
}

fn run_migrations(conn: &Connection, migrations: &[Migration]) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in migrations {
        if !is_applied(conn, m.version)? {
            apply(conn, m).map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;
        }
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}
