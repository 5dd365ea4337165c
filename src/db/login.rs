//! Persisted login (single row) and the login collaborator backed by it.

use crate::core::session::{LoginState, SessionState};
use crate::errors::AppResult;
use crate::utils::date::{parse_timestamp, to_timestamp};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRow {
    pub username: String,
    pub stay_signed_in: bool,
    pub logged_in_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

fn ts_col(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    parse_timestamp(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("invalid timestamp: {s}").into(),
        )
    })
}

pub fn load_login(conn: &Connection) -> AppResult<Option<LoginRow>> {
    let row = conn
        .query_row(
            "SELECT username, stay_signed_in, logged_in_at, last_activity
               FROM login_session WHERE id = 1",
            [],
            |row| {
                Ok(LoginRow {
                    username: row.get(0)?,
                    stay_signed_in: row.get::<_, i32>(1)? == 1,
                    logged_in_at: ts_col(2, row.get(2)?)?,
                    last_activity: ts_col(3, row.get(3)?)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

/// Replace any previous login.
pub fn save_login(
    conn: &Connection,
    username: &str,
    stay_signed_in: bool,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let ts = to_timestamp(now);
    conn.execute(
        "INSERT OR REPLACE INTO login_session (id, username, stay_signed_in, logged_in_at, last_activity)
         VALUES (1, ?1, ?2, ?3, ?3)",
        params![username, if stay_signed_in { 1 } else { 0 }, ts],
    )?;
    Ok(())
}

/// Persist the monitor's activity clock and stay-signed-in flag.
pub fn save_activity(conn: &Connection, state: &SessionState) -> AppResult<()> {
    let Some(last) = state.last_activity_at else {
        return Ok(());
    };
    conn.execute(
        "UPDATE login_session SET last_activity = ?1, stay_signed_in = ?2 WHERE id = 1",
        params![to_timestamp(last), if state.stay_signed_in { 1 } else { 0 }],
    )?;
    Ok(())
}

pub fn clear_login(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM login_session", [])?)
}

/// Login collaborator over the `login_session` row.
/// Logging out only clears the row; callers write the audit line.
pub struct DbLogin<'a> {
    conn: &'a Connection,
}

impl<'a> DbLogin<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl LoginState for DbLogin<'_> {
    fn is_logged_in(&self) -> bool {
        matches!(load_login(self.conn), Ok(Some(_)))
    }

    fn logout(&mut self) -> AppResult<()> {
        clear_login(self.conn)?;
        Ok(())
    }

    fn current_user(&self) -> Option<String> {
        load_login(self.conn).ok().flatten().map(|r| r.username)
    }
}
