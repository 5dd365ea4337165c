//! Session guard run before every record command.
//!
//! The persisted login is resumed into a [`SessionMonitor`] and polled at the
//! current time. An overdue session is logged out; otherwise the invocation
//! counts as activity and the new activity time is written back.

use crate::config::Config;
use crate::core::session::{SessionEvent, SessionMonitor, TimeoutSettings};
use crate::db::log::audit;
use crate::db::login::{DbLogin, load_login, save_activity};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, session_warning};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Minutes shown to the user, rounded up.
pub fn ms_to_minutes(ms: i64) -> i64 {
    (ms + 59_999) / 60_000
}

/// What the guard let through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPass {
    pub user: String,
    /// Minutes that were left when the pending warning was shown.
    pub warned_minutes: Option<i64>,
    /// False when stay-signed-in keeps the timer off.
    pub refreshed: bool,
}

pub fn enter(conn: &Connection, cfg: &Config, now: DateTime<Utc>) -> AppResult<GuardPass> {
    let row = load_login(conn)?.ok_or(AppError::NotLoggedIn)?;
    let settings = TimeoutSettings::from_config(cfg)?;

    let mut monitor = SessionMonitor::resume(
        settings,
        DbLogin::new(conn),
        row.last_activity,
        row.stay_signed_in,
    );

    let events = monitor.poll(now)?;
    if events.contains(&SessionEvent::Expired) {
        audit(conn, "expired", &row.username, "Session expired due to inactivity")?;
        return Err(AppError::SessionExpired);
    }

    // Time actually left, not the configured window.
    let warned_minutes = if events
        .iter()
        .any(|ev| matches!(ev, SessionEvent::Warning { .. }))
    {
        monitor
            .remaining(now)
            .map(|left| ms_to_minutes(left.num_milliseconds()))
    } else {
        None
    };

    let refreshed = monitor.reset_timer(now);
    save_activity(conn, monitor.state())?;

    if let Some(minutes) = warned_minutes {
        session_warning(minutes);
        if refreshed {
            info("This command counts as activity: the session timer was reset.");
        }
    }

    Ok(GuardPass {
        user: row.username,
        warned_minutes,
        refreshed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::login::save_login;
    use crate::db::pool::DbPool;
    use chrono::Duration;

    #[test]
    fn requires_a_login() {
        let pool = DbPool::in_memory().unwrap();
        let res = enter(&pool.conn, &Config::default(), Utc::now());
        assert!(matches!(res, Err(AppError::NotLoggedIn)));
    }

    #[test]
    fn fresh_session_is_refreshed() {
        let pool = DbPool::in_memory().unwrap();
        let now = Utc::now();
        save_login(&pool.conn, "admin", false, now - Duration::minutes(5)).unwrap();

        let pass = enter(&pool.conn, &Config::default(), now).unwrap();
        assert_eq!(pass.user, "admin");
        assert!(pass.refreshed);
        assert_eq!(pass.warned_minutes, None);
        let row = load_login(&pool.conn).unwrap().unwrap();
        assert_eq!(row.last_activity, now);
    }

    #[test]
    fn session_inside_warning_window_survives() {
        let pool = DbPool::in_memory().unwrap();
        let now = Utc::now();
        save_login(&pool.conn, "admin", false, now - Duration::minutes(14)).unwrap();

        let pass = enter(&pool.conn, &Config::default(), now).unwrap();
        assert!(pass.refreshed);
        assert_eq!(load_login(&pool.conn).unwrap().unwrap().last_activity, now);
    }

    #[test]
    fn idle_session_expires_and_logs_out() {
        let pool = DbPool::in_memory().unwrap();
        let now = Utc::now();
        save_login(&pool.conn, "admin", false, now - Duration::minutes(16)).unwrap();

        let res = enter(&pool.conn, &Config::default(), now);
        assert!(matches!(res, Err(AppError::SessionExpired)));
        assert_eq!(load_login(&pool.conn).unwrap(), None);

        let expired: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM log WHERE operation = 'expired'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(expired, 1);
    }

    #[test]
    fn stay_signed_in_never_expires() {
        let pool = DbPool::in_memory().unwrap();
        let now = Utc::now();
        save_login(&pool.conn, "admin", true, now - Duration::hours(6)).unwrap();

        let pass = enter(&pool.conn, &Config::default(), now).unwrap();
        assert!(!pass.refreshed);
        assert_eq!(pass.warned_minutes, None);
    }

    #[test]
    fn warning_reports_the_time_actually_left() {
        let pool = DbPool::in_memory().unwrap();
        let now = Utc::now();
        save_login(&pool.conn, "admin", false, now - Duration::seconds(13 * 60 + 30)).unwrap();

        // 15 min timeout, 2 min window: 90 s left shows as 2, not the window.
        let pass = enter(&pool.conn, &Config::default(), now).unwrap();
        assert_eq!(pass.warned_minutes, Some(2));

        save_login(&pool.conn, "admin", false, now - Duration::seconds(14 * 60 + 30)).unwrap();
        let pass = enter(&pool.conn, &Config::default(), now).unwrap();
        assert_eq!(pass.warned_minutes, Some(1));
    }

    #[test]
    fn minutes_round_up() {
        assert_eq!(ms_to_minutes(120_000), 2);
        assert_eq!(ms_to_minutes(60_001), 2);
        assert_eq!(ms_to_minutes(1), 1);
    }
}
