//! Credential login: a plain equality check against the configured user.

use crate::config::Config;
use crate::db::log::audit;
use crate::db::login::{clear_login, load_login, save_login};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub phone: String,
}

impl Credentials {
    /// Configured credentials; `LOGIN_USERNAME`, `LOGIN_PASSWORD` and
    /// `LOGIN_PHONE` take precedence over the config file.
    pub fn from_config(cfg: &Config) -> Self {
        let pick = |var: &str, fallback: &str| env::var(var).unwrap_or_else(|_| fallback.to_string());

        Self {
            username: pick("LOGIN_USERNAME", &cfg.login_username),
            password: pick("LOGIN_PASSWORD", &cfg.login_password),
            phone: pick("LOGIN_PHONE", &cfg.login_phone),
        }
    }

    pub fn verify(&self, username: &str, password: &str, phone: &str) -> AppResult<()> {
        let username = username.trim();
        let phone = phone.trim();

        if username.is_empty() {
            return Err(AppError::MissingField("Username"));
        }
        if password.is_empty() {
            return Err(AppError::MissingField("Password"));
        }
        if phone.is_empty() {
            return Err(AppError::MissingField("Phone number"));
        }

        if username == self.username && password == self.password && phone == self.phone {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

pub struct LoginLogic;

impl LoginLogic {
    pub fn apply(
        conn: &Connection,
        creds: &Credentials,
        username: &str,
        password: &str,
        phone: &str,
        stay_signed_in: bool,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if let Err(e) = creds.verify(username, password, phone) {
            if matches!(e, AppError::InvalidCredentials) {
                audit(conn, "login_failed", username.trim(), "Invalid credentials")?;
            }
            return Err(e);
        }

        let username = username.trim();
        save_login(conn, username, stay_signed_in, now)?;
        audit(
            conn,
            "login",
            username,
            if stay_signed_in {
                "Logged in (stay signed in)"
            } else {
                "Logged in"
            },
        )?;
        Ok(())
    }
}

pub struct LogoutLogic;

impl LogoutLogic {
    /// Returns the user that was logged out, if any.
    pub fn apply(conn: &Connection) -> AppResult<Option<String>> {
        let Some(row) = load_login(conn)? else {
            return Ok(None);
        };

        clear_login(conn)?;
        audit(conn, "logout", &row.username, "Logged out")?;
        Ok(Some(row.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    fn creds() -> Credentials {
        Credentials {
            username: "admin".into(),
            password: "admin".into(),
            phone: "1234567890".into(),
        }
    }

    #[test]
    fn verify_requires_every_field() {
        let c = creds();
        assert!(matches!(
            c.verify(" ", "admin", "1234567890"),
            Err(AppError::MissingField("Username"))
        ));
        assert!(matches!(
            c.verify("admin", "", "1234567890"),
            Err(AppError::MissingField("Password"))
        ));
        assert!(matches!(
            c.verify("admin", "admin", ""),
            Err(AppError::MissingField("Phone number"))
        ));
    }

    #[test]
    fn verify_rejects_any_mismatch() {
        let c = creds();
        assert!(c.verify("admin", "admin", "1234567890").is_ok());
        assert!(c.verify(" admin ", "admin", "1234567890").is_ok());
        assert!(matches!(
            c.verify("admin", "Admin", "1234567890"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            c.verify("admin", "admin", "0000000000"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn login_then_logout() {
        let pool = DbPool::in_memory().unwrap();
        let now = Utc::now();

        LoginLogic::apply(&pool.conn, &creds(), "admin", "admin", "1234567890", true, now)
            .unwrap();
        let row = load_login(&pool.conn).unwrap().unwrap();
        assert!(row.stay_signed_in);

        assert_eq!(LogoutLogic::apply(&pool.conn).unwrap().as_deref(), Some("admin"));
        assert_eq!(LogoutLogic::apply(&pool.conn).unwrap(), None);
    }

    #[test]
    fn failed_login_leaves_no_session() {
        let pool = DbPool::in_memory().unwrap();
        let res = LoginLogic::apply(&pool.conn, &creds(), "admin", "nope", "1", false, Utc::now());

        assert!(matches!(res, Err(AppError::InvalidCredentials)));
        assert_eq!(load_login(&pool.conn).unwrap(), None);
    }
}
