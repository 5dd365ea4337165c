pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod login;
pub mod logout;
pub mod session;
pub mod show;

use crate::config::Config;
use crate::core::guard;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_optional_date;
use chrono::{NaiveDate, Utc};

/// Open the database and pass the session guard.
/// Record commands start here.
pub(crate) fn open_guarded(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    guard::enter(&pool.conn, cfg, Utc::now())?;
    Ok(pool)
}

/// Optional CLI date → `InvalidDate` on malformed input.
pub(crate) fn cli_date(value: Option<&String>) -> AppResult<Option<NaiveDate>> {
    parse_optional_date(value).map_err(AppError::InvalidDate)
}
