use crate::config::Config;
use crate::core::auth::LogoutLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match LogoutLogic::apply(&pool.conn)? {
        Some(user) => success(format!("Logged out {user}")),
        None => info("Not logged in."),
    }
    Ok(())
}
