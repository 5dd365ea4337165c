use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::{Credentials, LoginLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login {
        user,
        password,
        phone,
        stay_signed_in,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let creds = Credentials::from_config(cfg);

        LoginLogic::apply(
            &pool.conn,
            &creds,
            user,
            password,
            phone,
            *stay_signed_in,
            Utc::now(),
        )?;

        success(format!("Logged in as {}", user.trim()));
        if *stay_signed_in {
            info("Stay signed in: the session will not time out.");
        } else {
            info(format!(
                "The session expires after {} minutes of inactivity.",
                cfg.session_timeout_minutes
            ));
        }
    }
    Ok(())
}
